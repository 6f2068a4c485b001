//! Product identification and unification
//!
//! Decides which listings from different venues describe the same real-world
//! event and merges them into unified product groups. Two scoring paths:
//! - A Gemini judge comparing question pairs semantically
//! - A rule-based fallback combining keyword overlap and character similarity
//!
//! The judge degrades to the rule-based path whenever the LLM is unavailable
//! or returns something unusable, so unification always completes.

pub mod llm;
pub mod matcher;
pub mod normalize;
pub mod similarity;

pub use llm::MatchJudge;
pub use matcher::ProductMatcher;
pub use similarity::MatchVerdict;
