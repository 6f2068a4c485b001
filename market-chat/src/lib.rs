//! Conversational interface over the pipeline outputs
//!
//! Builds an in-memory knowledge base from the generated files, retrieves the
//! most relevant documents per question, and answers through Gemini with the
//! retrieved context injected into the prompt.

pub mod chat;
pub mod knowledge;
pub mod retrieval;

pub use chat::ChatSession;
pub use knowledge::{Document, KnowledgeBase};
pub use retrieval::Retriever;
