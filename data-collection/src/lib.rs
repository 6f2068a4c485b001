//! Data collection from prediction-market platforms
//!
//! One connector per venue (Polymarket, Kalshi, Prediction-Market, Manifold),
//! each producing normalized `MarketListing`s. Connectors that talk to a real
//! API fall back to built-in fixture listings on failure so the rest of the
//! pipeline always has data to work with.

pub mod collector;
pub mod connectors;
pub mod writer;

pub use collector::Collector;
