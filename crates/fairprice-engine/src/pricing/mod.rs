//! Pricing module
//!
//! Provides the recommendation pipeline with:
//! - Tunable cost/market blend weights
//! - Suggested price range bounded by cost and competition
//! - Deduplicated, sorted profit scenarios

pub mod engine;
pub mod scenarios;
pub mod weights;

pub use engine::{PriceQuote, PricingEngine};
pub use scenarios::{build_scenarios, Candidate};
pub use weights::{BlendWeights, DEFAULT_COST_WEIGHT, DEFAULT_MARKET_WEIGHT};
