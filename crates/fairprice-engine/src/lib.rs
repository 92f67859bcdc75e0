//! # FairPrice Engine
//!
//! Retail price recommendation from unit cost, desired margin, and the
//! observed competitor price range.
//!
//! ## Pricing Formula
//!
//! ```text
//! cost_based  = unit_cost / (1 - margin / 100)
//! midpoint    = (competitor_min + competitor_max) / 2
//! recommended = 0.6 * cost_based + 0.4 * midpoint
//! ```
//!
//! Where:
//! - cost_based: price at which `margin` percent of the sale is profit
//! - midpoint: centre of the competitor range
//! - 0.6 / 0.4: default [`BlendWeights`], favoring cost recovery
//!
//! The engine is pure and deterministic. Identical inputs always produce
//! identical results, and one engine can serve any number of threads.

pub mod pricing;
pub mod risk;

use fairprice_common::{PricingInput, PricingResult, Result};
use serde::{Deserialize, Serialize};

pub use pricing::{BlendWeights, PriceQuote, PricingEngine};
pub use risk::{RiskAssessment, RiskBranch, CONFIDENCE_NOTE};

/// Engine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cost/market blend used for the recommendation
    pub weights: BlendWeights,
}

impl EngineConfig {
    /// Configuration with a validated custom weight pair
    pub fn with_weights(cost: rust_decimal::Decimal, market: rust_decimal::Decimal) -> Result<Self> {
        Ok(Self {
            weights: BlendWeights::new(cost, market)?,
        })
    }
}

/// Recommend a price with the default weights.
///
/// # Panics
///
/// Panics on input that fails [`PricingInput::validate`].
pub fn compute_recommendation(input: &PricingInput) -> PricingResult {
    PricingEngine::default().compute_recommendation(input)
}
