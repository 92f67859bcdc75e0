//! # FairPrice Common
//!
//! Shared types, validation, and errors for the FairPrice pricing engine.
//!
//! ## Core Types
//!
//! - [`PricingInput`]: unit cost, desired margin, and competitor price range
//! - [`PricingResult`]: recommended price, suggested range, risk, scenarios
//! - [`ProfitScenario`]: one priced row of the profit comparison table
//! - [`RiskLevel`]/[`MarketPosition`]: categorical labels rendered by the UI
//!
//! ## Money
//!
//! - [`money::round_money`]: cent rounding, half away from zero
//! - [`money::same_price`]: one-cent equality used for deduplication

pub mod error;
pub mod money;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{FairPriceError, FieldError, Result, ValidationError};
pub use money::{round_money, same_price, PRICE_TOLERANCE};
pub use types::pricing::{
    MarketPosition, PricingInput, PricingResult, ProfitScenario, RiskLevel, SuggestedRange,
};

/// FairPrice version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
