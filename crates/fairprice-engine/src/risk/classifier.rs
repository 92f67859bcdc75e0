//! Ordered risk decision list
//!
//! Branches are evaluated top to bottom and the first match wins. They are
//! not mutually exclusive by arithmetic alone: a price far above the market
//! is also above the midpoint, and only the ordering makes it `high`.
//!
//! | Order | Condition                          | Level  |
//! |-------|------------------------------------|--------|
//! | 1     | price < competitor min * 0.9       | high   |
//! | 2     | price > competitor max * 1.1       | high   |
//! | 3     | price > market midpoint            | medium |
//! | 4     | otherwise                          | low    |

use fairprice_common::RiskLevel;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Below this fraction of the cheapest competitor the price reads as cut-rate
pub const BELOW_MARKET_FACTOR: Decimal = dec!(0.9);

/// Above this multiple of the dearest competitor the price needs justification
pub const ABOVE_MARKET_FACTOR: Decimal = dec!(1.1);

/// Advisory attached to every recommendation
pub const CONFIDENCE_NOTE: &str = "This recommendation is based only on the figures you entered. \
Check it against current market conditions before changing your prices.";

/// Decision branch taken by [`classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskBranch {
    BelowMarket,
    AboveMarket,
    UpperHalf,
    WithinRange,
}

impl RiskBranch {
    pub fn level(&self) -> RiskLevel {
        match self {
            RiskBranch::BelowMarket | RiskBranch::AboveMarket => RiskLevel::High,
            RiskBranch::UpperHalf => RiskLevel::Medium,
            RiskBranch::WithinRange => RiskLevel::Low,
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            RiskBranch::BelowMarket => {
                "The recommended price is well below the lowest competitor price. \
                 Pricing this far under the market can erode profit and change how \
                 customers see the product."
            }
            RiskBranch::AboveMarket => {
                "The recommended price is well above the highest competitor price. \
                 Customers will need a strong reason to choose this product over \
                 cheaper alternatives."
            }
            RiskBranch::UpperHalf => {
                "The recommended price sits in the upper half of the competitor range. \
                 This is workable if the product offers something competitors do not."
            }
            RiskBranch::WithinRange => {
                "The recommended price falls within the competitive range while keeping \
                 a healthy margin over unit cost."
            }
        }
    }

    pub fn factors(&self) -> &'static [&'static str] {
        match self {
            RiskBranch::BelowMarket => &[
                "Customers may perceive the product as lower quality",
                "A price this low may signal an unsustainable margin",
                "Leaves no headroom for future discounts or promotions",
            ],
            RiskBranch::AboveMarket => &[
                "Demand may drop at a price above the market",
                "Requires clear differentiation from competitors",
                "Limits reach among price-sensitive customers",
            ],
            RiskBranch::UpperHalf => &[
                "Positioned in the upper half of the market",
                "Needs clear differentiation to justify the price",
            ],
            RiskBranch::WithinRange => &[
                "Within the competitive price range",
                "Healthy margin over unit cost",
            ],
        }
    }
}

/// Pick the first matching branch for an unrounded recommended price
pub fn classify(
    recommended: Decimal,
    competitor_min: Decimal,
    competitor_max: Decimal,
    midpoint: Decimal,
) -> RiskBranch {
    if recommended < competitor_min * BELOW_MARKET_FACTOR {
        RiskBranch::BelowMarket
    } else if recommended
        > competitor_max
            .checked_mul(ABOVE_MARKET_FACTOR)
            .unwrap_or(Decimal::MAX)
    {
        RiskBranch::AboveMarket
    } else if recommended > midpoint {
        RiskBranch::UpperHalf
    } else {
        RiskBranch::WithinRange
    }
}

/// Level plus the rationale rendered next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub branch: RiskBranch,
    pub level: RiskLevel,
    pub explanation: String,
    pub factors: Vec<String>,
}

impl From<RiskBranch> for RiskAssessment {
    fn from(branch: RiskBranch) -> Self {
        Self {
            branch,
            level: branch.level(),
            explanation: branch.explanation().to_string(),
            factors: branch.factors().iter().map(|f| f.to_string()).collect(),
        }
    }
}
