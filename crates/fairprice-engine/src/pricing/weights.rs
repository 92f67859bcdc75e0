//! Blend weights between cost-based price and market midpoint

use fairprice_common::{FairPriceError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default weight of the cost-based price
pub const DEFAULT_COST_WEIGHT: Decimal = dec!(0.6);

/// Default weight of the market midpoint
pub const DEFAULT_MARKET_WEIGHT: Decimal = dec!(0.4);

/// `(w_cost, w_market)` coefficient pair, always summing to exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWeights")]
pub struct BlendWeights {
    cost: Decimal,
    market: Decimal,
}

impl BlendWeights {
    /// Create a weight pair.
    ///
    /// Both weights must lie in `[0, 1]` and sum to exactly `1`.
    pub fn new(cost: Decimal, market: Decimal) -> Result<Self> {
        let unit = Decimal::ZERO..=Decimal::ONE;
        if !unit.contains(&cost) || !unit.contains(&market) {
            return Err(FairPriceError::Config(format!(
                "blend weights must lie in [0, 1], got cost={} market={}",
                cost, market
            )));
        }
        if cost + market != Decimal::ONE {
            return Err(FairPriceError::Config(format!(
                "blend weights must sum to 1, got cost={} market={}",
                cost, market
            )));
        }
        Ok(Self { cost, market })
    }

    /// Pair with the given cost weight; the market weight is the remainder
    pub fn favoring_cost(cost: Decimal) -> Result<Self> {
        Self::new(cost, Decimal::ONE - cost)
    }

    #[inline]
    pub fn cost(&self) -> Decimal {
        self.cost
    }

    #[inline]
    pub fn market(&self) -> Decimal {
        self.market
    }

    /// `w_cost * cost_based + w_market * midpoint`, `None` on overflow
    pub fn blend(&self, cost_based: Decimal, midpoint: Decimal) -> Option<Decimal> {
        self.cost
            .checked_mul(cost_based)?
            .checked_add(self.market.checked_mul(midpoint)?)
    }
}

#[derive(Deserialize)]
struct RawWeights {
    cost: Decimal,
    market: Decimal,
}

impl TryFrom<RawWeights> for BlendWeights {
    type Error = FairPriceError;

    fn try_from(raw: RawWeights) -> Result<Self> {
        Self::new(raw.cost, raw.market)
    }
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            cost: DEFAULT_COST_WEIGHT,
            market: DEFAULT_MARKET_WEIGHT,
        }
    }
}
