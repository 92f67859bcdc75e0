//! Pricing decision engine
//!
//! Maps a [`PricingInput`] to a [`PricingResult`]:
//! - Cost-based price from unit cost and desired margin
//! - Market midpoint of the competitor range
//! - Weighted blend of the two as the recommendation
//! - Suggested range, risk classification, and profit scenarios

use fairprice_common::{
    round_money, FairPriceError, PricingInput, PricingResult, Result, SuggestedRange,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, instrument};

use super::scenarios::{build_scenarios, candidates};
use super::weights::BlendWeights;
use crate::risk::{classify, RiskAssessment, RiskBranch, CONFIDENCE_NOTE};
use crate::EngineConfig;

/// Suggested floor never drops under 110% of unit cost
pub const COST_FLOOR_MARKUP: Decimal = dec!(1.1);

/// Suggested floor stays near the cheapest competitor
pub const COMPETITOR_FLOOR_FACTOR: Decimal = dec!(0.95);

/// Suggested ceiling is capped at 120% of the cost-based price
pub const COST_CEILING_MARKUP: Decimal = dec!(1.2);

/// Suggested ceiling stays near the dearest competitor
pub const COMPETITOR_CEILING_FACTOR: Decimal = dec!(1.05);

/// Unrounded intermediate values of one recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    /// Price at which `desired_margin` percent of the sale is profit
    pub cost_based_price: Decimal,
    /// Mean of competitor min and max
    pub market_midpoint: Decimal,
    /// Weighted blend of the two prices above
    pub recommended_price: Decimal,
    pub suggested_min: Decimal,
    pub suggested_max: Decimal,
}

/// Stateless pricing engine; share freely across threads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingEngine {
    weights: BlendWeights,
}

impl PricingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            weights: config.weights,
        }
    }

    pub fn weights(&self) -> BlendWeights {
        self.weights
    }

    /// Compute a recommendation for caller-validated input.
    ///
    /// # Panics
    ///
    /// Panics when `input` breaks the contract checked by
    /// [`PricingInput::validate`], or when the arithmetic leaves the decimal
    /// range. Both are caller bugs; use
    /// [`try_compute_recommendation`](Self::try_compute_recommendation) to get
    /// them as errors instead.
    pub fn compute_recommendation(&self, input: &PricingInput) -> PricingResult {
        match self.try_compute_recommendation(input) {
            Ok(result) => result,
            Err(err) => panic!("pricing engine called outside its contract: {err}"),
        }
    }

    /// Validate, then compute
    pub fn try_compute_recommendation(&self, input: &PricingInput) -> Result<PricingResult> {
        input.validate()?;
        self.evaluate(input)
    }

    /// Unrounded cost-based price, midpoint, blend, and suggested range
    pub fn quote(&self, input: &PricingInput) -> Result<PriceQuote> {
        let margin_share = input
            .desired_margin
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or(FairPriceError::Overflow)?;
        let cost_based_price = input
            .unit_cost
            .checked_div(Decimal::ONE - margin_share)
            .ok_or(FairPriceError::Overflow)?;

        let market_midpoint = input
            .competitor_min_price
            .checked_add(input.competitor_max_price)
            .ok_or(FairPriceError::Overflow)?
            / dec!(2);

        let recommended_price = self
            .weights
            .blend(cost_based_price, market_midpoint)
            .ok_or(FairPriceError::Overflow)?;

        let suggested_min = checked_scale(input.unit_cost, COST_FLOOR_MARKUP)?
            .max(input.competitor_min_price * COMPETITOR_FLOOR_FACTOR);
        let suggested_max = checked_scale(cost_based_price, COST_CEILING_MARKUP)?
            .min(checked_scale(input.competitor_max_price, COMPETITOR_CEILING_FACTOR)?);

        Ok(PriceQuote {
            cost_based_price,
            market_midpoint,
            recommended_price,
            suggested_min,
            suggested_max,
        })
    }

    #[instrument(
        level = "debug",
        skip(self, input),
        fields(
            unit_cost = %input.unit_cost,
            desired_margin = %input.desired_margin,
            competitor_min = %input.competitor_min_price,
            competitor_max = %input.competitor_max_price,
        )
    )]
    fn evaluate(&self, input: &PricingInput) -> Result<PricingResult> {
        let quote = self.quote(input)?;

        let branch: RiskBranch = classify(
            quote.recommended_price,
            input.competitor_min_price,
            input.competitor_max_price,
            quote.market_midpoint,
        );
        let risk = RiskAssessment::from(branch);

        let profit_scenarios = build_scenarios(
            candidates(
                quote.suggested_min,
                quote.recommended_price,
                quote.market_midpoint,
                quote.suggested_max,
            ),
            input.unit_cost,
        )?;

        debug!(
            recommended = %quote.recommended_price,
            risk = %risk.level,
            branch = ?risk.branch,
            scenarios = profit_scenarios.len(),
            "computed recommendation"
        );

        Ok(PricingResult {
            recommended_price: round_money(quote.recommended_price),
            suggested_range: SuggestedRange {
                min: round_money(quote.suggested_min),
                max: round_money(quote.suggested_max),
            },
            risk_level: risk.level,
            profit_scenarios,
            risk_explanation: risk.explanation,
            risk_factors: risk.factors,
            confidence_note: CONFIDENCE_NOTE.to_string(),
        })
    }
}

fn checked_scale(value: Decimal, factor: Decimal) -> Result<Decimal> {
    value.checked_mul(factor).ok_or(FairPriceError::Overflow)
}
