//! Profit scenario table
//!
//! Four candidate prices are built in a fixed order, deduplicated on their
//! unrounded prices (first occurrence wins), sorted ascending, and only then
//! rounded to cents.

use fairprice_common::{
    round_money, same_price, FairPriceError, MarketPosition, ProfitScenario, Result,
};
use rust_decimal::Decimal;

/// Unrounded scenario before deduplication
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub price: Decimal,
    pub position: MarketPosition,
}

impl Candidate {
    pub fn new(price: Decimal, position: MarketPosition) -> Self {
        Self { price, position }
    }
}

/// Candidates in construction order.
///
/// Labels are positional and do not follow the computed risk level.
pub fn candidates(
    suggested_min: Decimal,
    recommended: Decimal,
    midpoint: Decimal,
    suggested_max: Decimal,
) -> [Candidate; 4] {
    [
        Candidate::new(suggested_min, MarketPosition::Competitive),
        Candidate::new(recommended, MarketPosition::Average),
        Candidate::new(midpoint, MarketPosition::Average),
        Candidate::new(suggested_max, MarketPosition::Premium),
    ]
}

/// Drop candidates within one cent of any earlier-listed one, then sort ascending.
///
/// A candidate is compared against every candidate listed before it, whether
/// or not that one was itself dropped.
pub fn dedup_and_sort(candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
    let listed: Vec<Candidate> = candidates.into_iter().collect();
    let mut kept: Vec<Candidate> = listed
        .iter()
        .enumerate()
        .filter(|(i, candidate)| {
            !listed[..*i]
                .iter()
                .any(|earlier| same_price(earlier.price, candidate.price))
        })
        .map(|(_, candidate)| *candidate)
        .collect();
    kept.sort_by(|a, b| a.price.cmp(&b.price));
    kept
}

/// Price one candidate against the unit cost
pub fn to_scenario(candidate: &Candidate, unit_cost: Decimal) -> Result<ProfitScenario> {
    let profit = candidate
        .price
        .checked_sub(unit_cost)
        .ok_or(FairPriceError::Overflow)?;
    let margin_percent = profit
        .checked_div(candidate.price)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(FairPriceError::Overflow)?;

    Ok(ProfitScenario {
        price: round_money(candidate.price),
        profit_per_unit: round_money(profit),
        margin_percent,
        market_position: candidate.position,
    })
}

/// Full pipeline: dedup, sort, price, round
pub fn build_scenarios(
    candidates: impl IntoIterator<Item = Candidate>,
    unit_cost: Decimal,
) -> Result<Vec<ProfitScenario>> {
    dedup_and_sort(candidates)
        .iter()
        .map(|c| to_scenario(c, unit_cost))
        .collect()
}
