//! Pricing Types - recommendation input and result records
//!
//! A recommendation blends two views of the right price:
//! - Cost: the price at which the desired margin is earned
//! - Market: the midpoint of the observed competitor range
//!
//! The result carries the blended price, a suggested range, a risk level
//! with its rationale, and a table of profit scenarios.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FieldError, ValidationError};

/// Market risk of a recommended price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Within the competitive range with a healthy margin
    Low,
    /// Upper half of the market, needs differentiation
    Medium,
    /// Far outside the competitor range in either direction
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a scenario's price sits relative to cost and competition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketPosition {
    Competitive,
    Average,
    Premium,
    /// Styled by the display layer, never emitted by the engine
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl MarketPosition {
    pub fn label(&self) -> &'static str {
        match self {
            MarketPosition::Competitive => "Competitive",
            MarketPosition::Average => "Average",
            MarketPosition::Premium => "Premium",
            MarketPosition::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for MarketPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Request for a price recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    /// Cost to produce one unit
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_cost: Decimal,

    /// Target margin as a percentage of the sale price, in (0, 100)
    #[serde(with = "rust_decimal::serde::float")]
    pub desired_margin: Decimal,

    /// Lowest observed competitor price
    #[serde(with = "rust_decimal::serde::float")]
    pub competitor_min_price: Decimal,

    /// Highest observed competitor price
    #[serde(with = "rust_decimal::serde::float")]
    pub competitor_max_price: Decimal,
}

impl PricingInput {
    pub const MIN_MARGIN: Decimal = Decimal::ZERO;
    pub const MAX_MARGIN: Decimal = Decimal::ONE_HUNDRED;

    pub fn new(
        unit_cost: Decimal,
        desired_margin: Decimal,
        competitor_min_price: Decimal,
        competitor_max_price: Decimal,
    ) -> Self {
        Self {
            unit_cost,
            desired_margin,
            competitor_min_price,
            competitor_max_price,
        }
    }

    /// Check every field and report all violations at once, in field order.
    ///
    /// The min/max ordering rule only fires when both competitor prices are
    /// themselves valid, so a single bad value never produces two messages.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();

        if self.unit_cost <= Decimal::ZERO {
            fields.push(FieldError::new("unitCost", "Please enter a valid unit cost"));
        }
        if self.desired_margin <= Self::MIN_MARGIN || self.desired_margin >= Self::MAX_MARGIN {
            fields.push(FieldError::new(
                "desiredMargin",
                "Desired margin must be between 0 and 100",
            ));
        }

        let min_ok = self.competitor_min_price > Decimal::ZERO;
        let max_ok = self.competitor_max_price > Decimal::ZERO;
        if !min_ok {
            fields.push(FieldError::new(
                "competitorMinPrice",
                "Please enter a valid minimum price",
            ));
        }
        if !max_ok {
            fields.push(FieldError::new(
                "competitorMaxPrice",
                "Please enter a valid maximum price",
            ));
        }
        if min_ok && max_ok && self.competitor_min_price > self.competitor_max_price {
            fields.push(FieldError::new(
                "competitorMaxPrice",
                "Max price must be greater than min price",
            ));
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::InvalidInput { fields })
        }
    }
}

/// Suggested price band, bounds rounded to cents.
///
/// `min <= max` is not guaranteed: a unit cost that is high relative to the
/// competitor range pushes `min` above `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedRange {
    #[serde(with = "rust_decimal::serde::float")]
    pub min: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max: Decimal,
}

impl SuggestedRange {
    /// True when the band collapsed (`min > max`)
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// One row of the profit comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitScenario {
    /// Sale price, rounded to cents
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// `price - unit_cost`, rounded to cents
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_per_unit: Decimal,

    /// `(price - unit_cost) / price * 100`, unrounded
    #[serde(with = "rust_decimal::serde::float")]
    pub margin_percent: Decimal,

    pub market_position: MarketPosition,
}

/// Recommendation returned for one [`PricingInput`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub recommended_price: Decimal,

    pub suggested_range: SuggestedRange,

    pub risk_level: RiskLevel,

    /// Ascending by price, no two within one cent
    pub profit_scenarios: Vec<ProfitScenario>,

    pub risk_explanation: String,

    pub risk_factors: Vec<String>,

    pub confidence_note: String,
}

impl PricingResult {
    /// Row built from the recommended price.
    ///
    /// `None` when deduplication dropped that row because an earlier-listed
    /// candidate (the suggested minimum) sat within one cent of it. A
    /// Competitive row with the same rounded price is not the recommended row.
    /// Kept rows are at least one cent apart, so at most one `Average` row
    /// carries the recommended price.
    pub fn recommended_scenario(&self) -> Option<&ProfitScenario> {
        self.profit_scenarios.iter().find(|s| {
            s.market_position == MarketPosition::Average && s.price == self.recommended_price
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input() -> PricingInput {
        PricingInput::new(dec!(8.50), dec!(20), dec!(10.00), dec!(15.00))
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_equal_competitor_prices_are_valid() {
        let input = PricingInput::new(dec!(5), dec!(30), dec!(12), dec!(12));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_margin_bounds_are_exclusive() {
        for margin in [dec!(0), dec!(100), dec!(120), dec!(-5)] {
            let mut input = input();
            input.desired_margin = margin;
            let err = input.validate().unwrap_err();
            assert_eq!(err.fields()[0].field, "desiredMargin");
        }
    }

    #[test]
    fn test_reports_every_bad_field_in_order() {
        let input = PricingInput::new(dec!(0), dec!(100), dec!(-1), dec!(0));
        let err = input.validate().unwrap_err();
        let fields: Vec<_> = err.fields().iter().map(|f| f.field).collect();
        assert_eq!(
            fields,
            vec![
                "unitCost",
                "desiredMargin",
                "competitorMinPrice",
                "competitorMaxPrice"
            ]
        );
    }

    #[test]
    fn test_min_above_max_flags_max_field() {
        let input = PricingInput::new(dec!(5), dec!(30), dec!(20), dec!(10));
        let err = input.validate().unwrap_err();
        assert_eq!(
            err.fields(),
            &[FieldError::new(
                "competitorMaxPrice",
                "Max price must be greater than min price"
            )]
        );
    }

    #[test]
    fn test_input_wire_format() {
        let json = r#"{"unitCost":8.5,"desiredMargin":20,"competitorMinPrice":10,"competitorMaxPrice":15}"#;
        let parsed: PricingInput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, input());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"medium\"");
        assert_eq!(
            serde_json::to_string(&MarketPosition::HighRisk).unwrap(),
            "\"High Risk\""
        );
        assert_eq!(
            serde_json::to_string(&MarketPosition::Competitive).unwrap(),
            "\"Competitive\""
        );
    }

    #[test]
    fn test_recommended_scenario_ignores_competitive_row_at_same_price() {
        let row = |price: Decimal, market_position: MarketPosition| ProfitScenario {
            price,
            profit_per_unit: price - dec!(10),
            margin_percent: dec!(0),
            market_position,
        };
        let mut result = PricingResult {
            recommended_price: dec!(11.00),
            suggested_range: SuggestedRange {
                min: dec!(11.00),
                max: dec!(11.55),
            },
            risk_level: RiskLevel::Medium,
            profit_scenarios: vec![
                row(dec!(11.00), MarketPosition::Competitive),
                row(dec!(11.55), MarketPosition::Premium),
            ],
            risk_explanation: String::new(),
            risk_factors: Vec::new(),
            confidence_note: String::new(),
        };
        assert!(result.recommended_scenario().is_none());

        result
            .profit_scenarios
            .insert(1, row(dec!(11.00), MarketPosition::Average));
        let found = result.recommended_scenario().unwrap();
        assert_eq!(found.market_position, MarketPosition::Average);
    }

    #[test]
    fn test_result_serializes_numbers_in_camel_case() {
        let result = PricingResult {
            recommended_price: dec!(11.38),
            suggested_range: SuggestedRange {
                min: dec!(9.50),
                max: dec!(12.75),
            },
            risk_level: RiskLevel::Low,
            profit_scenarios: vec![ProfitScenario {
                price: dec!(11.38),
                profit_per_unit: dec!(2.88),
                margin_percent: dec!(25),
                market_position: MarketPosition::Average,
            }],
            risk_explanation: "ok".to_string(),
            risk_factors: vec!["a".to_string()],
            confidence_note: "note".to_string(),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["recommendedPrice"], serde_json::json!(11.38));
        assert_eq!(value["suggestedRange"]["max"], serde_json::json!(12.75));
        assert_eq!(value["riskLevel"], "low");
        assert_eq!(value["profitScenarios"][0]["profitPerUnit"], serde_json::json!(2.88));
        assert_eq!(value["profitScenarios"][0]["marketPosition"], "Average");
        assert!(result.recommended_scenario().is_some());
    }
}
