//! Immutable scoring configuration.
//!
//! Every assessment takes a `&ScoringConfig`; the `Default` value carries the
//! production weights and bands. Nothing here is process-global.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::health::grading::{HealthGrade, RiskTier};
use crate::types::Score;
use crate::{HealthScoreError, HealthScoreResult};

/// Allowed deviation of the weight sum from exactly one.
const WEIGHT_SUM_TOLERANCE: Decimal = dec!(0.000000001);

/// Category weights for the composite health score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub liquidity: Decimal,
    pub profitability: Decimal,
    pub solvency: Decimal,
    pub efficiency: Decimal,
    pub growth: Decimal,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            liquidity: dec!(0.25),
            profitability: dec!(0.30),
            solvency: dec!(0.20),
            efficiency: dec!(0.15),
            growth: dec!(0.10),
        }
    }
}

impl CategoryWeights {
    pub fn sum(&self) -> Decimal {
        self.liquidity + self.profitability + self.solvency + self.efficiency + self.growth
    }

    fn as_named(&self) -> [(&'static str, Decimal); 5] {
        [
            ("weights.liquidity", self.liquidity),
            ("weights.profitability", self.profitability),
            ("weights.solvency", self.solvency),
            ("weights.efficiency", self.efficiency),
            ("weights.growth", self.growth),
        ]
    }
}

/// How year-over-year growth is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthMethod {
    /// Trailing change between the two most recent aligned years.
    #[default]
    YearOverYear,
    /// Zero for every metric whenever two aligned years exist.
    Placeholder,
}

/// Lower bound of a grade band. Bands are ordered from the highest floor
/// down; a score takes the first band whose floor it reaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub grade: HealthGrade,
    pub min_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBand {
    pub tier: RiskTier,
    pub min_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: CategoryWeights,
    /// Value a ratio takes when its denominator is zero. `None` leaves the
    /// ratio unset instead.
    pub division_default: Option<Decimal>,
    pub growth_method: GrowthMethod,
    /// Number of most recent fiscal years considered.
    pub max_years: usize,
    /// Category scores at or above this add a strength.
    pub strength_threshold: Score,
    /// Category scores at or below this add a weakness and a recommendation.
    pub weakness_threshold: Score,
    /// Minimum change in mean category score that counts as a trend.
    pub trend_threshold: Score,
    pub grade_bands: Vec<GradeBand>,
    pub risk_bands: Vec<RiskBand>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let grade_bands = [
            (HealthGrade::APlus, dec!(90)),
            (HealthGrade::A, dec!(85)),
            (HealthGrade::AMinus, dec!(80)),
            (HealthGrade::BPlus, dec!(75)),
            (HealthGrade::B, dec!(70)),
            (HealthGrade::BMinus, dec!(65)),
            (HealthGrade::CPlus, dec!(60)),
            (HealthGrade::C, dec!(55)),
            (HealthGrade::CMinus, dec!(50)),
            (HealthGrade::DPlus, dec!(45)),
            (HealthGrade::D, dec!(40)),
            (HealthGrade::DMinus, dec!(35)),
            (HealthGrade::F, Decimal::ZERO),
        ]
        .into_iter()
        .map(|(grade, min_score)| GradeBand { grade, min_score })
        .collect();

        let risk_bands = [
            (RiskTier::Low, dec!(75)),
            (RiskTier::Medium, dec!(55)),
            (RiskTier::High, dec!(35)),
            (RiskTier::Critical, Decimal::ZERO),
        ]
        .into_iter()
        .map(|(tier, min_score)| RiskBand { tier, min_score })
        .collect();

        Self {
            weights: CategoryWeights::default(),
            division_default: Some(Decimal::ZERO),
            growth_method: GrowthMethod::YearOverYear,
            max_years: 5,
            strength_threshold: dec!(70),
            weakness_threshold: dec!(40),
            trend_threshold: dec!(5),
            grade_bands,
            risk_bands,
        }
    }
}

impl ScoringConfig {
    /// Check the invariants every assessment relies on.
    pub fn validate(&self) -> HealthScoreResult<()> {
        for (field, w) in self.weights.as_named() {
            if w < Decimal::ZERO {
                return Err(HealthScoreError::InvalidInput {
                    field: field.into(),
                    reason: "Weights must be non-negative".into(),
                });
            }
        }
        if (self.weights.sum() - Decimal::ONE).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(HealthScoreError::InvalidInput {
                field: "weights".into(),
                reason: format!("Weights must sum to 1.0, got {}", self.weights.sum()),
            });
        }
        if self.max_years == 0 {
            return Err(HealthScoreError::InvalidInput {
                field: "max_years".into(),
                reason: "At least one fiscal year must be analysed".into(),
            });
        }
        if self.weakness_threshold >= self.strength_threshold {
            return Err(HealthScoreError::InvalidInput {
                field: "weakness_threshold".into(),
                reason: "Must be below strength_threshold".into(),
            });
        }
        if self.trend_threshold < Decimal::ZERO {
            return Err(HealthScoreError::InvalidInput {
                field: "trend_threshold".into(),
                reason: "Must be non-negative".into(),
            });
        }
        validate_floors(
            "grade_bands",
            self.grade_bands.iter().map(|b| b.min_score),
        )?;
        validate_floors("risk_bands", self.risk_bands.iter().map(|b| b.min_score))?;
        Ok(())
    }
}

/// Band floors must strictly decrease and end at zero so that every score in
/// [0, 100] lands in exactly one band.
fn validate_floors(
    field: &str,
    floors: impl Iterator<Item = Score>,
) -> HealthScoreResult<()> {
    let floors: Vec<Score> = floors.collect();
    if floors.last() != Some(&Decimal::ZERO) {
        return Err(HealthScoreError::InvalidInput {
            field: field.into(),
            reason: "Lowest band must start at 0".into(),
        });
    }
    if floors.windows(2).any(|w| w[0] <= w[1]) {
        return Err(HealthScoreError::InvalidInput {
            field: field.into(),
            reason: "Band floors must be strictly decreasing".into(),
        });
    }
    if floors[0] > dec!(100) {
        return Err(HealthScoreError::InvalidInput {
            field: field.into(),
            reason: "Band floors must not exceed 100".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = CategoryWeights::default();
        assert!((w.sum() - Decimal::ONE).abs() <= WEIGHT_SUM_TOLERANCE);
        assert_eq!(w.sum(), Decimal::ONE);
    }

    #[test]
    fn test_default_config_is_valid() {
        ScoringConfig::default().validate().unwrap();
    }

    #[test]
    fn test_weights_not_summing_to_one_rejected() {
        let mut cfg = ScoringConfig::default();
        cfg.weights.growth = dec!(0.2);
        match cfg.validate().unwrap_err() {
            HealthScoreError::InvalidInput { field, .. } => assert_eq!(field, "weights"),
            other => panic!("Expected InvalidInput for weights, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut cfg = ScoringConfig::default();
        cfg.weights.liquidity = dec!(-0.05);
        cfg.weights.profitability = dec!(0.60);
        match cfg.validate().unwrap_err() {
            HealthScoreError::InvalidInput { field, .. } => {
                assert_eq!(field, "weights.liquidity")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_max_years_rejected() {
        let cfg = ScoringConfig {
            max_years: 0,
            ..ScoringConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_band_floors_must_reach_zero() {
        let mut cfg = ScoringConfig::default();
        cfg.grade_bands.pop();
        assert!(cfg.validate().is_err());

        let mut cfg = ScoringConfig::default();
        cfg.risk_bands.swap(0, 1);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let cfg: ScoringConfig =
            serde_json::from_str(r#"{"max_years": 3, "growth_method": "placeholder"}"#).unwrap();
        assert_eq!(cfg.max_years, 3);
        assert_eq!(cfg.growth_method, GrowthMethod::Placeholder);
        assert_eq!(cfg.weights, CategoryWeights::default());
        assert_eq!(cfg.grade_bands.len(), 13);
    }
}
