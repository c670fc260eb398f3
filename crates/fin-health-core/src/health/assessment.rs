use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::grading::{determine_trend, grade_for, risk_tier_for, HealthGrade, RiskTier, TrendDirection};
use super::narrative::build_narrative;
use crate::bankruptcy::{altman_z_score, classify_zone, estimate_pd, ZScoreZone};
use crate::config::ScoringConfig;
use crate::ratios::multi_year::ratios_for;
use crate::ratios::{align_statements, calculate_financial_ratios, calculate_growth_rates, AlignedYear, FinancialRatios, GrowthRates};
use crate::scoring::{score_components, ComponentScores};
use crate::statements::{BalanceSheet, CashFlowStatement, IncomeStatement, StatementSet};
use crate::types::*;
use crate::{HealthScoreError, HealthScoreResult};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealthAssessment {
    pub registration_number: String,
    pub health_score: Score,
    pub health_grade: HealthGrade,
    pub liquidity_score: Score,
    pub profitability_score: Score,
    pub solvency_score: Score,
    pub efficiency_score: Score,
    pub growth_score: Score,
    pub risk_level: RiskTier,
    pub altman_z_score: Option<Decimal>,
    pub z_score_zone: Option<ZScoreZone>,
    /// Heuristic probability of default mapped from the Z-score zone.
    pub bankruptcy_risk: Option<Decimal>,
    pub trend_direction: TrendDirection,
    pub growth_rates: Option<GrowthRates>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    /// Number of aligned fiscal years inside the analysis window.
    pub years_analyzed: usize,
    /// The aligned fiscal years themselves, ascending.
    pub analyzed_years: Vec<FiscalYear>,
    pub fiscal_year: Option<FiscalYear>,
    pub currency: Option<String>,
    pub latest_ratios: FinancialRatios,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// The statements a single-year assessment is built from.
struct LatestYear<'a> {
    balance_sheet: &'a BalanceSheet,
    income_statement: &'a IncomeStatement,
    cash_flow: Option<&'a CashFlowStatement>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score a company's financial health from its normalized statements.
///
/// Deterministic: identical inputs yield identical assessments. Fails only
/// on an invalid configuration or when balance sheets or income statements
/// are missing entirely.
pub fn score_health(
    registration_number: &str,
    statements: &StatementSet,
    config: &ScoringConfig,
) -> HealthScoreResult<FinancialHealthAssessment> {
    config.validate()?;

    if statements.balance_sheets.is_empty() {
        return Err(HealthScoreError::InsufficientData(
            "At least one balance sheet is required".into(),
        ));
    }
    if statements.income_statements.is_empty() {
        return Err(HealthScoreError::InsufficientData(
            "At least one income statement is required".into(),
        ));
    }

    let mut warnings: Vec<String> = Vec::new();
    let window = statements.most_recent_years(config.max_years);
    let aligned = align_statements(
        &window.balance_sheets,
        &window.income_statements,
        &window.cash_flows,
    );

    let latest = select_latest(&window, &aligned, &mut warnings)?;
    let ratios = calculate_financial_ratios(
        latest.balance_sheet,
        latest.income_statement,
        latest.cash_flow,
        config,
    );
    let growth = calculate_growth_rates(&aligned, config.growth_method);
    if growth.is_none() {
        warnings.push("Fewer than two aligned fiscal years; growth score is neutral".into());
    }

    let components = score_components(&ratios, growth.as_ref());
    let health_score = weighted_score(&components, config);
    let health_grade = grade_for(health_score, &config.grade_bands);
    let risk_level = risk_tier_for(health_score, &config.risk_bands);
    let trend_direction = trend_for(&aligned, config);
    let narrative = build_narrative(&components, config);

    let altman_z_score = altman_z_score(latest.balance_sheet, latest.income_statement);
    let z_score_zone = altman_z_score.map(classify_zone);
    if altman_z_score.is_none() {
        warnings.push("Altman Z-score unavailable: total assets missing or zero".into());
    }

    let currency = latest
        .balance_sheet
        .currency
        .clone()
        .or_else(|| latest.income_statement.currency.clone());

    debug!(
        registration_number,
        health_score = %health_score,
        grade = %health_grade,
        years = aligned.len(),
        "health assessment complete"
    );

    Ok(FinancialHealthAssessment {
        registration_number: registration_number.to_string(),
        health_score: round_score(health_score),
        health_grade,
        liquidity_score: round_score(components.liquidity),
        profitability_score: round_score(components.profitability),
        solvency_score: round_score(components.solvency),
        efficiency_score: round_score(components.efficiency),
        growth_score: round_score(components.growth),
        risk_level,
        altman_z_score,
        z_score_zone,
        bankruptcy_risk: z_score_zone.map(estimate_pd),
        trend_direction,
        growth_rates: growth,
        strengths: narrative.strengths,
        weaknesses: narrative.weaknesses,
        recommendations: narrative.recommendations,
        years_analyzed: aligned.len(),
        analyzed_years: aligned.iter().map(|y| y.fiscal_year).collect(),
        fiscal_year: latest.balance_sheet.fiscal_year,
        currency,
        latest_ratios: ratios,
        warnings,
    })
}

/// [`score_health`] wrapped in the standard computation envelope.
pub fn assess_financial_health(
    registration_number: &str,
    statements: &StatementSet,
    config: &ScoringConfig,
) -> HealthScoreResult<ComputationOutput<FinancialHealthAssessment>> {
    let start = Instant::now();
    let assessment = score_health(registration_number, statements, config)?;
    let warnings = assessment.warnings.clone();

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "weights": config.weights,
        "growth_method": config.growth_method,
        "division_default": config.division_default,
        "max_years": config.max_years,
        "ratio_scale": "margins, returns and debt-to-assets on the 0-100 scale",
        "z_score": "Z = 1.2*A + 1.4*B + 3.3*C + 0.6*D + 1.0*E (book equity, pre-tax income)",
        "pd_mapping": "rough heuristic, not calibrated"
    });

    Ok(with_metadata(
        "Weighted ratio-ladder financial health score",
        &assumptions,
        warnings,
        elapsed,
        assessment,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Latest aligned year when one exists, otherwise the most recent balance
/// sheet and income statement picked independently.
fn select_latest<'a>(
    window: &'a StatementSet,
    aligned: &[AlignedYear<'a>],
    warnings: &mut Vec<String>,
) -> HealthScoreResult<LatestYear<'a>> {
    if let Some(year) = aligned.last() {
        return Ok(LatestYear {
            balance_sheet: year.balance_sheet,
            income_statement: year.income_statement,
            cash_flow: year.cash_flow,
        });
    }

    // max_by_key keeps the last of equal keys, and None sorts below any year
    let balance_sheet = window
        .balance_sheets
        .iter()
        .max_by_key(|s| s.fiscal_year)
        .ok_or_else(|| HealthScoreError::InsufficientData("No balance sheet in window".into()))?;
    let income_statement = window
        .income_statements
        .iter()
        .max_by_key(|s| s.fiscal_year)
        .ok_or_else(|| {
            HealthScoreError::InsufficientData("No income statement in window".into())
        })?;
    let cash_flow = balance_sheet.fiscal_year.and_then(|year| {
        window
            .cash_flows
            .iter()
            .rev()
            .find(|c| c.fiscal_year == Some(year))
    });

    warnings.push(format!(
        "No fiscal year has both statements; using balance sheet {} and income statement {}",
        year_label(balance_sheet.fiscal_year),
        year_label(income_statement.fiscal_year),
    ));

    Ok(LatestYear {
        balance_sheet,
        income_statement,
        cash_flow,
    })
}

fn year_label(year: Option<FiscalYear>) -> String {
    year.map_or_else(|| "without year".to_string(), |y| y.to_string())
}

fn weighted_score(c: &ComponentScores, config: &ScoringConfig) -> Score {
    let w = &config.weights;
    let total = c.liquidity * w.liquidity
        + c.profitability * w.profitability
        + c.solvency * w.solvency
        + c.efficiency * w.efficiency
        + c.growth * w.growth;
    total.clamp(Decimal::ZERO, dec!(100))
}

/// Compare the mean ratio-driven category score of the two latest aligned
/// years.
fn trend_for(aligned: &[AlignedYear<'_>], config: &ScoringConfig) -> TrendDirection {
    let start = aligned.len().saturating_sub(2);
    let means: Vec<Score> = aligned[start..]
        .iter()
        .map(|year| score_components(&ratios_for(year, config).ratios, None).ratio_mean())
        .collect();
    determine_trend(&means, config.trend_threshold)
}

fn round_score(score: Score) -> Score {
    score.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bs(year: Option<FiscalYear>, total_assets: Money) -> BalanceSheet {
        BalanceSheet {
            fiscal_year: year,
            currency: Some("EUR".into()),
            cash: Some(dec!(100)),
            total_current_assets: Some(dec!(400)),
            current_liabilities: Some(dec!(200)),
            equity: Some(dec!(600)),
            total_assets: Some(total_assets),
            ..Default::default()
        }
    }

    fn is(year: Option<FiscalYear>, turnover: Money, net_income: Money) -> IncomeStatement {
        IncomeStatement {
            fiscal_year: year,
            net_turnover: Some(turnover),
            net_income: Some(net_income),
            ..Default::default()
        }
    }

    #[test]
    fn test_weighted_score_uses_config_weights() {
        let c = ComponentScores {
            liquidity: dec!(100),
            profitability: dec!(0),
            solvency: dec!(0),
            efficiency: dec!(0),
            growth: dec!(0),
        };
        assert_eq!(weighted_score(&c, &ScoringConfig::default()), dec!(25));
    }

    #[test]
    fn test_round_score_midpoint_away_from_zero() {
        assert_eq!(round_score(dec!(72.25)), dec!(72.3));
        assert_eq!(round_score(dec!(72.24)), dec!(72.2));
    }

    #[test]
    fn test_unaligned_years_fall_back_with_warning() {
        let set = StatementSet {
            balance_sheets: vec![bs(Some(2022), dec!(1000)), bs(None, dec!(1))],
            income_statements: vec![is(Some(2021), dec!(800), dec!(80))],
            cash_flows: vec![],
        };
        let a = score_health("123", &set, &ScoringConfig::default()).unwrap();
        assert_eq!(a.fiscal_year, Some(2022));
        assert_eq!(a.years_analyzed, 0);
        assert!(a.analyzed_years.is_empty());
        assert_eq!(a.trend_direction, TrendDirection::Stable);
        assert_eq!(a.growth_score, dec!(50));
        assert!(a.warnings.iter().any(|w| w.contains("balance sheet 2022")));
    }

    #[test]
    fn test_fallback_ties_are_last_wins() {
        let set = StatementSet {
            balance_sheets: vec![bs(Some(2022), dec!(1000)), bs(Some(2022), dec!(2000))],
            income_statements: vec![is(Some(2020), dec!(800), dec!(80))],
            cash_flows: vec![],
        };
        let a = score_health("123", &set, &ScoringConfig::default()).unwrap();
        // asset turnover 800 / 2000
        assert_eq!(a.latest_ratios.asset_turnover, Some(dec!(0.4)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let set = StatementSet {
            balance_sheets: vec![bs(Some(2022), dec!(1000))],
            income_statements: vec![is(Some(2022), dec!(800), dec!(80))],
            cash_flows: vec![],
        };
        let mut cfg = ScoringConfig::default();
        cfg.weights.growth = dec!(0.5);
        assert!(matches!(
            score_health("123", &set, &cfg),
            Err(HealthScoreError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_improving_trend() {
        let weak = BalanceSheet {
            fiscal_year: Some(2021),
            total_current_assets: Some(dec!(100)),
            current_liabilities: Some(dec!(400)),
            equity: Some(dec!(100)),
            total_assets: Some(dec!(1000)),
            ..Default::default()
        };
        let set = StatementSet {
            balance_sheets: vec![weak, bs(Some(2022), dec!(1000))],
            income_statements: vec![
                is(Some(2021), dec!(100), dec!(-10)),
                is(Some(2022), dec!(1500), dec!(200)),
            ],
            cash_flows: vec![],
        };
        let a = score_health("123", &set, &ScoringConfig::default()).unwrap();
        assert_eq!(a.years_analyzed, 2);
        assert_eq!(a.analyzed_years, vec![2021, 2022]);
        assert_eq!(a.trend_direction, TrendDirection::Improving);
        assert!(a.growth_rates.is_some());
    }

    #[test]
    fn test_envelope_carries_warnings() {
        let set = StatementSet {
            balance_sheets: vec![bs(Some(2022), dec!(1000))],
            income_statements: vec![is(Some(2022), dec!(800), dec!(80))],
            cash_flows: vec![],
        };
        let out = assess_financial_health("123", &set, &ScoringConfig::default()).unwrap();
        assert_eq!(out.warnings, out.result.warnings);
        assert!(!out.warnings.is_empty());
        assert_eq!(out.result.currency.as_deref(), Some("EUR"));
    }
}
