use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::ScoringConfig;
use crate::ratios::align_statements;
use crate::statements::{BalanceSheet, IncomeStatement, StatementSet};
use crate::types::*;
use crate::{HealthScoreError, HealthScoreResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZScoreZone {
    Safe,
    Grey,
    Distress,
}

impl std::fmt::Display for ZScoreZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Grey => write!(f, "Grey Zone"),
            Self::Distress => write!(f, "Distress"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreComponent {
    pub name: String,
    pub ratio: Decimal,
    pub coefficient: Decimal,
    pub weighted_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltmanDetail {
    pub fiscal_year: Option<FiscalYear>,
    /// Rounded to two decimals.
    pub z_score: Decimal,
    pub zone: ZScoreZone,
    /// Rough probability-of-default estimate mapped from the zone.
    pub probability_of_default_estimate: Decimal,
    pub components: Vec<ZScoreComponent>,
    /// (distress_upper_bound, safe_lower_bound)
    pub zone_thresholds: (Decimal, Decimal),
}

// ---------------------------------------------------------------------------
// Coefficients
// ---------------------------------------------------------------------------

const Z_COEFF_A: Decimal = dec!(1.2);
const Z_COEFF_B: Decimal = dec!(1.4);
const Z_COEFF_C: Decimal = dec!(3.3);
const Z_COEFF_D: Decimal = dec!(0.6);
const Z_COEFF_E: Decimal = dec!(1.0);

const Z_SAFE: Decimal = dec!(2.99);
const Z_DISTRESS: Decimal = dec!(1.81);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Altman Z-score from one year's balance sheet and income statement,
/// rounded to two decimals.
///
/// Book equity stands in for market value in the D term, and pre-tax income
/// for EBIT in the C term. Returns `None` when total assets are zero or
/// missing, or when the arithmetic overflows.
pub fn altman_z_score(balance_sheet: &BalanceSheet, income_statement: &IncomeStatement) -> Option<Decimal> {
    let components = z_components(balance_sheet, income_statement)?;
    weighted_sum(&components).map(round_z)
}

/// Z-score with its five weighted components, zone and default estimate.
pub fn calculate_altman_detail(
    balance_sheet: &BalanceSheet,
    income_statement: &IncomeStatement,
) -> Option<AltmanDetail> {
    let components = z_components(balance_sheet, income_statement)?;
    let z_score = round_z(weighted_sum(&components)?);
    let zone = classify_zone(z_score);

    Some(AltmanDetail {
        fiscal_year: balance_sheet.fiscal_year,
        z_score,
        zone,
        probability_of_default_estimate: estimate_pd(zone),
        components,
        zone_thresholds: (Z_DISTRESS, Z_SAFE),
    })
}

/// Z-score detail for one aligned fiscal year (the latest when `year` is
/// `None`), wrapped in the standard computation envelope.
pub fn bankruptcy_risk(
    statements: &StatementSet,
    config: &ScoringConfig,
    year: Option<FiscalYear>,
) -> HealthScoreResult<ComputationOutput<AltmanDetail>> {
    let start = Instant::now();
    config.validate()?;

    let window = statements.most_recent_years(config.max_years);
    let aligned = align_statements(
        &window.balance_sheets,
        &window.income_statements,
        &window.cash_flows,
    );
    let selected = match year {
        Some(y) => aligned.iter().find(|a| a.fiscal_year == y).ok_or_else(|| {
            HealthScoreError::InvalidInput {
                field: "year".into(),
                reason: format!("{y} has no balance sheet and income statement in the window"),
            }
        })?,
        None => aligned.last().ok_or_else(|| {
            HealthScoreError::InsufficientData(
                "No fiscal year has both a balance sheet and an income statement".into(),
            )
        })?,
    };

    let detail = calculate_altman_detail(selected.balance_sheet, selected.income_statement)
        .ok_or_else(|| {
            HealthScoreError::InsufficientData(format!(
                "Total assets missing or zero for {}",
                selected.fiscal_year
            ))
        })?;

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "z_score": "Z = 1.2*A + 1.4*B + 3.3*C + 0.6*D + 1.0*E",
        "market_value_proxy": "book equity",
        "ebit_proxy": "income before income taxes",
        "pd_mapping": "rough heuristic, not calibrated"
    });

    Ok(with_metadata(
        "Altman Z-Score from book values",
        &assumptions,
        Vec::new(),
        elapsed,
        detail,
    ))
}

pub fn classify_zone(score: Decimal) -> ZScoreZone {
    if score > Z_SAFE {
        ZScoreZone::Safe
    } else if score < Z_DISTRESS {
        ZScoreZone::Distress
    } else {
        ZScoreZone::Grey
    }
}

/// Map Z-Score zone to a rough probability of default estimate.
///
/// These are heuristic midpoints, not calibrated default probabilities.
pub fn estimate_pd(zone: ZScoreZone) -> Decimal {
    match zone {
        ZScoreZone::Safe => dec!(0.03),
        ZScoreZone::Grey => dec!(0.22),
        ZScoreZone::Distress => dec!(0.65),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn z_components(bs: &BalanceSheet, is: &IncomeStatement) -> Option<Vec<ZScoreComponent>> {
    let total_assets = bs.total_assets.filter(|ta| !ta.is_zero())?;
    let v = |x: Option<Money>| x.unwrap_or(Decimal::ZERO);

    let equity = v(bs.equity);
    let working_capital = v(bs.total_current_assets).checked_sub(v(bs.current_liabilities))?;
    let total_debt = v(bs.current_liabilities).checked_add(v(bs.non_current_liabilities))?;

    let a = working_capital.checked_div(total_assets)?;
    let b = equity.checked_div(total_assets)?;
    let c = v(is.income_before_income_taxes).checked_div(total_assets)?;
    let d = if total_debt > Decimal::ZERO {
        equity.checked_div(total_debt)?
    } else {
        Decimal::ONE
    };
    let e = v(is.net_turnover).checked_div(total_assets)?;

    Some(vec![
        build_component("A: Working Capital / Total Assets", a, Z_COEFF_A)?,
        build_component("B: Equity / Total Assets", b, Z_COEFF_B)?,
        build_component("C: Pre-tax Income / Total Assets", c, Z_COEFF_C)?,
        build_component("D: Equity / Total Debt", d, Z_COEFF_D)?,
        build_component("E: Net Turnover / Total Assets", e, Z_COEFF_E)?,
    ])
}

fn build_component(name: &str, ratio: Decimal, coefficient: Decimal) -> Option<ZScoreComponent> {
    Some(ZScoreComponent {
        name: name.to_string(),
        ratio,
        coefficient,
        weighted_value: coefficient.checked_mul(ratio)?,
    })
}

fn weighted_sum(components: &[ZScoreComponent]) -> Option<Decimal> {
    components
        .iter()
        .try_fold(Decimal::ZERO, |acc, c| acc.checked_add(c.weighted_value))
}

fn round_z(z: Decimal) -> Decimal {
    z.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
