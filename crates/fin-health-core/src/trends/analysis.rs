use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::ScoringConfig;
use crate::ratios::multi_year::{pct_change, ratios_for};
use crate::ratios::{align_statements, calculate_growth_rates, FinancialRatios, GrowthRates};
use crate::statements::StatementSet;
use crate::types::*;
use crate::{HealthScoreError, HealthScoreResult};

/// Changes within this band, in percent, count as flat.
const FLAT_BAND: Percent = dec!(1);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub fiscal_year: FiscalYear,
    pub revenue: Option<Money>,
    pub net_income: Option<Money>,
    pub total_assets: Option<Money>,
    pub ratios: FinancialRatios,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricDirection {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTrend {
    pub metric: String,
    /// Change between the two most recent aligned years.
    pub direction: Option<MetricDirection>,
    pub change_pct: Option<Percent>,
    /// Coefficient of variation across all aligned years, in percent.
    pub volatility: Option<Percent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub years: Vec<FiscalYear>,
    pub points: Vec<TrendPoint>,
    pub growth_rates: Option<GrowthRates>,
    pub metrics: Vec<MetricTrend>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Trend analysis over the aligned fiscal years inside the configured window.
pub fn analyze_trends(
    statements: &StatementSet,
    config: &ScoringConfig,
) -> HealthScoreResult<TrendAnalysis> {
    config.validate()?;

    let window = statements.most_recent_years(config.max_years);
    let aligned = align_statements(
        &window.balance_sheets,
        &window.income_statements,
        &window.cash_flows,
    );
    if aligned.is_empty() {
        return Err(HealthScoreError::InsufficientData(
            "No fiscal year has both a balance sheet and an income statement".into(),
        ));
    }

    let points: Vec<TrendPoint> = aligned
        .iter()
        .map(|year| TrendPoint {
            fiscal_year: year.fiscal_year,
            revenue: year.income_statement.net_turnover,
            net_income: year.income_statement.net_income,
            total_assets: year.balance_sheet.total_assets,
            ratios: ratios_for(year, config).ratios,
        })
        .collect();

    let metrics = vec![
        metric_trend("revenue", points.iter().map(|p| p.revenue).collect()),
        metric_trend("net_income", points.iter().map(|p| p.net_income).collect()),
        metric_trend("total_assets", points.iter().map(|p| p.total_assets).collect()),
    ];

    Ok(TrendAnalysis {
        years: aligned.iter().map(|y| y.fiscal_year).collect(),
        growth_rates: calculate_growth_rates(&aligned, config.growth_method),
        points,
        metrics,
    })
}

/// [`analyze_trends`] wrapped in the standard computation envelope.
pub fn trend_report(
    statements: &StatementSet,
    config: &ScoringConfig,
) -> HealthScoreResult<ComputationOutput<TrendAnalysis>> {
    let start = Instant::now();
    let analysis = analyze_trends(statements, config)?;

    let mut warnings = Vec::new();
    if analysis.years.len() < 2 {
        warnings.push("Single aligned fiscal year; directions and volatility unavailable".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "flat_band_pct": FLAT_BAND,
        "volatility": "population standard deviation / |mean| * 100",
        "max_years": config.max_years,
    });

    Ok(with_metadata(
        "Multi-year trend analysis",
        &assumptions,
        warnings,
        elapsed,
        analysis,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn metric_trend(metric: &str, series: Vec<Option<Money>>) -> MetricTrend {
    let change_pct = match series.as_slice() {
        [.., previous, latest] => pct_change(*previous, *latest),
        _ => None,
    };
    let direction = change_pct.map(|c| {
        if c > FLAT_BAND {
            MetricDirection::Up
        } else if c < -FLAT_BAND {
            MetricDirection::Down
        } else {
            MetricDirection::Flat
        }
    });
    let values: Vec<Money> = series.into_iter().flatten().collect();

    MetricTrend {
        metric: metric.to_string(),
        direction,
        change_pct: change_pct.map(|c| c.round_dp(2)),
        volatility: coefficient_of_variation(&values),
    }
}

/// Population standard deviation over |mean|, in percent. `None` for fewer
/// than two values or a zero mean.
fn coefficient_of_variation(values: &[Decimal]) -> Option<Percent> {
    if values.len() < 2 {
        return None;
    }
    let n = Decimal::from(values.len());
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    let mean = sum.checked_div(n)?;
    if mean.is_zero() {
        return None;
    }
    let squared = values.iter().try_fold(Decimal::ZERO, |acc, v| {
        let d = v.checked_sub(mean)?;
        acc.checked_add(d.checked_mul(d)?)
    })?;
    let std_dev = squared.checked_div(n)?.sqrt()?;
    std_dev
        .checked_div(mean.abs())?
        .checked_mul(dec!(100))
        .map(|cv| cv.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
