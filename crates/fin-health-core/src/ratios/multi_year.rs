//! Fiscal-year alignment, the multi-year ratio series, and growth rates.

use std::collections::BTreeMap;
use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::calculator::{calculate_financial_ratios, FinancialRatios};
use crate::config::{GrowthMethod, ScoringConfig};
use crate::statements::{BalanceSheet, CashFlowStatement, IncomeStatement, StatementSet};
use crate::types::*;
use crate::HealthScoreResult;

/// Statements for one fiscal year present in both the balance sheet and
/// income statement sequences.
#[derive(Debug, Clone, Copy)]
pub struct AlignedYear<'a> {
    pub fiscal_year: FiscalYear,
    pub balance_sheet: &'a BalanceSheet,
    pub income_statement: &'a IncomeStatement,
    pub cash_flow: Option<&'a CashFlowStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRatios {
    pub fiscal_year: FiscalYear,
    #[serde(flatten)]
    pub ratios: FinancialRatios,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSeries {
    pub years: Vec<YearRatios>,
    pub growth_rates: Option<GrowthRates>,
}

/// Year-over-year percentage changes between two aligned fiscal years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRates {
    pub from_year: FiscalYear,
    pub to_year: FiscalYear,
    pub revenue_growth: Option<Percent>,
    pub profit_growth: Option<Percent>,
    pub assets_growth: Option<Percent>,
}

/// Align statements by fiscal year, ascending.
///
/// Statements without a fiscal year are skipped. When a sequence holds the
/// same year more than once, the later entry wins. Years missing from either
/// the balance sheets or the income statements are left out.
pub fn align_statements<'a>(
    balance_sheets: &'a [BalanceSheet],
    income_statements: &'a [IncomeStatement],
    cash_flows: &'a [CashFlowStatement],
) -> Vec<AlignedYear<'a>> {
    let balance_by_year = index_by_year(balance_sheets, |s| s.fiscal_year);
    let income_by_year = index_by_year(income_statements, |s| s.fiscal_year);
    let cash_by_year = index_by_year(cash_flows, |s| s.fiscal_year);

    balance_by_year
        .iter()
        .filter_map(|(&year, &balance_sheet)| {
            let income_statement = *income_by_year.get(&year)?;
            Some(AlignedYear {
                fiscal_year: year,
                balance_sheet,
                income_statement,
                cash_flow: cash_by_year.get(&year).copied(),
            })
        })
        .collect()
}

/// Ratios for every aligned fiscal year, ascending by year.
pub fn calculate_multi_year_ratios(
    balance_sheets: &[BalanceSheet],
    income_statements: &[IncomeStatement],
    cash_flows: &[CashFlowStatement],
    config: &ScoringConfig,
) -> Vec<YearRatios> {
    align_statements(balance_sheets, income_statements, cash_flows)
        .iter()
        .map(|year| ratios_for(year, config))
        .collect()
}

pub(crate) fn ratios_for(year: &AlignedYear<'_>, config: &ScoringConfig) -> YearRatios {
    YearRatios {
        fiscal_year: year.fiscal_year,
        ratios: calculate_financial_ratios(
            year.balance_sheet,
            year.income_statement,
            year.cash_flow,
            config,
        ),
    }
}

/// Growth between the two most recent aligned years, or `None` when fewer
/// than two aligned years exist.
pub fn calculate_growth_rates(
    aligned: &[AlignedYear<'_>],
    method: GrowthMethod,
) -> Option<GrowthRates> {
    let [.., prior, latest] = aligned else {
        return None;
    };

    let rates = match method {
        GrowthMethod::Placeholder => GrowthRates {
            from_year: prior.fiscal_year,
            to_year: latest.fiscal_year,
            revenue_growth: Some(Decimal::ZERO),
            profit_growth: Some(Decimal::ZERO),
            assets_growth: Some(Decimal::ZERO),
        },
        GrowthMethod::YearOverYear => GrowthRates {
            from_year: prior.fiscal_year,
            to_year: latest.fiscal_year,
            revenue_growth: pct_change(
                prior.income_statement.net_turnover,
                latest.income_statement.net_turnover,
            ),
            profit_growth: pct_change(
                prior.income_statement.net_income,
                latest.income_statement.net_income,
            ),
            assets_growth: pct_change(
                prior.balance_sheet.total_assets,
                latest.balance_sheet.total_assets,
            ),
        },
    };
    Some(rates)
}

/// Ratio series and growth over the configured year window, wrapped in the
/// standard computation envelope.
pub fn ratio_series(
    statements: &StatementSet,
    config: &ScoringConfig,
) -> HealthScoreResult<ComputationOutput<RatioSeries>> {
    let start = Instant::now();
    config.validate()?;

    let window = statements.most_recent_years(config.max_years);
    let aligned = align_statements(
        &window.balance_sheets,
        &window.income_statements,
        &window.cash_flows,
    );
    let mut warnings = Vec::new();
    if aligned.is_empty() {
        warnings.push("No fiscal year has both a balance sheet and an income statement".into());
    }

    let series = RatioSeries {
        years: aligned.iter().map(|year| ratios_for(year, config)).collect(),
        growth_rates: calculate_growth_rates(&aligned, config.growth_method),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "division_default": config.division_default,
        "growth_method": config.growth_method,
        "max_years": config.max_years,
        "missing_items": "unreported statement items read as zero",
    });

    Ok(with_metadata(
        "Per-year financial ratios over aligned fiscal years",
        &assumptions,
        warnings,
        elapsed,
        series,
    ))
}

/// Percentage change measured against the magnitude of the prior value, so a
/// loss shrinking towards zero reads as positive growth.
pub(crate) fn pct_change(prior: Option<Money>, current: Option<Money>) -> Option<Percent> {
    let (prior, current) = (prior?, current?);
    if prior.is_zero() {
        return None;
    }
    current
        .checked_sub(prior)?
        .checked_div(prior.abs())
        .and_then(|r| r.checked_mul(dec!(100)))
}

fn index_by_year<T>(
    items: &[T],
    year_of: impl Fn(&T) -> Option<FiscalYear>,
) -> BTreeMap<FiscalYear, &T> {
    let mut by_year = BTreeMap::new();
    for item in items {
        if let Some(year) = year_of(item) {
            by_year.insert(year, item);
        }
    }
    by_year
}
