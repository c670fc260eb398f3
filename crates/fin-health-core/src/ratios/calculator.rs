//! Single-year financial ratios.
//!
//! Missing statement items are read as zero before any arithmetic, and a zero
//! denominator yields the configured division default rather than an error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::statements::{BalanceSheet, CashFlowStatement, IncomeStatement};
use crate::types::*;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Ratios derived from one fiscal year's statements. Percent fields are on
/// the 0-100 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    // Liquidity
    pub current_ratio: Option<Multiple>,
    pub quick_ratio: Option<Multiple>,
    pub cash_ratio: Option<Multiple>,
    // Profitability
    pub gross_profit_margin: Option<Percent>,
    pub net_profit_margin: Option<Percent>,
    pub return_on_assets: Option<Percent>,
    pub return_on_equity: Option<Percent>,
    // Solvency
    pub debt_to_equity: Option<Multiple>,
    pub debt_to_assets: Option<Percent>,
    pub equity_ratio: Option<Percent>,
    // Efficiency
    pub asset_turnover: Option<Multiple>,
    pub inventory_turnover: Option<Multiple>,
    pub receivables_turnover: Option<Multiple>,
    // Cash flow; unset when no cash flow statement is supplied
    pub operating_cash_flow_ratio: Option<Multiple>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the ratio set for one year. The statements are assumed to belong
/// to the same fiscal year; that is not checked here.
pub fn calculate_financial_ratios(
    balance_sheet: &BalanceSheet,
    income_statement: &IncomeStatement,
    cash_flow: Option<&CashFlowStatement>,
    config: &ScoringConfig,
) -> FinancialRatios {
    let default = config.division_default;
    let div = |num: Decimal, den: Decimal, ctx: &str| safe_divide(num, den, default, ctx);
    let pct = |num: Decimal, den: Decimal, ctx: &str| {
        safe_divide(num, den, default, ctx).and_then(|r| r.checked_mul(dec!(100)))
    };
    // Numerators built from several items; `None` means the sum overflowed.
    let div_sum = |num: Option<Decimal>, den: Decimal, ctx: &str| match num {
        Some(n) => div(n, den, ctx),
        None => overflow_default(default, ctx),
    };
    let pct_sum = |num: Option<Decimal>, den: Decimal, ctx: &str| match num {
        Some(n) => pct(n, den, ctx),
        None => overflow_default(default, ctx),
    };

    // -- Balance sheet -------------------------------------------------------
    let total_current_assets = value(balance_sheet.total_current_assets);
    let cash = value(balance_sheet.cash);
    let marketable_securities = value(balance_sheet.marketable_securities);
    let accounts_receivable = value(balance_sheet.accounts_receivable);
    let inventories = value(balance_sheet.inventories);
    let total_assets = value(balance_sheet.total_assets);
    let current_liabilities = value(balance_sheet.current_liabilities);
    let total_liabilities = balance_sheet.total_liabilities();
    let equity = value(balance_sheet.equity);

    // -- Income statement ----------------------------------------------------
    let net_turnover = value(income_statement.net_turnover);
    let gross_profit = value(income_statement.by_function_gross_profit);
    let cost_of_goods_sold = value(income_statement.by_function_cost_of_goods_sold);
    let net_income = value(income_statement.net_income);

    let operating_cash_flow_ratio = cash_flow.and_then(|cf| {
        div(
            value(cf.net_operating_cash_flow()),
            current_liabilities,
            "operating cash flow / current liabilities",
        )
    });

    FinancialRatios {
        current_ratio: div(total_current_assets, current_liabilities, "current ratio"),
        quick_ratio: div_sum(
            total_current_assets.checked_sub(inventories),
            current_liabilities,
            "quick ratio",
        ),
        cash_ratio: div_sum(
            cash.checked_add(marketable_securities),
            current_liabilities,
            "cash ratio",
        ),

        gross_profit_margin: pct(gross_profit, net_turnover, "gross profit margin"),
        net_profit_margin: pct(net_income, net_turnover, "net profit margin"),
        return_on_assets: pct(net_income, total_assets, "return on assets"),
        return_on_equity: pct(net_income, equity, "return on equity"),

        debt_to_equity: div_sum(total_liabilities, equity, "debt / equity"),
        debt_to_assets: pct_sum(total_liabilities, total_assets, "debt / assets"),
        equity_ratio: pct(equity, total_assets, "equity ratio"),

        asset_turnover: div(net_turnover, total_assets, "asset turnover"),
        inventory_turnover: div(cost_of_goods_sold, inventories, "inventory turnover"),
        receivables_turnover: div(net_turnover, accounts_receivable, "receivables turnover"),

        operating_cash_flow_ratio,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Coerce a reported amount to a number; unreported reads as zero.
fn value(amount: Option<Money>) -> Decimal {
    amount.unwrap_or(Decimal::ZERO)
}

fn overflow_default(default: Option<Decimal>, context: &str) -> Option<Decimal> {
    tracing::debug!(context, "numerator overflow; using division default");
    default
}

fn safe_divide(
    numerator: Decimal,
    denominator: Decimal,
    default: Option<Decimal>,
    context: &str,
) -> Option<Decimal> {
    if denominator.is_zero() {
        tracing::debug!(context, "zero denominator; using division default");
        return default;
    }
    numerator.checked_div(denominator).or(default)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
