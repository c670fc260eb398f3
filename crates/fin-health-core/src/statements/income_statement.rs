use serde::{Deserialize, Serialize};

use super::normalize::{currency_field, fiscal_year_field, log_unknown_keys, numeric_field, RawRecord};
use crate::types::{FiscalYear, Money};

/// One fiscal year's income statement, covering both the by-nature and the
/// by-function cost classifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeStatement {
    pub fiscal_year: Option<FiscalYear>,
    pub currency: Option<String>,

    pub net_turnover: Option<Money>,

    // By nature
    pub by_nature_inventory_change: Option<Money>,
    pub by_nature_long_term_investment_expenses: Option<Money>,
    pub by_nature_other_operating_revenues: Option<Money>,
    pub by_nature_material_expenses: Option<Money>,
    pub by_nature_labour_expenses: Option<Money>,
    pub by_nature_depreciation_expenses: Option<Money>,

    // By function
    pub by_function_cost_of_goods_sold: Option<Money>,
    pub by_function_gross_profit: Option<Money>,
    pub by_function_selling_expenses: Option<Money>,
    pub by_function_administrative_expenses: Option<Money>,
    pub by_function_other_operating_revenues: Option<Money>,

    // Other operating and financial items
    pub other_operating_expenses: Option<Money>,
    pub equity_investment_earnings: Option<Money>,
    pub other_long_term_investment_earnings: Option<Money>,
    pub other_interest_revenues: Option<Money>,
    pub investment_fair_value_adjustments: Option<Money>,
    pub interest_expenses: Option<Money>,

    // Extraordinary items
    pub extra_revenues: Option<Money>,
    pub extra_expenses: Option<Money>,

    // Taxes and profit
    pub income_before_income_taxes: Option<Money>,
    pub provision_for_income_taxes: Option<Money>,
    pub income_after_income_taxes: Option<Money>,
    pub other_taxes: Option<Money>,
    pub extra_dividends: Option<Money>,
    pub net_income: Option<Money>,
}

impl IncomeStatement {
    /// Numeric fields understood by [`IncomeStatement::from_raw`].
    pub const FIELDS: &'static [&'static str] = &[
        "net_turnover",
        "by_nature_inventory_change",
        "by_nature_long_term_investment_expenses",
        "by_nature_other_operating_revenues",
        "by_nature_material_expenses",
        "by_nature_labour_expenses",
        "by_nature_depreciation_expenses",
        "by_function_cost_of_goods_sold",
        "by_function_gross_profit",
        "by_function_selling_expenses",
        "by_function_administrative_expenses",
        "by_function_other_operating_revenues",
        "other_operating_expenses",
        "equity_investment_earnings",
        "other_long_term_investment_earnings",
        "other_interest_revenues",
        "investment_fair_value_adjustments",
        "interest_expenses",
        "extra_revenues",
        "extra_expenses",
        "income_before_income_taxes",
        "provision_for_income_taxes",
        "income_after_income_taxes",
        "other_taxes",
        "extra_dividends",
        "net_income",
    ];

    pub fn from_raw(raw: &RawRecord) -> Self {
        log_unknown_keys(raw, Self::FIELDS, "income_statement");
        let num = |key: &str| numeric_field(raw, key);
        Self {
            fiscal_year: fiscal_year_field(raw),
            currency: currency_field(raw),
            net_turnover: num("net_turnover"),
            by_nature_inventory_change: num("by_nature_inventory_change"),
            by_nature_long_term_investment_expenses: num("by_nature_long_term_investment_expenses"),
            by_nature_other_operating_revenues: num("by_nature_other_operating_revenues"),
            by_nature_material_expenses: num("by_nature_material_expenses"),
            by_nature_labour_expenses: num("by_nature_labour_expenses"),
            by_nature_depreciation_expenses: num("by_nature_depreciation_expenses"),
            by_function_cost_of_goods_sold: num("by_function_cost_of_goods_sold"),
            by_function_gross_profit: num("by_function_gross_profit"),
            by_function_selling_expenses: num("by_function_selling_expenses"),
            by_function_administrative_expenses: num("by_function_administrative_expenses"),
            by_function_other_operating_revenues: num("by_function_other_operating_revenues"),
            other_operating_expenses: num("other_operating_expenses"),
            equity_investment_earnings: num("equity_investment_earnings"),
            other_long_term_investment_earnings: num("other_long_term_investment_earnings"),
            other_interest_revenues: num("other_interest_revenues"),
            investment_fair_value_adjustments: num("investment_fair_value_adjustments"),
            interest_expenses: num("interest_expenses"),
            extra_revenues: num("extra_revenues"),
            extra_expenses: num("extra_expenses"),
            income_before_income_taxes: num("income_before_income_taxes"),
            provision_for_income_taxes: num("provision_for_income_taxes"),
            income_after_income_taxes: num("income_after_income_taxes"),
            other_taxes: num("other_taxes"),
            extra_dividends: num("extra_dividends"),
            net_income: num("net_income"),
        }
    }
}
