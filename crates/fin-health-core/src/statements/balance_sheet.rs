use serde::{Deserialize, Serialize};

use super::normalize::{currency_field, fiscal_year_field, log_unknown_keys, numeric_field, RawRecord};
use crate::types::{FiscalYear, Money};

/// One fiscal year's balance sheet. Every amount is optional: `None` means
/// the item was not reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSheet {
    pub fiscal_year: Option<FiscalYear>,
    pub currency: Option<String>,

    // Current assets
    pub cash: Option<Money>,
    pub marketable_securities: Option<Money>,
    pub accounts_receivable: Option<Money>,
    pub inventories: Option<Money>,
    pub total_current_assets: Option<Money>,

    // Non-current assets
    pub investments: Option<Money>,
    pub fixed_assets: Option<Money>,
    pub intangible_assets: Option<Money>,
    pub total_non_current_assets: Option<Money>,
    pub total_assets: Option<Money>,

    // Liabilities and equity
    pub current_liabilities: Option<Money>,
    pub non_current_liabilities: Option<Money>,
    pub provisions: Option<Money>,
    pub equity: Option<Money>,
    pub total_equities: Option<Money>,
    pub future_housing_repairs_payments: Option<Money>,
}

impl BalanceSheet {
    /// Numeric fields understood by [`BalanceSheet::from_raw`].
    pub const FIELDS: &'static [&'static str] = &[
        "cash",
        "marketable_securities",
        "accounts_receivable",
        "inventories",
        "total_current_assets",
        "investments",
        "fixed_assets",
        "intangible_assets",
        "total_non_current_assets",
        "total_assets",
        "current_liabilities",
        "non_current_liabilities",
        "provisions",
        "equity",
        "total_equities",
        "future_housing_repairs_payments",
    ];

    /// Build a balance sheet from a raw record, dropping unknown keys and
    /// degrading unparseable values to `None`.
    pub fn from_raw(raw: &RawRecord) -> Self {
        log_unknown_keys(raw, Self::FIELDS, "balance_sheet");
        let num = |key: &str| numeric_field(raw, key);
        Self {
            fiscal_year: fiscal_year_field(raw),
            currency: currency_field(raw),
            cash: num("cash"),
            marketable_securities: num("marketable_securities"),
            accounts_receivable: num("accounts_receivable"),
            inventories: num("inventories"),
            total_current_assets: num("total_current_assets"),
            investments: num("investments"),
            fixed_assets: num("fixed_assets"),
            intangible_assets: num("intangible_assets"),
            total_non_current_assets: num("total_non_current_assets"),
            total_assets: num("total_assets"),
            current_liabilities: num("current_liabilities"),
            non_current_liabilities: num("non_current_liabilities"),
            provisions: num("provisions"),
            equity: num("equity"),
            total_equities: num("total_equities"),
            future_housing_repairs_payments: num("future_housing_repairs_payments"),
        }
    }

    /// Current plus non-current liabilities, missing items read as zero.
    /// `None` when the sum overflows.
    pub fn total_liabilities(&self) -> Option<Money> {
        self.current_liabilities
            .unwrap_or_default()
            .checked_add(self.non_current_liabilities.unwrap_or_default())
    }
}
