use serde::{Deserialize, Serialize};

use super::normalize::{currency_field, fiscal_year_field, log_unknown_keys, numeric_field, RawRecord};
use crate::types::{FiscalYear, Money};

/// One fiscal year's cash flow statement. Prefixes follow the registry's
/// layout: `cfo_dm_` direct method, `cfo_im_` indirect method, `cfi_`
/// investing, `cff_` financing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowStatement {
    pub fiscal_year: Option<FiscalYear>,
    pub currency: Option<String>,

    // Operating, direct method
    pub cfo_dm_cash_received_from_customers: Option<Money>,
    pub cfo_dm_cash_paid_to_suppliers_employees: Option<Money>,
    pub cfo_dm_other_cash_received_paid: Option<Money>,
    pub cfo_dm_operating_cash_flow: Option<Money>,
    pub cfo_dm_interest_paid: Option<Money>,
    pub cfo_dm_income_taxes_paid: Option<Money>,
    pub cfo_dm_extra_items_cash_flow: Option<Money>,
    pub cfo_dm_net_operating_cash_flow: Option<Money>,

    // Operating, indirect method
    pub cfo_im_income_before_income_taxes: Option<Money>,
    pub cfo_im_income_before_changes_in_working_capital: Option<Money>,
    pub cfo_im_operating_cash_flow: Option<Money>,
    pub cfo_im_interest_paid: Option<Money>,
    pub cfo_im_income_taxes_paid: Option<Money>,
    pub cfo_im_extra_items_cash_flow: Option<Money>,
    pub cfo_im_net_operating_cash_flow: Option<Money>,

    // Investing
    pub cfi_acquisition_of_stocks_shares: Option<Money>,
    pub cfi_sale_proceeds_from_stocks_shares: Option<Money>,
    pub cfi_acquisition_of_fixed_assets_intangible_assets: Option<Money>,
    pub cfi_sale_proceeds_from_fixed_assets_intangible_assets: Option<Money>,
    pub cfi_loans_made: Option<Money>,
    pub cfi_repayments_of_loans_received: Option<Money>,
    pub cfi_interest_received: Option<Money>,
    pub cfi_dividends_received: Option<Money>,
    pub cfi_net_investing_cash_flow: Option<Money>,

    // Financing
    pub cff_proceeds_from_stocks_bonds_issuance_or_contributed_capital: Option<Money>,
    pub cff_loans_received: Option<Money>,
    pub cff_subsidies_grants_donations_received: Option<Money>,
    pub cff_repayments_of_loans_made: Option<Money>,
    pub cff_repayments_of_lease_obligations: Option<Money>,
    pub cff_dividends_paid: Option<Money>,
    pub cff_net_financing_cash_flow: Option<Money>,

    // Net change in cash
    pub effect_of_exchange_rate_change: Option<Money>,
    pub net_increase: Option<Money>,
    pub at_beginning_of_year: Option<Money>,
    pub at_end_of_year: Option<Money>,
}

impl CashFlowStatement {
    /// Numeric fields understood by [`CashFlowStatement::from_raw`].
    pub const FIELDS: &'static [&'static str] = &[
        "cfo_dm_cash_received_from_customers",
        "cfo_dm_cash_paid_to_suppliers_employees",
        "cfo_dm_other_cash_received_paid",
        "cfo_dm_operating_cash_flow",
        "cfo_dm_interest_paid",
        "cfo_dm_income_taxes_paid",
        "cfo_dm_extra_items_cash_flow",
        "cfo_dm_net_operating_cash_flow",
        "cfo_im_income_before_income_taxes",
        "cfo_im_income_before_changes_in_working_capital",
        "cfo_im_operating_cash_flow",
        "cfo_im_interest_paid",
        "cfo_im_income_taxes_paid",
        "cfo_im_extra_items_cash_flow",
        "cfo_im_net_operating_cash_flow",
        "cfi_acquisition_of_stocks_shares",
        "cfi_sale_proceeds_from_stocks_shares",
        "cfi_acquisition_of_fixed_assets_intangible_assets",
        "cfi_sale_proceeds_from_fixed_assets_intangible_assets",
        "cfi_loans_made",
        "cfi_repayments_of_loans_received",
        "cfi_interest_received",
        "cfi_dividends_received",
        "cfi_net_investing_cash_flow",
        "cff_proceeds_from_stocks_bonds_issuance_or_contributed_capital",
        "cff_loans_received",
        "cff_subsidies_grants_donations_received",
        "cff_repayments_of_loans_made",
        "cff_repayments_of_lease_obligations",
        "cff_dividends_paid",
        "cff_net_financing_cash_flow",
        "effect_of_exchange_rate_change",
        "net_increase",
        "at_beginning_of_year",
        "at_end_of_year",
    ];

    pub fn from_raw(raw: &RawRecord) -> Self {
        log_unknown_keys(raw, Self::FIELDS, "cash_flow_statement");
        let num = |key: &str| numeric_field(raw, key);
        Self {
            fiscal_year: fiscal_year_field(raw),
            currency: currency_field(raw),
            cfo_dm_cash_received_from_customers: num("cfo_dm_cash_received_from_customers"),
            cfo_dm_cash_paid_to_suppliers_employees: num("cfo_dm_cash_paid_to_suppliers_employees"),
            cfo_dm_other_cash_received_paid: num("cfo_dm_other_cash_received_paid"),
            cfo_dm_operating_cash_flow: num("cfo_dm_operating_cash_flow"),
            cfo_dm_interest_paid: num("cfo_dm_interest_paid"),
            cfo_dm_income_taxes_paid: num("cfo_dm_income_taxes_paid"),
            cfo_dm_extra_items_cash_flow: num("cfo_dm_extra_items_cash_flow"),
            cfo_dm_net_operating_cash_flow: num("cfo_dm_net_operating_cash_flow"),
            cfo_im_income_before_income_taxes: num("cfo_im_income_before_income_taxes"),
            cfo_im_income_before_changes_in_working_capital: num(
                "cfo_im_income_before_changes_in_working_capital",
            ),
            cfo_im_operating_cash_flow: num("cfo_im_operating_cash_flow"),
            cfo_im_interest_paid: num("cfo_im_interest_paid"),
            cfo_im_income_taxes_paid: num("cfo_im_income_taxes_paid"),
            cfo_im_extra_items_cash_flow: num("cfo_im_extra_items_cash_flow"),
            cfo_im_net_operating_cash_flow: num("cfo_im_net_operating_cash_flow"),
            cfi_acquisition_of_stocks_shares: num("cfi_acquisition_of_stocks_shares"),
            cfi_sale_proceeds_from_stocks_shares: num("cfi_sale_proceeds_from_stocks_shares"),
            cfi_acquisition_of_fixed_assets_intangible_assets: num(
                "cfi_acquisition_of_fixed_assets_intangible_assets",
            ),
            cfi_sale_proceeds_from_fixed_assets_intangible_assets: num(
                "cfi_sale_proceeds_from_fixed_assets_intangible_assets",
            ),
            cfi_loans_made: num("cfi_loans_made"),
            cfi_repayments_of_loans_received: num("cfi_repayments_of_loans_received"),
            cfi_interest_received: num("cfi_interest_received"),
            cfi_dividends_received: num("cfi_dividends_received"),
            cfi_net_investing_cash_flow: num("cfi_net_investing_cash_flow"),
            cff_proceeds_from_stocks_bonds_issuance_or_contributed_capital: num(
                "cff_proceeds_from_stocks_bonds_issuance_or_contributed_capital",
            ),
            cff_loans_received: num("cff_loans_received"),
            cff_subsidies_grants_donations_received: num("cff_subsidies_grants_donations_received"),
            cff_repayments_of_loans_made: num("cff_repayments_of_loans_made"),
            cff_repayments_of_lease_obligations: num("cff_repayments_of_lease_obligations"),
            cff_dividends_paid: num("cff_dividends_paid"),
            cff_net_financing_cash_flow: num("cff_net_financing_cash_flow"),
            effect_of_exchange_rate_change: num("effect_of_exchange_rate_change"),
            net_increase: num("net_increase"),
            at_beginning_of_year: num("at_beginning_of_year"),
            at_end_of_year: num("at_end_of_year"),
        }
    }

    /// Net operating cash flow, preferring the direct method when reported.
    pub fn net_operating_cash_flow(&self) -> Option<Money> {
        self.cfo_dm_net_operating_cash_flow
            .or(self.cfo_im_net_operating_cash_flow)
    }
}
