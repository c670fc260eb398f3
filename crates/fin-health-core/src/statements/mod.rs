//! Typed statement entities and the normalizer that builds them from raw
//! registry records.

pub mod balance_sheet;
pub mod cash_flow;
pub mod income_statement;
pub mod normalize;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use balance_sheet::BalanceSheet;
pub use cash_flow::CashFlowStatement;
pub use income_statement::IncomeStatement;
pub use normalize::RawRecord;

use crate::types::FiscalYear;

/// Raw statement records for one company, as delivered by the registry
/// collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStatementBundle {
    pub registration_number: Option<String>,
    pub balance_sheets: Vec<RawRecord>,
    pub income_statements: Vec<RawRecord>,
    #[serde(alias = "cash_flows")]
    pub cash_flow_statements: Vec<RawRecord>,
}

impl RawStatementBundle {
    /// Normalize every record. Never fails; malformed values become `None`.
    pub fn normalize(&self) -> StatementSet {
        StatementSet {
            balance_sheets: self.balance_sheets.iter().map(BalanceSheet::from_raw).collect(),
            income_statements: self
                .income_statements
                .iter()
                .map(IncomeStatement::from_raw)
                .collect(),
            cash_flows: self
                .cash_flow_statements
                .iter()
                .map(CashFlowStatement::from_raw)
                .collect(),
        }
    }
}

/// Normalized statements for one company, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementSet {
    pub balance_sheets: Vec<BalanceSheet>,
    pub income_statements: Vec<IncomeStatement>,
    pub cash_flows: Vec<CashFlowStatement>,
}

/// Which statement types are present and which years they cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAvailability {
    pub balance_sheets: bool,
    pub income_statements: bool,
    pub cash_flows: bool,
    /// Distinct fiscal years across all statements, most recent first.
    pub years_with_data: Vec<FiscalYear>,
    pub last_financial_year: Option<FiscalYear>,
}

impl StatementSet {
    /// Distinct fiscal years across all three statement types, ascending.
    pub fn fiscal_years(&self) -> BTreeSet<FiscalYear> {
        self.balance_sheets
            .iter()
            .map(|s| s.fiscal_year)
            .chain(self.income_statements.iter().map(|s| s.fiscal_year))
            .chain(self.cash_flows.iter().map(|s| s.fiscal_year))
            .flatten()
            .collect()
    }

    pub fn availability(&self) -> DataAvailability {
        let years_with_data: Vec<FiscalYear> = self.fiscal_years().into_iter().rev().collect();
        DataAvailability {
            balance_sheets: !self.balance_sheets.is_empty(),
            income_statements: !self.income_statements.is_empty(),
            cash_flows: !self.cash_flows.is_empty(),
            last_financial_year: years_with_data.first().copied(),
            years_with_data,
        }
    }

    /// Keep only statements from the `max_years` most recent fiscal years.
    /// Statements without a fiscal year are kept.
    pub fn most_recent_years(&self, max_years: usize) -> StatementSet {
        let keep: BTreeSet<FiscalYear> = self
            .fiscal_years()
            .into_iter()
            .rev()
            .take(max_years)
            .collect();
        let in_window = |year: Option<FiscalYear>| year.map_or(true, |y| keep.contains(&y));

        StatementSet {
            balance_sheets: self
                .balance_sheets
                .iter()
                .filter(|s| in_window(s.fiscal_year))
                .cloned()
                .collect(),
            income_statements: self
                .income_statements
                .iter()
                .filter(|s| in_window(s.fiscal_year))
                .cloned()
                .collect(),
            cash_flows: self
                .cash_flows
                .iter()
                .filter(|s| in_window(s.fiscal_year))
                .cloned()
                .collect(),
        }
    }
}
