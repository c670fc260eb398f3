pub mod altman;
pub mod assess;
pub mod ratios;
pub mod trends;

use clap::Args;

use fin_health_core::config::ScoringConfig;
use fin_health_core::statements::RawStatementBundle;

use crate::input;

/// Input and configuration flags shared by every analysis command.
#[derive(Args)]
pub struct StatementArgs {
    /// Path to JSON statement bundle (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Scoring configuration file (JSON, or YAML by extension)
    #[arg(long)]
    pub config: Option<String>,

    /// Number of most recent fiscal years to analyse
    #[arg(long)]
    pub max_years: Option<usize>,
}

impl StatementArgs {
    pub fn load(&self) -> Result<(RawStatementBundle, ScoringConfig), Box<dyn std::error::Error>> {
        let config = input::config::load_config(self.config.as_deref(), self.max_years)?;
        let bundle = input::read_bundle(self.input.as_deref())?;
        tracing::debug!(
            balance_sheets = bundle.balance_sheets.len(),
            income_statements = bundle.income_statements.len(),
            cash_flows = bundle.cash_flow_statements.len(),
            "statement bundle read"
        );
        Ok((bundle, config))
    }
}
