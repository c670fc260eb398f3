use clap::Args;
use serde_json::Value;

use fin_health_core::bankruptcy;

use super::StatementArgs;

/// Arguments for the Altman Z-score
#[derive(Args)]
pub struct AltmanArgs {
    #[command(flatten)]
    pub statements: StatementArgs,

    /// Fiscal year to score (latest aligned year when omitted)
    #[arg(long)]
    pub year: Option<i32>,
}

pub fn run_altman(args: AltmanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (bundle, config) = args.statements.load()?;
    let result = bankruptcy::bankruptcy_risk(&bundle.normalize(), &config, args.year)?;
    Ok(serde_json::to_value(result)?)
}
