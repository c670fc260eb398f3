use clap::Args;
use serde_json::Value;

use fin_health_core::trends;

use super::StatementArgs;

/// Arguments for multi-year trend analysis
#[derive(Args)]
pub struct TrendsArgs {
    #[command(flatten)]
    pub statements: StatementArgs,
}

pub fn run_trends(args: TrendsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (bundle, config) = args.statements.load()?;
    let result = trends::trend_report(&bundle.normalize(), &config)?;
    Ok(serde_json::to_value(result)?)
}
