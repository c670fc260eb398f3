use clap::Args;
use serde_json::Value;

use fin_health_core::ratios;

use super::StatementArgs;

/// Arguments for the per-year ratio series
#[derive(Args)]
pub struct RatiosArgs {
    #[command(flatten)]
    pub statements: StatementArgs,
}

pub fn run_ratios(args: RatiosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (bundle, config) = args.statements.load()?;
    let result = ratios::ratio_series(&bundle.normalize(), &config)?;
    Ok(serde_json::to_value(result)?)
}
