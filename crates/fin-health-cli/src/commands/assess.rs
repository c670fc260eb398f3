use clap::Args;
use serde_json::Value;

use fin_health_core::health;

use super::StatementArgs;

/// Arguments for a full health assessment
#[derive(Args)]
pub struct AssessArgs {
    #[command(flatten)]
    pub statements: StatementArgs,

    /// Registration number to report (defaults to the bundle's)
    #[arg(long)]
    pub registration_number: Option<String>,
}

pub fn run_assess(args: AssessArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (bundle, config) = args.statements.load()?;
    let registration_number = args
        .registration_number
        .or_else(|| bundle.registration_number.clone())
        .ok_or("--registration-number is required when the bundle has none")?;

    let result =
        health::assess_financial_health(&registration_number, &bundle.normalize(), &config)?;
    Ok(serde_json::to_value(result)?)
}
