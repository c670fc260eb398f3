mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::altman::AltmanArgs;
use commands::assess::AssessArgs;
use commands::ratios::RatiosArgs;
use commands::trends::TrendsArgs;

/// Company financial health scoring
#[derive(Parser)]
#[command(
    name = "fhs",
    version,
    about = "Company financial health scoring",
    long_about = "Score a company's financial health from multi-year balance sheets, \
                  income statements and cash flow statements with decimal precision. \
                  Produces ratio series, a weighted health score and grade, an Altman \
                  Z-score and multi-year trends."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log line format on stderr (level from RUST_LOG, default warn)
    #[arg(long, default_value = "text", global = true)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full financial health assessment
    Assess(AssessArgs),
    /// Ratio series for every aligned fiscal year
    Ratios(RatiosArgs),
    /// Altman Z-score with components and zone
    Altman(AltmanArgs),
    /// Multi-year trends, directions and volatility
    Trends(TrendsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_format);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Assess(args) => commands::assess::run_assess(args),
        Commands::Ratios(args) => commands::ratios::run_ratios(args),
        Commands::Altman(args) => commands::altman::run_altman(args),
        Commands::Trends(args) => commands::trends::run_trends(args),
        Commands::Version => {
            println!("fhs {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
