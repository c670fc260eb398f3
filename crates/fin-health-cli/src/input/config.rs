use std::path::Path;

use fin_health_core::config::ScoringConfig;

use super::file;

/// Scoring configuration from `--config` (YAML for `.yaml`/`.yml`, JSON
/// otherwise) with the `--max-years` override applied. Omitted fields keep
/// their defaults.
pub fn load_config(
    path: Option<&str>,
    max_years: Option<usize>,
) -> Result<ScoringConfig, Box<dyn std::error::Error>> {
    let mut config: ScoringConfig = match path {
        Some(p) if is_yaml(p) => file::read_yaml(p)?,
        Some(p) => file::read_json(p)?,
        None => ScoringConfig::default(),
    };
    if let Some(years) = max_years {
        config.max_years = years;
    }
    config.validate()?;
    tracing::debug!(max_years = config.max_years, growth_method = ?config.growth_method, "config loaded");
    Ok(config)
}

fn is_yaml(path: &str) -> bool {
    matches!(
        Path::new(path).extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
