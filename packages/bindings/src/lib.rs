use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use fin_health_core::config::ScoringConfig;
use fin_health_core::statements::RawStatementBundle;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Statement bundle plus optional scoring overrides, as sent from JS.
#[derive(Deserialize)]
struct HealthRequest {
    #[serde(flatten)]
    bundle: RawStatementBundle,
    #[serde(default)]
    config: Option<ScoringConfig>,
    #[serde(default)]
    year: Option<i32>,
}

impl HealthRequest {
    fn parse(input_json: &str) -> NapiResult<Self> {
        serde_json::from_str(input_json).map_err(to_napi_error)
    }

    fn config(&self) -> ScoringConfig {
        self.config.clone().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Health scoring
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_financial_health(input_json: String) -> NapiResult<String> {
    let request = HealthRequest::parse(&input_json)?;
    let registration_number = request
        .bundle
        .registration_number
        .clone()
        .ok_or_else(|| to_napi_error("registration_number is required"))?;
    let output = fin_health_core::health::assess_financial_health(
        &registration_number,
        &request.bundle.normalize(),
        &request.config(),
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_ratio_series(input_json: String) -> NapiResult<String> {
    let request = HealthRequest::parse(&input_json)?;
    let output =
        fin_health_core::ratios::ratio_series(&request.bundle.normalize(), &request.config())
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn altman_z_score(input_json: String) -> NapiResult<String> {
    let request = HealthRequest::parse(&input_json)?;
    let output = fin_health_core::bankruptcy::bankruptcy_risk(
        &request.bundle.normalize(),
        &request.config(),
        request.year,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_trends(input_json: String) -> NapiResult<String> {
    let request = HealthRequest::parse(&input_json)?;
    let output =
        fin_health_core::trends::trend_report(&request.bundle.normalize(), &request.config())
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
