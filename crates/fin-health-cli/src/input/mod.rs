pub mod config;
pub mod file;
pub mod stdin;

use fin_health_core::statements::RawStatementBundle;

/// Statement bundle from `--input`, or from piped stdin.
pub fn read_bundle(path: Option<&str>) -> Result<RawStatementBundle, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path);
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(serde_json::from_value(data)?),
        None => Err("--input is required (or pipe a statement bundle on stdin)".into()),
    }
}
