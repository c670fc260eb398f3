use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::LogFormat;

const DEFAULT_DIRECTIVES: &str = "warn";

/// Install the global subscriber. Logs go to stderr so stdout stays
/// parseable; `RUST_LOG` overrides the default level.
pub fn init_logging(format: &LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(true);
            let _ = subscriber.with(fmt_layer).try_init();
        }
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(false)
                .with_line_number(false);
            let _ = subscriber.with(fmt_layer).try_init();
        }
    }
}
