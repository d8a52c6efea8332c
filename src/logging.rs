//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LoggingConfig, DEFAULT_LOG_FILTER};

/// Pick the log filter with priority: CLI > `RUST_LOG` > default.
pub fn resolve_filter(cli: Option<String>, env: Option<String>) -> String {
    cli.or(env)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Install the global subscriber, text or JSON per `config`.
pub fn init(filter: &str, config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(filter));

    if config.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
