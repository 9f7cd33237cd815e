//! Tracing setup for structured logging.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,tower_http=info,sqlx=warn";

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Directive string, e.g. `info,api=debug,contact_store=debug`
    pub filter: String,
    /// JSON lines instead of the human-readable format
    pub json: bool,
    /// Log span open/close, which gives per-request timing
    pub span_events: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            json: false,
            span_events: false,
        }
    }
}

impl TracingConfig {
    /// Reads `RUST_LOG`, `LOG_JSON` and `LOG_SPANS` through `lookup`.
    /// Flags accept `1` or `true` in any case.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |name: &str| {
            lookup(name)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        };

        Self {
            filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            json: flag("LOG_JSON"),
            span_events: flag("LOG_SPANS"),
        }
    }
}

/// Installs the global subscriber. A second call is a no-op, so test
/// harnesses may call this freely.
pub fn init_tracing(config: &TracingConfig) {
    let env_filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let initialized = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(span_events)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_span_events(span_events).with_target(true))
            .try_init()
    };

    if initialized.is_ok() {
        tracing::info!(filter = %config.filter, json = config.json, "Tracing initialized");
    }
}

/// Installs the global subscriber configured from the process environment.
pub fn init_tracing_from_env() {
    init_tracing(&TracingConfig::from_lookup(|name| std::env::var(name).ok()));
}
