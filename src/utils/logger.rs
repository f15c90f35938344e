use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target every span and event of this crate is recorded under.
pub const LOG_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Output shape of the log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human readable output for terminal runs.
    Compact,
    /// One JSON object per line, without timestamps; CloudWatch adds its own.
    Json,
}

/// Directives used when `RUST_LOG` is unset.
pub fn default_directives(format: LogFormat, verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    match format {
        LogFormat::Compact if verbose => format!("{}={},info", LOG_TARGET, level),
        LogFormat::Compact => format!("{}={}", LOG_TARGET, level),
        LogFormat::Json => format!("{}={},lambda={}", LOG_TARGET, level, level),
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// defaults from [`default_directives`].
pub fn init(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(format, verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.without_time().json()).init(),
    }
}
