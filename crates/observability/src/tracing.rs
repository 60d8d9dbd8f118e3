//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    Json,
    #[default]
    Pretty,
}

fn filter(default_directive: &str) -> EnvFilter {
    // RUST_LOG wins over the configured directive.
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). Logs go to stderr so
/// command output on stdout stays machine readable.
pub fn init(output: LogOutput, default_directive: &str) {
    let filter = filter(default_directive);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match output {
        LogOutput::Json => builder.json().try_init(),
        LogOutput::Pretty => builder.try_init(),
    };
}
