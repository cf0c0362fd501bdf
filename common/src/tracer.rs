//! Initialisation of the `tracing` subscriber shared by every binary.
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::writer::MakeWriterExt,
    layer::SubscriberExt,
};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// Events at WARN and above go to stderr, everything else to stdout. The
/// filter is read from `RUST_LOG`, falling back to [DEFAULT_LOG_FILTER].
/// Returns `false` if a global subscriber had already been installed.
pub fn init_tracer() -> bool {
    let writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .or_else(std::io::stdout);

    let log_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stdout_tracer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(writer);

    let subscriber =
        tracing_subscriber::Registry::default().with(stdout_tracer.with_filter(log_filter));

    tracing::subscriber::set_global_default(subscriber).is_ok()
}
