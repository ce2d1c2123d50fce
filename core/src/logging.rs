//! Subscriber setup shared by every binary in the workspace.
//!
//! Logs never go to stdout: stdout carries the status lines and the JSON
//! summary, which callers pipe into other tools.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Fmt subscriber filtered by `RUST_LOG`, writing to `writer`.
pub fn subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .finish()
}

/// Install `subscriber(stderr)` as the global default. A second call is a
/// no-op.
pub fn init() {
    tracing::subscriber::set_global_default(subscriber(std::io::stderr)).ok();
}
