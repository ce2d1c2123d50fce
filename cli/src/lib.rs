//! Command-line front ends for `probe-core`.
//!
//! `probe` sends a single GET and exits non-zero unless it gets a 200.
//! `probe-concurrent` fires a batch through the worker pool and, unless
//! `--strict` is given, exits 0 no matter how many probes failed.

pub mod args;

use std::io::Write;

use anyhow::{bail, Context, Result};
use probe_core::{ProbeError, Prober, Transport};
use tracing::debug;

pub use args::{ConcurrentArgs, SequentialArgs};

/// Send logs to stderr so stdout only carries the status lines.
pub fn init_tracing() {
    probe_core::logging::init();
}

/// One probe, fail-fast. Prints the status line, then the success line.
pub fn run_sequential<T, W>(prober: &Prober<T>, out: &mut W) -> Result<()>
where
    T: Transport + 'static,
    W: Write,
{
    let config = prober.config();
    debug!(?config, "sequential probe");
    let result = prober.probe_once();

    match &result {
        Ok(response) => writeln!(out, "Got response: {}", response.status)?,
        Err(ProbeError::BadStatus { status }) => writeln!(out, "Got response: {status}")?,
        Err(_) => {}
    }
    result.with_context(|| format!("probing {}", config.url()))?;

    writeln!(out, "Got a good response from {}", config.authority())?;
    Ok(())
}

/// A batch of probes, fail-soft unless `strict`.
///
/// Outcomes are only collected when `strict` or `json` asks for them.
pub fn run_concurrent<T, W>(prober: &Prober<T>, strict: bool, json: bool, out: &mut W) -> Result<()>
where
    T: Transport + 'static,
    W: Write,
{
    let config = prober.config();
    debug!(?config, strict, json, "concurrent probe");
    if !strict && !json {
        prober
            .probe_concurrent_discard()
            .with_context(|| format!("starting probes against {}", config.url()))?;
        writeln!(out, "Finished {} probes against {}", config.count, config.authority())?;
        return Ok(());
    }

    let summary = prober
        .probe_concurrent_collect()
        .with_context(|| format!("starting probes against {}", config.url()))?;

    if json {
        writeln!(out, "{}", serde_json::to_string(&summary)?)?;
    } else {
        writeln!(
            out,
            "Finished {} probes against {}: {} ok, {} bad response, {} failed",
            summary.total,
            config.authority(),
            summary.succeeded,
            summary.bad_status,
            summary.failed
        )?;
    }

    if strict && !summary.all_succeeded() {
        bail!(
            "{} of {} probes against {} failed",
            summary.failures(),
            summary.total,
            config.authority()
        );
    }
    Ok(())
}
