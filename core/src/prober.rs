//! Sequential and concurrent probes against one endpoint.
//!
//! # Design
//! The two entry points carry different failure policies on purpose:
//!
//! - `probe_once` is fail-fast. Anything but a 200 is returned as an error,
//!   so a caller can turn it straight into a non-zero exit.
//! - `probe_concurrent` is fail-soft. Every probe is logged and handed to a
//!   completion callback; bad statuses and transport faults never abort the
//!   batch and never reach the return value. Only setup errors (bad config,
//!   failure to start workers) are returned.
//!
//! `probe_concurrent_discard` keeps the no-aggregation default;
//! `probe_concurrent_collect` is the opt-in summary.

use std::sync::Arc;

use crossbeam::channel::unbounded;
use tracing::{debug, error, info, warn};

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::http::{ProbeResponse, Transport, UreqTransport};
use crate::outcome::{ProbeOutcome, ProbeSummary};
use crate::pool::WorkerPool;

#[derive(Debug, Clone)]
pub struct Prober<T = UreqTransport> {
    config: ProbeConfig,
    transport: Arc<T>,
}

impl Prober<UreqTransport> {
    pub fn new(config: ProbeConfig) -> Self {
        Self::with_transport(config, UreqTransport)
    }
}

impl<T: Transport + 'static> Prober<T> {
    pub fn with_transport(config: ProbeConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Send one GET and require a 200.
    pub fn probe_once(&self) -> Result<ProbeResponse, ProbeError> {
        self.config.validate()?;
        let url = self.config.url();
        let response = self.transport.get(&url)?;
        info!(%url, status = response.status, "got response");
        if !response.is_ok() {
            return Err(ProbeError::BadStatus {
                status: response.status,
            });
        }
        Ok(response)
    }

    /// Send `count` GETs through a pool of `concurrency` workers.
    ///
    /// `on_complete` runs on the worker thread once per probe, in completion
    /// order. Returns after every probe has finished.
    pub fn probe_concurrent<F>(&self, on_complete: F) -> Result<(), ProbeError>
    where
        F: Fn(ProbeOutcome) + Send + Sync + 'static,
    {
        self.config.validate()?;

        let url = self.config.url();
        let on_complete = Arc::new(on_complete);
        let pool = WorkerPool::new(self.config.concurrency)?;
        info!(
            %url,
            count = self.config.count,
            workers = pool.size(),
            "starting concurrent probe"
        );

        for seq in 0..self.config.count {
            let transport = Arc::clone(&self.transport);
            let on_complete = Arc::clone(&on_complete);
            let url = url.clone();
            pool.execute(move || {
                let outcome = ProbeOutcome::from_result(transport.get(&url));
                log_outcome(seq, &outcome);
                on_complete(outcome);
            })?;
        }

        pool.join();
        Ok(())
    }

    /// `probe_concurrent` with a no-op callback: outcomes are logged, then
    /// dropped.
    pub fn probe_concurrent_discard(&self) -> Result<(), ProbeError> {
        self.probe_concurrent(|_| {})
    }

    /// `probe_concurrent`, folding every outcome into a summary.
    pub fn probe_concurrent_collect(&self) -> Result<ProbeSummary, ProbeError> {
        let (sender, receiver) = unbounded();
        self.probe_concurrent(move |outcome| {
            // The receiver outlives the batch; a failed send means it was dropped.
            if sender.send(outcome).is_err() {
                debug!("summary receiver gone, outcome dropped");
            }
        })?;
        let mut summary = ProbeSummary::default();
        for outcome in receiver.try_iter() {
            summary.record(&outcome);
        }
        Ok(summary)
    }
}

fn log_outcome(seq: usize, outcome: &ProbeOutcome) {
    match outcome {
        ProbeOutcome::Ok(response) => {
            info!(seq, status = response.status, headers = ?response.headers, "response");
        }
        ProbeOutcome::BadStatus(response) => {
            warn!(seq, status = response.status, "bad response");
        }
        ProbeOutcome::Failed(err) => {
            error!(seq, error = %err, "exception during probe");
        }
    }
}
