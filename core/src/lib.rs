//! HTTP liveness prober.
//!
//! # Overview
//! Sends GET requests to one `http://host:port/` endpoint and checks for a
//! 200. Two policies are offered:
//!
//! - sequential, fail-fast (`Prober::probe_once`), suitable as a CI gate;
//! - concurrent, fail-soft (`Prober::probe_concurrent`), which spreads a batch
//!   over a fixed-size `WorkerPool`, logs every outcome and by default keeps
//!   none of them.
//!
//! # Design
//! - Network I/O sits behind the `Transport` trait; `UreqTransport` is the
//!   real implementation.
//! - `ProbeConfig` carries host, port, request count and worker count.
//! - `logging` holds the subscriber setup the binaries share; logs go to
//!   stderr.
//! - Aggregation is opt-in through the completion callback
//!   (`Prober::probe_concurrent_collect`).

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod outcome;
pub mod pool;
pub mod prober;

pub use config::ProbeConfig;
pub use error::ProbeError;
pub use http::{ProbeResponse, Transport, UreqTransport};
pub use outcome::{ProbeOutcome, ProbeSummary};
pub use pool::WorkerPool;
pub use prober::Prober;
