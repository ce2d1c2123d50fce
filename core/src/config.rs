//! Target endpoint and batch parameters.
//!
//! The defaults reproduce the fixed values the smoke tests were written
//! against: host `0.0.0.0`, port 8000 for the sequential probe, port 8005 for
//! the concurrent probe, 100 requests, one worker per core.

use std::num::NonZeroUsize;

use crate::error::ProbeError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const SEQUENTIAL_PORT: u16 = 8000;
pub const CONCURRENT_PORT: u16 = 8005;
pub const DEFAULT_COUNT: usize = 100;

/// Number of available processing cores, never less than one.
pub fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Where to probe and how hard.
///
/// `count` and `concurrency` only matter to `Prober::probe_concurrent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub host: String,
    pub port: u16,
    pub count: usize,
    pub concurrency: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::sequential()
    }
}

impl ProbeConfig {
    pub fn sequential() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: SEQUENTIAL_PORT,
            count: 1,
            concurrency: 1,
        }
    }

    pub fn concurrent() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: CONCURRENT_PORT,
            count: DEFAULT_COUNT,
            concurrency: available_cores(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// `host:port`, as printed in status lines.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.authority())
    }

    pub fn validate(&self) -> Result<(), ProbeError> {
        if self.host.trim().is_empty() {
            return Err(ProbeError::InvalidConfig("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ProbeError::InvalidConfig("port must not be 0".to_string()));
        }
        if self.count == 0 {
            return Err(ProbeError::InvalidConfig("count must be at least 1".to_string()));
        }
        if self.concurrency == 0 {
            return Err(ProbeError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
