//! Error types for the prober.
//!
//! # Design
//! `BadStatus` gets its own variant because the sequential prober turns it
//! into the process failure, and the message must carry the status code.
//! Transport faults keep the client's message as a string so the error stays
//! `Send` and cheap to move across worker threads.

use thiserror::Error;

/// Errors returned by `Prober`, `WorkerPool` and `Transport` implementations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The request never produced a response (refused, timeout, DNS, ...).
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The server answered with something other than 200.
    #[error("request failed with response {status}")]
    BadStatus { status: u16 },

    /// A `ProbeConfig` field is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A worker thread could not be started.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// A job was submitted after the pool stopped accepting work.
    #[error("worker pool is closed")]
    PoolClosed,
}

impl ProbeError {
    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        ProbeError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_status_message_carries_status() {
        let err = ProbeError::BadStatus { status: 503 };
        assert_eq!(err.to_string(), "request failed with response 503");
    }

    #[test]
    fn transport_message_names_url() {
        let err = ProbeError::transport("http://127.0.0.1:1/", "connection refused");
        assert_eq!(
            err.to_string(),
            "transport error for http://127.0.0.1:1/: connection refused"
        );
    }
}
