//! HTTP transport seam.
//!
//! # Design
//! The prober never talks to the network directly; it calls a `Transport`.
//! `UreqTransport` is the real one. Tests plug in in-memory transports so the
//! pool and the outcome policy can be exercised without a server.
//!
//! Responses are plain data with owned fields so they can move freely between
//! worker threads and into completion callbacks.

use crate::error::ProbeError;

/// Status and headers of one answered GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl ProbeResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// First header value matching `name`, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Issues a single GET and reports what came back.
///
/// Every status is returned as data; only a missing response is an `Err`.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<ProbeResponse, ProbeError>;
}

/// `Transport` backed by `ureq`.
///
/// Builds a fresh agent per request, so every probe opens its own connection
/// and nothing is pooled between probes. Timeouts are ureq's defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    fn agent() -> ureq::Agent {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<ProbeResponse, ProbeError> {
        let response = Self::agent()
            .get(url)
            .call()
            .map_err(|e| ProbeError::transport(url, e))?;

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Ok(ProbeResponse {
            status: response.status().as_u16(),
            headers,
        })
    }
}
