//! Per-probe outcomes and the optional aggregate.

use serde::Serialize;

use crate::error::ProbeError;
use crate::http::ProbeResponse;

/// What happened to one probe in a concurrent batch.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// Status 200.
    Ok(ProbeResponse),
    /// Answered, but not with 200.
    BadStatus(ProbeResponse),
    /// No response at all.
    Failed(ProbeError),
}

impl ProbeOutcome {
    pub fn from_result(result: Result<ProbeResponse, ProbeError>) -> Self {
        match result {
            Ok(response) if response.is_ok() => ProbeOutcome::Ok(response),
            Ok(response) => ProbeOutcome::BadStatus(response),
            Err(err) => ProbeOutcome::Failed(err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Ok(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Ok(response) | ProbeOutcome::BadStatus(response) => {
                Some(response.status)
            }
            ProbeOutcome::Failed(_) => None,
        }
    }
}

/// Counts of a collected batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProbeSummary {
    pub total: usize,
    pub succeeded: usize,
    pub bad_status: usize,
    pub failed: usize,
}

impl ProbeSummary {
    pub fn record(&mut self, outcome: &ProbeOutcome) {
        self.total += 1;
        match outcome {
            ProbeOutcome::Ok(_) => self.succeeded += 1,
            ProbeOutcome::BadStatus(_) => self.bad_status += 1,
            ProbeOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn failures(&self) -> usize {
        self.bad_status + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.total > 0 && self.failures() == 0
    }
}

impl<'a> FromIterator<&'a ProbeOutcome> for ProbeSummary {
    fn from_iter<I: IntoIterator<Item = &'a ProbeOutcome>>(iter: I) -> Self {
        let mut summary = ProbeSummary::default();
        for outcome in iter {
            summary.record(outcome);
        }
        summary
    }
}
