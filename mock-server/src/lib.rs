use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Lowest port the server binary accepts.
pub const PORT_MIN: u16 = 1500;
/// Highest port the server binary accepts.
pub const PORT_MAX: u16 = 10000;

/// Body returned for every `GET /`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    pub hit: usize,
}

/// How the target answers probes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    /// Always 200.
    Healthy,
    /// Always the given status.
    Fixed(StatusCode),
    /// 500 on every n-th request (1-based), 200 otherwise.
    FailEvery(usize),
}

/// Shared state of one running target: its behaviour and a hit counter.
#[derive(Debug)]
pub struct Target {
    behavior: Behavior,
    hits: AtomicUsize,
}

impl Target {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            hits: AtomicUsize::new(0),
        })
    }

    pub fn healthy() -> Arc<Self> {
        Self::new(Behavior::Healthy)
    }

    /// Number of `GET /` requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn status_for(&self, hit: usize) -> StatusCode {
        match self.behavior {
            Behavior::Healthy => StatusCode::OK,
            Behavior::Fixed(status) => status,
            Behavior::FailEvery(n) if n > 0 && hit % n == 0 => StatusCode::INTERNAL_SERVER_ERROR,
            Behavior::FailEvery(_) => StatusCode::OK,
        }
    }
}

pub fn app() -> Router {
    app_with(Target::healthy())
}

pub fn app_with(target: Arc<Target>) -> Router {
    Router::new().route("/", get(probe)).with_state(target)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Target::healthy()).await
}

pub async fn run_with(listener: TcpListener, target: Arc<Target>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(target)).await
}

/// Parse and range-check the `PORT` value the binary is started with.
pub fn parse_port(raw: &str) -> Option<u16> {
    raw.trim()
        .parse::<u16>()
        .ok()
        .filter(|port| (PORT_MIN..=PORT_MAX).contains(port))
}

async fn probe(State(target): State<Arc<Target>>) -> (StatusCode, Json<Health>) {
    let hit = target.hits.fetch_add(1, Ordering::SeqCst) + 1;
    let status = target.status_for(hit);
    tracing::debug!(hit, status = status.as_u16(), "served probe");
    let label = if status.is_success() { "ok" } else { "error" };
    (
        status,
        Json(Health {
            status: label.to_string(),
            hit,
        }),
    )
}
