//! Probes against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port in a background thread
//! with its own runtime, then drives the prober over real HTTP through
//! `UreqTransport`. The server's hit counter checks how many requests
//! actually arrived.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use mock_server::{Behavior, Target};
use probe_core::{ProbeConfig, ProbeError, Prober};

/// Start a target with `behavior` on a random local port.
fn spawn_target(behavior: Behavior) -> (SocketAddr, Arc<Target>) {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let target = Target::new(behavior);
    let served = Arc::clone(&target);
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, served).await
        })
        .unwrap();
    });

    (addr, target)
}

fn sequential(addr: SocketAddr) -> ProbeConfig {
    ProbeConfig::sequential()
        .with_host(addr.ip().to_string())
        .with_port(addr.port())
}

fn concurrent(addr: SocketAddr, count: usize) -> ProbeConfig {
    ProbeConfig::concurrent()
        .with_host(addr.ip().to_string())
        .with_port(addr.port())
        .with_count(count)
        .with_concurrency(4)
}

#[test]
fn sequential_healthy_target() {
    let (addr, target) = spawn_target(Behavior::Healthy);

    let response = Prober::new(sequential(addr)).probe_once().unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(target.hits(), 1);
}

#[test]
fn sequential_unhealthy_target() {
    for status in [StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
        let (addr, _target) = spawn_target(Behavior::Fixed(status));

        let err = Prober::new(sequential(addr)).probe_once().unwrap_err();

        assert!(
            matches!(err, ProbeError::BadStatus { status: s } if s == status.as_u16()),
            "unexpected error: {err}"
        );
        assert!(err.to_string().contains(status.as_str()));
    }
}

#[test]
fn sequential_unreachable_target() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = Prober::new(sequential(addr)).probe_once().unwrap_err();

    assert!(matches!(err, ProbeError::Transport { .. }));
}

#[test]
fn concurrent_healthy_target() {
    let (addr, target) = spawn_target(Behavior::Healthy);

    let summary = Prober::new(concurrent(addr, 100))
        .probe_concurrent_collect()
        .unwrap();

    assert_eq!(target.hits(), 100);
    assert_eq!(summary.total, 100);
    assert_eq!(summary.succeeded, 100);
    assert!(summary.all_succeeded());
}

#[test]
fn concurrent_partially_failing_target_still_succeeds() {
    let (addr, target) = spawn_target(Behavior::FailEvery(4));

    Prober::new(concurrent(addr, 100))
        .probe_concurrent_discard()
        .unwrap();

    assert_eq!(target.hits(), 100);
}

#[test]
fn concurrent_partially_failing_target_is_counted_when_collected() {
    let (addr, _target) = spawn_target(Behavior::FailEvery(4));

    let summary = Prober::new(concurrent(addr, 100))
        .probe_concurrent_collect()
        .unwrap();

    assert_eq!(summary.total, 100);
    assert_eq!(summary.bad_status, 25);
    assert_eq!(summary.succeeded, 75);
    assert_eq!(summary.failed, 0);
}

#[test]
fn concurrent_unreachable_target_still_succeeds() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let prober = Prober::new(concurrent(addr, 10));
    assert!(prober.probe_concurrent_discard().is_ok());

    let summary = prober.probe_concurrent_collect().unwrap();
    assert_eq!(summary.failed, 10);
}

#[test]
fn repeated_runs_against_healthy_target_match() {
    let (addr, target) = spawn_target(Behavior::Healthy);
    let prober = Prober::new(concurrent(addr, 20));

    let first = prober.probe_concurrent_collect().unwrap();
    let second = prober.probe_concurrent_collect().unwrap();

    assert_eq!(first, second);
    assert!(first.all_succeeded());
    assert_eq!(target.hits(), 40);
    assert_eq!(prober.probe_once().unwrap().status, 200);
}
