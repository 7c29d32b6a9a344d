//! Request and shutdown metrics, captured with a thread-local recorder.
//!
//! Each test drives a current-thread runtime inside `with_local_recorder`, so
//! every task (server, connections, client) records into its own registry.

use std::time::Duration;

use envpromote_ecs_app::config::AppConfig;
use envpromote_ecs_app::lifecycle::ShutdownOutcome;
use metrics::{SharedString, Unit};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::CompositeKey;
use reqwest::StatusCode;

mod common;

type Entry = (CompositeKey, Option<Unit>, Option<SharedString>, DebugValue);

fn find<'a>(snapshot: &'a [Entry], name: &str, labels: &[(&str, &str)]) -> Option<&'a DebugValue> {
    snapshot.iter().find_map(|(key, _, _, value)| {
        let key = key.key();
        let matches = key.name() == name
            && labels
                .iter()
                .all(|(k, v)| key.labels().any(|l| l.key() == *k && l.value() == *v));
        matches.then_some(value)
    })
}

fn counter(snapshot: &[Entry], name: &str, labels: &[(&str, &str)]) -> u64 {
    match find(snapshot, name, labels) {
        Some(DebugValue::Counter(n)) => *n,
        _ => 0,
    }
}

/// Run `f` on a fresh current-thread runtime with a local recorder installed.
fn record<F, Fut>(f: F) -> Vec<Entry>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    metrics::with_local_recorder(&recorder, || runtime.block_on(f()));
    snapshotter.snapshot().into_vec()
}

#[test]
fn requests_are_counted_by_route_and_status() {
    let snapshot = record(|| async {
        let server = common::spawn_app(AppConfig::default()).await;
        let client = common::client();

        for _ in 0..2 {
            let res = client.get(server.url("/health")).send().await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
        }
        let res = client.get(server.url("/")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let res = client.get(server.url("/api/users")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        server.stop().await;
    });

    let health = [("method", "GET"), ("route", "/health"), ("status", "200")];
    let root = [("method", "GET"), ("route", "/"), ("status", "200")];
    let unmatched = [("method", "GET"), ("route", "unmatched"), ("status", "404")];

    assert_eq!(counter(&snapshot, "app_requests_total", &health), 2);
    assert_eq!(counter(&snapshot, "app_requests_total", &root), 1);
    assert_eq!(counter(&snapshot, "app_requests_total", &unmatched), 1);

    assert!(matches!(
        find(&snapshot, "app_request_duration_seconds", &health),
        Some(DebugValue::Histogram(samples)) if samples.len() == 2
    ));
    assert!(matches!(
        find(&snapshot, "app_in_flight_requests", &[]),
        Some(DebugValue::Gauge(value)) if value.into_inner() == 0.0
    ));
}

#[test]
fn graceful_shutdown_is_counted() {
    let snapshot = record(|| async {
        let server = common::spawn_app(AppConfig::default()).await;
        assert_eq!(server.stop().await, ShutdownOutcome::Graceful);
    });

    assert_eq!(
        counter(&snapshot, "app_shutdowns_total", &[("outcome", "graceful")]),
        1
    );
    assert_eq!(
        counter(&snapshot, "app_shutdowns_total", &[("outcome", "timed_out")]),
        0
    );
}

#[test]
fn timed_out_shutdown_is_counted() {
    let snapshot = record(|| async {
        let server =
            common::spawn_router(common::slow_router(), Duration::from_millis(200)).await;
        let url = server.url("/slow/5000");
        let _request = tokio::spawn(async move { common::client().get(url).send().await });
        tokio::time::sleep(Duration::from_millis(200)).await;

        let outcome = server.stop().await;
        assert_eq!(outcome, ShutdownOutcome::TimedOut { in_flight: 1 });
    });

    assert_eq!(
        counter(&snapshot, "app_shutdowns_total", &[("outcome", "timed_out")]),
        1
    );
}
