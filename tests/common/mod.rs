//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{extract::Path, routing::get, Router};
use envpromote_ecs_app::config::AppConfig;
use envpromote_ecs_app::http::{serve_with_drain, HttpServer};
use envpromote_ecs_app::lifecycle::{Shutdown, ShutdownOutcome};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server running on an ephemeral port in the background.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<ShutdownOutcome, std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the outcome.
    pub async fn stop(self) -> ShutdownOutcome {
        self.shutdown.trigger();
        self.outcome().await
    }

    /// Wait for the server task to finish on its own.
    pub async fn outcome(self) -> ShutdownOutcome {
        tokio::time::timeout(Duration::from_secs(10), self.handle)
            .await
            .expect("server did not finish in time")
            .expect("server task panicked")
            .expect("server returned an error")
    }
}

async fn ephemeral_listener() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Start the real application with the given configuration.
pub async fn spawn_app(config: AppConfig) -> TestServer {
    let (listener, addr) = ephemeral_listener().await;
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let handle = tokio::spawn(server.run(listener, shutdown.clone()));
    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// Start an arbitrary router under the drain sequence.
pub async fn spawn_router(router: Router, grace: Duration) -> TestServer {
    let (listener, addr) = ephemeral_listener().await;
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(serve_with_drain(listener, router, shutdown.clone(), grace));
    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// Router with `GET /slow/{ms}` that answers "done" after sleeping.
pub fn slow_router() -> Router {
    Router::new()
        .route(
            "/slow/{ms}",
            get(|Path(ms): Path<u64>| async move {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                "done"
            }),
        )
        .route("/fast", get(|| async { "fast" }))
}

/// Client without connection pooling or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
