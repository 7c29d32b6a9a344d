//! Startup failure paths: every error is fatal and reported, never retried.

use envpromote_ecs_app::config::{AppConfig, ConfigError};
use envpromote_ecs_app::lifecycle::startup::{self, StartupError};
use envpromote_ecs_app::net::ListenerError;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::test]
async fn port_in_use_fails_fast() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();

    let mut config = AppConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = taken.local_addr().unwrap().port();

    let result = tokio::time::timeout(Duration::from_secs(2), startup::run(config))
        .await
        .expect("startup should not hang on a bind failure");

    assert!(matches!(
        result,
        Err(StartupError::Listener(ListenerError::Bind { .. }))
    ));
}

#[test]
fn invalid_metrics_address_is_rejected_before_startup() {
    let err = AppConfig::from_lookup(|name| {
        (name == "METRICS_ADDRESS").then(|| "not-an-address".to_string())
    })
    .unwrap_err();

    assert!(matches!(
        err,
        ConfigError::Parse { name: "METRICS_ADDRESS", .. }
    ));
}
