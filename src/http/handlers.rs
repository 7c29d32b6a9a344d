//! Endpoint handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ServiceConfig;

/// Service name reported by `GET /`.
pub const SERVICE_NAME: &str = "envpromote-ecs-app";

/// Greeting reported by `GET /`.
pub const GREETING: &str = "Hello from ECS 🚀";

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Body of `GET /`. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub message: String,
    pub environment: String,
    pub version: String,
}

impl ServiceInfo {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            message: GREETING.to_string(),
            environment: config.environment.clone(),
            version: config.version.clone(),
        }
    }
}

/// Application state injected into handlers.
///
/// Built once at startup; configuration is immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct AppState {
    pub info: Arc<ServiceInfo>,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            info: Arc::new(ServiceInfo::from_config(config)),
        }
    }
}

/// Liveness probe for the ALB target group and the ECS container check.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo::clone(&state.info))
}
