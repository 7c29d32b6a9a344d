//! Client side of the liveness contract, used by the container health check.

use std::time::Duration;
use thiserror::Error;

use crate::http::HealthStatus;

/// Why a health probe failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{url} reported status {reported:?}")]
    Unhealthy { url: String, reported: String },
}

/// Succeed only if `url` answers exactly `200` with `{"status":"ok"}`.
pub async fn probe_health(url: &str, timeout: Duration) -> Result<(), ProbeError> {
    let request_error = |source| ProbeError::Request {
        url: url.to_string(),
        source,
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .no_proxy()
        .build()
        .map_err(request_error)?;
    let res = client.get(url).send().await.map_err(request_error)?;

    let status = res.status();
    if status != reqwest::StatusCode::OK {
        return Err(ProbeError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body: HealthStatus = res.json().await.map_err(request_error)?;
    if body != HealthStatus::ok() {
        return Err(ProbeError::Unhealthy {
            url: url.to_string(),
            reported: body.status,
        });
    }
    Ok(())
}
