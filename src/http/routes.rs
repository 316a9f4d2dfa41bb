//! HTTP routes, mounted under `/api`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Notify;
use tracing::{error, info};

use crate::app::{StatusReport, StatusService, StatusState};
use crate::domain::ConfigPatch;
use crate::http::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StatusService>,
    /// Signalled by `POST /api/shutdown`.
    pub shutdown: Arc<Notify>,
}

impl AppState {
    pub fn new(service: StatusService) -> Self {
        Self {
            service: Arc::new(service),
            shutdown: Arc::new(Notify::new()),
        }
    }
}

pub fn config_routes() -> Router<AppState> {
    Router::new()
        .route("/api/config", get(get_config).put(update_config))
        .route("/api/config/", get(get_config).put(update_config))
        .route("/api/config/reset", post(reset_config))
}

pub fn game_routes() -> Router<AppState> {
    Router::new()
        .route("/api/current-status", get(current_status))
        .route("/api/test", get(diagnostics))
        .route("/api/shutdown", post(shutdown))
}

/// Run blocking service work off the async runtime.
async fn blocking<T, F>(state: &AppState, f: F) -> Result<T, tokio::task::JoinError>
where
    F: FnOnce(&StatusService) -> T + Send + 'static,
    T: Send + 'static,
{
    let service = state.service.clone();
    tokio::task::spawn_blocking(move || f(&service)).await
}

async fn get_config(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let config = blocking(&state, |service| service.config()).await?;
    Ok(Json(json!({"success": true, "config": config})))
}

async fn update_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let patch = parse_patch(&headers, &body)?;

    let config = blocking(&state, move |service| service.update_config(patch))
        .await?
        .map_err(|e| {
            error!(error = %e, "Error updating config");
            ApiError::from(e)
        })?;

    Ok(Json(json!({"success": true, "config": config})))
}

async fn reset_config(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let config = blocking(&state, |service| service.reset_config())
        .await?
        .map_err(|e| {
            error!(error = %e, "Error resetting config");
            ApiError::from(e)
        })?;

    Ok(Json(json!({"success": true, "config": config})))
}

async fn current_status(State(state): State<AppState>) -> Response {
    let report = match blocking(&state, |service| service.current_status()).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Status task failed");
            StatusReport::parse_failure(e.to_string())
        }
    };

    (status_code(&report), Json(report.status)).into_response()
}

async fn diagnostics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let diagnostics = blocking(&state, |service| service.diagnostics()).await?;
    Ok(Json(diagnostics).into_response())
}

async fn shutdown(State(state): State<AppState>) -> Json<Value> {
    info!("Shutdown requested over HTTP");
    state.shutdown.notify_one();
    Json(json!({"status": "shutting down"}))
}

/// HTTP status for a status report: resolution failures are 404, parse failures 500.
pub fn status_code(report: &StatusReport) -> StatusCode {
    match report.state {
        StatusState::Ok | StatusState::NoGameData => StatusCode::OK,
        StatusState::NoLogConfigured | StatusState::ConfiguredFileMissing => StatusCode::NOT_FOUND,
        StatusState::ParseFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Validate and decode a configuration update request.
fn parse_patch(headers: &HeaderMap, body: &[u8]) -> Result<ConfigPatch, ApiError> {
    if !is_json(headers) {
        return Err(ApiError::UnsupportedMediaType);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|_| ApiError::BadRequest("Malformed JSON".into()))?;

    match value {
        Value::Null => Err(ApiError::BadRequest("No data provided".into())),
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| ApiError::BadRequest(format!("Invalid configuration: {}", e))),
        _ => Err(ApiError::BadRequest(
            "Request body must be a JSON object".into(),
        )),
    }
}

/// `application/json` or any `application/*+json` media type.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GameStatus;
    use axum::http::HeaderValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(&headers("application/json")));
        assert!(is_json(&headers("application/json; charset=utf-8")));
        assert!(is_json(&headers("application/merge-patch+json")));
        assert!(!is_json(&headers("text/plain")));
        assert!(!is_json(&HeaderMap::new()));
    }

    #[test]
    fn test_parse_patch() {
        let json = headers("application/json");

        assert_eq!(parse_patch(&json, b"{}").unwrap(), ConfigPatch::default());
        assert!(matches!(
            parse_patch(&json, b"{\"invalid\": json}"),
            Err(ApiError::BadRequest(msg)) if msg == "Malformed JSON"
        ));
        assert!(matches!(
            parse_patch(&json, b""),
            Err(ApiError::BadRequest(msg)) if msg == "Malformed JSON"
        ));
        assert!(matches!(
            parse_patch(&json, b"null"),
            Err(ApiError::BadRequest(msg)) if msg == "No data provided"
        ));
        assert!(matches!(parse_patch(&json, b"[1]"), Err(ApiError::BadRequest(_))));
        assert!(matches!(
            parse_patch(&json, b"{\"log_directory\": 5}"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            parse_patch(&headers("text/plain"), b"{}"),
            Err(ApiError::UnsupportedMediaType)
        ));
    }

    #[test]
    fn test_status_codes() {
        let ok = StatusReport::new(StatusState::Ok, GameStatus::no_game_data("g.txt"));
        assert_eq!(status_code(&ok), StatusCode::OK);
        let missing = StatusReport::new(
            StatusState::ConfiguredFileMissing,
            GameStatus::error("Configured log file not found: g.txt", Some("g.txt".into())),
        );
        assert_eq!(status_code(&missing), StatusCode::NOT_FOUND);
        assert_eq!(
            status_code(&StatusReport::parse_failure("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
