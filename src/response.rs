//! Standard response envelope helpers. Envelopes are assembled here, at the
//! transport boundary; the core only produces the `data` payload or raises a
//! failure.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;

/// Success envelope: `{ data, message, statusCode, timestamp }`.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub data: T,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub timestamp: String,
}

pub fn success<T: Serialize>(
    status: StatusCode,
    message: &str,
    data: T,
) -> (StatusCode, Json<Envelope<T>>) {
    (
        status,
        Json(Envelope {
            data,
            message: message.to_string(),
            status_code: status.as_u16(),
            timestamp: Utc::now().to_rfc3339(),
        }),
    )
}

pub fn success_ok<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    success(StatusCode::OK, message, data)
}

pub fn success_created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    success(StatusCode::CREATED, message, data)
}

/// Failure message: a single string, or one string per failing field.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// Failure envelope: `{ statusCode, timestamp, path, message }`.
#[derive(Serialize)]
pub struct FailureEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub timestamp: String,
    pub path: String,
    pub message: ErrorMessage,
}

pub fn failure(status: StatusCode, path: &str, message: ErrorMessage) -> FailureEnvelope {
    FailureEnvelope {
        status_code: status.as_u16(),
        timestamp: Utc::now().to_rfc3339(),
        path: path.to_string(),
        message,
    }
}

/// Set by `AppError::into_response` so the envelope layer can rebuild the
/// body with the request path filled in.
#[derive(Clone)]
pub struct ErrorParts {
    pub message: ErrorMessage,
}

/// Boundary middleware: captures the request path and rewrites failure
/// bodies raised as `AppError` so the envelope carries the path.
pub async fn error_envelope_layer(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let mut res = next.run(req).await;
    if let Some(parts) = res.extensions_mut().remove::<ErrorParts>() {
        let status = res.status();
        return (status, Json(failure(status, &path, parts.message))).into_response();
    }
    res
}
