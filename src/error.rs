//! Typed errors and HTTP mapping.

use crate::response::{failure, ErrorMessage, ErrorParts};
use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Error taxonomy surfaced to the transport boundary. All variants propagate
/// unrecovered; the boundary maps them to status codes. Configuration
/// problems are diagnostics (`SchemaDiagnostic`), logged rather than raised.
#[derive(Error, Debug)]
pub enum AppError {
    /// Store lookup by id yielded nothing. Terminal, non-retryable.
    #[error("{resource} with id {id} not found")]
    NotFound { resource: String, id: i64 },

    /// One message per failing field, in mapping-table declaration order.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Resource-specific invariant violation; client-correctable, distinct
    /// from NotFound.
    #[error("{0}")]
    BusinessRule(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("store: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn not_found(resource: &str, id: i64) -> Self {
        AppError::NotFound { resource: resource.to_string(), id }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BusinessRule(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> ErrorMessage {
        match self {
            AppError::Validation(messages) => ErrorMessage::Many(messages.clone()),
            other => ErrorMessage::One(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        // Path is unknown here; the envelope layer rewrites the body with it.
        let body = failure(status, "", message.clone());
        let mut res = (status, Json(body)).into_response();
        res.extensions_mut().insert(ErrorParts { message });
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(AppError::not_found("payment", 9).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Validation(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::BusinessRule("amount must be positive".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Store(StoreError::Unavailable("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_names_resource_and_id() {
        let err = AppError::not_found("payment", 999);
        assert_eq!(err.to_string(), "payment with id 999 not found");
    }

    #[test]
    fn validation_message_lists_every_field() {
        let err = AppError::Validation(vec![
            "amount is required".into(),
            "currency is required".into(),
        ]);
        assert_eq!(err.to_string(), "validation failed: amount is required; currency is required");
    }
}
