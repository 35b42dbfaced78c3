//! Payment CRUD handlers: create, read, update, delete, list. Validation of
//! the decorated input shapes and envelope assembly both happen here, at the
//! boundary; the service only sees well-formed bodies.

use crate::error::AppError;
use crate::response;
use crate::service::InputValidator;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::BadRequest("invalid id".into()))
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let body = body_to_map(body)?;
    InputValidator::validate(&body, &state.payments.crud().definition().create_input)?;
    let payment = state.payments.create(body).await?;
    Ok(response::success_created("Payment created successfully", payment))
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let listed = state.payments.find_all().await?;
    Ok(response::success_ok("Payments retrieved successfully", listed))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let payment = state.payments.find_one(id).await?;
    Ok(response::success_ok("Payment retrieved successfully", payment))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = body_to_map(body)?;
    InputValidator::validate_partial(&body, &state.payments.crud().definition().update_input)?;
    let payment = state.payments.update(id, body).await?;
    Ok(response::success_ok("Payment updated successfully", payment))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let ack = state.payments.remove(id).await?;
    Ok(response::success_ok("Payment deleted successfully", ack))
}
