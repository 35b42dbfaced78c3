//! Documentation route: serves the declared shape metadata of every
//! registered resource. Rendering is the consumer's job.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::Value;

async fn docs(State(state): State<AppState>) -> Json<Value> {
    Json(state.docs.to_document())
}

pub fn docs_routes(state: AppState) -> Router {
    Router::new().route("/docs", get(docs)).with_state(state)
}
