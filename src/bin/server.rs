//! Demo server: builds the payment resource over the in-memory store and
//! mounts common, docs, and payment routes.

use axum::{middleware, Router};
use scaffold_sdk::{
    common_routes, docs_routes, error_envelope_layer, payment_routes, payments, AppState,
    DocRegistry, MemoryStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("scaffold_sdk=info".parse()?))
        .init();

    let store = Arc::new(MemoryStore::new());
    let mut docs = DocRegistry::new();
    let payments = Arc::new(payments::build(store, &mut docs));
    let state = AppState {
        payments,
        docs: Arc::new(docs),
    };

    let app = Router::new()
        .merge(common_routes())
        .merge(docs_routes(state.clone()))
        .merge(payment_routes(state))
        .layer(middleware::from_fn(error_envelope_layer))
        .layer(TraceLayer::new_for_http());

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
