//! Payment CRUD routes.

use crate::handlers::payment::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn payment_routes(state: AppState) -> Router {
    Router::new()
        .route("/payments", get(list).post(create))
        .route("/payments/:id", get(read).patch(update).delete(delete_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments;
    use crate::response::error_envelope_layer;
    use crate::schema::DocRegistry;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::middleware;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let mut docs = DocRegistry::new();
        let payments = Arc::new(payments::build(Arc::new(MemoryStore::new()), &mut docs));
        let state = AppState { payments, docs: Arc::new(docs) };
        payment_routes(state).layer(middleware::from_fn(error_envelope_layer))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_returns_enveloped_payment() {
        let app = app();
        let res = app
            .oneshot(post_json(
                "/payments",
                json!({
                    "amount": 99.99,
                    "currency": "USD",
                    "customerEmail": "a@b.com",
                    "customerName": "A B",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = body_json(res).await;
        assert_eq!(body["statusCode"], 201);
        assert_eq!(body["message"], "Payment created successfully");
        assert_eq!(body["data"]["status"], "pending");
        assert_eq!(body["data"]["id"], 1);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn validation_failure_lists_fields_and_carries_the_path() {
        let app = app();
        let res = app
            .oneshot(post_json("/payments", json!({"amount": 10.0})))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["path"], "/payments");
        assert_eq!(
            body["message"],
            json!([
                "currency is required",
                "customerEmail is required",
                "customerName is required",
            ])
        );
    }

    #[tokio::test]
    async fn missing_payment_maps_to_not_found_envelope() {
        let app = app();
        let res = app
            .oneshot(Request::builder().uri("/payments/999").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_json(res).await;
        assert_eq!(body["path"], "/payments/999");
        assert_eq!(body["message"], "payment with id 999 not found");
    }
}
