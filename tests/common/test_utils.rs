use super::mocks::MockLanguageModel;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use hf_deploy::{
    endpoint::RetryPolicy,
    inference::InferenceService,
    server::{handlers::AppState, router},
    templates::DEFAULT_MAX_NEW_TOKENS,
};
use serde_json::{Value, json};
use std::{sync::Arc, time::Duration};

/// Builds the real router around a mock model that always answers `reply`.
pub fn create_test_app(reply: &str) -> (Router, Arc<MockLanguageModel>) {
    let model = Arc::new(MockLanguageModel::new(reply));
    let app_state = AppState {
        inference: Arc::new(InferenceService::new(
            model.clone(),
            DEFAULT_MAX_NEW_TOKENS,
        )),
    };
    (router(app_state), model)
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Polls without waiting between attempts.
pub fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::ZERO)
}

pub fn status(state: &str) -> Value {
    json!({ "name": "test-endpoint", "status": { "state": state } })
}
