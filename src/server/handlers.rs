use super::types::{ChatInput, ChatResponse, ErrorResponse, Prediction, PredictionInput};
use crate::{Error, inference::InferenceService, model::ChatMessage};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub inference: Arc<InferenceService>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

pub async fn health() -> Json<&'static str> {
    Json("Running")
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatInput>,
) -> Result<Json<ChatResponse>, HandlerError> {
    info!("Received chat request with {} messages", request.messages.len());

    let max_tokens = request.config.as_ref().map(|c| c.max_tokens);
    let mut messages = request.messages;

    let inference = state.inference.clone();
    let history = messages.clone();
    let reply = tokio::task::spawn_blocking(move || inference.chat(&history, max_tokens))
        .await
        .map_err(|e| error_response(Error::internal(format!("Generation task failed: {}", e))))?
        .map_err(error_response)?;

    messages.push(ChatMessage::new("assistant", reply.clone()));

    Ok(Json(ChatResponse {
        last_message: reply,
        messages,
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionInput>,
) -> Result<Json<Prediction>, HandlerError> {
    info!("Received predict request for task type: {}", request.task_type);

    let max_tokens = request.config.as_ref().map(|c| c.max_tokens);
    let inference = state.inference.clone();
    let response = tokio::task::spawn_blocking(move || {
        inference.predict(request.task_type, &request.input, max_tokens)
    })
    .await
    .map_err(|e| error_response(Error::internal(format!("Generation task failed: {}", e))))?
    .map_err(error_response)?;

    Ok(Json(Prediction { response }))
}

fn error_response(e: Error) -> HandlerError {
    let status = match e {
        Error::InvalidInput { .. } => {
            warn!("Rejected request: {}", e);
            StatusCode::BAD_REQUEST
        }
        _ => {
            error!("Failed to process request: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            detail: e.to_string(),
        }),
    )
}
