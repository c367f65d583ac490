pub mod handlers;
pub mod types;

use crate::{
    Error, Result, config::Config, inference::InferenceService, model::QuantizedModel,
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    let model_dir = std::env::var("MODEL_DIR").unwrap_or_else(|_| config.server.model_dir.clone());
    info!("Loading model from {}", model_dir);

    // Loaded once; lives as long as the process
    let model_config = config.model.clone();
    let model = tokio::task::spawn_blocking(move || QuantizedModel::load(&model_dir, &model_config))
        .await
        .map_err(|e| Error::internal(format!("Model loading task failed: {}", e)))??;

    let app_state = AppState {
        inference: Arc::new(InferenceService::new(
            Arc::new(model),
            config.model.max_new_tokens,
        )),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .route("/predict", post(handlers::predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
