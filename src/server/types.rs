use crate::{model::ChatMessage, templates::TaskType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_tokens: usize,
}

#[derive(Debug, Deserialize)]
pub struct PredictionInput {
    pub input: HashMap<String, Value>,
    pub task_type: TaskType,
    #[serde(default)]
    pub config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Prediction {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatInput {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub last_message: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
