//! Prompt preparation and output post-processing around a [`LanguageModel`].

use crate::{
    Error, Result,
    model::{ChatMessage, LanguageModel},
    templates::{TaskType, get_input_template},
};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

pub struct InferenceService {
    model: Arc<dyn LanguageModel>,
    default_max_new_tokens: usize,
}

impl InferenceService {
    pub fn new(model: Arc<dyn LanguageModel>, default_max_new_tokens: usize) -> Self {
        Self {
            model,
            default_max_new_tokens,
        }
    }

    /// Generates the assistant's reply to `messages`.
    pub fn chat(&self, messages: &[ChatMessage], max_tokens: Option<usize>) -> Result<String> {
        let prompt = self.model.apply_chat_template(messages);
        let input_ids = self.model.encode(&prompt, false)?;
        let max_new_tokens = max_tokens.unwrap_or(self.default_max_new_tokens);

        debug!(
            "Chat generation: {} messages, {} prompt tokens, max {} new tokens",
            messages.len(),
            input_ids.len(),
            max_new_tokens
        );

        let output = self.model.generate(&input_ids, max_new_tokens)?;
        let prediction = self.model.decode(&output)?;

        // TODO: slice past the prompt tokens as predict() does once callers confirm
        // they do not rely on the decoded prompt being removed textually.
        Ok(prediction
            .replace(&prompt, "")
            .replace(self.model.eos_token(), ""))
    }

    /// Fills the task's prompt template with `input` and returns the continuation.
    pub fn predict(
        &self,
        task_type: TaskType,
        input: &HashMap<String, Value>,
        max_tokens: Option<usize>,
    ) -> Result<String> {
        let template = get_input_template(task_type)?;

        if !template.accepts_fields(input.keys()) {
            return Err(Error::InvalidInput {
                required: template.required_fields(),
            });
        }

        let values: HashMap<String, String> = input
            .iter()
            .map(|(k, v)| (k.clone(), field_text(v)))
            .collect();
        let prompt = template.render_prompt(&values)?;

        let input_ids = self.model.encode(&prompt, true)?;
        let max_new_tokens = max_tokens.unwrap_or(self.default_max_new_tokens);

        debug!(
            "Predict generation: task {}, {} prompt tokens, max {} new tokens",
            task_type,
            input_ids.len(),
            max_new_tokens
        );

        let output = self.model.generate(&input_ids, max_new_tokens)?;
        let continuation = output.get(input_ids.len()..).unwrap_or_default();
        let prediction = self.model.decode(continuation)?;

        Ok(prediction.replace(self.model.eos_token(), ""))
    }
}

/// Renders a field value the way Python's `str()` prints scalars.
/// Arrays and objects are written as compact JSON.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}
