mod chat_template;
mod quantized;

pub use chat_template::ChatTemplateKind;
pub use quantized::QuantizedModel;

use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A role-tagged chat message.
///
/// Keys other than `role` and `content` are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_extra_keys_survive_a_round_trip() {
        let raw = json!({ "role": "user", "content": "hi", "name": "alice", "meta": { "id": 3 } });

        let message: ChatMessage = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(message.extra["name"], "alice");

        assert_eq!(serde_json::to_value(&message).unwrap(), raw);
    }

    #[test]
    fn test_new_message_has_no_extra_keys() {
        let message = ChatMessage::new("assistant", "ok");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "role": "assistant", "content": "ok" })
        );
    }
}

/// A loaded model and its tokenizer.
///
/// Implementations are shared across request handlers and must serialize
/// whatever internal state generation mutates.
pub trait LanguageModel: Send + Sync {
    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>>;

    /// Decodes ids to text, keeping special tokens.
    fn decode(&self, ids: &[u32]) -> Result<String>;

    /// Returns `input_ids` followed by at most `max_new_tokens` generated ids.
    fn generate(&self, input_ids: &[u32], max_new_tokens: usize) -> Result<Vec<u32>>;

    /// Renders messages with the generation prompt appended.
    fn apply_chat_template(&self, messages: &[ChatMessage]) -> String;

    fn eos_token(&self) -> &str;
}
