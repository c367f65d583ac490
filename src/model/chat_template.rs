//! Chat templates for turning role-tagged messages into a model prompt.
//!
//! Every template ends with the assistant header so the model continues
//! with the assistant's turn.

use super::ChatMessage;
use serde::{Deserialize, Serialize};

/// Prompt format families supported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatTemplateKind {
    /// Llama 3.x instruct format.
    #[default]
    Llama3,
    /// `<|im_start|>` / `<|im_end|>` format used by Qwen and many fine-tunes.
    ChatMl,
    /// `[INST] ... [/INST]` format.
    Mistral,
    /// Message contents joined by newlines, for base models.
    Raw,
}

impl ChatTemplateKind {
    pub fn apply(&self, messages: &[ChatMessage]) -> String {
        match self {
            Self::Llama3 => llama3(messages),
            Self::ChatMl => chatml(messages),
            Self::Mistral => mistral(messages),
            Self::Raw => raw(messages),
        }
    }

    /// End-of-sequence marker used when the checkpoint does not name one.
    pub fn default_eos_token(&self) -> &'static str {
        match self {
            Self::Llama3 => "<|eot_id|>",
            Self::ChatMl => "<|im_end|>",
            Self::Mistral | Self::Raw => "</s>",
        }
    }
}

fn llama3(messages: &[ChatMessage]) -> String {
    let mut prompt = String::from("<|begin_of_text|>");
    for msg in messages {
        prompt.push_str("<|start_header_id|>");
        prompt.push_str(&msg.role);
        prompt.push_str("<|end_header_id|>\n\n");
        prompt.push_str(&msg.content);
        prompt.push_str("<|eot_id|>");
    }
    prompt.push_str("<|start_header_id|>assistant<|end_header_id|>\n\n");
    prompt
}

fn chatml(messages: &[ChatMessage]) -> String {
    let mut prompt = String::new();
    for msg in messages {
        prompt.push_str("<|im_start|>");
        prompt.push_str(&msg.role);
        prompt.push('\n');
        prompt.push_str(&msg.content);
        prompt.push_str("<|im_end|>\n");
    }
    prompt.push_str("<|im_start|>assistant\n");
    prompt
}

fn mistral(messages: &[ChatMessage]) -> String {
    let mut prompt = String::from("<s>");
    let mut i = 0;
    while i < messages.len() {
        let msg = &messages[i];
        if msg.role == "assistant" {
            prompt.push_str(&msg.content);
            prompt.push_str("</s>");
        } else {
            prompt.push_str("[INST] ");
            // a system message is folded into the user turn that follows it
            if msg.role == "system" {
                prompt.push_str(&msg.content);
                prompt.push('\n');
                if i + 1 < messages.len() && messages[i + 1].role == "user" {
                    i += 1;
                    prompt.push_str(&messages[i].content);
                }
            } else {
                prompt.push_str(&msg.content);
            }
            prompt.push_str(" [/INST]");
        }
        i += 1;
    }
    prompt
}

fn raw(messages: &[ChatMessage]) -> String {
    let mut prompt = messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    prompt.push('\n');
    prompt
}
