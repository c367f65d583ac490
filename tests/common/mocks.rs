use async_trait::async_trait;
use hf_deploy::{
    Result,
    endpoint::{CreateEndpointRequest, EndpointApi},
    model::{ChatMessage, ChatTemplateKind, LanguageModel},
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const MOCK_EOS: &str = "</s>";

/// Mock model: one token per character, generation appends a fixed reply and EOS.
#[derive(Debug)]
pub struct MockLanguageModel {
    pub reply: String,
    pub prompts: Mutex<Vec<String>>,
    pub budgets: Mutex<Vec<usize>>,
}

impl MockLanguageModel {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
            budgets: Mutex::new(Vec::new()),
        }
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn get_budgets(&self) -> Vec<usize> {
        self.budgets.lock().unwrap().clone()
    }
}

impl LanguageModel for MockLanguageModel {
    fn encode(&self, text: &str, _add_special_tokens: bool) -> Result<Vec<u32>> {
        Ok(text.chars().map(u32::from).collect())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        Ok(ids.iter().filter_map(|&id| char::from_u32(id)).collect())
    }

    fn generate(&self, input_ids: &[u32], max_new_tokens: usize) -> Result<Vec<u32>> {
        self.prompts.lock().unwrap().push(self.decode(input_ids)?);
        self.budgets.lock().unwrap().push(max_new_tokens);

        let generated = format!("{}{}", self.reply, MOCK_EOS);
        let mut out = input_ids.to_vec();
        out.extend(generated.chars().map(u32::from).take(max_new_tokens));
        Ok(out)
    }

    fn apply_chat_template(&self, messages: &[ChatMessage]) -> String {
        ChatTemplateKind::Llama3.apply(messages)
    }

    fn eos_token(&self) -> &str {
        MOCK_EOS
    }
}

/// Mock endpoint API replaying a scripted sequence of status payloads.
///
/// The last payload repeats once the script runs out.
#[derive(Debug)]
pub struct MockEndpointApi {
    pub create_response: Value,
    pub statuses: Mutex<VecDeque<Value>>,
    pub create_requests: Mutex<Vec<CreateEndpointRequest>>,
    pub get_calls: Mutex<Vec<String>>,
}

impl MockEndpointApi {
    pub fn new(create_response: Value) -> Self {
        Self {
            create_response,
            statuses: Mutex::new(VecDeque::new()),
            create_requests: Mutex::new(Vec::new()),
            get_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_statuses(self, statuses: Vec<Value>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn get_count(&self) -> usize {
        self.get_calls.lock().unwrap().len()
    }

    pub fn create_count(&self) -> usize {
        self.create_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl EndpointApi for MockEndpointApi {
    async fn create_endpoint(&self, request: &CreateEndpointRequest) -> Result<Value> {
        self.create_requests.lock().unwrap().push(request.clone());
        Ok(self.create_response.clone())
    }

    async fn get_endpoint(&self, name: &str) -> Result<Value> {
        self.get_calls.lock().unwrap().push(name.to_string());

        let mut statuses = self.statuses.lock().unwrap();
        let next = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        Ok(next.unwrap_or(Value::Null))
    }
}
