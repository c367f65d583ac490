use super::{ChatMessage, ChatTemplateKind, LanguageModel};
use crate::{Error, Result, config::ModelConfig};
use candle_core::{
    Device, Tensor,
    quantized::{GgmlDType, gguf_file},
};
use candle_transformers::{generation::LogitsProcessor, models::quantized_llama::ModelWeights};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

const TOKENIZER_FILE: &str = "tokenizer.json";
const TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";

/// 4-bit GGUF llama-family weights with a Hugging Face tokenizer.
pub struct QuantizedModel {
    // forward() mutates the KV cache, so one generation runs at a time
    weights: Mutex<ModelWeights>,
    tokenizer: Tokenizer,
    device: Device,
    chat_template: ChatTemplateKind,
    eos_token: String,
    eos_token_id: u32,
    max_seq_length: usize,
    temperature: Option<f64>,
    top_p: Option<f64>,
    seed: u64,
}

impl QuantizedModel {
    /// Loads `tokenizer.json` and the `.gguf` weights found in `model_dir`.
    pub fn load(model_dir: impl AsRef<Path>, config: &ModelConfig) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let weights_path = find_weights(model_dir)?;
        let device = Device::cuda_if_available(0)?;

        info!(
            "Loading weights from {} on {:?}",
            weights_path.display(),
            device
        );

        let mut file = fs::File::open(&weights_path)?;
        let content = gguf_file::Content::read(&mut file)?;

        let four_bit = content.tensor_infos.values().any(|t| {
            matches!(
                t.ggml_dtype,
                GgmlDType::Q4_0 | GgmlDType::Q4_1 | GgmlDType::Q4K
            )
        });
        if !four_bit {
            warn!(
                "{} contains no 4-bit tensors, memory use will be higher than expected",
                weights_path.display()
            );
        }

        let weights = ModelWeights::from_gguf(content, &mut file, &device)?;
        let tokenizer = Tokenizer::from_file(model_dir.join(TOKENIZER_FILE))?;

        let eos_token = match &config.eos_token {
            Some(token) => token.clone(),
            None => read_eos_token(model_dir)?
                .unwrap_or_else(|| config.chat_template.default_eos_token().to_string()),
        };
        let eos_token_id = tokenizer.token_to_id(&eos_token).ok_or_else(|| {
            Error::model(format!(
                "End-of-sequence token '{}' is not in the vocabulary",
                eos_token
            ))
        })?;

        info!(
            "Model loaded (eos: {}, max sequence length: {})",
            eos_token, config.max_seq_length
        );

        Ok(Self {
            weights: Mutex::new(weights),
            tokenizer,
            device,
            chat_template: config.chat_template,
            eos_token,
            eos_token_id,
            max_seq_length: config.max_seq_length,
            temperature: config.temperature,
            top_p: config.top_p,
            seed: config.seed,
        })
    }
}

impl LanguageModel for QuantizedModel {
    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<u32>> {
        let encoding = self.tokenizer.encode(text, add_special_tokens)?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        Ok(self.tokenizer.decode(ids, false)?)
    }

    fn generate(&self, input_ids: &[u32], max_new_tokens: usize) -> Result<Vec<u32>> {
        if input_ids.is_empty() {
            return Err(Error::model("Cannot generate from an empty prompt"));
        }
        let budget = generation_budget(input_ids.len(), max_new_tokens, self.max_seq_length)?;

        let mut weights = self
            .weights
            .lock()
            .map_err(|_| Error::internal("Model lock poisoned"))?;
        let mut logits_processor = LogitsProcessor::new(self.seed, self.temperature, self.top_p);
        let mut tokens = input_ids.to_vec();

        for index in 0..budget {
            // the first step feeds the whole prompt, later steps only the last token
            let (context, pos) = if index == 0 {
                (input_ids, 0)
            } else {
                (&tokens[tokens.len() - 1..], tokens.len() - 1)
            };
            let input = Tensor::new(context, &self.device)?.unsqueeze(0)?;
            let logits = weights.forward(&input, pos)?.squeeze(0)?;
            let next = logits_processor.sample(&logits)?;
            tokens.push(next);
            if next == self.eos_token_id {
                break;
            }
        }

        debug!(
            "Generated {} tokens from a {} token prompt",
            tokens.len() - input_ids.len(),
            input_ids.len()
        );
        Ok(tokens)
    }

    fn apply_chat_template(&self, messages: &[ChatMessage]) -> String {
        self.chat_template.apply(messages)
    }

    fn eos_token(&self) -> &str {
        &self.eos_token
    }
}

/// Number of tokens that may be generated without exceeding the sequence limit.
fn generation_budget(prompt_len: usize, max_new_tokens: usize, max_seq_length: usize) -> Result<usize> {
    if prompt_len >= max_seq_length {
        return Err(Error::model(format!(
            "Prompt of {} tokens exceeds the maximum sequence length of {}",
            prompt_len, max_seq_length
        )));
    }
    Ok(max_new_tokens.min(max_seq_length - prompt_len))
}

fn find_weights(model_dir: &Path) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(model_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "gguf"))
        .collect();
    candidates.sort();

    if candidates.len() > 1 {
        warn!(
            "Found {} .gguf files in {}, using {}",
            candidates.len(),
            model_dir.display(),
            candidates[0].display()
        );
    }

    candidates.into_iter().next().ok_or_else(|| {
        Error::model(format!("No .gguf weights found in {}", model_dir.display()))
    })
}

/// Reads `eos_token` from `tokenizer_config.json`, which may hold a string or `{"content": ..}`.
fn read_eos_token(model_dir: &Path) -> Result<Option<String>> {
    let path = model_dir.join(TOKENIZER_CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let config: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    let token = match config.get("eos_token") {
        Some(Value::String(token)) => Some(token.clone()),
        Some(Value::Object(token)) => token
            .get("content")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    };
    Ok(token)
}
