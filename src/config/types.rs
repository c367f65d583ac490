use crate::model::ChatTemplateKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default = "default_model_dir")]
    pub model_dir: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_max_seq_length")]
    pub max_seq_length: usize,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: usize,
    #[serde(default)]
    pub chat_template: ChatTemplateKind,
    /// Overrides the end-of-sequence marker found in the checkpoint.
    #[serde(default)]
    pub eos_token: Option<String>,
    /// `None` means greedy decoding.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub top_p: Option<f64>,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub compute: ComputeConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default = "default_endpoint_type")]
    pub endpoint_type: String,
    #[serde(default = "default_task")]
    pub task: String,
    #[serde(default)]
    pub poll: PollConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeConfig {
    #[serde(default = "default_accelerator")]
    pub accelerator: String,
    #[serde(default = "default_instance_size")]
    pub instance_size: String,
    #[serde(default = "default_instance_type")]
    pub instance_type: String,
    #[serde(default)]
    pub min_replica: u32,
    #[serde(default = "default_max_replica")]
    pub max_replica: u32,
    /// Minutes of inactivity before the endpoint scales to zero.
    #[serde(default = "default_scale_to_zero_timeout")]
    pub scale_to_zero_timeout: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_image_url")]
    pub url: String,
    #[serde(default = "default_health_route")]
    pub health_route: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_vendor")]
    pub vendor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
            model_dir: default_model_dir(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_seq_length: default_max_seq_length(),
            max_new_tokens: default_max_new_tokens(),
            chat_template: ChatTemplateKind::default(),
            eos_token: None,
            temperature: None,
            top_p: None,
            seed: default_seed(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            compute: ComputeConfig::default(),
            image: ImageConfig::default(),
            provider: ProviderConfig::default(),
            endpoint_type: default_endpoint_type(),
            task: default_task(),
            poll: PollConfig::default(),
        }
    }
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            accelerator: default_accelerator(),
            instance_size: default_instance_size(),
            instance_type: default_instance_type(),
            min_replica: 0,
            max_replica: default_max_replica(),
            scale_to_zero_timeout: default_scale_to_zero_timeout(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            url: default_image_url(),
            health_route: default_health_route(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            vendor: default_vendor(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_secs: default_delay_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    80
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_dir() -> String {
    "/repository".to_string()
}

fn default_max_seq_length() -> usize {
    2048
}

fn default_max_new_tokens() -> usize {
    crate::templates::DEFAULT_MAX_NEW_TOKENS
}

fn default_seed() -> u64 {
    299792458
}

fn default_api_base() -> String {
    "https://api.endpoints.huggingface.cloud".to_string()
}

fn default_endpoint_type() -> String {
    "public".to_string()
}

fn default_task() -> String {
    "text-generation".to_string()
}

fn default_accelerator() -> String {
    "gpu".to_string()
}

fn default_instance_size() -> String {
    "x1".to_string()
}

fn default_instance_type() -> String {
    "nvidia-t4".to_string()
}

fn default_max_replica() -> u32 {
    1
}

fn default_scale_to_zero_timeout() -> u32 {
    15
}

fn default_image_url() -> String {
    "docker.io/kmahorker/unsloth-hf-inference:latest".to_string()
}

fn default_health_route() -> String {
    "/health".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_vendor() -> String {
    "aws".to_string()
}

fn default_max_attempts() -> u32 {
    200
}

fn default_delay_secs() -> u64 {
    10
}
