use crate::config::EndpointConfig;
use serde::{Deserialize, Serialize};

/// Body of `POST /v2/endpoint/{username}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEndpointRequest {
    pub account_id: Option<String>,
    pub compute: Compute,
    pub model: ModelSpec,
    pub name: String,
    pub provider: Provider,
    #[serde(rename = "type")]
    pub endpoint_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compute {
    pub accelerator: String,
    pub instance_size: String,
    pub instance_type: String,
    pub scaling: Scaling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scaling {
    pub max_replica: u32,
    pub min_replica: u32,
    pub scale_to_zero_timeout: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub framework: String,
    pub image: Image,
    pub repository: String,
    pub revision: Option<String>,
    pub task: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub custom: CustomImage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomImage {
    pub url: String,
    pub health_route: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub region: String,
    pub vendor: String,
}

impl CreateEndpointRequest {
    pub fn new(name: &str, repository: &str, config: &EndpointConfig) -> Self {
        Self {
            account_id: None,
            compute: Compute {
                accelerator: config.compute.accelerator.clone(),
                instance_size: config.compute.instance_size.clone(),
                instance_type: config.compute.instance_type.clone(),
                scaling: Scaling {
                    max_replica: config.compute.max_replica,
                    min_replica: config.compute.min_replica,
                    scale_to_zero_timeout: config.compute.scale_to_zero_timeout,
                },
            },
            model: ModelSpec {
                framework: "custom".to_string(),
                image: Image {
                    custom: CustomImage {
                        url: config.image.url.clone(),
                        health_route: config.image.health_route.clone(),
                    },
                },
                repository: repository.to_string(),
                revision: None,
                task: config.task.clone(),
            },
            name: name.to_string(),
            provider: Provider {
                region: config.provider.region.clone(),
                vendor: config.provider.vendor.clone(),
            },
            endpoint_type: config.endpoint_type.clone(),
        }
    }
}

/// Lifecycle states reported in `status.state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndpointState {
    Pending,
    Initializing,
    Updating,
    UpdateFailed,
    Running,
    Paused,
    Failed,
    ScaledToZero,
    #[serde(other)]
    Unknown,
}

impl EndpointState {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::UpdateFailed)
    }
}
