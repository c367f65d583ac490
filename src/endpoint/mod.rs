mod client;
mod poll;
mod provisioner;
mod types;

pub use client::{API_KEY_VAR, ApiKey, EndpointApi, HfEndpointClient};
pub use poll::{PollOutcome, RetryPolicy, poll_until};
pub use provisioner::{Provisioner, classify_status};
pub use types::{
    Compute, CreateEndpointRequest, CustomImage, EndpointState, Image, ModelSpec, Provider,
    Scaling,
};
