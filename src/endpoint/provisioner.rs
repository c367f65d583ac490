use super::{
    client::EndpointApi,
    poll::{PollOutcome, RetryPolicy, poll_until},
    types::{CreateEndpointRequest, EndpointState},
};
use crate::{Error, Result, config::EndpointConfig};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Creates an inference endpoint and waits for it to come up.
pub struct Provisioner<A> {
    api: A,
    config: EndpointConfig,
    policy: RetryPolicy,
}

impl<A: EndpointApi> Provisioner<A> {
    pub fn new(api: A, config: EndpointConfig) -> Self {
        let policy = RetryPolicy::new(
            config.poll.max_attempts,
            Duration::from_secs(config.poll.delay_secs),
        );
        Self {
            api,
            config,
            policy,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Submits the creation request and returns the descriptor once the endpoint is running.
    pub async fn create_inference_endpoint(
        &self,
        endpoint_name: &str,
        repository: &str,
    ) -> Result<Value> {
        let request = CreateEndpointRequest::new(endpoint_name, repository, &self.config);

        info!(
            "Creating endpoint '{}' for repository {}",
            endpoint_name, repository
        );

        let out = self.api.create_endpoint(&request).await?;
        if let Some(error) = out.get("error") {
            return Err(Error::vendor(value_text(error)));
        }

        self.poll_endpoint_status(endpoint_name).await
    }

    pub async fn poll_endpoint_status(&self, endpoint_name: &str) -> Result<Value> {
        let endpoint = poll_until(self.policy, |attempt| async move {
            debug!(
                "Polling endpoint '{}' (attempt {}/{})",
                endpoint_name, attempt, self.policy.max_attempts
            );
            let info = self.api.get_endpoint(endpoint_name).await?;
            classify_status(info)
        })
        .await?;

        info!("Endpoint '{}' is running", endpoint_name);
        Ok(endpoint)
    }
}

/// Maps an endpoint descriptor to ready, pending, or a failure.
///
/// A descriptor without a readable `status.state` counts as pending.
pub fn classify_status(info: Value) -> Result<PollOutcome<Value>> {
    let Some(state) = info.get("status").and_then(|s| s.get("state")) else {
        warn!("Status not found in endpoint response, retrying: {}", info);
        return Ok(PollOutcome::Pending);
    };

    let state: EndpointState = match serde_json::from_value(state.clone()) {
        Ok(state) => state,
        Err(_) => {
            warn!("Unreadable endpoint state {}, retrying", state);
            return Ok(PollOutcome::Pending);
        }
    };

    if state == EndpointState::Running {
        return Ok(PollOutcome::Ready(info));
    }

    if state.is_failure() {
        let message = info
            .get("status")
            .and_then(|s| s.get("errorMessage"))
            .map(value_text)
            .unwrap_or_else(|| "no error message provided".to_string());
        return Err(Error::EndpointFailed { message });
    }

    debug!("Endpoint state is {:?}", state);
    Ok(PollOutcome::Pending)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
