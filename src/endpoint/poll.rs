use crate::{Error, Result};
use std::{future::Future, time::Duration};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

/// Result of a single poll attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T> {
    Ready(T),
    Pending,
}

/// Calls `attempt` until it yields [`PollOutcome::Ready`], sleeping `delay` between
/// pending attempts. An `Err` from `attempt` stops polling immediately.
pub async fn poll_until<T, F, Fut>(policy: RetryPolicy, mut attempt: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<PollOutcome<T>>>,
{
    for n in 1..=policy.max_attempts {
        match attempt(n).await? {
            PollOutcome::Ready(value) => return Ok(value),
            PollOutcome::Pending if n < policy.max_attempts => {
                debug!(
                    "Attempt {}/{} pending, retrying in {:?}",
                    n, policy.max_attempts, policy.delay
                );
                tokio::time::sleep(policy.delay).await;
            }
            PollOutcome::Pending => {}
        }
    }

    Err(Error::Timeout {
        attempts: policy.max_attempts,
    })
}
