use super::gateway::Gateway;
use crate::{
    clock::Clock,
    error::{GenerationError, Result},
    models::VideoOperation,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Bounds for waiting on a long-running job. `None` disables a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: Some(120),
            timeout: Some(Duration::from_secs(20 * 60)),
        }
    }
}

impl PollPolicy {
    /// Fixed-interval polling with no escape hatch other than cancellation.
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            timeout: None,
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Re-checks `operation` every `policy.interval` until it reports done.
///
/// Returns the finished operation and the number of delayed re-checks made.
/// A job that finished on submission is returned without sleeping.
pub async fn wait_for_completion(
    gateway: &dyn Gateway,
    clock: &dyn Clock,
    policy: &PollPolicy,
    cancel: &CancellationToken,
    mut operation: VideoOperation,
) -> Result<(VideoOperation, u32)> {
    let started = clock.elapsed();
    let mut checks = 0u32;

    while !operation.done {
        if cancel.is_cancelled() {
            return Err(GenerationError::Cancelled);
        }
        if let Some(max) = policy.max_attempts {
            if checks >= max {
                log::warn!("Giving up on {} after {} checks", operation.name, checks);
                return Err(GenerationError::PollLimitExceeded { attempts: checks });
            }
        }
        if let Some(timeout) = policy.timeout {
            let waited = clock.elapsed().saturating_sub(started);
            if waited + policy.interval > timeout {
                log::warn!("Giving up on {} after {:?}", operation.name, waited);
                return Err(GenerationError::PollTimeout(timeout));
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(GenerationError::Cancelled),
            _ = clock.sleep(policy.interval) => {}
        }

        operation = tokio::select! {
            _ = cancel.cancelled() => return Err(GenerationError::Cancelled),
            next = gateway.get_video_operation(&operation) => next?,
        };
        checks += 1;
        log::debug!(
            "Video job {} check #{}: done={}",
            operation.name,
            checks,
            operation.done
        );
    }

    if let Some(error) = &operation.error {
        return Err(GenerationError::JobFailed(format!(
            "{} (code {})",
            error.message, error.code
        )));
    }

    Ok((operation, checks))
}
