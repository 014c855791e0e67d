//! Linear backoff for transient fetch failures.
//!
//! The decision of whether to try again is a pure function of the attempt
//! number, so the policy is testable without provoking real I/O failures.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

/// Default number of attempts per chunk.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay; attempt `n` waits `n × base`.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the given delay, then try again.
    Retry(Duration),
    /// Attempts are exhausted.
    GiveUp,
}

/// Bounded retry with linearly increasing delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one (at least 1).
    pub max_attempts: u32,
    /// Delay unit multiplied by the failed attempt's number.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BASE_DELAY)
    }
}

impl RetryPolicy {
    /// Create a policy; `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Decide what follows the failure of attempt number `attempt` (1-based).
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            RetryDecision::GiveUp
        } else {
            RetryDecision::Retry(self.delay_for_attempt(attempt))
        }
    }

    /// Delay after the failure of attempt number `attempt`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// All attempts failed; carries the last error.
#[derive(Debug)]
pub struct Exhausted<E> {
    /// Number of attempts made.
    pub attempts: u32,
    /// Error returned by the final attempt.
    pub last: E,
}

/// Run `op` until it succeeds or `policy` gives up.
///
/// `op` receives the 1-based attempt number. On success returns the value
/// and the number of attempts it took.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<(T, u32), Exhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok((value, attempt)),
            Err(err) => match policy.decide(attempt) {
                RetryDecision::Retry(delay) => {
                    warn!(
                        "Attempt {attempt}/{} failed: {err}; retrying in {delay:?}",
                        policy.max_attempts
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                RetryDecision::GiveUp => {
                    return Err(Exhausted {
                        attempts: attempt,
                        last: err,
                    });
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decide_is_linear_then_gives_up() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1000));
        assert_eq!(policy.decide(1), RetryDecision::Retry(Duration::from_millis(1000)));
        assert_eq!(policy.decide(2), RetryDecision::Retry(Duration::from_millis(2000)));
        assert_eq!(policy.decide(3), RetryDecision::GiveUp);
        assert_eq!(policy.decide(4), RetryDecision::GiveUp);
    }

    #[test]
    fn single_attempt_never_retries() {
        let policy = RetryPolicy::new(0, Duration::from_secs(1));
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.decide(1), RetryDecision::GiveUp);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_transient_failures() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let result = with_retry(&policy, |attempt| async move {
            if attempt < 3 { Err("flaky") } else { Ok(attempt * 10) }
        })
        .await;

        let (value, attempts) = result.unwrap();
        assert_eq!(value, 30);
        assert_eq!(attempts, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_with_last_error() {
        let policy = RetryPolicy::new(2, Duration::from_secs(1));
        let result: Result<((), u32), _> =
            with_retry(&policy, |attempt| async move { Err(format!("fail {attempt}")) }).await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts, 2);
        assert_eq!(err.last, "fail 2");
    }
}
