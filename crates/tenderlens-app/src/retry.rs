use crate::error::ProcessError;
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Retries recoverable failures with exponential backoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub attempts: u32,
    /// Delay before the second attempt; doubled for each further one.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    pub fn no_delay(attempts: u32) -> Self {
        Self {
            attempts,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay after the failed `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    pub fn run<T>(
        &self,
        mut op: impl FnMut(u32) -> Result<T, ProcessError>,
    ) -> Result<T, ProcessError> {
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_recoverable() && attempt < self.attempts => {
                    let delay = self.delay_after(attempt);
                    warn!(attempt, ?delay, error = %err, "recoverable failure; retrying");
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::MessageKind;
    use tenderlens_core::LookupError;

    fn timeout() -> ProcessError {
        ProcessError::Lookup {
            stage: "load tender",
            source: LookupError::Timeout {
                store: "tenders",
                detail: "slow".to_string(),
            },
        }
    }

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy {
            attempts: 5,
            base_delay: Duration::from_millis(100),
        };
        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(2), Duration::from_millis(200));
        assert_eq!(policy.delay_after(4), Duration::from_millis(800));
    }

    #[test]
    fn recoverable_errors_are_retried_until_success() {
        let mut calls = 0;
        let result = RetryPolicy::no_delay(5).run(|attempt| {
            calls += 1;
            if attempt < 3 { Err(timeout()) } else { Ok(attempt) }
        });
        assert_eq!(result.expect("third attempt succeeds"), 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn attempts_are_bounded() {
        let mut calls = 0;
        let result: Result<(), _> = RetryPolicy::no_delay(5).run(|_| {
            calls += 1;
            Err(timeout())
        });
        assert!(result.is_err());
        assert_eq!(calls, 5);
    }

    #[test]
    fn unrecoverable_errors_fail_immediately() {
        let mut calls = 0;
        let result: Result<(), _> = RetryPolicy::no_delay(5).run(|_| {
            calls += 1;
            Err(ProcessError::MissingRecord {
                kind: MessageKind::Tender,
                id: "t1".to_string(),
            })
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
