//! Bounded retry with exponential backoff.
//!
//! Used where the surrounding environment may not be ready yet, such as a
//! snapshot file the browser is still writing. The extraction core itself
//! never retries.

use std::thread;
use std::time::Duration;

use tracing::debug;

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (treated as at least 1).
    pub max_attempts: usize,
    /// Wait before the first retry, in milliseconds.
    pub initial_backoff_ms: u64,
    /// Upper bound for any single wait, in milliseconds.
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 250,
            max_backoff_ms: 2_000,
        }
    }
}

impl RetryPolicy {
    /// A policy that keeps trying for roughly `total` before giving up.
    ///
    /// Once the backoff reaches its cap the remaining attempts are counted
    /// directly, so a huge `total` costs no more than a small one.
    #[must_use]
    pub fn within(total: Duration) -> Self {
        let policy = Self::default();
        let cap = policy.max_backoff_ms.max(policy.initial_backoff_ms).max(1);
        let budget = u64::try_from(total.as_millis()).unwrap_or(u64::MAX);

        let mut attempts: usize = 1;
        let mut waited = 0u64;
        while waited < budget {
            let wait = policy.backoff_ms(attempts - 1);
            if wait >= cap {
                let remaining = (budget - waited).div_ceil(cap);
                attempts = attempts.saturating_add(usize::try_from(remaining).unwrap_or(usize::MAX));
                break;
            }
            waited += wait;
            attempts += 1;
        }

        Self {
            max_attempts: attempts,
            ..policy
        }
    }

    /// Wait before retry number `retry_index` (0-based).
    #[must_use]
    pub fn backoff_ms(&self, retry_index: usize) -> u64 {
        let cap = self.max_backoff_ms.max(self.initial_backoff_ms);
        let shift = u32::try_from(retry_index.min(20)).unwrap_or(20);
        let factor = 1u64.checked_shl(shift).unwrap_or(u64::MAX);
        self.initial_backoff_ms.saturating_mul(factor).min(cap)
    }
}

/// Run `op` until it succeeds or the attempt budget is spent.
///
/// Returns the last error when every attempt failed.
pub fn retry<T, E, F>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(usize) -> Result<T, E>,
    E: std::fmt::Display,
{
    retry_with_sleep(policy, &mut op, thread::sleep)
}

fn retry_with_sleep<T, E, F, S>(policy: &RetryPolicy, op: &mut F, mut sleep: S) -> Result<T, E>
where
    F: FnMut(usize) -> Result<T, E>,
    E: std::fmt::Display,
    S: FnMut(Duration),
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= attempts => return Err(err),
            Err(err) => {
                let wait = policy.backoff_ms(attempt - 1);
                debug!(attempt, max_attempts = attempts, wait_ms = wait, error = %err, "retrying");
                sleep(Duration::from_millis(wait));
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_up_to_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_ms(0), 250);
        assert_eq!(policy.backoff_ms(1), 500);
        assert_eq!(policy.backoff_ms(2), 1_000);
        assert_eq!(policy.backoff_ms(3), 2_000);
        assert_eq!(policy.backoff_ms(10), 2_000);
    }

    #[test]
    fn stops_after_budget_with_last_error() {
        let policy = RetryPolicy {
            max_attempts: 3,
            ..RetryPolicy::default()
        };
        let mut waits = Vec::new();
        let result: Result<(), String> =
            retry_with_sleep(&policy, &mut |n| Err(format!("attempt {n}")), |d| waits.push(d));

        assert_eq!(result.unwrap_err(), "attempt 3");
        assert_eq!(waits, [Duration::from_millis(250), Duration::from_millis(500)]);
    }

    #[test]
    fn returns_first_success() {
        let mut waits = 0;
        let result: Result<usize, String> = retry_with_sleep(
            &RetryPolicy::default(),
            &mut |n| if n < 2 { Err("not yet".to_string()) } else { Ok(n) },
            |_| waits += 1,
        );
        assert_eq!(result.unwrap(), 2);
        assert_eq!(waits, 1);
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        let result: Result<(), &str> = retry_with_sleep(&policy, &mut |_| Err("no"), |_| {});
        assert_eq!(result, Err("no"));
    }

    #[test]
    fn within_covers_requested_duration() {
        assert_eq!(RetryPolicy::within(Duration::ZERO).max_attempts, 1);
        assert_eq!(RetryPolicy::within(Duration::from_millis(1)).max_attempts, 2);

        // 250 + 500 + 1000 + 2000 + 2000 >= 5000
        let policy = RetryPolicy::within(Duration::from_secs(5));
        assert_eq!(policy.max_attempts, 6);
        let total: u64 = (0..policy.max_attempts - 1).map(|i| policy.backoff_ms(i)).sum();
        assert!(total >= 5_000);
    }

    #[test]
    fn within_huge_duration_returns_immediately() {
        let start = std::time::Instant::now();
        let policy = RetryPolicy::within(Duration::from_secs(u64::MAX));
        assert!(start.elapsed() < Duration::from_secs(1));
        assert!(policy.max_attempts > 1_000_000);

        let hour = RetryPolicy::within(Duration::from_secs(3_600));
        assert_eq!(hour.max_attempts, 4 + (3_600_000 - 1_750_u64).div_ceil(2_000) as usize);
    }
}
