use std::thread;
use std::time::Duration;

use log::warn;

use crate::config::RetryPolicy;
use crate::error::PersistenceError;

/// Reintenta `f` mientras falle con un error transitorio, con backoff lineal.
pub(crate) fn with_retry<F, T>(policy: RetryPolicy, mut f: F) -> Result<T, PersistenceError>
    where F: FnMut() -> Result<T, PersistenceError>
{
    let mut attempts = 0;
    loop {
        match f() {
            Err(e) if e.is_retryable() && attempts < policy.retries => {
                let delay_ms = backoff_delay_ms(policy, attempts + 1);
                warn!("retryable error (attempt {}): {} -> sleeping {}ms",
                      attempts + 1,
                      e,
                      delay_ms);
                thread::sleep(Duration::from_millis(delay_ms));
                attempts += 1;
            }
            r => return r,
        }
    }
}

/// Espera antes del intento `attempt` (1-based). Satura en vez de desbordar.
fn backoff_delay_ms(policy: RetryPolicy, attempt: u32) -> u64 {
    policy.backoff_ms.saturating_mul(u64::from(attempt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn transient() -> PersistenceError {
        PersistenceError::io("rec", io::Error::from(io::ErrorKind::Interrupted))
    }

    #[test]
    fn retries_transient_errors_until_success() {
        let mut calls = 0;
        let policy = RetryPolicy { retries: 3, backoff_ms: 0 };
        let out = with_retry(policy, || {
            calls += 1;
            if calls < 3 { Err(transient()) } else { Ok(calls) }
        });
        assert_eq!(out.ok(), Some(3));
    }

    #[test]
    fn gives_up_after_configured_retries() {
        let mut calls = 0;
        let policy = RetryPolicy { retries: 2, backoff_ms: 0 };
        let out: Result<(), _> = with_retry(policy, || {
            calls += 1;
            Err(transient())
        });
        assert!(out.is_err());
        assert_eq!(calls, 3);
    }

    #[test]
    fn backoff_is_linear_and_saturates() {
        let policy = RetryPolicy { retries: 3, backoff_ms: 15 };
        assert_eq!(backoff_delay_ms(policy, 1), 15);
        assert_eq!(backoff_delay_ms(policy, 3), 45);
        let huge = RetryPolicy { retries: 3, backoff_ms: u64::MAX };
        assert_eq!(backoff_delay_ms(huge, 2), u64::MAX);
    }

    #[test]
    fn permanent_errors_are_not_retried() {
        let mut calls = 0;
        let policy = RetryPolicy { retries: 5, backoff_ms: 0 };
        let out: Result<(), _> = with_retry(policy, || {
            calls += 1;
            Err(PersistenceError::IncompatibleFormat { expected: 1, found: 2 })
        });
        assert!(out.is_err());
        assert_eq!(calls, 1);
    }
}
