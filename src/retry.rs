use std::time::Duration;

use log::debug;
use tokio::time::sleep;

pub const MAX_ATTEMPTS: usize = 3;

pub const RETRY_INTERVAL: Duration = Duration::from_secs(7);

/// Runs `attempt` up to `max_attempts` times, pausing `interval` between
/// failures. Returns the first success, or the error of the last attempt.
///
/// The pause is fixed and every error is retried the same way. There is no
/// pause after the final failed attempt, so three failures at the default
/// interval take 14 s rather than 21 s.
pub async fn retry<T, E, F, Fut>(
    max_attempts: usize,
    interval: Duration,
    mut attempt: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut remaining = max_attempts.max(1);

    loop {
        match attempt().await {
            Ok(v) => return Ok(v),
            Err(err) => {
                remaining -= 1;
                if remaining == 0 {
                    return Err(err);
                }
            }
        }

        sleep(interval).await;
        debug!("Retrying ...");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use tokio::time::Instant;

    use super::*;

    fn assert_paused_elapsed(started: Instant, secs: u64) {
        let elapsed = started.elapsed();
        assert!(
            elapsed >= Duration::from_secs(secs) && elapsed < Duration::from_secs(secs + 1),
            "expected ~{secs}s, got {elapsed:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stops_on_first_success() {
        let calls = Cell::new(0);
        let started = Instant::now();

        let result: Result<u32, &str> = retry(MAX_ATTEMPTS, RETRY_INTERVAL, || {
            calls.set(calls.get() + 1);
            async { Ok(7) }
        })
        .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls.get(), 1);
        assert_paused_elapsed(started, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn sleeps_between_failures_and_keeps_last_error() {
        let calls = Cell::new(0);
        let started = Instant::now();

        let result: Result<u32, usize> = retry(MAX_ATTEMPTS, RETRY_INTERVAL, || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { Err(n) }
        })
        .await;

        assert_eq!(result, Err(3));
        assert_eq!(calls.get(), 3);
        assert_paused_elapsed(started, 14);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_one_failure() {
        let calls = Cell::new(0);
        let started = Instant::now();

        let result: Result<&str, &str> = retry(MAX_ATTEMPTS, RETRY_INTERVAL, || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { if n == 1 { Err("down") } else { Ok("up") } }
        })
        .await;

        assert_eq!(result, Ok("up"));
        assert_eq!(calls.get(), 2);
        assert_paused_elapsed(started, 7);
    }
}
