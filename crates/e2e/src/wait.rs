//! Condition wait primitive
//!
//! The only sanctioned way to observe asynchronous UI change: a probe is
//! evaluated immediately and then at a bounded poll interval until it yields
//! a value or the budget runs out. There are no fixed sleeps anywhere else.

use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::trace;

use crate::config::WaitConfig;
use crate::error::{E2eError, E2eResult};

/// A condition to poll, with its budget
#[derive(Debug, Clone)]
pub struct WaitCondition {
    pub description: String,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitCondition {
    pub fn new(description: impl Into<String>, config: &WaitConfig) -> Self {
        Self {
            description: description.into(),
            timeout: config.timeout(),
            poll_interval: config.poll_interval(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Poll `probe` until it returns `Some`, or fail with [`E2eError::Timeout`].
///
/// Transient driver errors count as "not yet"; any other error aborts the
/// wait immediately.
pub async fn wait_for<T, F, Fut>(condition: &WaitCondition, mut probe: F) -> E2eResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<Option<T>>>,
{
    let start = Instant::now();
    let deadline = start + condition.timeout;
    let mut polls = 0u32;

    loop {
        polls += 1;
        match probe().await {
            Ok(Some(value)) => {
                trace!(
                    "{} satisfied after {} poll(s) in {:?}",
                    condition.description,
                    polls,
                    start.elapsed()
                );
                return Ok(value);
            }
            Ok(None) => {}
            Err(e) if e.is_transient() => {
                trace!("{}: transient: {}", condition.description, e);
            }
            Err(e) => return Err(e),
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(E2eError::Timeout {
                what: condition.description.clone(),
                screen: None,
                waited_ms: start.elapsed().as_millis() as u64,
            });
        }
        sleep(condition.poll_interval.min(deadline - now)).await;
    }
}

/// Poll until `still_present` reports `false`.
pub async fn wait_until_gone<F, Fut>(condition: &WaitCondition, mut still_present: F) -> E2eResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<bool>>,
{
    wait_for(condition, || {
        let fut = still_present();
        async move { Ok(if fut.await? { None } else { Some(()) }) }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn condition(timeout_ms: u64) -> WaitCondition {
        WaitCondition {
            description: "test condition".into(),
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(20),
        }
    }

    #[tokio::test]
    async fn test_already_satisfied_returns_immediately() {
        let calls = AtomicU32::new(0);
        let start = std::time::Instant::now();
        let value = wait_for(&condition(5_000), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Some(7)) }
        })
        .await
        .unwrap();
        assert_eq!(value, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(start.elapsed() < Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_never_satisfied_times_out_near_budget() {
        let start = std::time::Instant::now();
        let result: E2eResult<()> = wait_for(&condition(200), || async { Ok(None) }).await;
        let elapsed = start.elapsed();

        match result {
            Err(E2eError::Timeout { what, waited_ms, .. }) => {
                assert_eq!(what, "test condition");
                assert!(waited_ms >= 200);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(1_000));
    }

    #[tokio::test]
    async fn test_transient_errors_keep_polling() {
        let calls = Arc::new(AtomicU32::new(0));
        let value = wait_for(&condition(2_000), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 3 {
                    Err(E2eError::from(tabshelf_common::Error::Detached("row".into())))
                } else {
                    Ok(Some(n))
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(value, 3);
    }

    #[tokio::test]
    async fn test_fatal_errors_abort() {
        let calls = AtomicU32::new(0);
        let result: E2eResult<()> = wait_for(&condition(2_000), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(E2eError::from(tabshelf_common::Error::Driver("app crashed".into()))) }
        })
        .await;
        assert!(matches!(result, Err(E2eError::Driver(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_wait_until_gone() {
        let remaining = AtomicU32::new(2);
        wait_until_gone(&condition(2_000), || {
            let left = remaining.fetch_sub(1, Ordering::SeqCst);
            async move { Ok(left > 1) }
        })
        .await
        .unwrap();
        assert_eq!(remaining.load(Ordering::SeqCst), 0);
    }
}
