//! Fixed-delay pacing for external calls

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

/// Enforces a minimum interval between consecutive calls. The interval is a
/// configured value, not derived from observed behavior.
#[derive(Clone)]
pub struct Pacer {
    inner: Arc<Mutex<PacerInner>>,
}

struct PacerInner {
    last_call: Option<Instant>,
    min_interval: Duration,
}

impl Pacer {
    /// Create a pacer with the given minimum interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PacerInner {
                last_call: None,
                min_interval,
            })),
        }
    }

    /// Create a pacer from a millisecond delay
    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    /// Wait until the next call is allowed
    pub async fn wait(&self) {
        let mut inner = self.inner.lock().await;

        if let Some(last) = inner.last_call {
            let elapsed = last.elapsed();
            if elapsed < inner.min_interval {
                let wait_time = inner.min_interval - elapsed;
                trace!("Pacing: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        inner.last_call = Some(Instant::now());
    }
}
