use chrono::Utc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::batch::IntoBatch;
use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::types::{ProgressEvent, RunOutcome, RunState};

/// Sequential batch processor with cooperative cancellation.
///
/// Items are processed one at a time, in order, with a fixed delay between
/// consecutive items. Cancellation is a one-way latch: once [`cancel`] has
/// been called every later check observes it, for this run and any run that
/// follows on the same instance.
///
/// Running several batches concurrently on one instance is not supported;
/// the processor does not guard against it and the interleaving of their
/// cancellation checks is unspecified.
///
/// [`cancel`]: TaskProcessor::cancel
#[derive(Debug)]
pub struct TaskProcessor {
    cancel_token: CancellationToken,
    default_delay: Duration,
}

impl TaskProcessor {
    pub fn new() -> Self {
        Self::from_config(&ProcessorConfig::default())
    }

    pub fn from_config(config: &ProcessorConfig) -> Self {
        Self {
            cancel_token: CancellationToken::new(),
            default_delay: config.default_delay,
        }
    }

    /// Create a processor observing an externally owned token.
    ///
    /// Passing `parent.child_token()` lets a wider scope (a signal handler,
    /// a supervising task) cancel this processor without reaching it.
    pub fn with_cancellation_token(cancel_token: CancellationToken) -> Self {
        Self {
            cancel_token,
            default_delay: ProcessorConfig::default().default_delay,
        }
    }

    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn default_delay(&self) -> Duration {
        self.default_delay
    }

    /// Request cancellation. Idempotent; takes effect at the next item boundary.
    pub fn cancel(&self) {
        if !self.cancel_token.is_cancelled() {
            log::info!("Cancellation requested");
        }
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// A handle sharing this processor's cancellation flag.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Process `items` in order, reporting progress after each one.
    ///
    /// # Arguments
    /// * `items` - the batch; loosely typed input is validated first
    /// * `delay` - pause between consecutive items, `None` for the default
    /// * `on_progress` - called once per processed item, in order
    ///
    /// # Returns
    /// A [`RunOutcome`] in state `Completed` or `Cancelled`, or
    /// `ProcessorError::InvalidInput` if validation failed. Validation
    /// happens before any item is touched, so a failed run never reports
    /// progress.
    pub async fn run<I, F>(
        &self,
        items: I,
        delay: Option<Duration>,
        mut on_progress: F,
    ) -> Result<RunOutcome>
    where
        I: IntoBatch,
        F: FnMut(ProgressEvent),
    {
        let batch = items.into_batch().inspect_err(|e| {
            log::error!("{}", e);
        })?;

        let run_id = Uuid::new_v4().to_string();
        let delay = delay.unwrap_or(self.default_delay);
        let total = batch.len();
        let started_at = Utc::now();
        let clock = Instant::now();

        let finish = |state: RunState, processed: usize| RunOutcome {
            run_id: run_id.clone(),
            state,
            processed,
            total,
            started_at,
            finished_at: Utc::now(),
            elapsed_ms: clock.elapsed().as_millis() as u64,
        };

        if batch.is_empty() {
            log::info!("Run {}: no items to process", run_id);
            return Ok(finish(RunState::Completed, 0));
        }

        log::debug!(
            "Run {} started: {} items, delay {}ms",
            run_id,
            total,
            delay.as_millis()
        );

        for (idx, item) in batch.iter().enumerate() {
            if self.cancel_token.is_cancelled() {
                log::info!("Run {} cancelled after {}/{} items", run_id, idx, total);
                return Ok(finish(RunState::Cancelled, idx));
            }

            log::info!("Processing: {}", item);
            on_progress(ProgressEvent::new(idx + 1, total));

            // The wait is not raced against cancellation: a cancel issued
            // mid-delay is seen at the next boundary.
            if idx + 1 < total {
                tokio::time::sleep(delay).await;
            }
        }

        log::info!("Run {} completed: {} items", run_id, total);
        Ok(finish(RunState::Completed, total))
    }

    /// [`run`](Self::run) without a progress callback.
    pub async fn run_silent<I>(&self, items: I, delay: Option<Duration>) -> Result<RunOutcome>
    where
        I: IntoBatch,
    {
        self.run(items, delay, |_| {}).await
    }
}

impl Default for TaskProcessor {
    fn default() -> Self {
        Self::new()
    }
}
