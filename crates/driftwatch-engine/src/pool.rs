//! Bounded worker pool
//!
//! One tokio task per input, gated by a counting semaphore. Outcomes come
//! back in input order regardless of completion order.

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::cancel::ExecutionContext;

/// What happened to one job
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome<R> {
    Completed(R),
    /// The context was cancelled before the job acquired, or right after it
    /// acquired, a slot
    Canceled,
    /// The task running the job died (panic or abort)
    Failed(String),
}

/// Fixed-capacity pool of concurrent job slots
#[derive(Debug, Clone)]
pub struct WorkerPool {
    concurrency: usize,
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    pub fn new(concurrency: NonZeroUsize) -> Self {
        let concurrency = concurrency.get().min(Semaphore::MAX_PERMITS);
        Self {
            concurrency,
            permits: Arc::new(Semaphore::new(concurrency)),
        }
    }

    /// Maximum number of jobs in flight at once
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run `job` once per input with at most `concurrency` in flight
    ///
    /// Cancellation is checked before waiting for a slot, while waiting,
    /// and again once the slot is held. A cancelled job never runs and its
    /// outcome is [`JobOutcome::Canceled`]; jobs already running finish.
    /// The returned vector has one outcome per input, at the input's index.
    pub async fn run<I, R, F, Fut>(
        &self,
        ctx: &ExecutionContext,
        inputs: Vec<I>,
        job: F,
    ) -> Vec<JobOutcome<R>>
    where
        I: Send + 'static,
        R: Send + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let job = Arc::new(job);
        let mut tasks = JoinSet::new();
        let total = inputs.len();

        for (index, input) in inputs.into_iter().enumerate() {
            let ctx = ctx.clone();
            let permits = Arc::clone(&self.permits);
            let job = Arc::clone(&job);

            tasks.spawn(async move {
                if ctx.is_cancelled() {
                    return (index, JobOutcome::Canceled);
                }

                let permit = tokio::select! {
                    biased;
                    _ = ctx.cancelled() => return (index, JobOutcome::Canceled),
                    acquired = permits.acquire_owned() => match acquired {
                        Ok(permit) => permit,
                        Err(_) => return (index, JobOutcome::Failed("worker pool closed".to_string())),
                    },
                };

                if ctx.is_cancelled() {
                    return (index, JobOutcome::Canceled);
                }

                let output = job(input).await;
                drop(permit);
                (index, JobOutcome::Completed(output))
            });
        }

        // Single consumer: only this loop writes to the outcome slots
        let mut slots: Vec<Option<JobOutcome<R>>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(outcome);
                    }
                }
                Err(err) => tracing::error!(error = %err, "worker task did not complete"),
            }
        }

        slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| JobOutcome::Failed("worker task aborted".to_string())))
            .collect()
    }
}
