//! Bounded concurrent batch evaluation

use std::sync::Arc;
use std::time::Instant;

use driftwatch_core_types::RunId;
use driftwatch_core::{
    log_op_end, log_op_start, Detector, DriftReport, InstanceMap, InstanceRecord, SingleResult,
};

use crate::cancel::ExecutionContext;
use crate::config::{resolve_concurrency, DriftConfig};
use crate::pool::{JobOutcome, WorkerPool};

/// Runs the single-instance detector across a batch of instances
///
/// The detector is shared read-only by every worker; records are shared
/// through `Arc` rather than copied per task.
#[derive(Debug, Clone)]
pub struct BatchEvaluator {
    detector: Arc<Detector>,
    pool: WorkerPool,
}

impl BatchEvaluator {
    /// Build an evaluator
    ///
    /// An empty attribute list selects the default set; a concurrency of
    /// zero or less selects the default cap.
    pub fn new(attributes: Vec<String>, concurrency: i64) -> Self {
        Self {
            detector: Arc::new(Detector::new(attributes)),
            pool: WorkerPool::new(resolve_concurrency(concurrency)),
        }
    }

    pub fn from_config(config: &DriftConfig) -> Self {
        Self::new(config.attributes.clone(), config.concurrency)
    }

    pub fn concurrency(&self) -> usize {
        self.pool.concurrency()
    }

    pub fn list_configured_attributes(&self) -> Vec<String> {
        self.detector.list_configured_attributes()
    }

    /// Compare one record pair
    pub fn evaluate(&self, actual: &InstanceRecord, desired: &InstanceRecord) -> SingleResult {
        self.detector.evaluate(actual, desired)
    }

    /// Compare every instance on the actual side against its declared counterpart
    ///
    /// Always produces a report with exactly one result per actual-side
    /// instance, sorted by id. Instances that are missing from `desired`
    /// are reported as drifted with an error; instances skipped because
    /// `ctx` was cancelled carry a cancellation error. Declared instances
    /// never observed on the actual side are not reported.
    pub async fn evaluate_batch(
        &self,
        ctx: &ExecutionContext,
        actual: Arc<InstanceMap>,
        desired: Arc<InstanceMap>,
    ) -> DriftReport {
        let run_id = RunId::new();
        let start = Instant::now();
        log_op_start!(
            "evaluate_batch",
            run_id = %run_id,
            total = actual.len(),
            desired = desired.len(),
            concurrency = self.pool.concurrency()
        );

        let ids: Vec<String> = actual.keys().cloned().collect();
        let job = {
            let detector = Arc::clone(&self.detector);
            let actual = Arc::clone(&actual);
            let desired = Arc::clone(&desired);
            move |id: String| {
                let detector = Arc::clone(&detector);
                let actual = Arc::clone(&actual);
                let desired = Arc::clone(&desired);
                async move { evaluate_one(&detector, &actual, &desired, &id) }
            }
        };

        let outcomes = self.pool.run(ctx, ids.clone(), job).await;

        let results: Vec<SingleResult> = ids
            .into_iter()
            .zip(outcomes)
            .map(|(id, outcome)| match outcome {
                JobOutcome::Completed(result) => result,
                JobOutcome::Canceled => {
                    tracing::warn!(run_id = %run_id, instance_id = %id, "evaluation canceled");
                    SingleResult::canceled(id)
                }
                JobOutcome::Failed(reason) => {
                    tracing::error!(
                        run_id = %run_id,
                        instance_id = %id,
                        reason = %reason,
                        "evaluation failed"
                    );
                    SingleResult::failed(id, reason)
                }
            })
            .collect();

        let report = DriftReport::from_results(actual.len(), results);
        log_op_end!(
            "evaluate_batch",
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = %run_id,
            total = report.total_instances,
            drifted = report.drifted_instances
        );
        report
    }
}

fn evaluate_one(
    detector: &Detector,
    actual: &InstanceMap,
    desired: &InstanceMap,
    id: &str,
) -> SingleResult {
    let Some(observed) = actual.get(id) else {
        return SingleResult::failed(id, "instance vanished from actual state");
    };

    match desired.get(id) {
        Some(declared) => detector.evaluate(observed, declared),
        None => {
            tracing::warn!(instance_id = %id, "instance not found in desired state");
            SingleResult::not_found(id)
        }
    }
}
