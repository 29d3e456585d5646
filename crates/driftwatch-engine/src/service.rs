//! Drift service: state sources in, report out

use std::collections::BTreeSet;
use std::sync::Arc;

use driftwatch_core::{DriftReport, SingleResult};
use driftwatch_store::InstanceSource;

use crate::batch::BatchEvaluator;
use crate::cancel::ExecutionContext;
use crate::config::DriftConfig;
use crate::errors::{invalid_input, Result};

#[derive(Debug, Clone)]
pub struct DriftService {
    evaluator: BatchEvaluator,
    config: DriftConfig,
}

impl DriftService {
    pub fn new(config: DriftConfig) -> Self {
        Self {
            evaluator: BatchEvaluator::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &BatchEvaluator {
        &self.evaluator
    }

    pub fn list_configured_attributes(&self) -> Vec<String> {
        self.evaluator.list_configured_attributes()
    }

    /// Load both sides and evaluate every observed instance
    ///
    /// A non-empty `instance_filter` restricts the batch to those ids on the
    /// actual side; requested ids that were never observed are logged and
    /// left out of the report.
    ///
    /// # Errors
    ///
    /// Returns any source loading error, or `InvalidInput` when the desired
    /// side declares no instances at all. Per-instance problems are reported
    /// inside the returned report instead.
    pub async fn scan(
        &self,
        ctx: &ExecutionContext,
        actual: &dyn InstanceSource,
        desired: &dyn InstanceSource,
        instance_filter: &[String],
    ) -> Result<DriftReport> {
        let (mut observed, declared) = tokio::try_join!(actual.load_all(), desired.load_all())?;

        if declared.is_empty() {
            return Err(invalid_input(
                "scan",
                format!("no instances found in {}", desired.name()),
            ));
        }

        if !instance_filter.is_empty() {
            let wanted: BTreeSet<&str> = instance_filter.iter().map(String::as_str).collect();
            for id in wanted.iter().filter(|id| !observed.contains_key(**id)) {
                tracing::warn!(instance_id = %id, source = actual.name(), "requested instance not observed");
            }
            observed.retain(|id, _| wanted.contains(id.as_str()));
        }

        tracing::info!(
            actual = actual.name(),
            desired = desired.name(),
            observed = observed.len(),
            declared = declared.len(),
            "starting drift scan"
        );

        Ok(self
            .evaluator
            .evaluate_batch(ctx, Arc::new(observed), Arc::new(declared))
            .await)
    }

    /// Compare a single instance looked up on both sides
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when either side lacks the instance, or any source
    /// loading error.
    pub async fn check(
        &self,
        actual: &dyn InstanceSource,
        desired: &dyn InstanceSource,
        instance_id: &str,
    ) -> Result<SingleResult> {
        let (observed, declared) =
            tokio::try_join!(actual.get(instance_id), desired.get(instance_id))?;
        let result = self.evaluator.evaluate(&observed, &declared);
        tracing::info!(instance_id, has_drift = result.has_drift, "single instance check completed");
        Ok(result)
    }
}
