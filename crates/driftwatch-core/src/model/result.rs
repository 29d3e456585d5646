use serde::{Deserialize, Serialize};

use crate::errors::DriftError;
use crate::value::AttributeValue;

/// One attribute whose value differs between the two sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftedAttribute {
    /// Dotted attribute path as configured (e.g. `tags.Name`)
    pub path: String,
    /// Value observed on the actual side
    pub actual_value: AttributeValue,
    /// Value declared on the desired side
    pub desired_value: AttributeValue,
}

/// SingleResult - drift outcome for one instance
///
/// `error` is set when the comparison could not be completed (missing
/// counterpart, cancellation). An error entry may still carry
/// `has_drift = true`, which is how "exists but undeclared" is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleResult {
    pub instance_id: String,
    pub has_drift: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drifted_attributes: Vec<DriftedAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SingleResult {
    /// Create a clean result (no drift, no error)
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            has_drift: false,
            drifted_attributes: Vec::new(),
            error: None,
        }
    }

    /// Result for an instance observed but not declared
    ///
    /// Counts as drift.
    pub fn not_found(instance_id: impl Into<String>) -> Self {
        let instance_id = instance_id.into();
        let err = DriftError::NotFoundInDesiredState {
            instance_id: instance_id.clone(),
        };
        Self {
            has_drift: true,
            error: Some(err.to_string()),
            ..Self::new(instance_id)
        }
    }

    /// Result for an instance whose evaluation was skipped by cancellation
    pub fn canceled(instance_id: impl Into<String>) -> Self {
        let instance_id = instance_id.into();
        let err = DriftError::Canceled {
            instance_id: instance_id.clone(),
        };
        Self {
            error: Some(err.to_string()),
            ..Self::new(instance_id)
        }
    }

    /// Result for an instance whose evaluation task did not complete
    pub fn failed(instance_id: impl Into<String>, reason: impl Into<String>) -> Self {
        let instance_id = instance_id.into();
        let err = DriftError::TaskFailed {
            instance_id: instance_id.clone(),
            reason: reason.into(),
        };
        Self {
            error: Some(err.to_string()),
            ..Self::new(instance_id)
        }
    }

    /// Record one drifted attribute and flag the result
    pub fn push_drift(&mut self, attribute: DriftedAttribute) {
        self.has_drift = true;
        self.drifted_attributes.push(attribute);
    }
}

/// DriftReport - aggregated outcome of a batch evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub total_instances: usize,
    pub drifted_instances: usize,
    pub results: Vec<SingleResult>,
}

impl DriftReport {
    /// Build a report from unordered results
    ///
    /// Results are sorted ascending by instance id and the drifted count is
    /// derived from the `has_drift` flags.
    pub fn from_results(total_instances: usize, mut results: Vec<SingleResult>) -> Self {
        results.sort_by(|a, b| a.instance_id.cmp(&b.instance_id));
        let drifted_instances = results.iter().filter(|r| r.has_drift).count();
        Self {
            total_instances,
            drifted_instances,
            results,
        }
    }

    /// Wrap a single-instance result in a one-entry report
    pub fn single(result: SingleResult) -> Self {
        Self::from_results(1, vec![result])
    }

    pub fn has_drift(&self) -> bool {
        self.drifted_instances > 0
    }
}
