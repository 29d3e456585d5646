//! Single-instance drift detector

use crate::compare::values_equal;
use crate::core_types::schema;
use crate::errors::Result;
use crate::extract::extract_value;
use crate::model::{DriftedAttribute, InstanceRecord, SingleResult};
use crate::registry::{AttributePath, DEFAULT_ATTRIBUTES};

#[derive(Debug, Clone)]
struct ConfiguredAttribute {
    raw: String,
    parsed: Result<AttributePath>,
}

/// Detector - compares one actual/desired record pair
///
/// Holds an ordered attribute list, parsed once at construction. Paths that
/// fail to parse are kept and skipped at evaluation time, so a typo in the
/// configured list never aborts a comparison.
#[derive(Debug, Clone)]
pub struct Detector {
    attributes: Vec<ConfiguredAttribute>,
}

impl Detector {
    /// Create a detector for the given attribute paths
    ///
    /// An empty list selects [`DEFAULT_ATTRIBUTES`].
    pub fn new(attributes: Vec<String>) -> Self {
        let raw = if attributes.is_empty() {
            DEFAULT_ATTRIBUTES.iter().map(|s| s.to_string()).collect()
        } else {
            attributes
        };

        let attributes = raw
            .into_iter()
            .map(|raw| {
                let parsed = AttributePath::parse(&raw);
                ConfiguredAttribute { raw, parsed }
            })
            .collect();

        Self { attributes }
    }

    pub fn with_defaults() -> Self {
        Self::new(Vec::new())
    }

    /// Configured attribute paths, in evaluation order
    pub fn list_configured_attributes(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.raw.clone()).collect()
    }

    /// Compare `actual` against `desired` on every configured path
    ///
    /// The result's id is taken from `actual`. Drifted attributes follow the
    /// configured order.
    pub fn evaluate(&self, actual: &InstanceRecord, desired: &InstanceRecord) -> SingleResult {
        let mut result = SingleResult::new(actual.instance_id.clone());

        for attribute in &self.attributes {
            let path = match &attribute.parsed {
                Ok(path) => path,
                Err(err) => {
                    tracing::debug!(
                        instance_id = %actual.instance_id,
                        attribute = %attribute.raw,
                        error = %err,
                        "skipping attribute"
                    );
                    continue;
                }
            };

            let actual_value = extract_value(actual, path);
            let desired_value = extract_value(desired, path);

            if !values_equal(Some(&actual_value), Some(&desired_value)) {
                tracing::debug!(
                    instance_id = %actual.instance_id,
                    attribute = %attribute.raw,
                    kind = actual_value.kind_name(),
                    "attribute drifted"
                );
                result.push_drift(DriftedAttribute {
                    path: attribute.raw.clone(),
                    actual_value,
                    desired_value,
                });
            }
        }

        if result.has_drift {
            tracing::info!(
                instance_id = %result.instance_id,
                drifted_attributes = result.drifted_attributes.len(),
                event = schema::EVENT_DRIFT_DETECTED,
                "drift detected"
            );
        } else {
            tracing::debug!(instance_id = %result.instance_id, "no drift detected");
        }

        result
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockDevice;
    use std::collections::BTreeMap;

    fn detector(attrs: &[&str]) -> Detector {
        Detector::new(attrs.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_empty_list_selects_defaults() {
        let d = Detector::new(Vec::new());
        assert_eq!(d.list_configured_attributes().len(), DEFAULT_ATTRIBUTES.len());
        assert_eq!(d.list_configured_attributes()[0], "instance_type");
    }

    #[test]
    fn test_custom_list_kept_in_order() {
        let d = detector(&["ami", "instance_type"]);
        assert_eq!(d.list_configured_attributes(), vec!["ami", "instance_type"]);
    }

    #[test]
    fn test_identical_records_have_no_drift() {
        let record = InstanceRecord {
            instance_type: "t2.micro".to_string(),
            ami: "ami-123".to_string(),
            ..InstanceRecord::new("i-123")
        };
        let result = Detector::with_defaults().evaluate(&record, &record.clone());
        assert!(!result.has_drift);
        assert!(result.drifted_attributes.is_empty());
        assert!(result.error.is_none());
        assert_eq!(result.instance_id, "i-123");
    }

    #[test]
    fn test_drift_follows_configured_order() {
        let actual = InstanceRecord {
            instance_type: "t2.large".to_string(),
            ami: "ami-456".to_string(),
            ..InstanceRecord::new("i-123")
        };
        let desired = InstanceRecord {
            instance_type: "t2.micro".to_string(),
            ami: "ami-123".to_string(),
            ..InstanceRecord::new("i-123")
        };

        let result = detector(&["ami", "instance_type"]).evaluate(&actual, &desired);
        assert!(result.has_drift);
        let paths: Vec<&str> = result
            .drifted_attributes
            .iter()
            .map(|a| a.path.as_str())
            .collect();
        assert_eq!(paths, vec!["ami", "instance_type"]);
        assert_eq!(result.drifted_attributes[0].actual_value, "ami-456".into());
        assert_eq!(result.drifted_attributes[0].desired_value, "ami-123".into());
    }

    #[test]
    fn test_invalid_attributes_are_skipped() {
        let actual = InstanceRecord {
            instance_type: "t2.large".to_string(),
            ..InstanceRecord::new("i-1")
        };
        let desired = InstanceRecord::new("i-1");

        let result = detector(&["bogus", "", "root_block_device.bogus", "instance_type"])
            .evaluate(&actual, &desired);
        assert_eq!(result.drifted_attributes.len(), 1);
        assert_eq!(result.drifted_attributes[0].path, "instance_type");
        assert!(result.error.is_none());
    }

    #[test]
    fn test_nested_and_collection_attributes() {
        let mut actual_tags = BTreeMap::new();
        actual_tags.insert("Name".to_string(), "prod".to_string());
        actual_tags.insert("Env".to_string(), "production".to_string());
        let mut desired_tags = BTreeMap::new();
        desired_tags.insert("Name".to_string(), "prod".to_string());

        let actual = InstanceRecord {
            security_groups: vec!["sg-456".to_string(), "sg-123".to_string()],
            tags: actual_tags,
            root_block_device: BlockDevice {
                volume_size: 100,
                volume_type: "gp3".to_string(),
                ..BlockDevice::default()
            },
            ..InstanceRecord::new("i-1")
        };
        let desired = InstanceRecord {
            security_groups: vec!["sg-123".to_string(), "sg-456".to_string()],
            tags: desired_tags,
            root_block_device: BlockDevice {
                volume_size: 50,
                volume_type: "gp2".to_string(),
                ..BlockDevice::default()
            },
            ..InstanceRecord::new("i-1")
        };

        let result = detector(&[
            "security_groups",
            "tags",
            "tags.Name",
            "root_block_device.volume_size",
            "root_block_device.volume_type",
        ])
        .evaluate(&actual, &desired);

        let paths: Vec<&str> = result
            .drifted_attributes
            .iter()
            .map(|a| a.path.as_str())
            .collect();
        assert_eq!(
            paths,
            vec![
                "tags",
                "root_block_device.volume_size",
                "root_block_device.volume_type"
            ]
        );
    }
}
