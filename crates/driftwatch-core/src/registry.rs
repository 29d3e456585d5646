//! Attribute registry
//!
//! The closed set of attribute paths the detector knows how to compare.
//! A dotted path string is parsed once into an [`AttributePath`]; the
//! extractor then matches on it without any string lookups.

use std::fmt;
use std::str::FromStr;

use crate::errors::{DriftError, Result};

/// Attribute paths checked when no explicit list is configured
pub const DEFAULT_ATTRIBUTES: &[&str] = &[
    "instance_type",
    "ami",
    "availability_zone",
    "subnet_id",
    "security_groups",
    "tags",
    "key_name",
    "ebs_optimized",
    "monitoring",
    "iam_instance_profile",
    "root_block_device.volume_size",
    "root_block_device.volume_type",
    "root_block_device.encrypted",
];

const TAGS_SEGMENT: &str = "tags";
const ROOT_BLOCK_DEVICE_SEGMENT: &str = "root_block_device";

/// Top-level fields of an instance record addressable by a single segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceField {
    InstanceType,
    Ami,
    AvailabilityZone,
    SubnetId,
    VpcId,
    PrivateIp,
    PublicIp,
    KeyName,
    SecurityGroups,
    Tags,
    EbsOptimized,
    Monitoring,
    IamInstanceProfile,
    /// The whole root volume sub-record
    RootBlockDevice,
}

impl InstanceField {
    pub const ALL: [InstanceField; 14] = [
        InstanceField::InstanceType,
        InstanceField::Ami,
        InstanceField::AvailabilityZone,
        InstanceField::SubnetId,
        InstanceField::VpcId,
        InstanceField::PrivateIp,
        InstanceField::PublicIp,
        InstanceField::KeyName,
        InstanceField::SecurityGroups,
        InstanceField::Tags,
        InstanceField::EbsOptimized,
        InstanceField::Monitoring,
        InstanceField::IamInstanceProfile,
        InstanceField::RootBlockDevice,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InstanceField::InstanceType => "instance_type",
            InstanceField::Ami => "ami",
            InstanceField::AvailabilityZone => "availability_zone",
            InstanceField::SubnetId => "subnet_id",
            InstanceField::VpcId => "vpc_id",
            InstanceField::PrivateIp => "private_ip",
            InstanceField::PublicIp => "public_ip",
            InstanceField::KeyName => "key_name",
            InstanceField::SecurityGroups => "security_groups",
            InstanceField::Tags => TAGS_SEGMENT,
            InstanceField::EbsOptimized => "ebs_optimized",
            InstanceField::Monitoring => "monitoring",
            InstanceField::IamInstanceProfile => "iam_instance_profile",
            InstanceField::RootBlockDevice => ROOT_BLOCK_DEVICE_SEGMENT,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// Fields of the root volume sub-record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockDeviceField {
    VolumeSize,
    VolumeType,
    DeleteOnTermination,
    Encrypted,
    Iops,
    Throughput,
}

impl BlockDeviceField {
    pub const ALL: [BlockDeviceField; 6] = [
        BlockDeviceField::VolumeSize,
        BlockDeviceField::VolumeType,
        BlockDeviceField::DeleteOnTermination,
        BlockDeviceField::Encrypted,
        BlockDeviceField::Iops,
        BlockDeviceField::Throughput,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BlockDeviceField::VolumeSize => "volume_size",
            BlockDeviceField::VolumeType => "volume_type",
            BlockDeviceField::DeleteOnTermination => "delete_on_termination",
            BlockDeviceField::Encrypted => "encrypted",
            BlockDeviceField::Iops => "iops",
            BlockDeviceField::Throughput => "throughput",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// A parsed, validated attribute path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributePath {
    /// Single-segment path naming a top-level field
    Field(InstanceField),
    /// `tags.<key>`; the key is everything after the first dot
    Tag(String),
    /// `root_block_device.<field>`
    BlockDevice(BlockDeviceField),
}

impl AttributePath {
    /// Parse a dotted path string
    ///
    /// Only the first dot is significant for tags: everything after
    /// `tags.` is the key, so `tags.app.tier` names the tag `app.tier`
    /// rather than the tag `app`. Any other path is split on every dot,
    /// and segments beyond what it takes are rejected instead of ignored,
    /// so `instance_type.extra` and `root_block_device.volume_size.x`
    /// fail with `InvalidPath`.
    ///
    /// # Errors
    ///
    /// - `InvalidPath` for an empty path, an empty tag key, or extra
    ///   segments on a path that does not take any
    /// - `UnknownAttribute` when the first segment (or the root volume
    ///   sub-field) is not recognized
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(DriftError::InvalidPath {
                reason: "path has no segments".to_string(),
            });
        }

        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        // Tag keys are free-form and may themselves contain dots
        if head == TAGS_SEGMENT {
            return match rest {
                None => Ok(AttributePath::Field(InstanceField::Tags)),
                Some("") => Err(DriftError::InvalidPath {
                    reason: format!("empty tag key in '{}'", path),
                }),
                Some(key) => Ok(AttributePath::Tag(key.to_string())),
            };
        }

        let segments: Vec<&str> = path.split('.').collect();
        Self::from_segments(&segments)
    }

    /// Build a path from pre-split segments
    ///
    /// # Errors
    ///
    /// Same rules as [`AttributePath::parse`], except that a tag key is
    /// taken from the remaining segments joined with `.`.
    pub fn from_segments(segments: &[&str]) -> Result<Self> {
        let Some((&head, rest)) = segments.split_first() else {
            return Err(DriftError::InvalidPath {
                reason: "path has no segments".to_string(),
            });
        };

        let field = InstanceField::from_name(head).ok_or_else(|| DriftError::UnknownAttribute {
            attribute: head.to_string(),
        })?;

        match (field, rest) {
            (field, []) => Ok(AttributePath::Field(field)),
            (InstanceField::Tags, key) => {
                let key = key.join(".");
                if key.is_empty() {
                    return Err(DriftError::InvalidPath {
                        reason: "empty tag key".to_string(),
                    });
                }
                Ok(AttributePath::Tag(key))
            }
            (InstanceField::RootBlockDevice, [sub]) => BlockDeviceField::from_name(sub)
                .map(AttributePath::BlockDevice)
                .ok_or_else(|| DriftError::UnknownAttribute {
                    attribute: format!("{}.{}", ROOT_BLOCK_DEVICE_SEGMENT, sub),
                }),
            (field, _) => Err(DriftError::InvalidPath {
                reason: format!(
                    "'{}' does not take {} sub-segment(s)",
                    field.name(),
                    rest.len()
                ),
            }),
        }
    }
}

impl FromStr for AttributePath {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributePath::Field(field) => f.write_str(field.name()),
            AttributePath::Tag(key) => write!(f, "{}.{}", TAGS_SEGMENT, key),
            AttributePath::BlockDevice(field) => {
                write!(f, "{}.{}", ROOT_BLOCK_DEVICE_SEGMENT, field.name())
            }
        }
    }
}

/// Every comparable attribute path, in registry order
///
/// `tags.<key>` is listed as a pattern since keys are open-ended.
pub fn supported_attributes() -> Vec<String> {
    let mut paths: Vec<String> = InstanceField::ALL
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    paths.push(format!("{}.<key>", TAGS_SEGMENT));
    paths.extend(
        BlockDeviceField::ALL
            .iter()
            .map(|f| format!("{}.{}", ROOT_BLOCK_DEVICE_SEGMENT, f.name())),
    );
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_attributes_all_parse() {
        for path in DEFAULT_ATTRIBUTES {
            let parsed = AttributePath::parse(path).unwrap();
            assert_eq!(parsed.to_string(), *path);
        }
        assert_eq!(DEFAULT_ATTRIBUTES.len(), 13);
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(
            AttributePath::parse("ami").unwrap(),
            AttributePath::Field(InstanceField::Ami)
        );
        assert_eq!(
            AttributePath::parse("tags.Name").unwrap(),
            AttributePath::Tag("Name".to_string())
        );
        assert_eq!(
            AttributePath::parse("root_block_device.iops").unwrap(),
            AttributePath::BlockDevice(BlockDeviceField::Iops)
        );
        assert_eq!(
            AttributePath::parse("root_block_device").unwrap(),
            AttributePath::Field(InstanceField::RootBlockDevice)
        );
    }

    #[test]
    fn test_tag_key_may_contain_dots() {
        assert_eq!(
            AttributePath::parse("tags.kubernetes.io/cluster").unwrap(),
            AttributePath::Tag("kubernetes.io/cluster".to_string())
        );
        assert_eq!(
            AttributePath::parse("tags.app.tier").unwrap(),
            AttributePath::Tag("app.tier".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            AttributePath::parse(""),
            Err(DriftError::InvalidPath { .. })
        ));
        assert!(matches!(
            AttributePath::from_segments(&[]),
            Err(DriftError::InvalidPath { .. })
        ));
        assert!(matches!(
            AttributePath::parse("tags."),
            Err(DriftError::InvalidPath { .. })
        ));
        assert!(matches!(
            AttributePath::parse("instance_type.extra"),
            Err(DriftError::InvalidPath { .. })
        ));
        assert!(matches!(
            AttributePath::parse("root_block_device.volume_size.gib"),
            Err(DriftError::InvalidPath { .. })
        ));
        assert_eq!(
            AttributePath::parse("unknown"),
            Err(DriftError::UnknownAttribute {
                attribute: "unknown".to_string()
            })
        );
        assert_eq!(
            AttributePath::parse("root_block_device.bogus"),
            Err(DriftError::UnknownAttribute {
                attribute: "root_block_device.bogus".to_string()
            })
        );
    }

    #[test]
    fn test_supported_attributes_covers_registry() {
        let supported = supported_attributes();
        assert_eq!(
            supported.len(),
            InstanceField::ALL.len() + 1 + BlockDeviceField::ALL.len()
        );
        assert!(supported.contains(&"tags.<key>".to_string()));
        assert!(supported.contains(&"root_block_device.throughput".to_string()));
    }
}
