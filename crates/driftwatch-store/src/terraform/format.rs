//! Serde shapes of the Terraform JSON state file
//!
//! Terraform writes `null` for unset attributes, so every scalar is
//! optional here and collapses to its zero value during mapping.

use std::collections::BTreeMap;

use driftwatch_core::{BlockDevice, InstanceRecord};
use serde::Deserialize;

pub const AWS_INSTANCE_TYPE: &str = "aws_instance";

#[derive(Debug, Clone, Deserialize)]
pub struct State {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub resources: Vec<StateResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StateResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub instances: Vec<StateInstance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StateInstance {
    /// Decoded lazily so non-instance resources never need a schema
    #[serde(default)]
    pub attributes: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Ec2Attributes {
    pub id: Option<String>,
    pub ami: Option<String>,
    pub instance_type: Option<String>,
    pub availability_zone: Option<String>,
    pub subnet_id: Option<String>,
    pub vpc_security_group_ids: Option<Vec<String>>,
    pub security_groups: Option<Vec<String>>,
    pub key_name: Option<String>,
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    pub ebs_optimized: Option<bool>,
    pub monitoring: Option<bool>,
    pub iam_instance_profile: Option<String>,
    pub tags: Option<BTreeMap<String, String>>,
    pub tags_all: Option<BTreeMap<String, String>>,
    pub root_block_device: Option<Vec<RootBlockDeviceAttributes>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RootBlockDeviceAttributes {
    pub volume_size: Option<i64>,
    pub volume_type: Option<String>,
    pub delete_on_termination: Option<bool>,
    pub encrypted: Option<bool>,
    pub iops: Option<i64>,
    pub throughput: Option<i64>,
}

impl From<RootBlockDeviceAttributes> for BlockDevice {
    fn from(attrs: RootBlockDeviceAttributes) -> Self {
        BlockDevice {
            volume_size: attrs.volume_size.unwrap_or_default(),
            volume_type: attrs.volume_type.unwrap_or_default(),
            delete_on_termination: attrs.delete_on_termination.unwrap_or_default(),
            encrypted: attrs.encrypted.unwrap_or_default(),
            iops: attrs.iops.unwrap_or_default(),
            throughput: attrs.throughput.unwrap_or_default(),
        }
    }
}

impl From<Ec2Attributes> for InstanceRecord {
    fn from(attrs: Ec2Attributes) -> Self {
        // `tags` wins when set; `tags_all` also carries provider default tags
        let tags = attrs
            .tags
            .filter(|tags| !tags.is_empty())
            .or(attrs.tags_all)
            .unwrap_or_default();

        // Instances in a VPC report groups by id; EC2-Classic used names
        let security_groups = attrs
            .vpc_security_group_ids
            .filter(|ids| !ids.is_empty())
            .or(attrs.security_groups)
            .unwrap_or_default();

        let root_block_device = attrs
            .root_block_device
            .and_then(|devices| devices.into_iter().next())
            .map(BlockDevice::from)
            .unwrap_or_default();

        InstanceRecord {
            instance_id: attrs.id.unwrap_or_default(),
            instance_type: attrs.instance_type.unwrap_or_default(),
            ami: attrs.ami.unwrap_or_default(),
            availability_zone: attrs.availability_zone.unwrap_or_default(),
            subnet_id: attrs.subnet_id.unwrap_or_default(),
            vpc_id: String::new(),
            private_ip: attrs.private_ip.unwrap_or_default(),
            public_ip: attrs.public_ip.unwrap_or_default(),
            key_name: attrs.key_name.unwrap_or_default(),
            security_groups,
            tags,
            root_block_device,
            ebs_optimized: attrs.ebs_optimized.unwrap_or_default(),
            monitoring: attrs.monitoring.unwrap_or_default(),
            iam_instance_profile: attrs.iam_instance_profile.unwrap_or_default(),
        }
    }
}
