use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Instance records keyed by instance id
pub type InstanceMap = BTreeMap<String, InstanceRecord>;

/// InstanceRecord - normalized snapshot of one compute instance
///
/// Every state source (observed snapshot, Terraform state) produces this
/// shape. Fields the source does not know about stay at their zero value;
/// deserialization fills absent keys with defaults for the same reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceRecord {
    /// Provider-assigned identifier (e.g. `i-0abc123`)
    pub instance_id: String,
    pub instance_type: String,
    pub ami: String,
    pub availability_zone: String,
    pub subnet_id: String,
    pub vpc_id: String,
    pub private_ip: String,
    pub public_ip: String,
    pub key_name: String,

    /// Security group ids; order carries no meaning
    pub security_groups: Vec<String>,

    pub tags: BTreeMap<String, String>,

    /// Root storage volume
    pub root_block_device: BlockDevice,

    pub ebs_optimized: bool,
    pub monitoring: bool,
    pub iam_instance_profile: String,
}

impl InstanceRecord {
    /// Create an otherwise empty record with the given id
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            ..Self::default()
        }
    }
}

/// BlockDevice - the root volume sub-record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDevice {
    /// Size in GiB
    pub volume_size: i64,
    pub volume_type: String,
    pub delete_on_termination: bool,
    pub encrypted: bool,
    pub iops: i64,
    /// Throughput in MiB/s
    pub throughput: i64,
}
