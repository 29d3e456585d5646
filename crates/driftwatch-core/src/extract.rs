//! Value extraction
//!
//! Resolves an attribute path against one instance record. Pure: no I/O,
//! no logging, no mutation.

use serde_json::json;

use crate::errors::Result;
use crate::model::{BlockDevice, InstanceRecord};
use crate::registry::{AttributePath, BlockDeviceField, InstanceField};
use crate::value::AttributeValue;

/// Resolve a parsed path against a record
///
/// Infallible once the path has been validated. A missing tag key resolves
/// to an empty string rather than an absence marker.
pub fn extract_value(record: &InstanceRecord, path: &AttributePath) -> AttributeValue {
    match path {
        AttributePath::Field(field) => extract_field(record, *field),
        AttributePath::Tag(key) => {
            AttributeValue::String(record.tags.get(key).cloned().unwrap_or_default())
        }
        AttributePath::BlockDevice(field) => {
            extract_block_device_field(&record.root_block_device, *field)
        }
    }
}

/// Parse `path` and resolve it against a record
///
/// # Errors
///
/// Returns `InvalidPath` or `UnknownAttribute` when the path does not parse.
pub fn extract(record: &InstanceRecord, path: &str) -> Result<AttributeValue> {
    let parsed = AttributePath::parse(path)?;
    Ok(extract_value(record, &parsed))
}

fn extract_field(record: &InstanceRecord, field: InstanceField) -> AttributeValue {
    match field {
        InstanceField::InstanceType => record.instance_type.clone().into(),
        InstanceField::Ami => record.ami.clone().into(),
        InstanceField::AvailabilityZone => record.availability_zone.clone().into(),
        InstanceField::SubnetId => record.subnet_id.clone().into(),
        InstanceField::VpcId => record.vpc_id.clone().into(),
        InstanceField::PrivateIp => record.private_ip.clone().into(),
        InstanceField::PublicIp => record.public_ip.clone().into(),
        InstanceField::KeyName => record.key_name.clone().into(),
        InstanceField::SecurityGroups => record.security_groups.clone().into(),
        InstanceField::Tags => record.tags.clone().into(),
        InstanceField::EbsOptimized => record.ebs_optimized.into(),
        InstanceField::Monitoring => record.monitoring.into(),
        InstanceField::IamInstanceProfile => record.iam_instance_profile.clone().into(),
        InstanceField::RootBlockDevice => block_device_structure(&record.root_block_device),
    }
}

fn extract_block_device_field(device: &BlockDevice, field: BlockDeviceField) -> AttributeValue {
    match field {
        BlockDeviceField::VolumeSize => device.volume_size.into(),
        BlockDeviceField::VolumeType => device.volume_type.clone().into(),
        BlockDeviceField::DeleteOnTermination => device.delete_on_termination.into(),
        BlockDeviceField::Encrypted => device.encrypted.into(),
        BlockDeviceField::Iops => device.iops.into(),
        BlockDeviceField::Throughput => device.throughput.into(),
    }
}

fn block_device_structure(device: &BlockDevice) -> AttributeValue {
    AttributeValue::Structural(json!({
        "volume_size": device.volume_size,
        "volume_type": device.volume_type,
        "delete_on_termination": device.delete_on_termination,
        "encrypted": device.encrypted,
        "iops": device.iops,
        "throughput": device.throughput,
    }))
}
