//! Terraform HCL configuration parser
//!
//! Reads `resource "aws_instance" "<name>"` blocks out of a `.tf` file.
//! Nothing is evaluated: only literal values are mapped, so variables,
//! references and interpolated strings leave the field at its zero value.
//! Instances are keyed by resource name since configuration carries no ids.

use ::hcl::{Block, Body, Expression, ObjectKey};
use driftwatch_core::{InstanceMap, InstanceRecord};

use super::format::{Ec2Attributes, RootBlockDeviceAttributes, AWS_INSTANCE_TYPE};
use crate::errors::{state_parse, Result};

const RESOURCE_BLOCK: &str = "resource";
const ROOT_BLOCK_DEVICE: &str = "root_block_device";

/// Parse Terraform HCL configuration held in memory
///
/// `origin` names the input in errors (usually the file path).
///
/// # Errors
///
/// Returns `StateParse` when the content is not valid HCL.
pub fn parse_hcl(content: &str, origin: &str) -> Result<InstanceMap> {
    tracing::debug!(path = origin, bytes = content.len(), "parsing terraform configuration");

    let body: Body = ::hcl::parse(content)
        .map_err(|e| state_parse("parse_hcl", origin, format!("failed to parse HCL: {e}")))?;

    let mut instances = InstanceMap::new();
    for block in body.blocks().filter(|b| b.identifier() == RESOURCE_BLOCK) {
        let Some(name) = instance_resource_name(block) else {
            continue;
        };

        let mut record = InstanceRecord::from(resource_attributes(block.body()));
        record.instance_id = name.to_owned();
        instances.insert(record.instance_id.clone(), record);
    }

    tracing::info!(path = origin, instance_count = instances.len(), "parsed terraform configuration");
    Ok(instances)
}

/// Name label of an `aws_instance` resource block
fn instance_resource_name(block: &Block) -> Option<&str> {
    match block.labels() {
        [kind, name, ..] if kind.as_str() == AWS_INSTANCE_TYPE => Some(name.as_str()),
        _ => None,
    }
}

fn resource_attributes(body: &Body) -> Ec2Attributes {
    let mut attrs = Ec2Attributes::default();

    for attribute in body.attributes() {
        let expr = attribute.expr();
        match attribute.key() {
            "ami" => attrs.ami = literal_string(expr),
            "instance_type" => attrs.instance_type = literal_string(expr),
            "availability_zone" => attrs.availability_zone = literal_string(expr),
            "subnet_id" => attrs.subnet_id = literal_string(expr),
            "key_name" => attrs.key_name = literal_string(expr),
            "iam_instance_profile" => attrs.iam_instance_profile = literal_string(expr),
            "ebs_optimized" => attrs.ebs_optimized = literal_bool(expr),
            "monitoring" => attrs.monitoring = literal_bool(expr),
            "vpc_security_group_ids" => attrs.vpc_security_group_ids = literal_string_list(expr),
            "security_groups" => attrs.security_groups = literal_string_list(expr),
            "tags" => attrs.tags = literal_string_map(expr),
            _ => {}
        }
    }

    // Only the first root_block_device counts, matching state files
    attrs.root_block_device = body
        .blocks()
        .find(|b| b.identifier() == ROOT_BLOCK_DEVICE)
        .map(|b| vec![root_block_device(b.body())]);

    attrs
}

fn root_block_device(body: &Body) -> RootBlockDeviceAttributes {
    let mut device = RootBlockDeviceAttributes::default();

    for attribute in body.attributes() {
        let expr = attribute.expr();
        match attribute.key() {
            "volume_size" => device.volume_size = literal_int(expr),
            "volume_type" => device.volume_type = literal_string(expr),
            "delete_on_termination" => device.delete_on_termination = literal_bool(expr),
            "encrypted" => device.encrypted = literal_bool(expr),
            "iops" => device.iops = literal_int(expr),
            "throughput" => device.throughput = literal_int(expr),
            _ => {}
        }
    }

    device
}

fn literal_string(expr: &Expression) -> Option<String> {
    match expr {
        Expression::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn literal_bool(expr: &Expression) -> Option<bool> {
    match expr {
        Expression::Bool(b) => Some(*b),
        _ => None,
    }
}

fn literal_int(expr: &Expression) -> Option<i64> {
    match expr {
        Expression::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// String elements of a list literal; other elements are dropped
fn literal_string_list(expr: &Expression) -> Option<Vec<String>> {
    match expr {
        Expression::Array(items) => Some(items.iter().filter_map(literal_string).collect()),
        _ => None,
    }
}

/// String-valued entries of an object literal; other entries are dropped
fn literal_string_map(expr: &Expression) -> Option<std::collections::BTreeMap<String, String>> {
    match expr {
        Expression::Object(object) => Some(
            object
                .iter()
                .filter_map(|(key, value)| Some((object_key(key)?, literal_string(value)?)))
                .collect(),
        ),
        _ => None,
    }
}

fn object_key(key: &ObjectKey) -> Option<String> {
    match key {
        ObjectKey::Identifier(ident) => Some(ident.as_str().to_owned()),
        ObjectKey::Expression(expr) => literal_string(expr),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftwatch_core::DwErrorKind;

    const CONFIG: &str = r#"
        provider "aws" {
          region = "us-east-1"
        }

        resource "aws_security_group" "web" {
          name = "web"
        }

        resource "aws_instance" "web" {
          ami                    = "ami-0c55b159cbfafe1f0"
          instance_type          = "t3.micro"
          availability_zone      = "us-east-1a"
          vpc_security_group_ids = ["sg-0123", var.extra_group]
          ebs_optimized          = true
          iam_instance_profile   = aws_iam_instance_profile.web.name

          tags = {
            Name          = "web"
            "Environment" = "prod"
            Owner         = var.owner
          }

          root_block_device {
            volume_size = 20
            volume_type = "gp3"
            encrypted   = true
          }
        }
    "#;

    #[test]
    fn test_maps_aws_instance_blocks_by_resource_name() {
        let instances = parse_hcl(CONFIG, "main.tf").unwrap();
        assert_eq!(instances.len(), 1);

        let web = &instances["web"];
        assert_eq!(web.instance_id, "web");
        assert_eq!(web.ami, "ami-0c55b159cbfafe1f0");
        assert_eq!(web.instance_type, "t3.micro");
        assert_eq!(web.availability_zone, "us-east-1a");
        assert!(web.ebs_optimized);
        assert!(!web.monitoring);
        assert_eq!(web.security_groups, vec!["sg-0123"]);
        assert_eq!(web.root_block_device.volume_size, 20);
        assert_eq!(web.root_block_device.volume_type, "gp3");
        assert!(web.root_block_device.encrypted);
    }

    #[test]
    fn test_references_leave_zero_values() {
        let instances = parse_hcl(CONFIG, "main.tf").unwrap();
        let web = &instances["web"];

        assert_eq!(web.iam_instance_profile, "");
        assert_eq!(web.tags.len(), 2);
        assert_eq!(web.tags.get("Environment").map(String::as_str), Some("prod"));
        assert!(!web.tags.contains_key("Owner"));
    }

    #[test]
    fn test_resource_without_name_label_is_ignored() {
        let config = r#"resource "aws_instance" { ami = "ami-1" }"#;
        assert!(parse_hcl(config, "main.tf").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_hcl_is_a_parse_error() {
        let err = parse_hcl("resource \"aws_instance\" \"web\" {", "broken.tf").unwrap_err();
        assert_eq!(err.kind(), DwErrorKind::StateParse);
        assert_eq!(err.path(), Some("broken.tf"));
        assert!(err.message().contains("failed to parse HCL"));
    }
}
