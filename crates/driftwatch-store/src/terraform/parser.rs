//! Terraform state parser

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use driftwatch_core::{InstanceMap, InstanceRecord};

use super::format::{Ec2Attributes, State, AWS_INSTANCE_TYPE};
use super::hcl::parse_hcl;
use crate::cache::StateCache;
use crate::errors::{io_error, state_parse, unsupported_format, Result};
use crate::source::InstanceSource;

const STATE_EXTENSIONS: &[&str] = &["tfstate", "json"];
const CONFIG_EXTENSION: &str = "tf";

/// Parse Terraform JSON state held in memory
///
/// `origin` names the input in errors (usually the file path).
///
/// # Errors
///
/// Returns `StateParse` when the document is not valid state JSON or an
/// `aws_instance` entry has attributes of the wrong shape.
pub fn parse_state_json(content: &str, origin: &str) -> Result<InstanceMap> {
    let state: State = serde_json::from_str(content)
        .map_err(|e| state_parse("parse_state", origin, e.to_string()))?;

    tracing::debug!(
        path = origin,
        version = state.version,
        resources = state.resources.len(),
        "parsing terraform state"
    );

    let mut instances = InstanceMap::new();
    for resource in state
        .resources
        .into_iter()
        .filter(|r| r.resource_type == AWS_INSTANCE_TYPE)
    {
        for instance in resource.instances {
            let attrs: Ec2Attributes = serde_json::from_value(instance.attributes).map_err(|e| {
                state_parse(
                    "parse_state",
                    origin,
                    format!("attributes of {}.{}: {}", AWS_INSTANCE_TYPE, resource.name, e),
                )
            })?;

            let record = InstanceRecord::from(attrs);
            if record.instance_id.is_empty() {
                tracing::warn!(
                    path = origin,
                    resource = %resource.name,
                    "skipping aws_instance without an id"
                );
                continue;
            }
            instances.insert(record.instance_id.clone(), record);
        }
    }

    tracing::info!(path = origin, instance_count = instances.len(), "parsed terraform state");
    Ok(instances)
}

/// Read and parse a Terraform state file
///
/// Dispatches on extension: `.tfstate` and `.json` are read as JSON
/// state, `.tf` as HCL configuration, and anything else is rejected.
///
/// # Errors
///
/// `UnsupportedFormat` for other extensions, `Io` when the file cannot be
/// read, or any error from [`parse_state_json`] or [`parse_hcl`].
pub async fn parse_state_file(path: &Path) -> Result<InstanceMap> {
    let origin = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let is_config = extension == CONFIG_EXTENSION;
    if !is_config && !STATE_EXTENSIONS.contains(&extension.as_str()) {
        tracing::error!(path = %origin, extension = %extension, "unsupported state file type");
        return Err(unsupported_format("load_state", &origin));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| io_error("load_state", &origin, e))?;

    if is_config {
        parse_hcl(&content, &origin)
    } else {
        parse_state_json(&content, &origin)
    }
}

/// Desired state read from a Terraform state or configuration file
///
/// The file is parsed on first use and cached until [`InstanceSource::refresh`].
#[derive(Debug)]
pub struct TerraformStateSource {
    path: PathBuf,
    name: String,
    cache: StateCache,
}

impl TerraformStateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("terraform state {}", path.display());
        Self {
            path,
            name,
            cache: StateCache::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl InstanceSource for TerraformStateSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_all(&self) -> Result<InstanceMap> {
        self.cache
            .get_or_load(|| parse_state_file(&self.path))
            .await
    }

    async fn refresh(&self) -> Result<()> {
        self.cache.clear().await;
        self.load_all().await.map(|_| ())
    }
}
