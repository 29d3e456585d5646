//! Observed-state snapshots
//!
//! A snapshot is a file of already-normalized instance records, as a JSON
//! or YAML document. Two layouts are accepted:
//!
//! ```yaml
//! # a list of records
//! - instance_id: i-0abc
//!   instance_type: t3.micro
//! ```
//!
//! ```yaml
//! # records keyed by id (instance_id may be omitted)
//! i-0abc:
//!   instance_type: t3.micro
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use driftwatch_core::{InstanceMap, InstanceRecord};
use serde::Deserialize;

use crate::cache::StateCache;
use crate::errors::{io_error, state_parse, unsupported_format, Result};
use crate::source::InstanceSource;

const OP: &str = "load_snapshot";

/// Encoding of a snapshot file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(SnapshotFormat::Json),
            "yaml" | "yml" => Some(SnapshotFormat::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    List(Vec<InstanceRecord>),
    Keyed(BTreeMap<String, InstanceRecord>),
}

/// Decode a snapshot held in memory
///
/// # Errors
///
/// Returns `StateParse` when the document does not decode, a listed record
/// has no id, an id appears twice, or a keyed record's `instance_id`
/// disagrees with its key.
pub fn parse_snapshot(content: &str, format: SnapshotFormat, origin: &str) -> Result<InstanceMap> {
    let document: SnapshotDocument = match format {
        SnapshotFormat::Json => {
            serde_json::from_str(content).map_err(|e| state_parse(OP, origin, e.to_string()))?
        }
        SnapshotFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| state_parse(OP, origin, e.to_string()))?
        }
    };

    let mut instances = InstanceMap::new();
    match document {
        SnapshotDocument::List(records) => {
            for (index, record) in records.into_iter().enumerate() {
                if record.instance_id.is_empty() {
                    return Err(state_parse(
                        OP,
                        origin,
                        format!("record {} has no instance_id", index),
                    ));
                }
                let id = record.instance_id.clone();
                if instances.insert(id.clone(), record).is_some() {
                    return Err(state_parse(OP, origin, format!("duplicate instance_id {}", id)));
                }
            }
        }
        SnapshotDocument::Keyed(records) => {
            for (key, mut record) in records {
                if record.instance_id.is_empty() {
                    record.instance_id = key.clone();
                } else if record.instance_id != key {
                    return Err(state_parse(
                        OP,
                        origin,
                        format!(
                            "record keyed {} has instance_id {}",
                            key, record.instance_id
                        ),
                    ));
                }
                instances.insert(key, record);
            }
        }
    }

    tracing::info!(path = origin, instance_count = instances.len(), "parsed snapshot");
    Ok(instances)
}

/// Read and decode a snapshot file, picking the format from its extension
///
/// # Errors
///
/// `UnsupportedFormat` for extensions other than `.json`, `.yaml`, `.yml`;
/// `Io` when the file cannot be read; otherwise as [`parse_snapshot`].
pub async fn load_snapshot_file(path: &Path) -> Result<InstanceMap> {
    let origin = path.display().to_string();
    let format = SnapshotFormat::from_path(path).ok_or_else(|| unsupported_format(OP, &origin))?;

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| io_error(OP, &origin, e))?;

    parse_snapshot(&content, format, &origin)
}

/// Actual state read from a snapshot file
#[derive(Debug)]
pub struct SnapshotSource {
    path: PathBuf,
    name: String,
    cache: StateCache,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("snapshot {}", path.display());
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
impl InstanceSource for SnapshotSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_all(&self) -> Result<InstanceMap> {
        self.cache
            .get_or_load(|| load_snapshot_file(&self.path))
            .await
    }

    async fn refresh(&self) -> Result<()> {
        self.cache.clear().await;
        self.load_all().await.map(|_| ())
    }
}
