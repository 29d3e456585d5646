//! The seam between the drift engine and wherever instance state lives

use async_trait::async_trait;
use driftwatch_core::{InstanceMap, InstanceRecord};

use crate::errors::{instance_not_found, invalid_id, Result};

/// A provider of normalized instance records
///
/// Implementations may read files, call a cloud API, or serve fixtures.
#[async_trait]
pub trait InstanceSource: Send + Sync {
    /// Human-readable name used in errors and logs
    fn name(&self) -> &str;

    /// Load every instance this source knows about, keyed by id
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying state cannot be read or decoded.
    async fn load_all(&self) -> Result<InstanceMap>;

    /// Load one instance by id
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty id, `NotFound` when the id is absent, or
    /// any error from [`InstanceSource::load_all`].
    async fn get(&self, instance_id: &str) -> Result<InstanceRecord> {
        if instance_id.is_empty() {
            return Err(invalid_id());
        }
        let mut instances = self.load_all().await?;
        instances
            .remove(instance_id)
            .ok_or_else(|| instance_not_found(instance_id, self.name()))
    }

    /// Drop any cached state so the next load re-reads the source
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be reloaded.
    async fn refresh(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl InstanceSource for InstanceMap {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn load_all(&self) -> Result<InstanceMap> {
        Ok(self.clone())
    }
}
