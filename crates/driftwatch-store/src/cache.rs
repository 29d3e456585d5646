use std::future::Future;

use driftwatch_core::InstanceMap;
use tokio::sync::RwLock;

use crate::errors::Result;

/// Parsed-once state shared by file-backed sources
#[derive(Debug, Default)]
pub(crate) struct StateCache {
    instances: RwLock<Option<InstanceMap>>,
}

impl StateCache {
    /// Return the cached map, loading it on first use
    pub(crate) async fn get_or_load<F, Fut>(&self, load: F) -> Result<InstanceMap>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<InstanceMap>>,
    {
        if let Some(instances) = self.instances.read().await.as_ref() {
            return Ok(instances.clone());
        }

        let mut slot = self.instances.write().await;
        if let Some(instances) = slot.as_ref() {
            return Ok(instances.clone());
        }
        let instances = load().await?;
        *slot = Some(instances.clone());
        Ok(instances)
    }

    pub(crate) async fn clear(&self) {
        *self.instances.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftwatch_core::InstanceRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_loads_once_until_cleared() {
        let cache = StateCache::default();
        let loads = AtomicUsize::new(0);
        let counter = &loads;
        let load = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            let mut map = InstanceMap::new();
            map.insert("i-1".to_string(), InstanceRecord::new("i-1"));
            Ok::<_, driftwatch_core::DwError>(map)
        };

        assert_eq!(cache.get_or_load(load).await.unwrap().len(), 1);
        assert_eq!(cache.get_or_load(load).await.unwrap().len(), 1);
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        cache.clear().await;
        cache.get_or_load(load).await.unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }
}
