use parking_lot::RwLock;
use std::collections::HashMap;

use super::types::{InstanceStatus, ServiceInstance};

/// Name -> instance map behind a single reader/writer lock.
///
/// Lookups vastly outnumber registrations, so readers share the lock and writers
/// take it exclusively. Nothing that can block runs while the lock is held.
#[derive(Default)]
pub struct RegistryStore {
    entries: RwLock<HashMap<String, ServiceInstance>>,
}

impl RegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `instance.name`, returning the previous one.
    pub fn upsert(&self, instance: ServiceInstance) -> Option<ServiceInstance> {
        self.entries.write().insert(instance.name.clone(), instance)
    }

    pub fn get(&self, name: &str) -> Option<ServiceInstance> {
        self.entries.read().get(name).cloned()
    }

    pub fn remove(&self, name: &str) -> Option<ServiceInstance> {
        self.entries.write().remove(name)
    }

    pub fn set_status(&self, name: &str, status: InstanceStatus) -> Option<ServiceInstance> {
        let mut entries = self.entries.write();
        let entry = entries.get_mut(name)?;
        entry.status = status;
        Some(entry.clone())
    }

    /// Owned copy of the whole map.
    pub fn snapshot(&self) -> HashMap<String, ServiceInstance> {
        self.entries.read().clone()
    }

    /// Drops every entry registered strictly before `cutoff_ms`; returns the removed names.
    pub fn remove_registered_before(&self, cutoff_ms: u64) -> Vec<String> {
        let mut entries = self.entries.write();
        let stale: Vec<String> = entries
            .values()
            .filter(|instance| instance.registered_at < cutoff_ms)
            .map(|instance| instance.name.clone())
            .collect();
        for name in &stale {
            entries.remove(name);
        }
        stale
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}
