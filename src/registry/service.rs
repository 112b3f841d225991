use std::collections::HashMap;
use std::sync::Arc;

use super::store::RegistryStore;
use super::types::{InstanceStatus, ServiceInstance, now_ms};
use crate::error::{Error, Result};

pub struct RegistryService {
    store: RegistryStore,
}

impl RegistryService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            store: RegistryStore::new(),
        })
    }

    /// Registers `instance`, replacing any previous entry with the same name.
    ///
    /// Validation runs before the store's write lock is taken.
    pub fn register(&self, mut instance: ServiceInstance) -> Result<ServiceInstance> {
        let name = instance.name.trim();
        if name.is_empty() {
            return Err(Error::invalid("service name must not be empty"));
        }
        if name.len() != instance.name.len() {
            instance.name = name.to_string();
        }
        instance.registered_at = now_ms();

        match self.store.upsert(instance.clone()) {
            Some(previous) => tracing::info!(
                "Re-registered service '{}': {} -> {}",
                instance.name,
                previous.address,
                instance.address
            ),
            None => tracing::info!(
                "Registered service '{}' at {} ({} known)",
                instance.name,
                instance.address,
                self.service_count()
            ),
        }

        Ok(instance)
    }

    pub fn lookup(&self, name: &str) -> Result<ServiceInstance> {
        self.store
            .get(name)
            .ok_or_else(|| Error::not_found("service", name))
    }

    /// Snapshot of every registration. Mutating the returned map never touches the registry.
    pub fn list_all(&self) -> HashMap<String, ServiceInstance> {
        self.store.snapshot()
    }

    /// Removes a registration. Returns whether anything was removed.
    pub fn deregister(&self, name: &str) -> bool {
        let removed = self.store.remove(name).is_some();
        if removed {
            tracing::info!("Deregistered service '{}'", name);
        } else {
            tracing::debug!("Deregister of unknown service '{}' ignored", name);
        }
        removed
    }

    pub fn set_status(&self, name: &str, status: InstanceStatus) -> Result<ServiceInstance> {
        let updated = self
            .store
            .set_status(name, status)
            .ok_or_else(|| Error::not_found("service", name))?;
        tracing::info!("Service '{}' is now {:?}", name, status);
        Ok(updated)
    }

    /// Evicts registrations older than `cutoff_ms`. Nothing calls this implicitly;
    /// operators decide when instances count as stale.
    pub fn prune_older_than(&self, cutoff_ms: u64) -> Vec<String> {
        let removed = self.store.remove_registered_before(cutoff_ms);
        if !removed.is_empty() {
            tracing::info!("Pruned {} stale registration(s): {:?}", removed.len(), removed);
        }
        removed
    }

    pub fn service_count(&self) -> usize {
        self.store.len()
    }
}
