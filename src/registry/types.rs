use serde::{Deserialize, Serialize};

/// Health tag reported by (or about) a service instance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    #[default]
    Up,
    Starting,
    Down,
}

/// A backend instance the gateway can route to.
///
/// `name` is the registry key. `registered_at` is stamped by the registry on every
/// (re-)registration, so whatever the caller sends in that field is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceInstance {
    pub name: String,
    /// Network location, e.g. `10.0.0.7:8081` or `http://search:8080`.
    pub address: String,
    #[serde(default)]
    pub status: InstanceStatus,
    #[serde(default)]
    pub registered_at: u64,
}

impl ServiceInstance {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            status: InstanceStatus::Up,
            registered_at: 0,
        }
    }
}

pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
