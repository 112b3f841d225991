//! Registry HTTP Protocol
//!
//! Endpoints and DTOs shared by the registry handlers and `RegistryClient`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::{InstanceStatus, ServiceInstance};

pub const ENDPOINT_REGISTER: &str = "/registry/register";
pub const ENDPOINT_LOOKUP: &str = "/registry/lookup";
pub const ENDPOINT_SERVICES: &str = "/registry/services";
pub const ENDPOINT_PRUNE: &str = "/registry/prune";

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub instance: ServiceInstance,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListServicesResponse {
    pub count: usize,
    pub services: HashMap<String, ServiceInstance>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeregisterResponse {
    pub name: String,
    pub removed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: InstanceStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PruneRequest {
    /// Registrations stamped before this instant (ms since epoch) are removed.
    pub cutoff_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PruneResponse {
    pub removed: Vec<String>,
}
