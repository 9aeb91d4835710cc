//! Directory Network Protocol
//!
//! Endpoint paths and DTOs exchanged between `HttpRegistry` and the directory server.

use super::types::Endpoint;
use serde::{Deserialize, Serialize};

/// Bind a new name.
pub const ENDPOINT_REGISTER: &str = "/registry/register";
/// Resolve a name; followed by `/:name`.
pub const ENDPOINT_LOOKUP: &str = "/registry/lookup";
/// List every bound name.
pub const ENDPOINT_LIST: &str = "/registry/list";
/// Remove a name; followed by `/:name`.
pub const ENDPOINT_ENTRY: &str = "/registry/entry";

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub endpoint: Endpoint,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub endpoint: Option<Endpoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub names: Vec<String>,
}
