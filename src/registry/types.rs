use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;

/// Scheme used by the in-process transport.
pub const LOCAL_SCHEME: &str = "local://";

/// Where a registered name can be reached.
///
/// HTTP endpoints carry a base URL (`http://127.0.0.1:7001`); in-process
/// endpoints use the `local://` scheme and are resolved by `LocalTransport`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Endpoint(pub String);

impl Endpoint {
    pub fn http(addr: SocketAddr) -> Self {
        Self(format!("http://{}", addr))
    }

    pub fn local(name: &str) -> Self {
        Self(format!("{}{}", LOCAL_SCHEME, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base URL with any trailing slash removed, ready for path joining.
    pub fn base_url(&self) -> &str {
        self.0.trim_end_matches('/')
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
