// Daemon configuration structs

use serde::{Deserialize, Serialize};

/// Connection settings for one backend daemon.
///
/// `host` may be omitted, in which case the registry resolves it to loopback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Hostname where the daemon lives (default: 127.0.0.1)
    #[serde(default)]
    pub host: Option<String>,

    /// Port where the daemon accepts RPC connections
    pub port: u16,

    /// Username for the RPC interface
    pub user: String,

    /// Password for the RPC interface
    pub password: String,
}

impl DaemonConfig {
    /// Config for a daemon on loopback.
    pub fn new(port: u16, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: None,
            port,
            user: user.into(),
            password: password.into(),
        }
    }

    /// Override the loopback default with an explicit host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }
}
