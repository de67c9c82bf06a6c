// Instance registry
//
// The fixed list of configured daemon endpoints. Built once from caller
// configuration and never mutated afterwards; instances are shared as Arcs so
// outcomes can point back at the daemon they came from.

use anyhow::{bail, Result};
use std::sync::Arc;

use crate::config::DaemonConfig;

const DEFAULT_HOST: &str = "127.0.0.1";

/// One configured daemon endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonInstance {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Position in the configuration sequence, for diagnostics.
    pub index: usize,
}

impl DaemonInstance {
    /// RPC endpoint URL for this daemon.
    pub fn url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

/// Immutable, ordered set of daemon instances.
#[derive(Debug, Clone)]
pub struct InstanceRegistry {
    instances: Vec<Arc<DaemonInstance>>,
}

impl InstanceRegistry {
    /// Build a registry from one or more daemon configurations.
    ///
    /// Indices follow input order; an empty configuration list is rejected.
    pub fn new(configs: Vec<DaemonConfig>) -> Result<Self> {
        if configs.is_empty() {
            bail!("At least one daemon configuration is required");
        }

        let instances = configs
            .into_iter()
            .enumerate()
            .map(|(index, config)| {
                Arc::new(DaemonInstance {
                    host: config.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                    port: config.port,
                    user: config.user,
                    password: config.password,
                    index,
                })
            })
            .collect();

        Ok(Self { instances })
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// First configured instance (batch commands go only here).
    pub fn first(&self) -> &Arc<DaemonInstance> {
        &self.instances[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<DaemonInstance>> {
        self.instances.iter()
    }
}
