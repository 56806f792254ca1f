//! Supported-network registry.
//!
//! Loaded from TOML, one table per network:
//!
//! ```toml
//! [networks.sepolia]
//! chain_id = 11155111
//! multisig_repo = "0x..."
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::*;

use crate::errors::ConfigError;

/// Deployment details of one supported network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEntry {
    pub chain_id: u64,
    /// Address of the multisig plugin repository on this network.
    pub multisig_repo: Address,
}

/// Networks the plugin can be installed on, keyed by network name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRegistry {
    #[serde(default)]
    networks: BTreeMap<String, NetworkEntry>,
}

impl NetworkRegistry {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let registry = Self::from_toml_str(&raw)?;
        debug!(
            path = %path.display(),
            networks = registry.networks.len(),
            "loaded network registry"
        );
        Ok(registry)
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: NetworkEntry) {
        self.networks.insert(name.into(), entry);
    }

    /// Looks a network up by name, or by decimal chain id.
    pub fn resolve(&self, network: &str) -> Option<(&str, &NetworkEntry)> {
        if let Some((name, entry)) = self.networks.get_key_value(network) {
            return Some((name.as_str(), entry));
        }
        let chain_id = network.parse::<u64>().ok()?;
        self.networks
            .iter()
            .find(|(_, entry)| entry.chain_id == chain_id)
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}
