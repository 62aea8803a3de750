// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{CONFIG_FILE, DEFAULT_NAMESPACE, NAMESPACE_FILE};
use crate::error::{KankubeError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Placeholder key to replacement value, scoped to one namespace
pub type Substitutions = BTreeMap<String, String>;

/// Substitution config loaded from a `kankube.yml` file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub namespace_substitutions: HashMap<String, Substitutions>,
}

impl Config {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| KankubeError::Config(e.to_string()))
    }

    /// Load the nearest `kankube.yml`, walking from `start` toward the
    /// filesystem root. `Ok(None)` when no config file exists on the path.
    pub fn discover(start: &Path) -> Result<Option<Self>> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                debug!("Loading substitution config from {}", candidate.display());
                let raw = fs::read_to_string(&candidate)?;
                return Self::from_yaml(&raw).map(Some);
            }
        }

        Ok(None)
    }

    /// Substitution table scoped to `namespace`, if one is configured
    pub fn substitutions_for(&self, namespace: &str) -> Option<&Substitutions> {
        self.namespace_substitutions.get(namespace)
    }
}

/// Determine the active namespace by walking from `start` toward the
/// filesystem root looking for a `.namespace` file. Falls back to `default`.
pub fn discover_namespace(start: &Path) -> Result<String> {
    for dir in start.ancestors() {
        let candidate = dir.join(NAMESPACE_FILE);
        if candidate.is_file() {
            let raw = fs::read_to_string(&candidate)?;
            return Ok(raw.trim().to_string());
        }
    }

    Ok(DEFAULT_NAMESPACE.to_string())
}
