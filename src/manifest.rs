// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Manifest loading: path resolution, placeholder substitution and the
//! per-document entry model handed to the cluster tool.

use crate::config::{discover_namespace, Config};
use crate::constants::MANIFEST_EXTENSION;
use crate::error::{KankubeError, Result};
use crate::template;
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resource kinds a manifest document may declare
const MANIFEST_KINDS: &[&str] = &[
    "ConfigMap",
    "DaemonSet",
    "Deployment",
    "Ingress",
    "Job",
    "Pod",
    "Secret",
    "Service",
];

/// One resolved document out of a manifest file
#[derive(Debug, Clone)]
pub struct Entry {
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub document: Value,
}

impl Entry {
    /// `<name> (<kind>) in <namespace>`, the form used in log and summary lines
    pub fn display_name(&self) -> String {
        format!("{} ({}) in {}", self.name, self.kind, self.namespace)
    }

    /// Serialized resolved document, the input for an apply/delete invocation
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.document).map_err(|e| KankubeError::Manifest(e.to_string()))
    }
}

/// Resolve a user-supplied name to a manifest path. Names without the `.yml`
/// extension are retried with it appended; names that still do not resolve
/// are ignored and yield no path. A `.yml` name that does not exist is an
/// error rather than an ignore.
pub fn resolve_manifest_path(name: &Path) -> Result<Option<PathBuf>> {
    if name.extension().and_then(|e| e.to_str()) == Some(MANIFEST_EXTENSION) {
        if name.is_file() {
            return Ok(Some(name.to_path_buf()));
        }
        return Err(KankubeError::Manifest(format!(
            "unknown file {}",
            name.display()
        )));
    }

    let mut with_extension = name.as_os_str().to_owned();
    with_extension.push(".");
    with_extension.push(MANIFEST_EXTENSION);
    let with_extension = PathBuf::from(with_extension);

    if with_extension.is_file() {
        return Ok(Some(with_extension));
    }

    info!("Ignoring file {}", name.display());
    Ok(None)
}

/// Load a manifest file and produce one entry per YAML document, with
/// namespace-scoped placeholders resolved. When `namespace` or `config` are
/// not supplied they are discovered from the manifest's directory; a
/// namespace without a substitution table leaves documents untouched.
pub fn load_entries(
    path: &Path,
    namespace: Option<&str>,
    config: Option<&Config>,
) -> Result<Vec<Entry>> {
    let raw = fs::read_to_string(path)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let namespace = match namespace {
        Some(ns) => ns.to_string(),
        None => discover_namespace(dir)?,
    };

    let discovered;
    let config = match config {
        Some(c) => c,
        None => {
            discovered = Config::discover(dir)?.unwrap_or_default();
            &discovered
        }
    };

    let source = path.display().to_string();
    let resolved = match config.substitutions_for(&namespace) {
        Some(substitutions) => template::resolve(&source, &raw, substitutions)?,
        None => {
            debug!("No substitutions configured for namespace {}", namespace);
            raw
        }
    };

    let mut entries = Vec::new();
    for document in serde_yaml::Deserializer::from_str(&resolved) {
        let value = Value::deserialize(document)
            .map_err(|e| KankubeError::Manifest(format!("{}: {}", source, e)))?;
        if value.is_null() {
            continue;
        }
        entries.push(entry_from_document(value, &namespace, &source)?);
    }

    debug!("Loaded {} entries from {}", entries.len(), source);
    Ok(entries)
}

fn entry_from_document(document: Value, namespace: &str, source: &str) -> Result<Entry> {
    let kind = document
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| KankubeError::Manifest(format!("{}: document has no kind", source)))?
        .to_string();

    if !MANIFEST_KINDS.contains(&kind.as_str()) {
        return Err(KankubeError::UnsupportedKind(kind));
    }

    let metadata = document.get("metadata");
    let name = metadata
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            KankubeError::Manifest(format!("{}: document has no metadata.name", source))
        })?
        .to_string();

    // An explicit metadata namespace wins over the ambient one
    let namespace = metadata
        .and_then(|m| m.get("namespace"))
        .and_then(Value::as_str)
        .unwrap_or(namespace)
        .to_string();

    Ok(Entry {
        kind,
        name,
        namespace,
        document,
    })
}
