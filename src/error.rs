// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KankubeError {
    #[error("unresolved placeholder '{key}' in {document}")]
    UnresolvedPlaceholder { key: String, document: String },

    #[error("unsupported resource kind: {0}")]
    UnsupportedKind(String),

    #[error("malformed status: missing field '{0}'")]
    MalformedStatus(String),

    #[error("failed to load config: {0}")]
    Config(String),

    #[error("failed to load manifest: {0}")]
    Manifest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KankubeError>;
