// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// File name of the substitution config, searched upward from a manifest
pub const CONFIG_FILE: &str = "kankube.yml";

/// File name holding the active namespace, searched upward from a manifest
pub const NAMESPACE_FILE: &str = ".namespace";

/// Namespace used when no `.namespace` file is found
pub const DEFAULT_NAMESPACE: &str = "default";

/// Extension manifests are expected to carry
pub const MANIFEST_EXTENSION: &str = "yml";
