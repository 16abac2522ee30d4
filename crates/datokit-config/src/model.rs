// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the datokit plugin kit.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys, so a typo surfaces as a diagnostic instead of a silent default.

use datokit_core::DuplicateIdHandling;
use serde::{Deserialize, Serialize};

/// Default mount anchor for the root renderer.
pub const DEFAULT_MOUNT_ID: &str = "root";

/// Top-level datokit configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KitConfig {
    /// Registration behavior.
    #[serde(default)]
    pub plugin: PluginSection,

    /// Log output settings for binaries embedding the kit.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Registration behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginSection {
    /// What to do when a registration reuses an ID: `throw`, `warn`, or `ignore`.
    #[serde(default)]
    pub duplicate_id_handling: DuplicateIdHandling,

    /// Element ID the default renderer mounts into.
    #[serde(default = "default_mount_id")]
    pub mount_id: String,
}

impl Default for PluginSection {
    fn default() -> Self {
        Self {
            duplicate_id_handling: DuplicateIdHandling::default(),
            mount_id: default_mount_id(),
        }
    }
}

fn default_mount_id() -> String {
    DEFAULT_MOUNT_ID.to_string()
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
