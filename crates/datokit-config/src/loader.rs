// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./datokit.toml` > `~/.config/datokit/datokit.toml` > `/etc/datokit/datokit.toml`
//! with environment variable overrides via `DATOKIT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KitConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/datokit/datokit.toml` (system-wide)
/// 3. `~/.config/datokit/datokit.toml` (user XDG config)
/// 4. `./datokit.toml` (local directory)
/// 5. `DATOKIT_*` environment variables
pub fn load_config() -> Result<KitConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<KitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KitConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KitConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KitConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(KitConfig::default()))
        .merge(Toml::file("/etc/datokit/datokit.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("datokit/datokit.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("datokit.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `DATOKIT_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")`: keys such as
/// `duplicate_id_handling` contain underscores themselves.
fn env_provider() -> Env {
    Env::prefixed("DATOKIT_").map(|key| {
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("plugin_", "plugin.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
