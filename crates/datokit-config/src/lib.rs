// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the datokit plugin kit.
//!
//! Settings are read from TOML with strict key checking, layered over the
//! XDG hierarchy and `DATOKIT_*` environment variables, then validated.
//! Failures come back as miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use datokit_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("duplicate ids: {}", config.plugin.duplicate_id_handling);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{DEFAULT_MOUNT_ID, KitConfig, LoggingConfig, PluginSection};

const CONFIG_FILE: &str = "datokit.toml";

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<KitConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                duplicate_id_handling = %config.plugin.duplicate_id_handling,
                mount_id = %config.plugin.mount_id,
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Parse and validate configuration from a TOML string.
pub fn load_and_validate_str(toml_content: &str) -> Result<KitConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = [("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from one explicit file (plus environment overrides)
/// and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<KitConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources: Vec<(String, String)> = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Read whichever config files exist, for source spans in diagnostics.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![
        std::env::current_dir()
            .map(|d| d.join(CONFIG_FILE))
            .unwrap_or_else(|_| CONFIG_FILE.into()),
    ];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("datokit").join(CONFIG_FILE));
    }
    candidates.push(std::path::Path::new("/etc/datokit").join(CONFIG_FILE));

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
