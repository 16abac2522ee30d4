// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::KitConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &KitConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let mount_id = &config.plugin.mount_id;
    if mount_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "plugin.mount_id must not be empty".to_string(),
        });
    } else if mount_id.chars().any(char::is_whitespace) {
        errors.push(ConfigError::Validation {
            message: format!("plugin.mount_id `{mount_id}` must not contain whitespace"),
        });
    }

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
