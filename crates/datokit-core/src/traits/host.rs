// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host bridge: the operations a plugin may request from the CMS.

use crate::error::KitError;

/// Requests a plugin can make back to the host CMS.
///
/// Contexts carry an `Arc<dyn HostBridge>` so components and handlers can
/// act on the form or notify the editor. Implementations queue the request
/// to the host; they do not wait for it to be applied.
pub trait HostBridge: Send + Sync {
    /// Shows or hides the field at `path` in the item form.
    fn toggle_field(&self, path: &str, visible: bool) -> Result<(), KitError>;

    /// Sets the value of the field at `path` in the item form.
    fn set_field_value(&self, path: &str, value: serde_json::Value) -> Result<(), KitError>;

    /// Shows a non-blocking success notice.
    fn notice(&self, message: &str) -> Result<(), KitError>;

    /// Shows a non-blocking error alert.
    fn alert(&self, message: &str) -> Result<(), KitError>;
}

/// A bridge that accepts and discards every request.
///
/// Used where no host is attached, such as contexts assembled for previews.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHost;

impl HostBridge for DetachedHost {
    fn toggle_field(&self, path: &str, visible: bool) -> Result<(), KitError> {
        tracing::debug!(path, visible, "toggle_field on detached host");
        Ok(())
    }

    fn set_field_value(&self, path: &str, _value: serde_json::Value) -> Result<(), KitError> {
        tracing::debug!(path, "set_field_value on detached host");
        Ok(())
    }

    fn notice(&self, _message: &str) -> Result<(), KitError> {
        Ok(())
    }

    fn alert(&self, _message: &str) -> Result<(), KitError> {
        Ok(())
    }
}
