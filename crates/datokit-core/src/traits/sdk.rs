// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host SDK entry point.

use async_trait::async_trait;

use crate::error::KitError;
use crate::params::ConnectParameters;

/// The plugin SDK's connect entry point.
///
/// The SDK takes ownership of the assembled parameters and later invokes
/// the installed hooks with host-supplied contexts.
#[async_trait]
pub trait PluginSdk: Send + Sync {
    async fn connect(&self, parameters: ConnectParameters) -> Result<(), KitError>;
}
