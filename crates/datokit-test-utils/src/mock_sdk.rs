// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plugin SDK for deterministic testing.
//!
//! `MockSdk` implements `PluginSdk` by storing whatever parameters it is
//! handed, so tests can invoke the installed hooks the way a host would.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use datokit_core::params::ConnectParameters;
use datokit_core::{KitError, PluginSdk};

/// A mock SDK that captures connect parameters.
pub struct MockSdk {
    captured: Arc<Mutex<Vec<ConnectParameters>>>,
    failure: Option<String>,
}

impl MockSdk {
    /// Create a mock SDK that accepts every connect call.
    pub fn new() -> Self {
        Self {
            captured: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// Create a mock SDK whose connect always fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            captured: Arc::new(Mutex::new(Vec::new())),
            failure: Some(message.into()),
        }
    }

    /// Parameters from the most recent successful connect call.
    pub async fn parameters(&self) -> Option<ConnectParameters> {
        self.captured.lock().await.last().cloned()
    }

    /// Number of successful connect calls.
    pub async fn connect_count(&self) -> usize {
        self.captured.lock().await.len()
    }
}

impl Default for MockSdk {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginSdk for MockSdk {
    async fn connect(&self, parameters: ConnectParameters) -> Result<(), KitError> {
        if let Some(message) = &self.failure {
            return Err(KitError::Sdk {
                message: message.clone(),
                source: None,
            });
        }
        tracing::debug!(hooks = ?parameters.installed_hooks(), "mock sdk connected");
        self.captured.lock().await.push(parameters);
        Ok(())
    }
}
