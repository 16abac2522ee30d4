// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording doubles for the render and host collaborators.

use std::sync::{Mutex, PoisonError};

use datokit_core::{HostBridge, KitError, Node, Renderer};

/// Renderer that keeps every node it is asked to render.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    rendered: Mutex<Vec<Node>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All rendered nodes, oldest first.
    pub fn rendered(&self) -> Vec<Node> {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Markup of the most recent render.
    pub fn last_markup(&self) -> Option<String> {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(Node::to_markup)
    }

    pub fn render_count(&self) -> usize {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, node: Node) -> Result<(), KitError> {
        self.rendered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(node);
        Ok(())
    }
}

/// A request made through the host bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    ToggleField { path: String, visible: bool },
    SetFieldValue { path: String, value: serde_json::Value },
    Notice(String),
    Alert(String),
}

/// Host bridge that records requests instead of forwarding them.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: HostCall) -> Result<(), KitError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        Ok(())
    }
}

impl HostBridge for RecordingHost {
    fn toggle_field(&self, path: &str, visible: bool) -> Result<(), KitError> {
        self.record(HostCall::ToggleField {
            path: path.to_string(),
            visible,
        })
    }

    fn set_field_value(&self, path: &str, value: serde_json::Value) -> Result<(), KitError> {
        self.record(HostCall::SetFieldValue {
            path: path.to_string(),
            value,
        })
    }

    fn notice(&self, message: &str) -> Result<(), KitError> {
        self.record(HostCall::Notice(message.to_string()))
    }

    fn alert(&self, message: &str) -> Result<(), KitError> {
        self.record(HostCall::Alert(message.to_string()))
    }
}
