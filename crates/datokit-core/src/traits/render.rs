// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render collaborator trait.

use crate::error::KitError;
use crate::node::Node;

/// Mounts component output.
///
/// Called synchronously every time the host invokes a render hook. Any
/// `Fn(Node) -> Result<(), KitError>` closure is a renderer.
pub trait Renderer: Send + Sync {
    fn render(&self, node: Node) -> Result<(), KitError>;
}

impl<F> Renderer for F
where
    F: Fn(Node) -> Result<(), KitError> + Send + Sync,
{
    fn render(&self, node: Node) -> Result<(), KitError> {
        self(node)
    }
}
