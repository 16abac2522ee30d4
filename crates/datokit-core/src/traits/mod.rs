// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits implemented outside this workspace: the host SDK,
//! the host bridge exposed through contexts, and the renderer.

pub mod host;
pub mod render;
pub mod sdk;

pub use host::{DetachedHost, HostBridge};
pub use render::Renderer;
pub use sdk::PluginSdk;
