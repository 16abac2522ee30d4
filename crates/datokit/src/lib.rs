// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed registration kit for CMS plugins.
//!
//! A [`PluginKit`] owns one registry per feature category (outlets, pages,
//! sidebars, field extensions, modals, the config screen, dropdown actions,
//! lifecycle events, structured text). Registering an entry makes it visible
//! to the hooks in the kit's [`ConnectParameters`](datokit_core::ConnectParameters);
//! [`PluginKit::connect`] hands those parameters to the host SDK.
//!
//! ```no_run
//! # async fn run(sdk: &dyn datokit_core::PluginSdk) -> Result<(), datokit_core::KitError> {
//! use std::sync::Arc;
//!
//! use datokit::{MemoryDocument, PageConfig, PluginKit, PluginOptions};
//! use datokit_core::{Node, PageCtx};
//!
//! let document = Arc::new(MemoryDocument::with_anchor("root"));
//! let kit = PluginKit::new(PluginOptions::default().document(document))?;
//! kit.add_page(PageConfig::new("reports", |ctx: &PageCtx| {
//!     Node::text(format!("page {}", ctx.page_id))
//! }))?;
//! kit.connect(sdk).await
//! # }
//! ```

pub mod factory;
pub mod helpers;
pub mod registration;
pub mod registry;
pub mod render;
pub mod validation;

// Re-export key items at crate root for ergonomic imports.
pub use factory::{PluginKit, PluginOptions};
pub use registry::{AppendList, Registry, Slot};
pub use render::{Container, Document, MemoryContainer, MemoryDocument, RootRenderer};

// Re-export every registration config at crate root.
pub use registration::config_screen::ConfigScreenConfig;
pub use registration::dropdowns::{
    DropdownActionConfig, FieldDropdownActionConfig, ItemFormDropdownActionConfig,
    ItemsDropdownActionConfig, UploadsDropdownActionConfig,
};
pub use registration::fields::{
    FieldExtensionConfig, FieldExtensionOverrideConfig, HIDDEN_FIELD_EXTENSION_ID,
};
pub use registration::modals::ModalConfig;
pub use registration::outlets::{CollectionOutletConfig, FormOutletConfig};
pub use registration::pages::PageConfig;
pub use registration::sidebars::{SidebarConfig, SidebarPanelConfig};
pub use registration::{Component, Predicate};
