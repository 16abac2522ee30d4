// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the datokit plugin kit.
//!
//! This crate defines everything shared between the registration layer and
//! the outside world: the error type, the duplicate-ID policy, the CMS schema
//! objects and host contexts, the descriptors returned to the SDK, the
//! [`ConnectParameters`] hook table, and the collaborator traits
//! ([`PluginSdk`], [`HostBridge`], [`Renderer`]).

pub mod context;
pub mod error;
pub mod node;
pub mod params;
pub mod schema;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use context::{
    Ctx, FieldCtx, FieldExtensionConfigCtx, ItemFormCtx, ItemsActionCtx, ModalCtx, PageCtx,
    PluginInfo, UploadsActionCtx,
};
pub use error::KitError;
pub use node::{Element, Node};
pub use params::ConnectParameters;
pub use schema::{Field, Item, ItemType, Upload};
pub use traits::{DetachedHost, HostBridge, PluginSdk, Renderer};
pub use types::{DropdownActionType, DuplicateIdHandling, FieldType, Icon};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kit_error_messages_name_entity_and_field() {
        let missing = KitError::MissingField {
            entity: "Page",
            field: "page_id",
        };
        assert_eq!(missing.to_string(), "Page requires field \"page_id\"");

        let duplicate = KitError::DuplicateId {
            entity: "Form outlet".into(),
            id: "outlet-1".into(),
        };
        assert_eq!(
            duplicate.to_string(),
            "Form outlet with id \"outlet-1\" is already registered"
        );

        let configured = KitError::AlreadyConfigured {
            what: "Config screen",
        };
        assert_eq!(configured.to_string(), "Config screen is already configured");
    }

    #[test]
    fn kit_error_has_all_variants() {
        let _ = KitError::UnknownActionType("x".into());
        let _ = KitError::NotImplemented("Collection outlets");
        let _ = KitError::MountNotFound { id: "root".into() };
        let _ = KitError::handler("boom");
        let _ = KitError::Sdk {
            message: "closed".into(),
            source: Some(Box::new(std::io::Error::other("pipe"))),
        };
        let _ = KitError::Config("bad".into());
    }

    #[test]
    fn closures_are_renderers() {
        fn assert_renderer<R: Renderer>(_: &R) {}
        let renderer = |_node: Node| -> Result<(), KitError> { Ok(()) };
        assert_renderer(&renderer);
        assert!(renderer.render(Node::Empty).is_ok());
    }

    #[test]
    fn all_collaborator_traits_are_exported() {
        fn _assert_sdk<T: PluginSdk>() {}
        fn _assert_host<T: HostBridge>() {}
        fn _assert_renderer<T: Renderer>() {}
        _assert_host::<DetachedHost>();
    }
}
