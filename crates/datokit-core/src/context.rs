// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime contexts supplied by the host when it invokes a hook.
//!
//! Every context derefs to the base [`Ctx`], so schema lookups and the host
//! bridge are reachable from any of them. Specialized contexts add the data
//! of the surface being rendered (the page, the item form, the field).

use std::collections::{BTreeMap, HashMap};
use std::ops::Deref;
use std::sync::Arc;

use crate::schema::{Field, Item, ItemType, Upload};
use crate::traits::{DetachedHost, HostBridge};

/// The installed plugin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginInfo {
    pub id: String,
    pub name: String,
    /// Global plugin parameters saved from the config screen.
    pub parameters: serde_json::Value,
}

/// The base context every hook receives.
#[derive(Clone)]
pub struct Ctx {
    pub plugin: PluginInfo,
    pub locale: String,
    /// Access level of the current user, if the host exposes it.
    pub current_user_access_level: Option<String>,
    /// Models loaded by the host, keyed by ID.
    pub item_types: HashMap<String, ItemType>,
    /// Fields loaded by the host, keyed by ID.
    pub fields: HashMap<String, Field>,
    pub host: Arc<dyn HostBridge>,
}

impl std::fmt::Debug for Ctx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ctx")
            .field("plugin", &self.plugin)
            .field("locale", &self.locale)
            .field("current_user_access_level", &self.current_user_access_level)
            .field("item_types", &self.item_types.len())
            .field("fields", &self.fields.len())
            .finish()
    }
}

impl Default for Ctx {
    fn default() -> Self {
        Self::new(Arc::new(DetachedHost))
    }
}

impl Ctx {
    pub fn new(host: Arc<dyn HostBridge>) -> Self {
        Self {
            plugin: PluginInfo::default(),
            locale: "en".to_string(),
            current_user_access_level: None,
            item_types: HashMap::new(),
            fields: HashMap::new(),
            host,
        }
    }

    pub fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_types.insert(item_type.id.clone(), item_type);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.insert(field.id.clone(), field);
        self
    }

    pub fn with_access_level(mut self, level: impl Into<String>) -> Self {
        self.current_user_access_level = Some(level.into());
        self
    }
}

/// Context of an item form: the model being edited and the form state.
#[derive(Debug, Clone)]
pub struct ItemFormCtx {
    pub base: Ctx,
    pub item_type: ItemType,
    /// The record being edited; `None` while creating a new one.
    pub item: Option<Item>,
    pub form_values: serde_json::Value,
}

impl ItemFormCtx {
    pub fn new(base: Ctx, item_type: ItemType) -> Self {
        Self {
            base,
            item_type,
            item: None,
            form_values: serde_json::Value::Object(Default::default()),
        }
    }
}

impl Deref for ItemFormCtx {
    type Target = Ctx;

    fn deref(&self) -> &Ctx {
        &self.base
    }
}

/// Context of a single field inside an item form.
#[derive(Debug, Clone)]
pub struct FieldCtx {
    pub form: ItemFormCtx,
    pub field: Field,
    /// Path of the field in the form values, e.g. `"title.en"`.
    pub field_path: String,
    /// Parameters of the field extension being rendered.
    pub parameters: serde_json::Value,
}

impl FieldCtx {
    pub fn new(form: ItemFormCtx, field: Field, field_path: impl Into<String>) -> Self {
        Self {
            form,
            field,
            field_path: field_path.into(),
            parameters: serde_json::Value::Null,
        }
    }
}

impl Deref for FieldCtx {
    type Target = ItemFormCtx;

    fn deref(&self) -> &ItemFormCtx {
        &self.form
    }
}

/// Context of a custom page.
#[derive(Debug, Clone)]
pub struct PageCtx {
    pub base: Ctx,
    pub page_id: String,
}

impl Deref for PageCtx {
    type Target = Ctx;

    fn deref(&self) -> &Ctx {
        &self.base
    }
}

/// Context of a modal opened by the plugin.
#[derive(Debug, Clone)]
pub struct ModalCtx {
    pub base: Ctx,
    pub modal_id: String,
    pub parameters: serde_json::Value,
}

impl Deref for ModalCtx {
    type Target = Ctx;

    fn deref(&self) -> &Ctx {
        &self.base
    }
}

/// Context of a manual field extension's configuration screen.
#[derive(Debug, Clone)]
pub struct FieldExtensionConfigCtx {
    pub base: Ctx,
    pub field_extension_id: String,
    pub parameters: serde_json::Value,
    /// Validation errors from the last save attempt, keyed by parameter.
    pub errors: BTreeMap<String, String>,
}

impl Deref for FieldExtensionConfigCtx {
    type Target = Ctx;

    fn deref(&self) -> &Ctx {
        &self.base
    }
}

/// Context of an items dropdown action: the selected records.
#[derive(Debug, Clone)]
pub struct ItemsActionCtx {
    pub base: Ctx,
    pub items: Vec<Item>,
}

impl Deref for ItemsActionCtx {
    type Target = Ctx;

    fn deref(&self) -> &Ctx {
        &self.base
    }
}

/// Context of an uploads dropdown action: the selected uploads.
#[derive(Debug, Clone)]
pub struct UploadsActionCtx {
    pub base: Ctx,
    pub uploads: Vec<Upload>,
}

impl Deref for UploadsActionCtx {
    type Target = Ctx;

    fn deref(&self) -> &Ctx {
        &self.base
    }
}

pub type OnBootCtx = Ctx;
pub type ItemFormOutletsCtx = Ctx;
pub type RenderItemFormOutletCtx = ItemFormCtx;
pub type RenderPageCtx = PageCtx;
pub type RenderItemFormSidebarPanelCtx = ItemFormCtx;
pub type RenderItemFormSidebarCtx = ItemFormCtx;
pub type RenderFieldExtensionCtx = FieldCtx;
pub type RenderManualFieldExtensionConfigScreenCtx = FieldExtensionConfigCtx;
pub type OverrideFieldExtensionsCtx = Ctx;
pub type RenderModalCtx = ModalCtx;
pub type RenderConfigScreenCtx = Ctx;
pub type ExecuteFieldDropdownActionCtx = FieldCtx;
pub type ExecuteItemFormDropdownActionCtx = ItemFormCtx;
pub type ExecuteItemsDropdownActionCtx = ItemsActionCtx;
pub type ExecuteUploadsDropdownActionCtx = UploadsActionCtx;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_ctx_reaches_base_through_deref() {
        let base = Ctx::default()
            .with_item_type(ItemType::new("m1", "article"))
            .with_access_level("admin");
        let form = ItemFormCtx::new(base, ItemType::new("m1", "article"));
        let ctx = FieldCtx::new(form, Field::new("f1", "title", "string"), "title");

        assert_eq!(ctx.item_type.attributes.api_key, "article");
        assert_eq!(ctx.current_user_access_level.as_deref(), Some("admin"));
        assert!(ctx.item_types.contains_key("m1"));
    }

    #[test]
    fn debug_omits_host() {
        let rendered = format!("{:?}", Ctx::default());
        assert!(rendered.contains("locale"));
        assert!(!rendered.contains("host"));
    }
}
