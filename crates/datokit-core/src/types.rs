// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Policy enums and the descriptor types returned to the host SDK.
//!
//! Descriptors are the lightweight, serializable projections of registered
//! entries. They never carry components or handlers, only IDs and metadata,
//! and they serialize to the camelCase JSON shapes the SDK expects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::KitError;

/// Behavior when a registration reuses an ID already present in its registry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DuplicateIdHandling {
    /// Reject the registration with an error.
    Throw,
    /// Log a warning and overwrite the existing entry.
    #[default]
    Warn,
    /// Overwrite silently.
    Ignore,
}

/// Field types known to the CMS schema.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldType {
    Boolean,
    Color,
    Date,
    DateTime,
    File,
    Float,
    Gallery,
    Integer,
    Json,
    LatLon,
    Link,
    Links,
    RichText,
    Seo,
    SingleBlock,
    Slug,
    String,
    StructuredText,
    Text,
    Video,
}

/// Whether a manual field extension replaces the editor or decorates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldExtensionType {
    Editor,
    Addon,
}

/// The set of field types a manual field extension can be attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTypes {
    All,
    Only(Vec<FieldType>),
}

impl Serialize for FieldTypes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldTypes::All => serializer.serialize_str("all"),
            FieldTypes::Only(types) => types.serialize(serializer),
        }
    }
}

/// An icon: either a named FontAwesome glyph or inline SVG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Icon {
    Named(String),
    Svg(SvgIcon),
}

/// Inline SVG icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "svg", rename_all = "camelCase")]
pub struct SvgIcon {
    pub view_box: String,
    pub content: String,
}

impl From<&str> for Icon {
    fn from(name: &str) -> Self {
        Icon::Named(name.to_string())
    }
}

/// Relative placement against an anchor element in the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementOrder {
    Before,
    After,
}

/// A `[order, anchor]` placement tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement<A>(pub PlacementOrder, pub A);

/// Anchors in the main navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MainNavigationAnchor {
    Content,
    Media,
    Schema,
    Configuration,
    CdaPlayground,
}

/// Anchors in the content-area sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentAreaAnchor {
    MenuItems,
    SeoPreferences,
}

/// Anchors in the settings-area sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingsAreaAnchor {
    Environment,
    Project,
    Permissions,
    Webhooks,
    Deployment,
    Sso,
    Auditing,
    Plugins,
}

/// Anchors in the item form sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SidebarPanelAnchor {
    Info,
    Actions,
    Links,
    History,
}

/// A reference to a registered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRef {
    pub page_id: String,
}

impl PageRef {
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
        }
    }
}

/// Item form outlet descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFormOutlet {
    pub id: String,
    pub initial_height: u32,
}

/// Main navigation tab. Registered as-is and returned verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainNavigationTab {
    pub label: String,
    pub icon: Icon,
    pub points_to: PageRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement<MainNavigationAnchor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i32>,
}

/// Content-area sidebar item. Registered as-is and returned verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAreaSidebarItem {
    pub label: String,
    pub icon: Icon,
    pub points_to: PageRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement<ContentAreaAnchor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i32>,
}

/// Settings-area sidebar item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsAreaSidebarItem {
    pub label: String,
    pub icon: Icon,
    pub points_to: PageRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement<SettingsAreaAnchor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i32>,
}

/// Item form sidebar panel descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFormSidebarPanel {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement<SidebarPanelAnchor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i32>,
}

/// Full item form sidebar descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFormSidebar {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_width: Option<u32>,
}

/// Manual field extension descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualFieldExtension {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldExtensionType,
    pub field_types: FieldTypes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurable: Option<bool>,
}

/// A field extension reference with optional parameters, used in overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExtensionRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl FieldExtensionRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parameters: None,
        }
    }

    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// The resolved override for a field.
///
/// Both members empty is a legitimate "empty override", distinct from the
/// absence of an override.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldExtensionOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<FieldExtensionRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addons: Option<Vec<FieldExtensionRef>>,
}

/// Dropdown action categories. Each has its own ID namespace.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DropdownActionType {
    Field,
    ItemForm,
    Items,
    Uploads,
}

impl DropdownActionType {
    /// Parses a wire tag such as `"itemForm"`.
    pub fn parse(tag: &str) -> Result<Self, KitError> {
        tag.parse()
            .map_err(|_| KitError::UnknownActionType(tag.to_string()))
    }
}

/// Dropdown action descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownAction {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

/// A custom block style offered by a structured text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredTextCustomBlockStyle {
    pub id: String,
    pub node: String,
    pub label: String,
    pub applied_style: BTreeMap<String, String>,
}

/// A custom mark offered by a structured text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredTextCustomMark {
    pub id: String,
    pub label: String,
    pub icon: Icon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard_shortcut: Option<String>,
    pub applied_style: BTreeMap<String, String>,
}
