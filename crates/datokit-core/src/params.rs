// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The connect parameters handed to the host SDK.
//!
//! [`ConnectParameters`] holds one optional closure per SDK hook. Declaration
//! hooks answer "which of your items apply here"; render and execute hooks
//! run a specific item by ID. Cloning the parameters clones the `Arc`s, so a
//! clone invokes the very same closures as the original.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::context::{
    Ctx, ExecuteFieldDropdownActionCtx, ExecuteItemFormDropdownActionCtx,
    ExecuteItemsDropdownActionCtx, ExecuteUploadsDropdownActionCtx, ItemFormCtx,
    ItemFormOutletsCtx, OnBootCtx, OverrideFieldExtensionsCtx, RenderConfigScreenCtx,
    RenderFieldExtensionCtx, RenderItemFormOutletCtx, RenderItemFormSidebarCtx,
    RenderItemFormSidebarPanelCtx, RenderManualFieldExtensionConfigScreenCtx, RenderModalCtx,
    RenderPageCtx,
};
use crate::error::KitError;
use crate::schema::{Field, Item, ItemType};
use crate::types::{
    ContentAreaSidebarItem, DropdownAction, FieldExtensionOverride, ItemFormOutlet,
    ItemFormSidebar, ItemFormSidebarPanel, MainNavigationTab, ManualFieldExtension,
    StructuredTextCustomBlockStyle, StructuredTextCustomMark,
};

/// Declaration hook scoped to a subject (a model or a field) and a context.
pub type Declaration<S, C, D> = Arc<dyn Fn(&S, &C) -> Vec<D> + Send + Sync>;

/// Declaration hook that only needs the context.
pub type ContextDeclaration<C, D> = Arc<dyn Fn(&C) -> Vec<D> + Send + Sync>;

/// Render hook: renders the entry with the given ID.
pub type RenderHook<C> = Arc<dyn Fn(&str, C) -> Result<(), KitError> + Send + Sync>;

/// Execute hook: runs the dropdown action with the given ID.
pub type ExecuteHook<C> =
    Arc<dyn Fn(&str, C) -> BoxFuture<'static, Result<(), KitError>> + Send + Sync>;

/// Lifecycle hook resolving to `true` (proceed) or `false` (veto).
pub type VetoHook<P> =
    Arc<dyn Fn(P, Ctx) -> BoxFuture<'static, Result<bool, KitError>> + Send + Sync>;

/// Boot notification hook.
pub type BootHook = Arc<dyn Fn(OnBootCtx) -> BoxFuture<'static, Result<(), KitError>> + Send + Sync>;

/// Config screen render hook.
pub type ConfigScreenHook = Arc<dyn Fn(RenderConfigScreenCtx) -> Result<(), KitError> + Send + Sync>;

/// Parameter validator for manual field extensions: maps parameter name to message.
pub type ParametersValidator =
    Arc<dyn Fn(&str, &serde_json::Value) -> BTreeMap<String, String> + Send + Sync>;

/// Resolves the field extension override for a field, `None` meaning "use the default".
pub type OverrideResolver = Arc<
    dyn Fn(&Field, &OverrideFieldExtensionsCtx) -> Option<FieldExtensionOverride> + Send + Sync,
>;

/// Per-field structured text customization.
pub type StructuredTextHook<T> = Arc<dyn Fn(&Field, &Ctx) -> Option<Vec<T>> + Send + Sync>;

macro_rules! connect_parameters {
    ($( $(#[$doc:meta])* $name:ident : $ty:ty ),* $(,)?) => {
        /// Hooks installed for the host SDK, one optional closure per hook name.
        #[derive(Clone, Default)]
        pub struct ConnectParameters {
            $( $(#[$doc])* pub $name: Option<$ty>, )*
        }

        impl ConnectParameters {
            /// Names of the hooks currently installed, in declaration order.
            pub fn installed_hooks(&self) -> Vec<&'static str> {
                let mut hooks = Vec::new();
                $( if self.$name.is_some() { hooks.push(stringify!($name)); } )*
                hooks
            }
        }
    };
}

connect_parameters! {
    on_boot: BootHook,

    item_form_outlets: Declaration<ItemType, ItemFormOutletsCtx, ItemFormOutlet>,
    render_item_form_outlet: RenderHook<RenderItemFormOutletCtx>,

    main_navigation_tabs: ContextDeclaration<Ctx, MainNavigationTab>,
    content_area_sidebar_items: ContextDeclaration<Ctx, ContentAreaSidebarItem>,
    render_page: RenderHook<RenderPageCtx>,

    item_form_sidebar_panels: Declaration<ItemType, ItemFormCtx, ItemFormSidebarPanel>,
    render_item_form_sidebar_panel: RenderHook<RenderItemFormSidebarPanelCtx>,
    item_form_sidebars: Declaration<ItemType, ItemFormCtx, ItemFormSidebar>,
    render_item_form_sidebar: RenderHook<RenderItemFormSidebarCtx>,

    manual_field_extensions: ContextDeclaration<Ctx, ManualFieldExtension>,
    render_field_extension: RenderHook<RenderFieldExtensionCtx>,
    render_manual_field_extension_config_screen: RenderHook<RenderManualFieldExtensionConfigScreenCtx>,
    validate_manual_field_extension_parameters: ParametersValidator,
    override_field_extensions: OverrideResolver,

    render_modal: RenderHook<RenderModalCtx>,
    render_config_screen: ConfigScreenHook,

    field_dropdown_actions: Declaration<Field, ItemFormCtx, DropdownAction>,
    execute_field_dropdown_action: ExecuteHook<ExecuteFieldDropdownActionCtx>,
    item_form_dropdown_actions: Declaration<ItemType, ItemFormCtx, DropdownAction>,
    execute_item_form_dropdown_action: ExecuteHook<ExecuteItemFormDropdownActionCtx>,
    items_dropdown_actions: Declaration<ItemType, Ctx, DropdownAction>,
    execute_items_dropdown_action: ExecuteHook<ExecuteItemsDropdownActionCtx>,
    uploads_dropdown_actions: ContextDeclaration<Ctx, DropdownAction>,
    execute_uploads_dropdown_action: ExecuteHook<ExecuteUploadsDropdownActionCtx>,

    /// Receives the create/update payload.
    on_before_item_upsert: VetoHook<serde_json::Value>,
    on_before_items_destroy: VetoHook<Vec<Item>>,
    on_before_items_publish: VetoHook<Vec<Item>>,
    on_before_items_unpublish: VetoHook<Vec<Item>>,

    custom_block_styles_for_structured_text_field: StructuredTextHook<StructuredTextCustomBlockStyle>,
    custom_marks_for_structured_text_field: StructuredTextHook<StructuredTextCustomMark>,
}

impl std::fmt::Debug for ConnectParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectParameters")
            .field("installed_hooks", &self.installed_hooks())
            .finish()
    }
}
