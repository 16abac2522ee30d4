// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin kit: one registration API over every category, plus `connect`.
//!
//! [`PluginKit::new`] builds each registry against one shared
//! [`ConnectParameters`] and one renderer. Every registry installs its hooks
//! at that moment, so the parameters are complete before anything is
//! registered; registrations only change what the hooks find.

use std::future::Future;
use std::sync::Arc;

use datokit_config::{DEFAULT_MOUNT_ID, KitConfig};
use datokit_core::context::{OnBootCtx, OverrideFieldExtensionsCtx};
use datokit_core::types::{
    ContentAreaSidebarItem, MainNavigationTab, SettingsAreaSidebarItem,
    StructuredTextCustomBlockStyle, StructuredTextCustomMark,
};
use datokit_core::{
    ConnectParameters, Ctx, DuplicateIdHandling, Field, Item, KitError, PluginSdk, Renderer,
};

use crate::registration::config_screen::{ConfigScreenConfig, ConfigScreenRegistry};
use crate::registration::dropdowns::{DropdownActionConfig, DropdownActionRegistry};
use crate::registration::events::EventRegistry;
use crate::registration::fields::{
    FieldExtensionConfig, FieldExtensionOverrideConfig, FieldExtensionRegistry,
};
use crate::registration::modals::{ModalConfig, ModalRegistry};
use crate::registration::outlets::{CollectionOutletConfig, FormOutletConfig, OutletRegistry};
use crate::registration::pages::{PageConfig, PageRegistry};
use crate::registration::sidebars::{SidebarConfig, SidebarPanelConfig, SidebarRegistry};
use crate::registration::structured_text::StructuredTextRegistry;
use crate::render::{Document, RootRenderer};

/// Options for [`PluginKit::new`].
#[derive(Clone)]
pub struct PluginOptions {
    /// Where rendered components go. Without one, a [`RootRenderer`] mounts
    /// into the `mount_id` container of `document`.
    pub render: Option<Arc<dyn Renderer>>,
    /// Host document the default renderer mounts into.
    pub document: Option<Arc<dyn Document>>,
    pub duplicate_id_handling: DuplicateIdHandling,
    pub mount_id: String,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            render: None,
            document: None,
            duplicate_id_handling: DuplicateIdHandling::default(),
            mount_id: DEFAULT_MOUNT_ID.to_string(),
        }
    }
}

impl std::fmt::Debug for PluginOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginOptions")
            .field("render", &self.render.is_some())
            .field("document", &self.document.is_some())
            .field("duplicate_id_handling", &self.duplicate_id_handling)
            .field("mount_id", &self.mount_id)
            .finish()
    }
}

impl PluginOptions {
    /// Options taken from the `[plugin]` section of a loaded config.
    pub fn from_config(config: &KitConfig) -> Self {
        Self {
            render: None,
            document: None,
            duplicate_id_handling: config.plugin.duplicate_id_handling,
            mount_id: config.plugin.mount_id.clone(),
        }
    }

    pub fn render(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.render = Some(renderer);
        self
    }

    pub fn document(mut self, document: Arc<dyn Document>) -> Self {
        self.document = Some(document);
        self
    }

    pub fn duplicate_id_handling(mut self, mode: DuplicateIdHandling) -> Self {
        self.duplicate_id_handling = mode;
        self
    }
}

/// Registration API of one plugin session.
pub struct PluginKit {
    mode: DuplicateIdHandling,
    params: ConnectParameters,
    outlets: OutletRegistry,
    pages: PageRegistry,
    sidebars: SidebarRegistry,
    fields: FieldExtensionRegistry,
    modals: ModalRegistry,
    config_screen: ConfigScreenRegistry,
    dropdowns: DropdownActionRegistry,
    events: EventRegistry,
    structured_text: StructuredTextRegistry,
}

impl std::fmt::Debug for PluginKit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginKit")
            .field("mode", &self.mode)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl PluginKit {
    pub fn new(options: PluginOptions) -> Result<Self, KitError> {
        let mode = options.duplicate_id_handling;
        let renderer = match options.render {
            Some(renderer) => renderer,
            None => default_renderer(options.document, &options.mount_id)?,
        };

        let mut params = ConnectParameters::default();
        let outlets = OutletRegistry::new(&mut params, Arc::clone(&renderer), mode);
        let pages = PageRegistry::new(&mut params, Arc::clone(&renderer), mode);
        let sidebars = SidebarRegistry::new(&mut params, Arc::clone(&renderer), mode);
        let fields = FieldExtensionRegistry::new(&mut params, Arc::clone(&renderer), mode);
        let modals = ModalRegistry::new(&mut params, Arc::clone(&renderer), mode);
        let config_screen = ConfigScreenRegistry::new(&mut params, renderer, mode);
        let dropdowns = DropdownActionRegistry::new(&mut params, mode);
        let events = EventRegistry::new(&mut params);
        let structured_text = StructuredTextRegistry::new(&mut params, mode);

        tracing::debug!(
            duplicate_id_handling = %mode,
            hooks = params.installed_hooks().len(),
            "plugin kit ready"
        );

        Ok(Self {
            mode,
            params,
            outlets,
            pages,
            sidebars,
            fields,
            modals,
            config_screen,
            dropdowns,
            events,
            structured_text,
        })
    }

    pub fn duplicate_id_handling(&self) -> DuplicateIdHandling {
        self.mode
    }

    /// A clone of the assembled parameters. Clones share the installed hooks
    /// and the live registries behind them.
    pub fn parameters(&self) -> ConnectParameters {
        self.params.clone()
    }

    /// Hand the parameters to the host SDK and return its result.
    pub async fn connect<S>(&self, sdk: &S) -> Result<(), KitError>
    where
        S: PluginSdk + ?Sized,
    {
        let parameters = self.parameters();
        tracing::info!(hooks = ?parameters.installed_hooks(), "connecting plugin");
        sdk.connect(parameters).await
    }

    // Outlets

    pub fn add_form_outlet(&self, config: FormOutletConfig) -> Result<(), KitError> {
        self.outlets.add_form_outlet(config)
    }

    pub fn add_collection_outlet(&self, config: CollectionOutletConfig) -> Result<(), KitError> {
        self.outlets.add_collection_outlet(config)
    }

    // Pages and navigation

    pub fn add_page(&self, config: PageConfig) -> Result<(), KitError> {
        self.pages.add_page(config)
    }

    pub fn add_main_navigation_tab(&self, tab: MainNavigationTab) -> Result<(), KitError> {
        self.pages.add_main_navigation_tab(tab)
    }

    pub fn add_content_area_sidebar_item(
        &self,
        item: ContentAreaSidebarItem,
    ) -> Result<(), KitError> {
        self.pages.add_content_area_sidebar_item(item)
    }

    pub fn add_settings_area_sidebar_item(
        &self,
        item: SettingsAreaSidebarItem,
    ) -> Result<(), KitError> {
        self.pages.add_settings_area_sidebar_item(item)
    }

    // Sidebars

    pub fn add_sidebar_panel(&self, config: SidebarPanelConfig) -> Result<(), KitError> {
        self.sidebars.add_sidebar_panel(config)
    }

    pub fn add_sidebar(&self, config: SidebarConfig) -> Result<(), KitError> {
        self.sidebars.add_sidebar(config)
    }

    // Field extensions

    pub fn add_field_extension(&self, config: FieldExtensionConfig) -> Result<(), KitError> {
        self.fields.add_field_extension(config)
    }

    pub fn override_field_extension(&self, config: FieldExtensionOverrideConfig) {
        self.fields.override_field_extension(config)
    }

    pub fn add_hidden_field<F>(&self, predicate: F)
    where
        F: Fn(&Field, &OverrideFieldExtensionsCtx) -> bool + Send + Sync + 'static,
    {
        self.fields.add_hidden_field(predicate)
    }

    // Modals and config screen

    pub fn add_modal(&self, config: ModalConfig) -> Result<(), KitError> {
        self.modals.add_modal(config)
    }

    pub fn configure_config_screen(&self, config: ConfigScreenConfig) -> Result<(), KitError> {
        self.config_screen.configure_config_screen(config)
    }

    // Dropdown actions

    pub fn add_dropdown_action(&self, config: DropdownActionConfig) -> Result<(), KitError> {
        self.dropdowns.add_dropdown_action(config)
    }

    // Lifecycle events

    pub fn on_boot<F, Fut>(&self, f: F)
    where
        F: Fn(OnBootCtx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), KitError>> + Send + 'static,
    {
        self.events.on_boot(f)
    }

    pub fn on_before_item_upsert<F, Fut>(&self, f: F)
    where
        F: Fn(serde_json::Value, Ctx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, KitError>> + Send + 'static,
    {
        self.events.on_before_item_upsert(f)
    }

    pub fn on_before_items_destroy<F, Fut>(&self, f: F)
    where
        F: Fn(Vec<Item>, Ctx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, KitError>> + Send + 'static,
    {
        self.events.on_before_items_destroy(f)
    }

    pub fn on_before_items_publish<F, Fut>(&self, f: F)
    where
        F: Fn(Vec<Item>, Ctx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, KitError>> + Send + 'static,
    {
        self.events.on_before_items_publish(f)
    }

    pub fn on_before_items_unpublish<F, Fut>(&self, f: F)
    where
        F: Fn(Vec<Item>, Ctx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, KitError>> + Send + 'static,
    {
        self.events.on_before_items_unpublish(f)
    }

    // Structured text

    pub fn custom_block_styles_for_structured_text_field<F>(&self, f: F) -> Result<(), KitError>
    where
        F: Fn(&Field, &Ctx) -> Option<Vec<StructuredTextCustomBlockStyle>> + Send + Sync + 'static,
    {
        self.structured_text
            .custom_block_styles_for_structured_text_field(f)
    }

    pub fn custom_marks_for_structured_text_field<F>(&self, f: F) -> Result<(), KitError>
    where
        F: Fn(&Field, &Ctx) -> Option<Vec<StructuredTextCustomMark>> + Send + Sync + 'static,
    {
        self.structured_text.custom_marks_for_structured_text_field(f)
    }
}

fn default_renderer(
    document: Option<Arc<dyn Document>>,
    mount_id: &str,
) -> Result<Arc<dyn Renderer>, KitError> {
    let Some(document) = document else {
        return Err(KitError::Config(
            "either a renderer or a document to mount into is required".to_string(),
        ));
    };
    if mount_id.trim().is_empty() {
        return Err(KitError::Config(
            "mount_id must not be empty when no renderer is supplied".to_string(),
        ));
    }
    Ok(Arc::new(RootRenderer::with_mount_id(document, mount_id)))
}
