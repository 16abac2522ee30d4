// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item form sidebar panels and full sidebars.
//!
//! Panels and sidebars are separate ID namespaces.

use std::sync::Arc;

use datokit_core::context::{RenderItemFormSidebarCtx, RenderItemFormSidebarPanelCtx};
use datokit_core::types::{ItemFormSidebar, ItemFormSidebarPanel, Placement, SidebarPanelAnchor};
use datokit_core::{
    ConnectParameters, DuplicateIdHandling, ItemFormCtx, ItemType, KitError, Node, Renderer,
};

use super::{Component, Predicate, applies, component, predicate, render_hook};
use crate::registry::Registry;
use crate::validation::require_field;

const PANEL: &str = "Sidebar panel";
const SIDEBAR: &str = "Sidebar";

#[derive(Clone)]
pub struct SidebarPanelConfig {
    pub id: String,
    pub label: String,
    pub component: Component<RenderItemFormSidebarPanelCtx>,
    pub start_open: Option<bool>,
    pub placement: Option<Placement<SidebarPanelAnchor>>,
    pub rank: Option<i32>,
    pub should_apply: Option<Predicate<ItemType, ItemFormCtx>>,
}

impl SidebarPanelConfig {
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, component_fn: F) -> Self
    where
        F: Fn(&RenderItemFormSidebarPanelCtx) -> Node + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            component: component(component_fn),
            start_open: None,
            placement: None,
            rank: None,
            should_apply: None,
        }
    }

    pub fn start_open(mut self, open: bool) -> Self {
        self.start_open = Some(open);
        self
    }

    pub fn placement(mut self, placement: Placement<SidebarPanelAnchor>) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn rank(mut self, rank: i32) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn should_apply<F>(mut self, f: F) -> Self
    where
        F: Fn(&ItemType, &ItemFormCtx) -> bool + Send + Sync + 'static,
    {
        self.should_apply = Some(predicate(f));
        self
    }

    fn descriptor(&self) -> ItemFormSidebarPanel {
        ItemFormSidebarPanel {
            id: self.id.clone(),
            label: self.label.clone(),
            start_open: self.start_open,
            placement: self.placement,
            rank: self.rank,
        }
    }
}

#[derive(Clone)]
pub struct SidebarConfig {
    pub id: String,
    pub label: String,
    pub component: Component<RenderItemFormSidebarCtx>,
    pub preferred_width: Option<u32>,
    pub should_apply: Option<Predicate<ItemType, ItemFormCtx>>,
}

impl SidebarConfig {
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, component_fn: F) -> Self
    where
        F: Fn(&RenderItemFormSidebarCtx) -> Node + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            component: component(component_fn),
            preferred_width: None,
            should_apply: None,
        }
    }

    pub fn preferred_width(mut self, width: u32) -> Self {
        self.preferred_width = Some(width);
        self
    }

    pub fn should_apply<F>(mut self, f: F) -> Self
    where
        F: Fn(&ItemType, &ItemFormCtx) -> bool + Send + Sync + 'static,
    {
        self.should_apply = Some(predicate(f));
        self
    }
}

fn panel_component(panel: &SidebarPanelConfig) -> &Component<RenderItemFormSidebarPanelCtx> {
    &panel.component
}

fn sidebar_component(sidebar: &SidebarConfig) -> &Component<RenderItemFormSidebarCtx> {
    &sidebar.component
}

pub struct SidebarRegistry {
    panels: Registry<SidebarPanelConfig>,
    sidebars: Registry<SidebarConfig>,
}

impl SidebarRegistry {
    pub fn new(
        params: &mut ConnectParameters,
        renderer: Arc<dyn Renderer>,
        mode: DuplicateIdHandling,
    ) -> Self {
        let panels: Registry<SidebarPanelConfig> = Registry::new(PANEL, mode);
        let sidebars: Registry<SidebarConfig> = Registry::new(SIDEBAR, mode);

        let live = panels.clone();
        params.item_form_sidebar_panels = Some(Arc::new(
            move |model: &ItemType, ctx: &ItemFormCtx| -> Vec<ItemFormSidebarPanel> {
                live.values()
                    .iter()
                    .filter(|p| applies(p.should_apply.as_ref(), model, ctx))
                    .map(|p| p.descriptor())
                    .collect()
            },
        ));
        params.render_item_form_sidebar_panel =
            Some(render_hook(panels.clone(), Arc::clone(&renderer), panel_component));

        let live = sidebars.clone();
        params.item_form_sidebars = Some(Arc::new(
            move |model: &ItemType, ctx: &ItemFormCtx| -> Vec<ItemFormSidebar> {
                live.values()
                    .iter()
                    .filter(|s| applies(s.should_apply.as_ref(), model, ctx))
                    .map(|s| ItemFormSidebar {
                        id: s.id.clone(),
                        label: s.label.clone(),
                        preferred_width: s.preferred_width,
                    })
                    .collect()
            },
        ));
        params.render_item_form_sidebar =
            Some(render_hook(sidebars.clone(), renderer, sidebar_component));

        Self { panels, sidebars }
    }

    pub fn add_sidebar_panel(&self, config: SidebarPanelConfig) -> Result<(), KitError> {
        require_field(&config.id, "id", PANEL)?;
        require_field(&config.label, "label", PANEL)?;
        self.panels.insert(config.id.clone(), config)
    }

    pub fn add_sidebar(&self, config: SidebarConfig) -> Result<(), KitError> {
        require_field(&config.id, "id", SIDEBAR)?;
        require_field(&config.label, "label", SIDEBAR)?;
        self.sidebars.insert(config.id.clone(), config)
    }
}
