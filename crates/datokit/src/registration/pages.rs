// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Custom pages and the navigation entries that point at them.
//!
//! Pages live in an ID namespace. Main navigation tabs and content-area
//! sidebar items are plain lists: the host receives them exactly as
//! registered, in order.

use std::sync::Arc;

use datokit_core::context::RenderPageCtx;
use datokit_core::types::{ContentAreaSidebarItem, MainNavigationTab, SettingsAreaSidebarItem};
use datokit_core::{ConnectParameters, Ctx, DuplicateIdHandling, KitError, Node, Renderer};

use super::{Component, component, render_hook};
use crate::registry::{AppendList, Registry};
use crate::validation::require_field;

const PAGE: &str = "Page";
const MAIN_NAVIGATION_TAB: &str = "Main navigation tab";
const CONTENT_AREA_ITEM: &str = "Content area sidebar item";

#[derive(Clone)]
pub struct PageConfig {
    pub page_id: String,
    pub component: Component<RenderPageCtx>,
}

impl PageConfig {
    pub fn new<F>(page_id: impl Into<String>, component_fn: F) -> Self
    where
        F: Fn(&RenderPageCtx) -> Node + Send + Sync + 'static,
    {
        Self {
            page_id: page_id.into(),
            component: component(component_fn),
        }
    }
}

fn page_component(page: &PageConfig) -> &Component<RenderPageCtx> {
    &page.component
}

/// Registry of pages, main navigation tabs, and content-area sidebar items.
pub struct PageRegistry {
    pages: Registry<PageConfig>,
    main_navigation_tabs: AppendList<MainNavigationTab>,
    content_area_items: AppendList<ContentAreaSidebarItem>,
}

impl PageRegistry {
    pub fn new(
        params: &mut ConnectParameters,
        renderer: Arc<dyn Renderer>,
        mode: DuplicateIdHandling,
    ) -> Self {
        let pages = Registry::new(PAGE, mode);
        let main_navigation_tabs = AppendList::new();
        let content_area_items = AppendList::new();

        params.render_page = Some(render_hook(pages.clone(), renderer, page_component));

        let tabs = main_navigation_tabs.clone();
        params.main_navigation_tabs = Some(Arc::new(
            move |_ctx: &Ctx| -> Vec<MainNavigationTab> { tabs.snapshot() },
        ));
        let items = content_area_items.clone();
        params.content_area_sidebar_items = Some(Arc::new(
            move |_ctx: &Ctx| -> Vec<ContentAreaSidebarItem> { items.snapshot() },
        ));

        Self {
            pages,
            main_navigation_tabs,
            content_area_items,
        }
    }

    pub fn add_page(&self, config: PageConfig) -> Result<(), KitError> {
        require_field(&config.page_id, "page_id", PAGE)?;
        self.pages.insert(config.page_id.clone(), config)
    }

    pub fn add_main_navigation_tab(&self, tab: MainNavigationTab) -> Result<(), KitError> {
        require_field(&tab.label, "label", MAIN_NAVIGATION_TAB)?;
        require_field(&tab.points_to.page_id, "points_to.page_id", MAIN_NAVIGATION_TAB)?;
        self.main_navigation_tabs.push(tab);
        Ok(())
    }

    pub fn add_content_area_sidebar_item(
        &self,
        item: ContentAreaSidebarItem,
    ) -> Result<(), KitError> {
        require_field(&item.label, "label", CONTENT_AREA_ITEM)?;
        require_field(&item.points_to.page_id, "points_to.page_id", CONTENT_AREA_ITEM)?;
        self.content_area_items.push(item);
        Ok(())
    }

    pub fn add_settings_area_sidebar_item(
        &self,
        _item: SettingsAreaSidebarItem,
    ) -> Result<(), KitError> {
        Err(KitError::NotImplemented("Settings area sidebar items"))
    }

    pub fn page_ids(&self) -> Vec<String> {
        self.pages.ids()
    }
}
