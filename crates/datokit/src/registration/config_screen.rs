// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin's global configuration screen.

use std::sync::Arc;

use datokit_core::context::RenderConfigScreenCtx;
use datokit_core::{ConnectParameters, DuplicateIdHandling, KitError, Node, Renderer};

use super::{Component, component};
use crate::registry::Slot;

#[derive(Clone)]
pub struct ConfigScreenConfig {
    pub component: Component<RenderConfigScreenCtx>,
}

impl ConfigScreenConfig {
    pub fn new<F>(component_fn: F) -> Self
    where
        F: Fn(&RenderConfigScreenCtx) -> Node + Send + Sync + 'static,
    {
        Self {
            component: component(component_fn),
        }
    }
}

/// Holds at most one config screen. Re-configuring follows the
/// duplicate-ID policy.
pub struct ConfigScreenRegistry {
    screen: Slot<ConfigScreenConfig>,
}

impl ConfigScreenRegistry {
    pub fn new(
        params: &mut ConnectParameters,
        renderer: Arc<dyn Renderer>,
        mode: DuplicateIdHandling,
    ) -> Self {
        let screen: Slot<ConfigScreenConfig> = Slot::new("Config screen", mode);

        let live = screen.clone();
        params.render_config_screen = Some(Arc::new(move |ctx: RenderConfigScreenCtx| {
            match live.get() {
                Some(screen) => renderer.render((screen.component)(&ctx)),
                None => Ok(()),
            }
        }));

        Self { screen }
    }

    pub fn configure_config_screen(&self, config: ConfigScreenConfig) -> Result<(), KitError> {
        self.screen.set(config)
    }

    pub fn is_configured(&self) -> bool {
        self.screen.is_set()
    }
}
