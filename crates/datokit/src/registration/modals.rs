// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modals opened by the plugin.

use std::sync::Arc;

use datokit_core::context::RenderModalCtx;
use datokit_core::{ConnectParameters, DuplicateIdHandling, KitError, Node, Renderer};

use super::{Component, component, render_hook};
use crate::registry::Registry;
use crate::validation::require_field;

const ENTITY: &str = "Modal";

#[derive(Clone)]
pub struct ModalConfig {
    pub id: String,
    pub component: Component<RenderModalCtx>,
}

impl ModalConfig {
    pub fn new<F>(id: impl Into<String>, component_fn: F) -> Self
    where
        F: Fn(&RenderModalCtx) -> Node + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            component: component(component_fn),
        }
    }
}

fn modal_component(modal: &ModalConfig) -> &Component<RenderModalCtx> {
    &modal.component
}

pub struct ModalRegistry {
    modals: Registry<ModalConfig>,
}

impl ModalRegistry {
    pub fn new(
        params: &mut ConnectParameters,
        renderer: Arc<dyn Renderer>,
        mode: DuplicateIdHandling,
    ) -> Self {
        let modals = Registry::new(ENTITY, mode);
        params.render_modal = Some(render_hook(modals.clone(), renderer, modal_component));
        Self { modals }
    }

    pub fn add_modal(&self, config: ModalConfig) -> Result<(), KitError> {
        require_field(&config.id, "id", ENTITY)?;
        self.modals.insert(config.id.clone(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datokit_core::ModalCtx;
    use datokit_test_utils::RecordingRenderer;
    use datokit_test_utils::fixtures::modal_ctx;

    #[test]
    fn modal_renders_with_its_context() {
        let renderer = Arc::new(RecordingRenderer::new());
        let mut params = ConnectParameters::default();
        let registry = ModalRegistry::new(&mut params, renderer.clone(), DuplicateIdHandling::Warn);
        registry
            .add_modal(ModalConfig::new("confirm", |ctx: &ModalCtx| {
                Node::text(format!("modal {}", ctx.modal_id))
            }))
            .unwrap();

        let render = params.render_modal.as_ref().unwrap();
        render("confirm", modal_ctx("confirm")).unwrap();
        assert_eq!(renderer.last_markup().as_deref(), Some("modal confirm"));

        render("unknown", modal_ctx("unknown")).unwrap();
        assert_eq!(renderer.render_count(), 1);
    }

    #[test]
    fn duplicate_modal_under_throw() {
        let mut params = ConnectParameters::default();
        let registry = ModalRegistry::new(
            &mut params,
            Arc::new(RecordingRenderer::new()),
            DuplicateIdHandling::Throw,
        );
        registry
            .add_modal(ModalConfig::new("m", |_ctx: &ModalCtx| Node::Empty))
            .unwrap();
        let err = registry
            .add_modal(ModalConfig::new("m", |_ctx: &ModalCtx| Node::Empty))
            .unwrap_err();
        assert_eq!(err.to_string(), "Modal with id \"m\" is already registered");
    }
}
