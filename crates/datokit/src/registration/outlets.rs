// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item form outlets.

use std::sync::Arc;

use datokit_core::context::{ItemFormOutletsCtx, RenderItemFormOutletCtx};
use datokit_core::types::ItemFormOutlet;
use datokit_core::{ConnectParameters, DuplicateIdHandling, ItemType, KitError, Node, Renderer};

use super::{Component, Predicate, applies, component, predicate, render_hook};
use crate::registry::Registry;
use crate::validation::require_field;

const ENTITY: &str = "Form outlet";

/// A form outlet: a component mounted inside the item form of matching models.
#[derive(Clone)]
pub struct FormOutletConfig {
    pub id: String,
    pub component: Component<RenderItemFormOutletCtx>,
    /// Height in pixels before the outlet resizes itself. Defaults to 0.
    pub initial_height: Option<u32>,
    pub should_apply: Option<Predicate<ItemType, ItemFormOutletsCtx>>,
}

impl FormOutletConfig {
    pub fn new<F>(id: impl Into<String>, component_fn: F) -> Self
    where
        F: Fn(&RenderItemFormOutletCtx) -> Node + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            component: component(component_fn),
            initial_height: None,
            should_apply: None,
        }
    }

    pub fn initial_height(mut self, height: u32) -> Self {
        self.initial_height = Some(height);
        self
    }

    pub fn should_apply<F>(mut self, f: F) -> Self
    where
        F: Fn(&ItemType, &ItemFormOutletsCtx) -> bool + Send + Sync + 'static,
    {
        self.should_apply = Some(predicate(f));
        self
    }
}

/// A collection outlet. Registration is not supported yet.
#[derive(Clone)]
pub struct CollectionOutletConfig {
    pub id: String,
    pub component: Component<datokit_core::Ctx>,
}

fn outlet_component(outlet: &FormOutletConfig) -> &Component<RenderItemFormOutletCtx> {
    &outlet.component
}

/// Registry of item form outlets.
pub struct OutletRegistry {
    outlets: Registry<FormOutletConfig>,
}

impl OutletRegistry {
    /// Create the registry and install `item_form_outlets` and
    /// `render_item_form_outlet`.
    pub fn new(
        params: &mut ConnectParameters,
        renderer: Arc<dyn Renderer>,
        mode: DuplicateIdHandling,
    ) -> Self {
        let outlets: Registry<FormOutletConfig> = Registry::new(ENTITY, mode);

        let live = outlets.clone();
        params.item_form_outlets = Some(Arc::new(
            move |model: &ItemType, ctx: &ItemFormOutletsCtx| -> Vec<ItemFormOutlet> {
                live.values()
                    .iter()
                    .filter(|o| applies(o.should_apply.as_ref(), model, ctx))
                    .map(|o| ItemFormOutlet {
                        id: o.id.clone(),
                        initial_height: o.initial_height.unwrap_or(0),
                    })
                    .collect()
            },
        ));
        params.render_item_form_outlet =
            Some(render_hook(outlets.clone(), renderer, outlet_component));

        Self { outlets }
    }

    pub fn add_form_outlet(&self, config: FormOutletConfig) -> Result<(), KitError> {
        require_field(&config.id, "id", ENTITY)?;
        self.outlets.insert(config.id.clone(), config)
    }

    pub fn add_collection_outlet(&self, _config: CollectionOutletConfig) -> Result<(), KitError> {
        Err(KitError::NotImplemented("Collection outlets"))
    }

    pub fn ids(&self) -> Vec<String> {
        self.outlets.ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datokit_core::ItemFormCtx;
    use datokit_test_utils::RecordingRenderer;
    use datokit_test_utils::fixtures::{article_form_ctx, article_model, base_ctx, homepage_model};
    use tracing_test::traced_test;

    fn setup(mode: DuplicateIdHandling) -> (OutletRegistry, ConnectParameters, Arc<RecordingRenderer>) {
        let renderer = Arc::new(RecordingRenderer::new());
        let mut params = ConnectParameters::default();
        let registry = OutletRegistry::new(&mut params, renderer.clone(), mode);
        (registry, params, renderer)
    }

    fn outlet(id: &str, text: &'static str) -> FormOutletConfig {
        FormOutletConfig::new(id, move |_ctx: &ItemFormCtx| Node::text(text))
    }

    fn declared(params: &ConnectParameters, model: &ItemType) -> Vec<ItemFormOutlet> {
        (params.item_form_outlets.as_ref().unwrap())(model, &base_ctx())
    }

    #[test]
    fn fresh_outlet_is_declared_with_default_height() {
        let (registry, params, _) = setup(DuplicateIdHandling::Warn);
        registry.add_form_outlet(outlet("stats", "S")).unwrap();
        registry
            .add_form_outlet(outlet("tall", "T").initial_height(240))
            .unwrap();

        assert_eq!(
            declared(&params, &article_model()),
            vec![
                ItemFormOutlet {
                    id: "stats".into(),
                    initial_height: 0
                },
                ItemFormOutlet {
                    id: "tall".into(),
                    initial_height: 240
                },
            ]
        );
    }

    #[test]
    fn should_apply_filters_and_keeps_order() {
        let (registry, params, _) = setup(DuplicateIdHandling::Warn);
        let articles_only =
            |model: &ItemType, _ctx: &ItemFormOutletsCtx| model.attributes.api_key == "article";
        registry
            .add_form_outlet(outlet("one", "1").should_apply(articles_only))
            .unwrap();
        registry
            .add_form_outlet(outlet("two", "2").should_apply(|_m: &ItemType, _c: &ItemFormOutletsCtx| false))
            .unwrap();
        registry
            .add_form_outlet(outlet("three", "3").should_apply(articles_only))
            .unwrap();

        let ids: Vec<String> = declared(&params, &article_model())
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["one", "three"]);
        assert!(declared(&params, &homepage_model()).is_empty());
    }

    #[test]
    fn throw_rejects_duplicate_and_keeps_first() {
        let (registry, params, renderer) = setup(DuplicateIdHandling::Throw);
        registry.add_form_outlet(outlet("o", "first")).unwrap();
        let err = registry.add_form_outlet(outlet("o", "second")).unwrap_err();
        assert_eq!(err.to_string(), "Form outlet with id \"o\" is already registered");

        let render = params.render_item_form_outlet.as_ref().unwrap();
        render("o", article_form_ctx()).unwrap();
        assert_eq!(renderer.last_markup().as_deref(), Some("first"));
    }

    #[test]
    #[traced_test]
    fn warn_replaces_duplicate() {
        let (registry, params, renderer) = setup(DuplicateIdHandling::Warn);
        registry.add_form_outlet(outlet("o", "first")).unwrap();
        registry.add_form_outlet(outlet("o", "second")).unwrap();

        assert!(logs_contain("Form outlet with id \"o\" is already registered"));
        assert_eq!(declared(&params, &article_model()).len(), 1);
        let render = params.render_item_form_outlet.as_ref().unwrap();
        render("o", article_form_ctx()).unwrap();
        assert_eq!(renderer.last_markup().as_deref(), Some("second"));
    }

    #[test]
    #[traced_test]
    fn ignore_replaces_duplicate_silently() {
        let (registry, params, renderer) = setup(DuplicateIdHandling::Ignore);
        registry.add_form_outlet(outlet("o", "first")).unwrap();
        registry
            .add_form_outlet(outlet("o", "second").initial_height(50))
            .unwrap();

        assert!(!logs_contain("already registered"));
        assert_eq!(
            declared(&params, &article_model()),
            vec![ItemFormOutlet {
                id: "o".into(),
                initial_height: 50
            }]
        );
        let render = params.render_item_form_outlet.as_ref().unwrap();
        render("o", article_form_ctx()).unwrap();
        assert_eq!(renderer.last_markup().as_deref(), Some("second"));
    }

    #[test]
    fn hook_captured_before_registration_sees_later_entries() {
        let (registry, params, _) = setup(DuplicateIdHandling::Warn);
        let hook = params.item_form_outlets.clone().unwrap();
        registry.add_form_outlet(outlet("a", "A")).unwrap();
        registry.add_form_outlet(outlet("b", "B")).unwrap();

        let ids: Vec<String> = hook(&article_model(), &base_ctx())
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn unknown_outlet_render_is_noop() {
        let (_registry, params, renderer) = setup(DuplicateIdHandling::Warn);
        let render = params.render_item_form_outlet.as_ref().unwrap();
        assert!(render("nope", article_form_ctx()).is_ok());
        assert_eq!(renderer.render_count(), 0);
    }

    #[test]
    fn missing_id_is_rejected_without_mutation() {
        let (registry, params, _) = setup(DuplicateIdHandling::Warn);
        let err = registry.add_form_outlet(outlet("", "x")).unwrap_err();
        assert!(matches!(
            err,
            KitError::MissingField {
                entity: "Form outlet",
                field: "id"
            }
        ));
        assert!(declared(&params, &article_model()).is_empty());
    }

    #[test]
    fn collection_outlets_are_not_implemented() {
        let (registry, _, _) = setup(DuplicateIdHandling::Warn);
        let err = registry
            .add_collection_outlet(CollectionOutletConfig {
                id: "c".into(),
                component: component(|_ctx: &datokit_core::Ctx| Node::Empty),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Collection outlets not yet implemented");
    }
}
