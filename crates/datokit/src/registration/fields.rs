// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manual field extensions, field extension overrides, and hidden fields.
//!
//! Overrides are resolved per field, first match wins. Hidden-field
//! predicates are checked before any override rule; a hidden field gets the
//! built-in [`HIDDEN_FIELD_EXTENSION_ID`] editor, which hides the field in
//! the form and renders nothing.

use std::collections::BTreeMap;
use std::sync::Arc;

use datokit_core::context::{
    OverrideFieldExtensionsCtx, RenderFieldExtensionCtx, RenderManualFieldExtensionConfigScreenCtx,
};
use datokit_core::types::{
    FieldExtensionOverride, FieldExtensionRef, FieldExtensionType, FieldTypes,
    ManualFieldExtension,
};
use datokit_core::{ConnectParameters, Ctx, DuplicateIdHandling, Field, KitError, Node, Renderer};

use super::{Component, Predicate, component, predicate};
use crate::registry::{AppendList, Registry};
use crate::validation::require_field;

const ENTITY: &str = "Field extension";

/// Editor ID assigned to fields matched by a hidden-field predicate.
pub const HIDDEN_FIELD_EXTENSION_ID: &str = "@datokit/hidden-field";

/// Validates extension parameters, returning a message per invalid parameter.
pub type ConfigValidator =
    Arc<dyn Fn(&serde_json::Value) -> BTreeMap<String, String> + Send + Sync>;

#[derive(Clone)]
pub struct FieldExtensionConfig {
    pub id: String,
    pub name: String,
    pub kind: FieldExtensionType,
    pub field_types: FieldTypes,
    pub component: Component<RenderFieldExtensionCtx>,
    pub configurable: Option<bool>,
    /// Rendered on the extension's configuration screen.
    pub config_component: Option<Component<RenderManualFieldExtensionConfigScreenCtx>>,
    pub validate_config: Option<ConfigValidator>,
}

impl FieldExtensionConfig {
    pub fn new<F>(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: FieldExtensionType,
        field_types: FieldTypes,
        component_fn: F,
    ) -> Self
    where
        F: Fn(&RenderFieldExtensionCtx) -> Node + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            field_types,
            component: component(component_fn),
            configurable: None,
            config_component: None,
            validate_config: None,
        }
    }

    pub fn configurable(mut self, configurable: bool) -> Self {
        self.configurable = Some(configurable);
        self
    }

    pub fn config_component<F>(mut self, component_fn: F) -> Self
    where
        F: Fn(&RenderManualFieldExtensionConfigScreenCtx) -> Node + Send + Sync + 'static,
    {
        self.config_component = Some(component(component_fn));
        self
    }

    pub fn validate_config<F>(mut self, validator: F) -> Self
    where
        F: Fn(&serde_json::Value) -> BTreeMap<String, String> + Send + Sync + 'static,
    {
        self.validate_config = Some(Arc::new(validator));
        self
    }

    fn descriptor(&self) -> ManualFieldExtension {
        ManualFieldExtension {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            field_types: self.field_types.clone(),
            configurable: self.configurable,
        }
    }
}

/// An override rule: when `should_apply` matches a field, its editor and
/// addons replace the defaults.
#[derive(Clone)]
pub struct FieldExtensionOverrideConfig {
    pub should_apply: Predicate<Field, OverrideFieldExtensionsCtx>,
    pub editor: Option<FieldExtensionRef>,
    pub addons: Vec<FieldExtensionRef>,
}

impl FieldExtensionOverrideConfig {
    pub fn new<F>(should_apply: F) -> Self
    where
        F: Fn(&Field, &OverrideFieldExtensionsCtx) -> bool + Send + Sync + 'static,
    {
        Self {
            should_apply: predicate(should_apply),
            editor: None,
            addons: Vec::new(),
        }
    }

    pub fn editor(mut self, editor: FieldExtensionRef) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn addon(mut self, addon: FieldExtensionRef) -> Self {
        self.addons.push(addon);
        self
    }

    fn resolve(&self) -> FieldExtensionOverride {
        FieldExtensionOverride {
            editor: self.editor.clone(),
            addons: (!self.addons.is_empty()).then(|| self.addons.clone()),
        }
    }
}

/// Decides whether a field should be hidden from the item form.
pub type HiddenFieldPredicate = Predicate<Field, OverrideFieldExtensionsCtx>;

pub struct FieldExtensionRegistry {
    extensions: Registry<FieldExtensionConfig>,
    overrides: AppendList<FieldExtensionOverrideConfig>,
    hidden: AppendList<HiddenFieldPredicate>,
}

impl FieldExtensionRegistry {
    pub fn new(
        params: &mut ConnectParameters,
        renderer: Arc<dyn Renderer>,
        mode: DuplicateIdHandling,
    ) -> Self {
        let extensions: Registry<FieldExtensionConfig> = Registry::new(ENTITY, mode);
        let overrides: AppendList<FieldExtensionOverrideConfig> = AppendList::new();
        let hidden: AppendList<HiddenFieldPredicate> = AppendList::new();

        let live = extensions.clone();
        params.manual_field_extensions = Some(Arc::new(
            move |_ctx: &Ctx| -> Vec<ManualFieldExtension> {
                live.values().iter().map(|e| e.descriptor()).collect()
            },
        ));

        let live = extensions.clone();
        let field_renderer = Arc::clone(&renderer);
        params.render_field_extension = Some(Arc::new(
            move |id: &str, ctx: RenderFieldExtensionCtx| -> Result<(), KitError> {
                if id == HIDDEN_FIELD_EXTENSION_ID {
                    ctx.host.toggle_field(&ctx.field_path, false)?;
                    return field_renderer.render(Node::Empty);
                }
                match live.get(id) {
                    Some(extension) => field_renderer.render((extension.component)(&ctx)),
                    None => Ok(()),
                }
            },
        ));

        let live = extensions.clone();
        params.render_manual_field_extension_config_screen = Some(Arc::new(
            move |id: &str,
                  ctx: RenderManualFieldExtensionConfigScreenCtx|
                  -> Result<(), KitError> {
                let Some(config_component) =
                    live.get(id).and_then(|e| e.config_component.clone())
                else {
                    return Ok(());
                };
                renderer.render(config_component(&ctx))
            },
        ));

        let live = extensions.clone();
        params.validate_manual_field_extension_parameters = Some(Arc::new(
            move |id: &str, parameters: &serde_json::Value| -> BTreeMap<String, String> {
                live.get(id)
                    .and_then(|e| e.validate_config.clone())
                    .map(|validate| validate(parameters))
                    .unwrap_or_default()
            },
        ));

        let rules = overrides.clone();
        let hidden_rules = hidden.clone();
        params.override_field_extensions = Some(Arc::new(
            move |field: &Field, ctx: &OverrideFieldExtensionsCtx| -> Option<FieldExtensionOverride> {
                if hidden_rules.snapshot().iter().any(|hide| hide(field, ctx)) {
                    return Some(FieldExtensionOverride {
                        editor: Some(FieldExtensionRef::new(HIDDEN_FIELD_EXTENSION_ID)),
                        addons: None,
                    });
                }
                rules
                    .snapshot()
                    .iter()
                    .find(|rule| (rule.should_apply)(field, ctx))
                    .map(FieldExtensionOverrideConfig::resolve)
            },
        ));

        Self {
            extensions,
            overrides,
            hidden,
        }
    }

    pub fn add_field_extension(&self, config: FieldExtensionConfig) -> Result<(), KitError> {
        require_field(&config.id, "id", ENTITY)?;
        require_field(&config.name, "name", ENTITY)?;
        self.extensions.insert(config.id.clone(), config)
    }

    /// Append an override rule. Rules are tried in registration order.
    pub fn override_field_extension(&self, config: FieldExtensionOverrideConfig) {
        self.overrides.push(config);
    }

    /// Hide every field matching `predicate`.
    pub fn add_hidden_field<F>(&self, predicate_fn: F)
    where
        F: Fn(&Field, &OverrideFieldExtensionsCtx) -> bool + Send + Sync + 'static,
    {
        self.hidden.push(predicate(predicate_fn));
    }
}
