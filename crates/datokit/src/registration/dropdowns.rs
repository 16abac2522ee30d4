// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dropdown actions for fields, item forms, item collections, and uploads.
//!
//! Each action type is its own ID namespace: the same ID may be used by a
//! field action and an items action without conflict.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use datokit_core::context::{
    ExecuteFieldDropdownActionCtx, ExecuteItemFormDropdownActionCtx, ExecuteItemsDropdownActionCtx,
    ExecuteUploadsDropdownActionCtx,
};
use datokit_core::params::ExecuteHook;
use datokit_core::types::DropdownAction;
use datokit_core::{
    ConnectParameters, Ctx, DropdownActionType, DuplicateIdHandling, Field, Icon, ItemFormCtx,
    ItemType, KitError,
};

use super::{Predicate, applies, predicate};
use crate::registry::Registry;
use crate::validation::require_field;

/// Async action body, run with the host context.
pub type ActionHandler<E> =
    Arc<dyn Fn(E) -> BoxFuture<'static, Result<(), KitError>> + Send + Sync>;

/// A dropdown action whose visibility depends on subject `S` in context `C`,
/// and whose handler receives an execution context `E`.
pub struct ActionConfig<S, C, E> {
    pub id: String,
    pub label: String,
    pub icon: Option<Icon>,
    pub should_apply: Option<Predicate<S, C>>,
    pub execute: ActionHandler<E>,
}

impl<S, C, E> Clone for ActionConfig<S, C, E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            should_apply: self.should_apply.clone(),
            execute: Arc::clone(&self.execute),
        }
    }
}

impl<S, C, E: 'static> ActionConfig<S, C, E> {
    pub fn new<F, Fut>(id: impl Into<String>, label: impl Into<String>, execute: F) -> Self
    where
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), KitError>> + Send + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            should_apply: None,
            execute: Arc::new(move |ctx: E| execute(ctx).boxed()),
        }
    }

    pub fn icon(mut self, icon: impl Into<Icon>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn should_apply<F>(mut self, f: F) -> Self
    where
        F: Fn(&S, &C) -> bool + Send + Sync + 'static,
    {
        self.should_apply = Some(predicate(f));
        self
    }
}

pub type FieldDropdownActionConfig =
    ActionConfig<Field, ItemFormCtx, ExecuteFieldDropdownActionCtx>;
pub type ItemFormDropdownActionConfig =
    ActionConfig<ItemType, ItemFormCtx, ExecuteItemFormDropdownActionCtx>;
pub type ItemsDropdownActionConfig = ActionConfig<ItemType, Ctx, ExecuteItemsDropdownActionCtx>;
/// Upload actions have no subject; their predicate only sees the context.
pub type UploadsDropdownActionConfig = ActionConfig<(), Ctx, ExecuteUploadsDropdownActionCtx>;

/// A dropdown action of any type.
#[derive(Clone)]
pub enum DropdownActionConfig {
    Field(FieldDropdownActionConfig),
    ItemForm(ItemFormDropdownActionConfig),
    Items(ItemsDropdownActionConfig),
    Uploads(UploadsDropdownActionConfig),
}

impl DropdownActionConfig {
    pub fn action_type(&self) -> DropdownActionType {
        match self {
            DropdownActionConfig::Field(_) => DropdownActionType::Field,
            DropdownActionConfig::ItemForm(_) => DropdownActionType::ItemForm,
            DropdownActionConfig::Items(_) => DropdownActionType::Items,
            DropdownActionConfig::Uploads(_) => DropdownActionType::Uploads,
        }
    }

    fn id_and_label(&self) -> (&str, &str) {
        match self {
            DropdownActionConfig::Field(a) => (&a.id, &a.label),
            DropdownActionConfig::ItemForm(a) => (&a.id, &a.label),
            DropdownActionConfig::Items(a) => (&a.id, &a.label),
            DropdownActionConfig::Uploads(a) => (&a.id, &a.label),
        }
    }
}

fn declare<S, C, E>(
    actions: &Registry<ActionConfig<S, C, E>>,
    subject: &S,
    ctx: &C,
) -> Vec<DropdownAction> {
    actions
        .values()
        .iter()
        .filter(|a| applies(a.should_apply.as_ref(), subject, ctx))
        .map(|a| DropdownAction {
            id: a.id.clone(),
            label: a.label.clone(),
            icon: a.icon.clone(),
        })
        .collect()
}

/// Execute hook for one action type. Unknown IDs resolve to `Ok(())`.
///
/// The handler is cloned out of the registry before it runs, so no lock is
/// held while the action is awaited.
fn execute_hook<S, C, E>(actions: Registry<ActionConfig<S, C, E>>) -> ExecuteHook<E>
where
    S: 'static,
    C: 'static,
    E: 'static,
{
    Arc::new(
        move |id: &str, ctx: E| -> BoxFuture<'static, Result<(), KitError>> {
            match actions.get(id) {
                Some(action) => {
                    tracing::debug!(entity = actions.entity(), id, "executing dropdown action");
                    (action.execute)(ctx)
                }
                None => futures::future::ready(Ok(())).boxed(),
            }
        },
    )
}

pub struct DropdownActionRegistry {
    field: Registry<FieldDropdownActionConfig>,
    item_form: Registry<ItemFormDropdownActionConfig>,
    items: Registry<ItemsDropdownActionConfig>,
    uploads: Registry<UploadsDropdownActionConfig>,
}

impl DropdownActionRegistry {
    pub fn new(params: &mut ConnectParameters, mode: DuplicateIdHandling) -> Self {
        let field = Registry::new("field dropdown action", mode);
        let item_form = Registry::new("itemForm dropdown action", mode);
        let items = Registry::new("items dropdown action", mode);
        let uploads = Registry::new("uploads dropdown action", mode);

        let live = field.clone();
        params.field_dropdown_actions = Some(Arc::new(
            move |f: &Field, ctx: &ItemFormCtx| -> Vec<DropdownAction> { declare(&live, f, ctx) },
        ));
        params.execute_field_dropdown_action = Some(execute_hook(field.clone()));

        let live = item_form.clone();
        params.item_form_dropdown_actions = Some(Arc::new(
            move |model: &ItemType, ctx: &ItemFormCtx| -> Vec<DropdownAction> {
                declare(&live, model, ctx)
            },
        ));
        params.execute_item_form_dropdown_action = Some(execute_hook(item_form.clone()));

        let live = items.clone();
        params.items_dropdown_actions = Some(Arc::new(
            move |model: &ItemType, ctx: &Ctx| -> Vec<DropdownAction> { declare(&live, model, ctx) },
        ));
        params.execute_items_dropdown_action = Some(execute_hook(items.clone()));

        let live = uploads.clone();
        params.uploads_dropdown_actions = Some(Arc::new(
            move |ctx: &Ctx| -> Vec<DropdownAction> { declare(&live, &(), ctx) },
        ));
        params.execute_uploads_dropdown_action = Some(execute_hook(uploads.clone()));

        Self {
            field,
            item_form,
            items,
            uploads,
        }
    }

    /// Register an action in the namespace of its type.
    pub fn add_dropdown_action(&self, config: DropdownActionConfig) -> Result<(), KitError> {
        let (id, label) = config.id_and_label();
        require_field(id, "id", "Dropdown action")?;
        require_field(label, "label", "Dropdown action")?;

        match config {
            DropdownActionConfig::Field(action) => self.field.insert(action.id.clone(), action),
            DropdownActionConfig::ItemForm(action) => {
                self.item_form.insert(action.id.clone(), action)
            }
            DropdownActionConfig::Items(action) => self.items.insert(action.id.clone(), action),
            DropdownActionConfig::Uploads(action) => {
                self.uploads.insert(action.id.clone(), action)
            }
        }
    }

    /// Registered IDs for one action type.
    pub fn ids(&self, action_type: DropdownActionType) -> Vec<String> {
        match action_type {
            DropdownActionType::Field => self.field.ids(),
            DropdownActionType::ItemForm => self.item_form.ids(),
            DropdownActionType::Items => self.items.ids(),
            DropdownActionType::Uploads => self.uploads.ids(),
        }
    }
}
