// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration categories.
//!
//! Each category owns its storage and installs its SDK hooks into the
//! shared [`ConnectParameters`](datokit_core::ConnectParameters) exactly
//! once, when it is constructed. The hooks read live storage on every call.

pub mod config_screen;
pub mod dropdowns;
pub mod events;
pub mod fields;
pub mod modals;
pub mod outlets;
pub mod pages;
pub mod sidebars;
pub mod structured_text;

use std::sync::Arc;

use datokit_core::params::RenderHook;
use datokit_core::{Node, Renderer};

use crate::registry::Registry;

/// A renderable unit: builds the node to mount for a host context.
pub type Component<C> = Arc<dyn Fn(&C) -> Node + Send + Sync>;

/// Decides whether an entry applies to a subject (a model or a field).
pub type Predicate<S, C> = Arc<dyn Fn(&S, &C) -> bool + Send + Sync>;

pub(crate) fn component<C, F>(f: F) -> Component<C>
where
    F: Fn(&C) -> Node + Send + Sync + 'static,
{
    Arc::new(f)
}

pub(crate) fn predicate<S, C, F>(f: F) -> Predicate<S, C>
where
    F: Fn(&S, &C) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// `true` when there is no predicate or it accepts the subject.
pub(crate) fn applies<S, C>(should_apply: Option<&Predicate<S, C>>, subject: &S, ctx: &C) -> bool {
    should_apply.is_none_or(|p| p(subject, ctx))
}

/// Render hook that looks an entry up by ID and mounts its component.
///
/// Unknown IDs are a no-op.
pub(crate) fn render_hook<T, C>(
    entries: Registry<T>,
    renderer: Arc<dyn Renderer>,
    component_of: fn(&T) -> &Component<C>,
) -> RenderHook<C>
where
    T: Send + Sync + 'static,
    C: 'static,
{
    Arc::new(move |id: &str, ctx: C| {
        let Some(entry) = entries.get(id) else {
            tracing::debug!(entity = entries.entity(), id, "render requested for unknown id");
            return Ok(());
        };
        let node = component_of(&entry)(&ctx);
        renderer.render(node)
    })
}
