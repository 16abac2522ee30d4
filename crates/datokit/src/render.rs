// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default render adapter.
//!
//! [`RootRenderer`] mounts every rendered node into a single container,
//! looked up by element ID in a [`Document`] on first use and reused after
//! that. Each render replaces the container's previous content.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use datokit_core::{KitError, Node, Renderer};

pub use datokit_config::DEFAULT_MOUNT_ID;

/// A tree of mountable containers, addressed by element ID.
pub trait Document: Send + Sync {
    fn find_container(&self, id: &str) -> Option<Arc<dyn Container>>;
}

impl<D: Document + ?Sized> Document for Arc<D> {
    fn find_container(&self, id: &str) -> Option<Arc<dyn Container>> {
        (**self).find_container(id)
    }
}

/// A mount point whose children can be replaced wholesale.
pub trait Container: Send + Sync {
    fn replace_children(&self, markup: String) -> Result<(), KitError>;
}

/// Renderer bound to one container of a [`Document`].
pub struct RootRenderer<D> {
    document: D,
    mount_id: String,
    container: OnceLock<Arc<dyn Container>>,
}

impl<D: Document> RootRenderer<D> {
    pub fn new(document: D) -> Self {
        Self::with_mount_id(document, DEFAULT_MOUNT_ID)
    }

    pub fn with_mount_id(document: D, mount_id: impl Into<String>) -> Self {
        Self {
            document,
            mount_id: mount_id.into(),
            container: OnceLock::new(),
        }
    }

    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    fn container(&self) -> Result<&Arc<dyn Container>, KitError> {
        if let Some(container) = self.container.get() {
            return Ok(container);
        }
        let found = self
            .document
            .find_container(&self.mount_id)
            .ok_or_else(|| KitError::MountNotFound {
                id: self.mount_id.clone(),
            })?;
        tracing::debug!(mount_id = %self.mount_id, "mounted root container");
        Ok(self.container.get_or_init(|| found))
    }
}

impl<D: Document> Renderer for RootRenderer<D> {
    fn render(&self, node: Node) -> Result<(), KitError> {
        self.container()?.replace_children(node.to_markup())
    }
}

/// In-memory [`Document`] for previews and tests.
#[derive(Default)]
pub struct MemoryDocument {
    containers: HashMap<String, Arc<MemoryContainer>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document holding one empty container with the given ID.
    pub fn with_anchor(id: impl Into<String>) -> Self {
        let mut document = Self::new();
        document.add_container(id);
        document
    }

    pub fn add_container(&mut self, id: impl Into<String>) -> Arc<MemoryContainer> {
        Arc::clone(self.containers.entry(id.into()).or_default())
    }

    pub fn container(&self, id: &str) -> Option<Arc<MemoryContainer>> {
        self.containers.get(id).cloned()
    }
}

impl Document for MemoryDocument {
    fn find_container(&self, id: &str) -> Option<Arc<dyn Container>> {
        self.containers
            .get(id)
            .map(|c| Arc::clone(c) as Arc<dyn Container>)
    }
}

#[derive(Debug, Default)]
pub struct MemoryContainer {
    markup: Mutex<String>,
}

impl MemoryContainer {
    pub fn markup(&self) -> String {
        self.markup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Container for MemoryContainer {
    fn replace_children(&self, markup: String) -> Result<(), KitError> {
        *self.markup.lock().unwrap_or_else(PoisonError::into_inner) = markup;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDocument {
        inner: MemoryDocument,
        lookups: AtomicUsize,
    }

    impl Document for CountingDocument {
        fn find_container(&self, id: &str) -> Option<Arc<dyn Container>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_container(id)
        }
    }

    #[test]
    fn renders_into_root_by_default() {
        let renderer = RootRenderer::new(MemoryDocument::with_anchor("root"));
        renderer
            .render(Node::element("p").child("hello").into())
            .unwrap();
        let root = renderer.document().container("root").unwrap();
        assert_eq!(root.markup(), "<p>hello</p>");
    }

    #[test]
    fn each_render_replaces_content() {
        let renderer = RootRenderer::new(MemoryDocument::with_anchor("root"));
        renderer.render(Node::text("one")).unwrap();
        renderer.render(Node::text("two")).unwrap();
        let root = renderer.document().container("root").unwrap();
        assert_eq!(root.markup(), "two");
    }

    #[test]
    fn container_is_resolved_once() {
        let renderer = RootRenderer::new(CountingDocument {
            inner: MemoryDocument::with_anchor("root"),
            lookups: AtomicUsize::new(0),
        });
        renderer.render(Node::text("a")).unwrap();
        renderer.render(Node::text("b")).unwrap();
        renderer.render(Node::Empty).unwrap();
        assert_eq!(renderer.document().lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let renderer = RootRenderer::new(MemoryDocument::with_anchor("app"));
        let err = renderer.render(Node::text("x")).unwrap_err();
        assert_eq!(err.to_string(), "root element with id \"root\" not found");
    }

    #[test]
    fn custom_mount_id() {
        let renderer =
            RootRenderer::with_mount_id(MemoryDocument::with_anchor("plugin"), "plugin");
        assert_eq!(renderer.mount_id(), "plugin");
        renderer.render(Node::text("ok")).unwrap();
        assert_eq!(
            renderer.document().container("plugin").unwrap().markup(),
            "ok"
        );
    }
}
