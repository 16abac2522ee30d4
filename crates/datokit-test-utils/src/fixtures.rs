// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema objects and contexts shared across tests.

use std::sync::Arc;

use datokit_core::{
    Ctx, Field, FieldCtx, HostBridge, Item, ItemFormCtx, ItemType, ItemsActionCtx, ModalCtx,
    PageCtx, Upload, UploadsActionCtx,
};

/// A regular (collection) model with api key `article`.
pub fn article_model() -> ItemType {
    ItemType::new("model-article", "article")
}

/// A singleton model with api key `homepage`.
pub fn homepage_model() -> ItemType {
    ItemType::new("model-homepage", "homepage").singleton()
}

/// A string field `title` on the article model.
pub fn title_field() -> Field {
    Field::new("field-title", "title", "string").in_item_type("model-article")
}

/// A structured text field `body` on the article model.
pub fn body_field() -> Field {
    Field::new("field-body", "body", "structured_text").in_item_type("model-article")
}

/// A base context knowing the article and homepage models and their fields.
pub fn base_ctx() -> Ctx {
    Ctx::default()
        .with_item_type(article_model())
        .with_item_type(homepage_model())
        .with_field(title_field())
        .with_field(body_field())
}

/// Same as [`base_ctx`], wired to the given host bridge.
pub fn base_ctx_with_host(host: Arc<dyn HostBridge>) -> Ctx {
    Ctx {
        host,
        ..base_ctx()
    }
}

/// Item form context editing a new article.
pub fn article_form_ctx() -> ItemFormCtx {
    ItemFormCtx::new(base_ctx(), article_model())
}

/// Field context for the article title.
pub fn title_field_ctx() -> FieldCtx {
    FieldCtx::new(article_form_ctx(), title_field(), "title")
}

/// Field context for the article title, wired to the given host bridge.
pub fn title_field_ctx_with_host(host: Arc<dyn HostBridge>) -> FieldCtx {
    let form = ItemFormCtx::new(base_ctx_with_host(host), article_model());
    FieldCtx::new(form, title_field(), "title")
}

pub fn page_ctx(page_id: &str) -> PageCtx {
    PageCtx {
        base: base_ctx(),
        page_id: page_id.to_string(),
    }
}

pub fn modal_ctx(modal_id: &str) -> ModalCtx {
    ModalCtx {
        base: base_ctx(),
        modal_id: modal_id.to_string(),
        parameters: serde_json::Value::Null,
    }
}

/// Two article records.
pub fn articles() -> Vec<Item> {
    vec![
        Item::new("item-1", "model-article"),
        Item::new("item-2", "model-article"),
    ]
}

pub fn items_action_ctx() -> ItemsActionCtx {
    ItemsActionCtx {
        base: base_ctx(),
        items: articles(),
    }
}

pub fn uploads_action_ctx() -> UploadsActionCtx {
    UploadsActionCtx {
        base: base_ctx(),
        uploads: vec![Upload {
            id: "upload-1".to_string(),
            ..Default::default()
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_ctx_knows_fixture_schema() {
        let ctx = base_ctx();
        assert_eq!(ctx.item_types.len(), 2);
        assert!(ctx.fields.contains_key("field-title"));
        assert!(ctx.item_types["model-homepage"].attributes.singleton);
    }

    #[test]
    fn field_ctx_derefs_to_form() {
        let ctx = title_field_ctx();
        assert_eq!(ctx.item_type.attributes.api_key, "article");
        assert_eq!(ctx.field_path, "title");
    }
}
