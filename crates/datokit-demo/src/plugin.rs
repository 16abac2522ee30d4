// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The demo plugin: a form outlet, a page with its navigation tab, a select
//! editor replacing one text field, and structured text styles and marks.

use std::collections::BTreeMap;

use datokit::helpers::context_has_all_fields;
use datokit::{
    FieldExtensionConfig, FieldExtensionOverrideConfig, FormOutletConfig, PageConfig, PluginKit,
};
use datokit_core::types::{
    FieldExtensionRef, FieldExtensionType, FieldTypes, MainNavigationTab, PageRef,
    StructuredTextCustomBlockStyle, StructuredTextCustomMark,
};
use datokit_core::{
    Ctx, Field, FieldCtx, FieldType, ItemFormCtx, ItemType, KitError, Node, PageCtx,
};

pub const OUTLET_ID: &str = "test-outlet";
pub const PAGE_ID: &str = "test-page";
pub const SELECT_EXTENSION_ID: &str = "demo-select";
pub const OVERRIDDEN_FIELD: &str = "demo_text_field";

const SELECT_OPTIONS: [(&str, &str); 2] = [("DEMO 01", "demo-01"), ("DEMO 02", "demo-02")];

/// Register everything the demo plugin offers.
pub fn register(kit: &PluginKit) -> Result<(), KitError> {
    kit.add_form_outlet(
        FormOutletConfig::new(OUTLET_ID, test_outlet)
            .initial_height(0)
            .should_apply(|_model: &ItemType, ctx: &Ctx| {
                let applies = context_has_all_fields(ctx, &["title"]);
                tracing::debug!(applies, "test outlet should_apply");
                applies
            }),
    )?;

    kit.add_main_navigation_tab(MainNavigationTab {
        label: "Test Page".into(),
        icon: "chart-line".into(),
        points_to: PageRef::new(PAGE_ID),
        placement: None,
        rank: None,
    })?;
    kit.add_page(PageConfig::new(PAGE_ID, test_page))?;

    kit.add_field_extension(FieldExtensionConfig::new(
        SELECT_EXTENSION_ID,
        "Demo Select Field",
        FieldExtensionType::Editor,
        FieldTypes::Only(vec![FieldType::String]),
        demo_select_field,
    ))?;
    kit.override_field_extension(
        FieldExtensionOverrideConfig::new(|field: &Field, _ctx: &Ctx| {
            field.attributes.api_key == OVERRIDDEN_FIELD
        })
        .editor(FieldExtensionRef::new(SELECT_EXTENSION_ID)),
    );

    kit.custom_block_styles_for_structured_text_field(|_field: &Field, _ctx: &Ctx| {
        Some(block_styles())
    })?;
    kit.custom_marks_for_structured_text_field(|_field: &Field, _ctx: &Ctx| Some(marks()))?;

    Ok(())
}

fn test_outlet(ctx: &ItemFormCtx) -> Node {
    Node::element("div")
        .attr("class", "test-outlet")
        .child(format!("Outlet for {}", ctx.item_type.attributes.api_key))
        .into()
}

fn test_page(ctx: &PageCtx) -> Node {
    Node::element("h1")
        .child(format!("Test page {} ({})", ctx.page_id, ctx.locale))
        .into()
}

fn demo_select_field(ctx: &FieldCtx) -> Node {
    let current = ctx.form_values[ctx.field_path.as_str()].as_str().unwrap_or_default();
    let select = SELECT_OPTIONS.iter().fold(
        Node::element("select")
            .attr("name", ctx.field_path.as_str())
            .attr("id", ctx.field_path.as_str()),
        |select, (label, value)| {
            let mut option = Node::element("option").attr("value", *value);
            if *value == current {
                option = option.attr("selected", "selected");
            }
            select.child(option.child(*label))
        },
    );

    Node::element("div")
        .attr("class", "demo-select")
        .child(Node::element("p").child("The string field has been overridden by the plugin."))
        .child(select)
        .into()
}

fn style(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn block_style(id: &str, node: &str, label: &str, applied: &[(&str, &str)]) -> StructuredTextCustomBlockStyle {
    StructuredTextCustomBlockStyle {
        id: id.into(),
        node: node.into(),
        label: label.into(),
        applied_style: style(applied),
    }
}

fn mark(id: &str, label: &str, icon: &str, shortcut: Option<&str>, applied: &[(&str, &str)]) -> StructuredTextCustomMark {
    StructuredTextCustomMark {
        id: id.into(),
        label: label.into(),
        icon: icon.into(),
        keyboard_shortcut: shortcut.map(str::to_string),
        applied_style: style(applied),
    }
}

fn block_styles() -> Vec<StructuredTextCustomBlockStyle> {
    vec![
        block_style(
            "emphasized",
            "paragraph",
            "Emphasized",
            &[
                ("fontFamily", "Georgia"),
                ("fontStyle", "italic"),
                ("fontSize", "1.4em"),
                ("lineHeight", "1.2"),
                ("color", "#2c3e50"),
            ],
        ),
        block_style(
            "callout",
            "paragraph",
            "Callout",
            &[
                ("backgroundColor", "#f0f7ff"),
                ("borderLeft", "4px solid #0066cc"),
                ("padding", "1em"),
                ("margin", "1em 0"),
            ],
        ),
        block_style(
            "warning",
            "paragraph",
            "Warning",
            &[
                ("backgroundColor", "#fff3cd"),
                ("borderLeft", "4px solid #ffc107"),
                ("padding", "1em"),
                ("margin", "1em 0"),
            ],
        ),
        block_style(
            "special-heading",
            "heading",
            "Special Heading",
            &[
                ("backgroundColor", "#f5f5f5"),
                ("padding", "0.5em 1em"),
                ("borderRadius", "4px"),
                ("color", "#333"),
            ],
        ),
    ]
}

fn marks() -> Vec<StructuredTextCustomMark> {
    vec![
        mark(
            "spoiler",
            "Spoiler",
            "bomb",
            Some("mod+shift+s"),
            &[
                ("backgroundColor", "rgba(0, 0, 0, 0.8)"),
                ("color", "rgba(0, 0, 0, 0.8)"),
                ("cursor", "help"),
            ],
        ),
        mark(
            "keyboard",
            "Keyboard",
            "keyboard",
            Some("mod+shift+k"),
            &[
                ("fontFamily", "monospace"),
                ("backgroundColor", "#f4f4f4"),
                ("padding", "0.2em 0.4em"),
                ("borderRadius", "3px"),
                ("border", "1px solid #ccc"),
                ("fontSize", "0.9em"),
            ],
        ),
        mark(
            "highlight-yellow",
            "Highlight (Yellow)",
            "marker",
            Some("mod+shift+h"),
            &[("backgroundColor", "#ffeb3b"), ("padding", "0.1em 0.2em")],
        ),
        mark(
            "small-caps",
            "Small Caps",
            "text-height",
            None,
            &[("fontVariant", "small-caps"), ("letterSpacing", "0.05em")],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use datokit::PluginOptions;
    use datokit_core::ConnectParameters;
    use datokit_test_utils::RecordingRenderer;
    use datokit_test_utils::fixtures::{article_model, base_ctx, body_field, title_field_ctx};

    fn registered() -> (ConnectParameters, Arc<RecordingRenderer>) {
        let renderer = Arc::new(RecordingRenderer::new());
        let kit = PluginKit::new(PluginOptions::default().render(renderer.clone())).unwrap();
        register(&kit).unwrap();
        (kit.parameters(), renderer)
    }

    #[test]
    fn outlet_applies_when_title_field_is_loaded() {
        let (params, _) = registered();
        let outlets = (params.item_form_outlets.as_ref().unwrap())(&article_model(), &base_ctx());
        assert_eq!(outlets.len(), 1);
        assert_eq!(outlets[0].id, OUTLET_ID);
        assert_eq!(outlets[0].initial_height, 0);

        let bare = (params.item_form_outlets.as_ref().unwrap())(&article_model(), &Ctx::default());
        assert!(bare.is_empty());
    }

    #[test]
    fn override_targets_demo_text_field_only() {
        let (params, _) = registered();
        let resolve = params.override_field_extensions.as_ref().unwrap();
        let demo = Field::new("f-demo", OVERRIDDEN_FIELD, "string");
        assert_eq!(
            resolve(&demo, &base_ctx()).and_then(|o| o.editor).map(|e| e.id),
            Some(SELECT_EXTENSION_ID.to_string())
        );
        assert_eq!(resolve(&body_field(), &base_ctx()), None);
    }

    #[test]
    fn select_marks_current_value() {
        let (params, renderer) = registered();
        let mut ctx = title_field_ctx();
        ctx.form.form_values = serde_json::json!({ "title": "demo-02" });
        (params.render_field_extension.as_ref().unwrap())(SELECT_EXTENSION_ID, ctx).unwrap();

        let markup = renderer.last_markup().unwrap();
        assert!(markup.contains(r#"<option value="demo-02" selected="selected">DEMO 02</option>"#));
        assert!(markup.contains(r#"<option value="demo-01">DEMO 01</option>"#));
    }

    #[test]
    fn structured_text_customizations_are_offered() {
        let (params, _) = registered();
        let styles = (params
            .custom_block_styles_for_structured_text_field
            .as_ref()
            .unwrap())(&body_field(), &base_ctx())
        .unwrap();
        assert_eq!(styles.len(), 4);
        let marks = (params.custom_marks_for_structured_text_field.as_ref().unwrap())(
            &body_field(),
            &base_ctx(),
        )
        .unwrap();
        assert_eq!(marks[3].keyboard_shortcut, None);
    }
}
