// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A stand-in host SDK that calls each declaration hook against a sample
//! schema and prints what the plugin declared.

use async_trait::async_trait;
use serde::Serialize;

use datokit_core::context::PageCtx;
use datokit_core::{
    ConnectParameters, Ctx, Field, ItemFormCtx, ItemType, KitError, PluginInfo, PluginSdk,
};

/// Sample schema: one article model with a title, a demo text field, and a
/// structured text body.
pub fn sample_ctx() -> Ctx {
    let article = ItemType::new("model-article", "article");
    Ctx {
        plugin: PluginInfo {
            id: "demo-plugin".into(),
            name: "Datokit demo".into(),
            parameters: serde_json::Value::Object(Default::default()),
        },
        ..Ctx::default()
    }
    .with_item_type(article)
    .with_field(Field::new("field-title", "title", "string").in_item_type("model-article"))
    .with_field(
        Field::new("field-demo", "demo_text_field", "string").in_item_type("model-article"),
    )
    .with_field(
        Field::new("field-content", "content", "structured_text").in_item_type("model-article"),
    )
}

pub struct JsonDumpSdk {
    ctx: Ctx,
    model_id: String,
}

impl JsonDumpSdk {
    pub fn new(ctx: Ctx, model_id: impl Into<String>) -> Self {
        Self {
            ctx,
            model_id: model_id.into(),
        }
    }

    /// Invoke every installed declaration hook and collect the results.
    pub fn report(&self, parameters: &ConnectParameters) -> Result<serde_json::Value, KitError> {
        let ctx = &self.ctx;
        let model = ctx
            .item_types
            .get(&self.model_id)
            .cloned()
            .ok_or_else(|| sdk_error(format!("sample model {} is missing", self.model_id)))?;
        let form = ItemFormCtx::new(ctx.clone(), model.clone());

        let mut fields: Vec<&Field> = ctx.fields.values().collect();
        fields.sort_by(|a, b| a.id.cmp(&b.id));

        let mut report = serde_json::Map::new();
        report.insert("installedHooks".into(), to_json(&parameters.installed_hooks())?);

        if let Some(hook) = &parameters.item_form_outlets {
            report.insert("itemFormOutlets".into(), to_json(&hook(&model, ctx))?);
        }
        if let Some(hook) = &parameters.main_navigation_tabs {
            report.insert("mainNavigationTabs".into(), to_json(&hook(ctx))?);
        }
        if let Some(hook) = &parameters.content_area_sidebar_items {
            report.insert("contentAreaSidebarItems".into(), to_json(&hook(ctx))?);
        }
        if let Some(hook) = &parameters.item_form_sidebar_panels {
            report.insert("itemFormSidebarPanels".into(), to_json(&hook(&model, &form))?);
        }
        if let Some(hook) = &parameters.item_form_sidebars {
            report.insert("itemFormSidebars".into(), to_json(&hook(&model, &form))?);
        }
        if let Some(hook) = &parameters.manual_field_extensions {
            report.insert("manualFieldExtensions".into(), to_json(&hook(ctx))?);
        }
        if let Some(hook) = &parameters.override_field_extensions {
            let mut overrides = serde_json::Map::new();
            for field in fields.iter().copied() {
                overrides.insert(
                    field.attributes.api_key.clone(),
                    to_json(&hook(field, ctx))?,
                );
            }
            report.insert("overrideFieldExtensions".into(), overrides.into());
        }
        if let Some(hook) = &parameters.items_dropdown_actions {
            report.insert("itemsDropdownActions".into(), to_json(&hook(&model, ctx))?);
        }
        if let Some(hook) = &parameters.uploads_dropdown_actions {
            report.insert("uploadsDropdownActions".into(), to_json(&hook(ctx))?);
        }

        let structured: Vec<&Field> = fields
            .iter()
            .copied()
            .filter(|f| f.attributes.field_type == "structured_text")
            .collect();
        if let Some(hook) = &parameters.custom_block_styles_for_structured_text_field {
            let mut styles = serde_json::Map::new();
            for field in structured.iter().copied() {
                styles.insert(field.attributes.api_key.clone(), to_json(&hook(field, ctx))?);
            }
            report.insert("customBlockStyles".into(), styles.into());
        }
        if let Some(hook) = &parameters.custom_marks_for_structured_text_field {
            let mut marks = serde_json::Map::new();
            for field in structured.iter().copied() {
                marks.insert(field.attributes.api_key.clone(), to_json(&hook(field, ctx))?);
            }
            report.insert("customMarks".into(), marks.into());
        }

        Ok(report.into())
    }

    /// Render every page the navigation tabs point at.
    fn render_pages(&self, parameters: &ConnectParameters) -> Result<(), KitError> {
        let (Some(tabs), Some(render)) = (&parameters.main_navigation_tabs, &parameters.render_page)
        else {
            return Ok(());
        };
        for tab in tabs(&self.ctx) {
            let page_id = tab.points_to.page_id;
            let ctx = PageCtx {
                base: self.ctx.clone(),
                page_id: page_id.clone(),
            };
            render(&page_id, ctx)?;
        }
        Ok(())
    }
}

#[async_trait]
impl PluginSdk for JsonDumpSdk {
    async fn connect(&self, parameters: ConnectParameters) -> Result<(), KitError> {
        let report = self.report(&parameters)?;
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| sdk_error_with_source("failed to format report", e))?;
        println!("{text}");
        self.render_pages(&parameters)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, KitError> {
    serde_json::to_value(value).map_err(|e| sdk_error_with_source("failed to serialize descriptor", e))
}

fn sdk_error(message: String) -> KitError {
    KitError::Sdk {
        message,
        source: None,
    }
}

fn sdk_error_with_source(message: &str, source: serde_json::Error) -> KitError {
    KitError::Sdk {
        message: message.to_string(),
        source: Some(Box::new(source)),
    }
}
