// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-field custom block styles and marks for structured text editors.

use std::sync::Arc;

use datokit_core::params::StructuredTextHook;
use datokit_core::types::{StructuredTextCustomBlockStyle, StructuredTextCustomMark};
use datokit_core::{ConnectParameters, Ctx, DuplicateIdHandling, Field, KitError};

use crate::registry::Slot;

/// Answers the customizations for one field; `None` keeps the editor defaults.
pub type CustomizationHandler<T> = Arc<dyn Fn(&Field, &Ctx) -> Option<Vec<T>> + Send + Sync>;

fn slot_hook<T: 'static>(slot: Slot<CustomizationHandler<T>>) -> StructuredTextHook<T> {
    Arc::new(move |field: &Field, ctx: &Ctx| -> Option<Vec<T>> {
        let handler = slot.get()?;
        handler(field, ctx)
    })
}

pub struct StructuredTextRegistry {
    block_styles: Slot<CustomizationHandler<StructuredTextCustomBlockStyle>>,
    marks: Slot<CustomizationHandler<StructuredTextCustomMark>>,
}

impl StructuredTextRegistry {
    pub fn new(params: &mut ConnectParameters, mode: DuplicateIdHandling) -> Self {
        let block_styles = Slot::new("Custom block styles handler", mode);
        let marks = Slot::new("Custom marks handler", mode);

        params.custom_block_styles_for_structured_text_field =
            Some(slot_hook(block_styles.clone()));
        params.custom_marks_for_structured_text_field = Some(slot_hook(marks.clone()));

        Self {
            block_styles,
            marks,
        }
    }

    pub fn custom_block_styles_for_structured_text_field<F>(&self, f: F) -> Result<(), KitError>
    where
        F: Fn(&Field, &Ctx) -> Option<Vec<StructuredTextCustomBlockStyle>> + Send + Sync + 'static,
    {
        self.block_styles.set(Arc::new(f))
    }

    pub fn custom_marks_for_structured_text_field<F>(&self, f: F) -> Result<(), KitError>
    where
        F: Fn(&Field, &Ctx) -> Option<Vec<StructuredTextCustomMark>> + Send + Sync + 'static,
    {
        self.marks.set(Arc::new(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use datokit_test_utils::fixtures::{base_ctx, body_field, title_field};
    use tracing_test::traced_test;

    fn highlight() -> StructuredTextCustomMark {
        StructuredTextCustomMark {
            id: "highlight".into(),
            label: "Highlight".into(),
            icon: "highlighter".into(),
            keyboard_shortcut: Some("Mod-Shift-h".into()),
            applied_style: BTreeMap::from([("backgroundColor".into(), "yellow".into())]),
        }
    }

    fn only_structured_text(field: &Field, _ctx: &Ctx) -> Option<Vec<StructuredTextCustomMark>> {
        (field.attributes.field_type == "structured_text").then(|| vec![highlight()])
    }

    #[test]
    fn unset_handlers_answer_none() {
        let mut params = ConnectParameters::default();
        let _registry = StructuredTextRegistry::new(&mut params, DuplicateIdHandling::Warn);
        let styles = params
            .custom_block_styles_for_structured_text_field
            .as_ref()
            .unwrap();
        assert_eq!(styles(&body_field(), &base_ctx()), None);
    }

    #[test]
    fn marks_delegate_to_handler() {
        let mut params = ConnectParameters::default();
        let registry = StructuredTextRegistry::new(&mut params, DuplicateIdHandling::Warn);
        registry
            .custom_marks_for_structured_text_field(only_structured_text)
            .unwrap();

        let marks = params.custom_marks_for_structured_text_field.as_ref().unwrap();
        assert_eq!(marks(&body_field(), &base_ctx()), Some(vec![highlight()]));
        assert_eq!(marks(&title_field(), &base_ctx()), None);
    }

    #[test]
    fn block_styles_handler_sees_field() {
        let mut params = ConnectParameters::default();
        let registry = StructuredTextRegistry::new(&mut params, DuplicateIdHandling::Warn);
        registry
            .custom_block_styles_for_structured_text_field(|field: &Field, _ctx: &Ctx| {
                Some(vec![StructuredTextCustomBlockStyle {
                    id: format!("{}-emphasis", field.attributes.api_key),
                    node: "heading".into(),
                    label: "Emphasis".into(),
                    applied_style: BTreeMap::new(),
                }])
            })
            .unwrap();

        let styles = params
            .custom_block_styles_for_structured_text_field
            .as_ref()
            .unwrap();
        let declared = styles(&body_field(), &base_ctx()).unwrap();
        assert_eq!(declared[0].id, "body-emphasis");
    }

    #[test]
    fn throw_rejects_second_handler() {
        let mut params = ConnectParameters::default();
        let registry = StructuredTextRegistry::new(&mut params, DuplicateIdHandling::Throw);
        registry
            .custom_marks_for_structured_text_field(only_structured_text)
            .unwrap();
        let err = registry
            .custom_marks_for_structured_text_field(|_f: &Field, _c: &Ctx| None)
            .unwrap_err();
        assert_eq!(err.to_string(), "Custom marks handler is already configured");

        let marks = params.custom_marks_for_structured_text_field.as_ref().unwrap();
        assert!(marks(&body_field(), &base_ctx()).is_some());
    }

    #[test]
    #[traced_test]
    fn warn_replaces_handler() {
        let mut params = ConnectParameters::default();
        let registry = StructuredTextRegistry::new(&mut params, DuplicateIdHandling::Warn);
        registry
            .custom_marks_for_structured_text_field(only_structured_text)
            .unwrap();
        registry
            .custom_marks_for_structured_text_field(|_f: &Field, _c: &Ctx| Some(Vec::new()))
            .unwrap();
        assert!(logs_contain("Custom marks handler is already configured, replacing it"));

        let marks = params.custom_marks_for_structured_text_field.as_ref().unwrap();
        assert_eq!(marks(&title_field(), &base_ctx()), Some(Vec::new()));
    }
}
