// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: register through a `PluginKit`, connect to a mock SDK,
//! then drive the captured hooks the way a host would.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use datokit::helpers::{should_apply_to_field_types, should_apply_to_item_types};
use datokit::{
    DropdownActionConfig, FieldDropdownActionConfig, FieldExtensionConfig,
    FieldExtensionOverrideConfig, FormOutletConfig, HIDDEN_FIELD_EXTENSION_ID,
    ItemFormDropdownActionConfig, PageConfig, PluginKit, PluginOptions, SidebarPanelConfig,
};
use datokit_core::types::{FieldExtensionRef, FieldExtensionType, FieldTypes, MainNavigationTab, PageRef};
use datokit_core::{
    ConnectParameters, Ctx, DuplicateIdHandling, Field, FieldCtx, FieldType, Item, ItemFormCtx,
    KitError, Node, PageCtx,
};
use datokit_test_utils::fixtures::{
    article_form_ctx, article_model, articles, base_ctx, body_field, homepage_model, page_ctx,
    title_field, title_field_ctx, title_field_ctx_with_host,
};
use datokit_test_utils::{HostCall, MockSdk, RecordingHost, RecordingRenderer};

async fn connected(kit: &PluginKit) -> ConnectParameters {
    let sdk = MockSdk::new();
    kit.connect(&sdk).await.unwrap();
    sdk.parameters().await.unwrap()
}

fn kit(mode: DuplicateIdHandling) -> (PluginKit, Arc<RecordingRenderer>) {
    let renderer = Arc::new(RecordingRenderer::new());
    let kit = PluginKit::new(
        PluginOptions::default()
            .render(renderer.clone())
            .duplicate_id_handling(mode),
    )
    .unwrap();
    (kit, renderer)
}

#[tokio::test]
async fn duplicate_page_under_default_policy_renders_second_component() {
    let renderer = Arc::new(RecordingRenderer::new());
    let kit = PluginKit::new(PluginOptions::default().render(renderer.clone())).unwrap();
    kit.add_page(PageConfig::new("test-page", |_ctx: &PageCtx| Node::text("first")))
        .unwrap();
    kit.add_page(PageConfig::new("test-page", |_ctx: &PageCtx| Node::text("second")))
        .unwrap();

    let params = connected(&kit).await;
    (params.render_page.as_ref().unwrap())("test-page", page_ctx("test-page")).unwrap();

    assert_eq!(renderer.render_count(), 1);
    assert_eq!(renderer.last_markup().as_deref(), Some("second"));
}

#[tokio::test]
async fn throw_policy_keeps_first_registration() {
    let (kit, renderer) = kit(DuplicateIdHandling::Throw);
    kit.add_page(PageConfig::new("p", |_ctx: &PageCtx| Node::text("first")))
        .unwrap();
    let err = kit
        .add_page(PageConfig::new("p", |_ctx: &PageCtx| Node::text("second")))
        .unwrap_err();
    assert!(matches!(err, KitError::DuplicateId { ref id, .. } if id == "p"));

    let params = connected(&kit).await;
    (params.render_page.as_ref().unwrap())("p", page_ctx("p")).unwrap();
    assert_eq!(renderer.last_markup().as_deref(), Some("first"));
}

#[tokio::test]
async fn shared_dropdown_id_across_field_and_item_form() {
    let (kit, _) = kit(DuplicateIdHandling::Throw);
    let field_runs = Arc::new(AtomicUsize::new(0));
    let form_runs = Arc::new(AtomicUsize::new(0));

    let runs = field_runs.clone();
    kit.add_dropdown_action(DropdownActionConfig::Field(FieldDropdownActionConfig::new(
        "shared-id",
        "Field action",
        move |_ctx: FieldCtx| {
            let runs = Arc::clone(&runs);
            async move {
                runs.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        },
    )))
    .unwrap();
    let runs = form_runs.clone();
    kit.add_dropdown_action(DropdownActionConfig::ItemForm(
        ItemFormDropdownActionConfig::new("shared-id", "Form action", move |_ctx: ItemFormCtx| {
            let runs = Arc::clone(&runs);
            async move {
                runs.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }),
    ))
    .unwrap();

    let params = connected(&kit).await;
    (params.execute_field_dropdown_action.as_ref().unwrap())("shared-id", title_field_ctx())
        .await
        .unwrap();

    assert_eq!(field_runs.load(Ordering::SeqCst), 1);
    assert_eq!(form_runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn declarations_are_live_and_filtered_in_order() {
    let (kit, _) = kit(DuplicateIdHandling::Warn);
    let params = connected(&kit).await;

    kit.add_form_outlet(
        FormOutletConfig::new("article-only", |_ctx: &ItemFormCtx| Node::Empty)
            .initial_height(120)
            .should_apply(should_apply_to_item_types::<Ctx>(["article"])),
    )
    .unwrap();
    kit.add_form_outlet(FormOutletConfig::new("everywhere", |_ctx: &ItemFormCtx| Node::Empty))
        .unwrap();
    kit.add_sidebar_panel(SidebarPanelConfig::new(
        "seo",
        "SEO",
        |_ctx: &ItemFormCtx| Node::Empty,
    ))
    .unwrap();

    let outlets = params.item_form_outlets.as_ref().unwrap();
    let ids: Vec<String> = outlets(&article_model(), &base_ctx())
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, vec!["article-only", "everywhere"]);
    let ids: Vec<String> = outlets(&homepage_model(), &base_ctx())
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, vec!["everywhere"]);

    let panels = params.item_form_sidebar_panels.as_ref().unwrap();
    assert_eq!(panels(&article_model(), &article_form_ctx()).len(), 1);
}

#[tokio::test]
async fn navigation_tabs_are_returned_verbatim() {
    let (kit, _) = kit(DuplicateIdHandling::Warn);
    let tab = MainNavigationTab {
        label: "Analytics".into(),
        icon: "chart-line".into(),
        points_to: PageRef::new("analytics"),
        placement: None,
        rank: Some(1),
    };
    kit.add_main_navigation_tab(tab.clone()).unwrap();
    kit.add_main_navigation_tab(tab.clone()).unwrap();

    let params = connected(&kit).await;
    let tabs = (params.main_navigation_tabs.as_ref().unwrap())(&base_ctx());
    assert_eq!(tabs, vec![tab.clone(), tab]);
}

#[tokio::test]
async fn field_extension_overrides_and_hidden_fields() {
    let (kit, renderer) = kit(DuplicateIdHandling::Warn);
    kit.add_field_extension(FieldExtensionConfig::new(
        "star-rating",
        "Star rating",
        FieldExtensionType::Editor,
        FieldTypes::Only(vec![FieldType::Integer]),
        |_ctx: &FieldCtx| Node::text("stars"),
    ))
    .unwrap();
    kit.override_field_extension(
        FieldExtensionOverrideConfig::new(should_apply_to_field_types::<Ctx>([FieldType::Text]))
            .editor(FieldExtensionRef::new("never")),
    );
    kit.override_field_extension(
        FieldExtensionOverrideConfig::new(should_apply_to_field_types::<Ctx>([FieldType::String]))
            .editor(FieldExtensionRef::new("star-rating")),
    );
    kit.add_hidden_field(|field: &Field, _ctx: &Ctx| field.attributes.api_key == "body");

    let params = connected(&kit).await;
    let resolve = params.override_field_extensions.as_ref().unwrap();

    let title = resolve(&title_field(), &base_ctx()).unwrap();
    assert_eq!(title.editor.unwrap().id, "star-rating");
    assert_eq!(title.addons, None);

    let body = resolve(&body_field(), &base_ctx()).unwrap();
    assert_eq!(body.editor.unwrap().id, HIDDEN_FIELD_EXTENSION_ID);

    let host = Arc::new(RecordingHost::new());
    let render = params.render_field_extension.as_ref().unwrap();
    render(HIDDEN_FIELD_EXTENSION_ID, title_field_ctx_with_host(host.clone())).unwrap();
    assert_eq!(
        host.calls(),
        vec![HostCall::ToggleField {
            path: "title".into(),
            visible: false
        }]
    );

    render("star-rating", title_field_ctx()).unwrap();
    assert_eq!(renderer.last_markup().as_deref(), Some("stars"));
}

#[tokio::test]
async fn veto_chain_stops_at_first_refusal() {
    let (kit, _) = kit(DuplicateIdHandling::Warn);
    let calls = Arc::new(AtomicUsize::new(0));

    for answer in [true, false, true] {
        let calls = calls.clone();
        kit.on_before_items_destroy(move |_items: Vec<Item>, _ctx: Ctx| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(answer)
            }
        });
    }

    let params = connected(&kit).await;
    let destroy = params.on_before_items_destroy.as_ref().unwrap();
    assert!(!destroy(articles(), base_ctx()).await.unwrap());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
