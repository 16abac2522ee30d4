// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle events: boot notification and the before-save/destroy/publish
//! veto hooks.
//!
//! Veto handlers run one after another in registration order. The first
//! handler answering `false` stops the chain and vetoes the operation; a
//! handler error stops the chain and is returned to the host.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};

use datokit_core::context::OnBootCtx;
use datokit_core::params::{BootHook, VetoHook};
use datokit_core::{ConnectParameters, Ctx, Item, KitError};

use crate::registry::AppendList;

/// A registered veto handler.
pub type VetoHandler<P> =
    Arc<dyn Fn(P, Ctx) -> BoxFuture<'static, Result<bool, KitError>> + Send + Sync>;

/// A registered boot handler.
pub type BootHandler = Arc<dyn Fn(OnBootCtx) -> BoxFuture<'static, Result<(), KitError>> + Send + Sync>;

fn veto_handler<P, F, Fut>(f: F) -> VetoHandler<P>
where
    P: 'static,
    F: Fn(P, Ctx) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool, KitError>> + Send + 'static,
{
    Arc::new(move |payload: P, ctx: Ctx| f(payload, ctx).boxed())
}

/// Runs every handler in order until one vetoes or fails.
async fn run_vetoes<P: Clone>(
    event: &'static str,
    handlers: Vec<VetoHandler<P>>,
    payload: P,
    ctx: Ctx,
) -> Result<bool, KitError> {
    for (index, handler) in handlers.iter().enumerate() {
        if !handler(payload.clone(), ctx.clone()).await? {
            tracing::debug!(event, handler = index, "operation vetoed");
            return Ok(false);
        }
    }
    Ok(true)
}

fn veto_hook<P>(event: &'static str, handlers: AppendList<VetoHandler<P>>) -> VetoHook<P>
where
    P: Clone + Send + 'static,
{
    Arc::new(
        move |payload: P, ctx: Ctx| -> BoxFuture<'static, Result<bool, KitError>> {
            run_vetoes(event, handlers.snapshot(), payload, ctx).boxed()
        },
    )
}

pub struct EventRegistry {
    boot: AppendList<BootHandler>,
    item_upsert: AppendList<VetoHandler<serde_json::Value>>,
    items_destroy: AppendList<VetoHandler<Vec<Item>>>,
    items_publish: AppendList<VetoHandler<Vec<Item>>>,
    items_unpublish: AppendList<VetoHandler<Vec<Item>>>,
}

impl EventRegistry {
    pub fn new(params: &mut ConnectParameters) -> Self {
        let boot: AppendList<BootHandler> = AppendList::new();
        let item_upsert = AppendList::new();
        let items_destroy = AppendList::new();
        let items_publish = AppendList::new();
        let items_unpublish = AppendList::new();

        let live = boot.clone();
        let on_boot: BootHook = Arc::new(
            move |ctx: OnBootCtx| -> BoxFuture<'static, Result<(), KitError>> {
                let handlers = live.snapshot();
                async move {
                    let results =
                        join_all(handlers.iter().map(|handler| handler(ctx.clone()))).await;
                    results.into_iter().collect::<Result<Vec<()>, KitError>>()?;
                    Ok(())
                }
                .boxed()
            },
        );
        params.on_boot = Some(on_boot);

        params.on_before_item_upsert =
            Some(veto_hook("on_before_item_upsert", item_upsert.clone()));
        params.on_before_items_destroy =
            Some(veto_hook("on_before_items_destroy", items_destroy.clone()));
        params.on_before_items_publish =
            Some(veto_hook("on_before_items_publish", items_publish.clone()));
        params.on_before_items_unpublish =
            Some(veto_hook("on_before_items_unpublish", items_unpublish.clone()));

        Self {
            boot,
            item_upsert,
            items_destroy,
            items_publish,
            items_unpublish,
        }
    }

    pub fn on_boot<F, Fut>(&self, f: F)
    where
        F: Fn(OnBootCtx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), KitError>> + Send + 'static,
    {
        self.boot
            .push(Arc::new(move |ctx: OnBootCtx| f(ctx).boxed()));
    }

    /// `payload` is the create/update body about to be sent.
    pub fn on_before_item_upsert<F, Fut>(&self, f: F)
    where
        F: Fn(serde_json::Value, Ctx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, KitError>> + Send + 'static,
    {
        self.item_upsert.push(veto_handler(f));
    }

    pub fn on_before_items_destroy<F, Fut>(&self, f: F)
    where
        F: Fn(Vec<Item>, Ctx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, KitError>> + Send + 'static,
    {
        self.items_destroy.push(veto_handler(f));
    }

    pub fn on_before_items_publish<F, Fut>(&self, f: F)
    where
        F: Fn(Vec<Item>, Ctx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, KitError>> + Send + 'static,
    {
        self.items_publish.push(veto_handler(f));
    }

    pub fn on_before_items_unpublish<F, Fut>(&self, f: F)
    where
        F: Fn(Vec<Item>, Ctx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, KitError>> + Send + 'static,
    {
        self.items_unpublish.push(veto_handler(f));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use datokit_test_utils::fixtures::{articles, base_ctx};

    fn setup() -> (EventRegistry, ConnectParameters) {
        let mut params = ConnectParameters::default();
        let registry = EventRegistry::new(&mut params);
        (registry, params)
    }

    fn recording_veto(
        log: &Arc<Mutex<Vec<&'static str>>>,
        name: &'static str,
        answer: bool,
    ) -> impl Fn(Vec<Item>, Ctx) -> BoxFuture<'static, Result<bool, KitError>> + Send + Sync + 'static
    {
        let log = Arc::clone(log);
        move |_items: Vec<Item>, _ctx: Ctx| {
            log.lock().unwrap().push(name);
            futures::future::ready(Ok(answer)).boxed()
        }
    }

    #[tokio::test]
    async fn no_handlers_means_proceed() {
        let (_registry, params) = setup();
        let hook = params.on_before_items_destroy.as_ref().unwrap();
        assert!(hook(articles(), base_ctx()).await.unwrap());
    }

    #[tokio::test]
    async fn first_false_short_circuits() {
        let (registry, params) = setup();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.on_before_items_publish(recording_veto(&log, "h1", true));
        registry.on_before_items_publish(recording_veto(&log, "h2", false));
        registry.on_before_items_publish(recording_veto(&log, "h3", true));

        let hook = params.on_before_items_publish.as_ref().unwrap();
        assert!(!hook(articles(), base_ctx()).await.unwrap());
        assert_eq!(*log.lock().unwrap(), vec!["h1", "h2"]);
    }

    #[tokio::test]
    async fn all_true_proceeds() {
        let (registry, params) = setup();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.on_before_items_unpublish(recording_veto(&log, "a", true));
        registry.on_before_items_unpublish(recording_veto(&log, "b", true));

        let hook = params.on_before_items_unpublish.as_ref().unwrap();
        assert!(hook(articles(), base_ctx()).await.unwrap());
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn handler_error_propagates_and_stops_chain() {
        let (registry, params) = setup();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.on_before_items_destroy(|_items: Vec<Item>, _ctx: Ctx| async {
            Err(KitError::handler("storage offline"))
        });
        registry.on_before_items_destroy(recording_veto(&log, "after", true));

        let hook = params.on_before_items_destroy.as_ref().unwrap();
        let err = hook(articles(), base_ctx()).await.unwrap_err();
        assert_eq!(err.to_string(), "handler error: storage offline");
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_handlers_see_payload() {
        let (registry, params) = setup();
        registry.on_before_item_upsert(|payload: serde_json::Value, _ctx: Ctx| async move {
            Ok(payload["title"] != "forbidden")
        });

        let hook = params.on_before_item_upsert.as_ref().unwrap();
        assert!(hook(serde_json::json!({"title": "fine"}), base_ctx()).await.unwrap());
        assert!(!hook(serde_json::json!({"title": "forbidden"}), base_ctx()).await.unwrap());
    }

    #[tokio::test]
    async fn hook_sees_handlers_registered_after_capture() {
        let (registry, params) = setup();
        let hook = params.on_before_items_publish.clone().unwrap();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.on_before_items_publish(recording_veto(&log, "late", false));
        assert!(!hook(articles(), base_ctx()).await.unwrap());
    }

    #[tokio::test]
    async fn boot_runs_every_handler_and_reports_first_error() {
        let (registry, params) = setup();
        let ran = Arc::new(Mutex::new(Vec::new()));

        let log = ran.clone();
        registry.on_boot(move |_ctx: Ctx| {
            let log = Arc::clone(&log);
            async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                log.lock().unwrap().push("slow");
                Err(KitError::handler("first"))
            }
        });
        let log = ran.clone();
        registry.on_boot(move |_ctx: Ctx| {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push("fast");
                Err(KitError::handler("second"))
            }
        });
        let log = ran.clone();
        registry.on_boot(move |_ctx: Ctx| {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push("ok");
                Ok(())
            }
        });

        let boot = params.on_boot.as_ref().unwrap();
        let err = boot(base_ctx()).await.unwrap_err();
        assert_eq!(err.to_string(), "handler error: first");

        let mut ran = ran.lock().unwrap().clone();
        ran.sort_unstable();
        assert_eq!(ran, vec!["fast", "ok", "slow"]);
    }

    #[tokio::test]
    async fn boot_without_handlers_succeeds() {
        let (_registry, params) = setup();
        (params.on_boot.as_ref().unwrap())(base_ctx()).await.unwrap();
    }
}
