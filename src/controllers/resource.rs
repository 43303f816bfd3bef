// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Handler-based controller over [`kube::runtime::Controller`].
//!
//! Handlers are registered by name and run in registration order for every
//! object the controller reconciles. Keys can also be queued explicitly with
//! [`ResourceController::enqueue`]. A key whose object is not in the
//! [`Store`], because it was deleted or never existed, reaches the handlers
//! with `None` in place of the object.

use crate::constants::controller::REQUEUE_AFTER_ERROR_SECS;
use crate::error::{Result, RkeError};
use crate::kubernetes::WatchedResource;
use futures::channel::mpsc::{self, UnboundedSender};
use futures::future::BoxFuture;
use futures::{StreamExt, TryStreamExt};
use kube::runtime::controller::{Action, Config as ControllerConfig, Error as ControllerRunError};
use kube::runtime::reflector::{self, ObjectRef, Store};
use kube::runtime::{Controller, WatchStreamExt};
use kube::{Api, ResourceExt};
use kube_runtime::watcher::{self, Config as WatcherConfig};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

pub type HandlerFuture = BoxFuture<'static, Result<()>>;
type HandlerFn<K> = Arc<dyn Fn(String, Option<Arc<K>>) -> HandlerFuture + Send + Sync>;

struct Handlers<K> {
    controller_name: String,
    entries: RwLock<Vec<(String, HandlerFn<K>)>>,
}

pub struct ResourceController<K: WatchedResource> {
    name: String,
    store: Store<K>,
    queue: UnboundedSender<ObjectRef<K>>,
    pending: Mutex<Option<Controller<K>>>,
    handlers: Arc<Handlers<K>>,
}

impl<K: WatchedResource> ResourceController<K> {
    pub fn new(api: Api<K>) -> Self {
        let name = format!("{}Controller", K::kind(&()));
        let (queue, requests) = mpsc::unbounded();
        let (store, writer) = reflector::store();

        // Deleted objects are already gone from the store when the event is
        // seen, so queueing their key makes the handlers see `None`.
        let deleted = queue.clone();
        let objects = reflector::reflector(
            writer,
            watcher::watcher(api, WatcherConfig::default()).default_backoff(),
        )
        .inspect_ok(move |event| {
            if let watcher::Event::Delete(obj) = event {
                if deleted.unbounded_send(ObjectRef::from_obj(obj)).is_err() {
                    debug!("Controller gone, dropping delete of {}", obj.name_any());
                }
            }
        })
        .applied_objects();

        let controller = Controller::for_stream(objects, store.clone()).reconcile_on(requests);

        Self {
            handlers: Arc::new(Handlers {
                controller_name: name.clone(),
                entries: RwLock::new(Vec::new()),
            }),
            name,
            store,
            queue,
            pending: Mutex::new(Some(controller)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The informer cache; empty until the controller is started
    pub fn store(&self) -> Store<K> {
        self.store.clone()
    }

    /// Register a handler called with the object key (`name` or
    /// `namespace/name`) and the object, or `None` when the object no longer
    /// exists. Handlers may be added after start.
    pub async fn add_handler<F, Fut>(&self, name: &str, handler: F)
    where
        F: Fn(String, Option<Arc<K>>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let func: HandlerFn<K> =
            Arc::new(move |key: String, obj: Option<Arc<K>>| -> HandlerFuture {
                Box::pin(handler(key, obj))
            });
        self.handlers
            .entries
            .write()
            .await
            .push((name.to_string(), func));
        debug!("{}: registered handler {}", self.name, name);
    }

    pub async fn handler_names(&self) -> Vec<String> {
        self.handlers
            .entries
            .read()
            .await
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Queue a reconcile of one object, whether or not it changed
    pub fn enqueue(&self, namespace: Option<&str>, name: &str) -> Result<()> {
        let mut obj_ref = ObjectRef::new(name);
        if let Some(namespace) = namespace {
            obj_ref = obj_ref.within(namespace);
        }
        self.queue.unbounded_send(obj_ref).map_err(|e| {
            RkeError::ControllerError(format!("{}: failed to enqueue {}: {}", self.name, name, e))
        })
    }

    /// Run the controller with `threadiness` concurrent reconciles until the
    /// watch stream ends. A controller can only be started once.
    pub async fn start(&self, threadiness: u16) -> Result<()> {
        let Some(controller) = self.pending.lock().await.take() else {
            return Err(RkeError::ControllerError(format!(
                "{} is already started",
                self.name
            )));
        };

        info!(
            "Starting {} with {} workers, handlers: {:?}",
            self.name,
            threadiness,
            self.handler_names().await
        );

        let handlers = self.handlers.clone();
        controller
            .with_config(ControllerConfig::default().concurrency(threadiness))
            .run(reconcile, error_policy, self.handlers.clone())
            .for_each(move |res| {
                let handlers = handlers.clone();
                async move {
                    match res {
                        Ok(o) => debug!("Reconciled: {:?}", o),
                        Err(ControllerRunError::ObjectNotFound(obj_ref)) => {
                            let key = match obj_ref.namespace {
                                Some(namespace) => format!("{}/{}", namespace, obj_ref.name),
                                None => obj_ref.name,
                            };
                            if let Err(e) = run_handlers(&handlers, key, None).await {
                                error!("{}: {}", handlers.controller_name, e);
                            }
                        }
                        Err(e) => warn!("Reconciliation error: {:?}", e),
                    }
                }
            })
            .await;

        info!("{} stopped", self.name);
        Ok(())
    }
}

/// Cache key of an object: `namespace/name`, or `name` when cluster-scoped
pub fn object_key<K: ResourceExt>(obj: &K) -> String {
    match obj.namespace() {
        Some(namespace) => format!("{}/{}", namespace, obj.name_any()),
        None => obj.name_any(),
    }
}

async fn run_handlers<K>(handlers: &Handlers<K>, key: String, obj: Option<Arc<K>>) -> Result<()> {
    let entries: Vec<(String, HandlerFn<K>)> = handlers.entries.read().await.clone();

    debug!(
        "{}: running {} handlers for {} (present: {})",
        handlers.controller_name,
        entries.len(),
        key,
        obj.is_some()
    );

    for (name, handler) in entries {
        handler(key.clone(), obj.clone())
            .await
            .map_err(|e| RkeError::HandlerError {
                handler: name,
                key: key.clone(),
                message: e.to_string(),
            })?;
    }

    Ok(())
}

async fn reconcile<K: WatchedResource>(obj: Arc<K>, handlers: Arc<Handlers<K>>) -> Result<Action> {
    let key = object_key(obj.as_ref());
    run_handlers(&handlers, key, Some(obj)).await?;
    Ok(Action::await_change())
}

fn error_policy<K: WatchedResource>(
    _obj: Arc<K>,
    error: &RkeError,
    handlers: Arc<Handlers<K>>,
) -> Action {
    error!("{}: {}", handlers.controller_name, error);
    Action::requeue(Duration::from_secs(REQUEUE_AFTER_ERROR_SECS))
}
