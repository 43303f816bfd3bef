// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed object clients for custom resources

use crate::controllers::ResourceController;
use crate::error::{Result, RkeError};
use crate::types::{ClusterNode, PodSecurityPolicyTemplate};
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use kube::api::{DeleteParams, ListParams, ObjectList, PostParams, WatchEvent, WatchParams};
use kube::{Api, Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::{Arc, OnceLock};
use tracing::{debug, instrument};

/// A resource kind that can be served by an [`ObjectClient`] and its controller
pub trait WatchedResource:
    Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<K> WatchedResource for K where
    K: Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

pub type ClusterNodeClient = ObjectClient<ClusterNode>;
pub type PodSecurityPolicyTemplateClient = ObjectClient<PodSecurityPolicyTemplate>;

/// CRUD, list and watch access to one resource kind, plus its controller.
///
/// Every call goes straight to the API server; errors are returned unchanged.
pub struct ObjectClient<K: WatchedResource> {
    api: Api<K>,
    controller: OnceLock<Arc<ResourceController<K>>>,
}

impl<K: WatchedResource> ObjectClient<K> {
    pub fn new(api: Api<K>) -> Self {
        Self {
            api,
            controller: OnceLock::new(),
        }
    }

    /// Client over all objects of the kind, cluster-wide
    pub fn all(client: Client) -> Self {
        Self::new(Api::all(client))
    }

    #[instrument(skip(self, obj), fields(kind = %K::kind(&()), name = %obj.name_any()))]
    pub async fn create(&self, obj: &K) -> Result<K> {
        Ok(self.api.create(&PostParams::default(), obj).await?)
    }

    #[instrument(skip(self), fields(kind = %K::kind(&())))]
    pub async fn get(&self, name: &str) -> Result<K> {
        Ok(self.api.get(name).await?)
    }

    /// Replace the stored object with `obj`, addressed by its name
    #[instrument(skip(self, obj), fields(kind = %K::kind(&()), name = %obj.name_any()))]
    pub async fn update(&self, obj: &K) -> Result<K> {
        Ok(self
            .api
            .replace(&obj.name_any(), &PostParams::default(), obj)
            .await?)
    }

    #[instrument(skip(self, params), fields(kind = %K::kind(&())))]
    pub async fn delete(&self, name: &str, params: &DeleteParams) -> Result<()> {
        self.api.delete(name, params).await?;
        debug!("Deleted {} {}", K::kind(&()), name);
        Ok(())
    }

    #[instrument(skip(self, params), fields(kind = %K::kind(&())))]
    pub async fn list(&self, params: &ListParams) -> Result<ObjectList<K>> {
        Ok(self.api.list(params).await?)
    }

    /// Raw watch from `resource_version`; the stream ends when the server closes it
    pub async fn watch(
        &self,
        params: &WatchParams,
        resource_version: &str,
    ) -> Result<BoxStream<'_, Result<WatchEvent<K>>>> {
        let events = self.api.watch(params, resource_version).await?;
        Ok(events.map_err(RkeError::from).boxed())
    }

    #[instrument(skip(self, delete, list), fields(kind = %K::kind(&())))]
    pub async fn delete_collection(&self, delete: &DeleteParams, list: &ListParams) -> Result<()> {
        self.api.delete_collection(delete, list).await?;
        Ok(())
    }

    /// The controller for this kind, created on first use and shared afterwards
    pub fn controller(&self) -> Arc<ResourceController<K>> {
        self.controller
            .get_or_init(|| Arc::new(ResourceController::new(self.api.clone())))
            .clone()
    }
}
