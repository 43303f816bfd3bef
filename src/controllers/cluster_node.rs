// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster node watcher - checks node kubelet versions against the catalog.

use crate::catalog::VersionCatalog;
use crate::controllers::ResourceController;
use crate::error::Result;
use crate::kubernetes::ClusterNodeClient;
use crate::types::ClusterNode;
use kube::ResourceExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const HANDLER_NAME: &str = "cluster-node-version-check";

pub struct ClusterNodeWatcher {
    controller: Arc<ResourceController<ClusterNode>>,
    catalog: &'static VersionCatalog,
}

impl ClusterNodeWatcher {
    pub fn new(nodes: &ClusterNodeClient, catalog: &'static VersionCatalog) -> Self {
        Self {
            controller: nodes.controller(),
            catalog,
        }
    }

    pub async fn run(self, threadiness: u16) -> anyhow::Result<()> {
        let catalog = self.catalog;
        self.controller
            .add_handler(HANDLER_NAME, move |key, node| async move {
                check_node(catalog, &key, node.as_deref())
            })
            .await;

        self.controller.start(threadiness).await?;
        Ok(())
    }
}

fn check_node(catalog: &VersionCatalog, key: &str, node: Option<&ClusterNode>) -> Result<()> {
    let Some(node) = node else {
        info!("Cluster node {} removed", key);
        return Ok(());
    };

    debug!(
        "Cluster node {} in cluster {}: ready={}, controlplane={}, etcd={}, worker={}",
        key,
        node.spec.cluster_name,
        node.is_ready(),
        node.has_role("controlplane"),
        node.has_role("etcd"),
        node.has_role("worker")
    );

    if let Some(message) = version_warning(catalog, node) {
        warn!("Cluster node {}: {}", node.name_any(), message);
    } else if let Some(minor) = node.kubelet_minor_version() {
        info!("Cluster node {} runs supported minor version {}", key, minor);
    }

    Ok(())
}

/// A warning when the node's kubelet minor version has no current catalog version
fn version_warning(catalog: &VersionCatalog, node: &ClusterNode) -> Option<String> {
    let minor = node.kubelet_minor_version()?;
    if catalog.current_versions_for_minor(&minor).next().is_some() {
        return None;
    }

    Some(format!(
        "kubelet minor version {} has no current Kubernetes version, default is {}",
        minor,
        catalog.default_version()
    ))
}
