// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::{info, warn};

use rke_defaults::catalog::{self, CatalogSource, ImageMirror, VersionCatalog};
use rke_defaults::config::Config;
use rke_defaults::controllers::{ClusterNodeWatcher, PodSecurityPolicyTemplateWatcher};
use rke_defaults::kubernetes::{wait_for_crd, ClusterNodeClient, PodSecurityPolicyTemplateClient};
use rke_defaults::types::{ClusterNode, PodSecurityPolicyTemplate};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting RKE defaults");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: default_k8s_version={}, watch_resources={}",
        config.default_k8s_version, config.watch_resources
    );

    // Load, validate and install the version catalog
    let mirror = ImageMirror::new(config.system_default_registry.clone());
    let source = CatalogSource::load(config.catalog_path.as_deref(), &mirror)?;
    let catalog = catalog::install(VersionCatalog::initialize(
        source,
        &config.default_k8s_version,
    )?)?;

    for version in catalog.current_versions() {
        let images = catalog
            .system_images(version)
            .map(|i| i.unique_images().len())
            .unwrap_or_default();
        info!(
            "Offering {} ({} images, service options: {})",
            version,
            images,
            catalog
                .service_options_for_version(version)
                .is_some_and(|options| !options.is_empty())
        );
    }

    if !config.watch_resources {
        info!("Resource watching disabled, exiting");
        return Ok(());
    }

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for Rancher CRDs to become available...");
    wait_for_crd::<ClusterNode>(&client).await?;
    wait_for_crd::<PodSecurityPolicyTemplate>(&client).await?;

    let nodes = ClusterNodeClient::all(client.clone());
    let templates = PodSecurityPolicyTemplateClient::all(client);

    let node_watcher = ClusterNodeWatcher::new(&nodes, catalog);
    let template_watcher = PodSecurityPolicyTemplateWatcher::new(&templates);

    info!("Starting controllers...");

    tokio::try_join!(
        node_watcher.run(config.controller_threadiness),
        template_watcher.run(config.controller_threadiness)
    )?;

    // Controllers only return when their watch streams end
    warn!("All controllers stopped unexpectedly");
    Ok(())
}
