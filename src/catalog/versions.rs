// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Validated view of the catalog restricted to the current versions

use crate::catalog::mirror::image_tag;
use crate::catalog::source::CatalogSource;
use crate::error::{Result, RkeError};
use crate::types::{minor_version, KubernetesServicesOptions, RkeSystemImages, ToolsSystemImages};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// The validated version catalog.
///
/// Built once at startup by [`VersionCatalog::initialize`] and never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct VersionCatalog {
    default_version: String,
    default_images: RkeSystemImages,
    current_versions: Vec<String>,
    current: BTreeMap<String, RkeSystemImages>,
    all: BTreeMap<String, RkeSystemImages>,
    bad_versions: BTreeSet<String>,
    service_options: BTreeMap<String, KubernetesServicesOptions>,
    tools: ToolsSystemImages,
}

impl VersionCatalog {
    /// Validate the catalog and derive the table of current versions.
    ///
    /// Fails when a non-bad version's Kubernetes image tag does not prefix
    /// the version, when a current version is missing from the catalog, or
    /// when `default_version` is not among the derived versions.
    pub fn initialize(source: CatalogSource, default_version: &str) -> Result<Self> {
        let CatalogSource {
            current_versions,
            bad_versions,
            versions,
            service_options,
            tools,
        } = source;

        for (version, images) in &versions {
            if bad_versions.contains(version) {
                debug!("Skipping image check for bad version {}", version);
                continue;
            }
            check_kubernetes_image(version, &images.kubernetes)?;
        }

        let mut current = BTreeMap::new();
        let mut offered = Vec::with_capacity(current_versions.len());
        for version in current_versions {
            let Some(images) = versions.get(&version) else {
                return Err(RkeError::UnknownCurrentVersion(version));
            };
            if current.contains_key(&version) {
                warn!("Current version {} is listed more than once", version);
                continue;
            }
            if bad_versions.contains(&version) {
                warn!("Current version {} is flagged bad, not offering it", version);
                continue;
            }
            current.insert(version.clone(), images.clone());
            offered.push(version);
        }

        let Some(default_images) = current.get(default_version).cloned() else {
            return Err(RkeError::DefaultVersionNotCurrent(
                default_version.to_string(),
            ));
        };

        info!(
            "Version catalog initialized: {} versions known, {} current, default {}",
            versions.len(),
            current.len(),
            default_version
        );

        Ok(Self {
            default_version: default_version.to_string(),
            default_images,
            current_versions: offered,
            current,
            all: versions,
            bad_versions,
            service_options,
            tools,
        })
    }

    pub fn default_version(&self) -> &str {
        &self.default_version
    }

    pub fn default_system_images(&self) -> &RkeSystemImages {
        &self.default_images
    }

    /// Images for a current version; `None` for unknown, outdated or bad versions
    pub fn system_images(&self, version: &str) -> Option<&RkeSystemImages> {
        self.current.get(version)
    }

    /// Current versions in the order they are offered
    pub fn current_versions(&self) -> impl Iterator<Item = &str> {
        self.current_versions.iter().map(String::as_str)
    }

    pub fn current_table(&self) -> &BTreeMap<String, RkeSystemImages> {
        &self.current
    }

    /// Current versions belonging to a minor version prefix such as `v1.10`
    pub fn current_versions_for_minor<'a>(
        &'a self,
        minor: &'a str,
    ) -> impl Iterator<Item = &'a str> {
        self.current_versions()
            .filter(move |version| minor_version(version).as_deref() == Some(minor))
    }

    /// The whole catalog, including outdated and bad versions
    pub fn all_versions(&self) -> &BTreeMap<String, RkeSystemImages> {
        &self.all
    }

    pub fn is_bad(&self, version: &str) -> bool {
        self.bad_versions.contains(version)
    }

    /// Service options for a minor version prefix such as `v1.9`
    pub fn service_options(&self, minor: &str) -> Option<&KubernetesServicesOptions> {
        self.service_options.get(minor)
    }

    /// Service options for the minor version of a full version string
    pub fn service_options_for_version(&self, version: &str) -> Option<&KubernetesServicesOptions> {
        minor_version(version).and_then(|minor| self.service_options.get(&minor))
    }

    pub fn tools(&self) -> &ToolsSystemImages {
        &self.tools
    }
}

/// The Kubernetes image must be tagged with a prefix of its version key:
/// `rancher/hyperkube:v1.9.7-rancher2` serves `v1.9.7-rancher2-2`.
///
/// This is a loose check; `v1.1` would pass for `v1.11.0`.
fn check_kubernetes_image(version: &str, image: &str) -> Result<()> {
    match image_tag(image) {
        Some(tag) if version.starts_with(tag) => Ok(()),
        _ => Err(RkeError::ImageTagMismatch {
            version: version.to_string(),
            image: image.to_string(),
        }),
    }
}
