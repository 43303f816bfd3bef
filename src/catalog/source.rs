// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The raw version catalog document, before validation

use crate::catalog::mirror::ImageMirror;
use crate::error::{Result, RkeError};
use crate::types::{KubernetesServicesOptions, RkeSystemImages, ToolsSystemImages};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

/// Catalog compiled into the binary
pub const EMBEDDED_CATALOG: &str = include_str!("../../data/k8s_versions.yaml");

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSource {
    /// Recommended versions, in the order they are offered
    pub current_versions: Vec<String>,
    #[serde(default)]
    pub bad_versions: BTreeSet<String>,
    /// Every version ever published
    pub versions: BTreeMap<String, RkeSystemImages>,
    /// Keyed by minor version prefix (`v1.10`)
    #[serde(default)]
    pub service_options: BTreeMap<String, KubernetesServicesOptions>,
    #[serde(default)]
    pub tools: ToolsSystemImages,
}

impl CatalogSource {
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_CATALOG)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| RkeError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Read the catalog from `path`, or the embedded one, and mirror every image
    pub fn load(path: Option<&Path>, mirror: &ImageMirror) -> Result<Self> {
        let mut source = match path {
            Some(path) => {
                info!("Loading version catalog from {}", path.display());
                Self::from_path(path)?
            }
            None => {
                debug!("Loading embedded version catalog");
                Self::embedded()?
            }
        };
        if let Some(registry) = mirror.registry() {
            info!("Prefixing catalog images with registry {}", registry);
        }
        source.mirror_images(mirror);
        Ok(source)
    }

    pub fn mirror_images(&mut self, mirror: &ImageMirror) {
        let mut rewrite = |image: &mut String| *image = mirror.mirror(image);

        for images in self.versions.values_mut() {
            images.for_each_image_mut(&mut rewrite);
        }
        self.tools.for_each_image_mut(&mut rewrite);
    }
}
