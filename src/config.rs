// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{controller::DEFAULT_THREADINESS, DEFAULT_K8S_VERSION};
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Kubernetes version offered by default; must be one of the current versions
    pub default_k8s_version: String,
    /// Catalog file replacing the embedded one
    pub catalog_path: Option<PathBuf>,
    /// Private registry prepended to every catalog image
    pub system_default_registry: Option<String>,
    /// Run the ClusterNode and PodSecurityPolicyTemplate controllers after startup
    pub watch_resources: bool,
    pub controller_threadiness: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_k8s_version = lookup("DEFAULT_K8S_VERSION")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_K8S_VERSION.to_string());

        let catalog_path = lookup("CATALOG_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let system_default_registry = lookup("SYSTEM_DEFAULT_REGISTRY")
            .map(|r| r.trim_end_matches('/').to_string())
            .filter(|r| !r.is_empty());

        let watch_resources = match lookup("WATCH_RESOURCES") {
            Some(v) => v
                .parse()
                .with_context(|| format!("WATCH_RESOURCES must be true or false, got {}", v))?,
            None => false,
        };

        let controller_threadiness = match lookup("CONTROLLER_THREADINESS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("CONTROLLER_THREADINESS must be a number, got {}", v))?,
            None => DEFAULT_THREADINESS,
        };
        if controller_threadiness == 0 {
            bail!("CONTROLLER_THREADINESS must be at least 1");
        }

        Ok(Config {
            default_k8s_version,
            catalog_path,
            system_default_registry,
            watch_resources,
            controller_threadiness,
        })
    }
}
