// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RkeError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to parse version catalog: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    #[error("Failed to read version catalog {}: {source}", path.display())]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Version catalog is already initialized")]
    CatalogAlreadyInitialized,

    #[error("For K8s version {version}, the Kubernetes image tag should be a prefix of {version}, currently it is {image}")]
    ImageTagMismatch { version: String, image: String },

    #[error("K8s version {0} is listed as current but not found in the version catalog")]
    UnknownCurrentVersion(String),

    #[error("Default K8s version {0} is not found in the current versions")]
    DefaultVersionNotCurrent(String),

    #[error("Controller error: {0}")]
    ControllerError(String),

    #[error("Handler {handler} failed for {key}: {message}")]
    HandlerError {
        handler: String,
        key: String,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, RkeError>;
