// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes version catalog: loading, mirroring and startup validation.

pub mod mirror;
pub mod source;
pub mod versions;

pub use mirror::ImageMirror;
pub use source::CatalogSource;
pub use versions::VersionCatalog;

use crate::error::{Result, RkeError};
use std::sync::OnceLock;

static CATALOG: OnceLock<VersionCatalog> = OnceLock::new();

/// Make `catalog` the process-wide catalog.
///
/// Only the first call succeeds; the installed catalog is never replaced.
pub fn install(catalog: VersionCatalog) -> Result<&'static VersionCatalog> {
    CATALOG
        .set(catalog)
        .map_err(|_| RkeError::CatalogAlreadyInitialized)?;
    CATALOG.get().ok_or(RkeError::CatalogAlreadyInitialized)
}

/// The process-wide catalog, once installed
pub fn installed() -> Option<&'static VersionCatalog> {
    CATALOG.get()
}
