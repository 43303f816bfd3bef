// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes version offered when the user does not pick one
pub const DEFAULT_K8S_VERSION: &str = "v1.11.1-rancher1-1";

/// Controller tuning
pub mod controller {
    /// Seconds before an object whose handler failed is reconciled again
    pub const REQUEUE_AFTER_ERROR_SECS: u64 = 60;
    /// Workers per controller when CONTROLLER_THREADINESS is unset
    pub const DEFAULT_THREADINESS: u16 = 1;
}

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
