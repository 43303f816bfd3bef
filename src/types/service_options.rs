// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extra flags injected into the kube-apiserver and kubelet of one minor version
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct KubernetesServicesOptions {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub kube_api: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub kubelet: BTreeMap<String, String>,
}

impl KubernetesServicesOptions {
    pub fn is_empty(&self) -> bool {
        self.kube_api.is_empty() && self.kubelet.is_empty()
    }
}

/// Extract the `v<major>.<minor>` prefix from a Kubernetes version string.
///
/// `v1.10.5-rancher1-2` yields `v1.10`; the leading `v` is optional on input.
pub fn minor_version(version: &str) -> Option<String> {
    let trimmed = version.strip_prefix('v').unwrap_or(version);
    let mut parts = trimmed.splitn(3, '.');
    let major = parts.next()?;
    let minor = parts.next()?;
    // "1.10-rc1" has no patch part; cut the suffix off the minor
    let minor = minor
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();

    if major.is_empty()
        || minor.is_empty()
        || !major.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    Some(format!("v{}.{}", major, minor))
}
