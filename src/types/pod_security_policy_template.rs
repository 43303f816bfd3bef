// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// A reusable pod security policy that cluster owners assign to clusters and projects
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(
    group = "io.cattle.authorization",
    version = "v1",
    kind = "PodSecurityPolicyTemplate"
)]
#[serde(rename_all = "camelCase")]
pub struct PodSecurityPolicyTemplateSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_privilege_escalation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_network: Option<bool>,
    #[serde(default, rename = "hostPID", skip_serializing_if = "Option::is_none")]
    pub host_pid: Option<bool>,
    #[serde(default, rename = "hostIPC", skip_serializing_if = "Option::is_none")]
    pub host_ipc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_root_filesystem: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_capabilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_drop_capabilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
}

impl PodSecurityPolicyTemplate {
    pub fn allows_privileged(&self) -> bool {
        self.spec.privileged.unwrap_or(false)
    }

    /// True when any of the host network, PID or IPC namespaces may be shared
    pub fn allows_host_namespaces(&self) -> bool {
        [self.spec.host_network, self.spec.host_pid, self.spec.host_ipc]
            .into_iter()
            .any(|flag| flag.unwrap_or(false))
    }
}
