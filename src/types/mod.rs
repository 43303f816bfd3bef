// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resources and catalog records.

pub mod cluster_node;
pub mod images;
pub mod pod_security_policy_template;
pub mod service_options;

pub use cluster_node::{ClusterNode, ClusterNodeSpec, ClusterNodeStatus};
pub use images::{RkeSystemImages, ToolsSystemImages};
pub use pod_security_policy_template::{PodSecurityPolicyTemplate, PodSecurityPolicyTemplateSpec};
pub use service_options::{minor_version, KubernetesServicesOptions};
