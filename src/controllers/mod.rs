// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

pub mod cluster_node;
pub mod pod_security_policy_template;
pub mod resource;

pub use cluster_node::ClusterNodeWatcher;
pub use pod_security_policy_template::PodSecurityPolicyTemplateWatcher;
pub use resource::{object_key, HandlerFuture, ResourceController};
