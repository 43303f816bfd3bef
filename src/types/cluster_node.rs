// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::service_options::minor_version;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "io.cattle.cluster", version = "v1", kind = "ClusterNode")]
#[kube(status = "ClusterNodeStatus")]
#[serde(rename_all = "camelCase")]
pub struct ClusterNodeSpec {
    /// Cluster this node belongs to
    pub cluster_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_cidr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unschedulable: Option<bool>,
}

impl ClusterNode {
    /// Check if this node is ready based on its status conditions
    pub fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .is_some_and(|conditions| {
                conditions
                    .iter()
                    .any(|c| c.condition_type == "Ready" && c.status == "True")
            })
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.spec.role.iter().any(|r| r == role)
    }

    /// Minor version (`v1.10`) of the kubelet reported in status
    pub fn kubelet_minor_version(&self) -> Option<String> {
        self.status
            .as_ref()
            .and_then(|s| s.kubelet_version.as_deref())
            .and_then(minor_version)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNodeStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubelet_version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub capacity: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub allocatable: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::api::ObjectMeta;
    use kube::Resource;

    fn make_node(name: &str, status: Option<ClusterNodeStatus>) -> ClusterNode {
        ClusterNode {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec: ClusterNodeSpec {
                cluster_name: "c-12345".to_string(),
                role: vec!["etcd".to_string(), "controlplane".to_string()],
                ..Default::default()
            },
            status,
        }
    }

    fn make_condition(condition_type: &str, status: &str) -> Condition {
        Condition {
            condition_type: condition_type.to_string(),
            status: status.to_string(),
            message: None,
        }
    }

    fn status_with(conditions: Option<Vec<Condition>>) -> Option<ClusterNodeStatus> {
        Some(ClusterNodeStatus {
            conditions,
            ..Default::default()
        })
    }

    #[test]
    fn test_resource_metadata() {
        assert_eq!(ClusterNode::group(&()), "io.cattle.cluster");
        assert_eq!(ClusterNode::version(&()), "v1");
        assert_eq!(ClusterNode::kind(&()), "ClusterNode");
        assert_eq!(ClusterNode::plural(&()), "clusternodes");
    }

    #[test]
    fn test_is_ready_with_ready_condition() {
        let node = make_node("node-1", status_with(Some(vec![make_condition("Ready", "True")])));
        assert!(node.is_ready());
    }

    #[test]
    fn test_is_ready_with_not_ready_condition() {
        let node = make_node("node-1", status_with(Some(vec![make_condition("Ready", "False")])));
        assert!(!node.is_ready());
    }

    #[test]
    fn test_is_ready_with_multiple_conditions() {
        let node = make_node(
            "node-1",
            status_with(Some(vec![
                make_condition("Registered", "True"),
                make_condition("Ready", "True"),
            ])),
        );
        assert!(node.is_ready());
    }

    #[test]
    fn test_is_ready_with_no_status() {
        let node = make_node("node-1", None);
        assert!(!node.is_ready());
    }

    #[test]
    fn test_has_role() {
        let node = make_node("node-1", None);

        assert!(node.has_role("etcd"));
        assert!(node.has_role("controlplane"));
        assert!(!node.has_role("worker"));
    }

    #[test]
    fn test_kubelet_minor_version() {
        let node = make_node(
            "node-1",
            Some(ClusterNodeStatus {
                kubelet_version: Some("v1.10.5".to_string()),
                ..Default::default()
            }),
        );

        assert_eq!(node.kubelet_minor_version().as_deref(), Some("v1.10"));
    }

    #[test]
    fn test_kubelet_minor_version_without_status() {
        let node = make_node("node-1", None);
        assert_eq!(node.kubelet_minor_version(), None);
    }

    #[test]
    fn test_deserialize_from_api_json() {
        let node: ClusterNode = serde_json::from_value(serde_json::json!({
            "apiVersion": "io.cattle.cluster/v1",
            "kind": "ClusterNode",
            "metadata": { "name": "node-1" },
            "spec": { "clusterName": "c-12345", "role": ["worker"] },
            "status": {
                "nodeName": "ip-10-0-0-1",
                "kubeletVersion": "v1.11.1",
                "capacity": { "cpu": "4" },
                "conditions": [{ "type": "Ready", "status": "True" }]
            }
        }))
        .unwrap();

        assert_eq!(node.spec.cluster_name, "c-12345");
        assert!(node.has_role("worker"));
        assert!(node.is_ready());
        assert_eq!(
            node.status.as_ref().and_then(|s| s.capacity.get("cpu")).map(String::as_str),
            Some("4")
        );
    }
}
