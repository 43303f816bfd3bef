// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Image bundles deployed for a Kubernetes version and for the bundled tools.

use serde::{Deserialize, Serialize};

/// Images needed to deploy one Kubernetes version.
///
/// Components introduced after a version was cataloged are left empty for
/// that version (`metrics_server` before v1.9.7-rancher2-2, for instance).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RkeSystemImages {
    pub etcd: String,
    pub alpine: String,
    pub nginx_proxy: String,
    pub cert_downloader: String,
    pub kubernetes_services_sidecar: String,
    pub kube_dns: String,
    pub dnsmasq: String,
    pub kube_dns_sidecar: String,
    pub kube_dns_autoscaler: String,
    /// The hyperkube image; its tag encodes the Kubernetes version
    pub kubernetes: String,
    pub flannel: String,
    pub flannel_cni: String,
    pub calico_node: String,
    pub calico_cni: String,
    pub calico_ctl: String,
    pub canal_node: String,
    pub canal_cni: String,
    pub canal_flannel: String,
    pub weave_node: String,
    pub weave_cni: String,
    pub pod_infra_container: String,
    pub ingress: String,
    pub ingress_backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_server: Option<String>,
}

impl RkeSystemImages {
    /// All image references set for this version, in field order
    pub fn images(&self) -> Vec<&str> {
        let mut images: Vec<&str> = vec![
            self.etcd.as_str(),
            self.alpine.as_str(),
            self.nginx_proxy.as_str(),
            self.cert_downloader.as_str(),
            self.kubernetes_services_sidecar.as_str(),
            self.kube_dns.as_str(),
            self.dnsmasq.as_str(),
            self.kube_dns_sidecar.as_str(),
            self.kube_dns_autoscaler.as_str(),
            self.kubernetes.as_str(),
            self.flannel.as_str(),
            self.flannel_cni.as_str(),
            self.calico_node.as_str(),
            self.calico_cni.as_str(),
            self.calico_ctl.as_str(),
            self.canal_node.as_str(),
            self.canal_cni.as_str(),
            self.canal_flannel.as_str(),
            self.weave_node.as_str(),
            self.weave_cni.as_str(),
            self.pod_infra_container.as_str(),
            self.ingress.as_str(),
            self.ingress_backend.as_str(),
        ];
        if let Some(metrics_server) = &self.metrics_server {
            images.push(metrics_server);
        }
        images.retain(|image| !image.is_empty());
        images
    }

    /// Unique image references, sorted; the list to pre-pull for this version
    pub fn unique_images(&self) -> Vec<&str> {
        let mut images = self.images();
        images.sort_unstable();
        images.dedup();
        images
    }

    pub(crate) fn for_each_image_mut(&mut self, mut f: impl FnMut(&mut String)) {
        for image in [
            &mut self.etcd,
            &mut self.alpine,
            &mut self.nginx_proxy,
            &mut self.cert_downloader,
            &mut self.kubernetes_services_sidecar,
            &mut self.kube_dns,
            &mut self.dnsmasq,
            &mut self.kube_dns_sidecar,
            &mut self.kube_dns_autoscaler,
            &mut self.kubernetes,
            &mut self.flannel,
            &mut self.flannel_cni,
            &mut self.calico_node,
            &mut self.calico_cni,
            &mut self.calico_ctl,
            &mut self.canal_node,
            &mut self.canal_cni,
            &mut self.canal_flannel,
            &mut self.weave_node,
            &mut self.weave_cni,
            &mut self.pod_infra_container,
            &mut self.ingress,
            &mut self.ingress_backend,
        ] {
            if !image.is_empty() {
                f(image);
            }
        }
        if let Some(metrics_server) = self.metrics_server.as_mut() {
            f(metrics_server);
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertSystemImages {
    pub alert_manager: String,
    pub alert_manager_helper: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineSystemImages {
    pub jenkins: String,
    pub jenkins_jnlp: String,
    pub alpine_git: String,
    pub plugins_docker: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSystemImages {
    pub fluentd: String,
    pub fluentd_helper: String,
    pub log_aggregator_flex_volume_driver: String,
    pub elasticsearch: String,
    pub kibana: String,
    pub busybox: String,
}

/// Default images for alerting, pipelines and logging
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ToolsSystemImages {
    pub alert: AlertSystemImages,
    pub pipeline: PipelineSystemImages,
    pub logging: LoggingSystemImages,
}

impl ToolsSystemImages {
    pub(crate) fn for_each_image_mut(&mut self, mut f: impl FnMut(&mut String)) {
        for image in [
            &mut self.alert.alert_manager,
            &mut self.alert.alert_manager_helper,
            &mut self.pipeline.jenkins,
            &mut self.pipeline.jenkins_jnlp,
            &mut self.pipeline.alpine_git,
            &mut self.pipeline.plugins_docker,
            &mut self.logging.fluentd,
            &mut self.logging.fluentd_helper,
            &mut self.logging.log_aggregator_flex_volume_driver,
            &mut self.logging.elasticsearch,
            &mut self.logging.kibana,
            &mut self.logging.busybox,
        ] {
            if !image.is_empty() {
                f(image);
            }
        }
    }
}
