// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Image reference rewriting for mirrored and private registries

/// Upstream prefixes and their replacement in the mirrored namespace.
/// Only the first matching rule applies.
const MIRROR_RULES: &[(&str, &str)] = &[
    ("gcr.io/google_containers/", "rancher/"),
    ("k8s.gcr.io/", "rancher/nginx-ingress-controller-"),
    ("quay.io/coreos/", "rancher/coreos-"),
    ("quay.io/calico/", "rancher/calico-"),
    ("quay.io/pires/", "rancher/"),
    ("prom/", "rancher/prom-"),
    ("jenkins/", "rancher/jenkins-"),
    ("plugins/docker", "rancher/jenkins-plugins-docker"),
    ("alpine/git", "rancher/alpine-git"),
    ("kibana", "rancher/kibana"),
    ("busybox", "rancher/busybox"),
];

#[derive(Debug, Clone, Default)]
pub struct ImageMirror {
    registry: Option<String>,
}

impl ImageMirror {
    pub fn new(registry: Option<String>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    /// Rewrite an upstream image reference to its mirrored name, then prefix
    /// the private registry if one is configured
    pub fn mirror(&self, image: &str) -> String {
        let mirrored = MIRROR_RULES
            .iter()
            .find_map(|(upstream, local)| {
                image
                    .strip_prefix(upstream)
                    .map(|rest| format!("{}{}", local, rest))
            })
            .unwrap_or_else(|| image.to_string());

        match &self.registry {
            Some(registry) if !mirrored.starts_with(&format!("{}/", registry)) => {
                format!("{}/{}", registry, mirrored)
            }
            _ => mirrored,
        }
    }
}

/// Tag of an image reference, if it has one
///
/// A colon only starts the tag when it follows the last path separator, so
/// `registry:5000/rancher/hyperkube` has no tag.
pub fn image_tag(image: &str) -> Option<&str> {
    let (_, tag) = image.rsplit_once(':')?;
    if tag.is_empty() || tag.contains('/') {
        return None;
    }
    Some(tag)
}
