// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod security policy template watcher - flags permissive templates.

use crate::controllers::ResourceController;
use crate::error::Result;
use crate::kubernetes::PodSecurityPolicyTemplateClient;
use crate::types::PodSecurityPolicyTemplate;
use std::sync::Arc;
use tracing::{debug, warn};

pub const HANDLER_NAME: &str = "pod-security-policy-template-audit";

pub struct PodSecurityPolicyTemplateWatcher {
    controller: Arc<ResourceController<PodSecurityPolicyTemplate>>,
}

impl PodSecurityPolicyTemplateWatcher {
    pub fn new(templates: &PodSecurityPolicyTemplateClient) -> Self {
        Self {
            controller: templates.controller(),
        }
    }

    pub async fn run(self, threadiness: u16) -> anyhow::Result<()> {
        self.controller
            .add_handler(HANDLER_NAME, |key, template| async move {
                audit_template(&key, template.as_deref())
            })
            .await;

        self.controller.start(threadiness).await?;
        Ok(())
    }
}

fn audit_template(key: &str, template: Option<&PodSecurityPolicyTemplate>) -> Result<()> {
    let Some(template) = template else {
        debug!("Pod security policy template {} removed", key);
        return Ok(());
    };

    debug!(
        "Pod security policy template {}: {}",
        key,
        template.spec.description.as_deref().unwrap_or("no description")
    );

    for finding in findings(template) {
        warn!("Pod security policy template {} {}", key, finding);
    }

    Ok(())
}

fn findings(template: &PodSecurityPolicyTemplate) -> Vec<&'static str> {
    let mut found = Vec::new();
    if template.allows_privileged() {
        found.push("allows privileged containers");
    }
    if template.allows_host_namespaces() {
        found.push("allows sharing host namespaces");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PodSecurityPolicyTemplateSpec;
    use kube::api::ObjectMeta;

    fn make_template(spec: PodSecurityPolicyTemplateSpec) -> PodSecurityPolicyTemplate {
        PodSecurityPolicyTemplate {
            metadata: ObjectMeta {
                name: Some("unrestricted".to_string()),
                ..Default::default()
            },
            spec,
        }
    }

    #[test]
    fn test_restricted_template_has_no_findings() {
        let template = make_template(PodSecurityPolicyTemplateSpec {
            privileged: Some(false),
            read_only_root_filesystem: Some(true),
            ..Default::default()
        });

        assert!(findings(&template).is_empty());
    }

    #[test]
    fn test_permissive_template() {
        let template = make_template(PodSecurityPolicyTemplateSpec {
            privileged: Some(true),
            host_pid: Some(true),
            ..Default::default()
        });

        assert_eq!(
            findings(&template),
            vec!["allows privileged containers", "allows sharing host namespaces"]
        );
        assert!(audit_template("unrestricted", Some(&template)).is_ok());
        assert!(audit_template("unrestricted", None).is_ok());
    }
}
