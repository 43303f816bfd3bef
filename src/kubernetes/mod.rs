// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for CRD discovery and typed resource clients.

pub mod client;
pub mod crd;

pub use client::{ClusterNodeClient, ObjectClient, PodSecurityPolicyTemplateClient, WatchedResource};
pub use crd::wait_for_crd;
