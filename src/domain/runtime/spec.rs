// Copyright 2025 Runtime Kube Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::shared::error::KubeError;
use k8s_openapi::api::core::v1::{EnvVar, Probe, ResourceRequirements};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Desired state of a runtime service instance.
///
/// The same spec content is carried by both the community and the product
/// custom resource; only the API group differs between the two encodings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeServiceSpec {
    /// Container image reference for the service
    #[serde(default)]
    pub image: String,

    /// Number of replicas, must be non-negative
    #[serde(default)]
    pub replicas: i32,

    /// Runtime the service image was built for
    #[serde(default)]
    pub runtime: RuntimeType,

    /// Environment variables, plain and secret-backed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,

    /// CPU/memory requests and limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Extra labels propagated to the generated Service, keys unique
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub service_labels: BTreeMap<String, String>,

    /// Whether the operator should create Istio network policies
    #[serde(default)]
    pub enable_istio: bool,

    /// Allow pulling the image from registries with self-signed certificates
    #[serde(default)]
    pub insecure_image_registry: bool,

    /// Name of a ConfigMap holding externally mounted application properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties_config_map: Option<String>,

    /// Names of infrastructure bindings this service depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub infra: Vec<String>,

    /// Monitoring configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<Monitoring>,

    /// Arbitrary key-value configuration overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,

    /// Health probe configuration
    #[serde(default)]
    pub probes: Probes,

    /// Secret holding a custom trust store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_store_secret: Option<String>,
}

/// Readiness/liveness/startup probes, each with its own failure threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Probes {
    #[serde(default)]
    pub readiness_probe: Probe,
    #[serde(default)]
    pub liveness_probe: Probe,
    #[serde(default)]
    pub startup_probe: Probe,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitoring {
    /// Metrics scrape path, defaults to the runtime's convention server-side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrape_path: Option<String>,

    /// Domain label attached to exported metrics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Runtime the application image targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    #[default]
    Quarkus,
    Springboot,
}

impl std::str::FromStr for RuntimeType {
    type Err = KubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quarkus" => Ok(RuntimeType::Quarkus),
            "springboot" => Ok(RuntimeType::Springboot),
            _ => Err(KubeError::ConfigError(format!(
                "Invalid runtime type: {} (expected 'quarkus' or 'springboot')",
                s
            ))),
        }
    }
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeType::Quarkus => write!(f, "quarkus"),
            RuntimeType::Springboot => write!(f, "springboot"),
        }
    }
}

/// Cluster-reported status of an installed runtime service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeServiceStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_replicas: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_uri: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_type_parses_known_values() {
        assert_eq!("quarkus".parse::<RuntimeType>().unwrap(), RuntimeType::Quarkus);
        assert_eq!(
            "springboot".parse::<RuntimeType>().unwrap(),
            RuntimeType::Springboot
        );
        assert!("nodejs".parse::<RuntimeType>().is_err());
    }

    #[test]
    fn spec_serializes_camel_case_and_skips_empty() {
        let spec = RuntimeServiceSpec {
            image: "quay.io/app/svc:1.0".to_string(),
            replicas: 2,
            insecure_image_registry: true,
            ..Default::default()
        };

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["image"], "quay.io/app/svc:1.0");
        assert_eq!(value["insecureImageRegistry"], true);
        assert!(value.get("env").is_none());
        assert!(value.get("propertiesConfigMap").is_none());
    }
}
