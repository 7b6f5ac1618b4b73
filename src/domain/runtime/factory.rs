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

use crate::domain::runtime::resource::{RuntimeServiceResource, SchemaVariant};
use crate::domain::runtime::spec::{Probes, RuntimeServiceSpec, RuntimeType};
use crate::infrastructure::constants::{STUB_PROBE_FAILURE_THRESHOLD, STUB_REPLICAS};
use k8s_openapi::api::core::v1::Probe;

/// Builds a canonical runtime service resource with all needed fields
/// initialized for a test or bootstrap environment: a single replica,
/// insecure registries allowed, and relaxed probe failure thresholds to
/// tolerate slow clusters.
///
/// The encoding is selected by `variant`; both variants carry identical
/// spec content.
pub fn runtime_service_stub(
    variant: SchemaVariant,
    namespace: &str,
    name: &str,
    runtime: RuntimeType,
    image: &str,
) -> RuntimeServiceResource {
    let relaxed_probe = Probe {
        failure_threshold: Some(STUB_PROBE_FAILURE_THRESHOLD),
        ..Probe::default()
    };

    let spec = RuntimeServiceSpec {
        image: image.to_string(),
        replicas: STUB_REPLICAS,
        runtime,
        insecure_image_registry: true,
        probes: Probes {
            readiness_probe: relaxed_probe.clone(),
            liveness_probe: relaxed_probe.clone(),
            startup_probe: relaxed_probe,
        },
        ..Default::default()
    };

    RuntimeServiceResource::new(variant, name, namespace, spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_populates_relaxed_defaults() {
        let resource = runtime_service_stub(
            SchemaVariant::Community,
            "ns1",
            "svc1",
            RuntimeType::Quarkus,
            "img:1.0",
        );

        let spec = resource.spec();
        assert_eq!(spec.replicas, 1);
        assert!(spec.insecure_image_registry);
        assert_eq!(spec.probes.readiness_probe.failure_threshold, Some(12));
        assert_eq!(spec.probes.liveness_probe.failure_threshold, Some(12));
        assert_eq!(spec.probes.startup_probe.failure_threshold, Some(12));
    }

    #[test]
    fn variants_are_semantically_equal() {
        let community = runtime_service_stub(
            SchemaVariant::Community,
            "ns1",
            "svc1",
            RuntimeType::Quarkus,
            "img:1.0",
        );
        let product = runtime_service_stub(
            SchemaVariant::Product,
            "ns1",
            "svc1",
            RuntimeType::Quarkus,
            "img:1.0",
        );

        assert_eq!(community.name(), product.name());
        assert_eq!(community.namespace(), product.namespace());
        assert_eq!(community.spec(), product.spec());
        assert_ne!(community.variant(), product.variant());
    }
}
