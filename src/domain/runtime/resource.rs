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

use crate::domain::runtime::community::{self, CommunitySpec};
use crate::domain::runtime::product::{self, ProductSpec};
use crate::domain::runtime::spec::RuntimeServiceSpec;
use crate::infrastructure::constants::{
    COMMUNITY_RUNTIME_SERVICE_CRD, PRODUCT_RUNTIME_SERVICE_CRD,
};

/// Which of the two structurally distinct resource encodings is in use.
///
/// Selected once per invocation from the `--product` flag and threaded
/// down explicitly; business logic never branches on it outside this
/// module and the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    Community,
    Product,
}

impl SchemaVariant {
    pub fn from_product_flag(product: bool) -> Self {
        if product {
            SchemaVariant::Product
        } else {
            SchemaVariant::Community
        }
    }

    /// Name of the CRD that must be registered before instances of this
    /// variant can be applied.
    pub fn required_crd(&self) -> &'static str {
        match self {
            SchemaVariant::Community => COMMUNITY_RUNTIME_SERVICE_CRD,
            SchemaVariant::Product => PRODUCT_RUNTIME_SERVICE_CRD,
        }
    }
}

impl std::fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaVariant::Community => write!(f, "community"),
            SchemaVariant::Product => write!(f, "product"),
        }
    }
}

/// A runtime service resource in either of its two encodings.
///
/// Callers interact through the common capability surface (identity and
/// spec accessors) and observe identical behavior regardless of variant.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeServiceResource {
    Community(community::RuntimeService),
    Product(product::RuntimeService),
}

impl RuntimeServiceResource {
    pub fn new(
        variant: SchemaVariant,
        name: &str,
        namespace: &str,
        spec: RuntimeServiceSpec,
    ) -> Self {
        match variant {
            SchemaVariant::Community => {
                let mut resource =
                    community::RuntimeService::new(name, CommunitySpec { service: spec });
                resource.metadata.namespace = Some(namespace.to_string());
                RuntimeServiceResource::Community(resource)
            }
            SchemaVariant::Product => {
                let mut resource = product::RuntimeService::new(name, ProductSpec { service: spec });
                resource.metadata.namespace = Some(namespace.to_string());
                RuntimeServiceResource::Product(resource)
            }
        }
    }

    pub fn variant(&self) -> SchemaVariant {
        match self {
            RuntimeServiceResource::Community(_) => SchemaVariant::Community,
            RuntimeServiceResource::Product(_) => SchemaVariant::Product,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    pub fn namespace(&self) -> &str {
        self.metadata().namespace.as_deref().unwrap_or_default()
    }

    pub fn spec(&self) -> &RuntimeServiceSpec {
        match self {
            RuntimeServiceResource::Community(r) => &r.spec.service,
            RuntimeServiceResource::Product(r) => &r.spec.service,
        }
    }

    pub fn spec_mut(&mut self) -> &mut RuntimeServiceSpec {
        match self {
            RuntimeServiceResource::Community(r) => &mut r.spec.service,
            RuntimeServiceResource::Product(r) => &mut r.spec.service,
        }
    }

    fn metadata(&self) -> &kube::core::ObjectMeta {
        match self {
            RuntimeServiceResource::Community(r) => &r.metadata,
            RuntimeServiceResource::Product(r) => &r.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_maps_product_flag() {
        assert_eq!(
            SchemaVariant::from_product_flag(false),
            SchemaVariant::Community
        );
        assert_eq!(
            SchemaVariant::from_product_flag(true),
            SchemaVariant::Product
        );
    }

    #[test]
    fn identity_is_preserved_across_variants() {
        for variant in [SchemaVariant::Community, SchemaVariant::Product] {
            let resource = RuntimeServiceResource::new(
                variant,
                "svc1",
                "ns1",
                RuntimeServiceSpec::default(),
            );
            assert_eq!(resource.name(), "svc1");
            assert_eq!(resource.namespace(), "ns1");
            assert_eq!(resource.variant(), variant);
        }
    }
}
