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
use crate::domain::runtime::supporting::SupportingService;
use crate::domain::runtime::{community, product};
use crate::infrastructure::constants::FIELD_MANAGER;
use crate::shared::error::KubeError;
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use k8s_openapi::NamespaceResourceScope;
use kube::api::{Api, DeleteParams, Patch, PatchParams, PostParams};
use kube::{Client, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Generic resource operations against the cluster, scoped to a single
/// namespace for the lifetime of the client.
///
/// Every operation distinguishes "not found" from other failures so that
/// callers can branch on absence without string matching.
#[async_trait::async_trait]
pub trait RuntimeKubeClient: Send + Sync {
    /// Create the resource, or update it in place when already present.
    async fn apply_runtime(&self, resource: &RuntimeServiceResource) -> Result<(), KubeError>;

    /// Fetch by name; `Ok(None)` means the resource does not exist.
    async fn fetch_runtime(
        &self,
        variant: SchemaVariant,
        name: &str,
    ) -> Result<Option<RuntimeServiceResource>, KubeError>;

    async fn delete_runtime(&self, variant: SchemaVariant, name: &str) -> Result<(), KubeError>;

    /// Whether a CRD with the given name is registered in the cluster.
    async fn crd_registered(&self, crd_name: &str) -> Result<bool, KubeError>;

    /// Endpoint of the supporting service with the given type, if one is
    /// deployed and routed. `Ok(None)` covers both an unregistered
    /// supporting-service CRD and a namespace without such a deployment.
    async fn fetch_supporting_service_route(
        &self,
        service_type: &str,
    ) -> Result<Option<String>, KubeError>;

    async fn apply_configmap(&self, configmap: &ConfigMap) -> Result<(), KubeError>;

    fn namespace(&self) -> &str;
}

pub struct RuntimeKubeClientImpl {
    client: Client,
    namespace: String,
}

impl RuntimeKubeClientImpl {
    pub async fn new(namespace: String) -> Result<Self, KubeError> {
        let client = Client::try_default().await.map_err(|e| {
            KubeError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client, namespace })
    }

    pub async fn new_with_config(
        namespace: String,
        kubeconfig_path: Option<String>,
        context: Option<String>,
    ) -> Result<Self, KubeError> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path)
                .map_err(|e| KubeError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        } else {
            Kubeconfig::read()
                .map_err(|e| KubeError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                KubeError::KubeError(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            KubeError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client, namespace })
    }

    pub fn get_client(&self) -> Client {
        self.client.clone()
    }

    async fn apply<K>(&self, resource: &K) -> Result<(), KubeError>
    where
        K: Resource<Scope = NamespaceResourceScope>
            + Clone
            + std::fmt::Debug
            + Serialize
            + DeserializeOwned,
        K::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), &self.namespace);
        let name = resource
            .meta()
            .name
            .as_ref()
            .ok_or_else(|| KubeError::ConfigError("resource name is required".to_string()))?;

        match api.get(name).await {
            Ok(_) => {
                let patch_params = PatchParams::apply(FIELD_MANAGER).force();
                let patch = serde_json::to_value(resource)?;
                api.patch(name, &patch_params, &Patch::Apply(patch)).await?;
            }
            Err(kube::Error::Api(ae)) if ae.code == 404 => {
                let pp = PostParams::default();
                api.create(&pp, resource).await?;
            }
            Err(e) => return Err(KubeError::KubeError(e.to_string())),
        }
        Ok(())
    }

    async fn fetch<K>(&self, name: &str) -> Result<Option<K>, KubeError>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + std::fmt::Debug + DeserializeOwned,
        K::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), &self.namespace);
        match api.get(name).await {
            Ok(resource) => Ok(Some(resource)),
            Err(kube::Error::Api(ae)) if ae.code == 404 => Ok(None),
            Err(e) => Err(KubeError::KubeError(e.to_string())),
        }
    }

    async fn delete<K>(&self, name: &str) -> Result<(), KubeError>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + std::fmt::Debug + DeserializeOwned,
        K::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), &self.namespace);
        let dp = DeleteParams::default();

        api.delete(name, &dp).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl RuntimeKubeClient for RuntimeKubeClientImpl {
    async fn apply_runtime(&self, resource: &RuntimeServiceResource) -> Result<(), KubeError> {
        match resource {
            RuntimeServiceResource::Community(r) => self.apply(r).await,
            RuntimeServiceResource::Product(r) => self.apply(r).await,
        }
    }

    async fn fetch_runtime(
        &self,
        variant: SchemaVariant,
        name: &str,
    ) -> Result<Option<RuntimeServiceResource>, KubeError> {
        match variant {
            SchemaVariant::Community => {
                let found: Option<community::RuntimeService> = self.fetch(name).await?;
                Ok(found.map(RuntimeServiceResource::Community))
            }
            SchemaVariant::Product => {
                let found: Option<product::RuntimeService> = self.fetch(name).await?;
                Ok(found.map(RuntimeServiceResource::Product))
            }
        }
    }

    async fn delete_runtime(&self, variant: SchemaVariant, name: &str) -> Result<(), KubeError> {
        match variant {
            SchemaVariant::Community => self.delete::<community::RuntimeService>(name).await,
            SchemaVariant::Product => self.delete::<product::RuntimeService>(name).await,
        }
    }

    async fn crd_registered(&self, crd_name: &str) -> Result<bool, KubeError> {
        let api: Api<CustomResourceDefinition> = Api::all(self.client.clone());
        match api.get(crd_name).await {
            Ok(_) => Ok(true),
            Err(kube::Error::Api(ae)) if ae.code == 404 => Ok(false),
            Err(e) => Err(KubeError::KubeError(format!(
                "Failed to check CRD '{}': {}",
                crd_name, e
            ))),
        }
    }

    async fn fetch_supporting_service_route(
        &self,
        service_type: &str,
    ) -> Result<Option<String>, KubeError> {
        let api: Api<SupportingService> = Api::namespaced(self.client.clone(), &self.namespace);

        let list = match api.list(&Default::default()).await {
            Ok(list) => list,
            // The supporting-service CRD not being registered is an
            // expected state, not a lookup failure.
            Err(kube::Error::Api(ae)) if ae.code == 404 => return Ok(None),
            Err(e) => return Err(KubeError::KubeError(e.to_string())),
        };

        let route = list
            .items
            .into_iter()
            .filter(|s| s.spec.service_type == service_type)
            .find_map(|s| s.status.and_then(|st| st.external_uri))
            .filter(|uri| !uri.is_empty());

        Ok(route)
    }

    async fn apply_configmap(&self, configmap: &ConfigMap) -> Result<(), KubeError> {
        self.apply(configmap).await
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}
