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

//! Install, delete and scale orchestration for runtime services.

use crate::domain::runtime::resource::{RuntimeServiceResource, SchemaVariant};
use crate::domain::service::installer::ServicesInstallation;
use crate::domain::service::resource_check::ResourceCheckService;
use crate::infrastructure::constants::{
    MGMT_CONSOLE, MSG_MGMT_CONSOLE_ENDPOINT, MSG_MGMT_CONSOLE_UNAVAILABLE, RUNTIME_SERVICE_KIND,
};
use crate::infrastructure::kubernetes::client::RuntimeKubeClient;
use crate::shared::error::KubeError;
use tracing::{debug, info};

pub struct RuntimeServiceManager<'a> {
    client: &'a dyn RuntimeKubeClient,
    resource_check: ResourceCheckService,
}

impl<'a> RuntimeServiceManager<'a> {
    pub fn new(client: &'a dyn RuntimeKubeClient) -> Self {
        Self {
            client,
            resource_check: ResourceCheckService::new(),
        }
    }

    /// Install the runtime service: verify the operator CRDs are
    /// registered, then apply the resource. On success, report the
    /// management console endpoint.
    ///
    /// A console lookup failure fails the command even though the
    /// resource stays applied; the install is not rolled back.
    pub async fn install(&self, resource: &RuntimeServiceResource) -> Result<(), KubeError> {
        debug!(
            name = resource.name(),
            namespace = resource.namespace(),
            variant = %resource.variant(),
            "installing runtime service"
        );

        ServicesInstallation::new(self.client)
            .check_operator_crds(resource.variant())
            .install_runtime_service(resource)
            .execute()
            .await?;

        self.print_mgmt_console_info().await
    }

    /// Best-effort console route lookup. An absent console is an
    /// expected state and yields an informational message; a true lookup
    /// failure propagates.
    async fn print_mgmt_console_info(&self) -> Result<(), KubeError> {
        let route = self
            .client
            .fetch_supporting_service_route(MGMT_CONSOLE)
            .await?;

        match route {
            Some(route) => info!("{} {}", MSG_MGMT_CONSOLE_ENDPOINT, route),
            None => info!("{}", MSG_MGMT_CONSOLE_UNAVAILABLE),
        }
        Ok(())
    }

    /// Delete the runtime service. Deleting a resource that does not
    /// exist is reported as a not-found error before any delete call is
    /// issued.
    pub async fn delete(
        &self,
        variant: SchemaVariant,
        name: &str,
    ) -> Result<(), KubeError> {
        self.resource_check
            .check_runtime_service_exists(self.client, variant, name)
            .await?;

        debug!(
            name,
            namespace = self.client.namespace(),
            "about to delete runtime service"
        );
        self.client.delete_runtime(variant, name).await?;

        info!(
            "Successfully deleted Runtime Service {} in the namespace {}",
            name,
            self.client.namespace()
        );
        Ok(())
    }

    /// Scale the installed service to the given replica count by
    /// re-applying the fetched resource with an updated spec.
    pub async fn set_replicas(
        &self,
        variant: SchemaVariant,
        name: &str,
        replicas: i32,
    ) -> Result<(), KubeError> {
        info!(name, replicas, "setting runtime service replicas");

        let mut resource = self
            .client
            .fetch_runtime(variant, name)
            .await?
            .ok_or_else(|| {
                KubeError::not_found(RUNTIME_SERVICE_KIND, name, self.client.namespace())
            })?;

        resource.spec_mut().replicas = replicas;
        self.client.apply_runtime(&resource).await
    }
}
