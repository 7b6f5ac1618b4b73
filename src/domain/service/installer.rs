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

//! Ordered, fail-fast installation pipeline.

use crate::domain::runtime::resource::{RuntimeServiceResource, SchemaVariant};
use crate::infrastructure::kubernetes::client::RuntimeKubeClient;
use crate::shared::error::KubeError;
use tracing::debug;

/// A named unit of work in the installation sequence. Steps carry no
/// shared state; the driver stops at the first failing one.
enum InstallStep<'a> {
    /// Precondition: the operator CRDs for the chosen variant must be
    /// registered before any mutation is attempted.
    CheckOperatorCrds(SchemaVariant),

    /// Create or update the runtime service resource.
    InstallRuntimeService(&'a RuntimeServiceResource),
}

impl InstallStep<'_> {
    fn name(&self) -> &'static str {
        match self {
            InstallStep::CheckOperatorCrds(_) => "check-operator-crds",
            InstallStep::InstallRuntimeService(_) => "install-runtime-service",
        }
    }
}

/// Builder for the installation sequence. Steps run in the order they
/// were added; the first error aborts the pipeline and is returned to
/// the caller unchanged. Callers must not assume later steps ran.
pub struct ServicesInstallation<'a> {
    client: &'a dyn RuntimeKubeClient,
    steps: Vec<InstallStep<'a>>,
}

impl<'a> ServicesInstallation<'a> {
    pub fn new(client: &'a dyn RuntimeKubeClient) -> Self {
        Self {
            client,
            steps: Vec::new(),
        }
    }

    pub fn check_operator_crds(mut self, variant: SchemaVariant) -> Self {
        self.steps.push(InstallStep::CheckOperatorCrds(variant));
        self
    }

    pub fn install_runtime_service(mut self, resource: &'a RuntimeServiceResource) -> Self {
        self.steps.push(InstallStep::InstallRuntimeService(resource));
        self
    }

    /// Run all steps in order, stopping at the first failure.
    pub async fn execute(self) -> Result<(), KubeError> {
        for step in &self.steps {
            debug!(step = step.name(), "running installation step");
            self.run_step(step).await?;
        }
        Ok(())
    }

    async fn run_step(&self, step: &InstallStep<'_>) -> Result<(), KubeError> {
        match step {
            InstallStep::CheckOperatorCrds(variant) => {
                let crd_name = variant.required_crd();
                if !self.client.crd_registered(crd_name).await? {
                    return Err(KubeError::ValidationError(format!(
                        "Custom resource definition '{}' is not registered in the cluster. \
                         Install the runtime operator ({} variant) before deploying services.",
                        crd_name, variant
                    )));
                }
                Ok(())
            }
            InstallStep::InstallRuntimeService(resource) => {
                self.client.apply_runtime(resource).await
            }
        }
    }
}
