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

use crate::domain::runtime::resource::SchemaVariant;
use crate::infrastructure::constants::RUNTIME_SERVICE_KIND;
use crate::infrastructure::kubernetes::client::RuntimeKubeClient;
use crate::shared::error::KubeError;

/// Point-in-time existence check used before destructive operations.
/// A single check, no retry; races with concurrent external mutation
/// are accepted.
#[derive(Debug, Default)]
pub struct ResourceCheckService;

impl ResourceCheckService {
    pub fn new() -> Self {
        Self
    }

    /// Succeeds when the named runtime service exists, returns a
    /// descriptive not-found error otherwise.
    pub async fn check_runtime_service_exists(
        &self,
        client: &dyn RuntimeKubeClient,
        variant: SchemaVariant,
        name: &str,
    ) -> Result<(), KubeError> {
        match client.fetch_runtime(variant, name).await? {
            Some(_) => Ok(()),
            None => Err(KubeError::not_found(
                RUNTIME_SERVICE_KIND,
                name,
                client.namespace(),
            )),
        }
    }
}
