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

//! Supporting services (management console, data index, ...) deployed
//! alongside runtime services. Only read by this tool, never written.

use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[kube(
    group = "app.runtime.dev",
    version = "v1beta1",
    kind = "SupportingService",
    plural = "supportingservices",
    namespaced,
    status = "SupportingServiceStatus",
    schema = "disabled",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct SupportingServiceSpec {
    /// Which supporting service this instance provides, e.g. "MgmtConsole"
    #[serde(default)]
    pub service_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingServiceStatus {
    /// Externally reachable endpoint, set by the operator once routed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_uri: Option<String>,
}
