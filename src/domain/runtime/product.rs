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

//! Product encoding of the runtime service resource
//! (`product.runtime.dev/v1`). Carries the same spec content as the
//! community encoding under a different API group.

use crate::domain::runtime::spec::{RuntimeServiceSpec, RuntimeServiceStatus};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[kube(
    group = "product.runtime.dev",
    version = "v1",
    kind = "RuntimeService",
    plural = "runtimeservices",
    namespaced,
    status = "RuntimeServiceStatus",
    schema = "disabled",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpec {
    #[serde(flatten)]
    pub service: RuntimeServiceSpec,
}
