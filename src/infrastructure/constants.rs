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

/// Custom resource definitions the operator must have registered
pub const COMMUNITY_RUNTIME_SERVICE_CRD: &str = "runtimeservices.app.runtime.dev";
pub const PRODUCT_RUNTIME_SERVICE_CRD: &str = "runtimeservices.product.runtime.dev";
pub const SUPPORTING_SERVICE_CRD: &str = "supportingservices.app.runtime.dev";

/// Resource kind names used in user-facing errors
pub const RUNTIME_SERVICE_KIND: &str = "RuntimeService";

/// Supporting service type for the management console
pub const MGMT_CONSOLE: &str = "MgmtConsole";

/// Server-side apply field manager
pub const FIELD_MANAGER: &str = "runtime-kube";

/// Key under which an application.properties file is mounted in a ConfigMap
pub const PROPERTIES_CONFIGMAP_KEY: &str = "application.properties";
pub const PROPERTIES_CONFIGMAP_SUFFIX: &str = "-properties";

/// Defaults applied by the resource stub factory
pub const STUB_REPLICAS: i32 = 1;
/// Extends the probe tolerance for slow environments
pub const STUB_PROBE_FAILURE_THRESHOLD: i32 = 12;

/// User-facing messages after a successful install
pub const MSG_MGMT_CONSOLE_UNAVAILABLE: &str =
    "Management Console is not deployed in this namespace, no endpoint to report";
pub const MSG_MGMT_CONSOLE_ENDPOINT: &str = "You can manage your service using the Management Console at";
