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

//! Runtime service resource model

pub mod community;
pub mod factory;
pub mod product;
pub mod resource;
pub mod spec;
pub mod supporting;

pub use self::factory::runtime_service_stub;
pub use self::resource::{RuntimeServiceResource, SchemaVariant};
pub use self::spec::{Monitoring, Probes, RuntimeServiceSpec, RuntimeServiceStatus, RuntimeType};
pub use self::supporting::{SupportingService, SupportingServiceSpec, SupportingServiceStatus};
