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

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::ConfigMap;
    use runtime_kube::infrastructure::constants::{
        COMMUNITY_RUNTIME_SERVICE_CRD, PRODUCT_RUNTIME_SERVICE_CRD,
    };
    use runtime_kube::{
        runtime_service_stub, KubeError, RuntimeKubeClient, RuntimeServiceManager,
        RuntimeServiceResource, RuntimeType, SchemaVariant,
    };
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory client recording every mutation issued by the
    /// orchestration layer.
    struct StubClient {
        namespace: String,
        registered_crds: Vec<&'static str>,
        console_route: Option<String>,
        route_lookup_fails: bool,
        store: Mutex<HashMap<String, RuntimeServiceResource>>,
        apply_calls: AtomicUsize,
        delete_calls: AtomicUsize,
    }

    impl StubClient {
        fn new(namespace: &str) -> Self {
            Self {
                namespace: namespace.to_string(),
                registered_crds: vec![COMMUNITY_RUNTIME_SERVICE_CRD, PRODUCT_RUNTIME_SERVICE_CRD],
                console_route: None,
                route_lookup_fails: false,
                store: Mutex::new(HashMap::new()),
                apply_calls: AtomicUsize::new(0),
                delete_calls: AtomicUsize::new(0),
            }
        }

        fn without_crds(mut self) -> Self {
            self.registered_crds.clear();
            self
        }

        fn with_console_route(mut self, route: &str) -> Self {
            self.console_route = Some(route.to_string());
            self
        }

        fn with_failing_route_lookup(mut self) -> Self {
            self.route_lookup_fails = true;
            self
        }

        fn seed(self, resource: RuntimeServiceResource) -> Self {
            self.store
                .lock()
                .unwrap()
                .insert(resource.name().to_string(), resource);
            self
        }

        fn stored(&self, name: &str) -> Option<RuntimeServiceResource> {
            self.store.lock().unwrap().get(name).cloned()
        }

        fn apply_count(&self) -> usize {
            self.apply_calls.load(Ordering::SeqCst)
        }

        fn delete_count(&self) -> usize {
            self.delete_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl RuntimeKubeClient for StubClient {
        async fn apply_runtime(&self, resource: &RuntimeServiceResource) -> Result<(), KubeError> {
            self.apply_calls.fetch_add(1, Ordering::SeqCst);
            self.store
                .lock()
                .unwrap()
                .insert(resource.name().to_string(), resource.clone());
            Ok(())
        }

        async fn fetch_runtime(
            &self,
            variant: SchemaVariant,
            name: &str,
        ) -> Result<Option<RuntimeServiceResource>, KubeError> {
            let found = self.store.lock().unwrap().get(name).cloned();
            Ok(found.filter(|r| r.variant() == variant))
        }

        async fn delete_runtime(
            &self,
            _variant: SchemaVariant,
            name: &str,
        ) -> Result<(), KubeError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            self.store.lock().unwrap().remove(name);
            Ok(())
        }

        async fn crd_registered(&self, crd_name: &str) -> Result<bool, KubeError> {
            Ok(self.registered_crds.contains(&crd_name))
        }

        async fn fetch_supporting_service_route(
            &self,
            _service_type: &str,
        ) -> Result<Option<String>, KubeError> {
            if self.route_lookup_fails {
                return Err(KubeError::KubeError("route lookup failed".to_string()));
            }
            Ok(self.console_route.clone())
        }

        async fn apply_configmap(&self, _configmap: &ConfigMap) -> Result<(), KubeError> {
            Ok(())
        }

        fn namespace(&self) -> &str {
            &self.namespace
        }
    }

    fn stub_resource(variant: SchemaVariant, namespace: &str, name: &str) -> RuntimeServiceResource {
        runtime_service_stub(variant, namespace, name, RuntimeType::Quarkus, "img:1.0")
    }

    #[tokio::test]
    async fn install_preserves_identity() {
        let client = StubClient::new("ns1");
        let resource = stub_resource(SchemaVariant::Community, "ns1", "svc1");

        RuntimeServiceManager::new(&client)
            .install(&resource)
            .await
            .unwrap();

        let installed = client.stored("svc1").expect("resource was applied");
        assert_eq!(installed.name(), "svc1");
        assert_eq!(installed.namespace(), "ns1");
        assert_eq!(client.apply_count(), 1);
    }

    #[tokio::test]
    async fn install_without_crds_issues_no_mutations() {
        let client = StubClient::new("ns1").without_crds();
        let resource = stub_resource(SchemaVariant::Community, "ns1", "svc1");

        let err = RuntimeServiceManager::new(&client)
            .install(&resource)
            .await
            .unwrap_err();

        assert!(matches!(err, KubeError::ValidationError(_)));
        assert!(err.to_string().contains(COMMUNITY_RUNTIME_SERVICE_CRD));
        assert_eq!(client.apply_count(), 0);
    }

    #[tokio::test]
    async fn install_succeeds_when_console_is_absent() {
        // An undeployed console is informational, never an install failure.
        let client = StubClient::new("ns1");
        let resource = stub_resource(SchemaVariant::Product, "ns1", "svc1");

        RuntimeServiceManager::new(&client)
            .install(&resource)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn install_succeeds_when_console_is_routed() {
        let client = StubClient::new("ns1").with_console_route("console.example.com");
        let resource = stub_resource(SchemaVariant::Community, "ns1", "svc1");

        RuntimeServiceManager::new(&client)
            .install(&resource)
            .await
            .unwrap();

        let route = client
            .fetch_supporting_service_route("MgmtConsole")
            .await
            .unwrap();
        assert_eq!(route.as_deref(), Some("console.example.com"));
    }

    #[tokio::test]
    async fn route_lookup_failure_fails_install_without_rollback() {
        let client = StubClient::new("ns1").with_failing_route_lookup();
        let resource = stub_resource(SchemaVariant::Community, "ns1", "svc1");

        let result = RuntimeServiceManager::new(&client).install(&resource).await;

        assert!(result.is_err());
        // The resource stays applied; only the command outcome fails.
        assert!(client.stored("svc1").is_some());
        assert_eq!(client.apply_count(), 1);
    }

    #[tokio::test]
    async fn install_is_idempotent() {
        let client = StubClient::new("ns1");
        let resource = stub_resource(SchemaVariant::Community, "ns1", "svc1");
        let manager = RuntimeServiceManager::new(&client);

        manager.install(&resource).await.unwrap();
        manager.install(&resource).await.unwrap();

        assert_eq!(client.apply_count(), 2);
        let installed = client.stored("svc1").unwrap();
        assert_eq!(installed.spec(), resource.spec());
    }

    #[tokio::test]
    async fn delete_missing_resource_issues_no_delete_calls() {
        let client = StubClient::new("y");

        let err = RuntimeServiceManager::new(&client)
            .delete(SchemaVariant::Community, "x")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("'x'"));
        assert!(err.to_string().contains("'y'"));
        assert_eq!(client.delete_count(), 0);
    }

    #[tokio::test]
    async fn delete_existing_resource_issues_one_delete_call() {
        let client =
            StubClient::new("ns1").seed(stub_resource(SchemaVariant::Community, "ns1", "svc1"));

        RuntimeServiceManager::new(&client)
            .delete(SchemaVariant::Community, "svc1")
            .await
            .unwrap();

        assert_eq!(client.delete_count(), 1);
        assert!(client.stored("svc1").is_none());
    }

    #[tokio::test]
    async fn scale_updates_replica_count() {
        let client =
            StubClient::new("ns1").seed(stub_resource(SchemaVariant::Community, "ns1", "svc1"));

        RuntimeServiceManager::new(&client)
            .set_replicas(SchemaVariant::Community, "svc1", 3)
            .await
            .unwrap();

        assert_eq!(client.apply_count(), 1);
        assert_eq!(client.stored("svc1").unwrap().spec().replicas, 3);
    }

    #[tokio::test]
    async fn scale_missing_resource_is_not_found() {
        let client = StubClient::new("ns1");

        let err = RuntimeServiceManager::new(&client)
            .set_replicas(SchemaVariant::Community, "svc1", 3)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(client.apply_count(), 0);
    }

    #[tokio::test]
    async fn variants_produce_equal_stubs() {
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

        assert_eq!(community.name(), "svc1");
        assert_eq!(community.namespace(), "ns1");
        assert_eq!(community.spec().image, "img:1.0");
        assert_eq!(community.spec().runtime, RuntimeType::Quarkus);
        assert_eq!(community.spec().replicas, 1);
        assert_eq!(
            community.spec().probes.readiness_probe.failure_threshold,
            Some(12)
        );
        assert_eq!(community.spec(), product.spec());
        assert_ne!(community.variant(), product.variant());
    }
}
