//! Runtime service lifecycle commands

use crate::cli::converter;
use crate::domain::runtime::resource::{RuntimeServiceResource, SchemaVariant};
use crate::domain::service::runtime::RuntimeServiceManager;
use crate::infrastructure::kubernetes::client::{RuntimeKubeClient, RuntimeKubeClientImpl};
use clap::Parser;
use colored::Colorize;

#[derive(Parser, Debug, Clone)]
pub struct InstallCommand {
    /// Service name (must be a valid Kubernetes name)
    #[arg(long)]
    pub name: String,

    /// Target namespace
    #[arg(long, short = 'p', default_value = "default")]
    pub project: String,

    /// Container image reference
    #[arg(long)]
    pub image: String,

    /// Number of replicas
    #[arg(long, default_value = "1")]
    pub replicas: i32,

    /// Environment variables (KEY=VALUE, repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Secret-backed environment variables (KEY=SECRET_NAME#SECRET_KEY)
    #[arg(long = "secret-env", value_name = "KEY=SECRET#KEY")]
    pub secret_env: Vec<String>,

    /// Resource limits (e.g. "cpu=500m,memory=1Gi")
    #[arg(long)]
    pub limits: Option<String>,

    /// Resource requests (e.g. "cpu=250m,memory=512Mi")
    #[arg(long)]
    pub requests: Option<String>,

    /// Labels propagated to the generated Service (KEY=VALUE, repeatable)
    #[arg(long = "svc-labels", value_name = "KEY=VALUE")]
    pub svc_labels: Vec<String>,

    /// Create Istio network policies for the service
    #[arg(long)]
    pub enable_istio: bool,

    /// Configuration overrides (KEY=VALUE, repeatable)
    #[arg(long = "config", short = 'C', value_name = "KEY=VALUE")]
    pub config: Vec<String>,

    /// Path to an application.properties file to mount as a ConfigMap
    #[arg(long, value_name = "PATH")]
    pub config_file: Option<String>,

    /// Infrastructure bindings the service depends on (repeatable)
    #[arg(long)]
    pub infra: Vec<String>,

    /// Enable metrics scraping for the service
    #[arg(long)]
    pub enable_monitoring: bool,

    /// Metrics scrape path (implies monitoring)
    #[arg(long)]
    pub monitoring_path: Option<String>,

    /// Failure threshold applied to readiness/liveness/startup probes
    #[arg(long)]
    pub probe_failure_threshold: Option<i32>,

    /// Secret holding a custom trust store
    #[arg(long)]
    pub trust_store_secret: Option<String>,

    /// Runtime the image targets (quarkus, springboot)
    #[arg(long, default_value = "quarkus")]
    pub runtime: String,

    /// Allow image pulls from registries with self-signed certificates
    #[arg(long)]
    pub insecure_image_registry: bool,

    /// Use the product resource schema instead of the community one
    #[arg(long)]
    pub product: bool,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DeleteCommand {
    /// Service name
    #[arg(long)]
    pub name: String,

    /// Target namespace
    #[arg(long, short = 'p', default_value = "default")]
    pub project: String,

    /// Use the product resource schema instead of the community one
    #[arg(long)]
    pub product: bool,

    /// Path to kubeconfig file
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ScaleCommand {
    /// Service name
    #[arg(long)]
    pub name: String,

    /// Target namespace
    #[arg(long, short = 'p', default_value = "default")]
    pub project: String,

    /// New replica count
    #[arg(long)]
    pub replicas: i32,

    /// Use the product resource schema instead of the community one
    #[arg(long)]
    pub product: bool,

    /// Path to kubeconfig file
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    #[arg(long)]
    pub context: Option<String>,
}

impl InstallCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let variant = SchemaVariant::from_product_flag(self.product);

        let mut spec = converter::from_install_flags(self)
            .map_err(|e| anyhow::anyhow!("Invalid install flags: {}", e))?;

        let client = RuntimeKubeClientImpl::new_with_config(
            self.project.clone(),
            self.kubeconfig.clone(),
            self.context.clone(),
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create Kubernetes client: {}", e))?;

        // Mount the properties file before building the resource so the
        // spec can reference the ConfigMap by name.
        if let Some(ref path) = self.config_file {
            let configmap = converter::config_map_from_properties(&self.name, &self.project, path)
                .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
            client
                .apply_configmap(&configmap)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to apply properties ConfigMap: {}", e))?;
            spec.properties_config_map = configmap.metadata.name.clone();
        }

        let resource = RuntimeServiceResource::new(variant, &self.name, &self.project, spec);

        let manager = RuntimeServiceManager::new(&client);
        manager
            .install(&resource)
            .await
            .map_err(|e| anyhow::anyhow!("Installation failed: {}", e))?;

        println!(
            "{} Runtime Service {} installed in namespace {}",
            "✓".green(),
            self.name.bold(),
            self.project
        );
        Ok(())
    }
}

impl DeleteCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let variant = SchemaVariant::from_product_flag(self.product);

        let client = RuntimeKubeClientImpl::new_with_config(
            self.project.clone(),
            self.kubeconfig.clone(),
            self.context.clone(),
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create Kubernetes client: {}", e))?;

        let manager = RuntimeServiceManager::new(&client);
        manager
            .delete(variant, &self.name)
            .await
            .map_err(|e| anyhow::anyhow!("Deletion failed: {}", e))?;

        println!(
            "{} Runtime Service {} deleted from namespace {}",
            "✓".green(),
            self.name.bold(),
            self.project
        );
        Ok(())
    }
}

impl ScaleCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        if self.replicas < 0 {
            anyhow::bail!("replicas must be non-negative, got {}", self.replicas);
        }

        let variant = SchemaVariant::from_product_flag(self.product);

        let client = RuntimeKubeClientImpl::new_with_config(
            self.project.clone(),
            self.kubeconfig.clone(),
            self.context.clone(),
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create Kubernetes client: {}", e))?;

        let manager = RuntimeServiceManager::new(&client);
        manager
            .set_replicas(variant, &self.name, self.replicas)
            .await
            .map_err(|e| anyhow::anyhow!("Scaling failed: {}", e))?;

        println!(
            "{} Runtime Service {} scaled to {} replica(s)",
            "✓".green(),
            self.name.bold(),
            self.replicas
        );
        Ok(())
    }
}
