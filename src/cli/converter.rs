//! Pure mapping from command-line flags to a runtime service spec.
//!
//! No cluster access happens here; every function is a data
//! transformation that either produces a value or a configuration error.

use crate::cli::service::InstallCommand;
use crate::domain::runtime::spec::{Monitoring, Probes, RuntimeServiceSpec, RuntimeType};
use crate::infrastructure::constants::{PROPERTIES_CONFIGMAP_KEY, PROPERTIES_CONFIGMAP_SUFFIX};
use crate::shared::error::KubeError;
use k8s_openapi::api::core::v1::{
    ConfigMap, EnvVar, EnvVarSource, Probe, ResourceRequirements, SecretKeySelector,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::core::ObjectMeta;
use regex::Regex;
use std::collections::BTreeMap;

// RFC 1123 label, the only shape the API server accepts for names
const DNS1123_PATTERN: &str = "^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";

pub fn from_install_flags(cmd: &InstallCommand) -> Result<RuntimeServiceSpec, KubeError> {
    validate_resource_name(&cmd.name)?;

    if cmd.replicas < 0 {
        return Err(KubeError::ConfigError(format!(
            "replicas must be non-negative, got {}",
            cmd.replicas
        )));
    }

    let runtime: RuntimeType = cmd.runtime.parse()?;

    Ok(RuntimeServiceSpec {
        image: cmd.image.clone(),
        replicas: cmd.replicas,
        runtime,
        env: from_env_flags(&cmd.env, &cmd.secret_env)?,
        resources: from_resource_flags(cmd.limits.as_deref(), cmd.requests.as_deref())?,
        service_labels: from_key_value_pairs(&cmd.svc_labels)?,
        enable_istio: cmd.enable_istio,
        insecure_image_registry: cmd.insecure_image_registry,
        properties_config_map: None,
        infra: cmd.infra.clone(),
        monitoring: from_monitoring_flags(cmd.enable_monitoring, cmd.monitoring_path.as_deref()),
        config: from_key_value_pairs(&cmd.config)?,
        probes: from_probe_flags(cmd.probe_failure_threshold),
        trust_store_secret: cmd.trust_store_secret.clone(),
    })
}

pub fn validate_resource_name(name: &str) -> Result<(), KubeError> {
    let pattern = Regex::new(DNS1123_PATTERN).expect("valid DNS-1123 pattern");
    if name.is_empty() || name.len() > 63 || !pattern.is_match(name) {
        return Err(KubeError::ConfigError(format!(
            "Invalid resource name '{}': must be a lowercase RFC 1123 label \
             (alphanumeric and '-', max 63 characters)",
            name
        )));
    }
    Ok(())
}

/// Plain env entries are `KEY=VALUE`; secret-backed entries are
/// `KEY=SECRET_NAME#SECRET_KEY` and resolve against a Secret at runtime.
pub fn from_env_flags(env: &[String], secret_env: &[String]) -> Result<Vec<EnvVar>, KubeError> {
    let mut vars = Vec::with_capacity(env.len() + secret_env.len());

    for entry in env {
        let (key, value) = split_pair(entry)?;
        vars.push(EnvVar {
            name: key.to_string(),
            value: Some(value.to_string()),
            value_from: None,
        });
    }

    for entry in secret_env {
        let (key, secret_ref) = split_pair(entry)?;
        let (secret_name, secret_key) = secret_ref.split_once('#').ok_or_else(|| {
            KubeError::ConfigError(format!(
                "Invalid secret env '{}'. Expected 'KEY=SECRET_NAME#SECRET_KEY'",
                entry
            ))
        })?;

        vars.push(EnvVar {
            name: key.to_string(),
            value: None,
            value_from: Some(EnvVarSource {
                secret_key_ref: Some(SecretKeySelector {
                    name: Some(secret_name.to_string()),
                    key: secret_key.to_string(),
                    optional: None,
                }),
                ..Default::default()
            }),
        });
    }

    Ok(vars)
}

/// Parse `KEY=VALUE` pairs into a map, rejecting duplicate keys.
pub fn from_key_value_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>, KubeError> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        let (key, value) = split_pair(pair)?;
        if map.insert(key.to_string(), value.to_string()).is_some() {
            return Err(KubeError::ConfigError(format!("Duplicate key '{}'", key)));
        }
    }
    Ok(map)
}

/// Parse `cpu=500m,memory=1Gi` style limit/request flags.
pub fn from_resource_flags(
    limits: Option<&str>,
    requests: Option<&str>,
) -> Result<Option<ResourceRequirements>, KubeError> {
    if limits.is_none() && requests.is_none() {
        return Ok(None);
    }

    Ok(Some(ResourceRequirements {
        limits: limits.map(parse_quantities).transpose()?,
        requests: requests.map(parse_quantities).transpose()?,
        ..Default::default()
    }))
}

fn parse_quantities(spec: &str) -> Result<BTreeMap<String, Quantity>, KubeError> {
    let mut map = BTreeMap::new();
    for entry in spec.split(',') {
        let (key, value) = split_pair(entry)?;
        map.insert(key.to_string(), Quantity(value.to_string()));
    }
    Ok(map)
}

pub fn from_probe_flags(failure_threshold: Option<i32>) -> Probes {
    let probe = Probe {
        failure_threshold,
        ..Default::default()
    };
    Probes {
        readiness_probe: probe.clone(),
        liveness_probe: probe.clone(),
        startup_probe: probe,
    }
}

fn from_monitoring_flags(enabled: bool, scrape_path: Option<&str>) -> Option<Monitoring> {
    if !enabled && scrape_path.is_none() {
        return None;
    }
    Some(Monitoring {
        scrape_path: scrape_path.map(str::to_string),
        domain: None,
    })
}

/// Build a ConfigMap carrying an application.properties file, named
/// `<service>-properties`, to be referenced from the spec.
pub fn config_map_from_properties(
    service_name: &str,
    namespace: &str,
    path: &str,
) -> Result<ConfigMap, KubeError> {
    let contents = std::fs::read_to_string(path)?;

    let mut data = BTreeMap::new();
    data.insert(PROPERTIES_CONFIGMAP_KEY.to_string(), contents);

    Ok(ConfigMap {
        metadata: ObjectMeta {
            name: Some(format!("{}{}", service_name, PROPERTIES_CONFIGMAP_SUFFIX)),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(data),
        ..Default::default()
    })
}

fn split_pair(entry: &str) -> Result<(&str, &str), KubeError> {
    let (key, value) = entry.split_once('=').ok_or_else(|| {
        KubeError::ConfigError(format!(
            "Invalid format: '{}'. Expected 'key=value'",
            entry
        ))
    })?;

    let key = key.trim();
    let value = value.trim();
    if key.is_empty() {
        return Err(KubeError::ConfigError(format!(
            "Empty key in entry: '{}'",
            entry
        )));
    }
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn plain_and_secret_env_are_parsed() {
        let env = vec!["A=1".to_string()];
        let secret_env = vec!["TOKEN=my-secret#token-key".to_string()];

        let vars = from_env_flags(&env, &secret_env).unwrap();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].name, "A");
        assert_eq!(vars[0].value.as_deref(), Some("1"));

        let secret_ref = vars[1]
            .value_from
            .as_ref()
            .and_then(|v| v.secret_key_ref.as_ref())
            .unwrap();
        assert_eq!(secret_ref.name.as_deref(), Some("my-secret"));
        assert_eq!(secret_ref.key, "token-key");
    }

    #[test]
    fn malformed_env_entry_is_rejected() {
        assert!(from_env_flags(&["NOEQUALS".to_string()], &[]).is_err());
        assert!(from_env_flags(&[], &["KEY=no-hash".to_string()]).is_err());
    }

    #[test]
    fn duplicate_label_keys_are_rejected() {
        let pairs = vec!["app=one".to_string(), "app=two".to_string()];
        assert!(from_key_value_pairs(&pairs).is_err());
    }

    #[test]
    fn resource_flags_become_quantities() {
        let resources = from_resource_flags(Some("cpu=500m,memory=1Gi"), None)
            .unwrap()
            .unwrap();
        let limits = resources.limits.unwrap();
        assert_eq!(limits["cpu"], Quantity("500m".to_string()));
        assert_eq!(limits["memory"], Quantity("1Gi".to_string()));
        assert!(resources.requests.is_none());
    }

    #[test]
    fn resource_names_are_validated() {
        assert!(validate_resource_name("my-service-1").is_ok());
        assert!(validate_resource_name("My-Service").is_err());
        assert!(validate_resource_name("-leading").is_err());
        assert!(validate_resource_name("").is_err());
    }

    #[test]
    fn config_map_wraps_properties_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "greeting.message=hello").unwrap();

        let cm = config_map_from_properties("svc1", "ns1", file.path().to_str().unwrap()).unwrap();
        assert_eq!(cm.metadata.name.as_deref(), Some("svc1-properties"));
        assert_eq!(cm.metadata.namespace.as_deref(), Some("ns1"));
        let data = cm.data.unwrap();
        assert!(data["application.properties"].contains("greeting.message=hello"));
    }
}
