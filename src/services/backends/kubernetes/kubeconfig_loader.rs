use anyhow::bail;
use async_trait::async_trait;
use kube::Config;
use kube::config::Kubeconfig;
use log::{debug, info};
use serde::Deserialize;
use serde_yml::from_str;
use std::process::Command;
use std::sync::Arc;

/// Where the controller takes its cluster credentials from.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum KubeconfigSource {
    /// Local kubeconfig if present, in-cluster service account otherwise
    #[default]
    Infer,
    InCluster,
    File {
        path: String,
    },
    Command {
        command: String,
    },
}

impl KubeconfigSource {
    pub async fn load(&self) -> anyhow::Result<Config> {
        match self {
            KubeconfigSource::Infer => {
                info!("Inferring Kubernetes configuration");
                Ok(Config::infer().await?)
            }
            KubeconfigSource::InCluster => from_cluster().load(),
            KubeconfigSource::File { path } => from_file().load(path).await,
            KubeconfigSource::Command { command } => from_command().load(command).await,
        }
    }
}

pub fn from_command() -> Arc<dyn KubeConfigLoader<ConfigSource = String>> {
    Arc::new(ExecutableKubeConfigLoader)
}

pub fn from_file() -> Arc<dyn KubeConfigLoader<ConfigSource = String>> {
    Arc::new(FileKubeConfigLoader)
}

pub fn from_cluster() -> Arc<dyn ParameterLessConfigLoader> {
    Arc::new(InClusterKubeConfigLoader)
}

#[async_trait]
pub trait KubeConfigLoader: Send + Sync {
    type ConfigSource;
    async fn load(&self, source: &Self::ConfigSource) -> anyhow::Result<Config>;
}

pub trait ParameterLessConfigLoader {
    fn load(&self) -> anyhow::Result<Config>;
}

struct ExecutableKubeConfigLoader;

#[async_trait]
impl KubeConfigLoader for ExecutableKubeConfigLoader {
    type ConfigSource = String;

    async fn load(&self, source: &Self::ConfigSource) -> anyhow::Result<Config> {
        info!("Loading kubeconfig from command: {:?}", source);
        let output = Command::new("sh").arg("-c").arg(source).output()?;
        if !output.status.success() {
            bail!("Failed to execute command: {:?}", String::from_utf8_lossy(&output.stderr));
        }
        let kubeconfig_string = String::from_utf8(output.stdout)?;
        parse_kubeconfig(&kubeconfig_string).await
    }
}

struct FileKubeConfigLoader;

#[async_trait]
impl KubeConfigLoader for FileKubeConfigLoader {
    type ConfigSource = String;

    async fn load(&self, source: &Self::ConfigSource) -> anyhow::Result<Config> {
        info!("Loading kubeconfig file: {:?}", source);
        let kubeconfig_string = tokio::fs::read_to_string(source).await?;
        parse_kubeconfig(&kubeconfig_string).await
    }
}

struct InClusterKubeConfigLoader;

impl ParameterLessConfigLoader for InClusterKubeConfigLoader {
    fn load(&self) -> anyhow::Result<Config> {
        info!("Loading in-cluster Kubernetes configuration");
        Ok(Config::incluster()?)
    }
}

async fn parse_kubeconfig(kubeconfig_string: &str) -> anyhow::Result<Config> {
    debug!("Kubeconfig length: {} bytes", kubeconfig_string.len());
    let kubeconfig: Kubeconfig = from_str(kubeconfig_string)?;
    Ok(Config::from_custom_kubeconfig(kubeconfig, &Default::default()).await?)
}
