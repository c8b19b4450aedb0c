
use crate::models::controller_identity::ControllerIdentity;
use crate::services::backends::kubernetes::kubeconfig_loader::KubeconfigSource;
use crate::services::controller::driver::DriverConfig;
use duration_string::DurationString;
use serde::Deserialize;

/// Settings of a single controller instance.
#[derive(Debug, Deserialize)]
pub struct ControllerSettings {
    /// The classification value this instance is responsible for
    pub color: String,

    #[serde(default = "default_label_key")]
    pub label_key: String,

    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_reconcile_timeout")]
    pub reconcile_timeout: DurationString,

    #[serde(default = "default_backoff_base")]
    pub backoff_base: DurationString,

    #[serde(default = "default_backoff_max")]
    pub backoff_max: DurationString,

    /// Namespace to watch, all namespaces if not set
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub kubeconfig: KubeconfigSource,
}

impl ControllerSettings {
    pub fn identity(&self) -> ControllerIdentity {
        ControllerIdentity::new(&self.label_key, &self.color)
    }
}

impl From<&ControllerSettings> for DriverConfig {
    fn from(settings: &ControllerSettings) -> Self {
        DriverConfig {
            workers: settings.workers,
            reconcile_timeout: settings.reconcile_timeout.into(),
            backoff_base: settings.backoff_base.into(),
            backoff_max: settings.backoff_max.into(),
        }
    }
}

fn default_label_key() -> String {
    ControllerIdentity::DEFAULT_LABEL_KEY.to_string()
}

fn default_workers() -> usize {
    DriverConfig::default().workers
}

fn default_reconcile_timeout() -> DurationString {
    DurationString::new(DriverConfig::default().reconcile_timeout)
}

fn default_backoff_base() -> DurationString {
    DurationString::new(DriverConfig::default().backoff_base)
}

fn default_backoff_max() -> DurationString {
    DurationString::new(DriverConfig::default().backoff_max)
}
