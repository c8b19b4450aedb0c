
use crate::configuration::models::controller_settings::ControllerSettings;
use crate::models::car::Car;
use crate::models::controller_identity::ControllerIdentity;
use crate::models::reconcile_key::ReconcileKey;
use crate::services::backends::kubernetes::kubernetes_event_source::KubernetesEventSource;
use crate::services::backends::kubernetes::kubernetes_object_store::KubernetesObjectStore;
use crate::services::backends::kubernetes::resource_update_handler::ResourceUpdateHandler;
use crate::services::backends::kubernetes::resource_update_handler::composed_update_handler::ComposedUpdateHandler;
use crate::services::backends::kubernetes::resource_update_handler::logging_update_handler::LoggingUpdateHandler;
use crate::services::backends::kubernetes::resource_update_handler::owner_queueing_update_handler::OwnerQueueingUpdateHandler;
use crate::services::backends::kubernetes::resource_update_handler::predicate_queueing_update_handler::PredicateQueueingUpdateHandler;
use crate::services::controller::driver::{ControllerDriver, DriverConfig};
use crate::services::controller::label_predicate::LabelPredicate;
use crate::services::controller::reconciler::car_reconciler::CarReconciler;
use crate::services::controller::work_queue::WorkQueue;
use crate::services::observability::log_diagnostics::LogDiagnostics;
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::NamespaceResourceScope;
use kube::runtime::watcher;
use kube::{Api, Client, Resource};
use log::info;
use std::future::Future;
use std::sync::Arc;

/// A Car controller bound to a cluster: watches Cars of one color and the ConfigMaps they own,
/// and reconciles them until shut down.
pub struct CarController {
    client: Client,
    namespace: Option<String>,
    predicate: LabelPredicate,
    driver: ControllerDriver,
}

impl CarController {
    /// Connects to the cluster described by the settings.
    pub async fn start(settings: &ControllerSettings) -> anyhow::Result<Self> {
        let config = settings.kubeconfig.load().await?;
        let client = Client::try_from(config)?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: Client, settings: &ControllerSettings) -> Self {
        let identity = settings.identity();
        let diagnostics = Arc::new(LogDiagnostics::new());
        let reconciler = CarReconciler::new(
            Arc::new(KubernetesObjectStore::<Car>::new(client.clone())),
            Arc::new(KubernetesObjectStore::<ConfigMap>::new(client.clone())),
            identity.clone(),
            diagnostics.clone(),
        );
        let driver = ControllerDriver::new(
            WorkQueue::new(),
            Arc::new(reconciler),
            diagnostics,
            DriverConfig::from(settings),
        );

        CarController {
            client,
            namespace: settings.namespace.clone(),
            predicate: LabelPredicate::new(identity),
            driver,
        }
    }

    pub fn identity(&self) -> &ControllerIdentity {
        self.predicate.identity()
    }

    /// Watches and reconciles until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let queue = self.driver.queue();
        info!(
            "Starting Car controller for {} in {}",
            self.identity(),
            self.namespace.as_deref().unwrap_or("all namespaces")
        );

        let cars = KubernetesEventSource::start(
            self.api::<Car>(),
            watcher::Config::from(&self.predicate),
            car_update_handler(queue.clone(), self.predicate.clone()),
        );
        let config_maps = KubernetesEventSource::start(
            self.api::<ConfigMap>(),
            watcher::Config::default(),
            config_map_update_handler(queue),
        );

        self.driver.run(shutdown).await;

        cars.stop();
        config_maps.stop();
    }

    fn api<R>(&self) -> Api<R>
    where
        R: Resource<Scope = NamespaceResourceScope, DynamicType = ()>,
    {
        match &self.namespace {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        }
    }
}

/// Cars are admitted by the predicate before they reach the queue.
pub fn car_update_handler(
    queue: WorkQueue<ReconcileKey>,
    predicate: LabelPredicate,
) -> Arc<dyn ResourceUpdateHandler<Car>> {
    Arc::new(
        ComposedUpdateHandler::<Car>::new()
            .add_handler(Box::new(LoggingUpdateHandler))
            .add_handler(Box::new(PredicateQueueingUpdateHandler::<Car>::new(queue, Arc::new(predicate)))),
    )
}

/// ConfigMaps requeue the Car that controls them, whatever their labels say.
pub fn config_map_update_handler(queue: WorkQueue<ReconcileKey>) -> Arc<dyn ResourceUpdateHandler<ConfigMap>> {
    Arc::new(
        ComposedUpdateHandler::<ConfigMap>::new()
            .add_handler(Box::new(LoggingUpdateHandler))
            .add_handler(Box::new(OwnerQueueingUpdateHandler::<Car>::new(queue))),
    )
}
