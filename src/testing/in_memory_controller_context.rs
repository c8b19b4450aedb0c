use crate::models::car::{Car, CarSpec};
use crate::models::controller_identity::ControllerIdentity;
use crate::models::reconcile_key::ReconcileKey;
use crate::services::backends::memory::InMemoryObjectStore;
use crate::services::base::object_store::ObjectStore;
use crate::services::controller::reconciler::car_reconciler::CarReconciler;
use crate::testing::recording_diagnostics::RecordingDiagnostics;
use k8s_openapi::api::core::v1::ConfigMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use test_context::AsyncTestContext;

pub const TEST_NAMESPACE: &str = "default";
pub const TEST_COLOR: &str = "red";

/// A red car controller over in-memory stores, with cascade deletion from cars to config maps.
pub struct InMemoryControllerContext {
    pub cars: Arc<InMemoryObjectStore<Car>>,
    pub config_maps: Arc<InMemoryObjectStore<ConfigMap>>,
    pub diagnostics: Arc<RecordingDiagnostics>,
    pub reconciler: Arc<CarReconciler>,
}

impl InMemoryControllerContext {
    pub fn key(name: &str) -> ReconcileKey {
        ReconcileKey::new(TEST_NAMESPACE, name)
    }

    pub async fn create_car(&self, name: &str, labels: BTreeMap<String, String>) -> Car {
        let mut car = Car::new(name, CarSpec::default());
        car.metadata.namespace = Some(TEST_NAMESPACE.to_string());
        car.metadata.labels = Some(labels);
        self.cars.create(car).await.expect("Failed to create car")
    }

    pub async fn relabel_car(&self, name: &str, labels: BTreeMap<String, String>) -> Car {
        let mut car = self.cars.get(&Self::key(name)).await.expect("Car not found");
        car.metadata.labels = Some(labels);
        self.cars.update(car).await.expect("Failed to update car")
    }

    pub async fn config_map(&self, name: &str) -> Option<ConfigMap> {
        self.config_maps.get(&Self::key(name)).await.ok()
    }
}

impl AsyncTestContext for InMemoryControllerContext {
    async fn setup() -> Self {
        let config_maps = Arc::new(InMemoryObjectStore::<ConfigMap>::new());
        let cars = Arc::new(InMemoryObjectStore::<Car>::new().with_dependent(config_maps.clone()));
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let reconciler = CarReconciler::new(
            cars.clone(),
            config_maps.clone(),
            ControllerIdentity::color(TEST_COLOR),
            diagnostics.clone(),
        );

        InMemoryControllerContext {
            cars,
            config_maps,
            diagnostics,
            reconciler: Arc::new(reconciler),
        }
    }
}
