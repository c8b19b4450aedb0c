
use crate::models::car::Car;
use crate::models::controller_identity::ControllerIdentity;
use crate::models::reconcile_key::ReconcileKey;
use crate::services::base::object_store::ObjectStore;
use crate::services::base::status::Status;
use crate::services::controller::owner_reference::{controller_reference_to, set_controller_reference};
use crate::services::controller::reconciler::projection::{LabelProjection, Projection};
use crate::services::controller::reconciler::{Outcome, Reconciler};
use crate::services::observability::diagnostics::Diagnostics;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use log::{debug, info};
use std::collections::BTreeMap;
use std::sync::Arc;

/// What the upsert of the owned ConfigMap ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationResult {
    Created,
    Updated,
    Unchanged,
}

/// Drives the ConfigMap named after a Car towards the projection of the Car's labels.
pub struct CarReconciler {
    cars: Arc<dyn ObjectStore<Car>>,
    config_maps: Arc<dyn ObjectStore<ConfigMap>>,
    identity: ControllerIdentity,
    projection: Arc<dyn Projection>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl CarReconciler {
    pub fn new(
        cars: Arc<dyn ObjectStore<Car>>,
        config_maps: Arc<dyn ObjectStore<ConfigMap>>,
        identity: ControllerIdentity,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        CarReconciler {
            cars,
            config_maps,
            identity,
            projection: Arc::new(LabelProjection),
            diagnostics,
        }
    }

    pub fn with_projection(mut self, projection: Arc<dyn Projection>) -> Self {
        self.projection = projection;
        self
    }

    async fn try_reconcile(&self, key: &ReconcileKey) -> Result<Outcome, Status> {
        let car = match self.cars.get(key).await {
            Ok(car) => car,
            Err(e) if e.is_not_found() => {
                // The owned ConfigMap is garbage-collected by the store through its owner reference
                debug!("Car {} no longer exists", key);
                return Ok(Outcome::Done);
            }
            Err(e) => return Err(e),
        };
        if car.is_deleted() {
            debug!("Car {} is being deleted", key);
            return Ok(Outcome::Done);
        }

        let labels = car.labels();
        let Some(color) = labels.get(self.identity.label_key()) else {
            self.diagnostics.missing_attribute(key, self.identity.label_key());
            return Ok(Outcome::Done);
        };
        info!(
            key:% = key,
            car_color = color.as_str(),
            controller_color = self.identity.value();
            "reconciling car");
        if !self.identity.matches(color) {
            self.diagnostics.identity_mismatch(key, self.identity.value(), color);
            return Ok(Outcome::Done);
        }

        let data = self.projection.project(&labels);
        let owner_reference = controller_reference_to(&car)?;
        let result = self.upsert_config_map(key, owner_reference, data).await?;
        debug!("ConfigMap {} reconciled: {:?}", key, result);
        Ok(Outcome::Done)
    }

    async fn upsert_config_map(
        &self,
        key: &ReconcileKey,
        owner_reference: OwnerReference,
        data: BTreeMap<String, String>,
    ) -> Result<OperationResult, Status> {
        let current = match self.config_maps.get(key).await {
            Ok(current) => current,
            Err(e) if e.is_not_found() => {
                let mut config_map = ConfigMap {
                    metadata: ObjectMeta {
                        name: Some(key.name.clone()),
                        namespace: Some(key.namespace.clone()),
                        ..Default::default()
                    },
                    data: Some(data),
                    ..Default::default()
                };
                set_controller_reference(&mut config_map, owner_reference)?;
                self.config_maps.create(config_map).await?;
                return Ok(OperationResult::Created);
            }
            Err(e) => return Err(e),
        };

        let mut desired = current.clone();
        let owner_changed = set_controller_reference(&mut desired, owner_reference)?;
        let data_changed = current.data.unwrap_or_default() != data;
        if !owner_changed && !data_changed {
            return Ok(OperationResult::Unchanged);
        }
        desired.data = Some(data);
        // Carries the resource version that was read, so a concurrent write surfaces as a conflict
        self.config_maps.update(desired).await?;
        Ok(OperationResult::Updated)
    }
}

#[async_trait]
impl Reconciler for CarReconciler {
    async fn reconcile(&self, key: &ReconcileKey) -> Outcome {
        match self.try_reconcile(key).await {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Fail(e),
        }
    }
}
