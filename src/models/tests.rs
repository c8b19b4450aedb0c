use crate::models::car::{Car, CarSpec};
use crate::models::controller_identity::ControllerIdentity;
use crate::models::reconcile_key::ReconcileKey;
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use kube::Resource;
use maplit::btreemap;

#[test]
fn test_car_resource_identity() {
    assert_eq!(Car::kind(&()), "Car");
    assert_eq!(Car::group(&()), "example.example.com");
    assert_eq!(Car::api_version(&()), "example.example.com/v1");
}

#[test]
fn test_key_from_resource() {
    let car = Car {
        metadata: ObjectMeta {
            name: Some("beetle".to_string()),
            namespace: Some("garage".to_string()),
            ..Default::default()
        },
        spec: CarSpec::default(),
    };

    assert_eq!(ReconcileKey::from_resource(&car), Some(ReconcileKey::new("garage", "beetle")));
    assert_eq!(ReconcileKey::from_resource(&ConfigMap::default()), None);
}

#[test]
fn test_key_display() {
    assert_eq!(ReconcileKey::new("garage", "beetle").to_string(), "garage/beetle");
}

#[test]
fn test_car_labels_and_deletion() {
    let mut car = Car::new("beetle", CarSpec::default());
    assert!(car.labels().is_empty());
    assert!(!car.is_deleted());

    car.metadata.labels = Some(btreemap! { "color".to_string() => "red".to_string() });
    car.metadata.deletion_timestamp = Some(Time(Default::default()));

    assert_eq!(car.labels().get("color"), Some(&"red".to_string()));
    assert!(car.is_deleted());
}

#[test]
fn test_identity_matching() {
    let identity = ControllerIdentity::color("red");

    assert_eq!(identity.label_key(), "color");
    assert!(identity.matches("red"));
    assert!(!identity.matches("blue"));
    assert_eq!(identity.to_string(), "color=red");
}
