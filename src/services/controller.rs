pub mod backoff;
pub mod car_controller;
pub mod driver;
pub mod label_predicate;
pub mod owner_reference;
pub mod reconciler;
pub mod work_queue;
