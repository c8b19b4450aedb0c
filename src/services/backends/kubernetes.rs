pub mod kubeconfig_loader;
pub mod kubernetes_event_source;
pub mod kubernetes_object_store;
pub mod resource_update_handler;
