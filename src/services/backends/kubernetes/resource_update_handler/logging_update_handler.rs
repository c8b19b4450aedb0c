use crate::services::backends::kubernetes::resource_update_handler::ResourceUpdateHandler;
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Resource;
use kube::runtime::watcher;
use log::{debug, warn};
use std::fmt::Debug;

pub struct LoggingUpdateHandler;

#[async_trait]
impl<T> ResourceUpdateHandler<T> for LoggingUpdateHandler
where
    T: Resource<DynamicType = ()> + Debug + Send + Sync + 'static,
{
    async fn handle_update(&self, event: &Result<T, watcher::Error>) -> () {
        match event {
            Err(e) => warn!("Error processing {} watch event: {}", T::kind(&()), e),
            Ok(object) => {
                let metadata: &ObjectMeta = object.meta();
                debug!(
                    "Received {} event for resource: {:?} in namespace {:?}",
                    T::kind(&()),
                    metadata.name,
                    metadata.namespace
                );
            }
        }
    }
}
