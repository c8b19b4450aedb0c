use crate::services::backends::kubernetes::resource_update_handler::ResourceUpdateHandler;
use futures::StreamExt;
use kube::runtime::{WatchStreamExt, watcher};
use kube::{Api, Resource};
use log::debug;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A background watch over one object kind that hands every touched object to a handler.
pub struct KubernetesEventSource {
    kind: String,
    handle: JoinHandle<()>,
}

impl KubernetesEventSource {
    /// Spawns the watch on the current tokio runtime.
    pub fn start<R>(api: Api<R>, config: watcher::Config, update_handler: Arc<dyn ResourceUpdateHandler<R>>) -> Self
    where
        R: Resource<DynamicType = ()> + Clone + Debug + DeserializeOwned + Send + Sync + 'static,
    {
        let kind = R::kind(&()).to_string();
        debug!("Starting watch for {} with {:?}", kind, config.label_selector);

        let stream = watcher(api, config)
            .default_backoff()
            .touched_objects()
            .for_each(move |r| {
                let update_handler = update_handler.clone();
                async move {
                    update_handler.handle_update(&r).await;
                }
            });

        KubernetesEventSource {
            kind,
            handle: tokio::spawn(stream),
        }
    }

    pub fn stop(&self) {
        self.handle.abort();
        debug!("Watch for {} stopped", self.kind);
    }
}
