use crate::models::reconcile_key::ReconcileKey;
use crate::services::base::object_store::ObjectStore;
use crate::services::base::status::Status;
use crate::services::base::status::resource_details::ResourceDetails;
use anyhow::anyhow;
use async_trait::async_trait;
use k8s_openapi::NamespaceResourceScope;
use kube::api::PostParams;
use kube::core::ErrorResponse;
use kube::{Api, Client, Resource};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Object store backed by the Kubernetes API server. Reads always go to the server.
pub struct KubernetesObjectStore<R> {
    client: Client,
    _marker: PhantomData<fn() -> R>,
}

impl<R> KubernetesObjectStore<R>
where
    R: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static,
{
    pub fn new(client: Client) -> Self {
        KubernetesObjectStore {
            client,
            _marker: PhantomData,
        }
    }

    fn api(&self, namespace: &str) -> Api<R> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn key_of(object: &R) -> Result<ReconcileKey, Status> {
        ReconcileKey::from_resource(object).ok_or_else(|| {
            Status::InvalidObject(anyhow!("{} name and namespace are required", R::kind(&())))
        })
    }
}

#[async_trait]
impl<R> ObjectStore<R> for KubernetesObjectStore<R>
where
    R: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static,
{
    async fn get(&self, key: &ReconcileKey) -> Result<R, Status> {
        self.api(&key.namespace)
            .get_opt(&key.name)
            .await?
            .ok_or_else(|| Status::NotFound(ResourceDetails::from(key)))
    }

    async fn create(&self, object: R) -> Result<R, Status> {
        let key = Self::key_of(&object)?;
        debug!("Creating {} {}", R::kind(&()), key);
        self.api(&key.namespace)
            .create(&PostParams::default(), &object)
            .await
            .map_err(|e| match e {
                kube::Error::Api(ErrorResponse { code: 409, .. }) => Status::AlreadyExists(ResourceDetails::from(&key)),
                other => Status::from(other),
            })
    }

    async fn update(&self, object: R) -> Result<R, Status> {
        let key = Self::key_of(&object)?;
        debug!("Replacing {} {}", R::kind(&()), key);
        let replaced = self
            .api(&key.namespace)
            .replace(&key.name, &PostParams::default(), &object)
            .await?;
        Ok(replaced)
    }
}
