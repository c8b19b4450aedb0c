use kube::Resource;
use std::fmt::{Display, Formatter};

/// Unit of work carried by the queue. Never holds an object snapshot, so every
/// reconcile starts from a fresh read.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReconcileKey {
    pub namespace: String,
    pub name: String,
}

impl ReconcileKey {
    pub fn new(namespace: &str, name: &str) -> Self {
        ReconcileKey {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    /// Builds the key of a namespaced object, `None` if it has no name or namespace.
    pub fn from_resource<R>(resource: &R) -> Option<Self>
    where
        R: Resource,
    {
        let metadata = resource.meta();
        match (&metadata.namespace, &metadata.name) {
            (Some(namespace), Some(name)) => Some(ReconcileKey::new(namespace, name)),
            _ => None,
        }
    }
}

impl Display for ReconcileKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
