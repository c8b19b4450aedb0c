use crate::models::reconcile_key::ReconcileKey;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub struct ResourceDetails {
    pub name: String,
    pub namespace: Option<String>,
}

impl ResourceDetails {
    pub fn new(name: String, namespace: Option<String>) -> Self {
        ResourceDetails { name, namespace }
    }
}

impl Display for ResourceDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let namespace = self.namespace.as_deref().unwrap_or("unknown");
        write!(f, "resource name: '{}', namespace '{}'", self.name, namespace)
    }
}

impl From<&ReconcileKey> for ResourceDetails {
    fn from(key: &ReconcileKey) -> Self {
        ResourceDetails {
            name: key.name.clone(),
            namespace: Some(key.namespace.clone()),
        }
    }
}
