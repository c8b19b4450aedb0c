
use crate::models::controller_identity::ControllerIdentity;
use kube::Resource;
use kube::runtime::watcher::Config;

/// Admission filter applied to watch events before they are queued.
pub trait Predicate<R>: Send + Sync {
    fn admit(&self, object: &R) -> bool;
}

/// Admits objects whose classification label equals the controller identity.
#[derive(Clone, Debug)]
pub struct LabelPredicate {
    identity: ControllerIdentity,
}

impl LabelPredicate {
    pub fn new(identity: ControllerIdentity) -> Self {
        LabelPredicate { identity }
    }

    pub fn identity(&self) -> &ControllerIdentity {
        &self.identity
    }
}

impl<R> Predicate<R> for LabelPredicate
where
    R: Resource,
{
    fn admit(&self, object: &R) -> bool {
        object
            .meta()
            .labels
            .as_ref()
            .and_then(|labels| labels.get(self.identity.label_key()))
            .is_some_and(|value| self.identity.matches(value))
    }
}

impl From<&LabelPredicate> for Config {
    fn from(predicate: &LabelPredicate) -> Self {
        Config {
            label_selector: Some(predicate.identity.to_string()),
            ..Default::default()
        }
    }
}
