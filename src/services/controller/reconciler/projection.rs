use std::collections::BTreeMap;

/// Pure transform from an owner's labels to the data of the owned ConfigMap.
pub trait Projection: Send + Sync {
    fn project(&self, labels: &BTreeMap<String, String>) -> BTreeMap<String, String>;
}

/// Copies every label verbatim.
pub struct LabelProjection;

impl Projection for LabelProjection {
    fn project(&self, labels: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        labels.clone()
    }
}
