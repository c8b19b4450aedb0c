use std::fmt::{Display, Formatter};

/// The classification a controller instance is responsible for, e.g. `color=red`.
/// Fixed at construction and shared by the predicate and the reconciler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControllerIdentity {
    label_key: String,
    value: String,
}

impl ControllerIdentity {
    pub const DEFAULT_LABEL_KEY: &'static str = "color";

    pub fn new(label_key: &str, value: &str) -> Self {
        ControllerIdentity {
            label_key: label_key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn color(value: &str) -> Self {
        Self::new(Self::DEFAULT_LABEL_KEY, value)
    }

    pub fn label_key(&self) -> &str {
        &self.label_key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn matches(&self, value: &str) -> bool {
        self.value == value
    }
}

impl Display for ControllerIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.label_key, self.value)
    }
}
