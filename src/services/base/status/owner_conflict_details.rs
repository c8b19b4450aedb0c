use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub struct OwnerConflictDetails {
    pub object_name: String,
    pub object_namespace: Option<String>,
    pub current_owner: Option<String>,
}

impl OwnerConflictDetails {
    pub fn new(object_name: String, object_namespace: Option<String>) -> Self {
        OwnerConflictDetails {
            object_name,
            object_namespace,
            current_owner: None,
        }
    }

    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.current_owner = owner;
        self
    }
}

impl Display for OwnerConflictDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "object '{}/{}' is already controlled by '{}'",
            self.object_namespace.as_deref().unwrap_or("unknown"),
            self.object_name,
            self.current_owner.as_deref().unwrap_or("unknown")
        )
    }
}
