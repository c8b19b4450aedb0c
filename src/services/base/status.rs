pub mod owner_conflict_details;
pub mod resource_details;


use crate::services::base::status::owner_conflict_details::OwnerConflictDetails;
use crate::services::base::status::resource_details::ResourceDetails;
use kube::core::ErrorResponse;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The error type for object store and reconcile operations.
#[derive(Debug)]
pub enum Status {
    NotFound(ResourceDetails),
    AlreadyExists(ResourceDetails),
    Conflict(String),
    NotOwned(OwnerConflictDetails),
    Unavailable(String),
    Other(kube::Error),
    InvalidObject(anyhow::Error),
    Timeout(String),
    Panicked(String),
}

impl Status {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Status::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Status::Conflict(_) | Status::AlreadyExists(_))
    }
}

impl From<kube::Error> for Status {
    fn from(error: kube::Error) -> Self {
        match error {
            kube::Error::Api(ErrorResponse { code: 404, message, .. }) => {
                Status::NotFound(ResourceDetails::new(message, None))
            }
            kube::Error::Api(ErrorResponse { code: 409, message, .. }) => Status::Conflict(message),
            _ => Status::Other(error),
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::NotFound(details) => write!(f, "Resource not found: {}", details),
            Status::AlreadyExists(details) => write!(f, "Resource already exists: {}", details),
            Status::Conflict(message) => write!(f, "Conflict error occurred: {}", message),
            Status::NotOwned(details) => write!(f, "Owner conflict: {}", details),
            Status::Unavailable(message) => write!(f, "Store unavailable: {}", message),
            Status::Other(e) => write!(f, "An error occurred: {}", e),
            Status::InvalidObject(cause) => write!(f, "Invalid object: {}", cause),
            Status::Timeout(message) => write!(f, "Operation timed out: {}", message),
            Status::Panicked(message) => write!(f, "Reconcile panicked: {}", message),
        }
    }
}

impl Error for Status {}
