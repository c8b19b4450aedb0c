use crate::models::reconcile_key::ReconcileKey;
use crate::services::base::status::Status;

/// Operator-facing sink for the anomalies a reconcile can observe.
pub trait Diagnostics: Send + Sync {
    /// The object does not carry the classification label at all
    fn missing_attribute(&self, key: &ReconcileKey, attribute: &str);

    /// The object carries the classification label with a value this controller does not own
    fn identity_mismatch(&self, key: &ReconcileKey, expected: &str, actual: &str);

    /// A reconcile failed and will be retried
    fn reconcile_error(&self, key: &ReconcileKey, error: &Status);
}
