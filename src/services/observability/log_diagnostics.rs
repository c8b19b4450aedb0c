use crate::models::reconcile_key::ReconcileKey;
use crate::services::base::status::Status;
use crate::services::observability::diagnostics::Diagnostics;

pub struct LogDiagnostics;

impl LogDiagnostics {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for LogDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics for LogDiagnostics {
    fn missing_attribute(&self, key: &ReconcileKey, attribute: &str) {
        log::info!(
            // Marks controller diagnostics for filtering in log aggregation systems
            log_type = "diagnostic",

            key:% = key,
            severity = "info",
            attribute = attribute;

            "missing {}", attribute);
    }

    fn identity_mismatch(&self, key: &ReconcileKey, expected: &str, actual: &str) {
        log::error!(
            log_type = "diagnostic",

            key:% = key,
            severity = "error",
            expected = expected,
            actual = actual;

            "!!!object {} does not match controller {}!!!", actual, expected);
    }

    fn reconcile_error(&self, key: &ReconcileKey, error: &Status) {
        log::error!(
            log_type = "diagnostic",

            key:% = key,
            severity = "error",
            error:% = error;

            "Failed to reconcile {}: {}", key, error);
    }
}
