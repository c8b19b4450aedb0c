use crate::models::reconcile_key::ReconcileKey;
use crate::services::base::status::Status;
use crate::services::observability::diagnostics::Diagnostics;
use std::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticRecord {
    MissingAttribute { key: ReconcileKey, attribute: String },
    IdentityMismatch { key: ReconcileKey, expected: String, actual: String },
    ReconcileError { key: ReconcileKey, message: String },
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    records: Mutex<Vec<DiagnosticRecord>>,
}

impl RecordingDiagnostics {
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn count_errors(&self) -> usize {
        self.records()
            .iter()
            .filter(|record| matches!(record, DiagnosticRecord::ReconcileError { .. }))
            .count()
    }

    fn record(&self, record: DiagnosticRecord) {
        self.records.lock().unwrap().push(record);
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn missing_attribute(&self, key: &ReconcileKey, attribute: &str) {
        self.record(DiagnosticRecord::MissingAttribute {
            key: key.clone(),
            attribute: attribute.to_string(),
        });
    }

    fn identity_mismatch(&self, key: &ReconcileKey, expected: &str, actual: &str) {
        self.record(DiagnosticRecord::IdentityMismatch {
            key: key.clone(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }

    fn reconcile_error(&self, key: &ReconcileKey, error: &Status) {
        self.record(DiagnosticRecord::ReconcileError {
            key: key.clone(),
            message: error.to_string(),
        });
    }
}
