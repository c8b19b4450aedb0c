pub mod diagnostics;
pub mod log_diagnostics;
