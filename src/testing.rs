pub mod in_memory_controller_context;
pub mod recording_diagnostics;
