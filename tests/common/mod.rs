// Common test utilities

pub mod fake_terminal;
pub mod tracing;
