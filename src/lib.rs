// Terminal panel library - exposes all core modules for testing

// Core types and config are always available
pub mod commands;
pub mod config;
pub mod host;

// Runtime-only modules (require the "runtime" feature)
#[cfg(feature = "runtime")]
pub mod app;
#[cfg(feature = "runtime")]
pub mod config_io;

// Modules with internal gating (pure types ungated, runtime code gated internally)
pub mod services;
