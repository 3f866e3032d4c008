//! Terminal panel service
//!
//! This module provides the single toggleable terminal panel:
//! - `TerminalManager` owns the one live handle and its visibility
//! - `provider` defines the seam to whatever actually spawns terminals
//! - `repl` maps file types to interpreter commands
//! - `pty` (runtime only) is a provider backed by `portable-pty`

mod manager;
pub mod provider;
pub mod repl;

#[cfg(feature = "runtime")]
pub mod pty;

pub use manager::{SessionError, TerminalManager, DEFAULT_TERMINAL_NAME};
pub use provider::{TerminalHandle, TerminalProvider};
pub use repl::ReplLanguage;
