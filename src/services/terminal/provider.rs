//! Seam between the terminal manager and whatever spawns terminal panels
//!
//! The manager never creates processes itself. It asks a `TerminalProvider`
//! for a handle and drives the panel through the `TerminalHandle` methods.

use async_trait::async_trait;

/// A created terminal panel
pub trait TerminalHandle: Send {
    /// Reveal the panel
    fn show(&mut self);

    /// Hide the panel; the process keeps running
    fn hide(&mut self);

    /// Close the panel and terminate its process
    fn dispose(self);

    /// Type `text` into the terminal, pressing enter when `execute` is set
    fn send_text(&mut self, text: &str, execute: bool);
}

/// Factory for terminal panels
#[async_trait]
pub trait TerminalProvider: Send {
    type Handle: TerminalHandle;

    /// Create a new terminal panel named `name`
    ///
    /// Returns `None` when the panel could not be created. Providers log the
    /// underlying reason; the caller only reports that creation failed.
    async fn create_terminal(&mut self, name: &str) -> Option<Self::Handle>;
}
