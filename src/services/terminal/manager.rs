//! Terminal Manager - owns the single terminal panel
//!
//! The manager holds at most one terminal handle and whether its panel is
//! currently shown. Handles are created lazily through the provider the
//! first time a command needs one, and are replaced wholesale when a REPL
//! is started.
//!
//! Handlers take `&mut self`, so the host cannot re-enter the manager while
//! one is suspended on terminal creation or a file type query.

use super::provider::{TerminalHandle, TerminalProvider};
use super::repl::ReplLanguage;
use crate::host::{Host, MessageLevel};

/// Name given to the terminal panel unless configured otherwise
pub const DEFAULT_TERMINAL_NAME: &str = "coc-terminal";

/// Failures surfaced to the user by terminal commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The provider returned no handle
    #[error("Create terminal failed")]
    TerminalCreationFailed,

    /// The current file type has no REPL mapping
    #[error("No REPL support for {0} yet")]
    UnsupportedReplLanguage(String),
}

impl SessionError {
    /// Level the error is reported at
    pub fn level(&self) -> MessageLevel {
        match self {
            SessionError::TerminalCreationFailed => MessageLevel::Error,
            SessionError::UnsupportedReplLanguage(_) => MessageLevel::Warning,
        }
    }
}

/// Manager for the terminal panel
pub struct TerminalManager<P: TerminalProvider, H: Host> {
    provider: P,
    host: H,
    /// Name passed to the provider for new panels
    name: String,
    terminal: Option<P::Handle>,
    /// Invariant: only true while `terminal` is `Some`
    visible: bool,
}

impl<P: TerminalProvider, H: Host> TerminalManager<P, H> {
    /// Create a manager with no terminal
    pub fn new(provider: P, host: H) -> Self {
        Self {
            provider,
            host,
            name: DEFAULT_TERMINAL_NAME.to_string(),
            terminal: None,
            visible: false,
        }
    }

    /// Use `name` for panels created from now on
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether the panel is currently shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a terminal handle exists
    pub fn has_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn terminal(&self) -> Option<&P::Handle> {
        self.terminal.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Show the panel, creating the terminal if needed
    pub async fn show(&mut self) -> Result<(), SessionError> {
        self.ensure_terminal().await?;

        match self.terminal.as_mut() {
            Some(terminal) if !self.visible => {
                terminal.show();
                self.visible = true;
                tracing::debug!("Terminal panel shown");
            }
            _ => {}
        }
        Ok(())
    }

    /// Hide the panel if it is shown
    pub async fn hide(&mut self) -> Result<(), SessionError> {
        match self.terminal.as_mut() {
            Some(terminal) if self.visible => {
                terminal.hide();
                self.visible = false;
                tracing::debug!("Terminal panel hidden");
            }
            _ => {}
        }
        Ok(())
    }

    /// Flip panel visibility, creating the terminal (shown) if needed
    pub async fn toggle(&mut self) -> Result<(), SessionError> {
        self.ensure_terminal().await?;

        if let Some(terminal) = self.terminal.as_mut() {
            if self.visible {
                terminal.hide();
            } else {
                terminal.show();
            }
            self.visible = !self.visible;
            tracing::debug!("Terminal panel toggled (visible={})", self.visible);
        }
        Ok(())
    }

    /// Dispose the terminal if there is one
    pub fn destroy(&mut self) {
        if let Some(terminal) = self.terminal.take() {
            terminal.dispose();
            tracing::info!("Disposed terminal '{}'", self.name);
        }
        self.visible = false;
    }

    /// Start a REPL for the current file type in a fresh terminal
    ///
    /// Any existing terminal is disposed first, shown or not. If creating the
    /// replacement fails the manager is left without a terminal.
    pub async fn start_repl(&mut self) -> Result<ReplLanguage, SessionError> {
        let file_type = self.host.file_type().await;
        let Some(language) = ReplLanguage::from_file_type(&file_type) else {
            return Err(self.report(SessionError::UnsupportedReplLanguage(file_type)));
        };

        self.destroy();

        let mut terminal = self.create_terminal().await?;
        terminal.show();
        terminal.send_text(language.command(), true);
        self.terminal = Some(terminal);
        self.visible = true;

        self.host.enter_insert_mode().await;
        tracing::info!("Started {} REPL with '{}'", language, language.command());
        Ok(language)
    }

    /// Type a line into the terminal. Returns false if there is no terminal.
    pub fn send_text(&mut self, text: &str, execute: bool) -> bool {
        match self.terminal.as_mut() {
            Some(terminal) => {
                terminal.send_text(text, execute);
                true
            }
            None => false,
        }
    }

    async fn ensure_terminal(&mut self) -> Result<(), SessionError> {
        if self.terminal.is_none() {
            let terminal = self.create_terminal().await?;
            self.terminal = Some(terminal);
            self.visible = false;
        }
        Ok(())
    }

    async fn create_terminal(&mut self) -> Result<P::Handle, SessionError> {
        match self.provider.create_terminal(&self.name).await {
            Some(terminal) => {
                tracing::info!("Created terminal '{}'", self.name);
                Ok(terminal)
            }
            None => Err(self.report(SessionError::TerminalCreationFailed)),
        }
    }

    /// Show `err` to the user and hand it back
    fn report(&mut self, err: SessionError) -> SessionError {
        tracing::warn!("Terminal command failed: {}", err);
        self.host.show_message(&err.to_string(), err.level());
        err
    }
}
