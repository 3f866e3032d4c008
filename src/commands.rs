//! Terminal commands and keymaps exposed to the host
//!
//! Command names (`terminal.Toggle`, ...) and keymap names
//! (`terminal-toggle`, ...) are the public contract. The host hands a
//! `Registrar` to `register` at startup and later routes invocations back
//! through `execute`.

use std::collections::HashMap;

use crate::host::{EditorMode, Host};
use crate::services::terminal::{SessionError, TerminalManager, TerminalProvider};

/// A command the terminal manager handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalCommand {
    Toggle,
    Hide,
    Show,
    Repl,
    Destroy,
}

impl TerminalCommand {
    pub const ALL: [TerminalCommand; 5] = [
        TerminalCommand::Toggle,
        TerminalCommand::Hide,
        TerminalCommand::Show,
        TerminalCommand::Repl,
        TerminalCommand::Destroy,
    ];

    /// Name in the host's command palette
    pub fn name(self) -> &'static str {
        match self {
            TerminalCommand::Toggle => "terminal.Toggle",
            TerminalCommand::Hide => "terminal.Hide",
            TerminalCommand::Show => "terminal.Show",
            TerminalCommand::Repl => "terminal.REPL",
            TerminalCommand::Destroy => "terminal.Destroy",
        }
    }

    /// Keymap name, for the commands that get a normal-mode mapping
    pub fn keymap_name(self) -> Option<&'static str> {
        match self {
            TerminalCommand::Toggle => Some("terminal-toggle"),
            TerminalCommand::Hide => Some("terminal-hide"),
            TerminalCommand::Show => Some("terminal-show"),
            TerminalCommand::Repl | TerminalCommand::Destroy => None,
        }
    }

    pub fn from_keymap_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.keymap_name() == Some(name))
    }
}

impl std::fmt::Display for TerminalCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Host capability for registering commands and keymaps
pub trait Registrar {
    fn register_command(&mut self, name: &'static str, command: TerminalCommand);

    fn register_keymap(&mut self, modes: &[EditorMode], name: &'static str, command: TerminalCommand);
}

/// Register every terminal command, and the keymaps in normal mode
pub fn register<R: Registrar + ?Sized>(registrar: &mut R) {
    for command in TerminalCommand::ALL {
        registrar.register_command(command.name(), command);
        if let Some(keymap) = command.keymap_name() {
            registrar.register_keymap(&[EditorMode::Normal], keymap, command);
        }
    }
}

/// Run `command` against the manager
///
/// Failures have already been shown to the user by the manager; the error
/// is returned for logging.
pub async fn execute<P, H>(
    manager: &mut TerminalManager<P, H>,
    command: TerminalCommand,
) -> Result<(), SessionError>
where
    P: TerminalProvider,
    H: Host,
{
    tracing::debug!("Executing {}", command);
    match command {
        TerminalCommand::Toggle => manager.toggle().await,
        TerminalCommand::Hide => manager.hide().await,
        TerminalCommand::Show => manager.show().await,
        TerminalCommand::Repl => manager.start_repl().await.map(|_| ()),
        TerminalCommand::Destroy => {
            manager.destroy();
            Ok(())
        }
    }
}

/// Lookup table built from registrations
///
/// Commands resolve in every mode. Keymaps and key sequences bound to them
/// resolve only in the modes the keymap was registered for.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: HashMap<String, TerminalCommand>,
    keymaps: HashMap<String, (Vec<EditorMode>, TerminalCommand)>,
    /// Key sequence -> keymap name
    keys: HashMap<String, String>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with every terminal command registered
    pub fn with_terminal_commands() -> Self {
        let mut table = Self::new();
        register(&mut table);
        table
    }

    /// Bind `keys` to a registered keymap. Returns false for unknown keymaps.
    pub fn bind_keys(&mut self, keys: impl Into<String>, keymap: &str) -> bool {
        if !self.keymaps.contains_key(keymap) {
            return false;
        }
        self.keys.insert(keys.into(), keymap.to_string());
        true
    }

    pub fn command(&self, name: &str) -> Option<TerminalCommand> {
        self.commands.get(name).copied()
    }

    /// Resolve a keymap name or bound key sequence for `mode`
    pub fn keymap(&self, name_or_keys: &str, mode: EditorMode) -> Option<TerminalCommand> {
        let name = self
            .keys
            .get(name_or_keys)
            .map(String::as_str)
            .unwrap_or(name_or_keys);
        self.keymaps
            .get(name)
            .filter(|(modes, _)| modes.contains(&mode))
            .map(|(_, command)| *command)
    }

    /// Resolve input typed in `mode`: command names first, then keymaps
    pub fn resolve(&self, input: &str, mode: EditorMode) -> Option<TerminalCommand> {
        self.command(input).or_else(|| self.keymap(input, mode))
    }

    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Registrar for CommandTable {
    fn register_command(&mut self, name: &'static str, command: TerminalCommand) {
        self.commands.insert(name.to_string(), command);
    }

    fn register_keymap(&mut self, modes: &[EditorMode], name: &'static str, command: TerminalCommand) {
        self.keymaps
            .insert(name.to_string(), (modes.to_vec(), command));
    }
}
