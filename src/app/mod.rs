//! Line-oriented command host
//!
//! Reads commands from stdin, drives a `TerminalManager` backed by real
//! PTYs, and copies the visible panel's output to stdout. Messages go to
//! stderr.

pub mod input;

use anyhow::Context;
use async_trait::async_trait;
use crossterm::style::Stylize;
use std::io::Write;
use std::ops::ControlFlow;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::{self, CommandTable};
use crate::config::Config;
use crate::host::{EditorMode, Host, MessageLevel};
use crate::services::terminal::pty::{PanelEvent, PtyProvider};
use crate::services::terminal::TerminalManager;
use input::{parse_line, Input};

type PtyManager = TerminalManager<PtyProvider, CliHost>;

/// Host state for the command-line front end
pub struct CliHost {
    file_type: String,
    mode: EditorMode,
    /// Where user-visible messages are printed
    messages: Box<dyn Write + Send>,
}

impl CliHost {
    /// Host printing messages to stderr
    pub fn new(file_type: impl Into<String>) -> Self {
        Self::with_message_sink(file_type, Box::new(std::io::stderr()))
    }

    pub fn with_message_sink(file_type: impl Into<String>, messages: Box<dyn Write + Send>) -> Self {
        Self {
            file_type: file_type.into(),
            mode: EditorMode::Normal,
            messages,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        if self.mode != mode {
            tracing::debug!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn set_file_type(&mut self, file_type: impl Into<String>) {
        self.file_type = file_type.into();
    }
}

#[async_trait]
impl Host for CliHost {
    async fn file_type(&mut self) -> String {
        self.file_type.clone()
    }

    async fn enter_insert_mode(&mut self) {
        self.set_mode(EditorMode::Insert);
    }

    fn show_message(&mut self, text: &str, level: MessageLevel) {
        let written = match level {
            MessageLevel::Error => writeln!(self.messages, "{}", text.red()),
            MessageLevel::Warning => writeln!(self.messages, "{}", text.yellow()),
            MessageLevel::Info => writeln!(self.messages, "{}", text.dark_grey()),
        };
        if let Err(e) = written {
            tracing::warn!("Failed to show message '{}': {}", text, e);
        }
    }
}

/// Run the host until `:quit` or end of input
pub async fn run(config: Config, file_type: Option<String>) -> anyhow::Result<()> {
    let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel();

    let provider = PtyProvider::new(config.terminal.clone(), events_tx);
    let host = CliHost::new(file_type.unwrap_or_default());
    let mut manager = TerminalManager::new(provider, host).with_name(config.terminal.name.clone());

    let mut table = CommandTable::with_terminal_commands();
    for binding in &config.keys {
        if !table.bind_keys(binding.keys.clone(), &binding.action) {
            tracing::warn!("Ignoring binding for unknown keymap '{}'", binding.action);
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                let input = parse_line(&line, manager.host().mode(), &table);
                if handle_input(&mut manager, input).await.is_break() {
                    break;
                }
            }
            Some(event) = events_rx.recv() => {
                handle_event(&mut manager, event, &mut stdout)?;
            }
        }
    }

    manager.destroy();
    Ok(())
}

async fn handle_input(manager: &mut PtyManager, input: Input) -> ControlFlow<()> {
    match input {
        Input::Command(command) => {
            if let Err(e) = commands::execute(manager, command).await {
                tracing::debug!("{} failed: {}", command, e);
            }
            if !manager.is_visible() {
                manager.host_mut().set_mode(EditorMode::Normal);
            }
        }
        Input::SetFileType(file_type) => {
            manager.host_mut().set_file_type(file_type);
        }
        Input::StartInsert => {
            if manager.is_visible() {
                manager.host_mut().set_mode(EditorMode::Insert);
            } else {
                manager
                    .host_mut()
                    .show_message("No visible terminal", MessageLevel::Warning);
            }
        }
        Input::StopInsert => manager.host_mut().set_mode(EditorMode::Normal),
        Input::Text(text) => {
            if !manager.is_visible() || !manager.send_text(&text, true) {
                manager
                    .host_mut()
                    .show_message("No visible terminal", MessageLevel::Warning);
            }
        }
        Input::Unknown(text) => {
            manager
                .host_mut()
                .show_message(&format!("Not an editor command: {}", text), MessageLevel::Error);
        }
        Input::Empty => {}
        Input::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

fn handle_event(
    manager: &mut PtyManager,
    event: PanelEvent,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let current = manager.terminal().map(|t| t.id());
    match event {
        PanelEvent::Output { terminal_id, data } => match manager.terminal() {
            // Output from a disposed terminal is dropped
            Some(terminal) if Some(terminal_id) == current => {
                if manager.is_visible() {
                    out.write_all(&data).context("Failed to write terminal output")?;
                    out.flush().context("Failed to write terminal output")?;
                } else {
                    // Queued before a hide; keep it for the next show
                    terminal.requeue(&data);
                }
            }
            _ => {}
        },
        PanelEvent::Exited { terminal_id } => {
            if current == Some(terminal_id) {
                tracing::info!("{} exited", terminal_id);
                manager.destroy();
                let host = manager.host_mut();
                host.set_mode(EditorMode::Normal);
                host.show_message("Terminal process exited", MessageLevel::Info);
            }
        }
    }
    Ok(())
}
