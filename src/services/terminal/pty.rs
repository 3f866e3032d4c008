//! PTY-backed terminal provider
//!
//! Each handle owns a shell running in a pseudo-terminal:
//! - A reader thread pumps PTY output to the host as `PanelEvent`s
//! - A writer thread owns the PTY master and the child process
//! - Output produced while the panel is hidden is buffered and flushed on show

use super::provider::{TerminalHandle, TerminalProvider};
use crate::config::TerminalConfig;
use async_trait::async_trait;
use portable_pty::{native_pty_system, CommandBuilder, PtySize};
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use tokio::sync::mpsc::UnboundedSender;

/// Unique identifier for a terminal created by a `PtyProvider`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalId(pub usize);

impl std::fmt::Display for TerminalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Terminal-{}", self.0)
    }
}

/// Notifications sent from terminal threads to the host loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Output to draw in the visible panel
    Output { terminal_id: TerminalId, data: Vec<u8> },
    /// The terminal's process exited
    Exited { terminal_id: TerminalId },
}

/// Messages sent to the writer thread
enum PtyCommand {
    /// Write data to PTY
    Write(Vec<u8>),
    /// Kill the child and stop
    Shutdown,
}

/// Output routing for one panel
struct PanelOutput {
    visible: bool,
    /// Output received while hidden, oldest first
    pending: Vec<u8>,
    limit: usize,
}

impl PanelOutput {
    fn new(limit: usize) -> Self {
        Self {
            visible: false,
            pending: Vec::new(),
            limit,
        }
    }

    /// Route fresh output: returned for display if visible, buffered otherwise
    fn push(&mut self, data: &[u8]) -> Option<Vec<u8>> {
        if self.visible {
            return Some(data.to_vec());
        }
        self.pending.extend_from_slice(data);
        self.trim();
        None
    }

    /// Put back output that was routed for display but never drawn
    ///
    /// It predates everything buffered since, so it goes in front.
    fn requeue(&mut self, data: &[u8]) {
        let mut restored = Vec::with_capacity(data.len() + self.pending.len());
        restored.extend_from_slice(data);
        restored.append(&mut self.pending);
        self.pending = restored;
        self.trim();
    }

    /// Drop the oldest bytes beyond the limit
    fn trim(&mut self) {
        if self.pending.len() > self.limit {
            let excess = self.pending.len() - self.limit;
            self.pending.drain(..excess);
        }
    }

    /// Mark visible and take everything buffered while hidden
    fn reveal(&mut self) -> Vec<u8> {
        self.visible = true;
        std::mem::take(&mut self.pending)
    }

    fn conceal(&mut self) {
        self.visible = false;
    }
}

/// Handle to a running PTY terminal
pub struct PtyTerminal {
    id: TerminalId,
    name: String,
    output: Arc<Mutex<PanelOutput>>,
    events: UnboundedSender<PanelEvent>,
    /// Command sender to writer thread
    command_tx: mpsc::Sender<PtyCommand>,
    alive: Arc<AtomicBool>,
}

impl PtyTerminal {
    pub fn id(&self) -> TerminalId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the shell is still running
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Return undrawn output to the hidden panel's buffer, to be flushed on
    /// the next `show()`
    pub fn requeue(&self, data: &[u8]) {
        if let Ok(mut output) = self.output.lock() {
            output.requeue(data);
        }
    }

    fn write(&self, data: &[u8]) {
        let _ = self.command_tx.send(PtyCommand::Write(data.to_vec()));
    }

    fn shutdown(&self) {
        let _ = self.command_tx.send(PtyCommand::Shutdown);
    }
}

impl TerminalHandle for PtyTerminal {
    fn show(&mut self) {
        if let Ok(mut output) = self.output.lock() {
            let pending = output.reveal();
            if !pending.is_empty() {
                let _ = self.events.send(PanelEvent::Output {
                    terminal_id: self.id,
                    data: pending,
                });
            }
        }
    }

    fn hide(&mut self) {
        if let Ok(mut output) = self.output.lock() {
            output.conceal();
        }
    }

    fn dispose(self) {
        // Dropping the handle shuts the writer thread down
        tracing::info!("Disposing {} ({})", self.id, self.name);
    }

    fn send_text(&mut self, text: &str, execute: bool) {
        let mut data = text.as_bytes().to_vec();
        if execute {
            data.push(b'\r');
        }
        self.write(&data);
    }
}

impl Drop for PtyTerminal {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Provider spawning shells in native PTYs
pub struct PtyProvider {
    config: TerminalConfig,
    /// Channel for notifying the host loop
    events: UnboundedSender<PanelEvent>,
    next_id: usize,
}

impl PtyProvider {
    pub fn new(config: TerminalConfig, events: UnboundedSender<PanelEvent>) -> Self {
        Self {
            config,
            events,
            next_id: 0,
        }
    }

    /// Spawn a shell in a new PTY
    fn spawn(&mut self, name: &str) -> Result<PtyTerminal, String> {
        let id = TerminalId(self.next_id);
        self.next_id += 1;

        let cols = self.config.cols;
        let rows = self.config.rows;

        let pty_system = native_pty_system();
        let pty_pair = pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| format!("Failed to open PTY: {}", e))?;

        let shell = detect_shell(self.config.shell.as_deref());
        tracing::info!("Spawning terminal with shell: {}", shell);

        let mut cmd = CommandBuilder::new(&shell);
        if let Some(ref dir) = self.config.cwd {
            cmd.cwd(dir);
        }

        let mut child = pty_pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| format!("Failed to spawn shell: {}", e))?;
        // The child holds its own copy; keeping ours would hide EOF on exit
        drop(pty_pair.slave);

        let mut writer = pty_pair
            .master
            .take_writer()
            .map_err(|e| format!("Failed to get PTY writer: {}", e))?;

        let mut reader = pty_pair
            .master
            .try_clone_reader()
            .map_err(|e| format!("Failed to get PTY reader: {}", e))?;

        let output = Arc::new(Mutex::new(PanelOutput::new(self.config.scrollback_bytes)));
        let (command_tx, command_rx) = mpsc::channel::<PtyCommand>();
        let alive = Arc::new(AtomicBool::new(true));

        // Reader thread
        let output_clone = output.clone();
        let alive_clone = alive.clone();
        let events = self.events.clone();
        thread::spawn(move || {
            let mut buf = [0u8; 4096];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => {
                        tracing::info!("{} EOF", id);
                        break;
                    }
                    Ok(n) => {
                        // Send while holding the lock so a concurrent show()
                        // cannot flush older output after this chunk
                        if let Ok(mut out) = output_clone.lock() {
                            if let Some(data) = out.push(&buf[..n]) {
                                let _ = events.send(PanelEvent::Output {
                                    terminal_id: id,
                                    data,
                                });
                            }
                        }
                    }
                    Err(e) => {
                        tracing::error!("Terminal read error: {}", e);
                        break;
                    }
                }
            }
            alive_clone.store(false, Ordering::Relaxed);
            let _ = events.send(PanelEvent::Exited { terminal_id: id });
        });

        // Writer thread
        let master = pty_pair.master;
        thread::spawn(move || {
            loop {
                match command_rx.recv() {
                    Ok(PtyCommand::Write(data)) => {
                        if let Err(e) = writer.write_all(&data) {
                            tracing::error!("Terminal write error: {}", e);
                            break;
                        }
                        let _ = writer.flush();
                    }
                    Ok(PtyCommand::Shutdown) | Err(_) => {
                        break;
                    }
                }
            }
            let _ = child.kill();
            let _ = child.wait();
            drop(master);
        });

        tracing::info!("Created {} '{}' ({}x{})", id, name, cols, rows);

        Ok(PtyTerminal {
            id,
            name: name.to_string(),
            output,
            events: self.events.clone(),
            command_tx,
            alive,
        })
    }
}

#[async_trait]
impl TerminalProvider for PtyProvider {
    type Handle = PtyTerminal;

    async fn create_terminal(&mut self, name: &str) -> Option<PtyTerminal> {
        match self.spawn(name) {
            Ok(terminal) => Some(terminal),
            Err(e) => {
                tracing::error!("Failed to create terminal '{}': {}", name, e);
                None
            }
        }
    }
}

/// Detect the shell to run: configured, then $SHELL, then the platform default
fn detect_shell(configured: Option<&str>) -> String {
    if let Some(shell) = configured.filter(|s| !s.is_empty()) {
        return shell.to_string();
    }

    if let Ok(shell) = std::env::var("SHELL") {
        if !shell.is_empty() {
            return shell;
        }
    }

    #[cfg(unix)]
    {
        "/bin/sh".to_string()
    }
    #[cfg(windows)]
    {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    }
}
