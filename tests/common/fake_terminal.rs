//! Recording fakes for the terminal provider and the host
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use termpanel::host::{Host, MessageLevel};
use termpanel::services::terminal::{TerminalHandle, TerminalManager, TerminalProvider};

/// A call made on the provider or one of its handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    Show(usize),
    Hide(usize),
    Dispose(usize),
    SendText(usize, String, bool),
}

/// Shared record of everything the manager asked for
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_creation: Arc<AtomicBool>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider(&self) -> FakeProvider {
        FakeProvider {
            recorder: self.clone(),
            next_id: 0,
        }
    }

    /// Make every following `create_terminal` return nothing
    pub fn fail_creation(&self, fail: bool) {
        self.fail_creation.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creations(&self) -> usize {
        self.count(|c| matches!(c, Call::Create(_)))
    }

    pub fn disposals(&self) -> usize {
        self.count(|c| matches!(c, Call::Dispose(_)))
    }

    /// Text sent to any handle, in order
    pub fn sent(&self) -> Vec<(String, bool)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SendText(_, text, execute) => Some((text, execute)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub struct FakeHandle {
    id: usize,
    recorder: Recorder,
}

impl FakeHandle {
    pub fn id(&self) -> usize {
        self.id
    }
}

impl TerminalHandle for FakeHandle {
    fn show(&mut self) {
        self.recorder.record(Call::Show(self.id));
    }

    fn hide(&mut self) {
        self.recorder.record(Call::Hide(self.id));
    }

    fn dispose(self) {
        self.recorder.record(Call::Dispose(self.id));
    }

    fn send_text(&mut self, text: &str, execute: bool) {
        self.recorder
            .record(Call::SendText(self.id, text.to_string(), execute));
    }
}

pub struct FakeProvider {
    recorder: Recorder,
    next_id: usize,
}

#[async_trait]
impl TerminalProvider for FakeProvider {
    type Handle = FakeHandle;

    async fn create_terminal(&mut self, name: &str) -> Option<FakeHandle> {
        self.recorder.record(Call::Create(name.to_string()));
        if self.recorder.fail_creation.load(Ordering::SeqCst) {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        Some(FakeHandle {
            id,
            recorder: self.recorder.clone(),
        })
    }
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub file_type: String,
    pub messages: Vec<(MessageLevel, String)>,
    pub insert_mode_entries: usize,
}

impl FakeHost {
    pub fn with_file_type(file_type: &str) -> Self {
        Self {
            file_type: file_type.to_string(),
            ..Self::default()
        }
    }

    pub fn messages_at(&self, level: MessageLevel) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, text)| text.as_str())
            .collect()
    }
}

#[async_trait]
impl Host for FakeHost {
    async fn file_type(&mut self) -> String {
        self.file_type.clone()
    }

    async fn enter_insert_mode(&mut self) {
        self.insert_mode_entries += 1;
    }

    fn show_message(&mut self, text: &str, level: MessageLevel) {
        self.messages.push((level, text.to_string()));
    }
}

pub type FakeManager = TerminalManager<FakeProvider, FakeHost>;

/// Manager wired to `recorder`, with the host reporting `file_type`
pub fn fake_manager(recorder: &Recorder, file_type: &str) -> FakeManager {
    TerminalManager::new(recorder.provider(), FakeHost::with_file_type(file_type))
}
