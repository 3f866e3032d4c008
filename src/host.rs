//! Host editor capabilities consumed by the terminal manager
//!
//! The host owns buffers, the editor mode and the message area. The terminal
//! manager reaches all of them through the `Host` trait.

use async_trait::async_trait;

/// Severity of a user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MessageLevel::Info => "info",
            MessageLevel::Warning => "warning",
            MessageLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// Editor input mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EditorMode {
    #[default]
    Normal,
    Insert,
}

/// Capabilities the host editor exposes to the terminal manager
#[async_trait]
pub trait Host: Send {
    /// File type of the current buffer (e.g. "python"), empty if unknown
    async fn file_type(&mut self) -> String;

    /// Switch the editor into text-insertion mode
    async fn enter_insert_mode(&mut self);

    /// Display a message to the user
    fn show_message(&mut self, text: &str, level: MessageLevel);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_level_display() {
        assert_eq!(MessageLevel::Error.to_string(), "error");
        assert_eq!(MessageLevel::Warning.to_string(), "warning");
        assert_eq!(MessageLevel::Info.to_string(), "info");
    }

    #[test]
    fn test_editor_mode_defaults_to_normal() {
        assert_eq!(EditorMode::default(), EditorMode::Normal);
    }
}
