//! Configuration types
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! is a valid configuration. Loading from disk lives in `config_io`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::commands::TerminalCommand;
use crate::services::terminal::DEFAULT_TERMINAL_NAME;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terminal panel settings
    pub terminal: TerminalConfig,

    /// Normal-mode key sequences bound to terminal keymaps
    pub keys: Vec<KeyBinding>,
}

/// Terminal panel settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct TerminalConfig {
    /// Name given to the terminal panel
    pub name: String,

    /// Shell to spawn (None = $SHELL, then the platform default)
    pub shell: Option<String>,

    /// Working directory for the shell (None = current directory)
    pub cwd: Option<PathBuf>,

    /// Initial width in columns
    pub cols: u16,

    /// Initial height in rows
    pub rows: u16,

    /// Output kept while the panel is hidden, in bytes
    pub scrollback_bytes: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TERMINAL_NAME.to_string(),
            shell: None,
            cwd: None,
            cols: 80,
            rows: 24,
            scrollback_bytes: 64 * 1024,
        }
    }
}

/// A key sequence bound to a keymap such as `terminal-toggle`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct KeyBinding {
    pub keys: String,
    pub action: String,
}

impl Config {
    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.terminal.name.trim().is_empty() {
            return Err("terminal.name must not be empty".to_string());
        }
        if self.terminal.cols == 0 || self.terminal.rows == 0 {
            return Err(format!(
                "terminal size must be non-zero, got {}x{}",
                self.terminal.cols, self.terminal.rows
            ));
        }
        for binding in &self.keys {
            if binding.keys.is_empty() {
                return Err(format!("empty key sequence for '{}'", binding.action));
            }
            if TerminalCommand::from_keymap_name(&binding.action).is_none() {
                return Err(format!(
                    "unknown action '{}' bound to '{}'",
                    binding.action, binding.keys
                ));
            }
        }
        Ok(())
    }

    /// JSON schema for the configuration file
    pub fn json_schema() -> serde_json::Value {
        schemars::schema_for!(Config).to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.terminal.name, "coc-terminal");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_terminal_section() {
        let config: Config =
            serde_json::from_str(r#"{"terminal": {"shell": "/bin/zsh", "rows": 40}}"#).unwrap();
        assert_eq!(config.terminal.shell.as_deref(), Some("/bin/zsh"));
        assert_eq!(config.terminal.rows, 40);
        assert_eq!(config.terminal.cols, 80);
    }

    #[test]
    fn test_validate_rejects_unknown_action() {
        let config: Config = serde_json::from_str(
            r#"{"keys": [{"keys": "tr", "action": "terminal-repl"}]}"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("terminal-repl"));
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let mut config = Config::default();
        config.terminal.cols = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_schema_lists_sections() {
        let schema = Config::json_schema();
        let properties = schema.get("properties").unwrap();
        assert!(properties.get("terminal").is_some());
        assert!(properties.get("keys").is_some());
    }
}
