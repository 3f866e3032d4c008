//! Parsing of lines typed into the command host

use crate::commands::{CommandTable, TerminalCommand};
use crate::host::EditorMode;

/// What a line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(TerminalCommand),
    SetFileType(String),
    StartInsert,
    StopInsert,
    Quit,
    /// Typed into the terminal (insert mode)
    Text(String),
    Unknown(String),
    Empty,
}

/// Interpret one line typed in `mode`
///
/// Lines starting with `:` are editor commands in every mode. Other lines
/// are typed into the terminal in insert mode, and resolved against the
/// command table in normal mode.
pub fn parse_line(line: &str, mode: EditorMode, table: &CommandTable) -> Input {
    if let Some(ex) = line.strip_prefix(':') {
        return parse_ex_command(ex.trim(), table);
    }

    if mode == EditorMode::Insert {
        return Input::Text(line.to_string());
    }

    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    if line == "i" {
        return Input::StartInsert;
    }
    match table.resolve(line, mode) {
        Some(command) => Input::Command(command),
        None => Input::Unknown(line.to_string()),
    }
}

fn parse_ex_command(ex: &str, table: &CommandTable) -> Input {
    match ex {
        "" => Input::Empty,
        "q" | "quit" => Input::Quit,
        "startinsert" => Input::StartInsert,
        "stopinsert" => Input::StopInsert,
        _ => {
            if let Some(arg) = ex.strip_prefix("set ") {
                let arg = arg.trim();
                if let Some(ft) = arg
                    .strip_prefix("filetype=")
                    .or_else(|| arg.strip_prefix("ft="))
                {
                    return Input::SetFileType(ft.to_string());
                }
            }
            match table.command(ex) {
                Some(command) => Input::Command(command),
                None => Input::Unknown(ex.to_string()),
            }
        }
    }
}
