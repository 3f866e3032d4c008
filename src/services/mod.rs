//! Services backing the editor commands

pub mod terminal;
