//! File types that can launch a REPL, and the interpreter for each

/// A language with REPL support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplLanguage {
    JavaScript,
    TypeScript,
    Python,
}

impl ReplLanguage {
    pub const ALL: [ReplLanguage; 3] = [
        ReplLanguage::JavaScript,
        ReplLanguage::TypeScript,
        ReplLanguage::Python,
    ];

    /// Look up the language for a host file type
    ///
    /// Matching is exact: file types are lowercase identifiers in the host.
    pub fn from_file_type(file_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.file_type() == file_type)
    }

    /// File type name as reported by the host
    pub fn file_type(self) -> &'static str {
        match self {
            ReplLanguage::JavaScript => "javascript",
            ReplLanguage::TypeScript => "typescript",
            ReplLanguage::Python => "python",
        }
    }

    /// Interpreter command typed into the terminal
    pub fn command(self) -> &'static str {
        match self {
            ReplLanguage::JavaScript => "node",
            ReplLanguage::TypeScript => "ts-node",
            ReplLanguage::Python => "python",
        }
    }
}

impl std::fmt::Display for ReplLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_type())
    }
}
