//! Traits for language readers and writers.

use crate::ast::Module;

/// Error that can occur when reading source code into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}

/// A reader parses source code into a [`Module`].
pub trait Reader: Send + Sync {
    /// Language identifier (e.g., "python").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles (e.g., &["py"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Parse source code into a syntax tree.
    fn read(&self, source: &str) -> Result<Module, ReadError>;
}

/// A writer emits a [`Module`] as source code in a target language.
pub trait Writer: Send + Sync {
    /// Language identifier (e.g., "javascript").
    fn language(&self) -> &'static str;

    /// File extension for output (e.g., "js").
    fn extension(&self) -> &'static str;

    /// Emit the syntax tree as source code.
    fn write(&self, module: &Module) -> String;
}
