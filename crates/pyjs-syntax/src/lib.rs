//! Source-to-source translation of Python into JavaScript.
//!
//! `pyjs-syntax` reads Python source into a small syntax tree shaped like
//! Python's own `ast` module and walks it to emit JavaScript text. It maps
//! syntax, not semantics: `print` becomes `console.log`, `__init__` becomes
//! `constructor`, and constructs without a counterpart are replaced by a
//! `// Unhandled node type: <Kind>` comment instead of failing the run.
//!
//! # Architecture
//!
//! ```text
//! Python source ─> input::python ─> Module ─> output::javascript ─> JavaScript
//!   (tree-sitter)                   (ast.rs)    (Translator)
//! ```
//!
//! # Example
//!
//! ```ignore
//! let js = pyjs_syntax::translate("x = 1 + 2")?;
//! assert_eq!(js, "let x = 1 + 2;");
//! ```

pub mod ast;
pub mod registry;
pub mod traits;

pub mod input;
pub mod output;

// Re-exports: syntax tree types
pub use ast::{
    BoolOp, CmpOp, Constant, ExceptHandler, Expr, ExprKind, FStringPart, FunctionDef, Keyword,
    MatchCase, Module, Operator, Pattern, PatternKind, Stmt, StmtKind, UnaryOp,
};

// Re-exports: Traits
pub use traits::{ReadError, Reader, Writer};

// Re-exports: Registry
pub use registry::{
    reader_for_extension, reader_for_language, readers, register_reader, register_writer,
    writer_for_language, writers,
};

// Re-exports: Built-in readers
#[cfg(feature = "read-python")]
pub use input::{PythonReader, read_python};

// Re-exports: Built-in writers
pub use output::{JavaScriptWriterImpl, Translator};

/// Translate Python source text into JavaScript source text.
#[cfg(feature = "read-python")]
pub fn translate(source: &str) -> Result<String, ReadError> {
    let module = read_python(source)?;
    Ok(Translator::emit(&module))
}
