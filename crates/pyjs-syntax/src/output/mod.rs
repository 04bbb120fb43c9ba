//! Output writers - emit syntax trees as source code.

pub mod javascript;

pub use javascript::{JAVASCRIPT_WRITER, JavaScriptWriterImpl, Translator};
