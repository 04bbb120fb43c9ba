//! Input readers - parse source code into syntax trees.

#[cfg(feature = "read-python")]
pub mod python;

#[cfg(feature = "read-python")]
pub use python::{PYTHON_READER, PythonReader, read_python};
