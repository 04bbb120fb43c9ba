//! Registry for readers and writers.

use crate::traits::{Reader, Writer};
use std::sync::{OnceLock, PoisonError, RwLock};

/// Global reader registry.
static READERS: RwLock<Vec<&'static dyn Reader>> = RwLock::new(Vec::new());
static READERS_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Global writer registry.
static WRITERS: RwLock<Vec<&'static dyn Writer>> = RwLock::new(Vec::new());
static WRITERS_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom reader.
pub fn register_reader(reader: &'static dyn Reader) {
    tracing::debug!(language = reader.language(), "registering reader");
    READERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(reader);
}

/// Register a custom writer.
pub fn register_writer(writer: &'static dyn Writer) {
    tracing::debug!(language = writer.language(), "registering writer");
    WRITERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(writer);
}

fn init_readers() {
    READERS_INITIALIZED.get_or_init(|| {
        #[cfg(feature = "read-python")]
        {
            register_reader(&crate::input::python::PYTHON_READER);
        }
    });
}

fn init_writers() {
    WRITERS_INITIALIZED.get_or_init(|| {
        register_writer(&crate::output::javascript::JAVASCRIPT_WRITER);
    });
}

/// Get a reader by language name.
pub fn reader_for_language(lang: &str) -> Option<&'static dyn Reader> {
    init_readers();
    READERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find(|r| r.language() == lang)
        .copied()
}

/// Get a reader by file extension.
pub fn reader_for_extension(ext: &str) -> Option<&'static dyn Reader> {
    init_readers();
    READERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find(|r| r.extensions().contains(&ext))
        .copied()
}

/// Get a writer by language name.
pub fn writer_for_language(lang: &str) -> Option<&'static dyn Writer> {
    init_writers();
    WRITERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find(|w| w.language() == lang)
        .copied()
}

/// Get all registered readers.
pub fn readers() -> Vec<&'static dyn Reader> {
    init_readers();
    READERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Get all registered writers.
pub fn writers() -> Vec<&'static dyn Writer> {
    init_writers();
    WRITERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Module, Stmt};

    #[test]
    #[cfg(feature = "read-python")]
    fn test_reader_lookup() {
        let reader = reader_for_language("python").expect("python reader");
        assert_eq!(reader.language(), "python");
        assert!(reader.extensions().contains(&"py"));

        let reader = reader_for_extension("pyw").expect("pyw extension");
        assert_eq!(reader.language(), "python");
    }

    #[test]
    fn test_writer_lookup() {
        let writer = writer_for_language("javascript").expect("javascript writer");
        assert_eq!(writer.language(), "javascript");
        assert_eq!(writer.extension(), "js");
        assert!(writer_for_language("lua").is_none());
    }

    #[test]
    fn test_writer_from_registry_emits() {
        let writer = writer_for_language("javascript").unwrap();
        let module = Module::new(vec![Stmt::assign(Expr::name("x"), Expr::int(1))]);
        assert_eq!(writer.write(&module), "let x = 1;");
    }

    #[test]
    #[cfg(feature = "read-python")]
    fn test_roundtrip_via_registry() {
        let reader = reader_for_language("python").unwrap();
        let writer = writer_for_language("javascript").unwrap();

        let module = reader.read("x = 1 + 2").unwrap();
        let js = writer.write(&module);

        assert_eq!(js, "let x = 1 + 2;");
    }
}
