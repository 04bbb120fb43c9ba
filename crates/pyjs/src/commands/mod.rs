//! Command implementations for the `pyjs` binary.

pub mod translate;
