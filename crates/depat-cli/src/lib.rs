//! Driver for the `depat` binary.
//!
//! The binary reads a program as JSON (the serialization of
//! [`depat_ast::Program`]), lowers every destructuring pattern in it and
//! prints the result as JavaScript or as JSON.

pub mod args;
pub mod driver;
pub mod tracing_config;
