//! Pickers gather the test suite to run from a configuration file.
pub mod document;
pub mod lexer;
pub mod toml;
