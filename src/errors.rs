//! Errors produced while loading and running an acceptance test suite.
use std::{fmt, io, path::PathBuf};
use thiserror::Error;

use crate::picker::{document::Kind, lexer::Position};

/// Result type alias using [Error].
pub type Result<T> = std::result::Result<T, Error>;

/// An error from the tokenizer or the document parser.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("{pos}: string is not closed")]
    StringNotClosed { pos: Position },

    #[error("{pos}: integer literal `{text}` is too large")]
    IntegerTooLarge { pos: Position, text: String },

    #[error("{pos}: expected a table name, found {found}")]
    ExpectedIdentifier { pos: Position, found: String },

    #[error("{pos}: expected `]`, found {found}")]
    ExpectedClosingBracket { pos: Position, found: String },

    #[error("{pos}: expected a key or a table header, found {found}")]
    ExpectedKeyOrValue { pos: Position, found: String },

    #[error("{pos}: expected `=` after `{key}`, found {found}")]
    ExpectedEqualsSign {
        pos: Position,
        key: String,
        found: String,
    },

    #[error("{pos}: expected a value for `{key}`, found {found}")]
    ExpectedValue {
        pos: Position,
        key: String,
        found: String,
    },
}

/// Location of a key in the configuration: the document root or a test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Root,
    Case(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scope::Root => write!(f, "the document root"),
            Scope::Case(name) => write!(f, "test case `{}`", name),
        }
    }
}

/// The document parsed but does not describe a test suite.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{scope} is missing required key `{key}`")]
    MissingRequiredKey { scope: Scope, key: String },

    #[error("`{key}` in {scope} must be {expected}, found {found}")]
    WrongValueType {
        scope: Scope,
        key: String,
        expected: Kind,
        found: Kind,
    },
}

/// Main error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to parse {}: {source}", .file.display())]
    Syntax {
        file: PathBuf,
        #[source]
        source: SyntaxError,
    },

    #[error("invalid test suite {}: {source}", .file.display())]
    Schema {
        file: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("{}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("invalid filter: {0}")]
    Filter(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Wrap an IO error with the path that caused it.
    pub fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }
}
