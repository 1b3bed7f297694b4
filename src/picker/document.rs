//! Parsed form of a configuration file.
//!
//! The dialect only reaches one level of nesting, so the tree is modeled as a
//! root mapping of scalars and tables where each table maps keys to scalars.
use indexmap::IndexMap;
use std::fmt;

use super::lexer::{Lexeme, Lexer, Token};
use crate::errors::SyntaxError;

/// The kind of a value, used when reporting type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    String,
    Integer,
    Table,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Kind::Bool => "a boolean",
            Kind::String => "a string",
            Kind::Integer => "an integer",
            Kind::Table => "a table",
        };
        f.write_str(name)
    }
}

/// A value that may appear inside a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Bool(bool),
    String(String),
    Integer(i64),
}

impl Scalar {
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::Bool(_) => Kind::Bool,
            Scalar::String(_) => Kind::String,
            Scalar::Integer(_) => Kind::Integer,
        }
    }
}

/// Canonical source form, e.g. `"text"`, `true`, `42`. Parsing the output
/// yields the same value.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            // A line break right after the opening quote is dropped when
            // lexing, so one is added in front of values starting with one.
            Scalar::String(s) if s.starts_with('\n') || s.starts_with("\r\n") => {
                write!(f, "\"\n{}\"", s)
            }
            Scalar::String(s) => write!(f, "\"{}\"", s),
            Scalar::Integer(n) => write!(f, "{}", n),
        }
    }
}

/// A named `[header]` table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub name: String,
    pub entries: IndexMap<String, Scalar>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.entries.get(key)
    }
}

/// A value at the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    String(String),
    Integer(i64),
    Table(Table),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::String(_) => Kind::String,
            Value::Integer(_) => Kind::Integer,
            Value::Table(_) => Kind::Table,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::String(s) => Value::String(s),
            Scalar::Integer(n) => Value::Integer(n),
        }
    }
}

/// Root of a parsed configuration. Entries keep source order; a repeated key
/// replaces the earlier value in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub entries: IndexMap<String, Value>,
}

impl Document {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Tables at the root, in the order they first appeared.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.entries.values().filter_map(|v| match v {
            Value::Table(t) => Some(t),
            Value::Bool(_) | Value::String(_) | Value::Integer(_) => None,
        })
    }

    /// Parse configuration text.
    pub fn parse(src: &str) -> Result<Self, SyntaxError> {
        Parser::new(src).parse()
    }
}

/// What the parser is waiting for within the current statement.
#[derive(Debug)]
enum State {
    ExpectKeyOrHeader,
    ExpectEquals(String),
    ExpectValue(String),
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    doc: Document,
    /// Name of the table receiving assignments. `None` is the root.
    active: Option<String>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            lexer: Lexer::new(src),
            doc: Document::default(),
            active: None,
        }
    }

    fn parse(mut self) -> Result<Document, SyntaxError> {
        let mut state = State::ExpectKeyOrHeader;
        loop {
            let Lexeme { token, pos } = self.lexer.next_token()?;
            state = match (state, token) {
                (State::ExpectKeyOrHeader, Token::EndOfInput) => {
                    return Ok(self.doc)
                }
                (State::ExpectKeyOrHeader, Token::Identifier(key)) => {
                    State::ExpectEquals(key)
                }
                (State::ExpectKeyOrHeader, Token::OpenBracket) => {
                    self.header()?;
                    State::ExpectKeyOrHeader
                }
                (State::ExpectKeyOrHeader, found) => {
                    return Err(SyntaxError::ExpectedKeyOrValue {
                        pos,
                        found: found.to_string(),
                    })
                }
                (State::ExpectEquals(key), Token::Equals) => {
                    State::ExpectValue(key)
                }
                (State::ExpectEquals(key), found) => {
                    return Err(SyntaxError::ExpectedEqualsSign {
                        pos,
                        key,
                        found: found.to_string(),
                    })
                }
                (State::ExpectValue(key), Token::String(s)) => {
                    self.insert(key, Scalar::String(s));
                    State::ExpectKeyOrHeader
                }
                (State::ExpectValue(key), Token::Bool(b)) => {
                    self.insert(key, Scalar::Bool(b));
                    State::ExpectKeyOrHeader
                }
                (State::ExpectValue(key), Token::Integer(n)) => {
                    self.insert(key, Scalar::Integer(n));
                    State::ExpectKeyOrHeader
                }
                (State::ExpectValue(key), found) => {
                    return Err(SyntaxError::ExpectedValue {
                        pos,
                        key,
                        found: found.to_string(),
                    })
                }
            };
        }
    }

    /// Remainder of `[name]`. Headers always open a root-level table.
    fn header(&mut self) -> Result<(), SyntaxError> {
        let name = match self.lexer.next_token()? {
            Lexeme {
                token: Token::Identifier(name),
                ..
            } => name,
            Lexeme { token, pos } => {
                return Err(SyntaxError::ExpectedIdentifier {
                    pos,
                    found: token.to_string(),
                })
            }
        };
        match self.lexer.next_token()? {
            Lexeme {
                token: Token::CloseBracket,
                ..
            } => {}
            Lexeme { token, pos } => {
                return Err(SyntaxError::ExpectedClosingBracket {
                    pos,
                    found: token.to_string(),
                })
            }
        }
        tracing::trace!(table = %name, "opened table");
        self.doc
            .entries
            .insert(name.clone(), Value::Table(Table::new(name.clone())));
        self.active = Some(name);
        Ok(())
    }

    fn insert(&mut self, key: String, value: Scalar) {
        if let Some(name) = &self.active {
            if let Some(Value::Table(table)) = self.doc.entries.get_mut(name) {
                table.entries.insert(key, value);
                return;
            }
        }
        self.doc.entries.insert(key, value.into());
    }
}
