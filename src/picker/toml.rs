//! The default picker that gathers a test suite from a configuration file
//! written in a small TOML dialect.
use std::path::{Path, PathBuf};

use super::document::{Document, Kind, Value};
use crate::errors::{self, Error, SchemaError, Scope};
use crate::executor::suite::{TestCase, TestSuite};

/// A test suite together with the file it was loaded from.
#[derive(Debug)]
pub struct Config {
    /// Path of the configuration file.
    pub file: PathBuf,
    /// The suite described by the file, with an absolute program path.
    pub suite: TestSuite,
}

impl Config {
    /// Read, parse, and validate a configuration file, then anchor the
    /// program path to the file's directory.
    pub fn from_path(file: &Path) -> errors::Result<Self> {
        let contents = std::fs::read_to_string(file)
            .map_err(|err| Error::fs(file, err))?;

        let doc = Document::parse(&contents).map_err(|source| Error::Syntax {
            file: file.to_path_buf(),
            source,
        })?;

        let mut suite = build(doc).map_err(|source| Error::Schema {
            file: file.to_path_buf(),
            source,
        })?;
        suite.dir = config_dir(file).to_path_buf();
        resolve(&mut suite, file)?;

        tracing::debug!(
            file = %file.display(),
            program = %suite.path.display(),
            cases = suite.cases.len(),
            "loaded test suite"
        );
        if suite.cases.is_empty() {
            tracing::warn!(file = %file.display(), "suite defines no test cases");
        }

        Ok(Config {
            file: file.to_path_buf(),
            suite,
        })
    }
}

/// Directory containing `file`, `.` when it has none.
fn config_dir(file: &Path) -> &Path {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

fn missing(scope: &Scope, key: &str) -> SchemaError {
    SchemaError::MissingRequiredKey {
        scope: scope.clone(),
        key: key.to_string(),
    }
}

fn wrong_type(
    scope: &Scope,
    key: &str,
    expected: Kind,
    found: Kind,
) -> SchemaError {
    SchemaError::WrongValueType {
        scope: scope.clone(),
        key: key.to_string(),
        expected,
        found,
    }
}

fn string(
    value: Option<Value>,
    scope: &Scope,
    key: &str,
) -> Result<String, SchemaError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(wrong_type(scope, key, Kind::String, other.kind())),
        None => Err(missing(scope, key)),
    }
}

fn integer(
    value: Option<Value>,
    scope: &Scope,
    key: &str,
) -> Result<i64, SchemaError> {
    match value {
        Some(Value::Integer(n)) => Ok(n),
        Some(other) => {
            Err(wrong_type(scope, key, Kind::Integer, other.kind()))
        }
        None => Err(missing(scope, key)),
    }
}

/// Optional flag at the document root, `false` when absent.
fn flag(doc: &Document, key: &str) -> Result<bool, SchemaError> {
    match doc.get(key) {
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => {
            Err(wrong_type(&Scope::Root, key, Kind::Bool, other.kind()))
        }
        None => Ok(false),
    }
}

/// Map a parsed document onto a [TestSuite]. Every root table is one test
/// case; unknown root scalars are ignored. The program path is left as
/// written and the working directory is `.`.
pub fn build(doc: Document) -> Result<TestSuite, SchemaError> {
    let path = string(doc.get("path").cloned(), &Scope::Root, "path")?;
    let continue_on_fail = flag(&doc, "continue_on_fail")?;
    let line_endings_strict = flag(&doc, "line_endings_strict")?;

    let cases = doc
        .tables()
        .map(|table| -> Result<TestCase, SchemaError> {
            let scope = Scope::Case(table.name.clone());
            let get = |key: &str| table.get(key).cloned().map(Value::from);
            Ok(TestCase {
                name: table.name.clone(),
                input: string(get("input"), &scope, "input")?,
                output: string(get("output"), &scope, "output")?,
                output_err: string(get("output_err"), &scope, "output_err")?,
                exit_code: integer(get("exit_code"), &scope, "exit_code")?,
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    Ok(TestSuite {
        path: PathBuf::from(path),
        dir: PathBuf::from("."),
        continue_on_fail,
        line_endings_strict,
        cases,
    })
}

/// Make `suite.path` absolute by anchoring it to the directory containing
/// `config_file`. Absolute paths are left untouched.
pub fn resolve(suite: &mut TestSuite, config_file: &Path) -> errors::Result<()> {
    if suite.path.is_absolute() {
        return Ok(());
    }
    let joined = config_dir(config_file).join(&suite.path);
    suite.path = joined
        .canonicalize()
        .map_err(|err| Error::fs(&joined, err))?;
    Ok(())
}
