//! Acctest is a small acceptance testing framework for command-line programs.
//!
//! An acceptance test runs a program with some arguments and checks what it
//! wrote to STDOUT and STDERR along with its exit code.
//! A test suite is defined in a configuration file written in a small subset
//! of TOML.
//!
//! ## Defining a Test Suite
//! The root of the file names the program under test. Every `[table]` is one
//! test case, named by its header.
//! ```toml
//! # Program to run. Relative paths start at this file's directory.
//! path = "./calc"
//! # (Optional) Keep going after a failing case. Defaults to false.
//! continue_on_fail = true
//! # (Optional) Compare line endings exactly. Defaults to false.
//! line_endings_strict = false
//!
//! [add]
//! input = "1 + 2"
//! output = "3"
//! output_err = ""
//! exit_code = 0
//!
//! [bad_operator]
//! input = "1 ^ 2"
//! output = ""
//! output_err = "
//! unknown operator: ^
//! "
//! exit_code = 2
//! ```
//!
//! The dialect supports strings, integers, booleans, `#` comments, and one
//! level of tables. Strings may span lines; a newline directly after the
//! opening quote is dropped. There are no escape sequences.
//!
//! `input` is split on spaces into arguments. No shell is involved, so quotes
//! are passed through as written.
//!
//! ## Running a Test Suite
//! ```bash
//! acctest tests/calc.toml
//! ```
//! Each case prints one line:
//! ```text
//! tests/calc.toml (2 tests)
//! add..................................... OK
//! bad_operator............................ FAIL
//!     stderr: expected "unknown operator: ^\n", got ""
//!   1 passed / 1 failed / 0 not run
//! ```
//! Unless `continue_on_fail` is set, the suite stops at the first failing
//! case. The exit status of `acctest` is the number of failing cases.
//!
//! ## Line Endings
//! By default `\r\n` and `\n` are treated as the same line ending, so golden
//! outputs written on one platform pass on another. Set
//! `line_endings_strict = true` or pass `--strict` to compare bytes exactly.
//!
//! ## Filters and Diffs
//! `--include` and `--exclude` take regexes matched against case names.
//! `--diff` renders a line diff for mismatching output and `--dry-run` prints
//! the command each case would run.
pub mod cli;
pub mod diff;
pub mod errors;
pub mod executor;
pub mod logging;
pub mod picker;
