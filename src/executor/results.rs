use colored::*;

use super::{
    compare::Policy,
    suite::TestCase,
    test::{Execution, Termination},
};
use crate::{diff, errors::Error};

/// Column at which `OK`/`FAIL` is printed. Case names are padded with dots.
pub const REPORT_WIDTH: usize = 40;

/// A field of the test case that did not match what the program did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    ExitCode {
        expected: i64,
        actual: Termination,
    },
    Stdout {
        expected: String,
        actual: Vec<u8>,
    },
    Stderr {
        expected: String,
        actual: Vec<u8>,
    },
}

/// Track the state of a test result.
#[derive(Debug, PartialEq)]
pub enum State {
    /// Every field matched.
    Correct,
    /// At least one field differed. Contains every differing field.
    Mismatch(Vec<Mismatch>),
    /// The program could not be started. Contains the reason.
    NotStarted(String),
}

/// Result of running one test case.
#[derive(Debug, PartialEq)]
pub struct Test {
    /// Name of the test case.
    pub name: String,
    /// Result of comparison.
    pub state: State,
}

impl Test {
    /// Compare what the program did against what `case` expects.
    pub fn compare(case: &TestCase, exec: &Execution, policy: Policy) -> Self {
        let mut mismatches = vec![];

        let exit_ok = match exec.termination {
            Termination::Exited(code) => i64::from(code) == case.exit_code,
            Termination::Signaled(_) | Termination::Unknown => false,
        };
        if !exit_ok {
            mismatches.push(Mismatch::ExitCode {
                expected: case.exit_code,
                actual: exec.termination,
            });
        }
        if !policy.matches(&exec.stdout, case.output.as_bytes()) {
            mismatches.push(Mismatch::Stdout {
                expected: case.output.clone(),
                actual: exec.stdout.clone(),
            });
        }
        if !policy.matches(&exec.stderr, case.output_err.as_bytes()) {
            mismatches.push(Mismatch::Stderr {
                expected: case.output_err.clone(),
                actual: exec.stderr.clone(),
            });
        }
        tracing::trace!(case = %case.name, ?policy, ?mismatches, "compared");

        let state = if mismatches.is_empty() {
            State::Correct
        } else {
            State::Mismatch(mismatches)
        };
        Test {
            name: case.name.clone(),
            state,
        }
    }

    /// A case whose program could not be spawned.
    pub fn not_started(case: &TestCase, err: &Error) -> Self {
        Test {
            name: case.name.clone(),
            state: State::NotStarted(err.to_string()),
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self.state, State::Correct)
    }

    /// Generate colorized string to report the results of this test.
    pub fn report_str(&self, show_diff: bool) -> String {
        let status = match self.state {
            State::Correct => "OK".green(),
            State::Mismatch(_) | State::NotStarted(_) => "FAIL".red(),
        };
        let mut buf =
            format!("{:.<width$} {}", self.name, status, width = REPORT_WIDTH);

        match &self.state {
            State::Correct => {}
            State::NotStarted(reason) => {
                buf.push_str(&format!(
                    "\n    exit code could not be attained: {}",
                    reason
                ));
            }
            State::Mismatch(mismatches) => {
                for m in mismatches {
                    buf.push('\n');
                    buf.push_str(&mismatch_str(m, show_diff));
                }
            }
        }
        buf
    }
}

fn termination_str(termination: &Termination) -> String {
    match termination {
        Termination::Exited(code) => code.to_string(),
        Termination::Signaled(signal) => format!(
            "signal {} (exit code could not be attained)",
            signal
        ),
        Termination::Unknown => "exit code could not be attained".to_string(),
    }
}

fn stream_str(
    label: &str,
    expected: &str,
    actual: &[u8],
    show_diff: bool,
) -> String {
    let actual = String::from_utf8_lossy(actual);
    if show_diff {
        let body = diff::gen_diff(expected, &actual)
            .lines()
            .map(|line| format!("      {}", line))
            .collect::<Vec<_>>()
            .join("\n");
        format!("    {} differs:\n{}", label.bold(), body)
    } else {
        format!(
            "    {}: expected {:?}, got {:?}",
            label.bold(),
            expected,
            actual
        )
    }
}

fn mismatch_str(mismatch: &Mismatch, show_diff: bool) -> String {
    match mismatch {
        Mismatch::ExitCode { expected, actual } => format!(
            "    {}: expected {}, got {}",
            "exit code".bold(),
            expected,
            termination_str(actual)
        ),
        Mismatch::Stdout { expected, actual } => {
            stream_str("stdout", expected, actual, show_diff)
        }
        Mismatch::Stderr { expected, actual } => {
            stream_str("stderr", expected, actual, show_diff)
        }
    }
}
