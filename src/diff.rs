//! Line diffs between expected and captured output.
use colored::Colorize;
use difference::{Changeset, Difference};
use std::fmt;

/// Which side of the comparison a line belongs to.
#[derive(Clone, Copy, PartialEq, Debug)]
enum Side {
    Both,
    Expected,
    Actual,
}

/// Optional line number, printed blank when absent.
#[derive(PartialEq, Debug)]
struct Lineno(Option<usize>);

impl fmt::Display for Lineno {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            None => f.pad(""),
            Some(n) => f.pad(&n.to_string()),
        }
    }
}

#[derive(PartialEq, Debug)]
struct Row<'a> {
    side: Side,
    expected: Lineno,
    actual: Lineno,
    line: &'a str,
}

/// Flatten a changeset into rows, numbering lines on each side.
fn rows(changes: &Changeset) -> Vec<Row<'_>> {
    let (mut exp, mut act) = (0, 0);
    let mut out = vec![];
    for diff in &changes.diffs {
        let (side, text) = match diff {
            Difference::Same(x) => (Side::Both, x),
            Difference::Rem(x) => (Side::Expected, x),
            Difference::Add(x) => (Side::Actual, x),
        };
        for line in text.split('\n') {
            let (e, a) = match side {
                Side::Both => {
                    exp += 1;
                    act += 1;
                    (Some(exp), Some(act))
                }
                Side::Expected => {
                    exp += 1;
                    (Some(exp), None)
                }
                Side::Actual => {
                    act += 1;
                    (None, Some(act))
                }
            };
            out.push(Row {
                side,
                expected: Lineno(e),
                actual: Lineno(a),
                line: line.trim_end_matches('\r'),
            });
        }
    }
    out
}

/// Render a line diff from `expected` to `actual`. Removed lines are marked
/// `-`, added lines `+`.
pub fn gen_diff(expected: &str, actual: &str) -> String {
    let changes = Changeset::new(expected, actual, "\n");
    let mut buf = String::new();
    for row in rows(&changes) {
        let (marker, line) = match row.side {
            Side::Both => (" ".normal(), row.line.dimmed()),
            Side::Expected => ("-".red(), row.line.red()),
            Side::Actual => ("+".green(), row.line.green()),
        };
        buf.push_str(&format!(
            "{:>3} {:>3}│{}{}\n",
            row.expected, row.actual, marker, line
        ));
    }
    buf.trim_end().to_string()
}
