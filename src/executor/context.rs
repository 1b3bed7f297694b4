use colored::*;
use futures::io::{AllowStdIo, AsyncWrite, AsyncWriteExt};
use std::ops::AddAssign;

use super::{compare::Policy, results, suite::TestSuite, Test};
use crate::{errors, picker::toml::Config};

/// Counts of case outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    /// Cases skipped because an earlier case failed.
    pub not_run: usize,
}

impl AddAssign for Summary {
    fn add_assign(&mut self, other: Self) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.not_run += other.not_run;
    }
}

impl Summary {
    pub fn report_str(&self) -> String {
        format!(
            "  {} / {} / {}",
            format!("{} passed", self.passed).green(),
            format!("{} failed", self.failed).red(),
            format!("{} not run", self.not_run).dimmed(),
        )
    }
}

/// An execution context runs test suites one case at a time, in
/// configuration order, and streams out each result as soon as it is known.
pub struct Context {
    /// Loaded suites to be executed.
    configs: Vec<Config>,
    /// Compare every suite strictly regardless of its own setting.
    force_strict: bool,
    /// Show line diffs for mismatching output.
    show_diff: bool,
}

impl Context {
    pub fn with_strict(mut self, force_strict: bool) -> Self {
        self.force_strict = force_strict;
        self
    }

    pub fn with_diff(mut self, show_diff: bool) -> Self {
        self.show_diff = show_diff;
        self
    }

    /// Run every case of `suite`, writing one report per case. Stops after
    /// the first failure unless the suite continues on failure.
    pub async fn run_suite<W: AsyncWrite + Unpin>(
        &self,
        suite: &TestSuite,
        out: &mut W,
    ) -> errors::Result<Summary> {
        let policy =
            Policy::from_strict(self.force_strict || suite.line_endings_strict);
        let mut summary = Summary::default();

        for (idx, case) in suite.cases.iter().enumerate() {
            let test = Test {
                program: &suite.path,
                dir: &suite.dir,
                case,
            };
            let result = match test.execute().await {
                Ok(exec) => results::Test::compare(case, &exec, policy),
                Err(err) => {
                    tracing::warn!(case = %case.name, error = %err, "could not run case");
                    results::Test::not_started(case, &err)
                }
            };

            let buf = result.report_str(self.show_diff) + "\n";
            out.write_all(buf.as_bytes()).await?;
            out.flush().await?;

            if result.passed() {
                summary.passed += 1;
            } else {
                summary.failed += 1;
                if !suite.continue_on_fail {
                    summary.not_run = suite.cases.len() - idx - 1;
                    tracing::debug!(
                        case = %case.name,
                        skipped = summary.not_run,
                        "stopping suite after failure"
                    );
                    break;
                }
            }
        }
        Ok(summary)
    }

    /// Run all suites, writing a header, the case reports, and a summary
    /// line for each.
    pub async fn report<W: AsyncWrite + Unpin>(
        &self,
        mut out: W,
    ) -> errors::Result<Summary> {
        let mut total = Summary::default();
        for Config { file, suite } in &self.configs {
            let header = format!(
                "{} ({} tests)\n",
                file.display().to_string().bold(),
                suite.cases.len()
            );
            out.write_all(header.as_bytes()).await?;

            let summary = self.run_suite(suite, &mut out).await?;
            let line = summary.report_str() + "\n";
            out.write_all(line.as_bytes()).await?;
            out.flush().await?;
            total += summary;
        }
        Ok(total)
    }

    /// Run all suites and report to STDOUT. Returns the number of failing
    /// cases.
    pub async fn flat_summary(self) -> errors::Result<i32> {
        let stdout_buf = std::io::BufWriter::new(std::io::stdout());
        let summary = self.report(AllowStdIo::new(stdout_buf)).await?;
        // Exit statuses wrap at 256.
        Ok(summary.failed.min(255) as i32)
    }
}

/// Construct a Context from loaded configurations.
impl From<Vec<Config>> for Context {
    fn from(configs: Vec<Config>) -> Self {
        Context {
            configs,
            force_strict: false,
            show_diff: false,
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::executor::suite::TestCase;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    /// A program that prints "3" for `1 2`, "good" with exit 1 for `x`, and
    /// echoes anything else.
    const PROG: &str = r#"
case "$*" in
  "1 2") printf 3 ;;
  x) printf good; exit 1 ;;
  *) printf '%s' "$*" ;;
esac
"#;

    fn case(name: &str, input: &str, output: &str, exit_code: i64) -> TestCase {
        TestCase {
            name: name.into(),
            input: format!("prog.sh {}", input),
            output: output.into(),
            output_err: String::new(),
            exit_code,
        }
    }

    fn suite(dir: &Path, continue_on_fail: bool) -> TestSuite {
        std::fs::write(dir.join("prog.sh"), PROG).unwrap();
        TestSuite {
            path: PathBuf::from("/bin/sh"),
            dir: dir.to_path_buf(),
            continue_on_fail,
            line_endings_strict: false,
            cases: vec![
                case("A", "1 2", "3", 0),
                case("B", "x", "bad", 1),
                case("C", "echo", "echo", 0),
            ],
        }
    }

    async fn run(ctx: &Context, suite: &TestSuite) -> (Summary, String) {
        let mut out = AllowStdIo::new(Vec::new());
        let summary = ctx.run_suite(suite, &mut out).await.unwrap();
        (summary, String::from_utf8(out.into_inner()).unwrap())
    }

    #[tokio::test]
    async fn continue_on_fail_runs_everything() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::from(vec![]);
        let (summary, out) = run(&ctx, &suite(dir.path(), true)).await;

        assert_eq!(
            summary,
            Summary {
                passed: 2,
                failed: 1,
                not_run: 0
            }
        );
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].starts_with("A.") && lines[0].ends_with(" OK"));
        assert!(lines[1].starts_with("B.") && lines[1].ends_with(" FAIL"));
        assert_eq!(
            lines[2],
            "    stdout: expected \"bad\", got \"good\""
        );
        assert!(lines[3].starts_with("C.") && lines[3].ends_with(" OK"));
        assert_eq!(lines.len(), 4);
    }

    #[tokio::test]
    async fn stops_after_first_failure() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::from(vec![]);
        let (summary, out) = run(&ctx, &suite(dir.path(), false)).await;

        assert_eq!(
            summary,
            Summary {
                passed: 1,
                failed: 1,
                not_run: 1
            }
        );
        assert!(!out.contains("C."));
    }

    #[tokio::test]
    async fn forced_strict_comparison() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let mut s = suite(dir.path(), true);
        s.cases = vec![case("crlf", "line", "line\r\n", 0)];
        std::fs::write(dir.path().join("prog.sh"), "printf 'line\\n'\n")
            .unwrap();

        let (summary, _) = run(&Context::from(vec![]), &s).await;
        assert_eq!(summary.passed, 1);

        let strict = Context::from(vec![]).with_strict(true);
        let (summary, _) = run(&strict, &s).await;
        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn spawn_failure_is_a_case_failure() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let mut s = suite(dir.path(), true);
        s.path = dir.path().join("absent");

        let (summary, out) = run(&Context::from(vec![]), &s).await;
        assert_eq!(summary.failed, 3);
        assert_eq!(
            out.matches("exit code could not be attained").count(),
            3
        );
    }

    #[tokio::test]
    async fn report_prints_header_and_summary() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::from(vec![Config {
            file: dir.path().join("suite.toml"),
            suite: suite(dir.path(), true),
        }]);
        let mut out = AllowStdIo::new(Vec::new());
        let total = ctx.report(&mut out).await.unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert_eq!(total.failed, 1);
        assert!(text.starts_with(&format!(
            "{} (3 tests)\n",
            dir.path().join("suite.toml").display()
        )));
        assert!(text.ends_with("  2 passed / 1 failed / 0 not run\n"));
    }
}
