use regex::Regex;
use std::path::PathBuf;

/// One named invocation of the program under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Name of the case, taken from its table header.
    pub name: String,
    /// Space separated arguments passed to the program.
    pub input: String,
    /// Expected STDOUT.
    pub output: String,
    /// Expected STDERR.
    pub output_err: String,
    /// Expected exit code.
    pub exit_code: i64,
}

/// Defines a test suite which is the program under test, its test cases, and
/// suite wide options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSuite {
    /// Program to execute for every case. Made absolute by the picker before
    /// the suite is run.
    pub path: PathBuf,
    /// Working directory for the program. Defaults to the directory
    /// containing the configuration file.
    pub dir: PathBuf,
    /// Keep running cases after one fails.
    pub continue_on_fail: bool,
    /// Compare outputs byte for byte, including line endings.
    pub line_endings_strict: bool,
    /// Cases in the order they appear in the configuration.
    pub cases: Vec<TestCase>,
}

/// Filters applied to case names before a suite runs.
#[derive(Default)]
pub struct NameFilter<'a> {
    exclude: Option<&'a Regex>,
    include: Option<&'a Regex>,
}

impl<'a> NameFilter<'a> {
    /// Remove cases whose name matches the filter.
    pub fn with_exclude_filter(mut self, exclude: Option<&'a Regex>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Only keep cases whose name matches the filter.
    pub fn with_include_filter(mut self, include: Option<&'a Regex>) -> Self {
        self.include = include;
        self
    }

    pub fn accepts(&self, name: &str) -> bool {
        let excluded = self.exclude.map_or(false, |ex| ex.is_match(name));
        let included = self.include.map_or(true, |inc| inc.is_match(name));
        included && !excluded
    }
}

impl TestSuite {
    /// Drop the cases rejected by `filter`, keeping the order of the rest.
    pub fn with_filters(mut self, filter: &NameFilter) -> Self {
        let before = self.cases.len();
        self.cases.retain(|case| filter.accepts(&case.name));
        if self.cases.len() != before {
            tracing::info!(
                kept = self.cases.len(),
                dropped = before - self.cases.len(),
                "filtered test cases"
            );
        }
        self
    }
}
