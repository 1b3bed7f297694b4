use std::path::PathBuf;
use structopt::StructOpt;

use crate::errors::{self, Error};

/// Options for the CLI.
#[derive(StructOpt, Debug)]
#[structopt(
    name = "acctest",
    about = "Lightweight acceptance testing for command-line programs."
)]
pub struct Opts {
    /// Test suite configuration files. Glob patterns are expanded.
    #[structopt(name = "CONFIG", required = true)]
    pub configs: Vec<String>,

    /// Show line diffs for mismatching output.
    #[structopt(short, long)]
    pub diff: bool,

    /// Only run test cases whose name matches this regex.
    #[structopt(short, long = "include")]
    pub include_filter: Option<String>,

    /// Skip test cases whose name matches this regex.
    #[structopt(short = "x", long = "exclude")]
    pub exclude_filter: Option<String>,

    /// Print the command for each test case without running anything.
    #[structopt(short = "n", long)]
    pub dry_run: bool,

    /// Compare line endings strictly in every suite.
    #[structopt(long)]
    pub strict: bool,

    /// Increase log verbosity. Can be repeated.
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,
}

impl Opts {
    /// Expand the configuration arguments into file paths, keeping argument
    /// order. A pattern that matches nothing is kept as a literal path so
    /// that reading it reports the problem.
    pub fn config_paths(&self) -> errors::Result<Vec<PathBuf>> {
        let mut paths = vec![];
        for pattern in &self.configs {
            let mut matched = glob::glob(pattern)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| {
                    let path = err.path().to_path_buf();
                    Error::fs(path, err.into_error())
                })?;
            if matched.is_empty() {
                tracing::debug!(%pattern, "pattern matched nothing");
                paths.push(PathBuf::from(pattern));
            } else {
                matched.sort();
                paths.append(&mut matched);
            }
        }
        Ok(paths)
    }
}
