use acctest::{
    cli, errors,
    executor::{self, suite::NameFilter},
    logging,
    picker::toml::Config,
};

use cli::Opts;
use errors::Error;
use regex::Regex;
use structopt::StructOpt;
use tokio::runtime;

fn dry_run(configs: &[Config]) {
    use colored::*;
    for Config { file, suite } in configs {
        for case in &suite.cases {
            let test = executor::Test {
                program: &suite.path,
                dir: &suite.dir,
                case,
            };
            println!(
                "{}{}{}\n  {}",
                file.display().to_string().blue(),
                ":".blue(),
                case.name.blue(),
                test.command_line()
            );
        }
    }
}

fn run() -> Result<i32, Error> {
    let opts = Opts::from_args();
    logging::init_cli(opts.verbose);

    // Get the include and exclude regexes.
    let include = opts.include_filter.as_deref().map(Regex::new).transpose()?;
    let exclude = opts.exclude_filter.as_deref().map(Regex::new).transpose()?;
    let filter = NameFilter::default()
        .with_include_filter(include.as_ref())
        .with_exclude_filter(exclude.as_ref());

    // Every configuration is loaded before any case runs.
    let configs = opts
        .config_paths()?
        .iter()
        .map(|path| {
            Config::from_path(path).map(|conf| Config {
                suite: conf.suite.with_filters(&filter),
                file: conf.file,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Print out the commands for each test in dry run mode.
    if opts.dry_run {
        dry_run(&configs);
        return Ok(0);
    }

    let ctx = executor::Context::from(configs)
        .with_strict(opts.strict)
        .with_diff(opts.diff);
    let runtime = runtime::Builder::new_current_thread().enable_all().build()?;

    // Run all the test suites.
    runtime.block_on(ctx.flat_summary())
}

fn main() {
    std::process::exit(match run() {
        Err(err) => {
            eprintln!("error: {}", err);
            1
        }
        Ok(failed_tests) => failed_tests,
    })
}
