//! Logging and tracing configuration.
//!
//! Logs go to STDERR so that they never interleave with the test report on
//! STDOUT.
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Default filter directive for a `-v` count.
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "acctest=warn",
        1 => "acctest=debug,warn",
        _ => "acctest=trace,info",
    }
}

/// Initialize tracing for the CLI.
///
/// Logs are controlled by the `RUST_LOG` environment variable. Without it
/// the level follows the number of `-v` flags.
pub fn init_cli(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}
