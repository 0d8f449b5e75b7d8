use clap::Parser;
use tracing::debug;

use codecheck::cli::Cli;
use codecheck::commands::run_check;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = run_check(&cli);

    std::process::exit(exit_code);
}

/// Initialize tracing/logging based on CLI flags. `RUST_LOG` takes precedence.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}
