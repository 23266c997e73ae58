//! ampackage CLI entry point
//!
//! Parses the command line, sets up logging, runs the command and turns any
//! failure into a user-facing message with exit status 1.

use ampackage::cli::Cli;
use ampackage::core::user_friendly_error;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level comes from `--verbose` /
/// `--quiet`.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_filter());

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute().await {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
