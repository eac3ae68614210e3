//! hitscroll CLI
//!
//! Command-line interface for flattening paginated search results

use clap::Parser;
use hitscroll::cli::{Cli, Runner};

fn main() {
    let cli = Cli::parse();

    // Initialize logging on stderr; stdout carries the hits
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
