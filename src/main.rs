mod cli;
mod commands;
mod format;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command, &cli.options) {
        tracing::error!(error = %e, "command failed");
        eprintln!("pasteboardctl: {e}");
        std::process::exit(1);
    }
}
