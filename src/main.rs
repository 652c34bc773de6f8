//! RadioMix - radio mixes and audio streams for any song
//!
//! # Usage
//!
//! ```bash
//! radiomix mix "bohemian rhapsody" --limit 10
//! radiomix relay https://youtu.be/fJ9rUzIMcZQ --title "Bohemian Rhapsody"
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use radiomix::cli::{Cli, Command, ExitCode, Output};
use radiomix::commands;
use radiomix::config::Config;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    run_cli(cli).await.into()
}

/// Logs go to stderr so stdout stays clean for JSON and audio
fn init_logging(verbose: bool) {
    let default = if verbose { "radiomix=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    match cli.command {
        Command::Mix(cmd) => commands::mix_cmd(cmd, &config, &output).await,
        Command::Relay(cmd) => commands::relay_cmd(cmd, &config, &output).await,
    }
}
