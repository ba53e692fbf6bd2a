use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use go_docker_run::docker::warn_unusable_mounts;
use go_docker_run::{compose, display_for_error, resolve_working_dir, CacheSettings, CommandInfo};

mod cli;

use cli::Cli;

fn run(cli: &Cli) -> Result<CommandInfo> {
    let payload = cli.payload()?;
    let working_dir = resolve_working_dir().context("could not get current directory")?;
    let cache = CacheSettings::from_env();
    let info = compose(&working_dir, &cache, &cli.docker_image, payload)?;

    warn_unusable_mounts(&[(info.cache_path(), "module cache")]);

    #[cfg(feature = "trace")]
    tracing::debug!(argv = ?info.to_args(), "composed invocation");

    Ok(info)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    go_docker_run::telemetry::init();

    match run(&cli) {
        Ok(info) => {
            println!("command: {info}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Errors go to stdout next to where the command would have been printed.
            println!("{}", display_for_error(&e));
            ExitCode::FAILURE
        }
    }
}
