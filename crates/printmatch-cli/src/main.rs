//! `printmatch`: encode and decode SKUs, suggest print files for product
//! variants, and apply approved assignments.
//!
//! Exit status: 0 success, 1 internal failure (including partially failed
//! applies), 2 bad input, 3 missing catalog/file/print file, 4 bad
//! configuration.

use std::{io::IsTerminal as _, process::ExitCode};

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Optional; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version also land here, with a zero exit.
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("{e}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.shows_causes();
    match start(cli) {
        Ok(()) => {
            info!("done");
            ExitCode::SUCCESS
        }
        Err(e) => report(&e, verbose),
    }
}

fn start(cli: Cli) -> CliResult<()> {
    debug!(verbose = cli.global.verbose, quiet = cli.global.quiet, "starting");

    let config =
        AppConfig::load(cli.global.config.as_ref()).map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: Some(e.into()),
        })?;
    let output = OutputManager::new(&cli.global, &config);

    dispatch(cli.command, &config, output)
}

#[instrument(skip_all)]
fn dispatch(command: Commands, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    match command {
        Commands::Encode(args) => commands::encode::execute(args, output),
        Commands::Decode(args) => commands::decode::execute(args, output),
        Commands::Suggest(args) => commands::suggest::execute(args, output, config),
        Commands::Apply(args) => commands::apply::execute(args, output, config),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Log the failure, explain it on stderr, and pick the exit status.
fn report(err: &CliError, verbose: bool) -> ExitCode {
    err.log();
    let color = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    eprint!("{}", err.render(verbose, color));
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn version_comes_from_the_manifest() {
        assert_eq!(Cli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn every_subcommand_is_wired() {
        let names: Vec<_> = Cli::command()
            .get_subcommands()
            .map(|c| c.get_name().to_owned())
            .collect();
        assert_eq!(names, ["encode", "decode", "suggest", "apply", "config"]);
    }
}
