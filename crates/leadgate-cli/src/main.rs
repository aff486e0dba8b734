mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{check, completions, dataset, env_check, print_json, Context};
use crate::error::{error_payload, exit_code_for, report_error};
use leadgate_config as config;
use leadgate_store::{DatasetStore, DecisionLog};

#[derive(Debug, Parser)]
#[command(
    name = "leadgate",
    version,
    about = "Screen offer submissions for duplicates and rapid repeats"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a submission against the dataset
    Check(check::CheckArgs),
    #[command(subcommand)]
    Dataset(dataset::DatasetCommand),
    /// Print the resolved configuration
    #[command(name = "env-check")]
    EnvCheck,
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let json = cli.json;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json {
                let _ = print_json(&error_payload(&err));
            }
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => run_with_config(command, config_path, json, verbose),
    }
}

fn run_with_config(
    command: Command,
    config_path: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
        debug!(
            path = %app_config.dataset.path.display(),
            format = app_config.dataset.format.as_str(),
            "dataset resolved"
        );
    }

    let store = DatasetStore::open(&app_config.dataset.path, app_config.dataset.format);
    let log = DecisionLog::new(app_config.log_path.clone());
    let ctx = Context {
        config: &app_config,
        store: &store,
        log: &log,
        json,
    };

    match command {
        Command::Check(args) => check::check(&ctx, args),
        Command::Dataset(cmd) => match cmd {
            dataset::DatasetCommand::Rows(args) => dataset::list_rows(&ctx, args),
            dataset::DatasetCommand::Lookup(args) => dataset::lookup(&ctx, args),
        },
        Command::EnvCheck => env_check::env_check(&ctx),
        Command::Completions(_) => {
            unreachable!("completions command handled before config load")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
