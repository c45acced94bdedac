mod cli_args;
mod commands;
mod config;
mod copilot;
mod extract;
mod git;
mod logging;
mod message;
mod prompt;
mod scratch;
mod term;

use anyhow::{Result, bail};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use cli_args::{Cli, Command};
use commands::commit::CommitOptions;
use config::Config;
use prompt::ReviewFocus;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
            show_help();
            return;
        }
        Err(err) => err.exit(),
    };

    logging::init_logger(cli.verbose);
    let cfg = Config::load();

    if let Err(err) = run(cli, &cfg) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, cfg: &Config) -> Result<()> {
    match cli.command {
        None => {
            show_help();
            Ok(())
        }
        Some(Command::Commit {
            fast,
            tickets,
            template,
        }) => {
            preflight()?;
            commands::commit::run(
                cfg,
                &CommitOptions {
                    fast,
                    tickets,
                    template,
                },
            )
        }
        Some(Command::Review { perf, sec }) => {
            preflight()?;
            commands::review::run(cfg, ReviewFocus::from_flags(perf, sec))
        }
        Some(Command::Clean) => {
            preflight()?;
            commands::clean::run(cfg)
        }
        Some(Command::Standard) => {
            preflight()?;
            commands::standard::run(cfg)
        }
        Some(Command::Pr { template }) => {
            preflight()?;
            commands::pr::run(cfg, template.as_ref())
        }
        Some(Command::Explain) => {
            preflight()?;
            commands::explain::run(cfg)
        }
        Some(Command::Analyze) => {
            preflight()?;
            commands::analyze::run(cfg)
        }
        Some(Command::Uptodate { main_branch }) => {
            require_repository()?;
            commands::uptodate::run(&main_branch)
        }
    }
}

/// Every suggestion-backed command needs a repository and a working Copilot
/// CLI before any prompt is built.
fn preflight() -> Result<()> {
    require_repository()?;

    log::debug!("checking Copilot installation...");
    if !copilot::check_installed_cached() {
        bail!(
            "the standalone \"copilot\" CLI is not installed or not working; \
             ensure the \"copilot\" command is available in your PATH"
        );
    }
    Ok(())
}

fn require_repository() -> Result<()> {
    if !git::is_repository() {
        bail!("not a git repository");
    }
    Ok(())
}

fn show_help() {
    term::print_banner();
    let mut cmd = Cli::command();
    let _ = cmd.print_help();
    println!();
}
