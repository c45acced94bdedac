use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "diffpilot",
    version,
    about = "Copilot CLI powered git assistant"
)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand (e.g. 'commit')
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a commit message for staged changes and commit them
    Commit {
        /// Skip the interactive review and commit the generated message directly
        #[arg(long = "f")]
        fast: bool,

        /// Ticket references to append to the commit message
        #[arg(long = "t", value_name = "ref1,ref2,...", value_delimiter = ',')]
        tickets: Vec<String>,

        /// Use a custom template file for commit message generation
        #[arg(long, value_name = "file")]
        template: Option<PathBuf>,
    },

    /// Review staged changes for clean code, performance, or security issues
    #[command(group(
        ArgGroup::new("focus")
            .args(["perf", "sec"])
            .multiple(false)
    ))]
    Review {
        /// Focus on performance issues
        #[arg(long)]
        perf: bool,

        /// Focus on security issues
        #[arg(long)]
        sec: bool,
    },

    /// Report leftover debug artifacts in staged changes
    Clean,

    /// Check staged changes against the configured team coding standards
    Standard,

    /// Generate a pull request description for staged changes
    Pr {
        /// Use a custom template file for the PR description
        #[arg(long, value_name = "file")]
        template: Option<PathBuf>,
    },

    /// Explain the staged changes in plain English
    Explain,

    /// Analyze staged changes for commit type and potential breaking changes
    Analyze,

    /// Update the current branch from the main branch, keeping changes safe
    Uptodate {
        /// Name of the main branch
        #[arg(long = "m", value_name = "branch", default_value = "master")]
        main_branch: String,
    },
}
