//! The commit flow: staged diff in, generated message out, optionally
//! reviewed interactively, then committed.

use anyhow::{Context, Result};
use colored::Colorize;
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::Command as EditorCommand;

use crate::config::Config;
use crate::message::CommitMessage;
use crate::scratch::ScratchFile;
use crate::{copilot, extract, git, prompt};

pub struct CommitOptions {
    /// Skip the interactive review loop and commit directly.
    pub fast: bool,
    pub tickets: Vec<String>,
    pub template: Option<PathBuf>,
}

pub fn run(cfg: &Config, opts: &CommitOptions) -> Result<()> {
    log::info!("Preparing to generate commit message...");

    let Some(diff) = super::staged_diff_or_skip("No staged changes to commit.")? else {
        return Ok(());
    };

    let template = resolve_template(opts, cfg);

    log::info!("Generating commit message with Copilot...");
    let prompt = prompt::commit_message(&diff, template.as_deref());
    let raw = copilot::suggest_with_spinner(&prompt, cfg.suggest_timeout());

    let extracted = extract::extract(raw.as_deref(), "-m");
    let message = CommitMessage::assemble(&extracted, &opts.tickets);

    let accepted = if opts.fast {
        Some(message.to_text())
    } else {
        let mut stdin = io::stdin().lock();
        review_loop(message.to_text(), &mut stdin, &mut edit_in_editor)?
    };

    match accepted {
        Some(text) => {
            let message = CommitMessage::from_text(&text)
                .context("commit message is empty after review")?;
            log::info!("Commit message:");
            println!("{}", message.to_text());
            log::info!("Committing...");
            git::commit(message.segments())?;
            log::info!("Success!");
        }
        None => log::info!("Aborted."),
    }

    Ok(())
}

/// The `--template` flag wins over the configured template. A flag pointing
/// at an unreadable file is a warning, not an abort: generation continues
/// with the default rules.
fn resolve_template(opts: &CommitOptions, cfg: &Config) -> Option<String> {
    if let Some(path) = &opts.template {
        match fs::read_to_string(path) {
            Ok(text) => return Some(text),
            Err(err) => {
                log::warn!("could not read template file {}: {err}", path.display());
                return None;
            }
        }
    }
    cfg.resolve_template()
}

/// Present the candidate message and wait for one of accept / reject / edit.
///
/// States: presenting loops on unrecognized input and after edits; accept
/// and reject are terminal. An edit that comes back empty keeps the previous
/// candidate. EOF on the input counts as reject.
fn review_loop<R: BufRead>(
    initial: String,
    input: &mut R,
    edit: &mut dyn FnMut(&str) -> Result<String>,
) -> Result<Option<String>> {
    let mut current = initial;

    loop {
        render_candidate(&current);
        print!("Accept? (y/n/edit): ");
        io::stdout().flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }

        match answer.trim().to_lowercase().as_str() {
            "y" => return Ok(Some(current)),
            "n" => return Ok(None),
            "edit" => match edit(&current) {
                Ok(edited) if !edited.trim().is_empty() => {
                    current = edited.trim().to_string();
                }
                Ok(_) => log::info!("Empty edit ignored, keeping the previous message."),
                Err(err) => log::warn!("edit failed, keeping the previous message: {err:#}"),
            },
            _ => {}
        }
    }
}

fn render_candidate(text: &str) {
    let rule = "-".repeat(60);
    println!("\n{}", rule.as_str().yellow());
    println!("{}", text.yellow());
    println!("{}", rule.as_str().yellow());
}

/// Hand the candidate to the user's editor via a scratch file.
fn edit_in_editor(current: &str) -> Result<String> {
    let file = ScratchFile::create("copilot_edit", ".msg.txt", current)?;

    let editor = env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(windows) { "notepad" } else { "vi" }.to_string()
    });

    let status = EditorCommand::new(&editor)
        .arg(file.path())
        .status()
        .with_context(|| format!("failed to launch editor {editor:?}"))?;
    if !status.success() {
        anyhow::bail!("editor {editor:?} exited with status {:?}", status.code());
    }

    file.read()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn no_edit(_: &str) -> Result<String> {
        panic!("edit should not be called");
    }

    #[test]
    fn accept_returns_the_candidate() {
        let mut input = Cursor::new(b"y\n".to_vec());
        let result = review_loop("msg".to_string(), &mut input, &mut no_edit).unwrap();
        assert_eq!(result, Some("msg".to_string()));
    }

    #[test]
    fn reject_returns_none() {
        let mut input = Cursor::new(b"n\n".to_vec());
        let result = review_loop("msg".to_string(), &mut input, &mut no_edit).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn edit_then_accept_returns_the_edited_text() {
        let mut input = Cursor::new(b"edit\ny\n".to_vec());
        let mut edit = |_: &str| Ok("new text".to_string());
        let result = review_loop("old".to_string(), &mut input, &mut edit).unwrap();
        assert_eq!(result, Some("new text".to_string()));
    }

    #[test]
    fn empty_edit_keeps_the_previous_candidate() {
        let mut input = Cursor::new(b"edit\ny\n".to_vec());
        let mut edit = |_: &str| Ok("   ".to_string());
        let result = review_loop("original".to_string(), &mut input, &mut edit).unwrap();
        assert_eq!(result, Some("original".to_string()));
    }

    #[test]
    fn unrecognized_input_re_prompts() {
        let mut input = Cursor::new(b"maybe\nY\n".to_vec());
        let result = review_loop("msg".to_string(), &mut input, &mut no_edit).unwrap();
        assert_eq!(result, Some("msg".to_string()));
    }

    #[test]
    fn eof_counts_as_reject() {
        let mut input = Cursor::new(Vec::new());
        let result = review_loop("msg".to_string(), &mut input, &mut no_edit).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn failing_edit_keeps_the_previous_candidate() {
        let mut input = Cursor::new(b"edit\ny\n".to_vec());
        let mut edit = |_: &str| anyhow::bail!("editor exploded");
        let result = review_loop("stable".to_string(), &mut input, &mut edit).unwrap();
        assert_eq!(result, Some("stable".to_string()));
    }
}
