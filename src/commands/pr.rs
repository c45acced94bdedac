use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::{copilot, extract, prompt};

pub fn run(cfg: &Config, template_path: Option<&PathBuf>) -> Result<()> {
    let Some(diff) = super::staged_diff_or_skip("No staged changes.")? else {
        return Ok(());
    };

    let template = template_path.and_then(|path| match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) => {
            log::warn!("could not read template file {}: {err}", path.display());
            None
        }
    });

    log::info!("Generating PR description...");
    let prompt = prompt::pr_description(&diff, template.as_deref());
    let raw = copilot::suggest_with_spinner(&prompt, cfg.suggest_timeout());

    let description = extract::clean_shell_artifacts(raw.as_deref().unwrap_or(""));
    let body = if description.is_empty() {
        "No description generated.".to_string()
    } else {
        description
    };

    println!("\nProposed PR Description:\n");
    println!("{body}");
    Ok(())
}
