use anyhow::{Context, Result, bail};
use colored::Color;
use std::fs;

use crate::config::Config;
use crate::{copilot, extract, prompt, term};

pub fn run(cfg: &Config) -> Result<()> {
    let Some(standards_path) = &cfg.standards_file else {
        bail!("the standard command requires `standards_file` to be set in .diffpilot.toml");
    };

    let Some(diff) = super::staged_diff_or_skip("No staged changes to analyze.")? else {
        return Ok(());
    };

    let standards = fs::read_to_string(standards_path).with_context(|| {
        format!(
            "could not read team coding standards file {}",
            standards_path.display()
        )
    })?;
    if standards.trim().is_empty() {
        log::warn!(
            "team coding standards file is empty: {}",
            standards_path.display()
        );
    }

    log::info!("Generating standards report with Copilot...");
    let prompt = prompt::coding_standards(&diff, &standards);
    let raw = copilot::suggest_with_spinner(&prompt, cfg.suggest_timeout());

    let report = extract::extract(raw.as_deref(), "-s");
    let body = if report.is_empty() {
        "No violations reported.".to_string()
    } else {
        report
    };

    term::print_box(
        &term::titled("📏", "STANDARD COMMAND RESULTS"),
        &body,
        Color::Green,
    );
    Ok(())
}
