use anyhow::Result;
use colored::Color;

use crate::config::Config;
use crate::prompt::ReviewFocus;
use crate::{copilot, extract, prompt, term};

pub fn run(cfg: &Config, focus: ReviewFocus) -> Result<()> {
    let Some(diff) = super::staged_diff_or_skip("No staged changes to analyze.")? else {
        return Ok(());
    };

    log::info!("Generating review with Copilot...");
    let prompt = prompt::review(&diff, focus);
    let raw = copilot::suggest_with_spinner(&prompt, cfg.suggest_timeout());

    let report = extract::extract(raw.as_deref(), "-r");
    let body = if report.is_empty() {
        "No findings reported.".to_string()
    } else {
        report
    };

    term::print_box(
        &term::titled("👀", "REVIEW COMMAND RESULTS"),
        &body,
        Color::Cyan,
    );
    Ok(())
}
