use anyhow::Result;
use colored::Color;

use crate::config::Config;
use crate::{copilot, extract, prompt, term};

pub fn run(cfg: &Config) -> Result<()> {
    let Some(diff) = super::staged_diff_or_skip("No staged changes to analyze.")? else {
        return Ok(());
    };

    log::info!("Generating clean report with Copilot...");
    let prompt = prompt::clean_report(&diff);
    let raw = copilot::suggest_with_spinner(&prompt, cfg.suggest_timeout());

    let report = extract::extract(raw.as_deref(), "-c");
    let body = if report.is_empty() {
        "No debug artifacts reported.".to_string()
    } else {
        report
    };

    term::print_box(
        &term::titled("✨", "CLEAN COMMAND RESULTS"),
        &body,
        Color::Magenta,
    );
    Ok(())
}
