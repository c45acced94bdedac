use anyhow::Result;

use crate::config::Config;
use crate::{copilot, extract, prompt};

pub fn run(cfg: &Config) -> Result<()> {
    let Some(diff) = super::staged_diff_or_skip("No staged changes.")? else {
        return Ok(());
    };

    log::info!("Explaining staged changes with Copilot...");
    let prompt = prompt::explain_diff(&diff);
    let raw = copilot::suggest_with_spinner(&prompt, cfg.suggest_timeout());

    let explanation = extract::clean_shell_artifacts(raw.as_deref().unwrap_or(""));
    if explanation.is_empty() {
        println!("No explanation returned.");
    } else {
        println!("{explanation}");
    }
    Ok(())
}
