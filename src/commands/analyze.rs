use anyhow::Result;

use crate::config::Config;
use crate::{copilot, git, prompt, term};

pub fn run(cfg: &Config) -> Result<()> {
    let Some(diff) = super::staged_diff_or_skip("No staged changes.")? else {
        return Ok(());
    };

    log::info!("Analyzing changes...");
    let files = git::staged_files()?;
    let prompt = prompt::analyze_diff(&diff);
    let raw = copilot::suggest_with_spinner(&prompt, cfg.suggest_timeout());

    println!("{}", term::format_section("Files Involved", &files.join("\n")));
    println!(
        "{}",
        term::format_section(
            "Copilot Analysis",
            raw.as_deref().unwrap_or("No analysis returned"),
        )
    );

    if breaking_change_suspected(&diff) {
        let marker = if term::supports_unicode() { "⚠️  " } else { "" };
        println!("\n{marker}POTENTIAL BREAKING CHANGE DETECTED\n");
    }
    Ok(())
}

// Crude heuristic: a BREAKING CHANGE footer or a conventional-commit bang.
fn breaking_change_suspected(diff: &str) -> bool {
    diff.contains("BREAKING CHANGE") || diff.contains("!:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaking_footer_is_detected() {
        assert!(breaking_change_suspected("+BREAKING CHANGE: renamed api"));
        assert!(breaking_change_suspected("+feat!: drop legacy flag"));
        assert!(!breaking_change_suspected("+fix: quiet path"));
    }
}
