//! Terminal rendering helpers: boxed command reports, section formatting,
//! and the startup banner.

use colored::{Color, Colorize};
use std::env;

/// Rough probe for terminals where emoji and box-drawing glyphs render well.
pub fn supports_unicode() -> bool {
    if env::var_os("WT_SESSION").is_some() {
        return true;
    }
    if let Ok(program) = env::var("TERM_PROGRAM") {
        if matches!(program.as_str(), "vscode" | "iTerm.app" | "Apple_Terminal") {
            return true;
        }
    }
    if let Ok(term) = env::var("TERM") {
        let term = term.to_lowercase();
        return ["xterm", "rxvt", "screen", "tmux", "linux", "vt100"]
            .iter()
            .any(|t| term.contains(t));
    }
    false
}

/// Prefix a report title with its icon on capable terminals.
pub fn titled(icon: &str, title: &str) -> String {
    if supports_unicode() {
        format!("{icon} {title}")
    } else {
        title.to_string()
    }
}

pub fn format_section(title: &str, content: &str) -> String {
    format!("\n## {title}\n{content}\n")
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(80)
}

fn rule() -> String {
    let width = terminal_width().clamp(40, 100);
    let glyph = if supports_unicode() { "━" } else { "=" };
    glyph.repeat(width)
}

/// Render a command result between colored horizontal rules.
pub fn print_box(title: &str, content: &str, color: Color) {
    let rule = rule();
    println!();
    println!("{}", rule.as_str().color(color));
    println!("{}", format!(" {title}").color(color).bold());
    println!("{}", rule.as_str().color(color));
    for line in content.lines() {
        println!("{line}");
    }
    println!("{}", rule.as_str().color(color));
}

/// Shown before the help text when no command was given.
pub fn print_banner() {
    let rocket = if supports_unicode() { "🚀 " } else { "" };
    let rule = rule();
    println!("{}", rule.as_str().cyan());
    println!(
        "{}",
        format!(" {rocket}diffpilot: a Copilot CLI powered git assistant").cyan().bold()
    );
    println!(
        "{}",
        format!(" Version: v{}", env!("CARGO_PKG_VERSION")).cyan()
    );
    println!("{}", rule.as_str().cyan());
    println!();
}
