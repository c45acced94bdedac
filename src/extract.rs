//! Recovers structured result lines from raw Copilot output.
//!
//! The prompts instruct the engine to start every result line with a fixed
//! token (`-m`, `-c`, `-s`, `-r`), but the engine is free text underneath and
//! sometimes wraps its answer as a shell command anyway. Everything here is
//! defensive: malformed input degrades to an empty string, never an error.

/// Keep only lines whose trimmed form starts with `token`, strip the token
/// and the whitespace run after it, join with newlines, then clean up any
/// shell wrapping the engine added on top.
pub fn extract(raw: Option<&str>, token: &str) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    if raw.trim().is_empty() {
        return String::new();
    }

    let kept: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(token))
        .map(|line| line[token.len()..].trim_start())
        .collect();

    clean_shell_artifacts(&kept.join("\n"))
}

/// Strip the shell-command dressing the engine sometimes emits: a leading
/// `echo` word, one wrapping quote pair, and escaped `\n` sequences.
pub fn clean_shell_artifacts(output: &str) -> String {
    let mut clean = output.trim();

    if let Some(rest) = clean.strip_prefix("echo") {
        let boundary = rest.is_empty()
            || rest.starts_with(char::is_whitespace)
            || rest.starts_with('"')
            || rest.starts_with('\'');
        if boundary {
            clean = rest.trim_start();
        }
    }

    if let Some(inner) = strip_wrapping(clean, '"') {
        clean = inner;
    }
    if let Some(inner) = strip_wrapping(clean, '\'') {
        clean = inner;
    }

    clean.replace("\\n", "\n")
}

/// Remove one wrapping quote pair, but only when the pair spans the whole
/// text: `"a" and "b"` must keep its quotes, `"hello"` must not.
pub(crate) fn strip_wrapping(text: &str, quote: char) -> Option<&str> {
    let inner = text.strip_prefix(quote)?.strip_suffix(quote)?;
    if inner.contains(quote) {
        return None;
    }
    Some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_raw_yields_empty() {
        assert_eq!(extract(None, "-m"), "");
        assert_eq!(extract(Some(""), "-m"), "");
        assert_eq!(extract(Some("   \n  "), "-m"), "");
    }

    #[test]
    fn foreign_prefixes_yield_empty() {
        let raw = "Here is your commit:\n* bullet\n> quote";
        assert_eq!(extract(Some(raw), "-m"), "");
    }

    #[test]
    fn round_trip_strips_token_and_joins() {
        let raw = "-m line1\n-m line2";
        assert_eq!(extract(Some(raw), "-m"), "line1\nline2");
    }

    #[test]
    fn indented_token_lines_are_kept() {
        let raw = "  -r [HIGH] src/lib.rs: unchecked unwrap";
        assert_eq!(extract(Some(raw), "-r"), "[HIGH] src/lib.rs: unchecked unwrap");
    }

    #[test]
    fn mid_line_tokens_do_not_match() {
        let raw = "use -r wisely\nprefer -m for messages";
        assert_eq!(extract(Some(raw), "-r"), "");
    }

    #[test]
    fn token_match_is_case_sensitive() {
        assert_eq!(extract(Some("-R finding"), "-r"), "");
    }

    #[test]
    fn prose_between_token_lines_is_dropped() {
        let raw = "Sure, here you go:\n-c leftover println! in src/main.rs\nHope that helps!";
        assert_eq!(extract(Some(raw), "-c"), "leftover println! in src/main.rs");
    }

    #[test]
    fn echo_and_quotes_are_stripped() {
        assert_eq!(
            clean_shell_artifacts(r#"echo "hello\nworld""#),
            "hello\nworld"
        );
    }

    #[test]
    fn echo_without_boundary_is_not_a_command() {
        assert_eq!(clean_shell_artifacts("echoed output"), "echoed output");
    }

    #[test]
    fn nested_quote_layers_are_unwrapped_once_each() {
        assert_eq!(clean_shell_artifacts(r#""'hello'""#), "hello");
    }

    #[test]
    fn quotes_spanning_separate_segments_survive() {
        let raw = "\"feat: x\"\n\"fix: y\"";
        assert_eq!(clean_shell_artifacts(raw), raw);
    }

    #[test]
    fn single_quoted_output_is_unwrapped() {
        assert_eq!(clean_shell_artifacts("'fix: typo'"), "fix: typo");
    }
}
