//! Prompt builders: pure functions mapping a staged diff (plus options) to
//! the instruction text sent to the Copilot CLI.
//!
//! Every builder embeds an output contract the extractor can rely on, forbids
//! conversational filler, and brackets the diff with explicit markers so the
//! engine cannot confuse instructions with diff content.

mod rules;

pub use rules::ReviewFocus;

/// Character cap for diffs embedded in prompts that tolerate truncation.
/// Commit-message prompts always embed the full diff: commit accuracy depends
/// on complete context, while the other tasks trade tail context for cost.
pub const EMBED_DIFF_LIMIT: usize = 3000;

/// Trim the diff and cap it at `max_chars` characters (never mid-codepoint).
/// Idempotent: bounding an already bounded diff changes nothing.
pub fn bound_diff(diff: &str, max_chars: Option<usize>) -> String {
    let trimmed = diff.trim();
    match max_chars {
        Some(n) => {
            let cut: String = trimmed.chars().take(n).collect();
            cut.trim_end().to_string()
        }
        None => trimmed.to_string(),
    }
}

pub fn commit_message(diff: &str, template: Option<&str>) -> String {
    let format_rules = match template {
        Some(t) if !t.trim().is_empty() => rules::template_contract(t),
        _ => rules::CONVENTIONAL_COMMIT_RULES.to_string(),
    };

    format!(
        r#"You are generating ONLY git commit message arguments.

# TASK:
Produce commit message parts (-m "...") for the staged changes, following the
Conventional Commits standard and based ONLY on the supplied git diff.

# EXECUTION MODE (MANDATORY):
- This is a NON-INTERACTIVE generation task.
- Produce output only. No questions, no explanations.

# OUTPUT CONTRACT:
- Every output line MUST start exactly with: -m "
- Each line must be a valid standalone git -m argument
- Do NOT output a git commit command
- Do NOT include explanations, markdown, headings, or blank lines

# GLOBAL RULES:
- Do NOT invent changes that are not present in the diff
- Prefer clarity and determinism over creativity
- When the diff is ambiguous, choose the simplest valid commit message
- Do NOT escape quotes unless required for shell safety

{body_rules}

{format_rules}

# INPUT DIFF (SOURCE OF TRUTH):

GIT DIFF START:
{diff}
GIT DIFF END"#,
        body_rules = rules::BODY_RULES,
        format_rules = format_rules,
        diff = bound_diff(diff, None),
    )
}

pub fn review(diff: &str, focus: ReviewFocus) -> String {
    format!(
        r#"You are reviewing staged git changes.

# TASK:
Write a {title} report for the supplied diff.

# EXECUTION MODE (MANDATORY):
- This is a NON-INTERACTIVE generation task.
- Produce output only. No questions, no explanations.

# OUTPUT CONTRACT:
- Every output line MUST start exactly with: -r
- One finding per line, formatted as: -r [SEVERITY] file: finding
- SEVERITY is one of: HIGH, MEDIUM, LOW
- When nothing is found, output exactly one line: -r No findings.
- Do NOT include explanations, markdown, headings, or blank lines

# GLOBAL RULES:
- Report ONLY issues visible in the supplied diff, never invented ones
- Point at the changed lines, not at pre-existing code around them

## FOCUS RULES ({title}):
{rules}

# INPUT DIFF (SOURCE OF TRUTH):

GIT DIFF START:
{diff}
GIT DIFF END"#,
        title = focus.title(),
        rules = focus.rules(),
        diff = bound_diff(diff, Some(EMBED_DIFF_LIMIT)),
    )
}

pub fn clean_report(diff: &str) -> String {
    format!(
        r#"You are scanning staged git changes for leftover debug artifacts.

# TASK:
Report debugging leftovers in the supplied diff: stray print/log statements,
debugger statements, commented-out code, and temporary hardcoded test values.

# EXECUTION MODE (MANDATORY):
- This is a NON-INTERACTIVE generation task.
- Produce output only. No questions, no explanations.

# OUTPUT CONTRACT:
- Every output line MUST start exactly with: -c
- One artifact per line, formatted as: -c file: artifact
- When nothing is found, output exactly one line: -c No debug artifacts.
- Do NOT include explanations, markdown, headings, or blank lines

# GLOBAL RULES:
- Report ONLY artifacts visible in the supplied diff, never invented ones
- Only added lines count; artifacts being removed are not findings

# INPUT DIFF (SOURCE OF TRUTH):

GIT DIFF START:
{diff}
GIT DIFF END"#,
        diff = bound_diff(diff, Some(EMBED_DIFF_LIMIT)),
    )
}

pub fn coding_standards(diff: &str, standards: &str) -> String {
    format!(
        r#"You are checking staged git changes against team coding standards.

# TASK:
Report every place where the supplied diff violates the team standards below.

# EXECUTION MODE (MANDATORY):
- This is a NON-INTERACTIVE generation task.
- Produce output only. No questions, no explanations.

# OUTPUT CONTRACT:
- Every output line MUST start exactly with: -s
- One violation per line, formatted as: -s file: violated rule and finding
- When nothing is found, output exactly one line: -s No violations.
- Do NOT include explanations, markdown, headings, or blank lines

# GLOBAL RULES:
- Judge ONLY against the standards below, not general taste
- Report ONLY violations visible in the supplied diff, never invented ones

# TEAM STANDARDS:

STANDARDS START:
{standards}
STANDARDS END

# INPUT DIFF (SOURCE OF TRUTH):

GIT DIFF START:
{diff}
GIT DIFF END"#,
        standards = standards.trim(),
        diff = bound_diff(diff, Some(EMBED_DIFF_LIMIT)),
    )
}

pub fn pr_description(diff: &str, template: Option<&str>) -> String {
    let template = match template {
        Some(t) if !t.trim().is_empty() => t.trim(),
        _ => "standard PR structure",
    };

    format!(
        r#"Write a Pull Request description for the staged changes below.
Structure it with: Summary, Key Changes, Breaking Changes, Testing Notes.
Respond with an echo command printing the description so it can be copied.
Describe only what the diff shows; do not invent behavior or motivation.
Template: {template}

GIT DIFF START:
{diff}
GIT DIFF END"#,
        diff = bound_diff(diff, Some(EMBED_DIFF_LIMIT)),
    )
}

pub fn explain_diff(diff: &str) -> String {
    format!(
        r#"Explain these staged git changes in plain English.
Focus on the "why" and the "what", not a line-by-line walkthrough.
Describe only what the diff shows; do not invent behavior or motivation.

GIT DIFF START:
{diff}
GIT DIFF END"#,
        diff = bound_diff(diff, Some(EMBED_DIFF_LIMIT)),
    )
}

pub fn analyze_diff(diff: &str) -> String {
    format!(
        r#"Analyze these staged git changes.
Identify:
1. Commit Type (feat, fix, refactor, etc.)
2. Breaking Change (yes/no)
3. Main files involved
Output the result as a short plain-text summary.
Describe only what the diff shows; do not invent behavior or motivation.

GIT DIFF START:
{diff}
GIT DIFF END"#,
        diff = bound_diff(diff, Some(EMBED_DIFF_LIMIT)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n+fn added() {}\n";

    #[test]
    fn bounding_is_idempotent() {
        let diff = format!("  {}  ", "x".repeat(50));
        for n in [0usize, 1, 10, 50, 500] {
            let once = bound_diff(&diff, Some(n));
            assert_eq!(bound_diff(&once, Some(n)), once, "cap {n}");
        }
        let full = bound_diff(&diff, None);
        assert_eq!(bound_diff(&full, None), full);
    }

    #[test]
    fn bounding_respects_char_boundaries() {
        let diff = "héllo 🚀 wörld".repeat(100);
        let bounded = bound_diff(&diff, Some(7));
        assert_eq!(bounded.chars().count(), 7);
    }

    #[test]
    fn bounding_empty_input_yields_empty() {
        assert_eq!(bound_diff("", Some(3000)), "");
        assert_eq!(bound_diff("   ", None), "");
    }

    #[test]
    fn commit_prompt_embeds_the_full_diff() {
        let long_diff = "a".repeat(EMBED_DIFF_LIMIT + 500);
        let prompt = commit_message(&long_diff, None);
        assert!(prompt.contains(&long_diff));
    }

    #[test]
    fn pr_prompt_truncates_the_diff() {
        let long_diff = "a".repeat(EMBED_DIFF_LIMIT + 500);
        let prompt = pr_description(&long_diff, None);
        assert!(!prompt.contains(&long_diff));
        assert!(prompt.contains(&"a".repeat(EMBED_DIFF_LIMIT)));
    }

    #[test]
    fn commit_prompt_carries_contract_and_markers() {
        let prompt = commit_message(DIFF, None);
        assert!(prompt.contains("-m \""));
        assert!(prompt.contains("GIT DIFF START:"));
        assert!(prompt.contains("GIT DIFF END"));
        assert!(prompt.contains("CONVENTIONAL COMMIT RULES"));
    }

    #[test]
    fn template_replaces_default_commit_rules() {
        let prompt = commit_message(DIFF, Some("type: summary\n- detail"));
        assert!(prompt.contains("type: summary"));
        assert!(prompt.contains("OUTPUT FORMAT (MANDATORY)"));
        assert!(!prompt.contains("CONVENTIONAL COMMIT RULES"));
    }

    #[test]
    fn blank_template_falls_back_to_default_rules() {
        let prompt = commit_message(DIFF, Some("   "));
        assert!(prompt.contains("CONVENTIONAL COMMIT RULES"));
    }

    #[test]
    fn focus_substitution_changes_title_and_rules() {
        let perf = review(DIFF, ReviewFocus::Performance);
        let sec = review(DIFF, ReviewFocus::Security);
        assert_ne!(perf, sec);
        assert!(perf.contains("PERFORMANCE REVIEW"));
        assert!(sec.contains("SECURITY REVIEW"));
    }

    #[test]
    fn review_prompts_are_deterministic() {
        assert_eq!(
            review(DIFF, ReviewFocus::CleanCode),
            review(DIFF, ReviewFocus::CleanCode)
        );
    }

    #[test]
    fn default_focus_is_clean_code() {
        assert_eq!(ReviewFocus::from_flags(false, false), ReviewFocus::CleanCode);
        assert_eq!(ReviewFocus::from_flags(true, false), ReviewFocus::Performance);
        assert_eq!(ReviewFocus::from_flags(false, true), ReviewFocus::Security);
    }

    #[test]
    fn standards_prompt_embeds_the_rules_text() {
        let prompt = coding_standards(DIFF, "Rule 1: no unwrap in library code");
        assert!(prompt.contains("Rule 1: no unwrap in library code"));
        assert!(prompt.contains("STANDARDS START:"));
        assert!(prompt.contains("-s"));
    }
}
