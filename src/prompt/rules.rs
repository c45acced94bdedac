//! Rule-text constants shared by the prompt builders.

pub const CONVENTIONAL_COMMIT_RULES: &str = r#"## CONVENTIONAL COMMIT RULES:
- Allowed types: feat, fix, refactor, perf, test, docs, chore, build, ci, revert
- Scope: infer it from the changed filenames, omit it entirely when unclear
- Summary: imperative mood, 72 characters maximum, no trailing period"#;

pub const BODY_RULES: &str = r#"## BODY RULES:
- The body is optional
- Use at most 3 bullet points and merge related changes into one bullet
- Prefer higher-level summaries over file-by-file descriptions
- Describe WHAT changed and WHY, never HOW
- Omit the body entirely when it adds nothing beyond the summary"#;

/// Replaces the default commit rules when the user supplies a template.
pub fn template_contract(template: &str) -> String {
    format!(
        r#"# OUTPUT FORMAT (MANDATORY):
Your output MUST match this template exactly:
{template}

## TEMPLATE RULES:
- Follow the template line-by-line
- Omit a line entirely when no meaningful content exists for it
- Never add, rename, or reorder lines
- Content must still follow Conventional Commit semantics"#
    )
}

/// Which rule set governs a review prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewFocus {
    #[default]
    CleanCode,
    Performance,
    Security,
}

impl ReviewFocus {
    pub fn from_flags(perf: bool, sec: bool) -> Self {
        if perf {
            ReviewFocus::Performance
        } else if sec {
            ReviewFocus::Security
        } else {
            ReviewFocus::CleanCode
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReviewFocus::CleanCode => "CLEAN CODE REVIEW",
            ReviewFocus::Performance => "PERFORMANCE REVIEW",
            ReviewFocus::Security => "SECURITY REVIEW",
        }
    }

    pub fn rules(self) -> &'static str {
        match self {
            ReviewFocus::CleanCode => {
                r#"- Flag unclear or misleading names
- Flag functions doing more than one thing
- Flag duplicated logic that should be shared
- Flag dead code and unused parameters
- Flag magic numbers and strings that deserve a named constant
- Flag deeply nested control flow that hurts readability"#
            }
            ReviewFocus::Performance => {
                r#"- Flag needless allocations and copies
- Flag work repeated inside loops that could be hoisted
- Flag inefficient algorithms or data structures for the access pattern
- Flag repeated I/O, queries, or subprocess calls that could be batched
- Flag blocking calls on hot paths"#
            }
            ReviewFocus::Security => {
                r#"- Flag unvalidated or unsanitized external input
- Flag anything interpolated into shell commands, queries, or paths
- Flag hardcoded secrets, tokens, or credentials
- Flag insecure defaults and disabled safety checks
- Flag error handling that swallows failures at a trust boundary"#
            }
        }
    }
}
