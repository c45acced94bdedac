pub mod analyze;
pub mod clean;
pub mod commit;
pub mod explain;
pub mod pr;
pub mod review;
pub mod standard;
pub mod uptodate;

use anyhow::Result;

use crate::git;

/// Fetch the staged diff; report `skip_message` and return `None` when there
/// is nothing staged. Every suggestion-backed command short-circuits here,
/// before any prompt is built.
pub(crate) fn staged_diff_or_skip(skip_message: &str) -> Result<Option<String>> {
    let diff = git::staged_diff()?;
    match non_empty(diff) {
        Some(diff) => Ok(Some(diff)),
        None => {
            log::info!("{skip_message}");
            Ok(None)
        }
    }
}

fn non_empty(diff: String) -> Option<String> {
    if diff.trim().is_empty() { None } else { Some(diff) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_diffs_count_as_empty() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("  \n \t ".to_string()), None);
        assert_eq!(
            non_empty("diff --git".to_string()),
            Some("diff --git".to_string())
        );
    }
}
