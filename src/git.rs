use anyhow::{Context, Result, anyhow, bail};
use std::process::Command as GitCommand;

use crate::scratch;

/// Run a git command and capture stdout as String.
///
/// Failures carry git's own stderr so the user sees what git complained
/// about, not a bare exit code.
pub fn git_output(args: &[&str]) -> Result<String> {
    let output = GitCommand::new("git")
        .args(args)
        .output()
        .with_context(|| format!("failed to run git {args:?}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = if stderr.trim().is_empty() {
            format!("exit status {:?}", output.status.code())
        } else {
            stderr.trim().to_string()
        };
        return Err(anyhow!("git {} failed: {detail}", args.join(" ")));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Whether the working directory is inside a git work tree.
pub fn is_repository() -> bool {
    GitCommand::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Get the full staged diff.
pub fn staged_diff() -> Result<String> {
    git_output(&["diff", "--cached"]).context("failed to get staged diff")
}

/// Get a list of staged files.
pub fn staged_files() -> Result<Vec<String>> {
    let output =
        git_output(&["diff", "--cached", "--name-only"]).context("failed to get staged files")?;
    let files = output
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    Ok(files)
}

/// Get the current branch name.
pub fn current_branch() -> Result<String> {
    let name = git_output(&["rev-parse", "--abbrev-ref", "HEAD"])
        .context("failed to determine current branch")?
        .trim()
        .to_string();
    Ok(name)
}

/// Commit the staged changes, one `-m` argument per message segment.
pub fn commit(segments: &[String]) -> Result<()> {
    let segments: Vec<&String> = segments.iter().filter(|s| !s.trim().is_empty()).collect();
    if segments.is_empty() {
        bail!("commit message is empty");
    }

    let mut cmd = GitCommand::new("git");
    cmd.arg("commit");
    for segment in segments {
        cmd.args(["-m", segment]);
    }

    let output = cmd.output().context("failed to run git commit")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("failed to commit changes: {}", stderr.trim());
    }
    Ok(())
}

/// Whether the working tree has any local changes (staged or not).
pub fn has_changes() -> Result<bool> {
    let status = git_output(&["status", "--porcelain"]).context("failed to check for changes")?;
    Ok(!status.trim().is_empty())
}

pub fn fetch_origin() -> Result<()> {
    git_output(&["fetch", "origin"]).context("failed to fetch origin")?;
    Ok(())
}

/// Whether `origin/<branch>` exists. Fetches first so the answer is fresh.
pub fn branch_exists_remotely(branch: &str) -> Result<bool> {
    fetch_origin()?;
    let remote = git_output(&["branch", "-r", "--list", &format!("origin/{branch}")])
        .context("failed to check remote branch")?;
    Ok(!remote.trim().is_empty())
}

/// How many commits `branch` is behind `origin/<branch>`.
pub fn count_behind_origin(branch: &str) -> Result<u32> {
    let range = format!("{branch}..origin/{branch}");
    let output = git_output(&["rev-list", "--count", &range])
        .context("failed to count commits behind origin")?;
    output
        .trim()
        .parse()
        .with_context(|| format!("unexpected rev-list output {:?}", output.trim()))
}

/// Stash all local changes and return a reference to the new stash.
pub fn create_stash() -> Result<String> {
    let marker = format!("diffpilot stash {}", scratch::unix_millis());
    git_output(&["stash", "push", "-m", &marker]).context("failed to create stash")?;
    let list = git_output(&["stash", "list"]).context("failed to list stashes")?;
    Ok(parse_stash_ref(&list, &marker).unwrap_or_else(|| "stash@{0}".to_string()))
}

pub fn apply_stash(stash_ref: &str) -> Result<()> {
    git_output(&["stash", "apply", stash_ref]).context("failed to apply stash")?;
    Ok(())
}

pub fn drop_stash(stash_ref: &str) -> Result<()> {
    git_output(&["stash", "drop", stash_ref]).context("failed to drop stash")?;
    Ok(())
}

pub fn pull_ff_only(branch: &str) -> Result<()> {
    git_output(&["pull", "--ff-only", "origin", branch])
        .context("failed to pull with --ff-only")?;
    Ok(())
}

pub fn switch_branch(branch: &str) -> Result<()> {
    git_output(&["checkout", branch]).context("failed to switch branch")?;
    Ok(())
}

pub fn rebase_onto(branch: &str) -> Result<()> {
    git_output(&["rebase", &format!("origin/{branch}")]).context("failed to rebase")?;
    Ok(())
}

/// Find the `stash@{n}` reference whose description contains `marker`.
fn parse_stash_ref(stash_list: &str, marker: &str) -> Option<String> {
    stash_list
        .lines()
        .find(|line| line.contains(marker))
        .and_then(|line| line.split(':').next())
        .map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stash_ref_is_recovered_by_marker() {
        let list = "stash@{0}: On feature: unrelated\n\
                    stash@{1}: On master: diffpilot stash 1712345678901\n";
        assert_eq!(
            parse_stash_ref(list, "diffpilot stash 1712345678901"),
            Some("stash@{1}".to_string())
        );
    }

    #[test]
    fn missing_marker_yields_none() {
        assert_eq!(parse_stash_ref("stash@{0}: On master: wip\n", "nope"), None);
    }
}
