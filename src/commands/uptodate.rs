//! Branch sync: bring the current branch up to date with the main branch
//! while keeping uncommitted changes safe in a stash.
//!
//! The sequence is linear and each step is named. There is no rollback: a
//! failure at step N aborts with the failing step and the steps that already
//! ran, and the user recovers manually from there.

use anyhow::{Context, Result, bail};

use crate::git;

pub fn run(main_branch: &str) -> Result<()> {
    if !git::branch_exists_remotely(main_branch)? {
        bail!("the main branch '{main_branch}' does not exist on the remote");
    }

    let current = git::current_branch()?;
    let on_main = current == main_branch;
    if !on_main {
        log::info!("Current branch is '{current}'");
    }

    let behind = git::count_behind_origin(main_branch)?;
    if behind == 0 {
        log::info!("Repository is up-to-date with origin/{main_branch}.");
        return Ok(());
    }
    log::info!("{behind} commit(s) behind origin/{main_branch}.");

    let dirty = git::has_changes()?;
    let mut tracker = StepTracker::default();

    let stash_ref = if dirty {
        let stash_ref = tracker.run("create-stash", git::create_stash)?;
        log::info!("Stashed local changes as {stash_ref}.");
        Some(stash_ref)
    } else {
        None
    };

    if on_main {
        tracker.run("pull-fast-forward", || git::pull_ff_only(main_branch))?;
        log::info!("Pulled latest changes from origin/{main_branch}.");
    } else {
        tracker.run("switch-to-main", || git::switch_branch(main_branch))?;
        log::info!("Switched to '{main_branch}' branch.");
        tracker.run("pull-fast-forward", || git::pull_ff_only(main_branch))?;
        log::info!("Pulled latest changes from origin/{main_branch}.");
        tracker.run("switch-back", || git::switch_branch(&current))?;
        log::info!("Switched back to '{current}' branch.");
        tracker.run("rebase-onto-main", || git::rebase_onto(main_branch))?;
        log::info!("Rebased '{current}' onto '{main_branch}'.");
    }

    if let Some(stash_ref) = stash_ref {
        tracker.run("apply-stash", || git::apply_stash(&stash_ref))?;
        log::info!("Re-applied stashed changes.");
        tracker.run("drop-stash", || git::drop_stash(&stash_ref))?;
        log::info!("Dropped the stash.");
    }

    log::info!("Up-to-date job completed.");
    Ok(())
}

/// Names each step of the sync sequence so a mid-sequence failure reports
/// exactly where it stopped and which steps already took effect.
#[derive(Default)]
struct StepTracker {
    completed: Vec<&'static str>,
}

impl StepTracker {
    fn run<T>(&mut self, name: &'static str, step: impl FnOnce() -> Result<T>) -> Result<T> {
        let done = if self.completed.is_empty() {
            "none".to_string()
        } else {
            self.completed.join(", ")
        };
        let result = step()
            .with_context(|| format!("sync step '{name}' failed (completed steps: {done})"))?;
        self.completed.push(name);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_step_reports_name_and_completed_steps() {
        let mut tracker = StepTracker::default();
        tracker.run("create-stash", || Ok(())).unwrap();
        tracker.run("pull-fast-forward", || Ok(())).unwrap();

        let err = tracker
            .run("apply-stash", || -> Result<()> { bail!("conflict") })
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("sync step 'apply-stash' failed"));
        assert!(msg.contains("create-stash, pull-fast-forward"));
        assert!(msg.contains("conflict"));
    }

    #[test]
    fn first_step_failure_reports_no_completed_steps() {
        let mut tracker = StepTracker::default();
        let err = tracker
            .run("create-stash", || -> Result<()> { bail!("nope") })
            .unwrap_err();
        assert!(format!("{err:#}").contains("completed steps: none"));
    }
}
