//! Invocation of the external `copilot` CLI.
//!
//! Prompts travel through a scratch file (`copilot -p @<file>`), the command
//! line is shell-quoted, and the child is killed when it outlives the
//! configured timeout. Every failure mode degrades to `None`: downstream
//! extraction treats a missing suggestion the same as an empty one.

use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::scratch::{self, ScratchFile};

const CHECK_CACHE_FILE: &str = "copilot_cli_check.json";
const CHECK_CACHE_TTL_MS: u64 = 30 * 24 * 60 * 60 * 1000; // 30 days
const CHECK_TIMEOUT: Duration = Duration::from_secs(15);

/// Ask the Copilot CLI for a suggestion; `None` means nothing usable came
/// back (spawn failure, timeout, or empty output).
pub fn suggest(prompt: &str, timeout: Duration) -> Option<String> {
    let staged = match ScratchFile::create("copilot_prompt", ".prompt.md", prompt) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("could not stage prompt for the Copilot CLI: {err:#}");
            return None;
        }
    };

    let file_arg = format!("@{}", staged.path().display());
    let command_line = shell_join(&["copilot", "-p", &file_arg]);
    log::trace!("invoking: {command_line}");

    let child = match spawn_shell(&command_line) {
        Ok(child) => child,
        Err(err) => {
            log::debug!("error executing the Copilot CLI: {err}");
            return None;
        }
    };

    let (success, code, stdout, stderr) = collect_with_timeout(child, timeout)?;
    if !success && !stderr.trim().is_empty() {
        log::debug!("Copilot CLI exited with code {code:?}");
        log::debug!("stderr: {}", stderr.trim());
    }

    // Whatever text exists is still worth handing to the extractor.
    let output = if stdout.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        stdout.trim().to_string()
    };

    if output.is_empty() { None } else { Some(output) }
}

/// `suggest` with a terminal spinner and response-time logging.
pub fn suggest_with_spinner(prompt: &str, timeout: Duration) -> Option<String> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Waiting for Copilot response... ");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let started = Instant::now();
    let raw = suggest(prompt, timeout);
    spinner.finish_and_clear();

    log::debug!(
        "Copilot response time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
    if let Some(text) = &raw {
        log::debug!("raw suggestion:\n{}", truncate(text, 2000));
    }
    raw
}

#[derive(Serialize, Deserialize)]
struct CheckCache {
    ok: bool,
    ts_ms: u64,
}

/// Whether the `copilot` CLI is available, probing at most once per 30 days.
pub fn check_installed_cached() -> bool {
    let cache_path = scratch::dir().ok().map(|d| d.join(CHECK_CACHE_FILE));

    if let Some(path) = &cache_path {
        if let Some(ok) = read_check_cache(path) {
            log::trace!("using cached Copilot CLI check: {ok}");
            return ok;
        }
    }

    let ok = check_installed();

    if let Some(path) = &cache_path {
        let record = CheckCache {
            ok,
            ts_ms: scratch::unix_millis(),
        };
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::debug!("could not write Copilot check cache: {err}");
                }
            }
            Err(err) => log::debug!("could not encode Copilot check cache: {err}"),
        }
    }

    ok
}

fn check_installed() -> bool {
    let child = match spawn_shell("copilot --version") {
        Ok(child) => child,
        Err(_) => return false,
    };
    collect_with_timeout(child, CHECK_TIMEOUT)
        .map(|(success, _, _, _)| success)
        .unwrap_or(false)
}

fn read_check_cache(path: &std::path::Path) -> Option<bool> {
    let data = fs::read_to_string(path).ok()?;
    let record: CheckCache = serde_json::from_str(&data).ok()?;
    let age = scratch::unix_millis().saturating_sub(record.ts_ms);
    (age < CHECK_CACHE_TTL_MS).then_some(record.ok)
}

/// Run a command line through the platform shell with piped output.
fn spawn_shell(command_line: &str) -> std::io::Result<Child> {
    #[cfg(windows)]
    let mut cmd = {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command_line]);
        cmd
    };
    #[cfg(not(windows))]
    let mut cmd = {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command_line]);
        cmd
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
}

/// Drain the child's pipes on reader threads and poll it against a deadline.
/// Returns `None` when the child was killed for exceeding the timeout.
fn collect_with_timeout(
    mut child: Child,
    timeout: Duration,
) -> Option<(bool, Option<i32>, String, String)> {
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();
    let stdout_reader = thread::spawn(move || slurp(stdout_pipe));
    let stderr_reader = thread::spawn(move || slurp(stderr_pipe));

    let started = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if started.elapsed() >= timeout {
                    log::warn!(
                        "Copilot call exceeded {} seconds, giving up on it",
                        timeout.as_secs()
                    );
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                thread::sleep(Duration::from_millis(100));
            }
            Err(err) => {
                log::debug!("failed to wait for the Copilot CLI: {err}");
                return None;
            }
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();
    Some((status.success(), status.code(), stdout, stderr))
}

fn slurp(pipe: Option<impl Read>) -> String {
    let mut buf = String::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_string(&mut buf);
    }
    buf
}

/// Quote a token for the shell unless it is plainly safe.
fn shell_quote(token: &str) -> String {
    let safe = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@,".contains(c));
    if safe {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

fn shell_join(tokens: &[&str]) -> String {
    tokens
        .iter()
        .map(|t| shell_quote(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate long strings for debug logging, never mid-codepoint.
fn truncate(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{head}...\n[truncated {} chars]", count - max_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tokens_pass_through() {
        assert_eq!(shell_quote("copilot"), "copilot");
        assert_eq!(shell_quote("@/tmp/diffpilot/p_1.md"), "@/tmp/diffpilot/p_1.md");
    }

    #[test]
    fn tokens_with_spaces_are_quoted() {
        assert_eq!(shell_quote("a b"), "'a b'");
    }

    #[test]
    fn embedded_single_quotes_are_escaped() {
        assert_eq!(shell_quote("don't"), r"'don'\''t'");
    }

    #[test]
    fn join_preserves_argument_boundaries() {
        assert_eq!(
            shell_join(&["copilot", "-p", "@/tmp/x y.md"]),
            "copilot -p '@/tmp/x y.md'"
        );
    }

    #[test]
    fn truncate_is_char_safe() {
        let text = "🚀".repeat(10);
        let cut = truncate(&text, 3);
        assert!(cut.starts_with("🚀🚀🚀..."));
    }
}
