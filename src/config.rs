use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SUGGEST_TIMEOUT_SECS: u64 = 120;

/// Resolved configuration, loaded once per run.
///
/// Sources, in order: `.diffpilot.toml` in the working directory, then
/// `~/.config/diffpilot.toml`. Missing or unparsable files silently yield
/// the defaults; configuration is never a fatal concern.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Commit message template: inline text, or a path to a template file.
    pub message_template: Option<String>,
    /// Team coding standards file checked by the `standard` command.
    pub standards_file: Option<PathBuf>,
    suggest_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Self {
        let Some(path) = find_config_path() else {
            return Config::default();
        };

        log::debug!("loading config from {}", path.display());
        let file_cfg = match read_file_config(&path) {
            Some(cfg) => cfg,
            None => {
                log::debug!("could not read {}, using defaults", path.display());
                return Config::default();
            }
        };

        Config {
            message_template: file_cfg.message_template,
            standards_file: file_cfg.standards_file,
            suggest_timeout_secs: file_cfg.suggest_timeout_secs,
        }
    }

    /// How long to wait on a single Copilot call before treating it as empty.
    pub fn suggest_timeout(&self) -> Duration {
        Duration::from_secs(
            self.suggest_timeout_secs
                .unwrap_or(DEFAULT_SUGGEST_TIMEOUT_SECS),
        )
    }

    /// The configured commit template text. A value naming an existing file
    /// is read from disk; anything else is treated as inline template text.
    pub fn resolve_template(&self) -> Option<String> {
        let raw = self.message_template.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        let as_path = PathBuf::from(raw);
        if as_path.is_file() {
            match fs::read_to_string(&as_path) {
                Ok(text) => return Some(text),
                Err(err) => {
                    log::warn!("could not read template file {}: {err}", as_path.display());
                    return None;
                }
            }
        }
        Some(raw.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    message_template: Option<String>,
    standards_file: Option<PathBuf>,
    suggest_timeout_secs: Option<u64>,
}

fn find_config_path() -> Option<PathBuf> {
    let project = PathBuf::from(".diffpilot.toml");
    if project.is_file() {
        return Some(project);
    }
    let home = dirs::home_dir()?;
    let user = home.join(".config").join("diffpilot.toml");
    user.is_file().then_some(user)
}

fn read_file_config(path: &PathBuf) -> Option<FileConfig> {
    let data = fs::read_to_string(path).ok()?;
    toml::from_str::<FileConfig>(&data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_template_is_returned_verbatim() {
        let cfg = Config {
            message_template: Some("type(scope): summary".to_string()),
            ..Config::default()
        };
        assert_eq!(
            cfg.resolve_template().as_deref(),
            Some("type(scope): summary")
        );
    }

    #[test]
    fn blank_template_resolves_to_none() {
        let cfg = Config {
            message_template: Some("   ".to_string()),
            ..Config::default()
        };
        assert_eq!(cfg.resolve_template(), None);
    }

    #[test]
    fn timeout_defaults_when_unset() {
        assert_eq!(
            Config::default().suggest_timeout(),
            Duration::from_secs(DEFAULT_SUGGEST_TIMEOUT_SECS)
        );
    }
}
