use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Per-tool scratch directory under the OS temp dir, created on demand.
pub fn dir() -> io::Result<PathBuf> {
    let dir = env::temp_dir().join("diffpilot");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Milliseconds since the Unix epoch.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A uniquely named file in the scratch directory, removed on drop.
///
/// Deletion failures are logged as warnings; they never abort the command.
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn create(stem: &str, ext: &str, content: &str) -> Result<Self> {
        let dir = dir().context("could not create scratch directory")?;
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let path = dir.join(format!("{stem}_{}_{id}{ext}", process::id()));
        fs::write(&path, content)
            .with_context(|| format!("could not write scratch file {}", path.display()))?;
        Ok(ScratchFile { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("could not read scratch file {}", self.path.display()))
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                log::warn!(
                    "could not delete scratch file {}: {err}",
                    self.path.display()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_file_is_removed_on_drop() {
        let path = {
            let file = ScratchFile::create("scratch_test", ".txt", "hello").unwrap();
            assert_eq!(file.read().unwrap(), "hello");
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn scratch_names_are_unique() {
        let a = ScratchFile::create("scratch_test", ".txt", "a").unwrap();
        let b = ScratchFile::create("scratch_test", ".txt", "b").unwrap();
        assert_ne!(a.path(), b.path());
    }
}
