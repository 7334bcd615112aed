//! Filesystem primitives over the storage root.
//!
//! Every path handed to the store must lie lexically inside its root;
//! anything else is refused with `PdsError::PathEscape` before the
//! filesystem is touched. Authorization is not checked here.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{PdsError, Result};

/// Attempts made by [`ResourceStore::create_if_absent`] when the target
/// vanishes between a failed create and the follow-up read.
const CREATE_ATTEMPTS: usize = 3;

/// How long a creator without hard links waits for the lock holder.
const LOCK_WAIT_POLLS: usize = 200;
const LOCK_WAIT_INTERVAL: Duration = Duration::from_millis(10);

/// One directory member as reported by [`ResourceStore::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub is_directory: bool,
    pub size: u64,
    pub modified_at: DateTime<Utc>,
}

/// Read/write/delete/list over absolute paths under one root.
///
/// Writes replace whole files via a uniquely named sibling temporary and
/// a rename, so readers see either the old or the new content.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    root: PathBuf,
}

impl ResourceStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::Io` if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read a file. A missing file is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::PathEscape` for paths outside the root, or
    /// `PdsError::Io` for other filesystem faults.
    pub fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        self.confine(path)?;
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PdsError::Io(e)),
        }
    }

    /// Replace the file at `path` with `data`, creating missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::PathEscape` or `PdsError::Io`.
    pub fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        self.confine(path)?;
        let tmp = self.stage(path, data)?;

        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(PdsError::Io(e));
        }
        Ok(())
    }

    /// Write `data` to `path` only if nothing is there yet, and return
    /// whatever the file holds afterwards.
    ///
    /// Concurrent callers racing on the same path all observe the content
    /// of the single winner.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::PathEscape` or `PdsError::Io`.
    pub fn create_if_absent(&self, path: &Path, data: &[u8]) -> Result<Vec<u8>> {
        self.confine(path)?;

        for _ in 0..CREATE_ATTEMPTS {
            if let Some(existing) = self.read(path)? {
                return Ok(existing);
            }

            let tmp = self.stage(path, data)?;
            let linked = fs::hard_link(&tmp, path);
            let _ = fs::remove_file(&tmp);

            match linked {
                Ok(()) => return Ok(data.to_vec()),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    log::debug!(
                        "hard link unavailable for {} ({e}); using creation lock",
                        path.display()
                    );
                    return self.create_with_lock(path, data);
                }
            }
        }

        self.read(path)?.ok_or_else(|| {
            PdsError::Io(std::io::Error::new(
                ErrorKind::Other,
                format!("{} kept disappearing during create", path.display()),
            ))
        })
    }

    /// Remove the file at `path`. Returns `false` if it was already absent.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::PathEscape` or `PdsError::Io` for faults other
    /// than "not found".
    pub fn delete(&self, path: &Path) -> Result<bool> {
        self.confine(path)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PdsError::Io(e)),
        }
    }

    /// List the members of `dir`, sorted by name. A missing directory
    /// lists as empty.
    ///
    /// Members that disappear while being listed are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::PathEscape` or `PdsError::Io`.
    pub fn list(&self, dir: &Path) -> Result<Vec<Entry>> {
        self.confine(dir)?;

        let reader = match fs::read_dir(dir) {
            Ok(r) => r,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PdsError::Io(e)),
        };

        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                log::warn!("skipping non-UTF-8 entry in {}", dir.display());
                continue;
            };

            let meta = match entry.metadata() {
                Ok(m) => m,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(PdsError::Io(e)),
            };

            let modified_at = meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or(DateTime::UNIX_EPOCH);

            entries.push(Entry {
                name,
                is_directory: meta.is_dir(),
                size: meta.len(),
                modified_at,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Create `dir` and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns `PdsError::PathEscape` or `PdsError::Io`.
    pub fn ensure_dir(&self, dir: &Path) -> Result<()> {
        self.confine(dir)?;
        fs::create_dir_all(dir)?;
        Ok(())
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Refuse any path that is not lexically inside the root.
    fn confine(&self, path: &Path) -> Result<()> {
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        if escapes || !path.starts_with(&self.root) || path == self.root {
            return Err(PdsError::PathEscape(path.to_path_buf()));
        }
        Ok(())
    }

    /// Write `data` to a fresh hidden sibling of `path` and return its path.
    fn stage(&self, path: &Path, data: &[u8]) -> Result<PathBuf> {
        let parent = path
            .parent()
            .ok_or_else(|| PdsError::PathEscape(path.to_path_buf()))?;
        fs::create_dir_all(parent)?;

        let nonce: [u8; 8] = rand::random();
        let tmp = sibling(path, &format!("{}.tmp", hex::encode(nonce)))?;

        if let Err(e) = fs::write(&tmp, data) {
            let _ = fs::remove_file(&tmp);
            return Err(PdsError::Io(e));
        }
        Ok(tmp)
    }

    /// `create_if_absent` for filesystems without hard links.
    ///
    /// An exclusive `.{name}.lock` sibling elects one writer, which renames
    /// a fully staged file into place. Everyone else waits for that file.
    fn create_with_lock(&self, path: &Path, data: &[u8]) -> Result<Vec<u8>> {
        let lock = sibling(path, "lock")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock)
        {
            Ok(_) => {
                let created = self.publish_if_absent(path, data);
                let _ = fs::remove_file(&lock);
                created
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                for _ in 0..LOCK_WAIT_POLLS {
                    if let Some(existing) = self.read(path)? {
                        return Ok(existing);
                    }
                    std::thread::sleep(LOCK_WAIT_INTERVAL);
                }
                Err(PdsError::Io(std::io::Error::new(
                    ErrorKind::TimedOut,
                    format!("{} is held by another writer", lock.display()),
                )))
            }
            Err(e) => Err(PdsError::Io(e)),
        }
    }

    /// Under the creation lock: keep an existing file, else rename `data` in.
    fn publish_if_absent(&self, path: &Path, data: &[u8]) -> Result<Vec<u8>> {
        if let Some(existing) = self.read(path)? {
            return Ok(existing);
        }
        let tmp = self.stage(path, data)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(PdsError::Io(e));
        }
        Ok(data.to_vec())
    }
}

/// Hidden sibling `.{name}.{suffix}` of `path`.
fn sibling(path: &Path, suffix: &str) -> Result<PathBuf> {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => Ok(parent.join(format!(
            ".{}.{suffix}",
            name.to_string_lossy()
        ))),
        _ => Err(PdsError::PathEscape(path.to_path_buf())),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
