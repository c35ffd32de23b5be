use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::SystemTime;

use crate::clock;
use crate::error::{Result, SinkError};

/// How many candidate backup names to probe before giving up on uniqueness.
pub(crate) const BACKUP_PROBE_LIMIT: u64 = 64;

/// An append-only log file that can be rotated out under a size limit.
///
/// Rotation renames the current file to `<path>_<unixSeconds>.back` and
/// reopens a fresh file at the original path. The handle is closed before the
/// rename so the move also works on platforms that refuse to rename an open
/// file.
///
/// A failed rename is survivable: the original file is reopened and writing
/// continues into it. A failed reopen is not, because there is nothing left to
/// write into; that case surfaces as [`SinkError::Reopen`].
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    file: Option<File>,
    max_size: u64,
    rotated_at: Option<SystemTime>,
}

impl RotatingFile {
    /// Opens (creating if needed) the file at `path` for appending.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Open`] if the file cannot be opened.
    pub fn open(path: PathBuf, max_size: u64) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| SinkError::Open {
                path: path.clone(),
                source: e,
            })?;
        Ok(Self {
            path,
            file: Some(file),
            max_size,
            rotated_at: None,
        })
    }

    /// True when the file on disk has reached the size limit.
    ///
    /// A failed stat reads as "not over"; if the file is genuinely gone the
    /// next append reports the real error.
    #[must_use]
    pub fn over_limit(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() >= self.max_size)
    }

    /// Moves the current file aside and starts a fresh one at the same path.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Rotate`] when the rename fails (the original file
    /// was reopened and stays writable), or [`SinkError::Reopen`] when no
    /// writable handle could be recovered at all.
    pub fn rotate(&mut self) -> Result<()> {
        self.file = None;

        let backup = self.backup_path();
        if let Err(e) = fs::rename(&self.path, &backup) {
            // Recover the handle first; a lost handle outranks a failed move.
            self.reopen()?;
            return Err(SinkError::Rotate {
                path: self.path.clone(),
                source: e,
            });
        }
        self.reopen()?;
        self.rotated_at = Some(SystemTime::now());
        Ok(())
    }

    /// When this file last rotated, if it ever has.
    ///
    /// Recorded for future age-based rotation; size is the only trigger today.
    #[must_use]
    pub fn rotated_at(&self) -> Option<SystemTime> {
        self.rotated_at
    }

    /// Appends `line` exactly as given; callers supply the newline.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Write`] on a failed write and [`SinkError::Reopen`]
    /// if no handle is held.
    pub fn append(&mut self, line: &str) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Err(SinkError::Reopen {
                path: self.path.clone(),
                source: io::Error::other("no open handle"),
            });
        };
        file.write_all(line.as_bytes()).map_err(|e| SinkError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    fn reopen(&mut self) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SinkError::Reopen {
                path: self.path.clone(),
                source: e,
            })?;
        self.file = Some(file);
        Ok(())
    }

    /// Picks `<path>_<unixSeconds>.back`, bumping the seconds while the name
    /// is taken. Past the probe limit the base name is reused and the rename
    /// replaces that backup.
    fn backup_path(&self) -> PathBuf {
        let base = clock::unix_now_secs();
        for bump in 0..BACKUP_PROBE_LIMIT {
            let candidate = self.backup_candidate(base + bump);
            if !candidate.exists() {
                return candidate;
            }
        }
        self.backup_candidate(base)
    }

    fn backup_candidate(&self, ts: u64) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!("_{ts}.back"));
        PathBuf::from(name)
    }
}
