//! Size-rotated line writer for the trace file.
//!
//! When the file reaches its size limit it is shifted into numbered backups
//! (`file.1` newest, `file.N` oldest) and a fresh file is started. Backups
//! beyond the retention count are deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size at which the trace file is rotated (10 MB).
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of rotated files kept next to the live one.
pub const MAX_BACKUPS: usize = 3;

/// Appends lines to a file, rotating it by size.
///
/// The file is opened lazily on the first write, so construction never
/// touches the filesystem.
pub struct RotatingWriter {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingWriter {
    /// Writer with the default 10 MB limit and 3 backups.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_BYTES, MAX_BACKUPS)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from rotating, opening or writing, and an error if
    /// the internal lock is poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        if self.is_full() {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))?;

        writeln!(handle, "{line}")?;
        handle.flush()
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|metadata| metadata.len() >= self.max_bytes)
    }

    /// Shifts `file.N-1 → file.N … file → file.1`, dropping the oldest.
    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = backup_path(&self.path, self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backups).rev() {
            let from = backup_path(&self.path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.path, index + 1))?;
            }
        }
        fs::rename(&self.path, backup_path(&self.path, 1))
    }
}

impl std::fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

/// `evalboard-otlp.json` → `evalboard-otlp.json.{index}`
fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_appends_below_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::new(path.clone());

        writer.write_line("{}").unwrap();
        writer.write_line("{\"a\":1}").unwrap();

        assert_eq!(read(&path), "{}\n{\"a\":1}\n");
        assert!(!backup_path(&path, 1).exists());
    }

    #[test]
    fn test_rotation_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::with_limits(path.clone(), 4, 2);

        for line in ["one", "two", "three", "four"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(read(&path), "four\n");
        assert_eq!(read(&backup_path(&path, 1)), "three\n");
        assert_eq!(read(&backup_path(&path, 2)), "two\n");
        assert!(!backup_path(&path, 3).exists());
    }

    #[test]
    fn test_zero_backups_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::with_limits(path.clone(), 2, 0);

        writer.write_line("first").unwrap();
        writer.write_line("second").unwrap();

        assert_eq!(read(&path), "second\n");
        assert!(!backup_path(&path, 1).exists());
    }

    #[test]
    fn test_backup_path_appends_index() {
        let path = PathBuf::from("/tmp/evalboard-otlp.json");
        assert_eq!(backup_path(&path, 2), PathBuf::from("/tmp/evalboard-otlp.json.2"));
    }
}
