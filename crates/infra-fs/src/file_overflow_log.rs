// File-backed overflow log
// reason: evicted payloads go to an append-mode file that external rotation tools can move

use simplequeue_core::error::{AppError, Result};
use simplequeue_core::port::{OverflowLog, RECORD_SEPARATOR};
use simplequeue_core::EngineConfig;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Overflow log writing to a file opened in append mode
pub struct FileOverflowLog {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileOverflowLog {
    /// Open (creating if needed) `path` for appending
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let writer = Some(open_append(&path)?);
        info!(path = %path.display(), "Opened overflow log");
        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_append(path: &Path) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

impl OverflowLog for FileOverflowLog {
    fn append(&mut self, payload: &[u8]) -> io::Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "overflow log is closed")
        })?;
        writer.write_all(payload)?;
        writer.write_all(RECORD_SEPARATOR)
    }

    fn reopen(&mut self) -> io::Result<()> {
        if let Some(mut old) = self.writer.take() {
            // Close failures are ignored; the new handle is what matters
            if let Err(e) = old.flush() {
                debug!(path = %self.path.display(), error = %e, "Flush before reopen failed");
            }
        }
        self.writer = Some(open_append(&self.path)?);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

impl Drop for FileOverflowLog {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Open the overflow log named by `config`, if any.
///
/// Failure maps to [`AppError::OverflowLogOpen`], which callers treat as fatal.
pub fn open_overflow_log(config: &EngineConfig) -> Result<Option<Box<dyn OverflowLog>>> {
    let Some(path) = config.overflow_log.as_ref() else {
        return Ok(None);
    };
    let log = FileOverflowLog::open(path).map_err(|source| AppError::OverflowLogOpen {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(Box::new(log)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_append_writes_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overflow.log");

        let mut log = FileOverflowLog::open(&path).unwrap();
        log.append(b"A").unwrap();
        log.append(b"B").unwrap();
        log.close().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"A\nB\n".to_vec());
    }

    #[test]
    fn test_open_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overflow.log");
        fs::write(&path, b"earlier\n").unwrap();

        let mut log = FileOverflowLog::open(&path).unwrap();
        log.append(b"later").unwrap();
        log.close().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"earlier\nlater\n".to_vec());
    }

    #[test]
    fn test_reopen_follows_rotated_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overflow.log");
        let rotated = dir.path().join("overflow.log.1");

        let mut log = FileOverflowLog::open(&path).unwrap();
        log.append(b"old").unwrap();
        log.reopen().unwrap();
        // Simulate logrotate moving the file after the flush
        fs::rename(&path, &rotated).unwrap();
        log.reopen().unwrap();
        log.append(b"new").unwrap();
        log.close().unwrap();

        assert_eq!(fs::read(&rotated).unwrap(), b"old\n".to_vec());
        assert_eq!(fs::read(&path).unwrap(), b"new\n".to_vec());
    }

    #[test]
    fn test_reopen_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        let subdir = dir.path().join("gone");
        fs::create_dir(&subdir).unwrap();
        let path = subdir.join("overflow.log");

        let mut log = FileOverflowLog::open(&path).unwrap();
        fs::remove_file(&path).unwrap();
        fs::remove_dir(&subdir).unwrap();

        assert!(log.reopen().is_err());
        assert!(log.append(b"nowhere").is_err());
    }

    #[test]
    fn test_open_from_config() {
        let dir = tempfile::tempdir().unwrap();

        let none = open_overflow_log(&EngineConfig::default()).unwrap();
        assert!(none.is_none());

        let config = EngineConfig::new(Some(dir.path().join("o.log")), 0, 0);
        let some = open_overflow_log(&config).unwrap().unwrap();
        assert!(some.location().ends_with("o.log"));

        let bad = EngineConfig::new(Some(dir.path().join("missing/o.log")), 0, 0);
        let err = open_overflow_log(&bad).err().unwrap();
        assert!(err.is_fatal());
    }
}
