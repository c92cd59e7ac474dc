// Overflow Log Port (append-only sink for evicted payloads)

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Written after every payload appended to an overflow log
pub const RECORD_SEPARATOR: &[u8] = b"\n";

/// Append-only destination for payloads evicted by capacity enforcement.
///
/// Implementations own a single handle. The engine borrows it for the
/// duration of one append; rotation and shutdown swap or release it.
pub trait OverflowLog: Send {
    /// Append `payload` followed by [`RECORD_SEPARATOR`]
    fn append(&mut self, payload: &[u8]) -> io::Result<()>;

    /// Close the current handle and reopen the same destination in append mode.
    ///
    /// A failure closing the old handle is ignored; a failure opening the
    /// new one is returned.
    fn reopen(&mut self) -> io::Result<()>;

    /// Flush and release the handle
    fn close(&mut self) -> io::Result<()>;

    /// Human-readable destination, used in logs and errors
    fn location(&self) -> String;
}

/// Overflow log kept in memory (tests, embedding without a filesystem)
///
/// Clones share the same buffer, so a test can hand one clone to the engine
/// and inspect the other.
#[derive(Clone, Default)]
pub struct InMemoryOverflowLog {
    buffer: Arc<Mutex<Vec<u8>>>,
    reopens: Arc<AtomicUsize>,
    closed: Arc<AtomicBool>,
    fail_reopen: Arc<AtomicBool>,
}

impl InMemoryOverflowLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `reopen` fail, simulating an unwritable path
    pub fn fail_next_reopens(&self) {
        self.fail_reopen.store(true, Ordering::SeqCst);
    }

    /// Raw bytes written so far
    pub fn contents(&self) -> Vec<u8> {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Records written so far, separators stripped
    pub fn records(&self) -> Vec<Vec<u8>> {
        let contents = self.contents();
        let mut records = Vec::new();
        let mut rest = contents.as_slice();
        while let Some(pos) = find_separator(rest) {
            records.push(rest[..pos].to_vec());
            rest = &rest[pos + RECORD_SEPARATOR.len()..];
        }
        records
    }

    pub fn reopen_count(&self) -> usize {
        self.reopens.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

fn find_separator(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(RECORD_SEPARATOR.len())
        .position(|window| window == RECORD_SEPARATOR)
}

impl OverflowLog for InMemoryOverflowLog {
    fn append(&mut self, payload: &[u8]) -> io::Result<()> {
        if self.is_closed() {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "overflow log is closed",
            ));
        }
        let mut buffer = self
            .buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        buffer.extend_from_slice(payload);
        buffer.extend_from_slice(RECORD_SEPARATOR);
        Ok(())
    }

    fn reopen(&mut self) -> io::Result<()> {
        if self.fail_reopen.load(Ordering::SeqCst) {
            self.closed.store(true, Ordering::SeqCst);
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "reopen refused",
            ));
        }
        self.reopens.fetch_add(1, Ordering::SeqCst);
        self.closed.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_split_on_separator() {
        let mut log = InMemoryOverflowLog::new();
        log.append(b"first").unwrap();
        log.append(b"").unwrap();
        log.append(b"third").unwrap();

        assert_eq!(log.contents(), b"first\n\nthird\n".to_vec());
        assert_eq!(
            log.records(),
            vec![b"first".to_vec(), Vec::new(), b"third".to_vec()]
        );
    }

    #[test]
    fn test_clones_share_buffer() {
        let observer = InMemoryOverflowLog::new();
        let mut writer = observer.clone();
        writer.append(b"shared").unwrap();

        assert_eq!(observer.records(), vec![b"shared".to_vec()]);
    }

    #[test]
    fn test_append_after_close_fails() {
        let mut log = InMemoryOverflowLog::new();
        log.close().unwrap();

        assert!(log.is_closed());
        assert!(log.append(b"late").is_err());
    }

    #[test]
    fn test_reopen_failure() {
        let mut log = InMemoryOverflowLog::new();
        log.reopen().unwrap();
        assert_eq!(log.reopen_count(), 1);

        log.fail_next_reopens();
        assert!(log.reopen().is_err());
        assert_eq!(log.reopen_count(), 1);
    }
}
