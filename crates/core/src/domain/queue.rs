// Queue Domain Model

use crate::domain::entry::Entry;
use crate::domain::stats::QueueStats;
use std::collections::vec_deque;
use std::collections::VecDeque;

/// Queue identifier (exact match, no normalization)
pub type QueueName = String;

/// Queue used when a request names none
pub const DEFAULT_QUEUE: &str = "default";

/// Resolve an optional queue name from a request
pub fn queue_name_or_default(name: Option<&str>) -> &str {
    name.unwrap_or(DEFAULT_QUEUE)
}

/// A named FIFO of payloads with its counters
///
/// Head is the oldest entry. `depth` is always the entry count and `bytes`
/// the sum of entry lengths; both are maintained on every push and pop.
#[derive(Debug)]
pub struct Queue {
    name: QueueName,
    entries: VecDeque<Entry>,
    bytes: u64,
    depth_high_water: u64,
    puts: u64,
    gets: u64,
}

impl Queue {
    pub fn new(name: impl Into<QueueName>) -> Self {
        Self {
            name: name.into(),
            entries: VecDeque::new(),
            bytes: 0,
            depth_high_water: 0,
            puts: 0,
            gets: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a payload at the tail
    pub fn put(&mut self, payload: impl Into<Vec<u8>>) {
        let entry = Entry::new(payload);
        self.bytes += entry.len() as u64;
        self.entries.push_back(entry);
        self.puts += 1;

        let depth = self.depth();
        if depth > self.depth_high_water {
            self.depth_high_water = depth;
        }
    }

    /// Remove and return the head payload, `None` when empty
    pub fn get(&mut self) -> Option<Vec<u8>> {
        let entry = self.pop_oldest()?;
        self.gets += 1;
        Some(entry.into_payload())
    }

    /// Front-to-back view of the current payloads, without removing them
    pub fn dump(&self) -> Dump<'_> {
        Dump {
            inner: Some(self.entries.iter()),
        }
    }

    /// Remove the head entry without touching `gets`.
    ///
    /// Shared by `get` and eviction; only `depth` and `bytes` move.
    pub(crate) fn pop_oldest(&mut self) -> Option<Entry> {
        let entry = self.entries.pop_front()?;
        self.bytes -= entry.len() as u64;
        Some(entry)
    }

    pub fn depth(&self) -> u64 {
        self.entries.len() as u64
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn depth_high_water(&self) -> u64 {
        self.depth_high_water
    }

    pub fn puts(&self) -> u64 {
        self.puts
    }

    pub fn gets(&self) -> u64 {
        self.gets
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            puts: self.puts,
            gets: self.gets,
            depth: self.depth(),
            depth_high_water: self.depth_high_water,
        }
    }
}

/// Non-destructive iterator over a queue's payloads, oldest first.
///
/// A dump of an unknown queue is simply empty.
#[derive(Debug, Clone, Default)]
pub struct Dump<'a> {
    inner: Option<vec_deque::Iter<'a, Entry>>,
}

impl<'a> Dump<'a> {
    pub fn empty() -> Self {
        Self { inner: None }
    }
}

impl<'a> Iterator for Dump<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next().map(Entry::as_bytes)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(iter) => iter.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for Dump<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_updates_counters() {
        let mut queue = Queue::new("q");
        queue.put("abc");
        queue.put("de");

        assert_eq!(queue.depth(), 2);
        assert_eq!(queue.bytes(), 5);
        assert_eq!(queue.puts(), 2);
        assert_eq!(queue.gets(), 0);
        assert_eq!(queue.depth_high_water(), 2);
    }

    #[test]
    fn test_get_is_fifo() {
        let mut queue = Queue::new("q");
        queue.put("A");
        queue.put("B");
        queue.put("C");

        assert_eq!(queue.get(), Some(b"A".to_vec()));
        assert_eq!(queue.get(), Some(b"B".to_vec()));
        assert_eq!(queue.get(), Some(b"C".to_vec()));
        assert_eq!(queue.get(), None);

        assert_eq!(queue.gets(), 3);
        assert_eq!(queue.depth(), 0);
        assert_eq!(queue.bytes(), 0);
        assert_eq!(queue.depth_high_water(), 3);
    }

    #[test]
    fn test_get_on_empty_does_not_count() {
        let mut queue = Queue::new("q");
        assert_eq!(queue.get(), None);
        assert_eq!(queue.gets(), 0);
    }

    #[test]
    fn test_dump_is_non_destructive_and_restartable() {
        let mut queue = Queue::new("q");
        queue.put("one");
        queue.put("two");

        let first: Vec<&[u8]> = queue.dump().collect();
        let second: Vec<&[u8]> = queue.dump().collect();

        assert_eq!(first, vec![b"one".as_slice(), b"two".as_slice()]);
        assert_eq!(first, second);
        assert_eq!(queue.dump().len(), 2);
        assert_eq!(queue.depth(), 2);
    }

    #[test]
    fn test_pop_oldest_leaves_gets_alone() {
        let mut queue = Queue::new("q");
        queue.put("xyz");

        let entry = queue.pop_oldest().unwrap();
        assert_eq!(entry.as_bytes(), b"xyz");
        assert_eq!(queue.gets(), 0);
        assert_eq!(queue.bytes(), 0);
        assert!(queue.pop_oldest().is_none());
    }

    #[test]
    fn test_empty_payload_is_an_entry() {
        let mut queue = Queue::new("q");
        queue.put(Vec::<u8>::new());

        assert_eq!(queue.depth(), 1);
        assert_eq!(queue.bytes(), 0);
        assert_eq!(queue.get(), Some(Vec::new()));
    }

    #[test]
    fn test_default_queue_name() {
        assert_eq!(queue_name_or_default(None), "default");
        assert_eq!(queue_name_or_default(Some("jobs")), "jobs");
        assert_eq!(Dump::empty().count(), 0);
    }
}
