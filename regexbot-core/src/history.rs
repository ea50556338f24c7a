//! Per-channel bounded message history.
//!
//! Each channel keeps its most recent lines, newest at the tail. Appending past
//! capacity evicts from the head. Entries are never edited in place: a
//! rewritten line is removed and a fresh entry is pushed to the tail, so it
//! becomes the most recent line of its channel.
//!
//! Entries carry a store-assigned id so that a rewrite found while scanning a
//! snapshot can be applied even if newer lines arrived in the meantime.

use std::collections::{HashMap, VecDeque};

/// Single historical chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u64,
    pub sender_id: String,
    pub text: String,
    pub is_action: bool,
}

/// Ordered, size-bounded sequence of lines for one channel.
#[derive(Debug, Clone)]
pub struct ChannelHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl ChannelHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    fn remove(&mut self, id: u64) -> Option<HistoryEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        self.entries.remove(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

/// History for every channel the bot has seen.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    channels: HashMap<String, ChannelHistory>,
    max_messages: usize,
    next_id: u64,
}

impl HistoryStore {
    pub fn new(max_messages: usize) -> Self {
        Self {
            channels: HashMap::new(),
            max_messages,
            next_id: 0,
        }
    }

    fn channel_mut(&mut self, channel_id: &str) -> &mut ChannelHistory {
        let capacity = self.max_messages;
        self.channels
            .entry(channel_id.to_string())
            .or_insert_with(|| ChannelHistory::new(capacity))
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Creates the channel's (empty) history if it does not exist yet.
    pub fn touch(&mut self, channel_id: &str) {
        self.channel_mut(channel_id);
    }

    /// Appends a line at the tail and returns its id.
    pub fn append(
        &mut self,
        channel_id: &str,
        sender_id: impl Into<String>,
        text: impl Into<String>,
        is_action: bool,
    ) -> u64 {
        let id = self.allocate_id();
        let entry = HistoryEntry {
            id,
            sender_id: sender_id.into(),
            text: text.into(),
            is_action,
        };
        self.channel_mut(channel_id).push(entry);
        id
    }

    /// Removes entry `id` (if still present) and appends `text` as the newest
    /// line, keeping the original sender and action flag. Returns the new id.
    pub fn replace(&mut self, channel_id: &str, replaced: &HistoryEntry, text: impl Into<String>) -> u64 {
        let id = self.allocate_id();
        let channel = self.channel_mut(channel_id);
        channel.remove(replaced.id);
        channel.push(HistoryEntry {
            id,
            sender_id: replaced.sender_id.clone(),
            text: text.into(),
            is_action: replaced.is_action,
        });
        id
    }

    /// Point-in-time copy of a channel's lines, oldest first.
    pub fn snapshot(&self, channel_id: &str) -> Vec<HistoryEntry> {
        self.channels
            .get(channel_id)
            .map(|c| c.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn channel(&self, channel_id: &str) -> Option<&ChannelHistory> {
        self.channels.get(channel_id)
    }

    pub fn len(&self, channel_id: &str) -> usize {
        self.channels.get(channel_id).map_or(0, ChannelHistory::len)
    }

    pub fn is_empty(&self, channel_id: &str) -> bool {
        self.len(channel_id) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(store: &HistoryStore, channel: &str) -> Vec<String> {
        store.snapshot(channel).into_iter().map(|e| e.text).collect()
    }

    #[test]
    fn test_append_evicts_oldest_first() {
        let mut store = HistoryStore::new(3);
        for i in 0..10 {
            store.append("C1", "U1", format!("line {}", i), false);
            assert!(store.len("C1") <= 3);
        }
        assert_eq!(texts(&store, "C1"), vec!["line 7", "line 8", "line 9"]);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut store = HistoryStore::new(2);
        store.append("C1", "U1", "a", false);
        store.append("C2", "U2", "b", false);
        assert_eq!(texts(&store, "C1"), vec!["a"]);
        assert_eq!(texts(&store, "C2"), vec!["b"]);
        assert!(store.is_empty("C3"));
        assert!(store.channel("C3").is_none());
    }

    #[test]
    fn test_touch_creates_empty_channel() {
        let mut store = HistoryStore::new(2);
        store.touch("C1");
        assert!(store.channel("C1").is_some());
        assert!(store.is_empty("C1"));
    }

    #[test]
    fn test_replace_moves_entry_to_tail() {
        let mut store = HistoryStore::new(5);
        store.append("C1", "A", "foo", false);
        store.append("C1", "B", "bar", true);
        let first = store.snapshot("C1")[0].clone();

        store.replace("C1", &first, "baz");

        let snapshot = store.snapshot("C1");
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].text, "bar");
        assert_eq!(snapshot[1].text, "baz");
        assert_eq!(snapshot[1].sender_id, "A");
        assert!(!snapshot[1].is_action);
        assert_ne!(snapshot[1].id, first.id);
    }

    #[test]
    fn test_replace_after_eviction_still_appends() {
        let mut store = HistoryStore::new(2);
        store.append("C1", "A", "old", false);
        let old = store.snapshot("C1")[0].clone();
        store.append("C1", "B", "x", false);
        store.append("C1", "C", "y", false);

        store.replace("C1", &old, "new");
        assert_eq!(texts(&store, "C1"), vec!["y", "new"]);
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_appends() {
        let mut store = HistoryStore::new(5);
        store.append("C1", "A", "one", false);
        let snapshot = store.snapshot("C1");
        store.append("C1", "A", "two", false);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len("C1"), 2);
    }
}
