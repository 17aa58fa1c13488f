//! Bounded undo/redo timeline of full ledger snapshots.

use purse_domain::{HistoryEntry, LedgerSnapshot};
use tracing::{debug, info, warn};

use crate::{
    storage::{self, KeyValueStore, HISTORY_INDEX_KEY, HISTORY_KEY},
    Clock, CoreResult,
};

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Ordered snapshots plus a cursor marking the current one.
///
/// `cursor` is `None` exactly when there are no entries; otherwise it indexes
/// into `entries`. Entries never change once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Timeline {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    /// Timeline holding a single entry for `seed`.
    pub fn seeded(seed: LedgerSnapshot, timestamp: i64, capacity: usize) -> Self {
        let mut timeline = Self::new(capacity);
        timeline.record(seed, timestamp);
        timeline
    }

    /// Rebuilds a timeline from persisted entries with the cursor at the tail.
    ///
    /// Only the most recent `capacity` entries are kept.
    pub fn from_entries(entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        Self::from_entries_at(entries, None, capacity)
    }

    /// Rebuilds a timeline with the cursor on `cursor`, or at the tail when
    /// `cursor` is `None` or out of range.
    ///
    /// Entries beyond `capacity` are dropped from the front and the cursor
    /// shifts down with them, stopping at the oldest kept entry.
    pub fn from_entries_at(
        mut entries: Vec<HistoryEntry>,
        cursor: Option<usize>,
        capacity: usize,
    ) -> Self {
        let capacity = capacity.max(1);
        let tail = entries.len().checked_sub(1);
        let cursor = cursor.filter(|&cursor| cursor < entries.len()).or(tail);
        let dropped = entries.len().saturating_sub(capacity);
        entries.drain(..dropped);
        Self {
            entries,
            cursor: cursor.map(|cursor| cursor.saturating_sub(dropped)),
            capacity,
        }
    }

    /// Appends `snapshot` after the cursor, dropping any redo branch.
    ///
    /// Returns the new cursor, which always points at the appended entry.
    pub fn record(&mut self, snapshot: LedgerSnapshot, timestamp: i64) -> usize {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        self.entries.truncate(keep);
        self.entries.push(HistoryEntry::new(snapshot, timestamp));
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        let cursor = self.entries.len() - 1;
        self.cursor = Some(cursor);
        cursor
    }

    /// Steps back one entry and returns a copy of the snapshot now current.
    pub fn undo(&mut self) -> Option<LedgerSnapshot> {
        let cursor = self.cursor.filter(|&cursor| cursor > 0)? - 1;
        self.cursor = Some(cursor);
        Some(self.entries[cursor].snapshot.clone())
    }

    /// Steps forward one entry and returns a copy of the snapshot now current.
    pub fn redo(&mut self) -> Option<LedgerSnapshot> {
        let cursor = self.cursor.filter(|&cursor| cursor + 1 < self.entries.len())? + 1;
        self.cursor = Some(cursor);
        Some(self.entries[cursor].snapshot.clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.map(|cursor| &self.entries[cursor])
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

/// Pairs timeline transitions with persistence under the history keys.
pub struct HistoryService;

impl HistoryService {
    /// Loads persisted history, or `None` when nothing has been recorded yet.
    ///
    /// The stored cursor is authoritative; a missing or out-of-range cursor
    /// falls back to the tail.
    pub fn load(store: &dyn KeyValueStore, capacity: usize) -> CoreResult<Option<Timeline>> {
        let entries: Vec<HistoryEntry> = storage::load(store, HISTORY_KEY)?.unwrap_or_default();
        if entries.is_empty() {
            return Ok(None);
        }
        let len = entries.len();
        let stored: Option<i64> = storage::load(store, HISTORY_INDEX_KEY)?;
        let cursor = stored
            .and_then(|cursor| usize::try_from(cursor).ok())
            .filter(|&cursor| cursor < len);
        if cursor.is_none() {
            warn!(
                stored = ?stored,
                entries = len,
                "history cursor missing or out of range; using the tail"
            );
        }
        Ok(Some(Timeline::from_entries_at(entries, cursor, capacity)))
    }

    /// Returns the persisted timeline, or seeds and persists a new one from `seed`.
    ///
    /// Calling it again once history exists only reloads it.
    pub fn initialize(
        store: &dyn KeyValueStore,
        seed: &LedgerSnapshot,
        capacity: usize,
        clock: &dyn Clock,
    ) -> CoreResult<Timeline> {
        if let Some(timeline) = Self::load(store, capacity)? {
            debug!(entries = timeline.len(), "history loaded");
            return Ok(timeline);
        }
        let timeline = Timeline::seeded(seed.clone(), clock.now_millis(), capacity);
        Self::persist(&timeline, store)?;
        info!("history seeded");
        Ok(timeline)
    }

    /// Records `snapshot` and persists the whole timeline.
    ///
    /// On a storage error the in-memory timeline already holds the new entry;
    /// retry with [`HistoryService::persist`].
    pub fn record(
        timeline: &mut Timeline,
        store: &dyn KeyValueStore,
        snapshot: &LedgerSnapshot,
        clock: &dyn Clock,
    ) -> CoreResult<()> {
        let cursor = timeline.record(snapshot.clone(), clock.now_millis());
        debug!(cursor, entries = timeline.len(), "history recorded");
        Self::persist(timeline, store)
    }

    pub fn undo(
        timeline: &mut Timeline,
        store: &dyn KeyValueStore,
    ) -> CoreResult<Option<LedgerSnapshot>> {
        let snapshot = timeline.undo();
        if snapshot.is_some() {
            Self::persist_cursor(timeline, store)?;
        }
        Ok(snapshot)
    }

    pub fn redo(
        timeline: &mut Timeline,
        store: &dyn KeyValueStore,
    ) -> CoreResult<Option<LedgerSnapshot>> {
        let snapshot = timeline.redo();
        if snapshot.is_some() {
            Self::persist_cursor(timeline, store)?;
        }
        Ok(snapshot)
    }

    pub fn clear(timeline: &mut Timeline, store: &dyn KeyValueStore) -> CoreResult<()> {
        timeline.clear();
        info!("history cleared");
        Self::persist(timeline, store)
    }

    /// Writes entries and cursor; an empty timeline removes both keys.
    pub fn persist(timeline: &Timeline, store: &dyn KeyValueStore) -> CoreResult<()> {
        match timeline.cursor() {
            Some(cursor) => {
                storage::save(store, HISTORY_KEY, timeline.entries())?;
                storage::save(store, HISTORY_INDEX_KEY, &cursor)
            }
            None => store.remove_many(&[HISTORY_KEY, HISTORY_INDEX_KEY]),
        }
    }

    /// Writes only the cursor, enough after undo/redo.
    pub fn persist_cursor(timeline: &Timeline, store: &dyn KeyValueStore) -> CoreResult<()> {
        match timeline.cursor() {
            Some(cursor) => storage::save(store, HISTORY_INDEX_KEY, &cursor),
            None => store.remove(HISTORY_INDEX_KEY),
        }
    }
}
