//! Budget book: a ledger, its undo/redo timeline, and the store they persist to.
//!
//! Every successful edit records one timeline entry, then writes the new state.
//! Undo and redo move the timeline cursor and write the selected snapshot back
//! as the current state without recording a new entry, so the redo branch
//! survives until the next edit, including across a reopen.

use std::{fmt, sync::Arc};

use tracing::{debug, info, warn};

use purse_config::Config;
use purse_core::{
    storage, Clock, CoreResult, HistoryService, KeyValueStore, Ledger, SystemClock, Timeline,
};
use purse_domain::{Category, Expense, LedgerSnapshot};
use purse_storage_json::JsonFileStore;

use crate::errors::{PurseError, Result};

/// Writes that have been applied in memory but not yet confirmed by the store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PendingWrites {
    state: bool,
    history: bool,
    cursor: bool,
}

impl PendingWrites {
    fn any(&self) -> bool {
        self.state || self.history || self.cursor
    }
}

pub struct BudgetBook {
    ledger: Ledger,
    timeline: Timeline,
    store: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    pending: PendingWrites,
}

impl BudgetBook {
    /// Opens the book stored in the JSON data directory named by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let store = JsonFileStore::new(config.resolve_data_dir())?;
        Self::open(Box::new(store), config.history_capacity)
    }

    pub fn open(store: Box<dyn KeyValueStore>, history_capacity: usize) -> Result<Self> {
        Self::open_with_clock(store, history_capacity, Arc::new(SystemClock))
    }

    /// Loads ledger state and history from `store`, seeding history on first use.
    ///
    /// History is written before state, so when the two disagree the entry
    /// under the stored cursor wins and the state keys are rewritten from it.
    pub fn open_with_clock(
        store: Box<dyn KeyValueStore>,
        history_capacity: usize,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let mut state = storage::load_ledger_state(store.as_ref())?;
        let timeline =
            HistoryService::initialize(store.as_ref(), &state, history_capacity, clock.as_ref())?;
        let mut pending = PendingWrites::default();
        if let Some(entry) = timeline.current() {
            if entry.snapshot != state {
                warn!("stored ledger differs from the current history entry; using history");
                state = entry.snapshot.clone();
                pending.state = true;
            }
        }
        info!(
            categories = state.categories.len(),
            history = timeline.len(),
            cursor = ?timeline.cursor(),
            "budget book opened"
        );
        let mut book = Self {
            ledger: Ledger::from_snapshot(state, clock.clone()),
            timeline,
            store,
            clock,
            pending,
        };
        if book.flush().is_err() {
            debug!("state rewrite left pending until the next write");
        }
        Ok(book)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn total_balance(&self) -> f64 {
        self.ledger.total_balance()
    }

    pub fn create_category(&mut self, name: &str, deposit: f64) -> Result<Category> {
        let category = self.ledger.create_category(name, deposit)?;
        self.commit_edit()?;
        Ok(category)
    }

    pub fn add_expense(&mut self, category_id: &str, name: &str, amount: f64) -> Result<Expense> {
        let expense = self.ledger.add_expense(category_id, name, amount)?;
        self.commit_edit()?;
        Ok(expense)
    }

    pub fn top_up_category(
        &mut self,
        category_id: &str,
        new_name: &str,
        additional: f64,
    ) -> Result<Category> {
        let category = self
            .ledger
            .top_up_category(category_id, new_name, additional)?;
        self.commit_edit()?;
        Ok(category)
    }

    pub fn delete_category(&mut self, category_id: &str) -> Result<()> {
        self.ledger.delete_category(category_id)?;
        self.commit_edit()
    }

    pub fn can_undo(&self) -> bool {
        self.timeline.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.timeline.can_redo()
    }

    /// Steps back one edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let moved = HistoryService::undo(&mut self.timeline, self.store.as_ref());
        let applied = self.apply_move(moved)?;
        if applied {
            debug!(cursor = ?self.timeline.cursor(), "undo applied");
        }
        Ok(applied)
    }

    /// Re-applies the edit most recently undone. Returns `false` when there is none.
    pub fn redo(&mut self) -> Result<bool> {
        let moved = HistoryService::redo(&mut self.timeline, self.store.as_ref());
        let applied = self.apply_move(moved)?;
        if applied {
            debug!(cursor = ?self.timeline.cursor(), "redo applied");
        }
        Ok(applied)
    }

    /// Empties the ledger and restarts history from the empty state.
    pub fn clear_all(&mut self) -> Result<()> {
        let empty = LedgerSnapshot::default();
        self.ledger.restore(empty.clone());
        self.pending.state = true;
        let store = self.store.as_ref();
        let cleared = HistoryService::clear(&mut self.timeline, store);
        let seeded =
            HistoryService::record(&mut self.timeline, store, &empty, self.clock.as_ref());
        if let Err(err) = cleared.and(seeded) {
            self.pending.history = true;
            return Err(unsynced(err));
        }
        info!("budget book cleared");
        self.flush()
    }

    /// `true` when every in-memory change has reached the store.
    pub fn is_synced(&self) -> bool {
        !self.pending.any()
    }

    /// Re-attempts the writes left behind by an [`PurseError::Unsynced`] failure.
    pub fn retry_persist(&mut self) -> Result<()> {
        if self.is_synced() {
            return Ok(());
        }
        info!("retrying pending writes");
        self.flush()
    }

    fn commit_edit(&mut self) -> Result<()> {
        let snapshot = self.ledger.snapshot();
        self.pending.state = true;
        let recorded = HistoryService::record(
            &mut self.timeline,
            self.store.as_ref(),
            &snapshot,
            self.clock.as_ref(),
        );
        match recorded {
            Ok(()) => {
                self.pending.history = false;
                self.pending.cursor = false;
            }
            Err(err) => {
                self.pending.history = true;
                return Err(unsynced(err));
            }
        }
        self.flush()
    }

    /// Loads the snapshot a cursor move landed on into the ledger and writes it
    /// as the current state. A failed cursor write still moves the ledger.
    fn apply_move(&mut self, moved: CoreResult<Option<LedgerSnapshot>>) -> Result<bool> {
        let snapshot = match moved {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Ok(false),
            Err(err) => {
                if let Some(entry) = self.timeline.current() {
                    self.ledger.restore(entry.snapshot.clone());
                }
                self.pending.state = true;
                self.pending.cursor = true;
                return Err(unsynced(err));
            }
        };
        self.ledger.restore(snapshot);
        self.pending.cursor = false;
        self.pending.state = true;
        self.flush()?;
        Ok(true)
    }

    /// Writes whatever is still pending, history before state.
    fn flush(&mut self) -> Result<()> {
        let store = self.store.as_ref();
        if self.pending.history {
            HistoryService::persist(&self.timeline, store).map_err(unsynced)?;
            self.pending.history = false;
            self.pending.cursor = false;
        } else if self.pending.cursor {
            HistoryService::persist_cursor(&self.timeline, store).map_err(unsynced)?;
            self.pending.cursor = false;
        }
        if self.pending.state {
            storage::save_ledger_state(store, self.ledger.state()).map_err(unsynced)?;
            self.pending.state = false;
        }
        Ok(())
    }
}

fn unsynced(err: purse_core::CoreError) -> PurseError {
    warn!(error = %err, "write failed; change kept in memory");
    PurseError::Unsynced(err)
}

impl fmt::Debug for BudgetBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BudgetBook")
            .field("ledger", &self.ledger)
            .field("timeline", &self.timeline)
            .field("pending", &self.pending)
            .finish()
    }
}
