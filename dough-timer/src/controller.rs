use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::format::{format_duration, PLACEHOLDER};
use crate::{
    Batch, BatchId, BatchRow, BatchStore, Clock, ReadyNotifier, RowOutcome, StoredBatch,
};

pub const TICK_INTERVAL_MS: i64 = 1_000;
pub const READY_LABEL: &str = "READY";
pub const DEFAULT_BATCH_NAME: &str = "batch";

/// Whether the one-second recheck is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ticker {
    Idle,
    Running { next_due_ms: i64 },
}

impl Ticker {
    pub fn is_running(&self) -> bool {
        matches!(self, Ticker::Running { .. })
    }
}

/// Countdown state of one batch as of the last recheck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Not rechecked yet.
    Pending,
    Remaining(i64),
    Ready,
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Pending => f.pad(PLACEHOLDER),
            Countdown::Remaining(ms) => f.pad(&format_duration(*ms)),
            Countdown::Ready => f.pad(READY_LABEL),
        }
    }
}

/// What the batch list shows for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchView {
    pub id: BatchId,
    pub name: String,
    pub end_time: i64,
    pub countdown: Countdown,
}

impl BatchView {
    fn of(batch: &Batch) -> Self {
        Self {
            id: batch.id().clone(),
            name: batch.name().to_string(),
            end_time: batch.end_time(),
            countdown: Countdown::Pending,
        }
    }
}

/// Aggregate line above the batch list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLine {
    /// Nothing tracked.
    #[default]
    Idle,
    /// Soonest remaining time among batches that are not ready.
    NextReady(i64),
    AllReady,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Idle => write!(f, "Next batch in {PLACEHOLDER}"),
            StatusLine::NextReady(ms) => write!(f, "Next batch in {}", format_duration(*ms)),
            StatusLine::AllReady => f.write_str("All batches are ready"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub entries: Vec<BatchView>,
    pub status: StatusLine,
}

/// Tracks batches, keeps their countdowns current and persists them.
///
/// All state lives here; hosts drive it by calling [`BatchTimer::tick_if_due`]
/// from their own loop.
pub struct BatchTimer {
    batches: Vec<Batch>,
    snapshot: TimerSnapshot,
    ticker: Ticker,
    clock: Arc<dyn Clock>,
    notifier: Box<dyn ReadyNotifier>,
    store: Box<dyn BatchStore>,
    // Record ids as the store held them after our last load or save
    stored_ids: HashSet<String>,
    id_seq: u64,
}

impl BatchTimer {
    pub fn new(
        clock: Arc<dyn Clock>,
        notifier: Box<dyn ReadyNotifier>,
        store: Box<dyn BatchStore>,
    ) -> Self {
        Self {
            batches: Vec::new(),
            snapshot: TimerSnapshot::default(),
            ticker: Ticker::Idle,
            clock,
            notifier,
            store,
            stored_ids: HashSet::new(),
            id_seq: 0,
        }
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn get(&self, id: &BatchId) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id() == id)
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn snapshot(&self) -> &TimerSnapshot {
        &self.snapshot
    }

    pub fn ticker(&self) -> Ticker {
        self.ticker
    }

    /// Turns valid rows into new batches, all starting at the same instant.
    ///
    /// Invalid rows are skipped without complaint. When anything was added
    /// the list is persisted, rechecked and the ticker started.
    pub fn submit_batches(&mut self, rows: &[BatchRow]) -> Vec<RowOutcome> {
        let now = self.clock.now_ms();
        let mut outcomes = Vec::with_capacity(rows.len());

        for row in rows {
            match row.validate() {
                Ok((name, hours)) => {
                    let id = self.next_id(now);
                    let batch = Batch::start(id.clone(), name, now, hours);
                    info!(id = %id, name = batch.name(), hours, "Batch started");
                    self.push(batch);
                    outcomes.push(RowOutcome::Accepted(id));
                }
                Err(reason) => {
                    debug!(name = %row.name, hours = %row.hours, %reason, "Skipping form row");
                    outcomes.push(RowOutcome::Skipped(reason));
                }
            }
        }

        if outcomes.iter().any(RowOutcome::is_accepted) {
            self.save_persisted();
            self.recheck();
            self.ensure_running(now);
        }
        outcomes
    }

    /// Removes a batch. Unknown ids change nothing, but the list is still
    /// persisted and rechecked.
    pub fn delete_batch(&mut self, id: &BatchId) -> bool {
        let removed = match self.batches.iter().position(|b| b.id() == id) {
            Some(index) => {
                self.batches.remove(index);
                self.snapshot.entries.retain(|entry| &entry.id != id);
                info!(id = %id, "Batch deleted");
                true
            }
            None => false,
        };

        self.save_persisted();
        self.recheck();
        if matches!(self.snapshot.status, StatusLine::NextReady(_)) {
            // a batch merged in from another writer may still be pending
            let now = self.clock.now_ms();
            self.ensure_running(now);
        }
        removed
    }

    /// Recomputes every countdown against a single reading of the clock.
    pub fn recheck(&mut self) -> &TimerSnapshot {
        let now = self.clock.now_ms();
        let mut next_remaining: Option<i64> = None;

        for (batch, entry) in self.batches.iter_mut().zip(self.snapshot.entries.iter_mut()) {
            let remaining = batch.remaining_ms(now);
            if remaining <= 0 {
                entry.countdown = Countdown::Ready;
                if batch.mark_done() {
                    info!(id = %batch.id(), name = batch.name(), "Batch ready");
                    if let Err(e) = self.notifier.notify_ready(batch) {
                        debug!(error = %e, "Ready cue failed");
                    }
                }
            } else {
                entry.countdown = Countdown::Remaining(remaining);
                next_remaining = Some(next_remaining.map_or(remaining, |n| n.min(remaining)));
            }
        }

        self.snapshot.status = match next_remaining {
            Some(ms) => StatusLine::NextReady(ms),
            None if !self.batches.is_empty() => StatusLine::AllReady,
            None => StatusLine::Idle,
        };

        if next_remaining.is_none() && self.ticker.is_running() {
            debug!("Nothing pending, ticker idle");
            self.ticker = Ticker::Idle;
        }

        &self.snapshot
    }

    /// Runs the recheck once its second is up. Returns whether it ran.
    pub fn tick_if_due(&mut self) -> bool {
        let Ticker::Running { next_due_ms } = self.ticker else {
            return false;
        };
        let now = self.clock.now_ms();
        if now < next_due_ms {
            return false;
        }

        // missed seconds collapse into this tick
        let mut next = next_due_ms.saturating_add(TICK_INTERVAL_MS);
        if next <= now {
            next = now.saturating_add(TICK_INTERVAL_MS);
        }
        self.ticker = Ticker::Running { next_due_ms: next };
        self.recheck();
        true
    }

    /// Restores stored batches with `done` reset. Call once, at startup.
    ///
    /// Unreadable data counts as no data. Returns how many were restored.
    pub fn load_persisted(&mut self) -> usize {
        let records = match self.store.load() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Discarding stored batches");
                return 0;
            }
        };

        let now = self.clock.now_ms();
        let restored = records.len();
        self.stored_ids = records.iter().map(|r| r.id.clone()).collect();
        for record in records {
            self.adopt(record, now);
        }
        info!(restored, "Loaded stored batches");

        if !self.batches.is_empty() {
            self.recheck();
            self.ensure_running(now);
        }
        restored
    }

    /// Writes `{id, name, endTime}` for every batch. Failures are logged only.
    ///
    /// The file may have another writer (the one-shot CLI), so the stored
    /// list is merged in first: records added since our last load or save
    /// are adopted, and tracked batches whose stored record has since
    /// disappeared are dropped.
    pub fn save_persisted(&mut self) {
        self.merge_stored();

        let records: Vec<StoredBatch> = self
            .batches
            .iter()
            .map(|b| StoredBatch {
                id: b.id().to_string(),
                name: b.name().to_string(),
                end_time: b.end_time(),
            })
            .collect();

        match self.store.save(&records) {
            Ok(()) => self.stored_ids = records.into_iter().map(|r| r.id).collect(),
            Err(e) => error!(error = %e, "Failed to save batches"),
        }
    }

    fn merge_stored(&mut self) {
        let records = match self.store.load() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Overwriting unreadable stored batches");
                return;
            }
        };
        let on_disk: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();

        let removed: Vec<BatchId> = self
            .batches
            .iter()
            .map(Batch::id)
            .filter(|id| {
                self.stored_ids.contains(id.as_str()) && !on_disk.contains(id.as_str())
            })
            .cloned()
            .collect();
        for id in &removed {
            self.batches.retain(|b| b.id() != id);
            self.snapshot.entries.retain(|entry| &entry.id != id);
            info!(id = %id, "Batch removed by another writer");
        }

        let now = self.clock.now_ms();
        for record in records {
            if self.stored_ids.contains(&record.id) {
                continue;
            }
            info!(id = %record.id, name = %record.name, "Batch added by another writer");
            self.adopt(record, now);
        }
    }

    /// Tracks a stored record, filling in a missing name and replacing an
    /// empty or already tracked id.
    fn adopt(&mut self, record: StoredBatch, now: i64) {
        let id = BatchId::new(record.id);
        let id = if id.as_str().is_empty() || self.get(&id).is_some() {
            self.next_id(now)
        } else {
            id
        };
        let name = if record.name.is_empty() {
            DEFAULT_BATCH_NAME.to_string()
        } else {
            record.name
        };
        self.push(Batch::restore(id, name, record.end_time));
    }

    fn push(&mut self, batch: Batch) {
        self.snapshot.entries.push(BatchView::of(&batch));
        self.batches.push(batch);
    }

    fn ensure_running(&mut self, now: i64) {
        if self.ticker == Ticker::Idle {
            self.ticker = Ticker::Running {
                next_due_ms: now.saturating_add(TICK_INTERVAL_MS),
            };
        }
    }

    fn next_id(&mut self, now: i64) -> BatchId {
        loop {
            self.id_seq = self.id_seq.wrapping_add(1);
            let id = BatchId::generate(now, self.id_seq);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
