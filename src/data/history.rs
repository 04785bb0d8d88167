//! Rolling window of periodic batches for the history bar chart.

use std::collections::VecDeque;

use super::aggregate::Aggregate;
use super::monitor::Batch;
use crate::source::SimTime;

/// Default number of history slots.
pub const DEFAULT_HISTORY_LEN: usize = 24;

/// Default sim time between two history appends.
pub const DEFAULT_CADENCE: SimTime = 60;

/// A batch that made it into history, with its aggregate cached so the chart
/// does not reduce every slot on every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub batch: Batch,
    pub aggregate: Aggregate,
}

/// Fixed-capacity FIFO of batches, oldest first.
///
/// A batch is only appended once `cadence` sim time units have passed since
/// the previous append. Once full, each append evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    cadence: SimTime,
    last_append: SimTime,
}

impl HistoryRing {
    /// Create an empty ring whose cadence clock starts at `started_at`.
    ///
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize, cadence: SimTime, started_at: SimTime) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            cadence,
            last_append: started_at,
        }
    }

    /// Append `batch` if the cadence has elapsed since the last append.
    ///
    /// Returns whether the batch was appended. When it was not, the ring and
    /// its last-append time are left untouched.
    pub fn maybe_append(&mut self, batch: &Batch, aggregate: &Aggregate, now: SimTime) -> bool {
        // Host time is untrusted and may jump arbitrarily far
        if now.saturating_sub(self.last_append) < self.cadence {
            return false;
        }

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            batch: batch.clone(),
            aggregate: *aggregate,
        });
        self.last_append = now;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cadence(&self) -> SimTime {
        self.cadence
    }

    pub fn last_append(&self) -> SimTime {
        self.last_append
    }

    /// Filled entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Most recently appended entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Exactly `capacity` display slots, oldest first.
    ///
    /// Until the ring fills up, the leading slots are `None` so that the
    /// newest entry always sits in the last slot.
    pub fn slots(&self) -> impl Iterator<Item = Option<&HistoryEntry>> {
        let padding = self.capacity - self.entries.len();
        std::iter::repeat_n(None, padding).chain(self.entries.iter().map(Some))
    }
}
