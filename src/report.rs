//! JSON export of the monitor's current state.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::{Aggregate, AlarmState, DataPoint, SeverityCounts};
use crate::source::SimTime;
use crate::widget::ServerMonitor;

/// Serializable snapshot of what the monitor currently shows.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub sampled_at: SimTime,
    pub counts: SeverityCounts,
    pub current: &'a Aggregate,
    pub alarm: AlarmState,
    pub servers: &'a [DataPoint],
    /// One entry per history slot, oldest first, `null` for unfilled slots.
    pub history: Vec<Option<&'a Aggregate>>,
}

impl<'a> Report<'a> {
    /// Build a report from the last tick, or `None` if nothing was sampled yet.
    pub fn from_monitor(monitor: &'a ServerMonitor) -> Option<Self> {
        let view = monitor.view()?;
        let history = monitor
            .history()
            .map(|ring| ring.slots().map(|slot| slot.map(|e| &e.aggregate)).collect())
            .unwrap_or_default();

        Some(Self {
            sampled_at: view.batch.sampled_at,
            counts: view.current.counts,
            current: &view.current,
            alarm: view.alarm,
            servers: &view.batch.points,
            history,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write report to {}", path.display()))
    }
}
