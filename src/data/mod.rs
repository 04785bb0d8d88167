//! Sampling, aggregation, history and alarm logic.
//!
//! This is the core of the monitor. Everything here is plain computation over
//! host snapshots with no I/O.
//!
//! ## Submodules
//!
//! - [`monitor`]: per-server [`DataPoint`]s, [`Severity`] and the [`Sampler`]
//! - [`aggregate`]: reduction of a [`Batch`] into an [`Aggregate`]
//! - [`history`]: the [`HistoryRing`] of periodic batches
//! - [`alarm`]: the [`AlarmPresenter`] blink state machine
//!
//! ## Data Flow
//!
//! ```text
//! HostSnapshot
//!        │
//!        ▼
//! Sampler::sample() ──▶ Batch
//!                         │
//!                         ├──▶ Aggregate::reduce() ──▶ AlarmPresenter::update()
//!                         │
//!                         └──▶ HistoryRing::maybe_append() (on cadence)
//! ```

pub mod aggregate;
pub mod alarm;
pub mod history;
pub mod monitor;

pub use aggregate::{Aggregate, SeverityCounts};
pub use alarm::{AlarmPresenter, AlarmState};
pub use history::{HistoryEntry, HistoryRing};
pub use monitor::{Batch, DataPoint, Sampler, Severity, Thresholds};
