//! # server-monitor
//!
//! A server utilization monitor for a simulation game host.
//!
//! Every frame the monitor samples the host's servers, computes each
//! server's utilization and severity, and drives a status button that blinks
//! while any server is overloaded. At a fixed sim-time cadence the frame's
//! batch is pushed into a rolling history shown as a bar chart.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐   ┌─────────┐ │
//! │  │  app    │───▶│  widget  │───▶│    ui    │──▶│ Terminal│ │
//! │  │ (shell) │    │  (tick)  │    │ (binder) │   │         │ │
//! │  └────┬────┘    └────┬─────┘    └──────────┘   └─────────┘ │
//! │       │              │                                      │
//! │       ▼              ▼                                      │
//! │  ┌─────────┐    ┌──────────┐                                │
//! │  │ source  │    │   data   │ Sampler, Aggregate,            │
//! │  │ (host)  │    │  (core)  │ HistoryRing, AlarmPresenter    │
//! │  └─────────┘    └──────────┘                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: host abstraction ([`HostSource`]) with file and channel
//!   implementations
//! - **[`data`]**: sampling, aggregation, the history ring and the alarm state
//!   machine
//! - **[`widget`]**: [`ServerMonitor`], the per-frame component tying the core
//!   together
//! - **[`ui`]**: ratatui rendering through the [`ViewBinder`]
//! - **[`settings`]**: [`MonitorConfig`] loaded from file and environment
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a host snapshot file written by the game
//! server-monitor --file host.json
//!
//! # Write a one-off JSON report instead of opening the TUI
//! server-monitor --file host.json --export report.json
//! ```
//!
//! ### Driving the monitor directly
//!
//! ```
//! use std::time::Instant;
//! use server_monitor::{
//!     AlarmState, HostSnapshot, ItemSnapshot, MonitorConfig, ServerMonitor, ServerSnapshot,
//! };
//!
//! let mut monitor = ServerMonitor::new(MonitorConfig::default());
//! monitor.activate();
//!
//! let host = HostSnapshot {
//!     time: 0,
//!     servers: vec![ServerSnapshot {
//!         name: "Web".to_string(),
//!         id: 1,
//!         capacity: 100.0,
//!         node_count: 2,
//!         items: vec![ItemSnapshot { load_requirement: 10.0 }],
//!     }],
//! };
//!
//! let view = monitor.tick(Some(&host), Instant::now()).unwrap();
//! assert_eq!(view.current.counts.normal, 1);
//! assert_eq!(view.alarm, AlarmState::Quiet);
//! ```
//!
//! ### With a channel source
//!
//! ```
//! use server_monitor::{App, ChannelSource, MonitorConfig};
//!
//! let (_tx, source) = ChannelSource::create("embedded");
//! let app = App::new(Box::new(source), MonitorConfig::default());
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod report;
pub mod settings;
pub mod source;
pub mod ui;
pub mod widget;

pub use app::App;
pub use data::{
    Aggregate, AlarmPresenter, AlarmState, Batch, DataPoint, HistoryEntry, HistoryRing, Sampler,
    Severity, SeverityCounts, Thresholds,
};
pub use report::Report;
pub use settings::{MonitorConfig, SettingsError};
pub use source::{
    ChannelSource, FileSource, HostSnapshot, HostSource, ItemSnapshot, ServerSnapshot, SimTime,
};
pub use ui::{Theme, ViewBinder};
pub use widget::{MonitorView, ServerMonitor};
