//! Application state for the terminal front end.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use crate::report::Report;
use crate::settings::MonitorConfig;
use crate::source::{HostSource, SimTime};
use crate::ui::{Theme, ViewBinder};
use crate::widget::ServerMonitor;

/// Main application state.
pub struct App {
    pub running: bool,

    // Host
    source: Box<dyn HostSource>,
    pub load_error: Option<String>,
    pub host_time: Option<SimTime>,

    pub monitor: ServerMonitor,
    pub binder: ViewBinder,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with an auto-detected theme. The monitor starts active.
    pub fn new(source: Box<dyn HostSource>, config: MonitorConfig) -> Self {
        Self::with_theme(source, config, Theme::auto_detect())
    }

    pub fn with_theme(source: Box<dyn HostSource>, config: MonitorConfig, theme: Theme) -> Self {
        let mut monitor = ServerMonitor::new(config);
        monitor.activate();
        Self {
            running: true,
            source,
            load_error: None,
            host_time: None,
            monitor,
            binder: ViewBinder::new(theme),
            status_message: None,
        }
    }

    /// Returns a description of the host source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Pull the host state and advance the monitor by one frame.
    ///
    /// Returns whether the monitor did any work this frame.
    pub fn tick(&mut self, now: Instant) -> bool {
        let snapshot = self.source.snapshot();
        self.load_error = self.source.error().map(str::to_string);
        self.host_time = snapshot.as_ref().map(|s| s.time);
        self.monitor.tick(snapshot.as_ref(), now).is_some()
    }

    /// Pause or resume the monitor.
    pub fn toggle_active(&mut self) {
        if self.monitor.is_active() {
            self.monitor.deactivate();
        } else {
            self.monitor.activate();
        }
    }

    pub fn toggle_window(&mut self) {
        self.binder.toggle_window();
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(report) = Report::from_monitor(&self.monitor) else {
            anyhow::bail!("No data to export");
        };
        report.write_to(path)
    }
}
