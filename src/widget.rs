//! The per-frame monitor component.
//!
//! [`ServerMonitor`] owns all monitor state and advances it once per frame
//! through [`ServerMonitor::tick`]. It is single-threaded by construction:
//! every mutation happens inside `tick`, and nothing blocks.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::data::{
    Aggregate, AlarmPresenter, AlarmState, Batch, HistoryRing, Sampler, SeverityCounts,
};
use crate::settings::MonitorConfig;
use crate::source::HostSnapshot;

/// State produced by the latest tick, for the view layer.
#[derive(Debug, Clone)]
pub struct MonitorView {
    /// Servers sampled this tick.
    pub batch: Batch,
    /// This tick's batch reduced to one figure.
    pub current: Aggregate,
    pub alarm: AlarmState,
}

impl MonitorView {
    pub fn counts(&self) -> &SeverityCounts {
        &self.current.counts
    }
}

/// Samples host servers every tick and keeps the rolling history.
///
/// The component starts inactive, mirroring a host that enables the monitor
/// explicitly. The history ring is created on the first active tick, with its
/// cadence clock starting at that tick's sim time.
#[derive(Debug)]
pub struct ServerMonitor {
    config: MonitorConfig,
    active: bool,
    sampler: Sampler,
    presenter: AlarmPresenter,
    history: Option<HistoryRing>,
    view: Option<MonitorView>,
}

impl ServerMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            sampler: Sampler::new(config.thresholds, config.load_scale),
            presenter: AlarmPresenter::new(config.blink_interval()),
            config,
            active: false,
            history: None,
            view: None,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn activate(&mut self) {
        if !self.active {
            info!("server monitor activated");
        }
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        if self.active {
            info!("server monitor deactivated");
        }
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the monitor by one frame.
    ///
    /// `host` is the host's current state, or `None` while it is not ready.
    /// `wall_now` drives the alarm blink timer. Returns the refreshed view,
    /// or `None` when the tick was skipped because the monitor is inactive or
    /// the host is not ready.
    pub fn tick(&mut self, host: Option<&HostSnapshot>, wall_now: Instant) -> Option<&MonitorView> {
        if !self.active {
            return None;
        }
        let Some(host) = host else {
            debug!("host not ready, skipping tick");
            return None;
        };

        let batch = self.sampler.sample(&host.servers, host.time);
        let current = Aggregate::reduce(&batch, self.sampler.thresholds());

        let previous = self.presenter.state();
        let alarm = self.presenter.update(&current.counts, wall_now);
        if alarm.is_blinking() && !previous.is_blinking() {
            warn!(servers = current.counts.alarm, "servers entered alarm state");
        } else if previous.is_blinking() && !alarm.is_blinking() {
            info!("alarm cleared");
        }

        let history = self.history.get_or_insert_with(|| {
            debug!(
                capacity = self.config.history_len,
                cadence = self.config.cadence,
                started_at = host.time,
                "history ring created"
            );
            HistoryRing::new(self.config.history_len, self.config.cadence, host.time)
        });
        if history.maybe_append(&batch, &current, host.time) {
            debug!(
                time = host.time,
                utilization = current.utilization,
                slots = history.len(),
                "history appended"
            );
        }

        self.view = Some(MonitorView {
            batch,
            current,
            alarm,
        });
        self.view.as_ref()
    }

    /// View from the most recent successful tick.
    pub fn view(&self) -> Option<&MonitorView> {
        self.view.as_ref()
    }

    /// The history ring, once the first active tick has created it.
    pub fn history(&self) -> Option<&HistoryRing> {
        self.history.as_ref()
    }

    pub fn alarm_state(&self) -> AlarmState {
        self.presenter.state()
    }
}
