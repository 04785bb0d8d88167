//! Button alarm state machine.
//!
//! The presenter only looks at the per-server severity counts of the current
//! batch. It blinks while any server is in alarm, shows a steady warning
//! while any server is in warning, and stays quiet otherwise.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::aggregate::SeverityCounts;

/// Default time between two blink toggles.
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(300);

/// Visual state of the monitor button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AlarmState {
    #[default]
    Quiet,
    SteadyWarn,
    BlinkOn,
    BlinkOff,
}

impl AlarmState {
    pub fn is_blinking(&self) -> bool {
        matches!(self, AlarmState::BlinkOn | AlarmState::BlinkOff)
    }
}

/// Drives [`AlarmState`] from severity counts and a wall clock.
///
/// The blink timer runs on wall time rather than sim time, so the blink rate
/// does not depend on game speed.
#[derive(Debug, Clone)]
pub struct AlarmPresenter {
    state: AlarmState,
    blink_interval: Duration,
    last_toggle: Option<Instant>,
}

impl Default for AlarmPresenter {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_INTERVAL)
    }
}

impl AlarmPresenter {
    pub fn new(blink_interval: Duration) -> Self {
        Self {
            state: AlarmState::Quiet,
            blink_interval,
            last_toggle: None,
        }
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    pub fn blink_interval(&self) -> Duration {
        self.blink_interval
    }

    /// Advance the state machine for one tick.
    pub fn update(&mut self, counts: &SeverityCounts, now: Instant) -> AlarmState {
        self.state = if counts.alarm > 0 {
            self.next_blink(now)
        } else {
            self.last_toggle = None;
            if counts.warning > 0 {
                AlarmState::SteadyWarn
            } else {
                AlarmState::Quiet
            }
        };
        self.state
    }

    fn next_blink(&mut self, now: Instant) -> AlarmState {
        let Some(last) = self.last_toggle else {
            // Entering the blink cycle
            self.last_toggle = Some(now);
            return AlarmState::BlinkOn;
        };

        if now.saturating_duration_since(last) < self.blink_interval {
            return self.state;
        }

        self.last_toggle = Some(now);
        match self.state {
            AlarmState::BlinkOn => AlarmState::BlinkOff,
            _ => AlarmState::BlinkOn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(normal: usize, warning: usize, alarm: usize) -> SeverityCounts {
        SeverityCounts {
            normal,
            warning,
            alarm,
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_initial_state_is_quiet() {
        let presenter = AlarmPresenter::default();
        assert_eq!(presenter.state(), AlarmState::Quiet);
        assert_eq!(presenter.blink_interval(), ms(300));
    }

    #[test]
    fn test_warning_is_steady() {
        let mut presenter = AlarmPresenter::default();
        let t0 = Instant::now();
        assert_eq!(presenter.update(&counts(3, 1, 0), t0), AlarmState::SteadyWarn);
        assert_eq!(presenter.update(&counts(3, 1, 0), t0 + ms(1000)), AlarmState::SteadyWarn);
        assert_eq!(presenter.update(&counts(4, 0, 0), t0 + ms(1100)), AlarmState::Quiet);
    }

    #[test]
    fn test_alarm_blinks_on_interval() {
        let mut presenter = AlarmPresenter::default();
        let t0 = Instant::now();
        let alarm = counts(0, 2, 1);

        assert_eq!(presenter.update(&alarm, t0), AlarmState::BlinkOn);
        assert_eq!(presenter.update(&alarm, t0 + ms(100)), AlarmState::BlinkOn);
        assert_eq!(presenter.update(&alarm, t0 + ms(299)), AlarmState::BlinkOn);
        assert_eq!(presenter.update(&alarm, t0 + ms(300)), AlarmState::BlinkOff);
        assert_eq!(presenter.update(&alarm, t0 + ms(450)), AlarmState::BlinkOff);
        assert_eq!(presenter.update(&alarm, t0 + ms(600)), AlarmState::BlinkOn);
    }

    #[test]
    fn test_toggle_timer_restarts_at_each_toggle() {
        let mut presenter = AlarmPresenter::default();
        let t0 = Instant::now();
        let alarm = counts(0, 0, 1);

        presenter.update(&alarm, t0);
        // A slow frame toggles late; the next toggle is measured from it
        assert_eq!(presenter.update(&alarm, t0 + ms(500)), AlarmState::BlinkOff);
        assert_eq!(presenter.update(&alarm, t0 + ms(700)), AlarmState::BlinkOff);
        assert_eq!(presenter.update(&alarm, t0 + ms(800)), AlarmState::BlinkOn);
    }

    #[test]
    fn test_blinking_stops_when_alarm_clears() {
        let mut presenter = AlarmPresenter::default();
        let t0 = Instant::now();

        presenter.update(&counts(0, 0, 1), t0);
        presenter.update(&counts(0, 0, 1), t0 + ms(300));
        assert!(presenter.state().is_blinking());

        assert_eq!(presenter.update(&counts(1, 1, 0), t0 + ms(310)), AlarmState::SteadyWarn);
        assert!(!presenter.state().is_blinking());

        // Re-entering the cycle starts from BlinkOn again
        assert_eq!(presenter.update(&counts(0, 0, 1), t0 + ms(320)), AlarmState::BlinkOn);
    }

    #[test]
    fn test_custom_interval() {
        let mut presenter = AlarmPresenter::new(ms(50));
        let t0 = Instant::now();
        let alarm = counts(0, 0, 2);

        presenter.update(&alarm, t0);
        assert_eq!(presenter.update(&alarm, t0 + ms(50)), AlarmState::BlinkOff);
        assert_eq!(presenter.update(&alarm, t0 + ms(100)), AlarmState::BlinkOn);
    }

    #[test]
    fn test_no_servers_is_quiet() {
        let mut presenter = AlarmPresenter::default();
        assert_eq!(presenter.update(&counts(0, 0, 0), Instant::now()), AlarmState::Quiet);
    }
}
