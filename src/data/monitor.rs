//! Per-server sampling and severity classification.
//!
//! This module turns a host snapshot into a [`Batch`] of [`DataPoint`]s,
//! one per server, each annotated with a [`Severity`] computed from
//! configurable [`Thresholds`].

use serde::{Deserialize, Serialize};

use crate::source::{ServerSnapshot, SimTime};

/// Utilization thresholds for severity classification.
///
/// A utilization strictly above `warning` is a warning, strictly above
/// `alarm` is an alarm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub warning: f64,
    pub alarm: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: 0.75,
            alarm: 0.90,
        }
    }
}

impl Thresholds {
    /// Classify a utilization ratio.
    ///
    /// `None` is the zero-capacity sentinel and always classifies as
    /// [`Severity::Alarm`].
    pub fn classify(&self, utilization: Option<f64>) -> Severity {
        match utilization {
            None => Severity::Alarm,
            Some(u) if u > self.alarm => Severity::Alarm,
            Some(u) if u > self.warning => Severity::Warning,
            Some(_) => Severity::Normal,
        }
    }
}

/// Severity tier for a server or an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Normal,
    Warning,
    Alarm,
}

impl Severity {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Normal => "OK",
            Severity::Warning => "WARN",
            Severity::Alarm => "ALARM",
        }
    }
}

/// Round to four decimal places, half away from zero.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// One server's computed state at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub sampled_at: SimTime,
    pub name: String,
    pub id: u32,
    /// Sum of the scaled, individually rounded item loads.
    pub load: f64,
    pub capacity: f64,
    pub item_count: usize,
    pub node_count: u32,
    /// `load / capacity` rounded to four decimals, `None` when capacity is zero.
    pub utilization: Option<f64>,
    pub severity: Severity,
}

/// All data points gathered during a single tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Batch {
    pub sampled_at: SimTime,
    pub points: Vec<DataPoint>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_load(&self) -> f64 {
        self.points.iter().fold(0.0, |sum, p| sum + p.load)
    }

    pub fn total_capacity(&self) -> f64 {
        self.points.iter().fold(0.0, |sum, p| sum + p.capacity)
    }
}

/// Builds batches from host server snapshots.
#[derive(Debug, Clone)]
pub struct Sampler {
    thresholds: Thresholds,
    load_scale: f64,
}

impl Sampler {
    /// Create a sampler.
    ///
    /// `load_scale` multiplies each item's raw load requirement before it is
    /// rounded, matching how the host displays server load.
    pub fn new(thresholds: Thresholds, load_scale: f64) -> Self {
        Self {
            thresholds,
            load_scale,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Sample every server, preserving host iteration order.
    pub fn sample(&self, servers: &[ServerSnapshot], now: SimTime) -> Batch {
        Batch {
            sampled_at: now,
            points: servers.iter().map(|s| self.sample_server(s, now)).collect(),
        }
    }

    fn sample_server(&self, server: &ServerSnapshot, now: SimTime) -> DataPoint {
        let load = server
            .items
            .iter()
            .map(|item| (item.load_requirement * self.load_scale).round())
            .fold(0.0, |sum, item_load| sum + item_load);

        let utilization = if server.capacity > 0.0 {
            Some(round4(load / server.capacity))
        } else {
            None
        };

        DataPoint {
            sampled_at: now,
            name: server.name.clone(),
            id: server.id,
            load,
            capacity: server.capacity,
            item_count: server.item_count(),
            node_count: server.node_count,
            utilization,
            severity: self.thresholds.classify(utilization),
        }
    }
}
