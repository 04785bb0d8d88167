//! Batch-level reduction into a single utilization figure.

use serde::Serialize;

use super::monitor::{round4, Batch, Severity, Thresholds};

/// Number of servers in each severity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub normal: usize,
    pub warning: usize,
    pub alarm: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Normal => self.normal += 1,
            Severity::Warning => self.warning += 1,
            Severity::Alarm => self.alarm += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.normal + self.warning + self.alarm
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Normal => self.normal,
            Severity::Warning => self.warning,
            Severity::Alarm => self.alarm,
        }
    }
}

impl FromIterator<Severity> for SeverityCounts {
    fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self {
        let mut counts = Self::default();
        for severity in iter {
            counts.record(severity);
        }
        counts
    }
}

/// A batch reduced to one figure.
///
/// `tier` classifies the combined utilization and is independent of
/// `counts`: a single overloaded server raises `counts.alarm` even when the
/// fleet as a whole stays below the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    pub total_load: f64,
    pub total_capacity: f64,
    /// `total_load / total_capacity` rounded to four decimals. Zero when the
    /// batch has no capacity at all.
    pub utilization: f64,
    pub tier: Severity,
    pub counts: SeverityCounts,
}

impl Aggregate {
    /// Reduce a batch.
    pub fn reduce(batch: &Batch, thresholds: &Thresholds) -> Self {
        let total_load = batch.total_load();
        let total_capacity = batch.total_capacity();

        let utilization = if total_capacity > 0.0 {
            round4(total_load / total_capacity)
        } else {
            0.0
        };

        Self {
            total_load,
            total_capacity,
            utilization,
            tier: thresholds.classify(Some(utilization)),
            counts: batch.points.iter().map(|p| p.severity).collect(),
        }
    }

    /// The "no data" aggregate, also used for unfilled history slots.
    pub fn empty() -> Self {
        Self {
            total_load: 0.0,
            total_capacity: 0.0,
            utilization: 0.0,
            tier: Severity::Normal,
            counts: SeverityCounts::default(),
        }
    }

    /// Utilization as a percentage, rounded to two decimals for display.
    pub fn percent(&self) -> f64 {
        (self.utilization * 10_000.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Sampler;
    use crate::source::{ItemSnapshot, ServerSnapshot};

    fn server(id: u32, capacity: f64, load: f64) -> ServerSnapshot {
        ServerSnapshot {
            name: format!("srv-{}", id),
            id,
            capacity,
            node_count: 1,
            items: vec![ItemSnapshot {
                load_requirement: load,
            }],
        }
    }

    fn batch(servers: &[ServerSnapshot]) -> Batch {
        Sampler::new(Thresholds::default(), 1.0).sample(servers, 0)
    }

    #[test]
    fn test_reduce_mixed_fleet() {
        let b = batch(&[server(1, 100.0, 80.0), server(2, 100.0, 95.0)]);
        let agg = Aggregate::reduce(&b, &Thresholds::default());

        assert_eq!(agg.total_load, 175.0);
        assert_eq!(agg.total_capacity, 200.0);
        assert_eq!(agg.utilization, 0.875);
        assert_eq!(agg.tier, Severity::Warning);
        assert_eq!(
            agg.counts,
            SeverityCounts {
                normal: 0,
                warning: 1,
                alarm: 1
            }
        );
    }

    #[test]
    fn test_counts_partition_batch() {
        let b = batch(&[
            server(1, 100.0, 10.0),
            server(2, 100.0, 76.0),
            server(3, 0.0, 0.0),
            server(4, 100.0, 91.0),
            server(5, 50.0, 5.0),
        ]);
        let agg = Aggregate::reduce(&b, &Thresholds::default());
        assert_eq!(agg.counts.total(), b.len());
        assert_eq!(agg.counts.get(Severity::Normal), 2);
        assert_eq!(agg.counts.get(Severity::Warning), 1);
        assert_eq!(agg.counts.get(Severity::Alarm), 2);
    }

    #[test]
    fn test_tier_can_disagree_with_counts() {
        // One server far over capacity, many idle ones dilute the total
        let b = batch(&[
            server(1, 10.0, 50.0),
            server(2, 100.0, 0.0),
            server(3, 100.0, 0.0),
        ]);
        let agg = Aggregate::reduce(&b, &Thresholds::default());
        assert_eq!(agg.counts.alarm, 1);
        assert_eq!(agg.tier, Severity::Normal);
    }

    #[test]
    fn test_empty_batch_is_no_data() {
        let agg = Aggregate::reduce(&Batch::default(), &Thresholds::default());
        assert_eq!(agg, Aggregate::empty());
        assert_eq!(agg.counts.total(), 0);
    }

    #[test]
    fn test_zero_total_capacity_is_zero_utilization() {
        let b = batch(&[server(1, 0.0, 3.0)]);
        let agg = Aggregate::reduce(&b, &Thresholds::default());
        assert_eq!(agg.utilization, 0.0);
        assert_eq!(agg.tier, Severity::Normal);
        // The server itself still counts as alarm
        assert_eq!(agg.counts.alarm, 1);
    }

    #[test]
    fn test_percent() {
        let b = batch(&[server(1, 3.0, 1.0)]);
        let agg = Aggregate::reduce(&b, &Thresholds::default());
        assert_eq!(agg.utilization, 0.3333);
        assert_eq!(agg.percent(), 33.33);
    }
}
