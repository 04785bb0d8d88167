//! Channel-based host source.
//!
//! Used when the monitor is embedded in a process that already has the host
//! state in memory. The producer publishes snapshots into a tokio watch
//! channel and the monitor reads the latest one every tick.

use tokio::sync::watch;

use super::{HostSnapshot, HostSource};

/// A host source fed through a watch channel.
///
/// The channel starts out holding `None`, meaning the host is not ready yet.
///
/// # Example
///
/// ```
/// use server_monitor::{ChannelSource, HostSnapshot, HostSource};
///
/// let (tx, mut source) = ChannelSource::create("embedded");
/// assert!(source.snapshot().is_none());
///
/// tx.send(Some(HostSnapshot::default())).unwrap();
/// assert!(source.snapshot().is_some());
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<HostSnapshot>>,
    description: String,
}

impl ChannelSource {
    /// Wrap the receiving end of an existing channel.
    pub fn new(receiver: watch::Receiver<Option<HostSnapshot>>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair. The sender publishes host state, `Some` once
    /// the host is up.
    pub fn create(source_description: &str) -> (watch::Sender<Option<HostSnapshot>>, Self) {
        let (tx, rx) = watch::channel(None);
        (tx, Self::new(rx, source_description))
    }
}

impl HostSource for ChannelSource {
    fn snapshot(&mut self) -> Option<HostSnapshot> {
        // Latest value wins; the sender may have published several times
        // between two ticks.
        self.receiver.borrow_and_update().clone()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}
