//! Host abstraction for reading server state.
//!
//! The monitor pulls a [`HostSnapshot`] once per tick through the
//! [`HostSource`] trait. Implementations decide where the snapshot comes from:
//! a JSON file written by the host, or a channel fed by an embedding process.

mod channel;
mod file;
mod snapshot;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use snapshot::{HostSnapshot, ItemSnapshot, ServerSnapshot, SimTime};

use std::fmt::Debug;

/// Trait for reading the host's current server state.
///
/// # Example
///
/// ```
/// use server_monitor::{FileSource, HostSource};
///
/// let mut source = FileSource::new("host.json");
/// if let Some(snapshot) = source.snapshot() {
///     println!("{} servers at t={}", snapshot.servers.len(), snapshot.time);
/// }
/// ```
pub trait HostSource: Send + Debug {
    /// Returns the host's current state.
    ///
    /// Returns `None` while the host is not ready. Callers treat that as
    /// "skip this tick". This method must not block.
    fn snapshot(&mut self) -> Option<HostSnapshot>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Returns the most recent read error, if any.
    fn error(&self) -> Option<&str>;
}
