//! Plain-value copies of the host game's server state.
//!
//! The host owns a live object graph of servers and the jobs running on them.
//! The monitor never holds on to that graph: every tick it works from one of
//! these snapshots, which the host side fills in by value.

use serde::{Deserialize, Serialize};

/// Simulation clock reading, in whole time units (minutes of game time).
pub type SimTime = i64;

/// Everything the monitor needs from the host for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    /// Current simulation time.
    pub time: SimTime,
    /// All servers in host iteration order.
    #[serde(default)]
    pub servers: Vec<ServerSnapshot>,
}

/// A single server entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSnapshot {
    pub name: String,
    /// Stable host-assigned identifier.
    pub id: u32,
    /// Total throughput the server can serve.
    pub capacity: f64,
    /// Number of hardware nodes backing the server.
    #[serde(default)]
    pub node_count: u32,
    /// Items (jobs) currently assigned to the server.
    #[serde(default)]
    pub items: Vec<ItemSnapshot>,
}

impl ServerSnapshot {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// One item placed on a server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    /// Raw demand the item puts on its server, before display scaling.
    pub load_requirement: f64,
}
