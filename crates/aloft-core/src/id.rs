//! Strongly-typed identifiers and the [`Value`] price alias.

use std::fmt;

/// Identifies an agent within a simulation run.
///
/// IDs are allocated by the agent registry in strictly increasing order
/// and are never reused, even after the agent is retired and its slot
/// compacted away. `AgentId(n)` is the n-th agent ever admitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AgentId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A discrete simulation time step.
///
/// The round driver advances the current tick by one at the end of each
/// auction round. Permit keys pair a region with the tick at which the
/// permit grants occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick `n` steps after this one.
    #[must_use]
    pub fn offset(self, n: u64) -> Self {
        Self(self.0 + n)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Price type for bids, asks, and cleared trades.
pub type Value = f64;
