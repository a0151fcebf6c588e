//! The agent registry: an append-only population with compacting removal.

use std::collections::VecDeque;
use std::fmt;

use aloft_core::{AgentId, Region};
use aloft_market::Agent;

/// Where an agent ID stands relative to the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentStatus {
    /// Allocated and still participating in phases.
    Active,
    /// Allocated but no longer active: stopped, possibly compacted away.
    Retired,
    /// Never allocated (beyond the highest ID handed out so far).
    OutOfLimits,
}

/// Holds the live agent population and its stable integer IDs.
///
/// IDs are allocated strictly monotonically and never reused. Agents are
/// stored in a deque indexed by `id - first_id`; when every agent below
/// some ID has retired, [`update_active`](Self::update_active) pops the
/// dead prefix and advances `first_id`, destroying those agents. The
/// active list is always sorted ascending with no duplicates.
pub struct AgentRegistry<R: Region> {
    first_id: u64,
    agents: VecDeque<Box<dyn Agent<R>>>,
    active: Vec<AgentId>,
}

impl<R: Region> AgentRegistry<R> {
    /// Create an empty registry; the first admitted agent gets ID 0.
    pub fn new() -> Self {
        Self {
            first_id: 0,
            agents: VecDeque::new(),
            active: Vec::new(),
        }
    }

    /// Admit an agent, returning its freshly allocated ID.
    ///
    /// The new ID is larger than every ID allocated before, so admissions
    /// land after existing actives and the active list stays sorted.
    pub fn insert(&mut self, agent: Box<dyn Agent<R>>) -> AgentId {
        let id = AgentId(self.first_id + self.agents.len() as u64);
        self.agents.push_back(agent);
        self.active.push(id);
        id
    }

    /// Replace the active list with the surviving IDs and compact.
    ///
    /// `keep_active` must be sorted ascending without duplicates (a
    /// subsequence of the current active list). Agents below the new
    /// smallest active ID are destroyed and `first_id` advances to meet
    /// it. An empty list clears the active set but compacts nothing —
    /// retired agents above `first_id` stay in their slots.
    pub fn update_active(&mut self, keep_active: Vec<AgentId>) {
        debug_assert!(
            keep_active.windows(2).all(|w| w[0] < w[1]),
            "keep_active must be sorted ascending without duplicates"
        );
        self.active = keep_active;
        let Some(first) = self.active.first() else {
            return;
        };
        while self.first_id < first.0 {
            self.first_id += 1;
            self.agents.pop_front();
        }
    }

    /// Mutable access to the agent occupying `id`'s slot.
    ///
    /// # Panics
    ///
    /// Panics if `id` has been compacted away or never allocated; both
    /// are contract violations in the driver, not reachable through the
    /// public simulation API.
    pub fn get_mut(&mut self, id: AgentId) -> &mut dyn Agent<R> {
        debug_assert!(id.0 >= self.first_id, "agent {id} already compacted");
        let slot = (id.0 - self.first_id) as usize;
        self.agents[slot].as_mut()
    }

    /// The sorted list of active IDs.
    pub fn active(&self) -> &[AgentId] {
        &self.active
    }

    /// Number of active agents.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// The smallest active ID, if any agent is active.
    pub fn first_active(&self) -> Option<AgentId> {
        self.active.first().copied()
    }

    /// Classify `id` relative to the current population.
    pub fn status(&self, id: AgentId) -> AgentStatus {
        if id.0 >= self.first_id + self.agents.len() as u64 {
            AgentStatus::OutOfLimits
        } else if self.active.binary_search(&id).is_ok() {
            AgentStatus::Active
        } else {
            AgentStatus::Retired
        }
    }
}

impl<R: Region> Default for AgentRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Region> fmt::Debug for AgentRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("first_id", &self.first_id)
            .field("slots", &self.agents.len())
            .field("active", &self.active)
            .finish()
    }
}
