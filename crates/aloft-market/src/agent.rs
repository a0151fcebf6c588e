//! The agent trait: the behavior contract the round driver consumes.

use aloft_core::{AgentId, Region, TickId, Value};

use crate::market::{AskMarket, BidMarket};

/// One autonomous participant in the permit auction.
///
/// The round driver calls these methods synchronously, in ascending ID
/// order within each phase. Implementations must not block or spawn
/// work: a tick completes only when every callback has returned.
///
/// All methods except [`stop`](Agent::stop) have no-op defaults, so a
/// minimal agent only decides when it is done:
///
/// ```
/// use aloft_core::TickId;
/// use aloft_market::Agent;
///
/// struct Bystander;
///
/// impl Agent<u32> for Bystander {
///     fn stop(&mut self, _now: TickId, _seed: u64) -> bool {
///         true
///     }
/// }
/// ```
///
/// # Determinism
///
/// The `seed` passed to [`bid_phase`](Agent::bid_phase),
/// [`ask_phase`](Agent::ask_phase), and [`stop`](Agent::stop) is drawn
/// from the engine's seeded PRNG. Agents that need randomness should
/// derive their own generator from it rather than reaching for ambient
/// entropy; that keeps whole runs reproducible from a single seed.
pub trait Agent<R: Region> {
    /// Submit sealed bids against current listings.
    ///
    /// Called once per tick while the agent is active. Bids are resolved
    /// after the phase completes for all agents; the market view hides
    /// rival bids placed earlier in the same phase.
    fn bid_phase(&mut self, _now: TickId, _market: &mut BidMarket<'_, R>, _seed: u64) {}

    /// Re-list owned permits for sale.
    ///
    /// Called once per tick after trades have cleared. Listings queued
    /// here take effect only after the phase completes for all agents.
    fn ask_phase(&mut self, _now: TickId, _market: &mut AskMarket<'_, R>, _seed: u64) {}

    /// The agent's bid for `(location, time)` won at price `value`.
    fn on_bought(&mut self, _location: &R, _time: TickId, _value: Value) {}

    /// The agent's listing of `(location, time)` sold at price `value`.
    ///
    /// Not delivered when the seller has already been compacted out of
    /// the registry by the time the trade clears.
    fn on_sold(&mut self, _location: &R, _time: TickId, _value: Value) {}

    /// The agent is being retired: its `stop` just returned true.
    ///
    /// Receives the agent's own registry ID and the final tick. Called
    /// exactly once, before compaction may destroy the agent.
    fn on_finished(&mut self, _id: AgentId, _now: TickId) {}

    /// Whether the agent is done participating.
    ///
    /// Evaluated once per tick after the ask phase. Returning `true`
    /// deactivates the agent; it takes no further part in any phase and
    /// its slot is reclaimed once no older agent remains active.
    fn stop(&mut self, now: TickId, seed: u64) -> bool;
}
