//! Goal-seeking agent: acquire a set of regions at one common tick.

use indexmap::IndexSet;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use aloft_core::{Permit, Region, TickId, Value};
use aloft_market::{Agent, AskMarket, BidMarket};

/// Acquires a fixed set of goal regions, all at the same future tick.
///
/// Each bid phase the agent probes forward from `now + 1` for the
/// earliest tick at which every goal is simultaneously available, then
/// bids a random fraction of `bid_scale` on each goal there. While the
/// set is incomplete it re-lists everything it holds at a zero floor
/// (partial acquisitions are worthless); once every goal is held it
/// keeps its permits and stops.
///
/// Constructed via [`GoalAgent::builder`].
#[derive(Debug)]
pub struct GoalAgent<R: Region> {
    goals: IndexSet<R>,
    owned: IndexSet<Permit<R>>,
    cost: Value,
    bid_scale: Value,
    probe_step: u64,
    max_probes: u32,
}

/// Builder for [`GoalAgent`].
///
/// Required field: `goals` (at least one region).
pub struct GoalAgentBuilder<R: Region> {
    goals: Vec<R>,
    bid_scale: Value,
    probe_step: u64,
    max_probes: u32,
}

impl<R: Region> GoalAgent<R> {
    /// Create a new builder for configuring a `GoalAgent`.
    pub fn builder() -> GoalAgentBuilder<R> {
        GoalAgentBuilder {
            goals: Vec::new(),
            bid_scale: 1.0,
            probe_step: 5,
            max_probes: 16,
        }
    }

    /// Total spent on purchases minus revenue from sales so far.
    pub fn cost(&self) -> Value {
        self.cost
    }

    /// Whether every goal region is currently held.
    pub fn complete(&self) -> bool {
        self.owned.len() == self.goals.len()
    }
}

impl<R: Region> GoalAgentBuilder<R> {
    /// Set the goal regions (duplicates collapse).
    pub fn goals(mut self, goals: impl IntoIterator<Item = R>) -> Self {
        self.goals = goals.into_iter().collect();
        self
    }

    /// Set the upper bound on each random bid (default: 1.0).
    pub fn bid_scale(mut self, scale: Value) -> Self {
        self.bid_scale = scale;
        self
    }

    /// Set the largest random forward jump while probing for a tick at
    /// which all goals are available (default: 5).
    pub fn probe_step(mut self, step: u64) -> Self {
        self.probe_step = step;
        self
    }

    /// Set how many candidate ticks are probed per bid phase before the
    /// agent gives up for the round (default: 16).
    ///
    /// Keeps the agent from spinning forever when a look-ahead window
    /// makes far-future goals permanently unavailable.
    pub fn max_probes(mut self, probes: u32) -> Self {
        self.max_probes = probes;
        self
    }

    /// Build the agent, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `goals` is empty
    /// - `bid_scale` is non-positive or not finite
    /// - `probe_step` or `max_probes` is zero
    pub fn build(self) -> Result<GoalAgent<R>, String> {
        if self.goals.is_empty() {
            return Err("goals must contain at least one region".to_string());
        }
        if !self.bid_scale.is_finite() || self.bid_scale <= 0.0 {
            return Err(format!(
                "bid_scale must be finite and > 0, got {}",
                self.bid_scale
            ));
        }
        if self.probe_step == 0 {
            return Err("probe_step must be at least 1".to_string());
        }
        if self.max_probes == 0 {
            return Err("max_probes must be at least 1".to_string());
        }
        Ok(GoalAgent {
            goals: self.goals.into_iter().collect(),
            owned: IndexSet::new(),
            cost: 0.0,
            bid_scale: self.bid_scale,
            probe_step: self.probe_step,
            max_probes: self.max_probes,
        })
    }
}

impl<R: Region> Agent<R> for GoalAgent<R> {
    fn bid_phase(&mut self, now: TickId, market: &mut BidMarket<'_, R>, seed: u64) {
        if self.complete() {
            return;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // Probe forward for a tick at which every goal is available.
        let mut target = now.offset(1);
        let mut found = false;
        for _ in 0..self.max_probes {
            if self
                .goals
                .iter()
                .all(|goal| market.status(goal, target).is_available())
            {
                found = true;
                break;
            }
            target = target.offset(rng.gen_range(1..=self.probe_step));
        }
        if !found {
            return;
        }

        for goal in &self.goals {
            market.bid(goal, target, self.bid_scale * rng.gen::<Value>());
        }
    }

    fn ask_phase(&mut self, _now: TickId, market: &mut AskMarket<'_, R>, _seed: u64) {
        if self.complete() {
            return;
        }
        // Partial holdings are useless: flush them back to the market.
        for permit in &self.owned {
            market.ask(&permit.location, permit.time, 0.0);
        }
        self.owned.clear();
    }

    fn on_bought(&mut self, location: &R, time: TickId, value: Value) {
        self.owned.insert(Permit::new(location.clone(), time));
        self.cost += value;
    }

    fn on_sold(&mut self, _location: &R, _time: TickId, value: Value) {
        // The ask phase already dropped the permit from `owned`.
        self.cost -= value;
    }

    fn stop(&mut self, _now: TickId, _seed: u64) -> bool {
        self.complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aloft_core::{AgentId, PrivateStatus};
    use aloft_market::OrderBook;

    const ME: AgentId = AgentId(0);

    // ── Builder tests ────────────────────────────────────────

    #[test]
    fn builder_minimal() {
        let agent = GoalAgent::builder().goals([1u32, 2, 3]).build().unwrap();
        assert_eq!(agent.goals.len(), 3);
        assert!(!agent.complete());
        assert_eq!(agent.cost(), 0.0);
    }

    #[test]
    fn builder_collapses_duplicate_goals() {
        let agent = GoalAgent::builder().goals([1u32, 1, 2]).build().unwrap();
        assert_eq!(agent.goals.len(), 2);
    }

    #[test]
    fn builder_rejects_empty_goals() {
        let result = GoalAgent::<u32>::builder().build();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("goals"));
    }

    #[test]
    fn builder_rejects_bad_bid_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = GoalAgent::builder().goals([1u32]).bid_scale(scale).build();
            assert!(result.is_err(), "scale {scale} should be rejected");
        }
    }

    #[test]
    fn builder_rejects_zero_probe_step() {
        let result = GoalAgent::builder().goals([1u32]).probe_step(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_rejects_zero_max_probes() {
        let result = GoalAgent::builder().goals([1u32]).max_probes(0).build();
        assert!(result.is_err());
    }

    // ── Behavior tests ───────────────────────────────────────

    #[test]
    fn bids_on_every_goal_in_a_fresh_market() {
        let mut agent = GoalAgent::builder().goals([1u32, 2, 3]).build().unwrap();
        let mut book: OrderBook<u32> = OrderBook::new(None);
        let mut bids = Vec::new();
        let mut market = BidMarket::new(ME, &mut book, &mut bids);

        agent.bid_phase(TickId(0), &mut market, 7);
        // Fresh market: everything is available at now + 1.
        assert_eq!(bids.len(), 3);
        assert!(bids.iter().all(|p| p.time == TickId(1)));
    }

    #[test]
    fn same_seed_same_bids() {
        let run = |seed: u64| -> Vec<(u32, TickId, Value)> {
            let mut agent = GoalAgent::builder().goals([1u32, 2]).build().unwrap();
            let mut book: OrderBook<u32> = OrderBook::new(None);
            let mut bids = Vec::new();
            let mut market = BidMarket::new(ME, &mut book, &mut bids);
            agent.bid_phase(TickId(0), &mut market, seed);
            bids.iter()
                .map(|p| {
                    let entry = book.snapshot(&p.location, p.time);
                    let listing = entry.listing().unwrap();
                    (p.location, p.time, listing.highest_bid)
                })
                .collect()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43), "different seeds should move the bids");
    }

    #[test]
    fn gives_up_when_goals_never_available() {
        let mut book: OrderBook<u32> = OrderBook::new(Some(0));
        // The only reachable tick is held by someone else.
        book.entry(&1, TickId(1)).unwrap().current = PrivateStatus::InUse { owner: AgentId(9) };

        let mut agent = GoalAgent::builder().goals([1u32]).build().unwrap();
        let mut bids = Vec::new();
        let mut market = BidMarket::new(ME, &mut book, &mut bids);
        agent.bid_phase(TickId(0), &mut market, 3);
        assert!(bids.is_empty(), "no probe succeeds, so no bid is placed");
    }

    #[test]
    fn flushes_partial_holdings_in_ask_phase() {
        let mut agent = GoalAgent::builder().goals([1u32, 2]).build().unwrap();
        agent.on_bought(&1, TickId(4), 0.6);
        assert_eq!(agent.cost(), 0.6);

        let mut book: OrderBook<u32> = OrderBook::new(None);
        book.entry(&1, TickId(4)).unwrap().current = PrivateStatus::InUse { owner: ME };

        let mut asks = Vec::new();
        let mut market = AskMarket::new(ME, &mut book, &mut asks);
        agent.ask_phase(TickId(0), &mut market, 11);
        assert_eq!(asks.len(), 1);
        assert_eq!(asks[0].min_value, 0.0);
        assert!(agent.owned.is_empty());

        // Revenue flows back through on_sold.
        agent.on_sold(&1, TickId(4), 0.4);
        assert!((agent.cost() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn complete_agent_keeps_holdings_and_stops() {
        let mut agent = GoalAgent::builder().goals([1u32, 2]).build().unwrap();
        agent.on_bought(&1, TickId(4), 0.5);
        agent.on_bought(&2, TickId(4), 0.5);
        assert!(agent.complete());
        assert!(agent.stop(TickId(3), 0));

        let mut book: OrderBook<u32> = OrderBook::new(None);
        let mut asks = Vec::new();
        let mut market = AskMarket::new(ME, &mut book, &mut asks);
        agent.ask_phase(TickId(3), &mut market, 0);
        assert!(asks.is_empty(), "a complete agent sells nothing");
    }
}
