//! Simulation options: agent source, window bound, stop rule, callbacks.

use std::fmt;

use aloft_core::{Region, TickId, TradeInfo};
use aloft_market::{Agent, OrderBook};

use crate::registry::AgentRegistry;

/// Per-tick agent source.
///
/// Invoked once at the top of every tick with the current tick and a
/// seed drawn from the engine PRNG; every returned agent is admitted to
/// the registry in order. Returning an empty vector admits nobody.
pub type Factory<R> = Box<dyn FnMut(TickId, u64) -> Vec<Box<dyn Agent<R>>>>;

/// Sink for cleared trades.
pub type TradeCallback<R> = Box<dyn FnMut(TradeInfo<R>)>;

/// Pre-tick observer over the registry and the order-book.
///
/// Receives the current tick, the registry (read-only), and the book
/// (read-only accessors: `snapshot`, `public_status`, `now`, `depth`).
pub type StatusCallback<R> = Box<dyn FnMut(TickId, &AgentRegistry<R>, &OrderBook<R>)>;

/// When the simulation's main loop terminates.
///
/// Evaluated at the end of every tick, after the window has advanced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StopCriterion {
    /// Terminate when the active agent count reaches zero.
    #[default]
    NoAgents,
    /// Terminate once the current tick exceeds `t`.
    TimeThreshold {
        /// The last tick that still runs.
        t: TickId,
    },
}

/// Complete configuration for one [`simulate`](crate::simulate) run.
///
/// Plain options struct with a [`Default`]: construct with struct update
/// syntax and fill in what the run needs.
///
/// ```
/// use aloft_engine::{SimulationOpts, StopCriterion};
/// use aloft_core::TickId;
///
/// let opts = SimulationOpts::<u32> {
///     time_window: Some(3),
///     stop_criterion: StopCriterion::TimeThreshold { t: TickId(100) },
///     seed: Some(42),
///     ..SimulationOpts::default()
/// };
/// assert!(opts.factory.is_none());
/// ```
pub struct SimulationOpts<R: Region> {
    /// Agent source; `None` runs the loop without ever admitting agents.
    pub factory: Option<Factory<R>>,
    /// Look-ahead bound on the order-book; `None` = unbounded.
    pub time_window: Option<u64>,
    /// Loop termination rule.
    pub stop_criterion: StopCriterion,
    /// Per-trade event sink.
    pub trade_callback: Option<TradeCallback<R>>,
    /// Pre-tick observer.
    pub status_callback: Option<StatusCallback<R>>,
    /// PRNG seed; `None` draws a nondeterministic seed from OS entropy.
    pub seed: Option<u64>,
}

impl<R: Region> Default for SimulationOpts<R> {
    fn default() -> Self {
        Self {
            factory: None,
            time_window: None,
            stop_criterion: StopCriterion::default(),
            trade_callback: None,
            status_callback: None,
            seed: None,
        }
    }
}

impl<R: Region> fmt::Debug for SimulationOpts<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationOpts")
            .field("factory", &self.factory.is_some())
            .field("time_window", &self.time_window)
            .field("stop_criterion", &self.stop_criterion)
            .field("trade_callback", &self.trade_callback.is_some())
            .field("status_callback", &self.status_callback.is_some())
            .field("seed", &self.seed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stops_on_no_agents() {
        let opts = SimulationOpts::<u32>::default();
        assert_eq!(opts.stop_criterion, StopCriterion::NoAgents);
        assert!(opts.factory.is_none());
        assert!(opts.time_window.is_none());
        assert!(opts.seed.is_none());
    }

    #[test]
    fn debug_impl_reports_presence_not_contents() {
        let opts = SimulationOpts::<u32> {
            factory: Some(Box::new(|_, _| Vec::new())),
            ..SimulationOpts::default()
        };
        let debug = format!("{opts:?}");
        assert!(debug.contains("factory: true"));
        assert!(debug.contains("trade_callback: false"));
    }
}
