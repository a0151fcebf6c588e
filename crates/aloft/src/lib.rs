//! Aloft: a discrete-time auction engine for urban-airspace tradable
//! permits.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Aloft sub-crates. For most users, adding `aloft` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use aloft::prelude::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! // An agent that wants one specific permit, then is done.
//! struct Sightseer {
//!     done: bool,
//! }
//!
//! impl Agent<u32> for Sightseer {
//!     fn bid_phase(&mut self, now: TickId, market: &mut BidMarket<'_, u32>, _seed: u64) {
//!         if !self.done {
//!             market.bid(&5, now.offset(1), 1.0);
//!         }
//!     }
//!
//!     fn on_bought(&mut self, _location: &u32, _time: TickId, _value: Value) {
//!         self.done = true;
//!     }
//!
//!     fn stop(&mut self, _now: TickId, _seed: u64) -> bool {
//!         self.done
//!     }
//! }
//!
//! let trades = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&trades);
//! simulate(SimulationOpts::<u32> {
//!     factory: Some(Box::new(|now, _seed| {
//!         if now == TickId(0) {
//!             vec![Box::new(Sightseer { done: false }) as Box<dyn Agent<u32>>]
//!         } else {
//!             Vec::new()
//!         }
//!     })),
//!     trade_callback: Some(Box::new(move |trade| sink.borrow_mut().push(trade))),
//!     seed: Some(42),
//!     ..SimulationOpts::default()
//! });
//!
//! let trades = trades.borrow();
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].to, AgentId(0));
//! assert_eq!(trades[0].from, None); // primary-market sale
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `aloft-core` | IDs, permit keys, status models, trade records |
//! | [`market`] | `aloft-market` | Order-book, market views, the `Agent` trait |
//! | [`engine`] | `aloft-engine` | `simulate`, options, the agent registry |
//! | [`agents`] | `aloft-agents` | Reference agent implementations |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`aloft-core`).
///
/// Permit keys, the private/public status models, trade records, and the
/// [`types::Region`] capability trait.
pub use aloft_core as types;

/// Order-book and market views (`aloft-market`).
///
/// The [`market::Agent`] trait is the main extension point for
/// user-defined auction behavior.
pub use aloft_market as market;

/// Round driver and registry (`aloft-engine`).
///
/// [`engine::simulate`] runs a configured auction to completion.
pub use aloft_engine as engine;

/// Reference agents (`aloft-agents`).
///
/// Includes [`agents::GoalAgent`] and [`agents::MissionAgent`].
pub use aloft_agents as agents;

/// Common imports for typical Aloft usage.
///
/// ```rust
/// use aloft::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use aloft_core::{
        AgentId, History, Listing, Permit, PermitEntry, PrivateStatus, PublicStatus, Region,
        TickId, TradeInfo, TradeValue, Value,
    };

    // Market layer
    pub use aloft_market::{Agent, AskMarket, BidMarket, OrderBook};

    // Engine
    pub use aloft_engine::{
        simulate, AgentRegistry, AgentStatus, SimulationOpts, StopCriterion,
    };

    // Reference agents
    pub use aloft_agents::{GoalAgent, MissionAgent};
}
