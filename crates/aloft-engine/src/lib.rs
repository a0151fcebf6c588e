//! Round driver and agent registry for the Aloft auction engine.
//!
//! The single entry point is [`simulate`]: configure a run with
//! [`SimulationOpts`] and the engine drives admissions, the bid/trade/ask
//! pipeline, stop evaluation, and the sliding window until the
//! [`StopCriterion`] is met.
//!
//! ```
//! use aloft_core::TickId;
//! use aloft_engine::{simulate, SimulationOpts, StopCriterion};
//!
//! // An agentless run bounded by time: five ticks, then done.
//! simulate(SimulationOpts::<u32> {
//!     stop_criterion: StopCriterion::TimeThreshold { t: TickId(4) },
//!     seed: Some(42),
//!     ..SimulationOpts::default()
//! });
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod opts;
pub mod registry;
pub mod simulate;

pub use opts::{Factory, SimulationOpts, StatusCallback, StopCriterion, TradeCallback};
pub use registry::{AgentRegistry, AgentStatus};
pub use simulate::simulate;
