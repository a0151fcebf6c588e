//! Reference agent implementations for the Aloft auction engine.
//!
//! Two ready-made behaviors exercising the full agent surface:
//!
//! - [`GoalAgent`] — acquires a set of goal regions at a common future
//!   tick, re-lists whatever it holds while incomplete, and stops once
//!   every goal is held.
//! - [`MissionAgent`] — flies a fixed route of regions on consecutive
//!   ticks, bidding for the whole route at once.
//!
//! Both are constructed through validating builders and derive all of
//! their randomness from the per-phase seed, so runs stay reproducible.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod goal;
pub mod mission;

pub use goal::{GoalAgent, GoalAgentBuilder};
pub use mission::{MissionAgent, MissionAgentBuilder};
