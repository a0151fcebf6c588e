//! Core types for the Aloft permit auction engine.
//!
//! This is the leaf crate with zero internal Aloft dependencies. It defines
//! the fundamental vocabulary used throughout the workspace: agent and tick
//! identifiers, the [`Region`] capability, permit keys, and the private and
//! public permit status models.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod permit;
pub mod region;
pub mod status;
pub mod trade;

// Re-export core types at crate root for convenience.
pub use id::{AgentId, TickId, Value};
pub use permit::Permit;
pub use region::Region;
pub use status::{History, Listing, PermitEntry, PrivateStatus, PublicStatus};
pub use trade::{TradeInfo, TradeValue};
