//! Shared agent fixtures for Aloft engine tests.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod fixtures;

pub use fixtures::{event_log, Event, EventLog, ScriptAgent};
