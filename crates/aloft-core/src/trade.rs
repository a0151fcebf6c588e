//! Trade records: per-permit clearing history and emitted trade events.

use crate::id::{AgentId, TickId, Value};
use crate::region::Region;

/// One cleared trade on a permit, as recorded in its history.
///
/// `min_value` is the exclusive floor the listing carried; `highest_bid`
/// is the winning (and paid) bid under first-price rules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TradeValue {
    /// The listing's exclusive price floor at clearing time.
    pub min_value: Value,
    /// The winning bid; the price actually paid.
    pub highest_bid: Value,
}

/// A trade event delivered to the engine's trade callback sink.
///
/// `from == None` encodes a primary-market sale: the permit had never been
/// owned, so there is no seller to notify.
#[derive(Clone, Debug, PartialEq)]
pub struct TradeInfo<R: Region> {
    /// The tick at which the trade cleared.
    pub transaction_time: TickId,
    /// The seller, or `None` for a primary-market sale.
    pub from: Option<AgentId>,
    /// The winning buyer.
    pub to: AgentId,
    /// The traded permit's region.
    pub location: R,
    /// The traded permit's tick.
    pub time: TickId,
    /// The price paid (the winning bid).
    pub value: Value,
}
