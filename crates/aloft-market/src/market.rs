//! Borrowed market views handed to agents during the bid and ask phases.

use aloft_core::{
    AgentId, Listing, Permit, PrivateStatus, PublicStatus, Region, TickId, Value,
};

use crate::book::OrderBook;

/// A queued re-listing, applied after every agent has run its ask phase.
///
/// Deferred application keeps an ask invisible to agents later in the
/// same phase; bids against it become possible only next tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AskOrder<R: Region> {
    /// The permit being re-listed.
    pub location: R,
    /// The permit's tick.
    pub time: TickId,
    /// The listing owner (the asking agent).
    pub agent: AgentId,
    /// The exclusive price floor for the new listing.
    pub min_value: Value,
}

/// The bid-phase view of the market for one agent.
///
/// Holds exclusive access to the order-book and the per-tick bid queue
/// for the duration of a single `bid_phase` call.
pub struct BidMarket<'a, R: Region> {
    agent: AgentId,
    book: &'a mut OrderBook<R>,
    bids: &'a mut Vec<Permit<R>>,
}

impl<'a, R: Region> BidMarket<'a, R> {
    /// Bind a bid-phase view for `agent`.
    pub fn new(agent: AgentId, book: &'a mut OrderBook<R>, bids: &'a mut Vec<Permit<R>>) -> Self {
        Self { agent, book, bids }
    }

    /// The observing agent's identity.
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    /// The current tick.
    pub fn now(&self) -> TickId {
        self.book.now()
    }

    /// Observe the permit at `(location, time)` from this agent's side.
    pub fn status(&self, location: &R, time: TickId) -> PublicStatus<'_> {
        self.book.public_status(self.agent, location, time)
    }

    /// Submit a sealed bid of `amount` for `(location, time)`.
    ///
    /// Returns `true` iff the key was a listing this agent may legally bid
    /// on — regardless of whether the bid took the lead. A `true` with no
    /// effect means the bid did not strictly exceed both the floor and the
    /// current leader. Returns `false` for out-of-window keys, in-use
    /// permits, and the agent's own listing.
    ///
    /// The current tick itself is biddable: only `time` strictly before
    /// the book's tick (or beyond the look-ahead bound) is out of window.
    pub fn bid(&mut self, location: &R, time: TickId, amount: Value) -> bool {
        let Some(entry) = self.book.entry(location, time) else {
            return false;
        };
        match &mut entry.current {
            PrivateStatus::OutOfLimits | PrivateStatus::InUse { .. } => false,
            PrivateStatus::OnSale(listing) => {
                if listing.owner == Some(self.agent) {
                    return false;
                }
                if amount > listing.min_value && amount > listing.highest_bid {
                    if listing.highest_bidder.is_none() {
                        self.bids.push(Permit::new(location.clone(), time));
                    }
                    listing.highest_bidder = Some(self.agent);
                    listing.highest_bid = amount;
                }
                true
            }
        }
    }
}

/// The ask-phase view of the market for one agent.
///
/// Asks are queued, not applied: the round driver re-lists every queued
/// permit only after the phase completes for all agents.
pub struct AskMarket<'a, R: Region> {
    agent: AgentId,
    book: &'a mut OrderBook<R>,
    asks: &'a mut Vec<AskOrder<R>>,
}

impl<'a, R: Region> AskMarket<'a, R> {
    /// Bind an ask-phase view for `agent`.
    pub fn new(agent: AgentId, book: &'a mut OrderBook<R>, asks: &'a mut Vec<AskOrder<R>>) -> Self {
        Self { agent, book, asks }
    }

    /// The observing agent's identity.
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    /// The current tick.
    pub fn now(&self) -> TickId {
        self.book.now()
    }

    /// Observe the permit at `(location, time)` from this agent's side.
    pub fn status(&self, location: &R, time: TickId) -> PublicStatus<'_> {
        self.book.public_status(self.agent, location, time)
    }

    /// List the permit at `(location, time)` for sale with floor
    /// `min_value`.
    ///
    /// Accepted (`true`) only when this agent owns the permit, whether
    /// currently in use or already listed (re-pricing). The listing takes
    /// effect after the ask phase completes.
    pub fn ask(&mut self, location: &R, time: TickId, min_value: Value) -> bool {
        let Some(entry) = self.book.entry(location, time) else {
            return false;
        };
        let owns = match &entry.current {
            PrivateStatus::OutOfLimits => return false,
            PrivateStatus::OnSale(listing) => listing.owner == Some(self.agent),
            PrivateStatus::InUse { owner } => *owner == self.agent,
        };
        if !owns {
            return false;
        }
        self.asks.push(AskOrder {
            location: location.clone(),
            time,
            agent: self.agent,
            min_value,
        });
        true
    }
}

/// Apply queued re-listings to the book.
///
/// Each order replaces the permit's current status with a fresh listing
/// owned by the asking agent; trade history is preserved. Orders whose
/// key has left the window in the meantime are dropped silently.
pub fn apply_asks<R: Region>(book: &mut OrderBook<R>, asks: Vec<AskOrder<R>>) {
    for order in asks {
        let Some(entry) = book.entry(&order.location, order.time) else {
            continue;
        };
        entry.current = PrivateStatus::OnSale(Listing {
            owner: Some(order.agent),
            min_value: order.min_value,
            highest_bidder: None,
            highest_bid: 0.0,
        });
    }
}
