//! Private and public permit status models.
//!
//! [`PrivateStatus`] is the engine-side state machine for one permit.
//! [`PublicStatus`] is the projection an agent sees through its market
//! view: foreign bids are hidden, and an owner's own listing reads as
//! [`PublicStatus::Unavailable`] so the owner cannot bid it back.

use smallvec::SmallVec;

use crate::id::{AgentId, Value};
use crate::trade::TradeValue;

/// Ordered record of trades cleared on one permit.
///
/// Inline up to two records; most permits trade at most once or twice
/// before their tick passes.
pub type History = SmallVec<[TradeValue; 2]>;

/// The sale state of a listed permit.
///
/// `min_value` is an exclusive floor: only strictly greater bids may win.
/// While `highest_bidder` is `None` the listing has received no bid this
/// round; once set, `highest_bid` is strictly above both the floor and
/// every previously accepted bid (bid monotonicity).
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    /// Current owner; `None` until the permit is first sold (primary market).
    pub owner: Option<AgentId>,
    /// Exclusive price floor.
    pub min_value: Value,
    /// Leading bidder this round, if any.
    pub highest_bidder: Option<AgentId>,
    /// Leading bid this round; meaningful only when `highest_bidder` is set.
    pub highest_bid: Value,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            owner: None,
            min_value: 0.0,
            highest_bidder: None,
            highest_bid: 0.0,
        }
    }
}

/// Engine-private status of one permit.
#[derive(Clone, Debug, PartialEq)]
pub enum PrivateStatus {
    /// Listed for sale and accepting bids this round.
    OnSale(Listing),
    /// Held by `owner`; not tradable until re-listed.
    InUse {
        /// The holding agent.
        owner: AgentId,
    },
    /// Outside the active time window. Never stored in the book; produced
    /// only by read accessors when a lookup falls out of range.
    OutOfLimits,
}

impl Default for PrivateStatus {
    fn default() -> Self {
        Self::OnSale(Listing::default())
    }
}

/// Status plus trade history for one permit key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PermitEntry {
    /// The current sale state.
    pub current: PrivateStatus,
    /// Trades cleared on this key, in clearing order.
    pub history: History,
}

impl PermitEntry {
    /// An entry representing an out-of-window lookup.
    pub fn out_of_limits() -> Self {
        Self {
            current: PrivateStatus::OutOfLimits,
            history: History::new(),
        }
    }

    /// The current listing, if this permit is on sale.
    pub fn listing(&self) -> Option<&Listing> {
        match &self.current {
            PrivateStatus::OnSale(listing) => Some(listing),
            _ => None,
        }
    }

    /// Project this entry into the view visible to `observer`.
    ///
    /// Pure with respect to the entry and the observer identity. The
    /// owner of an `OnSale` listing sees `Unavailable` — having listed
    /// the permit, it is no longer usable by (nor biddable for) them.
    pub fn public_view(&self, observer: AgentId) -> PublicStatus<'_> {
        match &self.current {
            PrivateStatus::OutOfLimits => PublicStatus::Unavailable,
            PrivateStatus::InUse { owner } => {
                if *owner == observer {
                    PublicStatus::Owned
                } else {
                    PublicStatus::Unavailable
                }
            }
            PrivateStatus::OnSale(listing) => {
                if listing.owner == Some(observer) {
                    PublicStatus::Unavailable
                } else {
                    PublicStatus::Available {
                        min_value: listing.min_value,
                        trades: &self.history,
                    }
                }
            }
        }
    }
}

/// What one agent sees when it observes a permit.
///
/// Borrowed from the order-book; the view cannot outlive the market
/// access that produced it, so agents cannot retain engine-owned state
/// across callback returns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PublicStatus<'a> {
    /// Foreign in-use permit, the observer's own listing, or an
    /// out-of-window key.
    Unavailable,
    /// Listed by someone else (or the primary market); biddable.
    Available {
        /// The listing's exclusive floor.
        min_value: Value,
        /// Trades previously cleared on this key.
        trades: &'a [TradeValue],
    },
    /// Held by the observer.
    Owned,
}

impl PublicStatus<'_> {
    /// Whether the observer may bid on this permit.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    /// Whether the observer currently holds this permit.
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned)
    }
}
