//! The order-book: a sliding window of per-tick permit maps.

use std::collections::VecDeque;

use indexmap::IndexMap;

use aloft_core::{AgentId, Permit, PermitEntry, PublicStatus, Region, TickId};

/// Per-permit sale state over a sliding time window.
///
/// `books[0]` holds the permits for the current tick `t0`; `books[k]`
/// holds `t0 + k`. Maps are materialized lazily on the first write that
/// touches a future tick and dropped from the front when the window
/// advances, so past permits are irrecoverable by construction.
///
/// When a look-ahead window is configured, writes beyond
/// `t0 + 1 + time_window` are refused and the deque never holds more than
/// `time_window + 2` maps.
///
/// # Ownership model
///
/// The book is owned exclusively by the round driver. Agents reach it
/// only through the borrowed market views, and the read accessors return
/// either owned snapshots or borrows that cannot outlive the access.
#[derive(Debug)]
pub struct OrderBook<R: Region> {
    t0: TickId,
    books: VecDeque<IndexMap<Permit<R>, PermitEntry>>,
    time_window: Option<u64>,
}

impl<R: Region> OrderBook<R> {
    /// Create an empty book at tick 0.
    ///
    /// `time_window` bounds look-ahead: `Some(w)` refuses access beyond
    /// `t0 + 1 + w`; `None` leaves growth bounded only by the furthest
    /// future tick any agent touches.
    pub fn new(time_window: Option<u64>) -> Self {
        Self {
            t0: TickId(0),
            books: VecDeque::new(),
            time_window,
        }
    }

    /// The current tick `t0`.
    pub fn now(&self) -> TickId {
        self.t0
    }

    /// The configured look-ahead bound, if any.
    pub fn time_window(&self) -> Option<u64> {
        self.time_window
    }

    /// Number of per-tick maps currently materialized.
    pub fn depth(&self) -> usize {
        self.books.len()
    }

    /// Whether `time` falls inside the active window.
    ///
    /// The current tick is inside: agents may observe (but the round
    /// driver's phases decide what they may do) at `t0` itself.
    pub fn in_window(&self, time: TickId) -> bool {
        if time < self.t0 {
            return false;
        }
        match self.time_window {
            Some(w) => time.0 <= self.t0.0 + 1 + w,
            None => true,
        }
    }

    /// Mutable access to the entry for `(location, time)`.
    ///
    /// Returns `None` when the key lies outside the active window; every
    /// operation on an out-of-window key silently fails through that
    /// `None`. In-window misses insert a fresh primary-market listing,
    /// extending the deque as needed.
    pub fn entry(&mut self, location: &R, time: TickId) -> Option<&mut PermitEntry> {
        if !self.in_window(time) {
            return None;
        }
        let offset = (time.0 - self.t0.0) as usize;
        while self.books.len() <= offset {
            self.books.push_back(IndexMap::new());
        }
        Some(
            self.books[offset]
                .entry(Permit::new(location.clone(), time))
                .or_default(),
        )
    }

    /// Project the entry for `(location, time)` into `observer`'s view.
    ///
    /// Read-only: an in-window miss projects the default primary-market
    /// listing without materializing it. Out-of-window keys read as
    /// [`PublicStatus::Unavailable`].
    pub fn public_status(&self, observer: AgentId, location: &R, time: TickId) -> PublicStatus<'_> {
        match self.lookup(location, time) {
            Lookup::OutOfLimits => PublicStatus::Unavailable,
            Lookup::Vacant => PublicStatus::Available {
                min_value: 0.0,
                trades: &[],
            },
            Lookup::Entry(entry) => entry.public_view(observer),
        }
    }

    /// An owned copy of the entry for `(location, time)`.
    ///
    /// Read-only companion to [`entry`](Self::entry) for status
    /// inspection: out-of-window keys yield an
    /// [`out_of_limits`](PermitEntry::out_of_limits) entry and in-window
    /// misses yield the default primary-market listing.
    pub fn snapshot(&self, location: &R, time: TickId) -> PermitEntry {
        match self.lookup(location, time) {
            Lookup::OutOfLimits => PermitEntry::out_of_limits(),
            Lookup::Vacant => PermitEntry::default(),
            Lookup::Entry(entry) => entry.clone(),
        }
    }

    /// Advance the window by one tick.
    ///
    /// Drops the map for the tick that just passed (if materialized) and
    /// increments `t0` unconditionally.
    pub fn advance(&mut self) {
        self.books.pop_front();
        self.t0 = self.t0.offset(1);
    }

    fn lookup(&self, location: &R, time: TickId) -> Lookup<'_> {
        if !self.in_window(time) {
            return Lookup::OutOfLimits;
        }
        let offset = (time.0 - self.t0.0) as usize;
        let found = self
            .books
            .get(offset)
            .and_then(|map| map.get(&Permit::new(location.clone(), time)));
        match found {
            Some(entry) => Lookup::Entry(entry),
            None => Lookup::Vacant,
        }
    }
}

enum Lookup<'a> {
    OutOfLimits,
    Vacant,
    Entry(&'a PermitEntry),
}

#[cfg(test)]
mod tests {
    use super::*;
    use aloft_core::{Listing, PrivateStatus};

    const ME: AgentId = AgentId(0);

    #[test]
    fn new_book_starts_at_tick_zero() {
        let book: OrderBook<u32> = OrderBook::new(None);
        assert_eq!(book.now(), TickId(0));
        assert_eq!(book.depth(), 0);
    }

    #[test]
    fn entry_materializes_default_listing() {
        let mut book: OrderBook<u32> = OrderBook::new(None);
        let entry = book.entry(&5, TickId(3)).unwrap();
        match &entry.current {
            PrivateStatus::OnSale(listing) => assert_eq!(*listing, Listing::default()),
            other => panic!("expected OnSale, got {other:?}"),
        }
        // Maps for offsets 0..=3 now exist.
        assert_eq!(book.depth(), 4);
    }

    #[test]
    fn entry_rejects_past_ticks() {
        let mut book: OrderBook<u32> = OrderBook::new(None);
        book.advance();
        book.advance();
        assert_eq!(book.now(), TickId(2));
        assert!(book.entry(&5, TickId(1)).is_none());
        // The current tick itself is reachable.
        assert!(book.entry(&5, TickId(2)).is_some());
    }

    #[test]
    fn entry_respects_look_ahead_bound() {
        let mut book: OrderBook<u32> = OrderBook::new(Some(3));
        // t0 = 0: t = 4 = t0 + 1 + 3 is the last reachable tick.
        assert!(book.entry(&5, TickId(4)).is_some());
        assert!(book.entry(&5, TickId(5)).is_none());
        // Bounded depth: at most time_window + 2 maps.
        assert!(book.depth() <= 5);
    }

    #[test]
    fn advance_drops_the_passing_tick() {
        let mut book: OrderBook<u32> = OrderBook::new(None);
        book.entry(&5, TickId(0)).unwrap().current = PrivateStatus::InUse { owner: ME };
        book.entry(&6, TickId(1)).unwrap().current = PrivateStatus::InUse { owner: ME };
        book.advance();

        assert_eq!(book.now(), TickId(1));
        // Tick 0 is gone for good; tick 1 survived the shift.
        let gone = book.snapshot(&5, TickId(0));
        assert_eq!(gone.current, PrivateStatus::OutOfLimits);
        let kept = book.snapshot(&6, TickId(1));
        assert_eq!(kept.current, PrivateStatus::InUse { owner: ME });
    }

    #[test]
    fn advance_increments_even_when_empty() {
        let mut book: OrderBook<u32> = OrderBook::new(None);
        book.advance();
        assert_eq!(book.now(), TickId(1));
        assert_eq!(book.depth(), 0);
    }

    #[test]
    fn public_status_read_does_not_materialize() {
        let book: OrderBook<u32> = OrderBook::new(None);
        let status = book.public_status(ME, &5, TickId(40));
        assert!(status.is_available());
        assert_eq!(book.depth(), 0);
    }

    #[test]
    fn snapshot_of_out_of_window_key_is_out_of_limits() {
        let book: OrderBook<u32> = OrderBook::new(Some(0));
        assert_eq!(
            book.snapshot(&5, TickId(2)).current,
            PrivateStatus::OutOfLimits
        );
    }

    #[test]
    fn repeated_reads_are_structurally_equal() {
        let mut book: OrderBook<u32> = OrderBook::new(None);
        if let Some(entry) = book.entry(&7, TickId(2)) {
            if let PrivateStatus::OnSale(listing) = &mut entry.current {
                listing.owner = Some(AgentId(4));
                listing.min_value = 1.5;
            }
        }
        let first = book.public_status(ME, &7, TickId(2));
        let second = book.public_status(ME, &7, TickId(2));
        assert_eq!(first, second);
    }
}
