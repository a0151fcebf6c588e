//! Permit keys: a region paired with the tick it covers.

use crate::id::TickId;
use crate::region::Region;

/// The exclusive right to occupy `location` at `time`.
///
/// Permit keys are value types: equality is componentwise and the hash
/// combines both component hashes, so two keys collide only when both the
/// region and the tick match. The order-book keys its per-tick maps with
/// `Permit<R>`.
///
/// # Examples
///
/// ```
/// use aloft_core::{Permit, TickId};
///
/// let a = Permit::new(5u32, TickId(1));
/// let b = Permit::new(5u32, TickId(2));
/// assert_eq!(a, Permit::new(5u32, TickId(1)));
/// assert_ne!(a, b);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Permit<R: Region> {
    /// The spatial region this permit covers.
    pub location: R,
    /// The tick at which occupancy is granted.
    pub time: TickId,
}

impl<R: Region> Permit<R> {
    /// Build a permit key from its components.
    pub fn new(location: R, time: TickId) -> Self {
        Self { location, time }
    }
}
