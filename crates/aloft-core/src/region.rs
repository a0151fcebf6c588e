//! The region capability required of user-supplied spatial types.

use std::hash::Hash;

/// Capability contract for user-supplied region types.
///
/// The engine treats regions as opaque values: it stores them in permit
/// keys, copies them into trade events, and compares and hashes them when
/// resolving book lookups. It never introspects geometry, so any cheap
/// value type qualifies — grid coordinates, cell indices, interned names.
///
/// The contract is `Clone + Eq + Hash` plus `'static`: regions are
/// owned values (stored in permit keys and trade events, copied into
/// boxed agents), so they cannot carry borrowed data. A blanket impl
/// covers every type that satisfies the contract, so users never
/// implement this trait by hand.
///
/// # Examples
///
/// ```
/// use aloft_core::Region;
///
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Cell {
///     x: u32,
///     y: u32,
/// }
///
/// fn assert_region<R: Region>() {}
/// assert_region::<Cell>();
/// assert_region::<u64>();
/// ```
pub trait Region: Clone + Eq + Hash + 'static {}

impl<T: Clone + Eq + Hash + 'static> Region for T {}
