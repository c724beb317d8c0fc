use thiserror::Error;

/// A specialized result type for fallible tree queries.
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for map and set queries that require a key or rank to be
/// present.
///
/// Every variant corresponds to one caller-visible precondition violation;
/// no operation fails transiently or leaves the collection half-mutated.
///
/// # Examples
///
/// ```
/// use osrb_tree::{Error, OSRBTreeSet};
///
/// let set = OSRBTreeSet::from([1, 2, 3]);
/// assert_eq!(set.get(&4), Err(Error::KeyNotFound));
/// assert_eq!(set.select(3), Err(Error::RankOutOfRange { rank: 3, len: 3 }));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A lookup or strict removal named a key that is not in the collection.
    #[error("key not found")]
    KeyNotFound,

    /// A minimum or maximum query was made against an empty collection.
    #[error("tree is empty")]
    EmptyTree,

    /// No key satisfies a floor, ceiling, predecessor, or successor query.
    #[error("no key satisfies the query")]
    NoSuchKey,

    /// A select query used a rank outside `[0, len)`.
    #[error("rank {rank} is out of range for a tree of {len} keys")]
    RankOutOfRange {
        /// The requested rank.
        rank: usize,
        /// The number of keys in the collection at the time of the query.
        len: usize,
    },

    /// A counting range query was made with `lo > hi`.
    #[error("range lower endpoint is greater than upper endpoint")]
    InvalidRange,
}
