//! Order-statistic red-black tree collections for Rust.
//!
//! This crate provides [`OSRBTreeMap`] and [`OSRBTreeSet`], ordered
//! collections in the spirit of the standard library's `BTreeMap` and
//! `BTreeSet` with additional O(log n) order-statistic operations:
//!
//! - [`select`](OSRBTreeMap::select) - Get the element at a given sorted position
//! - [`rank`](OSRBTreeMap::rank) - Count the keys smaller than a query key
//! - [`floor`](OSRBTreeMap::floor) / [`ceiling`](OSRBTreeMap::ceiling) /
//!   [`predecessor`](OSRBTreeMap::predecessor) / [`successor`](OSRBTreeMap::successor) -
//!   Ordered neighbor queries for keys that need not be present
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first element
//!
//! Lookups that require a key or rank to be present report their failure as a
//! typed [`Error`] instead of an optional value, so "absent" can never be
//! mistaken for "present with an empty value".
//!
//! # Example
//!
//! ```
//! use osrb_tree::{OSRBTreeMap, Rank};
//!
//! let mut scores = OSRBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! // Familiar ordered-map operations.
//! assert_eq!(scores.get(&"Bob"), Ok(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations (O(log n)).
//! let (name, score) = scores.select(1)?;
//! assert_eq!((*name, *score), ("Bob", 85)); // Keys are sorted alphabetically
//! assert_eq!(scores.rank(&"Carol"), 2); // Carol is third alphabetically
//!
//! // Ordered neighbor queries; the query key need not be present.
//! let (name, _) = scores.floor(&"Bud")?;
//! assert_eq!(*name, "Bob");
//!
//! // Index by rank.
//! assert_eq!(scores[Rank(0)], 100); // Alice's score (first alphabetically)
//! # Ok::<(), osrb_tree::Error>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) rank operations** - Efficient order-statistic queries via subtree size augmentation
//! - **Typed query failures** - Distinct [`Error`] variants per failure condition
//! - **Stable storage** - Nodes live in an index arena; rebalancing rewires links only
//!
//! # Implementation
//!
//! The collections are implemented as left-leaning red-black binary search
//! trees with subtree size augmentation. Every node carries the number of
//! entries in its subtree, enabling O(log n) rank-based access without full
//! traversal. Nodes are stored in a slot arena indexed by compact handles
//! rather than boxed, so rotations move no data and dropping the tree frees
//! one allocation.
//!
//! A shared collection must not be mutated concurrently; the borrow checker
//! enforces this for the borrowing iterators, which hold the collection for
//! their whole lifetime.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: We have to allow unsafe code for the mutable iterators; everything else is safe.
// #![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod osrbtree_map;
pub mod osrbtree_set;

pub use error::{Error, Result};
pub use order_statistic::Rank;
pub use osrbtree_map::OSRBTreeMap;
pub use osrbtree_set::OSRBTreeSet;
