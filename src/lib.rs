//! Implements an arena-allocated binary search tree map and interfaces to work with it.
//!
//! # Overview
//! The central type of the crate is [`OrderedMap`], an ordered key-value container backed by a binary search tree. Like the other tree types built on the ["arena-allocated trees"][arena tree blog post] technique, it keeps its nodes in a backing storage, typically a [`Vec`] (or an [`ArrayVec`] if a fixed capacity is desired), and instead of using pointers to link nodes together, indices into the storage are used instead. This gives every node a parent link for free: since it is only an index, it cannot form an ownership cycle, and dropping the storage drops every node exactly once.
//!
//! The map supports:
//! - insertion, overwriting the value if the key is already present;
//! - lookup, producing a [`Cursor`] which is either positioned at the node or past the end;
//! - in-order iteration which walks the parent links instead of keeping a stack;
//! - deep copying through [`Clone`] and explicit moves through [`OrderedMap::take`];
//! - an on-demand [`balance`] operation which rebuilds the tree into the minimal possible height.
//!
//! Insertion never rebalances the tree, so inserting keys in ascending or descending order produces a tree of linear height. Call [`balance`] once the contents settle down.
//!
//! # Storage
//! The trait used for defining the "arena" type used is [`Storage`]. It is implemented for [`Vec`] and, with the `arrayvec_storage` feature, for [`ArrayVec`].
//!
//! # Feature flags
//! - `arrayvec_storage` (**enabled by default**) — adds a `Storage` trait implementation for [`ArrayVec`], allowing maps which never allocate.
//! - `doc_cfg` — marks feature-gated items in the documentation. **Requires a nightly compiler.**
//!
//! # Logging
//! Operations emit [`tracing`] events: per-node events at the `TRACE` level, whole-tree operations at `DEBUG`. No subscriber is installed by the crate.
//!
//! # Public dependencies
//! - `arrayvec` (**required**) — `^0.5`
//!
//! [`OrderedMap`]: ordered_map/struct.OrderedMap.html " "
//! [`OrderedMap::take`]: ordered_map/struct.OrderedMap.html#method.take " "
//! [`balance`]: ordered_map/struct.OrderedMap.html#method.balance " "
//! [`Cursor`]: ordered_map/struct.Cursor.html " "
//! [`Storage`]: storage/trait.Storage.html " "
//! [`Clone`]: https://doc.rust-lang.org/std/clone/trait.Clone.html " "
//! [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
//! [`ArrayVec`]: https://docs.rs/arrayvec/*/arrayvec/struct.ArrayVec.html " "
//! [`tracing`]: https://docs.rs/tracing " "
//! [arena tree blog post]: https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6 " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::copy_iterator,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::large_stack_arrays,
    clippy::let_unit_value,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

pub mod storage;
#[doc(no_inline)]
pub use storage::{Storage, DefaultStorage};

pub mod ordered_map;
pub use ordered_map::{OrderedMap, Rebalance};

/// A prelude for using the crate, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::storage::{
        Storage as MapStorage,
        DefaultStorage as DefaultMapStorage,
    };
    #[doc(no_inline)]
    pub use crate::ordered_map::{
        OrderedMap,
        Cursor as OrderedMapCursor,
        CursorMut as OrderedMapCursorMut,
        Rebalance,
    };
    #[doc(no_inline)]
    pub use crate::StorageError;
}

use std::collections::TryReserveError;
use thiserror::Error;

/// The error type returned when a map's storage cannot make room for more nodes.
///
/// Operations which return this error leave the map exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The allocator could not provide memory for the requested number of nodes.
    #[error("failed to allocate room for {requested} more node(s)")]
    AllocationFailed {
        /// The number of additional nodes which room was requested for.
        requested: usize,
        /// The error reported by the allocator.
        source: TryReserveError,
    },
    /// The storage has a fixed capacity and it is exhausted.
    #[error("the storage is full, its fixed capacity is {capacity} node(s)")]
    CapacityExceeded {
        /// The fixed capacity of the storage.
        capacity: usize,
    },
}
