//! Utilities for treating the backing storage for trees generically.
//!
//! This module is home for the following items:
//! - [`Storage`], the trait for the arenas that hold the nodes of a map
//! - [`DefaultStorage`], a type definition for the arena used by maps unless a different one is specified
//!
//! Nodes never move once they are added to a storage and are never removed individually: the whole arena is either cleared or popped empty. This is what allows nodes to refer to their parents and children by plain indices.
//!
//! [`Storage`]: trait.Storage.html " "
//! [`DefaultStorage`]: type.DefaultStorage.html " "

mod vec_impl;
#[cfg(feature = "arrayvec_storage")]
mod arrayvec_impl;

use crate::{ordered_map::Node, StorageError};

/// Trait for list-like containers which can be the backing storage for ordered maps.
///
/// Elements are addressed by their position in the list. Implementors must uphold the following invariants, which the map relies on to keep its links valid:
/// - `new` and `with_capacity` ***must*** return empty storages;
/// - `add` appends to the end and returns the position of the new element, never moving the elements which were already there;
/// - `pop` removes the *last* element;
/// - after a successful `try_reserve(n)`, the next `n` calls to `add` must not fail.
pub trait Storage: Sized {
    /// The type of the elements stored.
    type Element;

    /// Creates an empty storage with at least the specified capacity.
    ///
    /// # Panics
    /// Storages with a fixed capacity should panic if the requested capacity exceeds their actual one.
    fn with_capacity(capacity: usize) -> Self;
    /// Appends an element, returning its position.
    ///
    /// # Panics
    /// Required to panic if the storage cannot grow. Use [`try_reserve`] beforehand to avoid that.
    ///
    /// [`try_reserve`]: #tymethod.try_reserve " "
    fn add(&mut self, element: Self::Element) -> usize;
    /// Removes the last element from the storage and returns it, or `None` if it is empty.
    fn pop(&mut self) -> Option<Self::Element>;
    /// Removes all elements.
    fn clear(&mut self);
    /// Returns the contents of the storage as a slice, indexed by position.
    fn as_slice(&self) -> &[Self::Element];
    /// Returns the contents of the storage as a *mutable* slice, indexed by position.
    fn as_mut_slice(&mut self) -> &mut [Self::Element];
    /// Returns the amount of elements the storage can hold without requiring a memory allocation.
    fn capacity(&self) -> usize;
    /// Tries to make room for at least `additional` more elements.
    ///
    /// Fails with [`StorageError::AllocationFailed`] if the allocator refuses, or with [`StorageError::CapacityExceeded`] if the storage has a fixed capacity which is too small.
    ///
    /// [`StorageError::AllocationFailed`]: ../enum.StorageError.html#variant.AllocationFailed " "
    /// [`StorageError::CapacityExceeded`]: ../enum.StorageError.html#variant.CapacityExceeded " "
    fn try_reserve(&mut self, additional: usize) -> Result<(), StorageError>;

    /// Creates a new empty storage. Dynamically-allocated storages created this way do not allocate memory.
    #[inline(always)]
    fn new() -> Self {
        Self::with_capacity(0)
    }
    /// Returns the number of elements in the storage.
    #[inline(always)]
    fn len(&self) -> usize {
        self.as_slice().len()
    }
    /// Returns `true` if the storage contains no elements, `false` otherwise.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns a reference to the element at the specified position, or `None` if it is out of bounds.
    #[inline(always)]
    fn get(&self, index: usize) -> Option<&Self::Element> {
        self.as_slice().get(index)
    }
    /// Returns a *mutable* reference to the element at the specified position, or `None` if it is out of bounds.
    #[inline(always)]
    fn get_mut(&mut self, index: usize) -> Option<&mut Self::Element> {
        self.as_mut_slice().get_mut(index)
    }
    /// Shrinks the capacity of the storage as much as possible.
    ///
    /// The default implementation does nothing.
    #[inline(always)]
    fn shrink_to_fit(&mut self) {}
}

/// The storage used by [`OrderedMap`] when a storage type is not provided: a plain [`Vec`] of nodes.
///
/// [`OrderedMap`]: ../ordered_map/struct.OrderedMap.html " "
/// [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
pub type DefaultStorage<K, V> = Vec<Node<K, V>>;
