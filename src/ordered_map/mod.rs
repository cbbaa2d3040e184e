//! Ordered maps backed by binary search trees.
//!
//! The [Wikipedia article] on binary search trees covers their use cases and specifics in more detail.
//!
//! Every node stores one entry and links to its left child, its right child and its parent. All links are positions in the backing storage, so the parent link is just a number and never keeps anything alive. Iteration uses those parent links to climb back up the tree instead of keeping a stack of ancestors.
//!
//! The tree is *not* self-balancing. Inserting keys in sorted order produces a tree which is effectively a linked list; call [`balance`] to rebuild it into the minimal height once you're done inserting.
//!
//! # Example
//! ```rust
//! use bstree::ordered_map::{OrderedMap, Rebalance};
//!
//! // Create the map. The storage defaults to a `Vec` of nodes.
//! let mut map = OrderedMap::<_, _>::new();
//! for &key in &[8, 3, 10, 1, 6, 3, 7, 14, 13, 4] {
//!     map.insert(key, 45);
//! }
//! // The second 3 overwrote the first one instead of adding a node.
//! assert_eq!(map.len(), 9);
//!
//! // Iteration always visits the keys in ascending order, regardless of the shape of the tree.
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, [1, 3, 4, 6, 7, 8, 10, 13, 14]);
//!
//! // Lookup produces a cursor, which is past the end if the key is missing.
//! assert_eq!(map.find(&7).get(), Some((&7, &45)));
//! assert!(map.find(&16) == map.end());
//!
//! // Rebuild the tree into the smallest height possible for 9 nodes.
//! assert_eq!(map.balance(), Rebalance::Rebuilt { len: 9, height: 4 });
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), keys);
//!
//! // Cursors can also look at the structure of the tree.
//! let root = map.begin().parent().and_then(|x| x.parent()).unwrap();
//! assert!(root.is_root());
//! assert_eq!(root.key(), &7);
//! ```
//!
//! [Wikipedia article]: https://en.wikipedia.org/wiki/Binary_search_tree " "
//! [`balance`]: struct.OrderedMap.html#method.balance " "

mod base;
mod cursor;
mod cursor_mut;
mod iter;
mod node;

pub use base::OrderedMap;
pub use cursor::Cursor;
pub use cursor_mut::CursorMut;
pub use iter::{Iter, IterMut, Keys, Values, ValuesMut, IntoIter};
pub use node::Node;

/// The outcome of [`OrderedMap::balance`].
///
/// [`OrderedMap::balance`]: struct.OrderedMap.html#method.balance " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rebalance {
    /// The map was empty, so there was nothing to rebuild.
    Empty,
    /// The tree was rebuilt.
    Rebuilt {
        /// The number of entries in the map.
        len: usize,
        /// The height of the rebuilt tree, which is the smallest possible one for `len` nodes.
        height: usize,
    },
}

/// An ordered map which uses an `ArrayVec` as backing storage and thus never allocates.
///
/// `A` is the backing array type, e.g. `[Node<K, V>; 16]`.
#[cfg(feature = "arrayvec_storage")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "arrayvec_storage")))]
pub type ArrayOrderedMap<K, V, A> = OrderedMap<K, V, arrayvec::ArrayVec<A>>;

#[cfg(test)]
mod tests;
