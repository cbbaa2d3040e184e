use core::{
    fmt::{self, Formatter, Debug},
    ptr,
};
use crate::storage::{Storage, DefaultStorage};
use super::{OrderedMap, Node, CursorMut};

static END_PANIC_MSG: &str = "\
the cursor is past the end of the map and does not point to an entry";

/// A position in an ordered map: either an entry or the end of the map.
///
/// Since this type does not point to the node directly, but rather the map the node is in and the position of the node in the storage, it can be used to walk the map in ascending key order with [`move_next`], and to look at the structure of the tree.
///
/// Two cursors are equal if they belong to the same map and are at the same entry, or are both past the end. Comparing cursors of different maps is a logic error, caught by a debug assertion.
///
/// [`move_next`]: #method.move_next " "
pub struct Cursor<'a, K, V, S = DefaultStorage<K, V>>
where
    S: Storage<Element = Node<K, V>>,
{
    tree: &'a OrderedMap<K, V, S>,
    position: Option<usize>,
}
impl<'a, K, V, S> Cursor<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
{
    #[inline(always)]
    pub(super) fn new(tree: &'a OrderedMap<K, V, S>, position: Option<usize>) -> Self {
        debug_assert!(
            position.map_or(true, |position| position < tree.len()),
            "cursor created at position {:?}, which is not present in the storage",
            position,
        );
        Self { tree, position }
    }
    /// Returns the position of the node in the storage, or `None` if the cursor is past the end.
    #[inline(always)]
    pub fn raw_position(&self) -> Option<usize> {
        self.position
    }
    /// Returns `true` if the cursor is past the end of the map, `false` if it is at an entry.
    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.position.is_none()
    }
    /// Returns the entry the cursor is at, or `None` if it is past the end.
    #[inline]
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        self.node().map(|node| (&node.key, &node.value))
    }
    /// Returns the key of the entry the cursor is at.
    ///
    /// # Panics
    /// Panics if the cursor is past the end.
    #[inline]
    #[track_caller]
    pub fn key(&self) -> &'a K {
        &self.node().expect(END_PANIC_MSG).key
    }
    /// Returns the value of the entry the cursor is at.
    ///
    /// # Panics
    /// Panics if the cursor is past the end.
    #[inline]
    #[track_caller]
    pub fn value(&self) -> &'a V {
        &self.node().expect(END_PANIC_MSG).value
    }
    /// Returns a cursor at the parent node, or `None` if this is the root node or the cursor is past the end.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.relative(|node| node.parent)
    }
    /// Returns a cursor at the left child, or `None` if there is none or the cursor is past the end.
    #[inline]
    pub fn left_child(&self) -> Option<Self> {
        self.relative(|node| node.left)
    }
    /// Returns a cursor at the right child, or `None` if there is none or the cursor is past the end.
    #[inline]
    pub fn right_child(&self) -> Option<Self> {
        self.relative(|node| node.right)
    }
    /// Returns `true` if the cursor is at the root node, `false` otherwise.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.position.is_some() && self.position == self.tree.root
    }
    /// Returns `true` if the cursor is at a node without children, `false` otherwise.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node()
            .map_or(false, |node| node.left.is_none() && node.right.is_none())
    }

    #[inline(always)]
    fn node(&self) -> Option<&'a Node<K, V>> {
        let tree = self.tree;
        self.position.map(|position| tree.node(position))
    }
    #[inline]
    fn relative(&self, link: impl FnOnce(&Node<K, V>) -> Option<usize>) -> Option<Self> {
        let position = link(self.node()?)?;
        Some(Self::new(self.tree, Some(position)))
    }
}
impl<'a, K, V, S> Cursor<'a, K, V, S>
where
    K: Ord,
    S: Storage<Element = Node<K, V>>,
{
    /// Moves the cursor to the entry with the next greater key, or past the end if this was the last one.
    ///
    /// Moving a cursor which is already past the end is a logic error, caught by a debug assertion; in release builds, the cursor stays where it is.
    #[inline]
    pub fn move_next(&mut self) {
        debug_assert!(
            self.position.is_some(),
            "tried to advance a cursor which is past the end",
        );
        if let Some(position) = self.position {
            self.position = self.tree.successor_of(position);
        }
    }
    /// Returns a cursor at the entry with the next greater key, leaving this one as it is.
    #[inline]
    #[must_use]
    pub fn successor(mut self) -> Self {
        self.move_next();
        self
    }
}
impl<K, V, S> Copy for Cursor<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
{}
impl<K, V, S> Clone for Cursor<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}
impl<K, V, S> PartialEq for Cursor<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let same_tree = ptr::eq(self.tree, other.tree);
        debug_assert!(same_tree, "compared cursors which belong to different maps");
        same_tree && self.position == other.position
    }
}
impl<K, V, S> Eq for Cursor<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
{}
impl<K, V, S> Debug for Cursor<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .finish()
    }
}
impl<'a, K, V, S> From<CursorMut<'a, K, V, S>> for Cursor<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
{
    #[inline]
    fn from(cursor: CursorMut<'a, K, V, S>) -> Self {
        let (tree, position) = cursor.into_parts();
        Self::new(tree, position)
    }
}
