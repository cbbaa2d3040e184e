use core::fmt::{self, Formatter, Debug};
use crate::storage::{Storage, DefaultStorage};
use super::{OrderedMap, Node, Cursor};

static END_PANIC_MSG: &str = "\
the cursor is past the end of the map and does not point to an entry";

/// A *mutable* position in an ordered map: either an entry or the end of the map.
///
/// Works like [`Cursor`], except that it holds an exclusive borrow of the map and can therefore hand out mutable references to the values. Keys can never be mutated, since that could break the ordering of the tree.
///
/// [`Cursor`]: struct.Cursor.html " "
pub struct CursorMut<'a, K, V, S = DefaultStorage<K, V>>
where
    S: Storage<Element = Node<K, V>>,
{
    tree: &'a mut OrderedMap<K, V, S>,
    position: Option<usize>,
}
impl<'a, K, V, S> CursorMut<'a, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
{
    #[inline(always)]
    pub(super) fn new(tree: &'a mut OrderedMap<K, V, S>, position: Option<usize>) -> Self {
        debug_assert!(
            position.map_or(true, |position| position < tree.len()),
            "cursor created at position {:?}, which is not present in the storage",
            position,
        );
        Self { tree, position }
    }
    #[inline(always)]
    pub(super) fn into_parts(self) -> (&'a mut OrderedMap<K, V, S>, Option<usize>) {
        (self.tree, self.position)
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
    /// Returns a read-only cursor at the same position, borrowing this one.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, K, V, S> {
        Cursor::new(&*self.tree, self.position)
    }
    /// Returns the entry the cursor is at, or `None` if it is past the end.
    #[inline]
    pub fn get(&self) -> Option<(&K, &V)> {
        let tree = &*self.tree;
        self.position.map(|position| {
            let node = tree.node(position);
            (&node.key, &node.value)
        })
    }
    /// Returns the entry the cursor is at with a *mutable* reference to the value, or `None` if it is past the end.
    #[inline]
    pub fn get_mut(&mut self) -> Option<(&K, &mut V)> {
        let position = self.position?;
        let node = self.tree.node_mut(position);
        Some((&node.key, &mut node.value))
    }
    /// Returns the key of the entry the cursor is at.
    ///
    /// # Panics
    /// Panics if the cursor is past the end.
    #[inline]
    #[track_caller]
    pub fn key(&self) -> &K {
        self.get().expect(END_PANIC_MSG).0
    }
    /// Returns the value of the entry the cursor is at.
    ///
    /// # Panics
    /// Panics if the cursor is past the end.
    #[inline]
    #[track_caller]
    pub fn value(&self) -> &V {
        self.get().expect(END_PANIC_MSG).1
    }
    /// Returns a *mutable* reference to the value of the entry the cursor is at.
    ///
    /// # Panics
    /// Panics if the cursor is past the end.
    #[inline]
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut V {
        self.get_mut().expect(END_PANIC_MSG).1
    }
    /// Consumes the cursor and returns a *mutable* reference to the value with the lifetime of the map borrow, or `None` if it is past the end.
    #[inline]
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        let position = self.position?;
        Some(&mut self.tree.node_mut(position).value)
    }
}
impl<'a, K, V, S> CursorMut<'a, K, V, S>
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
}
impl<K, V, S> Debug for CursorMut<'_, K, V, S>
where
    S: Storage<Element = Node<K, V>>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.position)
            .finish()
    }
}
