use core::{
    borrow::Borrow,
    cmp::Ordering,
    fmt::{self, Formatter, Debug, Display},
    iter::FromIterator,
    mem,
    ops::Index,
};
use std::collections::TryReserveError;
use arrayvec::ArrayVec;
use tracing::{debug, info, trace};
use crate::{
    storage::{Storage, DefaultStorage},
    StorageError,
};
use super::{
    node,
    Cursor,
    CursorMut,
    IntoIter,
    Iter,
    IterMut,
    Keys,
    Node,
    Rebalance,
    Values,
    ValuesMut,
};

/// The deepest range stack `balance` can need: one pending range per level of a tree with `usize::MAX` nodes, with room to spare.
const REBUILD_STACK_SIZE: usize = 128;

/// An ordered map backed by a binary search tree.
///
/// See the [module-level documentation] for more.
///
/// [module-level documentation]: index.html " "
pub struct OrderedMap<K, V, S = DefaultStorage<K, V>>
where
    S: Storage<Element = Node<K, V>>,
{
    pub(super) storage: S,
    pub(super) root: Option<usize>,
}

/// Where a key is, or where it would have to be attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Search {
    Found(usize),
    /// The parent to attach to and on which side, or `None` if the tree is empty.
    Vacant(Option<(usize, Side)>),
}
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl<K, V, S> OrderedMap<K, V, S>
where
    S: Storage<Element = Node<K, V>>,
{
    /// Creates an empty map. Dynamically-allocated storages do not allocate memory until the first insertion.
    ///
    /// # Example
    /// ```rust
    /// # use bstree::OrderedMap;
    /// let map = OrderedMap::<u32, &str>::new();
    /// assert!(map.is_empty());
    /// assert!(map.begin() == map.end());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            storage: S::new(),
            root: None,
        }
    }
    /// Creates an empty map with room for at least `capacity` nodes.
    ///
    /// # Panics
    /// The storage may panic if it has fixed capacity and the specified value exceeds it.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: S::with_capacity(capacity),
            root: None,
        }
    }
    /// Returns the number of entries in the map.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.storage.len()
    }
    /// Returns `true` if the map holds no entries, `false` otherwise.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
    /// Returns the number of nodes the storage can hold without allocating.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }
    /// Reserves room for at least `additional` more entries.
    ///
    /// # Panics
    /// Panics if the storage cannot make room. See [`try_reserve`] for a fallible version.
    ///
    /// [`try_reserve`]: #method.try_reserve " "
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.try_reserve(additional)
            .expect("the map's storage could not make room for more nodes")
    }
    /// Tries to reserve room for at least `additional` more entries, leaving the map untouched on failure.
    #[inline]
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), StorageError> {
        self.storage.try_reserve(additional)
    }
    /// Shrinks the capacity of the storage as much as possible.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.storage.shrink_to_fit()
    }
    /// Returns the number of nodes on the longest path from the root to a leaf, or `0` for an empty map.
    ///
    /// This walks the whole tree.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending = Vec::new();
        pending.extend(self.root.map(|root| (root, 1_usize)));
        while let Some((position, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            let node = self.node(position);
            pending.extend(node.left.map(|left| (left, depth + 1)));
            pending.extend(node.right.map(|right| (right, depth + 1)));
        }
        deepest
    }
    /// Removes every entry, leaving the map empty. Does nothing if the map already is empty.
    ///
    /// The capacity of the storage is kept.
    pub fn clear(&mut self) {
        if self.root.is_none() {
            return;
        }
        let len = self.len();
        self.storage.clear();
        self.root = None;
        debug!(len, "cleared the map");
    }
    /// Moves the contents out into a new map, leaving this one empty.
    ///
    /// # Example
    /// ```rust
    /// # use bstree::OrderedMap;
    /// let mut source: OrderedMap<_, _> = vec![(1, 'a'), (2, 'b')].into_iter().collect();
    /// let destination = source.take();
    /// assert!(source.is_empty());
    /// assert_eq!(destination.len(), 2);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }
    /// Returns a cursor past the last entry.
    #[inline(always)]
    pub fn end(&self) -> Cursor<'_, K, V, S> {
        Cursor::new(self, None)
    }

    #[inline]
    pub(super) fn node(&self, position: usize) -> &Node<K, V> {
        &self.storage.as_slice()[position]
    }
    #[inline]
    pub(super) fn node_mut(&mut self, position: usize) -> &mut Node<K, V> {
        &mut self.storage.as_mut_slice()[position]
    }
    pub(super) fn first_position(&self) -> Option<usize> {
        let nodes = self.storage.as_slice();
        self.root.map(|root| unsafe {
            // SAFETY: the root and every child link are valid positions in the storage
            node::leftmost(nodes.as_ptr(), root)
        })
    }
    pub(super) fn last_position(&self) -> Option<usize> {
        let nodes = self.storage.as_slice();
        self.root.map(|root| unsafe {
            // SAFETY: as above
            node::rightmost(nodes.as_ptr(), root)
        })
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Ord,
    S: Storage<Element = Node<K, V>>,
{
    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present, its value is overwritten in place and the old one is returned; no node is created and the shape of the tree does not change. Otherwise, the pair becomes a new leaf and `None` is returned.
    ///
    /// The tree is never rebalanced on insertion.
    ///
    /// # Panics
    /// Panics if the storage cannot make room for a new node. See [`try_insert`] for a fallible version.
    ///
    /// [`try_insert`]: #method.try_insert " "
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.try_insert(key, value)
            .expect("the map's storage could not make room for a new node")
    }
    /// Inserts a key-value pair into the map, failing if the storage cannot make room for a new node.
    ///
    /// On failure, the map is left exactly as it was and the pair is dropped.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, StorageError> {
        match self.search(&key) {
            Search::Found(position) => {
                trace!(position, "overwrote the value of an existing key");
                Ok(Some(mem::replace(&mut self.node_mut(position).value, value)))
            }
            Search::Vacant(slot) => {
                self.storage.try_reserve(1)?;
                self.attach(key, value, slot);
                Ok(None)
            }
        }
    }
    /// Returns a cursor positioned at the entry with the specified key, or past the end if there is none.
    ///
    /// # Example
    /// ```rust
    /// # use bstree::OrderedMap;
    /// let map: OrderedMap<_, _> = vec![(8, "eight"), (3, "three")].into_iter().collect();
    /// assert_eq!(map.find(&3).value(), &"three");
    /// assert!(map.find(&4) == map.end());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V, S>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(self, self.search(key).found())
    }
    /// Returns a *mutable* cursor positioned at the entry with the specified key, or past the end if there is none.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V, S>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.search(key).found();
        CursorMut::new(self, position)
    }
    /// Returns a reference to the value for the specified key.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).get().map(|(_, value)| value)
    }
    /// Returns a *mutable* reference to the value for the specified key.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_mut(key).into_value_mut()
    }
    /// Returns `true` if the map holds the specified key, `false` otherwise.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).found().is_some()
    }
    /// Returns a cursor positioned at the entry with the smallest key, or past the end if the map is empty.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, K, V, S> {
        Cursor::new(self, self.first_position())
    }
    /// Returns a *mutable* cursor positioned at the entry with the smallest key, or past the end if the map is empty.
    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, S> {
        let position = self.first_position();
        CursorMut::new(self, position)
    }
    /// Returns the entry with the smallest key.
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.begin().get()
    }
    /// Returns the entry with the greatest key.
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        Cursor::new(self, self.last_position()).get()
    }
    /// Returns an iterator over the entries, in ascending key order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.storage.as_slice(), self.first_position())
    }
    /// Returns an iterator over the entries with *mutable* references to the values, in ascending key order.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let front = self.first_position();
        IterMut::new(self.storage.as_mut_slice(), front)
    }
    /// Returns an iterator over the keys, in ascending order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }
    /// Returns an iterator over the values, in ascending key order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }
    /// Returns an iterator over *mutable* references to the values, in ascending key order.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }
    /// Rebuilds the tree into the smallest possible height.
    ///
    /// All entries are collected in ascending order, the old tree is discarded and the entries are reinserted by median split: the middle entry of the sorted range becomes the root, then the middles of both halves become its children and so on. The sizes of the two subtrees of every node differ by at most one, and the height of the result is `⌈log2(len + 1)⌉`. On ranges of even length, the lower median is picked.
    ///
    /// Balancing an empty map does nothing and is reported with `Rebalance::Empty`.
    ///
    /// # Panics
    /// Panics if the scratch space for the sorted entries cannot be allocated. See [`try_balance`] for a fallible version.
    ///
    /// # Example
    /// ```rust
    /// # use bstree::{OrderedMap, Rebalance};
    /// let mut map: OrderedMap<_, _> = (1..=7).map(|x| (x, x * 10)).collect();
    /// assert_eq!(map.height(), 7);
    /// assert_eq!(map.balance(), Rebalance::Rebuilt { len: 7, height: 3 });
    /// assert_eq!(map.begin().key(), &1);
    /// ```
    ///
    /// [`try_balance`]: #method.try_balance " "
    #[inline]
    pub fn balance(&mut self) -> Rebalance {
        self.try_balance()
            .expect("failed to allocate scratch space for rebalancing")
    }
    /// Rebuilds the tree into the smallest possible height, failing if the scratch space for the sorted entries cannot be allocated.
    ///
    /// All scratch space is reserved before the tree is touched, so the map is left as it was on failure.
    pub fn try_balance(&mut self) -> Result<Rebalance, StorageError> {
        let len = self.len();
        if len == 0 {
            info!("balance requested on an empty map, nothing to rebuild");
            return Ok(Rebalance::Empty);
        }
        let mut sorted = self.try_take_sorted()?;
        self.rebuild(&mut sorted)?;
        let height = self.height();
        debug!(len, height, "rebuilt the map into a balanced tree");
        Ok(Rebalance::Rebuilt { len, height })
    }

    #[inline]
    pub(super) fn successor_of(&self, position: usize) -> Option<usize> {
        let nodes = self.storage.as_slice();
        assert!(position < nodes.len(), "position {} is out of bounds", position);
        unsafe {
            // SAFETY: we just checked the position, and every link is a valid position
            node::successor(nodes.as_ptr(), position)
        }
    }
    /// Empties the storage into a list of the entries in ascending key order. Every slot of the list is `Some`.
    ///
    /// Fails before touching the tree if the scratch space cannot be allocated.
    pub(super) fn try_take_sorted(&mut self) -> Result<Vec<Option<(K, V)>>, StorageError> {
        let len = self.len();
        let scratch_error = |source: TryReserveError| StorageError::AllocationFailed {
            requested: len,
            source,
        };
        let mut ranks: Vec<usize> = Vec::new();
        ranks.try_reserve_exact(len).map_err(scratch_error)?;
        let mut sorted: Vec<Option<(K, V)>> = Vec::new();
        sorted.try_reserve_exact(len).map_err(scratch_error)?;

        ranks.resize(len, 0);
        let mut rank = 0;
        let mut cursor = self.first_position();
        while let Some(position) = cursor {
            ranks[position] = rank;
            rank += 1;
            cursor = self.successor_of(position);
        }
        debug_assert_eq!(rank, len, "in-order walk missed some nodes");

        sorted.resize_with(len, || None);
        while let Some(node) = self.storage.pop() {
            sorted[ranks[self.storage.len()]] = Some(node.into_pair());
        }
        self.root = None;
        Ok(sorted)
    }
    /// Inserts the entries of a sorted list by median split, taking each of them out of its slot.
    fn rebuild(&mut self, sorted: &mut [Option<(K, V)>]) -> Result<(), StorageError> {
        let mut pending = ArrayVec::<[(usize, usize); REBUILD_STACK_SIZE]>::new();
        if !sorted.is_empty() {
            pending.push((0, sorted.len() - 1));
        }
        // Ranges are inclusive. The left half is pushed last so that it is rebuilt first.
        while let Some((left, right)) = pending.pop() {
            let median = left + (right - left) / 2;
            let (key, value) = sorted[median]
                .take()
                .expect("every median is visited exactly once");
            trace!(median, "reinserting median");
            // Never allocates: the storage kept the capacity of the nodes it held before.
            self.try_insert(key, value)?;
            if median < right {
                pending.push((median + 1, right));
            }
            if median > left {
                pending.push((left, median - 1));
            }
        }
        Ok(())
    }

    fn search<Q>(&self, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = match self.root {
            Some(root) => root,
            None => return Search::Vacant(None),
        };
        loop {
            let node = self.node(current);
            let (next, side) = match key.cmp(node.key.borrow()) {
                Ordering::Less => (node.left, Side::Left),
                Ordering::Equal => return Search::Found(current),
                Ordering::Greater => (node.right, Side::Right),
            };
            match next {
                Some(child) => current = child,
                None => return Search::Vacant(Some((current, side))),
            }
        }
    }
    /// Adds a new leaf at a vacant slot found by `search`. Room for it must have been reserved.
    fn attach(&mut self, key: K, value: V, slot: Option<(usize, Side)>) -> usize {
        let parent = slot.map(|(parent, _)| parent);
        let position = self.storage.add(Node::leaf(key, value, parent));
        match slot {
            None => self.root = Some(position),
            Some((parent, Side::Left)) => self.node_mut(parent).left = Some(position),
            Some((parent, Side::Right)) => self.node_mut(parent).right = Some(position),
        }
        trace!(position, ?parent, "attached a new node");
        position
    }
}

impl Search {
    #[inline]
    const fn found(self) -> Option<usize> {
        match self {
            Self::Found(position) => Some(position),
            Self::Vacant(..) => None,
        }
    }
}

impl<K, V, S> Default for OrderedMap<K, V, S>
where
    S: Storage<Element = Node<K, V>>,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Clone for OrderedMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Storage<Element = Node<K, V>>,
{
    /// Performs a deep copy: every node is duplicated into a fresh storage, with the parent links pointing at the new nodes.
    ///
    /// The copy is compact regardless of how the source's storage is laid out.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len());
        if let Some(root) = self.root {
            let new_root = copy.storage.add(self.node(root).duplicate(None));
            copy.root = Some(new_root);
            let mut pending = vec![(root, new_root)];
            while let Some((original, duplicate)) = pending.pop() {
                let (left, right) = {
                    let node = self.node(original);
                    (node.left, node.right)
                };
                if let Some(left) = left {
                    let position = copy.storage.add(self.node(left).duplicate(Some(duplicate)));
                    copy.node_mut(duplicate).left = Some(position);
                    pending.push((left, position));
                }
                if let Some(right) = right {
                    let position = copy.storage.add(self.node(right).duplicate(Some(duplicate)));
                    copy.node_mut(duplicate).right = Some(position);
                    pending.push((right, position));
                }
            }
        }
        debug!(len = copy.len(), "deep-copied the map");
        copy
    }
    /// Copies `source` into a fresh map first and only then moves it into place, dropping the previous contents.
    fn clone_from(&mut self, source: &Self) {
        let copy = source.clone();
        *self = copy;
    }
}

impl<K, V, S> Debug for OrderedMap<K, V, S>
where
    K: Ord + Debug,
    V: Debug,
    S: Storage<Element = Node<K, V>>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Writes one `key: value` line per entry, in ascending key order.
///
/// # Example
/// ```rust
/// # use bstree::OrderedMap;
/// let map: OrderedMap<_, _> = vec![(10, 45), (8, 45)].into_iter().collect();
/// assert_eq!(map.to_string(), "8: 45\n10: 45\n");
/// ```
impl<K, V, S> Display for OrderedMap<K, V, S>
where
    K: Ord + Display,
    V: Display,
    S: Storage<Element = Node<K, V>>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (key, value) in self {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

impl<K, V, S> PartialEq for OrderedMap<K, V, S>
where
    K: Ord,
    V: PartialEq,
    S: Storage<Element = Node<K, V>>,
{
    /// Compares the contents, not the shapes of the trees.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}
impl<K, V, S> Eq for OrderedMap<K, V, S>
where
    K: Ord,
    V: Eq,
    S: Storage<Element = Node<K, V>>,
{}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Ord,
    S: Storage<Element = Node<K, V>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Ord,
    S: Storage<Element = Node<K, V>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S, Q> Index<&Q> for OrderedMap<K, V, S>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
    S: Storage<Element = Node<K, V>>,
{
    type Output = V;

    /// # Panics
    /// Panics if the key is not present in the map.
    #[track_caller]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S>
where
    K: Ord,
    S: Storage<Element = Node<K, V>>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<'a, K, V, S> IntoIterator for &'a mut OrderedMap<K, V, S>
where
    K: Ord,
    S: Storage<Element = Node<K, V>>,
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
impl<K, V, S> IntoIterator for OrderedMap<K, V, S>
where
    K: Ord,
    S: Storage<Element = Node<K, V>>,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// # Panics
    /// Panics if the scratch space for sorting the entries cannot be allocated.
    fn into_iter(mut self) -> Self::IntoIter {
        let sorted = self
            .try_take_sorted()
            .expect("failed to allocate scratch space for sorting the entries");
        IntoIter::new(sorted)
    }
}
