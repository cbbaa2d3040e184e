use core::{
    fmt::{self, Formatter, Debug},
    iter::FusedIterator,
    marker::PhantomData,
};
use super::{node, Node};

/// An iterator over the entries of an ordered map, in ascending key order.
///
/// Created by [`OrderedMap::iter`]. The iterator keeps no stack: it finds each next entry by following the child and parent links of the current one.
///
/// [`OrderedMap::iter`]: struct.OrderedMap.html#method.iter " "
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    front: Option<usize>,
    remaining: usize,
}
impl<'a, K, V> Iter<'a, K, V> {
    /// `front` must be the leftmost node of the tree stored in `nodes`, or `None` if it is empty.
    #[inline(always)]
    pub(super) fn new(nodes: &'a [Node<K, V>], front: Option<usize>) -> Self {
        Self {
            nodes,
            front,
            remaining: nodes.len(),
        }
    }
}
impl<'a, K: Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let position = self.front?;
        let nodes = self.nodes;
        let node = &nodes[position];
        self.front = unsafe {
            // SAFETY: the position was just bounds-checked, and every link in a map's storage is
            // a valid position
            node::successor(nodes.as_ptr(), position)
        };
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
impl<K: Ord, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K: Ord, V> FusedIterator for Iter<'_, K, V> {}
impl<K, V> Clone for Iter<'_, K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            remaining: self.remaining,
        }
    }
}

/// An iterator over the entries of an ordered map with *mutable* references to the values, in ascending key order.
///
/// Created by [`OrderedMap::iter_mut`].
///
/// [`OrderedMap::iter_mut`]: struct.OrderedMap.html#method.iter_mut " "
pub struct IterMut<'a, K, V> {
    nodes: *mut Node<K, V>,
    len: usize,
    front: Option<usize>,
    remaining: usize,
    _borrow: PhantomData<&'a mut [Node<K, V>]>,
}
impl<'a, K, V> IterMut<'a, K, V> {
    /// `front` must be the leftmost node of the tree stored in `nodes`, or `None` if it is empty.
    #[inline(always)]
    pub(super) fn new(nodes: &'a mut [Node<K, V>], front: Option<usize>) -> Self {
        let len = nodes.len();
        Self {
            nodes: nodes.as_mut_ptr(),
            len,
            front,
            remaining: len,
            _borrow: PhantomData,
        }
    }
}
impl<'a, K: Ord, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let position = self.front?;
        assert!(position < self.len, "position {} is out of bounds", position);
        unsafe {
            // SAFETY: the position was just bounds-checked, and every link in a map's storage is
            // a valid position. The in-order walk never visits a node twice, so the mutable
            // reference to the value handed out here is unique; the successor search only
            // touches keys and links, never values.
            self.front = node::successor(self.nodes, position);
            self.remaining -= 1;
            let node = self.nodes.add(position);
            Some((&(*node).key, &mut (*node).value))
        }
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
impl<K: Ord, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K: Ord, V> FusedIterator for IterMut<'_, K, V> {}
// SAFETY: the iterator behaves like a `&mut [Node<K, V>]`
unsafe impl<K: Send, V: Send> Send for IterMut<'_, K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for IterMut<'_, K, V> {}
impl<K, V> Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("front", &self.front)
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// An iterator over the keys of an ordered map, in ascending order.
#[derive(Debug)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}
impl<'a, K, V> Keys<'a, K, V> {
    #[inline(always)]
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}
impl<'a, K: Ord, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
impl<K: Ord, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K: Ord, V> FusedIterator for Keys<'_, K, V> {}
impl<K, V> Clone for Keys<'_, K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over the values of an ordered map, in ascending key order.
#[derive(Debug)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}
impl<'a, K, V> Values<'a, K, V> {
    #[inline(always)]
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}
impl<'a, K: Ord, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
impl<K: Ord, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K: Ord, V> FusedIterator for Values<'_, K, V> {}
impl<K, V> Clone for Values<'_, K, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over *mutable* references to the values of an ordered map, in ascending key order.
#[derive(Debug)]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}
impl<'a, K, V> ValuesMut<'a, K, V> {
    #[inline(always)]
    pub(super) fn new(inner: IterMut<'a, K, V>) -> Self {
        Self { inner }
    }
}
impl<'a, K: Ord, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
impl<K: Ord, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K: Ord, V> FusedIterator for ValuesMut<'_, K, V> {}

/// An owning iterator over the entries of an ordered map, in ascending key order.
///
/// Created by the `into_iter` method on `OrderedMap`. The entries are sorted up front, when the iterator is created.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<Option<(K, V)>>,
}
impl<K, V> IntoIter<K, V> {
    #[inline(always)]
    pub(super) fn new(sorted: Vec<Option<(K, V)>>) -> Self {
        Self {
            inner: sorted.into_iter(),
        }
    }
}
impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().flatten()
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
