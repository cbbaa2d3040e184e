/// A node of an ordered map.
///
/// Created by the map internally and only publicly exposed so that map storages' generic arguments could be specified.
#[derive(Copy, Clone, Debug, Hash)]
pub struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) left: Option<usize>,
    pub(super) right: Option<usize>,
    pub(super) parent: Option<usize>,
}
impl<K, V> Node<K, V> {
    #[inline(always)]
    pub(super) const fn leaf(key: K, value: V, parent: Option<usize>) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            parent,
        }
    }
    /// Copies the payload into a new leaf. The children are attached by the caller once they have been copied as well.
    #[inline]
    pub(super) fn duplicate(&self, parent: Option<usize>) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self::leaf(self.key.clone(), self.value.clone(), parent)
    }
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)] // const fn cannot evaluate drop
    pub(super) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Returns the position of the leftmost node of the subtree rooted at `position`.
///
/// # Safety
/// `nodes` must point to the first node of a map's storage, and `position` must be a valid position in it.
#[inline]
pub(super) unsafe fn leftmost<K, V>(nodes: *const Node<K, V>, mut position: usize) -> usize {
    while let Some(left) = (*nodes.add(position)).left {
        position = left;
    }
    position
}

/// Returns the position of the in-order successor of the node at `position`, or `None` if it holds the greatest key.
///
/// If the node has a right subtree, the successor is the leftmost node of that subtree. Otherwise, the parent links are followed upwards, skipping every ancestor whose key is not greater than the one of the node we started from; the first greater one is the successor.
///
/// Only the links and the keys are read, and only through the fields themselves, so this is sound to call while mutable references to the *values* of any nodes are alive.
///
/// # Safety
/// `nodes` must point to the first node of a map's storage, and `position` must be a valid position in it.
pub(super) unsafe fn successor<K: Ord, V>(nodes: *const Node<K, V>, position: usize) -> Option<usize> {
    let node = nodes.add(position);
    if let Some(right) = (*node).right {
        return Some(leftmost(nodes, right));
    }
    let key = &(*node).key;
    let mut ancestor = (*node).parent;
    while let Some(candidate) = ancestor {
        let candidate_node = nodes.add(candidate);
        if (*candidate_node).key > *key {
            return Some(candidate);
        }
        ancestor = (*candidate_node).parent;
    }
    None
}

/// Mirror image of `leftmost`.
///
/// # Safety
/// Same as `leftmost`.
#[inline]
pub(super) unsafe fn rightmost<K, V>(nodes: *const Node<K, V>, mut position: usize) -> usize {
    while let Some(right) = (*nodes.add(position)).right {
        position = right;
    }
    position
}
