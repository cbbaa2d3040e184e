use crate::StorageError;
use super::Storage;

impl<T> Storage for Vec<T> {
    type Element = T;

    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity(capacity)
    }
    #[inline(always)]
    fn add(&mut self, element: Self::Element) -> usize {
        self.push(element);
        self.len() - 1
    }
    #[inline(always)]
    fn pop(&mut self) -> Option<Self::Element> {
        self.pop()
    }
    #[inline(always)]
    fn clear(&mut self) {
        self.clear()
    }
    #[inline(always)]
    fn as_slice(&self) -> &[Self::Element] {
        self
    }
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [Self::Element] {
        self
    }
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.capacity()
    }
    #[inline]
    fn try_reserve(&mut self, additional: usize) -> Result<(), StorageError> {
        Vec::try_reserve(self, additional).map_err(|source| StorageError::AllocationFailed {
            requested: additional,
            source,
        })
    }

    #[inline(always)]
    fn new() -> Self {
        Self::new()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.len()
    }
    #[inline(always)]
    fn shrink_to_fit(&mut self) {
        self.shrink_to_fit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_returns_positions_in_order() {
        let mut storage = <Vec<&str> as Storage>::new();
        assert_eq!(storage.add("a"), 0);
        assert_eq!(storage.add("b"), 1);
        assert_eq!(Storage::pop(&mut storage), Some("b"));
        assert_eq!(Storage::len(&storage), 1);
    }

    #[test]
    fn absurd_reservation_fails_instead_of_aborting() {
        let mut storage = <Vec<u64> as Storage>::new();
        match Storage::try_reserve(&mut storage, usize::MAX) {
            Err(StorageError::AllocationFailed { requested, .. }) => {
                assert_eq!(requested, usize::MAX)
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(Storage::is_empty(&storage));
    }
}
