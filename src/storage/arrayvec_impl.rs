use arrayvec::{ArrayVec, Array};
use crate::StorageError;
use super::Storage;

impl<A> Storage for ArrayVec<A>
where A: Array,
{
    type Element = A::Item;

    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity <= A::CAPACITY,
            "requested capacity {} exceeds the underlying array's size of {}",
            capacity,
            A::CAPACITY,
        );
        Self::new()
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
        self.as_slice()
    }
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [Self::Element] {
        self.as_mut_slice()
    }
    #[inline(always)]
    fn capacity(&self) -> usize {
        A::CAPACITY
    }
    #[inline]
    fn try_reserve(&mut self, additional: usize) -> Result<(), StorageError> {
        if additional > A::CAPACITY - self.len() {
            Err(StorageError::CapacityExceeded {
                capacity: A::CAPACITY,
            })
        } else {
            Ok(())
        }
    }

    #[inline(always)]
    fn new() -> Self {
        Self::new()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.len()
    }
}
