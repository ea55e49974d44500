use crate::ring::Ring;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

impl<T: PartialEq> PartialEq for Ring<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for Ring<T> {}

impl<T: PartialOrd> PartialOrd for Ring<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for Ring<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

/// Cloning keeps the slot layout, so a handle issued by the original ring
/// names the corresponding node of the clone.
impl<T: Clone> Clone for Ring<T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            first: self.first,
            last: self.last,
            size: self.size,
        }
    }
}

impl<T: Hash> Hash for Ring<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T> Ring<T> {
    /// Returns `true` if the `Ring` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    ///
    /// let mut ring = Ring::new();
    ///
    /// ring.add_last(0);
    /// ring.add_last(1);
    ///
    /// assert_eq!(ring.contains(&0), true);
    /// assert_eq!(ring.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Rotates the contents one position towards the first node: every node
    /// takes the content of its successor, and the content of the first node
    /// moves to the last node.
    ///
    /// Nodes and links are untouched, so handles keep naming the same nodes
    /// (which now hold different contents).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter(['A', 'B', 'C', 'D']);
    /// let first = ring.get_first().unwrap();
    ///
    /// ring.scroll();
    ///
    /// assert_eq!(Vec::from_iter(ring.iter().copied()), vec!['B', 'C', 'D', 'A']);
    /// assert_eq!(ring.get_first(), Some(first));
    /// assert_eq!(ring.content(first), Ok(&'B'));
    /// ```
    pub fn scroll(&mut self) {
        log::debug!("scrolling ring of size {}", self.size);
        let mut slot = match self.first {
            Some(first) => first,
            None => return,
        };
        // Swapping each node with its successor in turn carries the first
        // content along to the last node.
        for _ in 1..self.size {
            let forward = self.arena.node(slot).forward;
            let (here, ahead) = self.arena.pair_mut(slot, forward);
            std::mem::swap(&mut here.content, &mut ahead.content);
            slot = forward;
        }
        self.validate();
    }

    /// Moves every element into a new ring in reverse order, and returns it.
    ///
    /// **This empties `self`.** The elements are popped from the front of
    /// `self` and pushed onto the front of the result, so every handle of
    /// `self` becomes stale. See [`Ring::reversed`] for a copy that leaves
    /// `self` alone.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([1, 2, 3]);
    /// let reverted = ring.revert();
    ///
    /// assert!(ring.is_empty());
    /// assert_eq!(Vec::from_iter(reverted), vec![3, 2, 1]);
    /// ```
    pub fn revert(&mut self) -> Ring<T> {
        log::debug!("reverting ring of size {}", self.size);
        let mut reverted = Ring::with_capacity(self.size);
        while let Ok(value) = self.pop() {
            reverted.push(value);
        }
        reverted
    }

    /// Returns a copy of the ring in reverse order, leaving `self` untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let ring = Ring::from_iter([1, 2, 3]);
    /// assert_eq!(ring.reversed(), Ring::from_iter([3, 2, 1]));
    /// assert_eq!(ring, Ring::from_iter([1, 2, 3]));
    /// ```
    pub fn reversed(&self) -> Ring<T>
    where
        T: Clone,
    {
        self.iter().rev().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::Ring;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::iter::FromIterator;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn ring_scroll() {
        fn test_scroll(input: Vec<i32>, expected: Vec<i32>) {
            let mut ring = Ring::from_iter(input);
            let handles = Vec::from_iter(ring.handles());
            let len = ring.len();
            ring.scroll();
            ring.assert_ring();
            assert_eq!(ring.len(), len);
            assert_eq!(Vec::from_iter(ring.handles()), handles);
            assert_eq!(Vec::from_iter(ring.iter().copied()), expected);
        }
        test_scroll(vec![1, 2, 3, 4], vec![2, 3, 4, 1]);
        test_scroll(vec![1, 2], vec![2, 1]);
        test_scroll(vec![1], vec![1]);
        test_scroll(vec![], vec![]);
    }

    #[test]
    fn ring_scroll_full_turn() {
        let original = Ring::from_iter(0..7);
        let mut ring = original.clone();
        for step in 1..=7 {
            ring.scroll();
            assert_eq!(ring.first(), Some(&(step % 7)));
        }
        assert_eq!(ring, original);
    }

    #[test]
    fn ring_scroll_after_reuse() {
        let mut ring = Ring::from_iter(0..5);
        ring.remove_at(2).unwrap();
        ring.add_first(9);
        ring.scroll();
        assert_eq!(Vec::from_iter(ring), vec![0, 1, 3, 4, 9]);
    }

    #[test]
    fn ring_revert() {
        let mut ring = Ring::from_iter(['A', 'B', 'C']);
        let handle = ring.get_first().unwrap();
        let mut reverted = ring.revert();
        assert!(ring.is_empty());
        assert!(ring.content(handle).is_err());
        ring.assert_ring();
        reverted.assert_ring();
        assert_eq!(Vec::from_iter(reverted.iter().copied()), vec!['C', 'B', 'A']);

        let restored = reverted.revert();
        assert!(reverted.is_empty());
        assert_eq!(restored, Ring::from_iter(['A', 'B', 'C']));
    }

    #[test]
    fn ring_revert_empty() {
        let mut ring = Ring::<u8>::new();
        assert!(ring.revert().is_empty());
    }

    #[test]
    fn ring_reversed_keeps_source() {
        let ring = Ring::from_iter(0..4);
        let reversed = ring.reversed();
        reversed.assert_ring();
        assert_eq!(Vec::from_iter(reversed), vec![3, 2, 1, 0]);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn ring_clone_shares_handles() {
        let mut ring = Ring::from_iter(0..4);
        ring.remove_at(1).unwrap();
        let handle = ring.get_at(1).unwrap();
        let mut cloned = ring.clone();
        assert_eq!(cloned, ring);
        assert_eq!(cloned.content(handle), Ok(&2));
        *cloned.content_mut(handle).unwrap() = 20;
        assert_eq!(ring.content(handle), Ok(&2));
        cloned.assert_ring();
    }

    #[test]
    fn ring_compare_and_hash() {
        let a = Ring::from_iter([1, 2, 3]);
        let mut b = Ring::from_iter([0, 1, 2, 3]);
        b.remove_first().unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert!(Ring::from_iter([1, 2]) < a);
        assert!(Ring::from_iter([1, 3]) > a);
        assert_ne!(a, Ring::from_iter([1, 2]));
    }

    #[test]
    fn ring_contains() {
        let ring = Ring::from_iter(["x", "y"]);
        assert!(ring.contains(&"y"));
        assert!(!ring.contains(&"z"));
    }
}
