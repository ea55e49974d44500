use std::fmt::{Debug, Formatter};

use crate::error::{Result, RingError};
use crate::ring::arena::{Arena, Handle, Node};
use crate::{Handles, Iter, IterMut};

pub(crate) mod arena;
pub mod iterator;

mod algorithms;

/// The `Ring` is a circular doubly-linked list whose nodes live in an arena
/// owned by the ring.
///
/// The node following the last element is the first element, and the node
/// preceding the first element is the last one. Adding or removing at either
/// end takes *O*(1) time; positional access walks from whichever end is
/// closer, taking *O*(*n*/2) time in the worst case.
///
/// The `Ring` contains:
/// - the arena of node slots, linked to each other by slot index;
/// - the entry points `first` and `last`;
/// - the number of live nodes `size`.
///
/// Nodes are exposed as [`Handle`]s. All mutation goes through `&mut Ring`.
///
/// # Index Conventions
///
/// - insertion accepts positions `0..=size`, where `size` means "append";
/// - reading and removal accept positions `0..size` only.
pub struct Ring<T> {
    arena: Arena<T>,
    first: Option<usize>,
    last: Option<usize>,
    /// the number of live nodes
    size: usize,
}

// private methods
impl<T> Ring<T> {
    fn connect(&mut self, backward: usize, forward: usize) {
        self.arena.node_mut(backward).forward = forward;
        self.arena.node_mut(forward).backward = backward;
    }

    /// Create the only node of an empty ring, linked to itself in both
    /// directions.
    fn attach_sole(&mut self, content: T) -> usize {
        debug_assert_eq!(self.size, 0);
        let slot = self.arena.insert_with(|slot| Node {
            forward: slot,
            backward: slot,
            content,
        });
        self.first = Some(slot);
        self.last = Some(slot);
        self.size = 1;
        log::trace!("linked sole node at slot {}", slot);
        slot
    }

    /// Create a node between `backward` and `forward`, which must be adjacent.
    ///
    /// The entry points are left untouched; callers move them when the new
    /// node becomes `first` or `last`.
    fn attach_between(&mut self, backward: usize, forward: usize, content: T) -> usize {
        #[cfg(debug_assertions)]
        self.assert_adjacent(backward, forward);
        let slot = self.arena.insert(Node {
            forward,
            backward,
            content,
        });
        self.connect(backward, slot);
        self.connect(slot, forward);
        self.size += 1;
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(backward, slot);
            self.assert_adjacent(slot, forward);
        }
        log::trace!(
            "linked slot {} between {} and {}, size {}",
            slot,
            backward,
            forward,
            self.size
        );
        slot
    }

    /// Unlink the node at `slot`, release it and return its content.
    ///
    /// The entry points follow the neighbors of the removed node; removing
    /// the only node empties the ring.
    fn detach(&mut self, slot: usize) -> T {
        let node = self.arena.remove(slot);
        self.size -= 1;
        if node.forward == slot {
            debug_assert_eq!(self.size, 0);
            self.first = None;
            self.last = None;
        } else {
            self.connect(node.backward, node.forward);
            if self.first == Some(slot) {
                self.first = Some(node.forward);
            }
            if self.last == Some(slot) {
                self.last = Some(node.backward);
            }
        }
        log::trace!("unlinked slot {}, size {}", slot, self.size);
        node.content
    }

    /// The slot of the node at `index`, walking from `first` when the index
    /// lies in the front half and from `last` otherwise.
    ///
    /// Returns `None` if `index >= size`.
    fn slot_at(&self, index: usize) -> Option<usize> {
        if !self.is_element_index(index) {
            return None;
        }
        if index < self.size / 2 {
            let mut slot = self.first?;
            for _ in 0..index {
                slot = self.arena.node(slot).forward;
            }
            Some(slot)
        } else {
            let mut slot = self.last?;
            for _ in index + 1..self.size {
                slot = self.arena.node(slot).backward;
            }
            Some(slot)
        }
    }

    fn is_position_index(&self, index: usize) -> bool {
        index <= self.size
    }

    fn is_element_index(&self, index: usize) -> bool {
        index < self.size
    }

    fn out_of_range(&self, index: usize) -> RingError {
        RingError::OutOfRange {
            index,
            size: self.size,
        }
    }

    fn resolve(&self, handle: Handle) -> Result<usize> {
        self.arena
            .resolve(handle)
            .ok_or(RingError::StaleHandle(handle))
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, backward: usize, forward: usize) {
        assert_eq!(self.arena.node(backward).forward, forward);
        assert_eq!(self.arena.node(forward).backward, backward);
    }

    /// Walk the whole ring in both directions and check its linkage.
    #[cfg(any(test, feature = "validate"))]
    pub(crate) fn assert_ring(&self) {
        match (self.first, self.last) {
            (None, None) => assert_eq!(self.size, 0, "empty ring with nonzero size"),
            (Some(first), Some(last)) => {
                assert!(self.size > 0, "entry points present in an empty ring");
                assert_eq!(self.arena.node(first).backward, last);
                assert_eq!(self.arena.node(last).forward, first);

                let mut visited = std::collections::HashSet::new();
                let mut slot = first;
                for _ in 0..self.size {
                    assert!(visited.insert(slot), "slot {} visited twice", slot);
                    let next = self.arena.node(slot).forward;
                    assert_eq!(self.arena.node(next).backward, slot);
                    slot = next;
                }
                assert_eq!(slot, first, "forward walk does not close the ring");

                let mut slot = last;
                for _ in 0..self.size {
                    slot = self.arena.node(slot).backward;
                }
                assert_eq!(slot, last, "backward walk does not close the ring");
            }
            _ => panic!("exactly one entry point is absent"),
        }
    }

    #[inline]
    fn validate(&self) {
        #[cfg(feature = "validate")]
        self.assert_ring();
    }
}

impl<T> Ring<T> {
    /// Create an empty `Ring`.
    ///
    /// # Examples
    /// ```
    /// use circular_list::Ring;
    /// let ring: Ring<u32> = Ring::new();
    /// assert!(ring.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty `Ring` with room for `capacity` nodes before the arena
    /// reallocates.
    ///
    /// # Examples
    /// ```
    /// use circular_list::Ring;
    /// let ring: Ring<u32> = Ring::with_capacity(16);
    /// assert!(ring.capacity() >= 16);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            first: None,
            last: None,
            size: 0,
        }
    }

    /// The number of node slots the arena holds without reallocating.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Returns `true` if the `Ring` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of elements in the `Ring`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.add_first(2);
    /// ring.add_last(3);
    /// assert_eq!(ring.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Alias of [`Ring::len`].
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Adds an element as the new first element of the ring, and returns its
    /// handle.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.add_first(2);
    /// ring.add_first(1);
    /// assert_eq!(ring.first(), Some(&1));
    /// assert_eq!(ring.last(), Some(&2));
    /// ```
    pub fn add_first(&mut self, value: T) -> Handle {
        let slot = match (self.first, self.last) {
            (Some(first), Some(last)) => {
                let slot = self.attach_between(last, first, value);
                self.first = Some(slot);
                slot
            }
            _ => self.attach_sole(value),
        };
        self.validate();
        self.arena.handle(slot)
    }

    /// Adds an element as the new last element of the ring, and returns its
    /// handle.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.add_last(1);
    /// ring.add_last(2);
    /// assert_eq!(ring.last(), Some(&2));
    /// ```
    pub fn add_last(&mut self, value: T) -> Handle {
        let slot = match (self.first, self.last) {
            (Some(first), Some(last)) => {
                let slot = self.attach_between(last, first, value);
                self.last = Some(slot);
                slot
            }
            _ => self.attach_sole(value),
        };
        self.validate();
        self.arena.handle(slot)
    }

    /// Inserts an element so that it ends up at position `index`.
    ///
    /// `index == len` appends, like [`Ring::add_last`].
    ///
    /// # Errors
    ///
    /// [`RingError::OutOfRange`] if `index > len`; the ring is left unchanged.
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
    ///
    /// ring.insert_at(2, 4).unwrap();
    /// ring.insert_at(4, 5).unwrap();
    /// assert!(ring.insert_at(9, 6).is_err());
    ///
    /// assert_eq!(Vec::from_iter(ring), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<Handle> {
        if !self.is_position_index(index) {
            return Err(self.out_of_range(index));
        }
        if index == self.size {
            return Ok(self.add_last(value));
        }
        let successor = self.slot_at(index).ok_or_else(|| self.out_of_range(index))?;
        let predecessor = self.arena.node(successor).backward;
        let slot = self.attach_between(predecessor, successor, value);
        if index == 0 {
            self.first = Some(slot);
        }
        self.validate();
        Ok(self.arena.handle(slot))
    }

    /// Alias of [`Ring::add_first`], for using the ring as a stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push(1);
    /// ring.push(2);
    /// assert_eq!(ring.pop(), Ok(2));
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) -> Handle {
        self.add_first(value)
    }

    /// Removes the first element and returns it.
    ///
    /// # Errors
    ///
    /// [`RingError::Empty`] if the ring is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Ring, RingError};
    ///
    /// let mut ring = Ring::new();
    /// assert_eq!(ring.remove_first(), Err(RingError::Empty));
    ///
    /// ring.add_first(1);
    /// ring.add_first(3);
    /// assert_eq!(ring.remove_first(), Ok(3));
    /// assert_eq!(ring.remove_first(), Ok(1));
    /// ```
    pub fn remove_first(&mut self) -> Result<T> {
        let first = self.first.ok_or(RingError::Empty)?;
        let value = self.detach(first);
        self.validate();
        Ok(value)
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// [`RingError::Empty`] if the ring is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Ring, RingError};
    ///
    /// let mut ring = Ring::new();
    /// assert_eq!(ring.remove_last(), Err(RingError::Empty));
    /// ring.add_last(1);
    /// ring.add_last(3);
    /// assert_eq!(ring.remove_last(), Ok(3));
    /// ```
    pub fn remove_last(&mut self) -> Result<T> {
        let last = self.last.ok_or(RingError::Empty)?;
        let value = self.detach(last);
        self.validate();
        Ok(value)
    }

    /// Removes the element at position `index` and returns it.
    ///
    /// Unlike [`Ring::insert_at`], `index == len` is rejected: there is no
    /// element at that position.
    ///
    /// # Errors
    ///
    /// [`RingError::OutOfRange`] if `index >= len`; the ring is left
    /// unchanged.
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
    /// let mut ring = Ring::from_iter([3, 2, 1]);
    ///
    /// assert_eq!(ring.remove_at(1), Ok(2));
    /// assert!(ring.remove_at(2).is_err());
    /// assert_eq!(ring.remove_at(0), Ok(3));
    /// assert_eq!(ring.remove_at(0), Ok(1));
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let slot = self.slot_at(index).ok_or_else(|| self.out_of_range(index))?;
        let value = self.detach(slot);
        self.validate();
        Ok(value)
    }

    /// Alias of [`Ring::remove_first`], for using the ring as a stack.
    #[inline]
    pub fn pop(&mut self) -> Result<T> {
        self.remove_first()
    }

    /// The handle of the node at position `index`.
    ///
    /// # Errors
    ///
    /// [`RingError::OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let ring = Ring::from_iter(['a', 'b', 'c']);
    /// let handle = ring.get_at(1).unwrap();
    /// assert_eq!(ring.content(handle), Ok(&'b'));
    /// assert!(ring.get_at(3).is_err());
    /// ```
    pub fn get_at(&self, index: usize) -> Result<Handle> {
        self.slot_at(index)
            .map(|slot| self.arena.handle(slot))
            .ok_or_else(|| self.out_of_range(index))
    }

    /// The handle of the first node, or `None` if the ring is empty.
    pub fn get_first(&self) -> Option<Handle> {
        self.first.map(|slot| self.arena.handle(slot))
    }

    /// The handle of the last node, or `None` if the ring is empty.
    pub fn get_last(&self) -> Option<Handle> {
        self.last.map(|slot| self.arena.handle(slot))
    }

    /// Provides a reference to the first element, or `None` if the ring is
    /// empty.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.first.map(|slot| &self.arena.node(slot).content)
    }

    /// Provides a reference to the last element, or `None` if the ring is
    /// empty.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.last.map(|slot| &self.arena.node(slot).content)
    }

    /// The content of the node named by `handle`.
    ///
    /// # Errors
    ///
    /// [`RingError::StaleHandle`] if the node has been removed.
    pub fn content(&self, handle: Handle) -> Result<&T> {
        let slot = self.resolve(handle)?;
        Ok(&self.arena.node(slot).content)
    }

    /// A mutable reference to the content of the node named by `handle`.
    ///
    /// # Errors
    ///
    /// [`RingError::StaleHandle`] if the node has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    ///
    /// let mut ring = Ring::new();
    /// let handle = ring.add_last(1);
    /// *ring.content_mut(handle).unwrap() *= 5;
    /// assert_eq!(ring.first(), Some(&5));
    /// ```
    pub fn content_mut(&mut self, handle: Handle) -> Result<&mut T> {
        let slot = self.resolve(handle)?;
        Ok(&mut self.arena.node_mut(slot).content)
    }

    /// The handle of the node after the one named by `handle`. The node after
    /// the last node is the first node.
    ///
    /// # Errors
    ///
    /// [`RingError::StaleHandle`] if the node has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let ring = Ring::from_iter([1, 2]);
    /// let last = ring.get_last().unwrap();
    /// assert_eq!(ring.next(last), Ok(ring.get_first().unwrap()));
    /// ```
    pub fn next(&self, handle: Handle) -> Result<Handle> {
        let slot = self.resolve(handle)?;
        Ok(self.arena.handle(self.arena.node(slot).forward))
    }

    /// The handle of the node before the one named by `handle`. The node
    /// before the first node is the last node.
    ///
    /// # Errors
    ///
    /// [`RingError::StaleHandle`] if the node has been removed.
    pub fn previous(&self, handle: Handle) -> Result<Handle> {
        let slot = self.resolve(handle)?;
        Ok(self.arena.handle(self.arena.node(slot).backward))
    }

    /// Removes all elements from the `Ring`.
    ///
    /// Every handle issued by the ring becomes stale. The arena keeps its
    /// capacity.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.add_first(2);
    /// let handle = ring.add_first(1);
    ///
    /// ring.clear();
    /// assert!(ring.is_empty());
    /// assert_eq!(ring.first(), None);
    /// assert!(ring.content(handle).is_err());
    /// ```
    pub fn clear(&mut self) {
        log::debug!("clearing ring of size {}", self.size);
        let mut cursor = self.first;
        for _ in 0..self.size {
            if let Some(slot) = cursor {
                let node = self.arena.remove(slot);
                cursor = Some(node.forward);
            }
        }
        self.first = None;
        self.last = None;
        self.size = 0;
        self.validate();
    }

    /// Provides a forward iterator, from the first to the last element.
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
    /// ring.add_last(2);
    ///
    /// let mut iter = ring.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::Ring;
    /// use std::iter::FromIterator;
    ///
    /// let mut ring = Ring::from_iter([0, 1, 2]);
    ///
    /// for element in ring.iter_mut() {
    ///     *element += 10;
    /// }
    /// assert_eq!(Vec::from_iter(ring), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Provides a forward iterator over the handles of the nodes.
    #[inline]
    pub fn handles(&self) -> Handles<'_, T> {
        Handles::new(self)
    }
}

impl<T: Debug> Debug for Ring<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self::new()
    }
}
