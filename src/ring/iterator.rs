use crate::ring::arena::{Arena, Handle, RawArena};
use crate::ring::Ring;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;

/// The unvisited stretch `front..=back` of a ring, `remaining` nodes long.
#[derive(Clone, Copy)]
struct Span {
    front: usize,
    back: usize,
    remaining: usize,
}

impl Span {
    fn new<T>(ring: &Ring<T>) -> Self {
        Self {
            front: ring.first.unwrap_or(0),
            back: ring.last.unwrap_or(0),
            remaining: ring.size,
        }
    }

    /// Take the front slot of the span, given the arena that links it.
    fn take_front<T>(&mut self, arena: &Arena<T>) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = arena.node(slot).forward;
        }
        Some(slot)
    }

    fn take_back<T>(&mut self, arena: &Arena<T>) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = arena.node(slot).backward;
        }
        Some(slot)
    }
}

/// An iterator over the elements of a `Ring`, from `first` to `last`.
///
/// The iterator is fused and does not wrap around.
///
/// # Examples
///
/// ```compile_fail
/// use circular_list::Ring;
/// use std::iter::FromIterator;
///
/// let mut ring = Ring::from_iter([1, 2, 3]);
/// let mut iter = ring.iter();
///
/// // Won't compile, because ring is already borrowed immutably.
/// ring.add_last(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    arena: &'a Arena<T>,
    span: Span,
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            span: self.span,
        }
    }
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(ring: &'a Ring<T>) -> Self {
        Self {
            arena: &ring.arena,
            span: Span::new(ring),
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.span
            .take_front(arena)
            .map(|slot| &arena.node(slot).content)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.remaining, Some(self.span.remaining))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.span
            .take_back(arena)
            .map(|slot| &arena.node(slot).content)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `Ring`.
///
/// Though the `IterMut` does not hold a reference to the ring, it actually
/// *borrows* (mutably) from the ring, so a phantom marker of
/// `&'a mut Ring<T>` is added to protect the ring from being read.
///
/// # Examples
///
/// `Ring` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use circular_list::Ring;
/// use std::iter::FromIterator;
///
/// let mut ring = Ring::from_iter([1, 2, 3]);
/// let mut iter = ring.iter_mut();
/// println!("{:?}", ring.last());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    raw: RawArena<T>,
    span: Span,
    _marker: PhantomData<&'a mut Ring<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(ring: &'a mut Ring<T>) -> Self {
        let span = Span::new(ring);
        Self {
            raw: ring.arena.raw(),
            span,
            _marker: PhantomData,
        }
    }

    /// The slot linked from `slot` in the given direction.
    fn step(&self, slot: usize, forward: bool) -> usize {
        // SAFETY: `slot` belongs to the unvisited span and no reference to
        // its node has been handed out yet.
        let node = unsafe { self.raw.node_mut(slot) };
        if forward {
            node.forward
        } else {
            node.backward
        }
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.span.remaining == 0 {
            return None;
        }
        let slot = self.span.front;
        self.span.remaining -= 1;
        if self.span.remaining > 0 {
            self.span.front = self.step(slot, true);
        }
        // SAFETY: the ring visits `size` distinct nodes between `first` and
        // `last`, and `remaining` keeps the front and back walks from
        // meeting, so every node is yielded at most once.
        Some(unsafe { &mut self.raw.node_mut(slot).content })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.remaining, Some(self.span.remaining))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.span.remaining == 0 {
            return None;
        }
        let slot = self.span.back;
        self.span.remaining -= 1;
        if self.span.remaining > 0 {
            self.span.back = self.step(slot, false);
        }
        // SAFETY: see `IterMut::next`.
        Some(unsafe { &mut self.raw.node_mut(slot).content })
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// An iterator over the handles of the nodes of a `Ring`, from `first` to
/// `last`.
pub struct Handles<'a, T: 'a> {
    arena: &'a Arena<T>,
    span: Span,
}

impl<'a, T: 'a> Clone for Handles<'a, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            span: self.span,
        }
    }
}

impl<'a, T: 'a> Handles<'a, T> {
    pub(crate) fn new(ring: &'a Ring<T>) -> Self {
        Self {
            arena: &ring.arena,
            span: Span::new(ring),
        }
    }
}

impl<'a, T: 'a> Iterator for Handles<'a, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.span.take_front(arena).map(|slot| arena.handle(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.remaining, Some(self.span.remaining))
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Handles<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.span.take_back(arena).map(|slot| arena.handle(slot))
    }
}

impl<'a, T: 'a> ExactSizeIterator for Handles<'a, T> {}

impl<'a, T: 'a> FusedIterator for Handles<'a, T> {}

/// An owning iterator over the elements of a `Ring`.
///
/// This `struct` is created by the [`into_iter`] method on [`Ring`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: Ring::into_iter
pub struct IntoIter<T> {
    ring: Ring<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("ring", &self.ring).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.ring.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ring.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ring.remove_last().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Ring<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { ring: self }
    }
}

impl<'a, T> IntoIterator for &'a Ring<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Ring<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for Ring<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut ring = Ring::with_capacity(iter.size_hint().0);
        ring.extend(iter);
        ring
    }
}

impl<T> Extend<T> for Ring<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| {
            self.add_last(item);
        });
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for Ring<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}
