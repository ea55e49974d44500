use std::fmt;
use std::ptr::NonNull;

/// An opaque reference to a node of a [`Ring`](crate::Ring).
///
/// A handle is a slot index paired with the generation of that slot at the
/// time the node was created. Removing the node bumps the generation, so the
/// ring can tell a handle to a removed node apart from a handle to whatever
/// node later reuses the slot.
///
/// Handles are only meaningful for the ring that issued them (or a clone of
/// it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: usize,
    generation: u32,
}

impl Handle {
    pub(crate) fn new(slot: usize, generation: u32) -> Self {
        Self { slot, generation }
    }

    pub(crate) fn slot(self) -> usize {
        self.slot
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.slot, self.generation)
    }
}

/// A live node: its content and the slots of its two neighbors.
#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) forward: usize,
    pub(crate) backward: usize,
    pub(crate) content: T,
}

#[derive(Clone)]
enum Entry<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

#[derive(Clone)]
struct Slot<T> {
    generation: u32,
    entry: Entry<T>,
}

/// Dense storage of nodes, with vacated slots kept on an intrusive free list.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Option<usize>,
}

impl<T> Arena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Store the node built by `build`, which receives the slot the node
    /// will occupy, and return that slot.
    pub(crate) fn insert_with<F>(&mut self, build: F) -> usize
    where
        F: FnOnce(usize) -> Node<T>,
    {
        match self.free {
            Some(slot) => {
                let node = build(slot);
                let entry = &mut self.slots[slot].entry;
                self.free = match entry {
                    Entry::Vacant { next_free } => *next_free,
                    Entry::Occupied(_) => unreachable!("free list points at occupied slot {}", slot),
                };
                *entry = Entry::Occupied(node);
                slot
            }
            None => {
                let slot = self.slots.len();
                let node = build(slot);
                self.slots.push(Slot {
                    generation: 0,
                    entry: Entry::Occupied(node),
                });
                slot
            }
        }
    }

    pub(crate) fn insert(&mut self, node: Node<T>) -> usize {
        self.insert_with(|_| node)
    }

    /// Vacate `slot` and return its node. The generation of the slot is
    /// bumped, which invalidates every handle issued for it.
    pub(crate) fn remove(&mut self, slot: usize) -> Node<T> {
        let free = self.free;
        let record = &mut self.slots[slot];
        match std::mem::replace(&mut record.entry, Entry::Vacant { next_free: free }) {
            Entry::Occupied(node) => {
                record.generation = record.generation.wrapping_add(1);
                self.free = Some(slot);
                node
            }
            Entry::Vacant { .. } => unreachable!("removing vacant slot {}", slot),
        }
    }

    pub(crate) fn node(&self, slot: usize) -> &Node<T> {
        match &self.slots[slot].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("link to vacant slot {}", slot),
        }
    }

    pub(crate) fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        match &mut self.slots[slot].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("link to vacant slot {}", slot),
        }
    }

    /// Mutable access to two distinct nodes at once.
    pub(crate) fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Node<T>, &mut Node<T>) {
        assert_ne!(a, b, "cannot borrow slot {} twice", a);
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(high);
        let (low_node, high_node) = match (&mut head[low].entry, &mut tail[0].entry) {
            (Entry::Occupied(l), Entry::Occupied(h)) => (l, h),
            _ => unreachable!("link to vacant slot {} or {}", low, high),
        };
        if a < b {
            (low_node, high_node)
        } else {
            (high_node, low_node)
        }
    }

    /// The handle currently naming the node stored at `slot`.
    pub(crate) fn handle(&self, slot: usize) -> Handle {
        Handle::new(slot, self.slots[slot].generation)
    }

    /// The slot named by `handle`, if it still holds the node the handle
    /// was issued for.
    pub(crate) fn resolve(&self, handle: Handle) -> Option<usize> {
        let slot = self.slots.get(handle.slot())?;
        match slot.entry {
            Entry::Occupied(_) if slot.generation == handle.generation => Some(handle.slot()),
            _ => None,
        }
    }

    pub(crate) fn raw(&mut self) -> RawArena<T> {
        RawArena {
            slots: NonNull::new(self.slots.as_mut_ptr()).unwrap_or_else(NonNull::dangling),
        }
    }
}

/// An unchecked view of an arena's slots, for iterators that hand out
/// disjoint mutable borrows of node contents.
///
/// Though the `RawArena` does not hold a reference, it must not outlive the
/// mutable borrow of the [`Arena`] it was created from, and the arena must
/// not grow or shrink while it is in use.
pub(crate) struct RawArena<T> {
    slots: NonNull<Slot<T>>,
}

impl<T> RawArena<T> {
    /// It is unsafe because it does not check that `slot` is in bounds, and
    /// because the caller must not create two live references to the same
    /// node.
    pub(crate) unsafe fn node_mut<'a>(&self, slot: usize) -> &'a mut Node<T> {
        match &mut (*self.slots.as_ptr().add(slot)).entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("link to vacant slot {}", slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, Node};

    fn node(content: i32) -> Node<i32> {
        Node {
            forward: 0,
            backward: 0,
            content,
        }
    }

    #[test]
    fn arena_reuses_vacated_slots() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.insert(node(1));
        let b = arena.insert(node(2));
        assert_eq!((a, b), (0, 1));

        assert_eq!(arena.remove(a).content, 1);
        let c = arena.insert(node(3));
        assert_eq!(c, a);
        assert_eq!(arena.node(c).content, 3);
        assert_eq!(arena.node(b).content, 2);
    }

    #[test]
    fn arena_free_list_is_lifo() {
        let mut arena = Arena::with_capacity(4);
        let slots: Vec<usize> = (0..4).map(|i| arena.insert(node(i))).collect();
        arena.remove(slots[1]);
        arena.remove(slots[3]);
        assert_eq!(arena.insert(node(10)), slots[3]);
        assert_eq!(arena.insert(node(11)), slots[1]);
        assert_eq!(arena.insert(node(12)), 4);
    }

    #[test]
    fn arena_handles_go_stale() {
        let mut arena = Arena::with_capacity(4);
        let slot = arena.insert(node(1));
        let handle = arena.handle(slot);
        assert_eq!(arena.resolve(handle), Some(slot));

        arena.remove(slot);
        assert_eq!(arena.resolve(handle), None);

        let reused = arena.insert(node(2));
        assert_eq!(reused, slot);
        assert_eq!(arena.resolve(handle), None);
        assert_eq!(arena.resolve(arena.handle(reused)), Some(reused));
    }

    #[test]
    fn arena_insert_with_sees_own_slot() {
        let mut arena = Arena::with_capacity(4);
        let slot = arena.insert_with(|slot| Node {
            forward: slot,
            backward: slot,
            content: 'a',
        });
        assert_eq!(arena.node(slot).forward, slot);
        assert_eq!(arena.node(slot).backward, slot);
    }

    #[test]
    fn arena_pair_mut_keeps_order() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.insert(node(1));
        let b = arena.insert(node(2));
        {
            let (x, y) = arena.pair_mut(b, a);
            assert_eq!((x.content, y.content), (2, 1));
            std::mem::swap(&mut x.content, &mut y.content);
        }
        assert_eq!(arena.node(a).content, 2);
        assert_eq!(arena.node(b).content, 1);
    }
}
