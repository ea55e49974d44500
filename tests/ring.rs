use circular_list::{Handle, Ring, RingError};
use std::collections::HashSet;
use std::iter::FromIterator;

/// Check the linkage of `ring` through its public handles only.
fn assert_linked<T>(ring: &Ring<T>) {
    let len = ring.len();
    let (first, last) = match (ring.get_first(), ring.get_last()) {
        (None, None) => {
            assert_eq!(len, 0);
            assert!(ring.is_empty());
            return;
        }
        (Some(first), Some(last)) => (first, last),
        _ => panic!("exactly one entry point is absent"),
    };
    assert_eq!(ring.previous(first), Ok(last));
    assert_eq!(ring.next(last), Ok(first));

    let mut seen = HashSet::new();
    let mut handle = first;
    for _ in 0..len {
        assert!(seen.insert(handle));
        let next = ring.next(handle).expect("live handle");
        assert_eq!(ring.previous(next), Ok(handle));
        handle = next;
    }
    assert_eq!(handle, first);

    let mut handle = last;
    for _ in 0..len {
        handle = ring.previous(handle).expect("live handle");
    }
    assert_eq!(handle, last);
}

fn contents<T: Clone>(ring: &Ring<T>) -> Vec<T> {
    ring.iter().cloned().collect()
}

#[test]
fn push_pop_is_lifo() {
    let mut ring = Ring::new();
    ring.push(1);
    ring.push(2);
    ring.push(3);
    assert_linked(&ring);
    assert_eq!(ring.pop(), Ok(3));
    assert_eq!(ring.pop(), Ok(2));
    assert_eq!(ring.pop(), Ok(1));
    assert_eq!(ring.pop(), Err(RingError::Empty));
    assert_linked(&ring);
}

#[test]
fn add_last_remove_first_is_fifo() {
    let mut ring = Ring::new();
    ring.add_last('A');
    ring.add_last('B');
    ring.add_last('C');
    assert_eq!(ring.remove_first(), Ok('A'));
    assert_eq!(ring.remove_first(), Ok('B'));
    assert_eq!(ring.remove_first(), Ok('C'));
    assert_eq!(ring.remove_first(), Err(RingError::Empty));
}

#[test]
fn size_tracks_adds_and_removes() {
    let mut ring = Ring::new();
    let mut expected = 0;
    for i in 0..20 {
        if i % 3 == 0 {
            ring.add_first(i);
        } else {
            ring.add_last(i);
        }
        expected += 1;
        if i % 4 == 0 && ring.remove_last().is_ok() {
            expected -= 1;
        }
        if i % 7 == 0 && ring.remove_at(ring.len() / 2).is_ok() {
            expected -= 1;
        }
        assert_eq!(ring.size(), expected);
        assert_linked(&ring);
    }
}

#[test]
fn revert_twice_restores_order() {
    let mut original = Ring::from_iter(['A', 'B', 'C']);
    let mut reverted = original.revert();
    assert!(original.is_empty());
    assert_eq!(contents(&reverted), vec!['C', 'B', 'A']);
    assert_linked(&reverted);

    let restored = reverted.revert();
    assert!(reverted.is_empty());
    assert_eq!(contents(&restored), vec!['A', 'B', 'C']);
    assert_linked(&restored);
}

#[test]
fn scroll_rotates_contents_only() {
    let mut ring = Ring::from_iter(['A', 'B', 'C', 'D']);
    let handles: Vec<Handle> = ring.handles().collect();
    ring.scroll();
    assert_eq!(contents(&ring), vec!['B', 'C', 'D', 'A']);
    assert_eq!(ring.len(), 4);
    assert_eq!(ring.handles().collect::<Vec<_>>(), handles);
    let last = ring.get_last().unwrap();
    assert_eq!(ring.content(last), Ok(&'A'));
    assert_eq!(ring.content(ring.next(last).unwrap()), Ok(&'B'));
    assert_linked(&ring);
}

#[test]
fn insert_at_ends_matches_add() {
    let mut by_insert = Ring::from_iter([1, 2, 3]);
    let mut by_add = by_insert.clone();

    by_insert.insert_at(0, 0).unwrap();
    by_add.add_first(0);
    assert_eq!(by_insert, by_add);

    let len = by_insert.len();
    by_insert.insert_at(len, 4).unwrap();
    by_add.add_last(4);
    assert_eq!(by_insert, by_add);
    assert_linked(&by_insert);
}

#[test]
fn get_at_follows_insertion_order() {
    let mut ring = Ring::new();
    for i in 0..11 {
        ring.add_last(i * 10);
    }
    for i in 0..11 {
        let handle = ring.get_at(i).unwrap();
        assert_eq!(ring.content(handle), Ok(&(i * 10)));
    }
}

#[test]
fn out_of_range_leaves_ring_intact() {
    let mut ring = Ring::from_iter(0..5);
    let before: Vec<Handle> = ring.handles().collect();

    assert_eq!(
        ring.insert_at(6, 99),
        Err(RingError::OutOfRange { index: 6, size: 5 })
    );
    assert_eq!(
        ring.remove_at(5),
        Err(RingError::OutOfRange { index: 5, size: 5 })
    );
    assert_eq!(
        ring.get_at(5),
        Err(RingError::OutOfRange { index: 5, size: 5 })
    );
    assert!(ring.remove_at(usize::MAX).is_err());

    assert_eq!(ring.len(), 5);
    assert_eq!(ring.handles().collect::<Vec<_>>(), before);
    assert_linked(&ring);
}

#[test]
fn clear_always_empties() {
    for len in 0..5 {
        let mut ring = Ring::from_iter(0..len);
        let handles: Vec<Handle> = ring.handles().collect();
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.size(), 0);
        assert_linked(&ring);
        for handle in handles {
            assert_eq!(ring.content(handle), Err(RingError::StaleHandle(handle)));
        }
        ring.add_last(7);
        assert_eq!(contents(&ring), vec![7]);
    }
}

#[test]
fn stale_handle_after_slot_reuse() {
    let mut ring = Ring::from_iter(["a", "b", "c"]);
    let b = ring.get_at(1).unwrap();
    assert_eq!(ring.remove_at(1), Ok("b"));
    let d = ring.insert_at(1, "d").unwrap();
    assert_ne!(b, d);
    assert_eq!(ring.content(b), Err(RingError::StaleHandle(b)));
    assert_eq!(ring.content(d), Ok(&"d"));
    assert_eq!(contents(&ring), vec!["a", "d", "c"]);
}

#[test]
fn error_messages() {
    assert_eq!(
        RingError::OutOfRange { index: 4, size: 2 }.to_string(),
        "index 4 is out of range for a ring of size 2"
    );
    assert_eq!(RingError::Empty.to_string(), "ring is empty");
}
