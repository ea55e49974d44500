//! This crate provides a circular doubly-linked list, the [`Ring`], whose nodes
//! live in an arena owned by the ring.
//!
//! The node following the last element is the first element, and vice versa.
//! Adding and removing at either end takes constant time. Positional access
//! walks from whichever end is closer to the index.
//!
//! Here is a quick example showing how the ring works.
//!
//! ```
//! use circular_list::Ring;
//! use std::iter::FromIterator;
//!
//! let mut ring = Ring::from_iter([1, 2, 3, 4]);
//!
//! ring.insert_at(0, 0).unwrap(); // same as `add_first`
//! assert_eq!(ring, Ring::from_iter([0, 1, 2, 3, 4]));
//!
//! assert_eq!(ring.remove_at(3), Ok(3));
//! assert_eq!(ring, Ring::from_iter([0, 1, 2, 4]));
//!
//! ring.scroll(); // contents move one step towards the first node
//! assert_eq!(ring, Ring::from_iter([1, 2, 4, 0]));
//! ```
//!
//! # Memory Layout
//!
//! The nodes are stored in slots of a growable arena and refer to each other
//! by slot index:
//! ```text
//!          ┌──────────────────────────────────────────────────────┐
//!          ↓                                                      │
//!    ╔═══════════╗           ╔═══════════╗                  ╔═══════════╗
//!    ║  forward  ║ ────────→ ║  forward  ║ ──→ ┄┄ ────────→ ║  forward  ║ ─┘
//!    ╟───────────╢           ╟───────────╢                  ╟───────────╢
//! ┌─ ║ backward  ║ ←──────── ║ backward  ║ ←── ┄┄ ←──────── ║ backward  ║
//! │  ╟───────────╢           ╟───────────╢                  ╟───────────╢
//! │  ║ content T ║           ║ content T ║                  ║ content T ║
//! │  ╚═══════════╝           ╚═══════════╝                  ╚═══════════╝
//! │     first                                                   last ↑
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//! A slot is either occupied by a node or vacant. Vacant slots form a free
//! list and are reused by later insertions. Each slot also carries a
//! generation counter that is bumped whenever its node is removed.
//!
//! An empty ring has no `first` and no `last`. A ring with one element has a
//! single node whose `forward` and `backward` links point to itself.
//!
//! # Handles
//!
//! Nodes are exposed as [`Handle`]s, a slot index plus the generation of the
//! slot. Handles are `Copy` and do not borrow the ring; they are used with
//! [`Ring::content`], [`Ring::next`] and [`Ring::previous`] to walk the ring in
//! either direction, without ever reaching an end.
//!
//! A handle to a removed node is detected and reported as
//! [`RingError::StaleHandle`], even if the slot has been reused since.
//!
//! ```
//! use circular_list::{Ring, RingError};
//!
//! let mut ring = Ring::new();
//! let a = ring.add_last('a');
//! let b = ring.add_last('b');
//!
//! assert_eq!(ring.next(b), Ok(a)); // wraps around
//! assert_eq!(ring.previous(a), Ok(b));
//!
//! assert_eq!(ring.remove_first(), Ok('a'));
//! assert_eq!(ring.content(a), Err(RingError::StaleHandle(a)));
//! ```
//!
//! # Indices
//!
//! Insertion accepts positions `0..=len`, where `len` appends. Reading and
//! removal accept `0..len` only, since there is no element at `len`.
//!
//! # Iteration
//!
//! [`Iter`] and [`IterMut`] are double-ended iterators that walk the ring once
//! from the first to the last element (fused and non-cyclic). [`Handles`]
//! yields the handles in the same order.
//!
//! ```
//! use circular_list::Ring;
//! use std::iter::FromIterator;
//!
//! let mut ring = Ring::from_iter([1, 2, 3]);
//! let mut iter = ring.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! ring.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(ring), vec![2, 4, 6]);
//! ```
//!
//! # Features
//!
//! - `validate`: walk the whole ring after every mutation and panic if its
//!   links are inconsistent.
//!
//! [`Ring`]: crate::Ring
//! [`Handle`]: crate::Handle
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Handles`]: crate::Handles

#[doc(inline)]
pub use error::{Result, RingError};
#[doc(inline)]
pub use ring::arena::Handle;
#[doc(inline)]
pub use ring::iterator::{Handles, IntoIter, Iter, IterMut};
#[doc(inline)]
pub use ring::Ring;

pub mod error;
pub mod ring;
