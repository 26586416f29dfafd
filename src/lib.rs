//! This crate provides positional lists over three node layouts — singly-,
//! doubly- and xor-linked — behind one cursor contract, each backed by a
//! private node pool instead of per-node allocation.
//!
//! A positional list is driven entirely through its cursor: park it with the
//! `move_*` methods of the [`List`] trait, then read, insert or remove at
//! that position. The cursor ranges over `0..=len`, where `len` is the valid
//! one-past-end position at which reads fail with
//! [`Error::NoCurrentElement`].
//!
//! Here is a quick example showing how the lists work.
//!
//! ```
//! use cursor_list::{List, XorLinkedList};
//!
//! let mut list = XorLinkedList::from([4, 2, 5, 1, 3]);
//!
//! list.move_next(); // cursor at position 1
//! assert_eq!(list.remove(), Ok(2)); // list is [4, 5, 1, 3]
//!
//! list.append(2); // list is [4, 5, 1, 3, 2]
//! list.move_to(3)?;
//! assert_eq!(list.remove(), Ok(3)); // list is [4, 5, 1, 2]
//! assert_eq!(list.len(), 4);
//! # Ok::<(), cursor_list::Error>(())
//! ```
//!
//! # Memory layout
//!
//! Every list owns an arena of node slots addressed by stable indices, with
//! a permanent head sentinel (plus a tail sentinel for the doubly- and
//! xor-linked lists) so boundary edits need no special cases. Removed nodes
//! are not deallocated: they are threaded onto a free chain inside the same
//! arena and reused by later insertions. A singly-linked list `[a, b]` with
//! one previously removed node looks like this:
//!
//! ```text
//!           ┌──────────────┬──────────────┬──────────────┬──────────────┐
//!   slots   │ 1: sentinel  │ 2: "a"       │ 3: "b"       │ 4: (pooled)  │
//!           │    next → 2  │    next → 3  │    next → ∅  │    next → ∅  │
//!           └──────────────┴──────────────┴──────────────┴──────────────┘
//!     head = 1    tail = 3    free = 4    curr ∈ {1, 2, 3}
//! ```
//!
//! Clearing a list splices the whole live run onto the free chain in a
//! constant number of link rewrites, so `clear` is O(1) no matter how long
//! the list is — the central trick this design exists to support.
//!
//! # The three layouts
//!
//! - [`SinglyLinkedList`]: one forward link per node. Forward operations are
//!   O(1); backward motion re-walks from the head.
//! - [`DoublyLinkedList`]: forward and backward links, head and tail
//!   sentinels, O(1) backward motion.
//! - [`XorLinkedList`]: both neighbours compressed into one xor'd field per
//!   node. A node cannot be decoded alone, so the cursor is carried as a
//!   `(curr, curr_prev)` pair; see [`list::xor`] for the details.

#[doc(inline)]
pub use list::{find, DoublyLinkedList, Error, List, SinglyLinkedList, XorLinkedList};

pub mod list;

mod pool;
