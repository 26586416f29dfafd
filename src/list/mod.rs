//! The positional-list contract and its three implementations.
//!
//! All three lists speak the same protocol, the [`List`] trait, and differ
//! only in node layout: [`SinglyLinkedList`] links forward,
//! [`DoublyLinkedList`] links both ways, and [`XorLinkedList`] compresses
//! both neighbours of a node into one xor'd field.
//!
//! # Cursor convention
//!
//! Each list owns a single cursor, carried as the node *preceding* the
//! logical current element. A list of length *n* has *n* + 1 valid cursor
//! positions, indexed 0..=*n*; position *n* is the one-past-end state, a
//! restricted position rather than an error: the cursor may rest there, but
//! reading or removing fails with [`Error::NoCurrentElement`].
//!
//! Keeping the predecessor instead of the element itself is what makes
//! `insert` and `remove` pure forward splices even for the singly-linked
//! list, and it is the reason a permanent head sentinel exists: position 0
//! always has a real node before it.

use std::fmt;

pub use doubly::DoublyLinkedList;
pub use singly::SinglyLinkedList;
pub use xor::XorLinkedList;

/// Errors reported by the cursor protocol.
///
/// Both conditions are local to the call that produced them and leave the
/// list exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The cursor rests at the one-past-end position, where there is no
    /// element to read or remove.
    NoCurrentElement,
    /// A requested position lies outside the valid cursor range.
    OutOfRange {
        /// The rejected position.
        pos: usize,
        /// The list length at the time of the call.
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::NoCurrentElement => write!(f, "no current element"),
            Error::OutOfRange { pos, len } => {
                write!(f, "position {} out of range 0..={}", pos, len)
            }
        }
    }
}

impl std::error::Error for Error {}

/// The positional-list contract shared by all three node layouts.
///
/// Elements are reached purely through the cursor: park it somewhere with
/// the `move_*` methods, then read, insert or remove at that position. The
/// contract is identical across implementations; only the cost of the
/// backward moves differs (see [`List::move_prev`]).
///
/// # Examples
///
/// ```
/// use cursor_list::{List, SinglyLinkedList};
///
/// let mut list = SinglyLinkedList::new();
/// list.append(4);
/// list.append(2);
/// list.append(5);
///
/// list.move_to_start();
/// assert_eq!(list.current(), Ok(&4));
///
/// list.move_next();
/// assert_eq!(list.remove(), Ok(2)); // list is now [4, 5]
/// assert_eq!(list.len(), 2);
///
/// list.move_to_end();
/// assert!(list.current().is_err()); // one past the end: nothing to read
/// ```
pub trait List<T> {
    /// Discard all elements and park the cursor at the start.
    ///
    /// The whole chain is spliced onto the list's node pool in a constant
    /// number of link rewrites, so this is O(1) regardless of length and
    /// later insertions reuse the discarded nodes.
    fn clear(&mut self);

    /// Insert `item` at the cursor position; the elements from that
    /// position on shift one place towards the end.
    ///
    /// The cursor does not move, so it ends up resting before the new
    /// element and `current` reads `item` back.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{List, DoublyLinkedList};
    ///
    /// let mut list = DoublyLinkedList::from([1, 3]);
    /// list.move_to(1)?;
    /// list.insert(2);
    /// assert_eq!(list.current(), Ok(&2));
    /// assert_eq!(list, DoublyLinkedList::from([1, 2, 3]));
    /// # Ok::<(), cursor_list::Error>(())
    /// ```
    fn insert(&mut self, item: T);

    /// Append `item` at the end of the list.
    ///
    /// Unlike `insert` at the end position, `append` never touches the
    /// cursor, so an in-progress traversal is not disturbed. A cursor that
    /// was resting one past the end therefore ends up just before the new
    /// element.
    ///
    /// This operation should compute in *O*(1) time.
    fn append(&mut self, item: T);

    /// Remove the element at the cursor position and return it.
    ///
    /// Fails with [`Error::NoCurrentElement`] when the cursor is one past
    /// the end; the list is untouched in that case.
    ///
    /// This operation should compute in *O*(1) time.
    fn remove(&mut self) -> Result<T, Error>;

    /// Number of elements in the list.
    fn len(&self) -> usize;

    /// Returns `true` if the list holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current cursor position, in `0..=len`.
    ///
    /// Nodes carry no position field, so this re-walks the chain from the
    /// front: *O*(*n*).
    fn position(&self) -> usize;

    /// Read the element at the cursor position.
    ///
    /// Fails with [`Error::NoCurrentElement`] when the cursor is one past
    /// the end.
    fn current(&self) -> Result<&T, Error>;

    /// Read the element at `pos` without moving the cursor, *O*(*n*).
    ///
    /// Fails with [`Error::OutOfRange`] when `pos >= len`.
    fn get(&self, pos: usize) -> Result<&T, Error>;

    /// Park the cursor at position 0.
    fn move_to_start(&mut self);

    /// Park the cursor at the one-past-end position `len`.
    fn move_to_end(&mut self);

    /// Park the cursor at `pos`.
    ///
    /// Fails with [`Error::OutOfRange`] when `pos > len`; the cursor stays
    /// put in that case. `move_to(len)` is valid and equivalent to
    /// [`List::move_to_end`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{Error, List, XorLinkedList};
    ///
    /// let mut list = XorLinkedList::from([10, 20, 30]);
    /// list.move_to(2)?;
    /// assert_eq!(list.current(), Ok(&30));
    /// assert_eq!(list.move_to(4), Err(Error::OutOfRange { pos: 4, len: 3 }));
    /// assert_eq!(list.position(), 2); // unchanged by the failed seek
    /// # Ok::<(), cursor_list::Error>(())
    /// ```
    fn move_to(&mut self, pos: usize) -> Result<(), Error>;

    /// Advance the cursor one position; a no-op at the end.
    fn move_next(&mut self);

    /// Retreat the cursor one position; a no-op at the start.
    ///
    /// *O*(1) for the doubly- and xor-linked lists. The singly-linked list
    /// has no backward links and re-walks from the front: *O*(*n*).
    fn move_prev(&mut self);
}

/// Search `list` for the first element equal to `item`, driving the list
/// through its cursor protocol.
///
/// On a match the cursor is left parked at the matching position, which is
/// returned; otherwise the cursor walks off the end and `None` is returned.
///
/// # Examples
///
/// ```
/// use cursor_list::{find, List, DoublyLinkedList};
///
/// let mut list = DoublyLinkedList::from([4, 2, 5]);
/// assert_eq!(find(&mut list, &5), Some(2));
/// assert_eq!(list.current(), Ok(&5));
/// assert_eq!(find(&mut list, &7), None);
/// ```
pub fn find<T, L>(list: &mut L, item: &T) -> Option<usize>
where
    T: PartialEq,
    L: List<T> + ?Sized,
{
    list.move_to_start();
    for position in 0..list.len() {
        let matched = matches!(list.current(), Ok(value) if value == item);
        if matched {
            return Some(position);
        }
        list.move_next();
    }
    None
}

/// Implements the std-facing construction and comparison traits once per
/// list type, over each list's private `elements` walk. Nothing here exposes
/// iteration; the walk stays an implementation detail.
macro_rules! impl_list_common {
    ($LIST:ident) => {
        impl<T> Default for $LIST<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T: std::fmt::Debug> std::fmt::Debug for $LIST<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_list().entries(self.elements()).finish()
            }
        }

        impl<T: PartialEq> PartialEq for $LIST<T> {
            fn eq(&self, other: &Self) -> bool {
                self.len() == other.len() && self.elements().eq(other.elements())
            }
        }

        impl<T: Eq> Eq for $LIST<T> {}

        impl<T: Clone> Clone for $LIST<T> {
            /// Clones the elements and the cursor position.
            fn clone(&self) -> Self {
                let mut list: Self = self.elements().cloned().collect();
                list.move_to(self.position())
                    .expect("cursor of the source list is in bounds");
                list
            }
        }

        impl<T> Extend<T> for $LIST<T> {
            fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
                iter.into_iter().for_each(|item| self.append(item));
            }
        }

        impl<T> FromIterator<T> for $LIST<T> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                let mut list = Self::new();
                list.extend(iter);
                list
            }
        }

        impl<T, const N: usize> From<[T; N]> for $LIST<T> {
            fn from(items: [T; N]) -> Self {
                Self::from_iter(items)
            }
        }
    };
}

pub mod doubly;
pub mod singly;
pub mod xor;

// Ensure the list types stay covariant in their element type.
#[allow(dead_code)]
fn assert_covariance() {
    fn singly<'a>(x: SinglyLinkedList<&'static str>) -> SinglyLinkedList<&'a str> {
        x
    }
    fn doubly<'a>(x: DoublyLinkedList<&'static str>) -> DoublyLinkedList<&'a str> {
        x
    }
    fn xor<'a>(x: XorLinkedList<&'static str>) -> XorLinkedList<&'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn filled<L: List<i32> + Default>(items: &[i32]) -> L {
        let mut list = L::default();
        for &item in items {
            list.append(item);
        }
        list
    }

    fn contents<L: List<i32> + Default>(list: &mut L) -> Vec<i32> {
        let mut items = Vec::new();
        list.move_to_start();
        for _ in 0..list.len() {
            items.push(*list.current().expect("cursor is on an element"));
            list.move_next();
        }
        items
    }

    fn round_trip<L: List<i32> + Default>() {
        let mut list: L = filled(&[4, 2, 5, 1, 3]);
        assert_eq!(list.len(), 5);
        assert_eq!(contents(&mut list), [4, 2, 5, 1, 3]);
    }

    fn cursor_bounds<L: List<i32> + Default>() {
        let mut list: L = filled(&[1, 2, 3]);
        assert!(list.move_to(3).is_ok());
        assert_eq!(list.position(), 3);
        assert_eq!(list.current(), Err(Error::NoCurrentElement));
        assert_eq!(list.remove(), Err(Error::NoCurrentElement));
        assert_eq!(list.move_to(4), Err(Error::OutOfRange { pos: 4, len: 3 }));
        assert_eq!(list.position(), 3);
        assert_eq!(list.len(), 3);
    }

    fn insert_at_cursor<L: List<i32> + Default>() {
        let mut list: L = filled(&[1, 3]);
        list.move_to(1).unwrap();
        list.insert(2);
        assert_eq!(list.position(), 1);
        assert_eq!(list.current(), Ok(&2));
        assert_eq!(contents(&mut list), [1, 2, 3]);
    }

    fn append_leaves_the_cursor_alone<L: List<i32> + Default>() {
        let mut list: L = filled(&[1, 2]);
        list.move_to_end();
        assert_eq!(list.position(), 2);
        list.append(9);
        // The cursor did not move, so it now rests before the new element.
        assert_eq!(list.position(), 2);
        assert_eq!(list.current(), Ok(&9));
    }

    fn clear_then_reuse<L: List<i32> + Default>() {
        let mut list: L = filled(&[1, 2, 3, 4, 5]);
        list.move_to(2).unwrap();
        list.clear();
        assert_eq!(list.len(), 0);
        assert_eq!(list.position(), 0);
        assert_eq!(list.current(), Err(Error::NoCurrentElement));
        list.append(7);
        list.move_to_start();
        assert_eq!(list.current(), Ok(&7));
        assert_eq!(list.len(), 1);
        assert_eq!(contents(&mut list), [7]);
    }

    fn empty_list_edges<L: List<i32> + Default>() {
        let mut list = L::default();
        assert!(list.is_empty());
        assert_eq!(list.position(), 0);
        assert_eq!(list.current(), Err(Error::NoCurrentElement));
        assert_eq!(list.remove(), Err(Error::NoCurrentElement));
        list.move_next();
        list.move_prev();
        assert_eq!(list.position(), 0);
        assert!(list.move_to(0).is_ok());
        assert_eq!(list.move_to(1), Err(Error::OutOfRange { pos: 1, len: 0 }));
        list.move_to_end();
        assert_eq!(list.position(), 0);
        list.clear();
        assert!(list.is_empty());
    }

    fn removal_scenario<L: List<i32> + Default>() {
        let mut list: L = filled(&[4, 2, 5, 1, 3]);
        list.move_to_start();
        list.move_next();
        assert_eq!(list.remove(), Ok(2));
        assert_eq!(contents(&mut list), [4, 5, 1, 3]);
        list.append(2);
        assert_eq!(contents(&mut list), [4, 5, 1, 3, 2]);
        list.move_to(3).unwrap();
        assert_eq!(list.remove(), Ok(3));
        assert_eq!(contents(&mut list), [4, 5, 1, 2]);
        assert_eq!(list.len(), 4);
    }

    // Mirrors the historical console battery for the linked lists.
    fn interleaved_battery<L: List<i32> + Default>() {
        let mut list = L::default();
        list.clear();
        list.move_to_end();
        list.move_to_start();
        for item in [0, 1, 3, 4] {
            list.append(item);
        }
        list.move_to_end();
        list.move_prev();
        list.move_prev();
        assert_eq!(list.position(), 2);
        list.insert(2);
        list.insert(3);
        for item in [5, 6, 8] {
            list.append(item);
        }
        list.move_to(8).unwrap();
        list.insert(7);
        list.move_to_start();
        list.move_next();
        list.move_next();
        assert_eq!(list.remove(), Ok(3));
        assert_eq!(list.len(), 9);
        assert_eq!(list.position(), 2);
        assert_eq!(list.current(), Ok(&2));
        assert_eq!(list.get(7), Ok(&7));
        assert_eq!(find(&mut list, &5), Some(5));
        assert_eq!(contents(&mut list), [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    fn find_and_get<L: List<i32> + Default>() {
        let mut list: L = filled(&[10, 20, 30]);
        assert_eq!(find(&mut list, &10), Some(0));
        assert_eq!(find(&mut list, &30), Some(2));
        assert_eq!(list.position(), 2);
        assert_eq!(find(&mut list, &99), None);
        assert_eq!(list.position(), 3);
        assert_eq!(list.get(0), Ok(&10));
        assert_eq!(list.get(2), Ok(&30));
        assert_eq!(list.get(3), Err(Error::OutOfRange { pos: 3, len: 3 }));
    }

    fn std_trait_impls<L>()
    where
        L: List<i32>
            + Default
            + Clone
            + FromIterator<i32>
            + Extend<i32>
            + PartialEq
            + std::fmt::Debug,
    {
        let mut list: L = [1, 2, 3].into_iter().collect();
        assert_eq!(format!("{:?}", list), "[1, 2, 3]");

        let same: L = [1, 2, 3].into_iter().collect();
        let different: L = [1, 2, 4].into_iter().collect();
        assert_eq!(list, same);
        assert_ne!(list, different);

        list.move_to(1).unwrap();
        let copy = list.clone();
        assert_eq!(copy, list);
        assert_eq!(copy.position(), 1);

        list.extend([4, 5]);
        assert_eq!(contents(&mut list), [1, 2, 3, 4, 5]);
    }

    struct DropChecker {
        value: i32,
        dropped: Rc<RefCell<Vec<i32>>>,
    }

    impl Drop for DropChecker {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.value);
        }
    }

    fn drop_accounting<L: List<DropChecker> + Default>() {
        let dropped = Rc::new(RefCell::new(Vec::new()));
        let checker = |value| DropChecker {
            value,
            dropped: Rc::clone(&dropped),
        };

        let mut list = L::default();
        list.append(checker(1));
        list.append(checker(2));
        list.append(checker(3));

        // `remove` moves the element out to the caller.
        list.move_to_start();
        drop(list.remove().unwrap());
        assert_eq!(*dropped.borrow(), [1]);

        // `clear` parks the nodes in the pool; their elements live on.
        list.clear();
        assert_eq!(*dropped.borrow(), [1]);

        // Reusing a slot drops the element it still held.
        list.append(checker(4));
        assert_eq!(*dropped.borrow(), [1, 2]);

        // Dropping the list drops everything left, live or pooled, once.
        drop(list);
        assert_eq!(dropped.borrow().len(), 4);
        let mut remaining = dropped.borrow()[2..].to_vec();
        remaining.sort_unstable();
        assert_eq!(remaining, [3, 4]);
    }

    macro_rules! contract_tests {
        ($name:ident, $LIST:ident) => {
            mod $name {
                use crate::list::$LIST;

                #[test]
                fn round_trip() {
                    super::round_trip::<$LIST<i32>>();
                }

                #[test]
                fn cursor_bounds() {
                    super::cursor_bounds::<$LIST<i32>>();
                }

                #[test]
                fn insert_at_cursor() {
                    super::insert_at_cursor::<$LIST<i32>>();
                }

                #[test]
                fn append_leaves_the_cursor_alone() {
                    super::append_leaves_the_cursor_alone::<$LIST<i32>>();
                }

                #[test]
                fn clear_then_reuse() {
                    super::clear_then_reuse::<$LIST<i32>>();
                }

                #[test]
                fn empty_list_edges() {
                    super::empty_list_edges::<$LIST<i32>>();
                }

                #[test]
                fn removal_scenario() {
                    super::removal_scenario::<$LIST<i32>>();
                }

                #[test]
                fn interleaved_battery() {
                    super::interleaved_battery::<$LIST<i32>>();
                }

                #[test]
                fn find_and_get() {
                    super::find_and_get::<$LIST<i32>>();
                }

                #[test]
                fn std_trait_impls() {
                    super::std_trait_impls::<$LIST<i32>>();
                }

                #[test]
                fn drop_accounting() {
                    super::drop_accounting::<$LIST<super::DropChecker>>();
                }
            }
        };
    }

    contract_tests!(singly, SinglyLinkedList);
    contract_tests!(doubly, DoublyLinkedList);
    contract_tests!(xor, XorLinkedList);
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::{DoublyLinkedList, Error, List, SinglyLinkedList, XorLinkedList};

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Append(i32),
        Remove,
        Clear,
        MoveToStart,
        MoveToEnd,
        MoveTo(usize),
        MoveNext,
        MovePrev,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<i32>().prop_map(Op::Insert),
            any::<i32>().prop_map(Op::Append),
            Just(Op::Remove),
            Just(Op::Clear),
            Just(Op::MoveToStart),
            Just(Op::MoveToEnd),
            (0usize..40).prop_map(Op::MoveTo),
            Just(Op::MoveNext),
            Just(Op::MovePrev),
        ]
    }

    /// Reference model: the elements plus the cursor position.
    struct Model {
        items: Vec<i32>,
        pos: usize,
    }

    impl Model {
        fn new() -> Self {
            Self {
                items: Vec::new(),
                pos: 0,
            }
        }

        fn apply<L: List<i32>>(&mut self, list: &mut L, op: &Op) {
            match *op {
                Op::Insert(item) => {
                    list.insert(item);
                    self.items.insert(self.pos, item);
                }
                Op::Append(item) => {
                    list.append(item);
                    self.items.push(item);
                }
                Op::Remove => {
                    if self.pos == self.items.len() {
                        assert_eq!(list.remove(), Err(Error::NoCurrentElement));
                    } else {
                        assert_eq!(list.remove(), Ok(self.items.remove(self.pos)));
                    }
                }
                Op::Clear => {
                    list.clear();
                    self.items.clear();
                    self.pos = 0;
                }
                Op::MoveToStart => {
                    list.move_to_start();
                    self.pos = 0;
                }
                Op::MoveToEnd => {
                    list.move_to_end();
                    self.pos = self.items.len();
                }
                Op::MoveTo(pos) => {
                    if pos > self.items.len() {
                        let len = self.items.len();
                        assert_eq!(list.move_to(pos), Err(Error::OutOfRange { pos, len }));
                    } else {
                        assert_eq!(list.move_to(pos), Ok(()));
                        self.pos = pos;
                    }
                }
                Op::MoveNext => {
                    list.move_next();
                    if self.pos < self.items.len() {
                        self.pos += 1;
                    }
                }
                Op::MovePrev => {
                    list.move_prev();
                    self.pos = self.pos.saturating_sub(1);
                }
            }
        }

        fn check<L: List<i32>>(&self, list: &L) {
            assert_eq!(list.len(), self.items.len());
            assert_eq!(list.position(), self.pos);
            if self.pos == self.items.len() {
                assert_eq!(list.current(), Err(Error::NoCurrentElement));
            } else {
                assert_eq!(list.current(), Ok(&self.items[self.pos]));
            }
        }
    }

    fn run_ops<L: List<i32> + Default>(ops: &[Op]) {
        let mut list = L::default();
        let mut model = Model::new();
        for op in ops {
            model.apply(&mut list, op);
            model.check(&list);
        }
    }

    proptest! {
        #[test]
        fn singly_matches_the_model(ops in proptest::collection::vec(op(), 0..60)) {
            run_ops::<SinglyLinkedList<i32>>(&ops);
        }

        #[test]
        fn doubly_matches_the_model(ops in proptest::collection::vec(op(), 0..60)) {
            run_ops::<DoublyLinkedList<i32>>(&ops);
        }

        #[test]
        fn xor_matches_the_model(ops in proptest::collection::vec(op(), 0..60)) {
            run_ops::<XorLinkedList<i32>>(&ops);
        }
    }
}
