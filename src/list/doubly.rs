//! Doubly-linked positional list.

use crate::list::{Error, List};
use crate::pool::{NodeIndex, Pool, PoolNode};

/// Node of a [`DoublyLinkedList`]: one element slot, a forward link and a
/// backward link. Ownership flows head to tail; `prev` is a plain back
/// reference.
struct TwoLinkNode<T> {
    prev: Option<NodeIndex>,
    next: Option<NodeIndex>,
    element: Option<T>,
}

impl<T> TwoLinkNode<T> {
    fn new(element: T, prev: Option<NodeIndex>, next: Option<NodeIndex>) -> Self {
        Self {
            prev,
            next,
            element: Some(element),
        }
    }

    fn sentinel() -> Self {
        Self {
            prev: None,
            next: None,
            element: None,
        }
    }
}

impl<T> PoolNode for TwoLinkNode<T> {
    fn pool_next(&self) -> Option<NodeIndex> {
        self.next
    }
    fn set_pool_next(&mut self, next: Option<NodeIndex>) {
        self.next = next;
        self.prev = None;
    }
    fn relink_next(&mut self, _old: Option<NodeIndex>, new: Option<NodeIndex>) {
        self.next = new;
    }
    fn relink_prev(&mut self, _old: Option<NodeIndex>, new: Option<NodeIndex>) {
        self.prev = new;
    }
}

/// Positional list over [`TwoLinkNode`]s.
///
/// Head and tail sentinels bound the chain, so every real node has genuine
/// neighbours on both sides and each structural edit touches exactly the two
/// adjacent nodes. The cursor convention matches the other lists — `curr` is
/// the node preceding the logical current element — which puts the
/// one-past-end cursor at `tail.prev`, never on the tail sentinel itself.
pub struct DoublyLinkedList<T> {
    pool: Pool<TwoLinkNode<T>>,
    head: NodeIndex,
    tail: NodeIndex,
    curr: NodeIndex,
    len: usize,
}

impl<T> DoublyLinkedList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        let mut pool = Pool::new();
        let head = pool.obtain(TwoLinkNode::sentinel());
        let tail = pool.obtain(TwoLinkNode::sentinel());
        pool[head].next = Some(tail);
        pool[tail].prev = Some(head);
        Self {
            pool,
            head,
            tail,
            curr: head,
            len: 0,
        }
    }

    fn next_node(&self, node: NodeIndex) -> NodeIndex {
        self.pool[node]
            .next
            .expect("only the tail sentinel has no successor")
    }

    fn prev_node(&self, node: NodeIndex) -> NodeIndex {
        self.pool[node]
            .prev
            .expect("only the head sentinel has no predecessor")
    }

    /// Private front-to-back walk of the elements; no iterator is exposed.
    fn elements(&self) -> impl Iterator<Item = &T> + '_ {
        let mut node = self.pool[self.head].next;
        std::iter::from_fn(move || {
            let index = node.filter(|&index| index != self.tail)?;
            let slot = &self.pool[index];
            node = slot.next;
            slot.element.as_ref()
        })
    }
}

impl<T> List<T> for DoublyLinkedList<T> {
    fn clear(&mut self) {
        if self.len > 0 {
            let first = self.next_node(self.head);
            let last = self.prev_node(self.tail);
            self.pool
                .release_range(first, Some(self.head), last, Some(self.tail), self.len);
            self.pool[self.head].next = Some(self.tail);
            self.pool[self.tail].prev = Some(self.head);
        }
        self.curr = self.head;
        self.len = 0;
    }

    fn insert(&mut self, item: T) {
        let after = self.next_node(self.curr);
        let new = self
            .pool
            .obtain(TwoLinkNode::new(item, Some(self.curr), Some(after)));
        self.pool[self.curr].next = Some(new);
        self.pool[after].prev = Some(new);
        self.len += 1;
    }

    fn append(&mut self, item: T) {
        let before = self.prev_node(self.tail);
        let new = self
            .pool
            .obtain(TwoLinkNode::new(item, Some(before), Some(self.tail)));
        self.pool[before].next = Some(new);
        self.pool[self.tail].prev = Some(new);
        self.len += 1;
    }

    fn remove(&mut self) -> Result<T, Error> {
        let target = self.next_node(self.curr);
        if target == self.tail {
            return Err(Error::NoCurrentElement);
        }
        let after = self.next_node(target);
        self.pool[self.curr].next = Some(after);
        self.pool[after].prev = Some(self.curr);
        let item = self.pool[target]
            .element
            .take()
            .expect("linked node holds an element");
        self.pool.release(target);
        self.len -= 1;
        Ok(item)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn position(&self) -> usize {
        let mut node = self.head;
        let mut pos = 0;
        while node != self.curr {
            node = self.next_node(node);
            pos += 1;
        }
        pos
    }

    fn current(&self) -> Result<&T, Error> {
        let target = self.next_node(self.curr);
        if target == self.tail {
            return Err(Error::NoCurrentElement);
        }
        Ok(self.pool[target]
            .element
            .as_ref()
            .expect("linked node holds an element"))
    }

    fn get(&self, pos: usize) -> Result<&T, Error> {
        self.elements().nth(pos).ok_or(Error::OutOfRange {
            pos,
            len: self.len,
        })
    }

    fn move_to_start(&mut self) {
        self.curr = self.head;
    }

    fn move_to_end(&mut self) {
        // One past the end is `tail.prev`, keeping the cursor-precedes
        // convention intact for `current` and `insert`.
        self.curr = self.prev_node(self.tail);
    }

    fn move_to(&mut self, pos: usize) -> Result<(), Error> {
        if pos > self.len {
            return Err(Error::OutOfRange {
                pos,
                len: self.len,
            });
        }
        // Walk from whichever end is nearer.
        if pos <= self.len - pos {
            let mut node = self.head;
            for _ in 0..pos {
                node = self.next_node(node);
            }
            self.curr = node;
        } else {
            let mut node = self.prev_node(self.tail);
            for _ in 0..self.len - pos {
                node = self.prev_node(node);
            }
            self.curr = node;
        }
        Ok(())
    }

    fn move_next(&mut self) {
        let next = self.next_node(self.curr);
        if next != self.tail {
            self.curr = next;
        }
    }

    fn move_prev(&mut self) {
        if self.curr != self.head {
            self.curr = self.prev_node(self.curr);
        }
    }
}

impl_list_common!(DoublyLinkedList);
