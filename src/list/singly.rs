//! Singly-linked positional list.

use crate::list::{Error, List};
use crate::pool::{NodeIndex, Pool, PoolNode};

/// Node of a [`SinglyLinkedList`]: one element slot and one forward link.
struct LinkNode<T> {
    next: Option<NodeIndex>,
    element: Option<T>,
}

impl<T> LinkNode<T> {
    fn new(element: T, next: Option<NodeIndex>) -> Self {
        Self {
            next,
            element: Some(element),
        }
    }

    /// A node whose element is never read.
    fn sentinel() -> Self {
        Self {
            next: None,
            element: None,
        }
    }
}

impl<T> PoolNode for LinkNode<T> {
    fn pool_next(&self) -> Option<NodeIndex> {
        self.next
    }
    fn set_pool_next(&mut self, next: Option<NodeIndex>) {
        self.next = next;
    }
    fn relink_next(&mut self, _old: Option<NodeIndex>, new: Option<NodeIndex>) {
        self.next = new;
    }
    fn relink_prev(&mut self, _old: Option<NodeIndex>, _new: Option<NodeIndex>) {}
}

/// Positional list over [`LinkNode`]s.
///
/// A permanent head sentinel makes edits at the front ordinary cases, and
/// `tail` is a plain index of the last real node (the head sentinel when the
/// list is empty) that keeps `append` O(1); forward-only traversal needs no
/// tail sentinel object. With the cursor carried as the node preceding the
/// logical current element, all forward operations are O(1), while
/// `move_prev`, `move_to` and `position` re-walk from the head.
pub struct SinglyLinkedList<T> {
    pool: Pool<LinkNode<T>>,
    head: NodeIndex,
    tail: NodeIndex,
    curr: NodeIndex,
    len: usize,
}

impl<T> SinglyLinkedList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        let mut pool = Pool::new();
        let head = pool.obtain(LinkNode::sentinel());
        Self {
            pool,
            head,
            tail: head,
            curr: head,
            len: 0,
        }
    }

    /// Successor of a node known to have one.
    fn next_node(&self, node: NodeIndex) -> NodeIndex {
        self.pool[node]
            .next
            .expect("node before the tail has a successor")
    }

    /// Private front-to-back walk of the elements; no iterator is exposed.
    fn elements(&self) -> impl Iterator<Item = &T> + '_ {
        let mut node = self.pool[self.head].next;
        std::iter::from_fn(move || {
            let index = node?;
            let slot = &self.pool[index];
            node = slot.next;
            slot.element.as_ref()
        })
    }
}

impl<T> List<T> for SinglyLinkedList<T> {
    fn clear(&mut self) {
        if self.len > 0 {
            let first = self.next_node(self.head);
            self.pool
                .release_range(first, Some(self.head), self.tail, None, self.len);
            self.pool[self.head].next = None;
        }
        self.tail = self.head;
        self.curr = self.head;
        self.len = 0;
    }

    fn insert(&mut self, item: T) {
        let node = LinkNode::new(item, self.pool[self.curr].next);
        let new = self.pool.obtain(node);
        self.pool[self.curr].next = Some(new);
        if self.curr == self.tail {
            self.tail = new;
        }
        self.len += 1;
    }

    fn append(&mut self, item: T) {
        let new = self.pool.obtain(LinkNode::new(item, None));
        self.pool[self.tail].next = Some(new);
        self.tail = new;
        self.len += 1;
    }

    fn remove(&mut self) -> Result<T, Error> {
        if self.curr == self.tail {
            return Err(Error::NoCurrentElement);
        }
        let target = self.next_node(self.curr);
        if target == self.tail {
            self.tail = self.curr;
        }
        self.pool[self.curr].next = self.pool[target].next;
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
        if self.curr == self.tail {
            return Err(Error::NoCurrentElement);
        }
        let target = self.next_node(self.curr);
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
        self.curr = self.tail;
    }

    fn move_to(&mut self, pos: usize) -> Result<(), Error> {
        if pos > self.len {
            return Err(Error::OutOfRange {
                pos,
                len: self.len,
            });
        }
        let mut node = self.head;
        for _ in 0..pos {
            node = self.next_node(node);
        }
        self.curr = node;
        Ok(())
    }

    fn move_next(&mut self) {
        if self.curr != self.tail {
            self.curr = self.next_node(self.curr);
        }
    }

    fn move_prev(&mut self) {
        if self.curr != self.head {
            // No backward links: re-walk from the head until the node whose
            // successor is the cursor.
            let mut node = self.head;
            while self.next_node(node) != self.curr {
                node = self.next_node(node);
            }
            self.curr = node;
        }
    }
}

impl_list_common!(SinglyLinkedList);
