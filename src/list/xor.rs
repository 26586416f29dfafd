//! Xor-linked positional list.
//!
//! Each node stores the xor of its two neighbour indices in a single field,
//! so a node in isolation can name neither neighbour: whoever walks the
//! chain must already know one of them. The saved link is paid for in
//! protocol — the cursor is a `(curr, curr_prev)` pair, every move refreshes
//! both together, and every structural edit re-encodes the touched nodes
//! from their old and new neighbours.

use crate::list::{Error, List};
use crate::pool::{from_raw, raw, NodeIndex, Pool, PoolNode};

/// Node of an [`XorLinkedList`]: one element slot and the xor-compressed
/// neighbour pair.
///
/// With "no node" encoded as 0, `npx ^ raw(prev)` yields the successor and
/// `npx ^ raw(next)` the predecessor; [`XorLinkNode::neighbor`] is both
/// reads at once.
struct XorLinkNode<T> {
    npx: u32,
    element: Option<T>,
}

impl<T> XorLinkNode<T> {
    fn new(element: T, prev: Option<NodeIndex>, next: Option<NodeIndex>) -> Self {
        Self {
            npx: raw(prev) ^ raw(next),
            element: Some(element),
        }
    }

    fn sentinel() -> Self {
        Self {
            npx: 0,
            element: None,
        }
    }

    /// The neighbour on the far side of `known`.
    fn neighbor(&self, known: Option<NodeIndex>) -> Option<NodeIndex> {
        from_raw(self.npx ^ raw(known))
    }

    /// Re-encode the linkage from both neighbours.
    fn set_links(&mut self, prev: Option<NodeIndex>, next: Option<NodeIndex>) {
        self.npx = raw(prev) ^ raw(next);
    }

    /// Swap the neighbour `old` for `new`, leaving the far side untouched.
    fn replace_neighbor(&mut self, old: Option<NodeIndex>, new: Option<NodeIndex>) {
        self.npx ^= raw(old) ^ raw(new);
    }
}

impl<T> PoolNode for XorLinkNode<T> {
    /// The pool chain keeps its head decodable with a nil predecessor.
    fn pool_next(&self) -> Option<NodeIndex> {
        from_raw(self.npx)
    }
    fn set_pool_next(&mut self, next: Option<NodeIndex>) {
        self.npx = raw(next);
    }
    // Either side of the xor pair is rewritten the same way.
    fn relink_next(&mut self, old: Option<NodeIndex>, new: Option<NodeIndex>) {
        self.replace_neighbor(old, new);
    }
    fn relink_prev(&mut self, old: Option<NodeIndex>, new: Option<NodeIndex>) {
        self.replace_neighbor(old, new);
    }
}

/// Positional list over [`XorLinkNode`]s.
///
/// The contract matches the other lists exactly; the mechanism does not.
/// Because a node cannot be decoded alone, the cursor is the pair
/// `(curr, curr_prev)` — the cursor node plus the node right before it —
/// and every traversal updates both together, always computing the new
/// neighbour before overwriting the value it was derived from.
///
/// The node pool is an xor chain too: its head always decodes with a nil
/// predecessor, so `clear` splices the whole sentinel-bounded run onto the
/// pool by rewriting just three fields — the first node of the run, the
/// last, and the old pool head.
pub struct XorLinkedList<T> {
    pool: Pool<XorLinkNode<T>>,
    head: NodeIndex,
    tail: NodeIndex,
    curr: NodeIndex,
    /// Node immediately before `curr`; `None` exactly when `curr` is the
    /// head sentinel.
    curr_prev: Option<NodeIndex>,
    len: usize,
}

impl<T> XorLinkedList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        let mut pool = Pool::new();
        let head = pool.obtain(XorLinkNode::sentinel());
        let tail = pool.obtain(XorLinkNode::sentinel());
        pool[head].set_links(None, Some(tail));
        pool[tail].set_links(Some(head), None);
        Self {
            pool,
            head,
            tail,
            curr: head,
            curr_prev: None,
            len: 0,
        }
    }

    /// Node at the cursor position (possibly the tail sentinel).
    fn after_cursor(&self) -> NodeIndex {
        self.pool[self.curr]
            .neighbor(self.curr_prev)
            .expect("cursor stops before the tail sentinel")
    }

    /// Cursor pair for the one-past-end position.
    fn end_pair(&self) -> (NodeIndex, Option<NodeIndex>) {
        let before_tail = self.pool[self.tail]
            .neighbor(None)
            .expect("tail sentinel follows the head");
        let before = self.pool[before_tail].neighbor(Some(self.tail));
        (before_tail, before)
    }

    /// Advance a `(node, prev)` pair one step towards the tail.
    fn step_forward(
        &self,
        node: NodeIndex,
        prev: Option<NodeIndex>,
    ) -> (NodeIndex, Option<NodeIndex>) {
        let next = self.pool[node]
            .neighbor(prev)
            .expect("walk stays inside the sentinel-bounded chain");
        (next, Some(node))
    }

    /// Private front-to-back walk of the elements; no iterator is exposed.
    fn elements(&self) -> impl Iterator<Item = &T> + '_ {
        let mut prev = Some(self.head);
        let mut node = self.pool[self.head].neighbor(None);
        std::iter::from_fn(move || {
            let index = node.filter(|&index| index != self.tail)?;
            let slot = &self.pool[index];
            node = slot.neighbor(prev);
            prev = Some(index);
            slot.element.as_ref()
        })
    }
}

impl<T> List<T> for XorLinkedList<T> {
    fn clear(&mut self) {
        if self.len > 0 {
            let first = self.pool[self.head]
                .neighbor(None)
                .expect("head sentinel precedes the tail");
            let last = self.pool[self.tail]
                .neighbor(None)
                .expect("tail sentinel follows the head");
            self.pool
                .release_range(first, Some(self.head), last, Some(self.tail), self.len);
            self.pool[self.head].set_links(None, Some(self.tail));
            self.pool[self.tail].set_links(Some(self.head), None);
        }
        self.curr = self.head;
        self.curr_prev = None;
        self.len = 0;
    }

    fn insert(&mut self, item: T) {
        let after = self.after_cursor();
        let new = self
            .pool
            .obtain(XorLinkNode::new(item, Some(self.curr), Some(after)));
        self.pool[self.curr].replace_neighbor(Some(after), Some(new));
        self.pool[after].replace_neighbor(Some(self.curr), Some(new));
        self.len += 1;
    }

    fn append(&mut self, item: T) {
        let before = self.pool[self.tail]
            .neighbor(None)
            .expect("tail sentinel follows the head");
        let new = self
            .pool
            .obtain(XorLinkNode::new(item, Some(before), Some(self.tail)));
        self.pool[before].replace_neighbor(Some(self.tail), Some(new));
        self.pool[self.tail].replace_neighbor(Some(before), Some(new));
        self.len += 1;
    }

    fn remove(&mut self) -> Result<T, Error> {
        let target = self.after_cursor();
        if target == self.tail {
            return Err(Error::NoCurrentElement);
        }
        // Decode the far neighbour before any relinking.
        let after = self.pool[target]
            .neighbor(Some(self.curr))
            .expect("removed node precedes the tail sentinel");
        self.pool[self.curr].replace_neighbor(Some(target), Some(after));
        self.pool[after].replace_neighbor(Some(target), Some(self.curr));
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
        let (mut node, mut prev) = (self.head, None);
        let mut pos = 0;
        while node != self.curr {
            let stepped = self.step_forward(node, prev);
            node = stepped.0;
            prev = stepped.1;
            pos += 1;
        }
        pos
    }

    fn current(&self) -> Result<&T, Error> {
        let target = self.after_cursor();
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
        self.curr_prev = None;
    }

    fn move_to_end(&mut self) {
        let (curr, curr_prev) = self.end_pair();
        self.curr = curr;
        self.curr_prev = curr_prev;
    }

    fn move_to(&mut self, pos: usize) -> Result<(), Error> {
        if pos > self.len {
            return Err(Error::OutOfRange {
                pos,
                len: self.len,
            });
        }
        // Walk from whichever end is nearer, carrying the pair.
        if pos <= self.len - pos {
            let (mut node, mut prev) = (self.head, None);
            for _ in 0..pos {
                let stepped = self.step_forward(node, prev);
                node = stepped.0;
                prev = stepped.1;
            }
            self.curr = node;
            self.curr_prev = prev;
        } else {
            let (mut node, mut prev) = self.end_pair();
            for _ in 0..self.len - pos {
                let index = prev.expect("cursor away from the head has a predecessor");
                // The new predecessor comes out of the old one while the
                // current node is still the known neighbour.
                prev = self.pool[index].neighbor(Some(node));
                node = index;
            }
            self.curr = node;
            self.curr_prev = prev;
        }
        Ok(())
    }

    fn move_next(&mut self) {
        let next = self.after_cursor();
        if next != self.tail {
            self.curr_prev = Some(self.curr);
            self.curr = next;
        }
    }

    fn move_prev(&mut self) {
        if let Some(index) = self.curr_prev {
            // Decode the predecessor's own predecessor while `curr` is still
            // the known neighbour, then shift the pair back.
            self.curr_prev = self.pool[index].neighbor(Some(self.curr));
            self.curr = index;
        }
    }
}

impl_list_common!(XorLinkedList);
