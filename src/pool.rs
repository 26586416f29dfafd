//! Per-list node storage: an index arena with an intrusive free chain.
//!
//! Every list owns one [`Pool`]. Nodes live in slots of a `Vec` and are
//! addressed by [`NodeIndex`], so they never move and links carry no
//! lifetime or aliasing concerns. Releasing a node does not shrink the
//! arena; the slot is threaded onto a free chain through the node's own
//! forward link and handed back by the next [`Pool::obtain`].
//!
//! The free chain is linkage-agnostic: the [`PoolNode`] trait lets each node
//! kind describe how its forward side is read and rewritten, which is what
//! allows a whole sentinel-bounded run of live nodes to be spliced onto the
//! chain in O(1) — including xor-encoded nodes, where only the two boundary
//! fields and the old chain head change.

use std::num::NonZeroU32;
use std::ops::{Index, IndexMut};

/// Stable handle of a node slot inside a [`Pool`].
///
/// The raw value 0 is reserved for "no node", so links travel as
/// `Option<NodeIndex>` at no extra cost and the xor encoding can treat a
/// missing neighbour as 0.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct NodeIndex(NonZeroU32);

impl NodeIndex {
    pub(crate) fn raw(self) -> u32 {
        self.0.get()
    }

    fn from_position(position: usize) -> Self {
        let raw = u32::try_from(position)
            .ok()
            .and_then(|p| p.checked_add(1))
            .and_then(NonZeroU32::new)
            .expect("node pool exceeds u32::MAX slots");
        Self(raw)
    }

    fn position(self) -> usize {
        self.0.get() as usize - 1
    }
}

/// The raw bits of a link, with 0 standing for "no node".
pub(crate) fn raw(link: Option<NodeIndex>) -> u32 {
    link.map_or(0, NodeIndex::raw)
}

/// Recover a link from its raw bits.
pub(crate) fn from_raw(bits: u32) -> Option<NodeIndex> {
    NonZeroU32::new(bits).map(NodeIndex)
}

/// Linkage as seen by the pool's free chain.
///
/// The chain runs through each node's forward side. `old` arguments name the
/// neighbour previously encoded there, which nodes with direct links ignore
/// and xor nodes need in order to strip it out of their compressed field.
pub(crate) trait PoolNode {
    /// Successor on the free chain, decoded as if the node had no
    /// predecessor. Only meaningful for the chain head.
    fn pool_next(&self) -> Option<NodeIndex>;

    /// Overwrite the linkage wholesale: no predecessor, successor `next`.
    fn set_pool_next(&mut self, next: Option<NodeIndex>);

    /// Rewrite the forward side from `old` to `new`.
    fn relink_next(&mut self, old: Option<NodeIndex>, new: Option<NodeIndex>);

    /// Rewrite the backward side from `old` to `new`.
    fn relink_prev(&mut self, old: Option<NodeIndex>, new: Option<NodeIndex>);
}

/// Slot arena plus free chain. One per list, never shared; dropping it
/// destroys every node — live, pooled and sentinel — exactly once.
pub(crate) struct Pool<N> {
    slots: Vec<N>,
    free: Option<NodeIndex>,
    pooled: usize,
}

impl<N: PoolNode> Pool<N> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            pooled: 0,
        }
    }

    /// Hand out a slot holding `node`, reusing the head of the free chain
    /// when one is available.
    pub(crate) fn obtain(&mut self, node: N) -> NodeIndex {
        match self.free {
            Some(index) => {
                let next = self[index].pool_next();
                if let Some(head) = next {
                    // The new chain head must decode with a nil predecessor.
                    self[head].relink_prev(Some(index), None);
                }
                self.free = next;
                self.pooled -= 1;
                self[index] = node;
                index
            }
            None => {
                let index = NodeIndex::from_position(self.slots.len());
                self.slots.push(node);
                index
            }
        }
    }

    /// Push one released node onto the free chain. The node's element is
    /// left alone; it is dropped when the slot is reused or the pool goes
    /// away.
    pub(crate) fn release(&mut self, node: NodeIndex) {
        let old = self.free;
        self[node].set_pool_next(old);
        if let Some(head) = old {
            self[head].relink_prev(None, Some(node));
        }
        self.free = Some(node);
        self.pooled += 1;
    }

    /// Splice the live run `first..=last` onto the free chain in O(1).
    ///
    /// The run must already be internally linked; `outer_prev` and
    /// `outer_next` are the nodes that bounded it (sentinels, or nothing
    /// past a singly-linked tail). Exactly the two boundary nodes and the
    /// old chain head are rewritten.
    pub(crate) fn release_range(
        &mut self,
        first: NodeIndex,
        outer_prev: Option<NodeIndex>,
        last: NodeIndex,
        outer_next: Option<NodeIndex>,
        count: usize,
    ) {
        debug_assert!(count > 0, "cannot release an empty run");
        let old = self.free;
        self[first].relink_prev(outer_prev, None);
        self[last].relink_next(outer_next, old);
        if let Some(head) = old {
            self[head].relink_prev(None, Some(last));
        }
        self.free = Some(first);
        self.pooled += count;
    }

    /// Lifetime number of slots ever allocated: the high-water mark that
    /// node reuse keeps flat.
    #[cfg(test)]
    pub(crate) fn allocations(&self) -> usize {
        self.slots.len()
    }

    /// Nodes currently parked on the free chain.
    #[cfg(test)]
    pub(crate) fn pooled(&self) -> usize {
        self.pooled
    }
}

impl<N> Index<NodeIndex> for Pool<N> {
    type Output = N;

    fn index(&self, index: NodeIndex) -> &N {
        &self.slots[index.position()]
    }
}

impl<N> IndexMut<NodeIndex> for Pool<N> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut N {
        &mut self.slots[index.position()]
    }
}
