//! The open list shared by all planners.

use crate::cost::Cost;
use crate::data_structures::min_heap::MinHeap;
use crate::grid::NodeIndex;

/// The ranking tuple for frontier entries.
///
/// We prefer lower keys, and tie break for older entries so expansion order
/// doesn't depend on heap internals.
///
/// ```
/// use gridplan::cost::Cost;
/// use gridplan::frontier::Rank;
///
/// assert!(Rank::new(Cost::new(1.0), 9) < Rank::new(Cost::new(2.0), 0));
/// assert!(Rank::new(Cost::new(1.0), 0) < Rank::new(Cost::new(1.0), 1));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rank {
    key: Cost,
    sequence: u64,
}

impl Rank {
    pub fn new(key: Cost, sequence: u64) -> Self {
        Self { key, sequence }
    }
    pub fn key(&self) -> Cost {
        self.key
    }
}

/// A heap entry.
///
/// Entries carry just ranking information and an index to the actual node in
/// the `NodeGrid`. The same node may be queued several times, entries for
/// closed nodes are stale and skipped on pop.
#[derive(Copy, Clone, Debug)]
pub struct FrontierEntry {
    /// The rank of this entry that defines how good it is.
    pub rank: Rank,
    /// The node this entry refers to. Ignored when ranking.
    pub node: NodeIndex,
}

/// PartialEq is forwarded to self.rank's PartialEq
impl PartialEq for FrontierEntry {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl Eq for FrontierEntry {}

/// PartialOrd is forwarded to Ord::cmp
impl PartialOrd for FrontierEntry {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
/// Ord is forwarded to self.rank's Ord
impl Ord for FrontierEntry {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// Min-priority queue of nodes keyed by cost.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: MinHeap<FrontierEntry>,
    next_sequence: u64,
}

impl Frontier {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: MinHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, key: Cost, node: NodeIndex) {
        let rank = Rank::new(key, self.next_sequence);
        self.next_sequence += 1;
        self.heap.push(FrontierEntry { rank, node });
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::NodeGrid;
    use crate::space::Connectivity;
    use crate::space::Position;

    #[test]
    fn ties_pop_in_insertion_order() {
        let grid = NodeGrid::new(4, 1, Connectivity::Four);
        let nodes: Vec<NodeIndex> = (0..4)
            .map(|x| grid.get_node(&Position::new(x, 0)).unwrap())
            .collect();

        let mut frontier = Frontier::with_capacity(4);
        frontier.push(Cost::new(2.0), nodes[0]);
        frontier.push(Cost::new(1.0), nodes[1]);
        frontier.push(Cost::new(2.0), nodes[2]);
        frontier.push(Cost::new(1.0), nodes[3]);
        assert_eq!(frontier.len(), 4);

        let order: Vec<NodeIndex> = std::iter::from_fn(|| frontier.pop())
            .map(|e| e.node)
            .collect();
        assert_eq!(order, vec![nodes[1], nodes[3], nodes[0], nodes[2]]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn infinite_keys_go_last() {
        let grid = NodeGrid::new(2, 1, Connectivity::Four);
        let a = grid.get_node(&Position::new(0, 0)).unwrap();
        let b = grid.get_node(&Position::new(1, 0)).unwrap();

        let mut frontier = Frontier::default();
        frontier.push(Cost::infinity(), a);
        frontier.push(Cost::new(1e9), b);
        assert_eq!(frontier.pop().map(|e| e.node), Some(b));
        assert_eq!(frontier.pop().map(|e| e.rank.key()), Some(Cost::infinity()));
    }
}
