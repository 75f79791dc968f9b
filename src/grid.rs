use smallvec::SmallVec;

use crate::cost::Cost;
use crate::error::PlanError;
use crate::space::Connectivity;
use crate::space::CostMap;
use crate::space::Position;

/// Successors fit inline for both connectivities.
pub type Successors = SmallVec<[Position; 8]>;

/// A reference to a `Node` in its `NodeGrid`.
///
/// It's just the row-major offset of the cell, so it's only meaningful for the
/// grid that handed it out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex {
    index: usize,
}

impl NodeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self { index }
    }
    #[inline(always)]
    pub fn as_usize(&self) -> usize {
        self.index
    }
}

/// Search bookkeeping for a single cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) position: Position,
    /// Cost of the best known path from the start.
    pub(crate) g: Cost,
    /// The key this node was last queued with.
    pub(crate) f: Cost,
    pub(crate) closed: bool,
    pub(crate) parent: Option<NodeIndex>,
}

impl Node {
    fn new(position: Position) -> Self {
        Self {
            position,
            g: Cost::infinity(),
            f: Cost::infinity(),
            closed: false,
            parent: None,
        }
    }

    #[inline(always)]
    pub fn position(&self) -> Position {
        self.position
    }
    #[inline(always)]
    pub fn g(&self) -> Cost {
        self.g
    }
    #[inline(always)]
    pub fn f(&self) -> Cost {
        self.f
    }
    #[inline(always)]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
    #[inline(always)]
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Gives this Node a better path through a new parent.
    #[inline(always)]
    pub(crate) fn reach(&mut self, parent: NodeIndex, g: Cost, f: Cost) {
        debug_assert!(!self.closed, "Closed nodes are never re-opened");
        self.parent = Some(parent);
        self.g = g;
        self.f = f;
    }

    #[inline(always)]
    fn is_pristine(&self) -> bool {
        !self.g.is_finite() && !self.f.is_finite() && !self.closed && self.parent.is_none()
    }
}

/// All the search nodes for a cost map.
///
/// Nodes are allocated once and reused across searches, `reset` puts them
/// back to their untouched state.
#[derive(Clone, Debug)]
pub struct NodeGrid {
    width: usize,
    height: usize,
    connectivity: Connectivity,
    nodes: Vec<Node>,
}

impl NodeGrid {
    #[must_use]
    pub fn new(width: usize, height: usize, connectivity: Connectivity) -> Self {
        let mut nodes = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                nodes.push(Node::new(Position::new(x, y)));
            }
        }
        Self {
            width,
            height,
            connectivity,
            nodes,
        }
    }

    #[must_use]
    pub fn for_cost_map<M: CostMap>(cost_map: &M, connectivity: Connectivity) -> Self {
        Self::new(cost_map.width(), cost_map.height(), connectivity)
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at a position.
    ///
    /// ```
    /// use gridplan::grid::NodeGrid;
    /// use gridplan::space::{Connectivity, Position};
    ///
    /// let grid = NodeGrid::new(3, 2, Connectivity::Eight);
    /// let index = grid.get_node(&Position::new(2, 1)).unwrap();
    /// assert_eq!(grid[index].position(), Position::new(2, 1));
    /// assert!(grid.get_node(&Position::new(3, 0)).is_err());
    /// ```
    pub fn get_node(&self, position: &Position) -> Result<NodeIndex, PlanError> {
        if position.x >= self.width || position.y >= self.height {
            return Err(PlanError::OutOfBounds {
                position: *position,
                width: self.width,
                height: self.height,
            });
        }
        Ok(NodeIndex::new(position.y * self.width + position.x))
    }

    /// Cells reachable in one move from `position`.
    ///
    /// Neighbours are in-bounds and traversable in `cost_map`. Orthogonal
    /// neighbours come first (W, E, N, S), then diagonals (NW, NE, SW, SE) when
    /// 8-connected. Diagonals may cut obstacle corners; their cost is up to the
    /// cost map.
    pub fn get_successors<M: CostMap>(&self, cost_map: &M, position: &Position) -> Successors {
        let mut successors = Successors::new();
        for &(dx, dy) in self.connectivity.offsets() {
            let (Some(x), Some(y)) = (
                position.x.checked_add_signed(dx),
                position.y.checked_add_signed(dy),
            ) else {
                continue;
            };
            if x >= self.width || y >= self.height {
                continue;
            }
            let p = Position::new(x, y);
            if cost_map.is_traversable(&p) {
                successors.push(p);
            }
        }
        successors
    }

    /// Restores every node to its untouched state.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.g = Cost::infinity();
            node.f = Cost::infinity();
            node.closed = false;
            node.parent = None;
        }
        debug_assert!(self.is_pristine());
    }

    /// Whether no search state is left around.
    pub fn is_pristine(&self) -> bool {
        self.nodes.iter().all(Node::is_pristine)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}

impl std::ops::Index<NodeIndex> for NodeGrid {
    type Output = Node;

    #[inline(always)]
    #[track_caller]
    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index.index]
    }
}

impl std::ops::IndexMut<NodeIndex> for NodeGrid {
    #[inline(always)]
    #[track_caller]
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Open(usize, usize);
    impl CostMap for Open {
        fn width(&self) -> usize {
            self.0
        }
        fn height(&self) -> usize {
            self.1
        }
        fn edge_cost(&self, _from: &Position, _to: &Position) -> Cost {
            Cost::new(1.0)
        }
    }

    /// Blocks a single cell.
    #[derive(Debug)]
    struct Blocked(Position);
    impl CostMap for Blocked {
        fn width(&self) -> usize {
            3
        }
        fn height(&self) -> usize {
            3
        }
        fn edge_cost(&self, _from: &Position, _to: &Position) -> Cost {
            Cost::new(1.0)
        }
        fn is_traversable(&self, p: &Position) -> bool {
            *p != self.0
        }
    }

    #[test]
    fn nodes_are_unique() {
        let grid = NodeGrid::new(4, 3, Connectivity::Eight);
        assert_eq!(grid.len(), 12);
        for y in 0..3 {
            for x in 0..4 {
                let p = Position::new(x, y);
                let i = grid.get_node(&p).unwrap();
                assert_eq!(grid[i].position(), p);
            }
        }
    }

    #[test]
    fn out_of_bounds() {
        let grid = NodeGrid::new(4, 3, Connectivity::Eight);
        assert_eq!(
            grid.get_node(&Position::new(1, 3)),
            Err(PlanError::OutOfBounds {
                position: Position::new(1, 3),
                width: 4,
                height: 3
            })
        );
    }

    #[test]
    fn successors_corner() {
        let map = Open(3, 3);
        let four = NodeGrid::for_cost_map(&map, Connectivity::Four);
        let eight = NodeGrid::for_cost_map(&map, Connectivity::Eight);
        let corner = Position::new(0, 0);

        assert_eq!(
            four.get_successors(&map, &corner).as_slice(),
            &[Position::new(1, 0), Position::new(0, 1)]
        );
        assert_eq!(
            eight.get_successors(&map, &corner).as_slice(),
            &[Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn successors_centre() {
        let map = Open(3, 3);
        let eight = NodeGrid::for_cost_map(&map, Connectivity::Eight);
        let centre = Position::new(1, 1);
        let successors = eight.get_successors(&map, &centre);
        assert_eq!(successors.len(), 8);
        assert!(successors.iter().all(|s| s.is_adjacent(&centre)));
    }

    #[test]
    fn successors_skip_untraversable() {
        let map = Blocked(Position::new(1, 0));
        let grid = NodeGrid::for_cost_map(&map, Connectivity::Eight);
        let successors = grid.get_successors(&map, &Position::new(0, 0));
        assert!(!successors.contains(&Position::new(1, 0)));
        assert_eq!(successors.len(), 2);
    }

    #[test]
    fn reset_restores_nodes() {
        let mut grid = NodeGrid::new(2, 2, Connectivity::Four);
        assert!(grid.is_pristine());

        let a = grid.get_node(&Position::new(0, 0)).unwrap();
        let b = grid.get_node(&Position::new(1, 0)).unwrap();
        grid[a].g = Cost::new(0.0);
        grid[a].closed = true;
        grid[b].reach(a, Cost::new(1.0), Cost::new(2.0));
        assert!(!grid.is_pristine());
        assert_eq!(grid[b].parent(), Some(a));

        grid.reset();
        assert!(grid.is_pristine());
        assert_eq!(grid[b].parent(), None);
        assert!(!grid[a].is_closed());
    }
}
