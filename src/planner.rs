//! Path planning over a cost map.

use derive_more::Display;
use thiserror::Error;

use crate::algorithms::astar;
use crate::algorithms::dijkstra;
use crate::algorithms::greedy;
use crate::cost::Cost;
use crate::error::Result;
use crate::grid::NodeGrid;
use crate::grid::NodeIndex;
use crate::space::Connectivity;
use crate::space::CostMap;
use crate::space::Position;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

/// The available search algorithms.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[display("Dijkstra")]
    Dijkstra,
    #[display("Greedy")]
    Greedy,
    #[display("A*")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dijkstra, Algorithm::Greedy, Algorithm::AStar];

    /// Whether the returned cost is guaranteed to be the cheapest one.
    pub fn is_optimal(&self) -> bool {
        !matches!(self, Algorithm::Greedy)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown algorithm '{0}'. Expected one of dijkstra, greedy, astar")]
pub struct UnknownAlgorithm(pub String);

impl std::str::FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "greedy" => Ok(Algorithm::Greedy),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A path found by a planner.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    /// Cells from start to goal, both included.
    pub path: Vec<Position>,
    /// Sum of the edge costs along `path`.
    pub cost: Cost,
    /// How many nodes were expanded to find it.
    pub expanded: usize,
}

impl Plan {
    pub fn start(&self) -> Option<&Position> {
        self.path.first()
    }
    pub fn goal(&self) -> Option<&Position> {
        self.path.last()
    }
    /// Number of moves.
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Plan({}, [", self.cost)?;
        for (i, p) in self.path.iter().take(MAX_ELEMENTS_DISPLAYED).enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{p}")?;
        }
        if self.path.len() > MAX_ELEMENTS_DISPLAYED {
            write!(f, " ...")?;
        }
        write!(f, "])")
    }
}

/// Walks parent links back from `goal`.
///
/// Returns the positions from the start of the search to `goal`, in that
/// order. Must only be called on a node reached by the current search.
pub fn construct_path(grid: &NodeGrid, goal: NodeIndex) -> Vec<Position> {
    let mut reversed_path = vec![grid[goal].position()];
    let mut node = goal;
    while let Some(parent) = grid[node].parent() {
        debug_assert!(node != parent);
        reversed_path.push(grid[parent].position());
        if reversed_path.len() > grid.len() {
            unreachable!("Parent links from {} form a cycle", grid[goal].position());
        }
        node = parent;
    }
    reversed_path.reverse();
    reversed_path
}

/// Plans paths with Dijkstra, Greedy Search or A* over a cost map.
///
/// The node grid is allocated once and reset after every search, so repeated
/// queries don't allocate per cell.
#[derive(Debug)]
pub struct PathPlanner<M: CostMap> {
    cost_map: M,
    node_grid: NodeGrid,
}

impl<M: CostMap> PathPlanner<M> {
    /// A planner over an 8-connected grid.
    #[must_use]
    pub fn new(cost_map: M) -> Self {
        Self::with_connectivity(cost_map, Connectivity::default())
    }

    #[must_use]
    pub fn with_connectivity(cost_map: M, connectivity: Connectivity) -> Self {
        let node_grid = NodeGrid::for_cost_map(&cost_map, connectivity);
        Self {
            cost_map,
            node_grid,
        }
    }

    pub fn cost_map(&self) -> &M {
        &self.cost_map
    }
    pub fn node_grid(&self) -> &NodeGrid {
        &self.node_grid
    }
    pub fn connectivity(&self) -> Connectivity {
        self.node_grid.connectivity()
    }
    pub fn into_cost_map(self) -> M {
        self.cost_map
    }

    /// Plans a path using the Dijkstra algorithm.
    pub fn dijkstra(&mut self, start: Position, goal: Position) -> Result<Plan> {
        self.plan(Algorithm::Dijkstra, start, goal)
    }

    /// Plans a path using greedy search.
    pub fn greedy(&mut self, start: Position, goal: Position) -> Result<Plan> {
        self.plan(Algorithm::Greedy, start, goal)
    }

    /// Plans a path using A*.
    pub fn a_star(&mut self, start: Position, goal: Position) -> Result<Plan> {
        self.plan(Algorithm::AStar, start, goal)
    }

    /// Plans a path with the given algorithm.
    ///
    /// ```
    /// use gridplan::planner::{Algorithm, PathPlanner};
    /// use gridplan::problems::grid_2d::GridCostMap;
    /// use gridplan::space::{Connectivity, Position};
    ///
    /// let map = GridCostMap::new(5, 5);
    /// let mut planner = PathPlanner::with_connectivity(map, Connectivity::Four);
    /// let plan = planner
    ///     .plan(Algorithm::AStar, Position::new(0, 0), Position::new(4, 4))
    ///     .unwrap();
    /// assert_eq!(plan.cost.get(), 8.0);
    /// assert_eq!(plan.path.len(), 9);
    /// ```
    pub fn plan(&mut self, algorithm: Algorithm, start: Position, goal: Position) -> Result<Plan> {
        let start_index = self.node_grid.get_node(&start)?;
        let goal_index = self.node_grid.get_node(&goal)?;
        debug_assert!(self.node_grid.is_pristine());

        let grid = &mut self.node_grid;
        let cost_map = &self.cost_map;
        let result = match algorithm {
            Algorithm::Dijkstra => dijkstra::search(grid, cost_map, start_index, goal_index),
            Algorithm::Greedy => greedy::search(grid, cost_map, start_index, goal_index),
            Algorithm::AStar => astar::search(grid, cost_map, start_index, goal_index),
        };
        self.node_grid.reset();

        match &result {
            Ok(plan) => log::debug!(
                "{algorithm} {start}->{goal}: cost {} over {} moves, {} expansions",
                plan.cost,
                plan.len(),
                plan.expanded
            ),
            Err(e) => log::debug!("{algorithm} {start}->{goal}: {e}"),
        }
        result
    }
}
