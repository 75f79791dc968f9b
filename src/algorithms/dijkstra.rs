//! Implementation of Dijkstra's path-finding algorithm.

use num_traits::Zero;

use crate::algorithms::edge_cost;
use crate::cost::Cost;
use crate::error::PlanError;
use crate::error::Result;
use crate::frontier::Frontier;
use crate::grid::NodeGrid;
use crate::grid::NodeIndex;
use crate::planner::Plan;
use crate::planner::construct_path;
use crate::space::CostMap;

/// Uniform-cost search from `start` to `goal`.
///
/// Nodes are ranked by their cost from the start (kept in both `g` and `f`).
/// Improved nodes are pushed again instead of re-ranked, so stale entries are
/// dropped when popped.
pub fn search<M: CostMap>(
    grid: &mut NodeGrid,
    cost_map: &M,
    start: NodeIndex,
    goal: NodeIndex,
) -> Result<Plan> {
    let mut frontier = Frontier::with_capacity(grid.len() / 4);
    let mut expanded = 0usize;

    grid[start].g = Cost::zero();
    grid[start].f = Cost::zero();
    frontier.push(Cost::zero(), start);

    while let Some(entry) = frontier.pop() {
        let node_index = entry.node;
        if grid[node_index].closed {
            continue;
        }
        grid[node_index].closed = true;
        expanded += 1;

        if node_index == goal {
            return Ok(Plan {
                path: construct_path(grid, goal),
                cost: grid[goal].g,
                expanded,
            });
        }

        let position = grid[node_index].position;
        let g = grid[node_index].g;
        log::trace!("Dijkstra expands {position} (g={g})");

        for s in grid.get_successors(cost_map, &position) {
            let neigh_index = grid.get_node(&s)?;
            if grid[neigh_index].closed {
                continue;
            }
            let c = edge_cost(cost_map, &position, &s)?;
            if !c.is_finite() {
                continue;
            }
            let new_g = g + c;
            if new_g < grid[neigh_index].g {
                // Found better path to existing node
                grid[neigh_index].reach(node_index, new_g, new_g);
                frontier.push(new_g, neigh_index);
            }
        }
    }

    Err(PlanError::NoPathFound {
        start: grid[start].position,
        goal: grid[goal].position,
    })
}
