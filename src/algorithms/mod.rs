//! Implementation of search algorithms.
//!
//! All of them run over a `NodeGrid` and leave it dirty, `PathPlanner` resets
//! it afterwards.

pub mod astar;
pub mod dijkstra;
pub mod greedy;

use crate::cost::Cost;
use crate::error::PlanError;
use crate::error::Result;
use crate::space::CostMap;
use crate::space::Position;

/// Fetches an edge cost, rejecting the ones that break the search guarantees.
#[inline(always)]
pub(crate) fn edge_cost<M: CostMap>(cost_map: &M, from: &Position, to: &Position) -> Result<Cost> {
    let cost = cost_map.edge_cost(from, to);
    if !cost.is_valid_edge() {
        return Err(PlanError::InvalidCost {
            from: *from,
            to: *to,
            cost,
        });
    }
    Ok(cost)
}

/// Straight-line distance to the goal.
#[inline(always)]
pub(crate) fn heuristic(p: &Position, goal: &Position) -> Cost {
    Cost::new(p.distance_to(goal))
}

/// Straight-line distance to the goal times the cheapest cost per unit of
/// distance.
///
/// Admissible and consistent as long as `min_step_cost` really is a lower
/// bound of the map. Unusable bounds fall back to `0`, which turns A* into
/// Dijkstra.
#[inline(always)]
pub(crate) fn lower_bound(p: &Position, goal: &Position, min_step_cost: f64) -> Cost {
    let scale = if min_step_cost.is_finite() && min_step_cost > 0.0 {
        min_step_cost
    } else {
        0.0
    };
    Cost::new(scale * p.distance_to(goal))
}
