//! Implementation of A*.

use num_traits::Zero;

use crate::algorithms::edge_cost;
use crate::algorithms::lower_bound;
use crate::cost::Cost;
use crate::error::PlanError;
use crate::error::Result;
use crate::frontier::Frontier;
use crate::grid::NodeGrid;
use crate::grid::NodeIndex;
use crate::planner::Plan;
use crate::planner::construct_path;
use crate::space::CostMap;

/// A* search from `start` to `goal`.
///
/// Nodes are ranked by `f = g + h` with `h` the straight-line distance to the
/// goal scaled by `CostMap::min_step_cost`. That keeps `h` consistent, so
/// closed nodes are never re-opened.
pub fn search<M: CostMap>(
    grid: &mut NodeGrid,
    cost_map: &M,
    start: NodeIndex,
    goal: NodeIndex,
) -> Result<Plan> {
    let goal_position = grid[goal].position;
    let mut frontier = Frontier::with_capacity(grid.len() / 4);
    let mut expanded = 0usize;
    let min_step_cost = cost_map.min_step_cost();

    let h = lower_bound(&grid[start].position, &goal_position, min_step_cost);
    grid[start].g = Cost::zero();
    grid[start].f = h;
    frontier.push(h, start);

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
        log::trace!("A* expands {position} (g={g}, f={})", entry.rank.key());

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
            let new_f = new_g + lower_bound(&s, &goal_position, min_step_cost);
            if new_f < grid[neigh_index].f {
                grid[neigh_index].reach(node_index, new_g, new_f);
                frontier.push(new_f, neigh_index);
            }
        }
    }

    Err(PlanError::NoPathFound {
        start: grid[start].position,
        goal: goal_position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::dijkstra;
    use crate::problems::grid_2d::PlanningProblem;
    use crate::space::Connectivity;
    use crate::space::Position;

    fn solve(problem: &PlanningProblem, connectivity: Connectivity) -> Result<Plan> {
        let mut grid = NodeGrid::for_cost_map(&problem.cost_map, connectivity);
        let start = grid.get_node(&problem.start)?;
        let goal = grid.get_node(&problem.goal)?;
        search(&mut grid, &problem.cost_map, start, goal)
    }

    #[test]
    fn goes_around_expensive_cells() {
        let problem = PlanningProblem::try_from(indoc::indoc! {"
            .....
            S999G
            .....
        "})
        .unwrap();

        let plan = solve(&problem, Connectivity::Four).unwrap();
        assert_eq!(plan.cost, Cost::new(6.0));
        assert!(plan.path.iter().all(|p| p.y != 1 || p.x == 0 || p.x == 4));
    }

    #[test]
    fn diagonal_moves_are_weighted() {
        let problem = PlanningProblem::try_from(indoc::indoc! {"
            S....
            .....
            .....
            .....
            ....G
        "})
        .unwrap();

        let plan = solve(&problem, Connectivity::Eight).unwrap();
        assert!((plan.cost.get() - 4.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
        assert_eq!(
            plan.path,
            (0..5).map(|i| Position::new(i, i)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn expands_fewer_nodes_than_dijkstra() {
        let problem = PlanningProblem::try_from(indoc::indoc! {"
            ..........
            ..........
            S........G
            ..........
            ..........
        "})
        .unwrap();

        let astar = solve(&problem, Connectivity::Eight).unwrap();

        let mut grid = NodeGrid::for_cost_map(&problem.cost_map, Connectivity::Eight);
        let start = grid.get_node(&problem.start).unwrap();
        let goal = grid.get_node(&problem.goal).unwrap();
        let dijkstra = dijkstra::search(&mut grid, &problem.cost_map, start, goal).unwrap();

        assert_eq!(astar.cost, dijkstra.cost);
        assert!(astar.expanded < dijkstra.expanded);
    }

    #[test]
    fn walled_off() {
        let problem = PlanningProblem::try_from(indoc::indoc! {"
            S..#.
            ...#.
            ...#G
        "})
        .unwrap();
        assert!(matches!(
            solve(&problem, Connectivity::Eight),
            Err(PlanError::NoPathFound { .. })
        ));
    }
}
