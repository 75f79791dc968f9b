//! Greedy best-first search.
//!
//! Nodes are ranked only by their straight-line distance to the goal and are
//! closed as soon as they are discovered. The first path found is returned,
//! which is often not the cheapest one.

use num_traits::Zero;

use crate::algorithms::edge_cost;
use crate::algorithms::heuristic;
use crate::cost::Cost;
use crate::error::PlanError;
use crate::error::Result;
use crate::frontier::Frontier;
use crate::grid::NodeGrid;
use crate::grid::NodeIndex;
use crate::planner::Plan;
use crate::planner::construct_path;
use crate::space::CostMap;

/// Greedy search from `start` to `goal`.
///
/// `g` still tracks the cost of the path being built so the returned cost is
/// the real cost of the returned path. `f` holds the heuristic.
pub fn search<M: CostMap>(
    grid: &mut NodeGrid,
    cost_map: &M,
    start: NodeIndex,
    goal: NodeIndex,
) -> Result<Plan> {
    let goal_position = grid[goal].position;
    if start == goal {
        grid[start].g = Cost::zero();
        return Ok(Plan {
            path: construct_path(grid, goal),
            cost: Cost::zero(),
            expanded: 0,
        });
    }

    let mut frontier = Frontier::with_capacity(grid.len() / 4);
    let mut expanded = 0usize;

    let h = heuristic(&grid[start].position, &goal_position);
    grid[start].g = Cost::zero();
    grid[start].f = h;
    grid[start].closed = true;
    frontier.push(h, start);

    while let Some(entry) = frontier.pop() {
        let node_index = entry.node;
        expanded += 1;

        let position = grid[node_index].position;
        let g = grid[node_index].g;
        log::trace!("Greedy expands {position} (g={g})");

        for s in grid.get_successors(cost_map, &position) {
            let neigh_index = grid.get_node(&s)?;
            if grid[neigh_index].closed {
                continue;
            }
            let c = edge_cost(cost_map, &position, &s)?;
            if !c.is_finite() {
                continue;
            }

            // Closed on discovery, this is the only parent it will get.
            let h = heuristic(&s, &goal_position);
            grid[neigh_index].reach(node_index, g + c, h);
            grid[neigh_index].closed = true;

            if neigh_index == goal {
                return Ok(Plan {
                    path: construct_path(grid, goal),
                    cost: grid[goal].g,
                    expanded,
                });
            }
            frontier.push(h, neigh_index);
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
    use crate::algorithms::test_maps::Uniform;
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
    fn straight_line() {
        let map = Uniform {
            width: 6,
            height: 1,
            cost: 2.0,
        };
        let mut grid = NodeGrid::for_cost_map(&map, Connectivity::Four);
        let start = grid.get_node(&Position::new(0, 0)).unwrap();
        let goal = grid.get_node(&Position::new(5, 0)).unwrap();

        let plan = search(&mut grid, &map, start, goal).unwrap();
        assert_eq!(plan.cost, Cost::new(10.0));
        assert_eq!(plan.path.len(), 6);
    }

    #[test]
    fn commits_to_expensive_cells() {
        // Greedy ignores what it has paid so far, so it walks straight
        // through the 9s. Dijkstra and A* go around for a cost of 6.
        let problem = PlanningProblem::try_from(indoc::indoc! {"
            .....
            S999G
            .....
        "})
        .unwrap();

        let plan = solve(&problem, Connectivity::Four).unwrap();
        assert_eq!(plan.cost, Cost::new(28.0));
        assert_eq!(
            plan.path,
            (0..5).map(|x| Position::new(x, 1)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn start_is_goal() {
        let problem = PlanningProblem::try_from("S.G").unwrap();
        let problem = PlanningProblem {
            goal: problem.start,
            ..problem
        };
        let plan = solve(&problem, Connectivity::Four).unwrap();
        assert_eq!(plan.path, vec![problem.start]);
        assert_eq!(plan.cost, Cost::zero());
    }

    #[test]
    fn walled_off() {
        let problem = PlanningProblem::try_from(indoc::indoc! {"
            S.#..
            ..#..
            ..#.G
        "})
        .unwrap();
        assert_eq!(
            solve(&problem, Connectivity::Eight),
            Err(PlanError::NoPathFound {
                start: problem.start,
                goal: problem.goal
            })
        );
    }
}
