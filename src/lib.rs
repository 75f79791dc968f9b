//! Grid path planning with Dijkstra, Greedy Search and A*.
//!
//! ```
//! use gridplan::planner::PathPlanner;
//! use gridplan::problems::grid_2d::PlanningProblem;
//!
//! let problem = PlanningProblem::try_from(indoc::indoc! {"
//!     S.#..
//!     ..#..
//!     ....G
//! "})
//! .unwrap();
//! let mut planner = PathPlanner::new(problem.cost_map);
//! let plan = planner.a_star(problem.start, problem.goal).unwrap();
//! assert_eq!(plan.path.first(), Some(&problem.start));
//! assert_eq!(plan.path.last(), Some(&problem.goal));
//! ```

use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod data_structures;
pub mod frontier;

// Search space and problems
// -------------------------
pub mod cost;
pub mod error;
pub mod grid;
pub mod space;

// Problems
// --------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;
pub mod planner;
