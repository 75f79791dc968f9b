#![no_main]

use libfuzzer_sys::fuzz_target;

use gridplan::planner::Algorithm;
use gridplan::planner::PathPlanner;
use gridplan::problems::grid_2d::PlanningProblem;
use gridplan::space::Connectivity;

// Any map that parses must plan without panicking, and every returned path
// must be a walk from start to goal.
fuzz_target!(|data: &str| {
    let Ok(problem) = PlanningProblem::try_from(data) else {
        return;
    };
    for connectivity in [Connectivity::Four, Connectivity::Eight] {
        let mut planner = PathPlanner::with_connectivity(problem.cost_map.clone(), connectivity);
        for algorithm in Algorithm::ALL {
            if let Ok(plan) = planner.plan(algorithm, problem.start, problem.goal) {
                assert_eq!(plan.start(), Some(&problem.start));
                assert_eq!(plan.goal(), Some(&problem.goal));
                assert!(plan.path.windows(2).all(|w| w[0].is_adjacent(&w[1])));
            }
            assert!(planner.node_grid().is_pristine());
        }
    }
});
