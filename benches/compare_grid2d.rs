use std::time::Duration;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use hrsw::Stopwatch;
use human_duration::human_duration;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use gridplan::planner::Algorithm;
use gridplan::planner::PathPlanner;
use gridplan::problems::grid_2d::GridCostMap;
use gridplan::problems::grid_2d::PlanningProblem;
use gridplan::space::Connectivity;

/// Maximum time willing to wait for a single benchmark instance.
/// Experiments are carried out at least 5s and at least 100 times, so running a
/// 1s instance takes 1m40s.
const MAX_INSTANCE_TIME: Duration = Duration::from_secs(1);

const SIZES: [(usize, usize, usize); 3] = [(32, 32, 12), (128, 96, 120), (256, 256, 600)];

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Grid2D Search");

    for (width, height, obstacles) in SIZES {
        for i in 0..3 {
            let instance_name = format!("{width}x{height}:{i}");
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            let Some(problem) = PlanningProblem::random(&mut rng, width, height, obstacles) else {
                log::warn!("Skipping {instance_name}, no free start and goal");
                continue;
            };

            let mut planner =
                PathPlanner::<GridCostMap>::with_connectivity(problem.cost_map, Connectivity::Eight);

            for algorithm in Algorithm::ALL {
                let mut stopwatch = Stopwatch::new_started();
                let result = planner.plan(algorithm, problem.start, problem.goal);
                stopwatch.stop();
                let elapsed = stopwatch.elapsed();
                if result.is_err() {
                    log::warn!("Skipping {instance_name}, the goal is unreachable");
                    break;
                }
                if elapsed > MAX_INSTANCE_TIME {
                    log::warn!(
                        "Skipping {instance_name} as it takes too long with {algorithm} ({})",
                        human_duration(&elapsed)
                    );
                    continue;
                }

                group.bench_with_input(
                    BenchmarkId::new(algorithm.to_string(), &instance_name),
                    &(problem.start, problem.goal),
                    |b, &(start, goal)| b.iter(|| planner.plan(algorithm, start, goal)),
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
