use std::path::PathBuf;

use anstream::println;
use clap::Parser;
use clap::ValueEnum;
use hrsw::Stopwatch;
use human_duration::human_duration;
use indoc::indoc;
use owo_colors::OwoColorize;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use thousands::Separable;

use gridplan::planner::Algorithm;
use gridplan::planner::PathPlanner;
use gridplan::problems::grid_2d::PlanningProblem;
use gridplan::problems::grid_2d::ProblemParseError;
use gridplan::space::Connectivity;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const DEMO_MAP: &str = indoc! {"
    S.........
    ..######..
    ..#....#..
    ..#.99.#..
    ..#.99....
    ..######..
    .........G
"};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    All,
    Dijkstra,
    Greedy,
    Astar,
}

impl AlgorithmArg {
    fn algorithms(&self) -> &'static [Algorithm] {
        match self {
            AlgorithmArg::All => &Algorithm::ALL,
            AlgorithmArg::Dijkstra => &[Algorithm::Dijkstra],
            AlgorithmArg::Greedy => &[Algorithm::Greedy],
            AlgorithmArg::Astar => &[Algorithm::AStar],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ConnectivityArg {
    Four,
    Eight,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(c: ConnectivityArg) -> Self {
        match c {
            ConnectivityArg::Four => Connectivity::Four,
            ConnectivityArg::Eight => Connectivity::Eight,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = gridplan::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Map to load, a `.png` image or a text map. Without one a random map
    /// is generated, or the built-in demo with `--demo`.
    #[arg()]
    pub map: Option<PathBuf>,

    #[arg(long, conflicts_with = "map")]
    pub demo: bool,

    #[arg(short, long, value_enum, env = "GRIDPLAN_ALGORITHM", default_value = "all")]
    algorithm: AlgorithmArg,

    #[arg(short, long, value_enum, env = "GRIDPLAN_CONNECTIVITY", default_value = "eight")]
    connectivity: ConnectivityArg,

    #[arg(long, default_value_t = 60usize)]
    pub width: usize,
    #[arg(long, default_value_t = 30usize)]
    pub height: usize,
    #[arg(long, default_value_t = 40usize)]
    pub obstacles: usize,
    #[arg(long, env = "GRIDPLAN_SEED", default_value_t = 0u64)]
    pub seed: u64,

    /// Skip drawing the paths.
    #[arg(long)]
    pub quiet: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Can't load {p:?}: {e}")]
    Load { p: PathBuf, e: ProblemParseError },
    #[error("Can't read {p:?}: {e}")]
    Read { p: PathBuf, e: std::io::Error },
    #[error("Failed to generate a {width}x{height} problem with seed {seed}")]
    Random {
        width: usize,
        height: usize,
        seed: u64,
    },
}

fn load_problem(args: &Args) -> Result<PlanningProblem, CliError> {
    if args.demo {
        return PlanningProblem::try_from(DEMO_MAP).map_err(|e| CliError::Load {
            p: PathBuf::from("<demo>"),
            e,
        });
    }
    match &args.map {
        Some(p) if p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")) => {
            PlanningProblem::try_from(p.as_path()).map_err(|e| CliError::Load { p: p.clone(), e })
        }
        Some(p) => {
            let text = std::fs::read_to_string(p).map_err(|e| CliError::Read { p: p.clone(), e })?;
            PlanningProblem::try_from(text.as_str()).map_err(|e| CliError::Load { p: p.clone(), e })
        }
        None => {
            let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
            PlanningProblem::random(&mut rng, args.width, args.height, args.obstacles).ok_or(
                CliError::Random {
                    width: args.width,
                    height: args.height,
                    seed: args.seed,
                },
            )
        }
    }
}

fn main() -> std::process::ExitCode {
    env_logger::init();
    let args = Args::parse();
    args.color.write_global();

    let problem = match load_problem(&args) {
        Ok(problem) => problem,
        Err(e) => {
            log::error!("{e}");
            println!("{}", e.red());
            return std::process::ExitCode::FAILURE;
        }
    };
    let connectivity = Connectivity::from(args.connectivity);
    println!(
        "{} {} -> {} ({connectivity})",
        "Problem".bold(),
        problem.start.blue(),
        problem.goal.green()
    );
    if !args.quiet {
        println!("{problem}");
    }

    let (start, goal) = (problem.start, problem.goal);
    let mut planner = PathPlanner::with_connectivity(problem.cost_map.clone(), connectivity);

    for &algorithm in args.algorithm.algorithms() {
        let mut stopwatch = Stopwatch::new_started();
        let result = planner.plan(algorithm, start, goal);
        stopwatch.stop();
        let elapsed = human_duration(&stopwatch.elapsed());

        match result {
            Ok(plan) => {
                println!(
                    "{:>8}: cost {:.3}, {} moves, {} expansions in {}",
                    algorithm.to_string().bold(),
                    plan.cost.get().yellow(),
                    plan.len(),
                    plan.expanded.separate_with_commas(),
                    elapsed
                );
                if !algorithm.is_optimal() {
                    log::info!("{algorithm} paths are not guaranteed to be the cheapest");
                }
                if !args.quiet {
                    println!("{}", problem.render(&plan.path));
                }
            }
            Err(e) => {
                println!("{:>8}: {} in {}", algorithm.to_string().bold(), e.red(), elapsed);
            }
        }
    }

    std::process::ExitCode::SUCCESS
}
