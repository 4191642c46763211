//! Runs a MovingAI scenario file, solving every instance with 8-connected
//! A* (or Weighted A*) and reporting aggregate statistics. Instances are
//! distributed over worker threads, one engine per worker.

use std::path::PathBuf;

use clap::Parser;
use rayon::prelude::*;

use wayfind::grid::scenario::read_scenario;
use wayfind::grid::GridMap;
use wayfind::{octile_grid_engine, EvalFn, Termination};

#[derive(Parser)]
struct Options {
    /// Path to a MovingAI `.scen` file; the map it names must sit beside it.
    scen: PathBuf,
    /// Weighted A* weight; plain A* when omitted.
    #[arg(long)]
    weight: Option<f64>,
    /// Goal-test limit per instance, 0 for unlimited.
    #[arg(long, default_value_t = 0)]
    goal_test_limit: u64,
}

struct InstanceResult {
    solved: bool,
    cost: f64,
    listed_optimal: f64,
    goal_tests: u64,
    generated: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = Options::parse();
    let eval_fn = match options.weight {
        Some(weight) => EvalFn::WeightedAStar { weight },
        None => EvalFn::AStar,
    };

    let scen = read_scenario(&options.scen).expect("failed to read scenario");
    let map = GridMap::load(&scen.map_path).expect("failed to read map");

    let start = std::time::Instant::now();
    let results: Vec<InstanceResult> = scen
        .problems
        .par_iter()
        .map_init(
            || octile_grid_engine(eval_fn, map.clone(), (0, 0)),
            |engine, problem| {
                engine.set_heuristic(wayfind::grid::OctileDistance::new(problem.goal));
                engine.set_goal_test(wayfind::traits::SingleGoalTest::new(problem.goal));
                engine.set_goal_test_limit(options.goal_test_limit);

                let (term, _) = engine.get_plan(&problem.start);
                InstanceResult {
                    solved: term == Termination::Completed && engine.found_solution(),
                    cost: engine.last_plan_cost(),
                    listed_optimal: problem.optimal,
                    goal_tests: engine.goal_test_count(),
                    generated: engine.state_gen_count(),
                }
            },
        )
        .collect();
    let elapsed = start.elapsed();

    let solved = results.iter().filter(|r| r.solved).count();
    let goal_tests: u64 = results.iter().map(|r| r.goal_tests).sum();
    let generated: u64 = results.iter().map(|r| r.generated).sum();
    let worst_subopt = results
        .iter()
        .filter(|r| r.solved && r.listed_optimal > 0.0)
        .map(|r| r.cost / r.listed_optimal)
        .fold(1.0f64, f64::max);

    println!("{}", scen.map_path.display());
    println!("  instances:        {}", results.len());
    println!("  solved:           {solved}");
    println!("  goal tests:       {goal_tests}");
    println!("  states generated: {generated}");
    println!("  worst cost ratio: {worst_subopt:.4}");
    println!("  wall time:        {:.2?}", elapsed);
}
