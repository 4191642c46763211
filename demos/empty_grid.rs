//! Compares A*, Weighted A*, and greedy best-first search on empty grid
//! pathfinding problems, printing the statistics each engine collects.

use wayfind::grid::GridMap;
use wayfind::{grid_engine, EvalFn, Termination};

const SIZE: i32 = 64;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let engines = [
        ("A*", EvalFn::AStar),
        ("wA*(10)", EvalFn::WeightedAStar { weight: 10.0 }),
        ("GBFS", EvalFn::Greedy),
    ];

    // Corner-to-point problems of growing difficulty.
    let problems: Vec<(i32, i32)> = (1..SIZE).step_by(8).map(|d| (d, SIZE - 1 - d)).collect();

    println!(
        "{:<8} {:>10} {:>12} {:>12} {:>12} {:>10}",
        "engine", "solved", "total cost", "goal tests", "generated", "stored"
    );

    for (name, eval_fn) in engines {
        let mut solved = 0u32;
        let mut total_cost = 0.0;
        let mut goal_tests = 0u64;
        let mut generated = 0u64;
        let mut stored = 0u64;

        for &goal in &problems {
            let mut engine = grid_engine(eval_fn, GridMap::empty(SIZE, SIZE), goal);
            let (term, _) = engine.get_plan(&(0, 0));
            if term == Termination::Completed && engine.found_solution() {
                solved += 1;
                total_cost += engine.last_plan_cost();
            }
            goal_tests += engine.goal_test_count();
            generated += engine.state_gen_count();
            stored += engine.storage_count();
        }

        println!(
            "{:<8} {:>7}/{:<2} {:>12.1} {:>12} {:>12} {:>10}",
            name,
            solved,
            problems.len(),
            total_cost,
            goal_tests,
            generated,
            stored
        );
    }
}
