//! Solves a fixed batch of 3x3 sliding-tile instances under the unit and
//! heavy cost models, printing per-instance search statistics.

use wayfind::tiles::{TileCost, TileState};
use wayfind::{tile_engine, EvalFn, Termination};

/// 8-puzzle instances of increasing difficulty. All have even inversion
/// parity, so each is solvable to the canonical goal.
const INSTANCES: &[[u8; 9]] = &[
    [1, 0, 2, 3, 4, 5, 6, 7, 8],
    [3, 1, 2, 6, 4, 5, 7, 8, 0],
    [1, 2, 5, 3, 4, 8, 6, 0, 7],
    [5, 1, 2, 4, 8, 0, 3, 6, 7],
    [8, 6, 7, 2, 5, 4, 3, 0, 1],
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    for (cost_name, cost) in [("unit", TileCost::Unit), ("heavy", TileCost::Heavy)] {
        println!("-- {cost_name} costs --");
        println!(
            "{:<28} {:>10} {:>12} {:>12}",
            "instance", "cost", "goal tests", "stored"
        );

        let mut engine = tile_engine(EvalFn::AStar, 3, 3, cost);
        for permutation in INSTANCES {
            let state = TileState::new(permutation.to_vec(), 3, 3)
                .expect("instance is not a valid permutation");

            let (term, _) = engine.get_plan(&state);
            match term {
                Termination::Completed if engine.found_solution() => println!(
                    "{:<28} {:>10.3} {:>12} {:>12}",
                    state.to_string(),
                    engine.last_plan_cost(),
                    engine.goal_test_count(),
                    engine.storage_count()
                ),
                _ => println!("{:<28} {:>10}", state.to_string(), "unsolved"),
            }
        }
        println!();
    }
}
