//! Best-first search over a pluggable transition system, heuristic, goal
//! test, and state hash.
//!
//! One expansion loop hosts every variant; the evaluation strategy
//! ([`EvalFn`]) is the only point of variation between A*, Weighted A*, and
//! greedy best-first search.

use tracing::debug;

use crate::engine::{EngineState, SearchStats, SearchStatus, Termination};
use crate::eval::EvalFn;
use crate::fp::{fp_greater, fp_less};
use crate::node_table::NodeId;
use crate::open_closed::{OpenClosedList, StateLocation, TieBreak};
use crate::traits::{GoalTest, Heuristic, StateHash, TransitionSystem};

/// The outcome of expanding a single node.
enum ExpansionResult {
    GoalFound,
    NoSolution,
    ResourceLimit,
    EmptyOpen,
}

/// A best-first search engine.
///
/// The engine is `NotReady` until a transition system, heuristic, hash
/// function, and goal test have all been supplied; setting any of them (or
/// changing the reopening policy, tie-break mode, or weight) resets the
/// engine. Nothing persists between [`BestFirstSearch::get_plan`] calls.
pub struct BestFirstSearch<T, H, HS, G>
where
    T: TransitionSystem,
    H: Heuristic<T::State>,
    HS: StateHash<T::State>,
    G: GoalTest<T::State>,
{
    op_system: Option<T>,
    heuristic: Option<H>,
    hash_function: Option<HS>,
    goal_test: Option<G>,

    eval_fn: EvalFn,
    reopen: bool,
    tie_break: TieBreak,

    engine: EngineState<T::Action>,
    open_closed: OpenClosedList<T::State, T::Action>,
    app_actions: Vec<T::Action>,
}

impl<T, H, HS, G> BestFirstSearch<T, H, HS, G>
where
    T: TransitionSystem,
    H: Heuristic<T::State>,
    HS: StateHash<T::State>,
    G: GoalTest<T::State>,
{
    pub fn new(eval_fn: EvalFn) -> Self {
        BestFirstSearch {
            op_system: None,
            heuristic: None,
            hash_function: None,
            goal_test: None,
            eval_fn,
            reopen: true,
            tie_break: TieBreak::default(),
            engine: EngineState::new(),
            open_closed: OpenClosedList::new(TieBreak::default()),
            app_actions: vec![],
        }
    }

    /// An engine ordering open nodes by `g + h`.
    pub fn astar() -> Self {
        Self::new(EvalFn::AStar)
    }

    /// An engine ordering open nodes by `g + weight * h`, `weight >= 1`.
    #[track_caller]
    pub fn weighted_astar(weight: f64) -> Self {
        assert!(weight >= 1.0, "weighted A* requires weight >= 1");
        Self::new(EvalFn::WeightedAStar { weight })
    }

    /// An engine ordering open nodes by `h` alone.
    pub fn greedy_best_first() -> Self {
        Self::new(EvalFn::Greedy)
    }

    pub fn set_transition_system(&mut self, op_system: T) {
        self.op_system = Some(op_system);
        self.reset_engine();
    }

    pub fn set_heuristic(&mut self, heuristic: H) {
        self.heuristic = Some(heuristic);
        self.reset_engine();
    }

    pub fn set_hash_function(&mut self, hash_function: HS) {
        self.hash_function = Some(hash_function);
        self.reset_engine();
    }

    pub fn set_goal_test(&mut self, goal_test: G) {
        self.goal_test = Some(goal_test);
        self.reset_engine();
    }

    /// Whether a closed node is moved back to open when a cheaper path to it
    /// is found. On by default.
    ///
    /// With reopening disabled, the improved g-cost, evaluation, and parent
    /// link are still recorded, but the node is never re-expanded; its
    /// descendants keep their stale costs, and returned plans can be
    /// decidedly suboptimal. Useful for bounding work under inadmissible
    /// heuristics; leave enabled otherwise.
    pub fn set_reopen_policy(&mut self, reopen: bool) {
        self.reopen = reopen;
        self.reset_engine();
    }

    pub fn set_tie_break_mode(&mut self, tie_break: TieBreak) {
        self.tie_break = tie_break;
        self.reset_engine();
    }

    /// Updates the Weighted A* weight. Returns false (and changes nothing)
    /// if this engine does not use Weighted A*, a search is in progress, or
    /// `weight < 1`.
    pub fn set_weight(&mut self, weight: f64) -> bool {
        if !matches!(self.eval_fn, EvalFn::WeightedAStar { .. }) {
            return false;
        }
        if self.engine.status == SearchStatus::Active || fp_less(weight, 1.0) {
            return false;
        }
        self.eval_fn = EvalFn::WeightedAStar { weight };
        self.reset_engine();
        true
    }

    /// Caps the number of nodes stored. 0 means no limit.
    pub fn set_storage_limit(&mut self, limit: u64) {
        self.engine.storage_limit = limit;
    }

    /// Caps the number of heuristic computations. 0 means no limit.
    pub fn set_h_compute_limit(&mut self, limit: u64) {
        self.engine.h_comp_limit = limit;
    }

    /// Caps the number of successor-function calls. 0 means no limit.
    pub fn set_succ_call_limit(&mut self, limit: u64) {
        self.engine.succ_call_limit = limit;
    }

    /// Caps the number of goal tests. 0 means no limit.
    pub fn set_goal_test_limit(&mut self, limit: u64) {
        self.engine.goal_test_limit = limit;
    }

    /// Searches for a plan from `init_state`.
    ///
    /// Resets all statistics and stored nodes, then runs to completion or to
    /// the first resource limit. Returns the termination reason and the plan
    /// (empty when no solution was found).
    pub fn get_plan(&mut self, init_state: &T::State) -> (Termination, Vec<T::Action>) {
        self.reset_engine();

        if self.engine.status == SearchStatus::NotReady {
            return (Termination::EngineNotReady, vec![]);
        }

        self.engine.status = SearchStatus::Active;
        debug!(eval_fn = ?self.eval_fn, tie_break = ?self.tie_break, "search started");

        let term = self.search_for_plan(init_state);

        self.engine.status = SearchStatus::Terminated;
        debug!(
            termination = ?term,
            goal_tests = self.engine.stats.goal_tests,
            stored = self.open_closed.len(),
            "search terminated"
        );

        (term, self.engine.incumbent_plan.clone())
    }

    /// Discards all run state and recomputes readiness. Called by every
    /// setter and at the start of every [`BestFirstSearch::get_plan`].
    pub fn reset_engine(&mut self) {
        self.open_closed.clear();
        self.open_closed.set_tie_break(self.tie_break);
        let configured = self.is_configured();
        self.engine.reset(configured);
    }

    pub fn status(&self) -> SearchStatus {
        self.engine.status
    }

    /// Whether the last run recorded a goal-reaching plan.
    pub fn found_solution(&self) -> bool {
        self.engine.have_incumbent
    }

    /// The plan recorded by the last run, in execution order.
    pub fn last_plan(&self) -> &[T::Action] {
        &self.engine.incumbent_plan
    }

    /// The cost of the last recorded plan; negative if there is none.
    pub fn last_plan_cost(&self) -> f64 {
        self.engine.incumbent_cost
    }

    /// The statistics counters for the last (or current) run.
    pub fn stats(&self) -> SearchStats {
        self.engine.stats
    }

    pub fn storage_count(&self) -> u64 {
        self.engine.stats.storage
    }

    pub fn h_comp_count(&self) -> u64 {
        self.engine.stats.h_computations
    }

    pub fn succ_call_count(&self) -> u64 {
        self.engine.stats.successor_calls
    }

    pub fn goal_test_count(&self) -> u64 {
        self.engine.stats.goal_tests
    }

    pub fn unique_goal_test_count(&self) -> u64 {
        self.engine.stats.unique_goal_tests
    }

    pub fn state_gen_count(&self) -> u64 {
        self.engine.stats.state_generations
    }

    pub fn action_gen_count(&self) -> u64 {
        self.engine.stats.action_generations
    }

    pub fn reopened_count(&self) -> u64 {
        self.engine.stats.reopenings
    }

    /// Read-only view of the node storage; stays queryable after
    /// termination, including resource-limit termination.
    pub fn open_closed(&self) -> &OpenClosedList<T::State, T::Action> {
        &self.open_closed
    }

    pub fn eval_fn(&self) -> EvalFn {
        self.eval_fn
    }

    pub fn reopen_policy(&self) -> bool {
        self.reopen
    }

    pub fn tie_break_mode(&self) -> TieBreak {
        self.tie_break
    }

    fn is_configured(&self) -> bool {
        self.op_system.is_some()
            && self.heuristic.is_some()
            && self.hash_function.is_some()
            && self.goal_test.is_some()
    }

    fn search_for_plan(&mut self, init_state: &T::State) -> Termination {
        let mut search = ActiveSearch {
            ops: self.op_system.as_ref().expect("engine is ready"),
            heuristic: self.heuristic.as_mut().expect("engine is ready"),
            hash_function: self.hash_function.as_ref().expect("engine is ready"),
            goal_test: self.goal_test.as_ref().expect("engine is ready"),
            eval_fn: self.eval_fn,
            reopen: self.reopen,
            engine: &mut self.engine,
            open_closed: &mut self.open_closed,
            app_actions: &mut self.app_actions,
        };
        search.run(init_state)
    }
}

/// The borrows a running search works through. Collaborators are read-only
/// for the duration (the heuristic is `&mut` only for its own caching).
struct ActiveSearch<'a, T, H, HS, G>
where
    T: TransitionSystem,
{
    ops: &'a T,
    heuristic: &'a mut H,
    hash_function: &'a HS,
    goal_test: &'a G,
    eval_fn: EvalFn,
    reopen: bool,
    engine: &'a mut EngineState<T::Action>,
    open_closed: &'a mut OpenClosedList<T::State, T::Action>,
    app_actions: &'a mut Vec<T::Action>,
}

impl<T, H, HS, G> ActiveSearch<'_, T, H, HS, G>
where
    T: TransitionSystem,
    H: Heuristic<T::State>,
    HS: StateHash<T::State>,
    G: GoalTest<T::State>,
{
    fn run(&mut self, init_state: &T::State) -> Termination {
        self.heuristic.prepare_to_compute();
        let init_h = self.heuristic.h_value(init_state);
        self.engine.stats.h_computations += 1;

        let init_eval = self.eval_fn.eval(0.0, init_h);
        let init_hash = self.hash_function.state_hash(init_state);
        self.open_closed.add_initial(
            init_state.clone(),
            self.ops.dummy_action(),
            init_hash,
            init_h,
            init_eval,
        );
        self.engine.stats.storage += 1;

        loop {
            match self.expand_next() {
                ExpansionResult::NoSolution => {}
                ExpansionResult::GoalFound => return Termination::Completed,
                ExpansionResult::EmptyOpen => {
                    debug!("open list exhausted without reaching a goal");
                    return Termination::Completed;
                }
                ExpansionResult::ResourceLimit => return Termination::ResourceLimit,
            }
        }
    }

    /// Pops and expands one node, per the configured evaluation strategy and
    /// tie-break mode.
    fn expand_next(&mut self) -> ExpansionResult {
        if self.open_closed.is_open_empty() {
            return ExpansionResult::EmptyOpen;
        }
        let to_expand = self.open_closed.pop_best();

        if self.engine.hit_goal_test_limit() {
            return ExpansionResult::ResourceLimit;
        }
        self.engine.stats.goal_tests += 1;
        {
            let node = self.open_closed.node_mut(to_expand);
            if !node.goal_tested {
                node.goal_tested = true;
                self.engine.stats.unique_goal_tests += 1;
            }
        }

        if self.goal_test.is_goal(&self.open_closed.node(to_expand).state) {
            self.extract_solution(to_expand);
            return ExpansionResult::GoalFound;
        }

        let parent_g = self.open_closed.node(to_expand).g_cost;

        if self.engine.hit_succ_call_limit() {
            return ExpansionResult::ResourceLimit;
        }
        self.engine.stats.successor_calls += 1;

        self.app_actions.clear();
        self.ops
            .get_actions(&self.open_closed.node(to_expand).state, self.app_actions);
        self.engine.stats.action_generations += self.app_actions.len() as u64;

        for i in 0..self.app_actions.len() {
            let action = self.app_actions[i];

            let (child_state, edge_cost) = {
                let parent = self.open_closed.node(to_expand);
                let edge_cost = self.ops.action_cost(&parent.state, action);
                let mut child = parent.state.clone();
                self.ops.apply_action(&mut child, action);
                (child, edge_cost)
            };
            let child_g = parent_g + edge_cost;
            self.engine.stats.state_generations += 1;

            let child_hash = self.hash_function.state_hash(&child_state);
            let location = self.open_closed.state_location(child_hash);
            match location {
                StateLocation::Open(child_id) | StateLocation::Closed(child_id) => {
                    if fp_less(child_g, self.open_closed.node(child_id).g_cost) {
                        let eval_fn = self.eval_fn;
                        let node = self.open_closed.node_mut(child_id);
                        node.g_cost = child_g;
                        node.eval = eval_fn.eval(child_g, node.h_value);
                        node.parent_id = to_expand;
                        node.gen_action = action;

                        if matches!(location, StateLocation::Open(_)) {
                            self.open_closed.notify_eval_changed(child_id);
                        } else if self.reopen {
                            self.open_closed.reopen(child_id);
                            self.engine.stats.reopenings += 1;
                        }
                        // Reopening disabled: the better path is recorded on
                        // the node but it stays closed and is never
                        // re-expanded.
                    }
                }
                StateLocation::Absent => {
                    if self.engine.hit_storage_limit() {
                        return ExpansionResult::ResourceLimit;
                    }
                    if self.engine.hit_h_comp_limit() {
                        return ExpansionResult::ResourceLimit;
                    }
                    self.engine.stats.h_computations += 1;
                    self.heuristic.prepare_to_compute();
                    let child_h = self.heuristic.h_value(&child_state);
                    let child_eval = self.eval_fn.eval(child_g, child_h);

                    self.open_closed
                        .add_new(child_state, action, child_hash, child_g, child_h, child_eval, to_expand);
                    self.engine.stats.storage += 1;
                }
            }
        }

        ExpansionResult::NoSolution
    }

    /// Walks parent links from `path_end` back to the root, records the
    /// actions in execution order, and totals their costs.
    fn extract_solution(&mut self, path_end: NodeId) {
        self.engine.incumbent_cost = 0.0;
        self.engine.incumbent_plan.clear();

        let mut id = path_end;
        while !self.ops.is_dummy(self.open_closed.node(id).gen_action) {
            let action = self.open_closed.node(id).gen_action;
            self.engine.incumbent_plan.push(action);
            id = self.open_closed.node(id).parent_id;
            self.engine.incumbent_cost += self
                .ops
                .action_cost(&self.open_closed.node(id).state, action);
        }
        self.engine.incumbent_plan.reverse();
        self.engine.have_incumbent = true;

        debug_assert!(!fp_greater(
            self.engine.incumbent_cost,
            self.open_closed.node(path_end).g_cost
        ));
        debug!(
            cost = self.engine.incumbent_cost,
            length = self.engine.incumbent_plan.len(),
            "goal found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fp::fp_equal;
    use crate::traits::SingleGoalTest;

    /// A small explicit digraph. States are vertex indices; an action is an
    /// index into the state's adjacency list; the dummy action is
    /// `usize::MAX`.
    struct GraphOps {
        edges: Vec<Vec<(usize, f64)>>,
    }

    impl TransitionSystem for GraphOps {
        type State = usize;
        type Action = usize;

        fn get_actions(&self, state: &usize, actions: &mut Vec<usize>) {
            actions.extend(0..self.edges[*state].len());
        }

        fn action_cost(&self, state: &usize, action: usize) -> f64 {
            self.edges[*state][action].1
        }

        fn apply_action(&self, state: &mut usize, action: usize) {
            *state = self.edges[*state][action].0;
        }

        fn dummy_action(&self) -> usize {
            usize::MAX
        }
    }

    struct TableHeuristic(Vec<f64>);

    impl Heuristic<usize> for TableHeuristic {
        fn h_value(&mut self, state: &usize) -> f64 {
            self.0[*state]
        }
    }

    struct IdentityHash;

    impl StateHash<usize> for IdentityHash {
        fn state_hash(&self, state: &usize) -> u64 {
            *state as u64
        }
    }

    type GraphSearch = BestFirstSearch<GraphOps, TableHeuristic, IdentityHash, SingleGoalTest<usize>>;

    /// Start 0, goal 3. The cheap route to vertex 2 (via 1) is discovered
    /// only after 2 has been closed along the direct edge, forcing a reopen.
    /// h is deliberately inconsistent to arrange that expansion order.
    fn reopening_graph() -> GraphOps {
        GraphOps {
            edges: vec![
                vec![(1, 1.0), (2, 5.0)],
                vec![(2, 1.0)],
                vec![(3, 1.0)],
                vec![],
            ],
        }
    }

    fn reopening_engine() -> GraphSearch {
        let mut engine = GraphSearch::astar();
        engine.set_transition_system(reopening_graph());
        engine.set_heuristic(TableHeuristic(vec![0.0, 10.0, 0.0, 20.0]));
        engine.set_hash_function(IdentityHash);
        engine.set_goal_test(SingleGoalTest::new(3));
        engine
    }

    #[test]
    fn unconfigured_engine_reports_not_ready() {
        let mut engine = GraphSearch::astar();
        engine.set_transition_system(reopening_graph());
        let (term, plan) = engine.get_plan(&0);
        assert_eq!(term, Termination::EngineNotReady);
        assert!(plan.is_empty());
        assert_eq!(engine.status(), SearchStatus::NotReady);
    }

    #[test]
    fn astar_finds_the_optimal_plan() {
        let mut engine = GraphSearch::astar();
        engine.set_transition_system(reopening_graph());
        engine.set_heuristic(TableHeuristic(vec![0.0; 4]));
        engine.set_hash_function(IdentityHash);
        engine.set_goal_test(SingleGoalTest::new(3));

        let (term, plan) = engine.get_plan(&0);
        assert_eq!(term, Termination::Completed);
        assert_eq!(plan, vec![0, 0, 0]);
        assert!(engine.found_solution());
        assert!(fp_equal(engine.last_plan_cost(), 3.0));
        assert_eq!(engine.status(), SearchStatus::Terminated);

        // Replaying the plan reaches the goal.
        let ops = reopening_graph();
        let mut state = 0;
        assert!(ops.apply_action_sequence(&mut state, &plan));
        assert_eq!(state, 3);
    }

    #[test]
    fn unsolvable_problem_completes_with_empty_plan() {
        let mut engine = reopening_engine();
        // Vertex 3 has no outgoing edges, so searching from it for goal 0
        // exhausts the open list.
        engine.set_goal_test(SingleGoalTest::new(0));
        let (term, plan) = engine.get_plan(&3);
        assert_eq!(term, Termination::Completed);
        assert!(plan.is_empty());
        assert!(!engine.found_solution());
        assert!(engine.last_plan_cost() < 0.0);
    }

    #[test]
    fn reopening_recovers_the_cheaper_path() {
        let mut engine = reopening_engine();
        let (term, plan) = engine.get_plan(&0);

        assert_eq!(term, Termination::Completed);
        assert_eq!(plan, vec![0, 0, 0]);
        assert!(fp_equal(engine.last_plan_cost(), 3.0));

        // Vertex 2 was closed at g = 5, improved to g = 2, and re-expanded.
        assert_eq!(engine.reopened_count(), 1);
        assert_eq!(engine.goal_test_count(), 5);
        // Its second goal test is not unique.
        assert_eq!(engine.unique_goal_test_count(), 4);
        assert_eq!(engine.storage_count(), 4);
        assert_eq!(engine.succ_call_count(), 4);
        assert_eq!(engine.state_gen_count(), 5);
        assert_eq!(engine.action_gen_count(), 5);
        assert_eq!(engine.h_comp_count(), 4);
    }

    #[test]
    fn reopening_disabled_leaves_descendants_stale() {
        let mut engine = reopening_engine();
        engine.set_reopen_policy(false);
        let (term, plan) = engine.get_plan(&0);

        assert_eq!(term, Termination::Completed);
        assert_eq!(engine.reopened_count(), 0);
        // Vertex 2 is never re-expanded, so the goal is reached one test
        // earlier, along the stale route.
        assert_eq!(engine.goal_test_count(), 4);

        // The improvement to vertex 2 was recorded on the node even though
        // it stayed closed, so extraction still walks the repaired parents.
        assert_eq!(plan, vec![0, 0, 0]);
        assert!(fp_equal(engine.last_plan_cost(), 3.0));
        // But the goal node's own g-cost kept the stale value.
        match engine.open_closed().state_location(3) {
            StateLocation::Closed(id) => {
                assert!(fp_equal(engine.open_closed().node(id).g_cost, 6.0));
            }
            other => panic!("goal node in unexpected location {other:?}"),
        }
    }

    #[test]
    fn duplicate_generations_share_one_node() {
        // Two parallel unit-cost edges to vertex 1.
        let mut engine = GraphSearch::astar();
        engine.set_transition_system(GraphOps {
            edges: vec![vec![(1, 1.0), (1, 1.0)], vec![]],
        });
        engine.set_heuristic(TableHeuristic(vec![0.0, 0.0]));
        engine.set_hash_function(IdentityHash);
        engine.set_goal_test(SingleGoalTest::new(1));

        let (term, plan) = engine.get_plan(&0);
        assert_eq!(term, Termination::Completed);
        assert_eq!(plan.len(), 1);
        // Both generations are counted, but only one node is stored.
        assert_eq!(engine.state_gen_count(), 2);
        assert_eq!(engine.storage_count(), 2);
        assert_eq!(engine.open_closed().len(), 2);
    }

    #[test]
    fn goal_test_limit_terminates_cleanly() {
        let mut engine = reopening_engine();
        engine.set_goal_test_limit(1);
        let (term, plan) = engine.get_plan(&0);
        assert_eq!(term, Termination::ResourceLimit);
        assert!(plan.is_empty());
        assert!(!engine.found_solution());
        // The root consumed the single allowed test; the next pop was
        // refused. Storage stays queryable after the limit.
        assert_eq!(engine.goal_test_count(), 1);
        assert_eq!(engine.open_closed().len(), 3);
    }

    #[test]
    fn succ_call_limit_terminates_after_goal_tests() {
        let mut engine = reopening_engine();
        engine.set_succ_call_limit(1);
        let (term, _) = engine.get_plan(&0);
        assert_eq!(term, Termination::ResourceLimit);
        // The first expansion consumed the only allowed successor call; the
        // second was refused before enumerating actions.
        assert_eq!(engine.succ_call_count(), 1);
        assert_eq!(engine.goal_test_count(), 2);
    }

    #[test]
    fn h_compute_limit_counts_the_root() {
        let mut engine = reopening_engine();
        engine.set_h_compute_limit(2);
        let (term, _) = engine.get_plan(&0);
        assert_eq!(term, Termination::ResourceLimit);
        assert_eq!(engine.h_comp_count(), 2);
    }

    #[test]
    fn storage_limit_caps_node_creation() {
        let mut engine = reopening_engine();
        engine.set_storage_limit(2);
        let (term, _) = engine.get_plan(&0);
        assert_eq!(term, Termination::ResourceLimit);
        assert_eq!(engine.open_closed().len(), 2);
    }

    #[test]
    fn statistics_reset_between_runs() {
        let mut engine = reopening_engine();
        let (_, _) = engine.get_plan(&0);
        let first_tests = engine.goal_test_count();
        assert!(first_tests > 0);

        let (_, _) = engine.get_plan(&0);
        assert_eq!(engine.goal_test_count(), first_tests);
        assert_eq!(engine.open_closed().len(), 4);
    }

    #[test]
    fn weight_updates_are_validated() {
        let mut engine = GraphSearch::weighted_astar(2.0);
        assert!(engine.set_weight(5.0));
        assert!(!engine.set_weight(0.5));
        assert_eq!(engine.eval_fn(), EvalFn::WeightedAStar { weight: 5.0 });

        let mut astar = GraphSearch::astar();
        assert!(!astar.set_weight(2.0));
    }

    #[test]
    fn greedy_orders_by_h_alone() {
        // Greedy rushes through the high-g route when h points that way.
        let mut engine = GraphSearch::greedy_best_first();
        engine.set_transition_system(reopening_graph());
        engine.set_heuristic(TableHeuristic(vec![3.0, 2.0, 1.0, 0.0]));
        engine.set_hash_function(IdentityHash);
        engine.set_goal_test(SingleGoalTest::new(3));

        let (term, plan) = engine.get_plan(&0);
        assert_eq!(term, Termination::Completed);
        let mut state = 0;
        assert!(reopening_graph().apply_action_sequence(&mut state, &plan));
        assert_eq!(state, 3);
    }
}
