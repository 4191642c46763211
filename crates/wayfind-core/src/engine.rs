//! Engine bookkeeping shared by search algorithms: status, termination
//! reasons, resource limits, statistics, and the incumbent solution.

/// The lifecycle of a search engine.
///
/// `NotReady` while any required collaborator is unset; `Ready` once
/// configured; `Active` for the duration of a `get_plan` call; `Terminated`
/// afterwards, until the next reset.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SearchStatus {
    NotReady,
    Ready,
    Active,
    Terminated,
}

/// Why a search run ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Termination {
    /// The search ran to completion: either a goal was found, or the open
    /// list emptied and no solution exists.
    Completed,
    /// The engine was asked to search before it was fully configured.
    EngineNotReady,
    /// A resource limit was hit. The incumbent (usually none) carries no
    /// goal guarantee.
    ResourceLimit,
}

/// Monotonic counters for one search run. All are reset to zero at the
/// start of every `get_plan` call.
#[derive(Clone, Copy, Default, Debug)]
pub struct SearchStats {
    /// Nodes inserted into storage (the root plus every new child).
    pub storage: u64,
    /// Heuristic computations performed.
    pub h_computations: u64,
    /// Calls to the applicable-actions function.
    pub successor_calls: u64,
    /// Goal tests performed, counting re-tests of reopened nodes.
    pub goal_tests: u64,
    /// Goal tests on node ids never tested before.
    pub unique_goal_tests: u64,
    /// Child states generated, counting duplicates.
    pub state_generations: u64,
    /// Actions enumerated across all successor calls.
    pub action_generations: u64,
    /// Closed nodes moved back to open.
    pub reopenings: u64,
}

/// Bookkeeping embedded in every concrete search algorithm: the status
/// machine, resource limits (0 = unlimited), statistics, and the incumbent
/// plan.
pub struct EngineState<A> {
    pub status: SearchStatus,

    pub storage_limit: u64,
    pub h_comp_limit: u64,
    pub succ_call_limit: u64,
    pub goal_test_limit: u64,

    pub stats: SearchStats,

    pub have_incumbent: bool,
    pub incumbent_plan: Vec<A>,
    pub incumbent_cost: f64,
}

impl<A> EngineState<A> {
    pub fn new() -> Self {
        EngineState {
            status: SearchStatus::NotReady,
            storage_limit: 0,
            h_comp_limit: 0,
            succ_call_limit: 0,
            goal_test_limit: 0,
            stats: SearchStats::default(),
            have_incumbent: false,
            incumbent_plan: vec![],
            incumbent_cost: 0.0,
        }
    }

    /// Zeroes the statistics, drops the incumbent, and recomputes readiness
    /// from `configured`.
    pub fn reset(&mut self, configured: bool) {
        self.stats = SearchStats::default();

        self.have_incumbent = false;
        self.incumbent_cost = -1.0;
        self.incumbent_plan.clear();

        self.status = if configured {
            SearchStatus::Ready
        } else {
            SearchStatus::NotReady
        };
    }

    pub fn hit_storage_limit(&self) -> bool {
        self.storage_limit > 0 && self.stats.storage >= self.storage_limit
    }

    pub fn hit_h_comp_limit(&self) -> bool {
        self.h_comp_limit > 0 && self.stats.h_computations >= self.h_comp_limit
    }

    pub fn hit_succ_call_limit(&self) -> bool {
        self.succ_call_limit > 0 && self.stats.successor_calls >= self.succ_call_limit
    }

    pub fn hit_goal_test_limit(&self) -> bool {
        self.goal_test_limit > 0 && self.stats.goal_tests >= self.goal_test_limit
    }
}

impl<A> Default for EngineState<A> {
    fn default() -> Self {
        EngineState::new()
    }
}
