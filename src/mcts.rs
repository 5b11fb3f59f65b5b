use crate::error::SearchError;
use crate::game::{GameState, Player};
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::tree::SearchTree;
use crate::uct::select_child;
use ego_tree::NodeId;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Plies a rollout plays before the position is evaluated.
pub const DEFAULT_ROLLOUT_DEPTH: u32 = 10;

/// Knobs of the Monte Carlo engine. The search stops at whichever limit is hit first.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Wall-clock budget in seconds, checked before every iteration.
    pub time_budget_secs: f64,
    /// Upper bound on the number of iterations.
    pub max_iterations: u32,
    /// Random plies played per rollout unless the game ends earlier.
    pub rollout_depth: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: 3.0,
            max_iterations: 1_000_000,
            rollout_depth: DEFAULT_ROLLOUT_DEPTH,
        }
    }
}

impl MctsConfig {
    /// The time budget as a `Duration`. Negative or non-finite budgets count as zero.
    pub fn time_budget(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_budget_secs).unwrap_or(Duration::ZERO)
    }

    /// Sets the wall-clock budget of one search.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_secs = budget.as_secs_f64();
        self
    }

    /// Caps the number of iterations of one search.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets how many random plies a rollout plays.
    pub fn with_rollout_depth(mut self, rollout_depth: u32) -> Self {
        self.rollout_depth = rollout_depth;
        self
    }
}

/// Outcome of a Monte Carlo search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsReport<M> {
    /// Move of the root child with the best average reward.
    pub best_move: M,
    /// Iterations completed before a limit was hit.
    pub iterations: u32,
    /// Visit count of the root after the last iteration.
    pub root_visits: u32,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
pub struct MonteCarloTreeSearchBuilder<K: RandomGenerator> {
    player: Player,
    config: MctsConfig,
    random_generator: K,
}

impl<K: RandomGenerator> MonteCarloTreeSearchBuilder<K> {
    /// Creates a builder for an engine playing as `player`.
    pub fn new(player: Player) -> Self {
        Self {
            player,
            config: MctsConfig::default(),
            random_generator: K::default(),
        }
    }

    /// Replaces all search limits at once.
    pub fn with_config(mut self, config: MctsConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the random number generator used for child picking and rollouts.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random_generator = rg;
        self
    }

    /// Consumes the builder and returns the engine.
    pub fn build(self) -> MonteCarloTreeSearch<K> {
        MonteCarloTreeSearch::new(self.player, self.config, self.random_generator)
    }
}

/// Monte Carlo Tree Search with UCT selection and random rollouts.
///
/// Every call to [`search`](MonteCarloTreeSearch::search) builds a fresh tree and drops
/// it on return. Results vary between calls unless a seeded generator is injected.
pub struct MonteCarloTreeSearch<K: RandomGenerator> {
    player: Player,
    config: MctsConfig,
    random: K,
}

impl<K: RandomGenerator> MonteCarloTreeSearch<K> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder(player: Player) -> MonteCarloTreeSearchBuilder<K> {
        MonteCarloTreeSearchBuilder::new(player)
    }

    /// Creates an engine for `player` that draws its randomness from `rg`.
    pub fn new(player: Player, config: MctsConfig, rg: K) -> Self {
        Self {
            player,
            config,
            random: rg,
        }
    }

    /// The limits every search of this engine runs under.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Gives the generator back, with its sequence advanced by the searches run so far.
    pub fn into_random_generator(self) -> K {
        self.random
    }

    /// Returns the move this engine's player should make from `state`.
    pub fn find_next_move<G: GameState>(&mut self, state: &G) -> Result<G::Move, SearchError> {
        self.search(state).map(|report| report.best_move)
    }

    /// Runs iterations until the time budget or the iteration cap runs out, then picks the
    /// root child with the best average reward.
    pub fn search<G: GameState>(&mut self, state: &G) -> Result<MctsReport<G::Move>, SearchError> {
        if state.is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }

        let budget = self.config.time_budget();
        debug!(
            player = ?self.player,
            budget_ms = budget.as_millis() as u64,
            max_iterations = self.config.max_iterations,
            "starting monte carlo search"
        );

        let started = Instant::now();
        let mut tree = SearchTree::new(state, self.player);
        let root = tree.root_id();
        if tree.expand(root)? == 0 {
            return Err(SearchError::NoLegalMoves);
        }

        let mut iterations = 0;
        while iterations < self.config.max_iterations && started.elapsed() < budget {
            iterations += 1;
            self.iterate(&mut tree)?;
        }

        let root_node = tree.node(root)?;
        let root_visits = root_node.visits;
        let best = if root_node.is_visited() {
            tree.pick_best_by_average_reward(root)?
        } else {
            // no statistics at all, fall back to the same random pick the first iteration makes
            tree.pick_random_child(root, &mut self.random)?
        };
        let best_move = tree.last_move(best)?;
        let elapsed = started.elapsed();

        debug!(
            best_move = ?best_move,
            iterations,
            root_visits,
            elapsed_ms = elapsed.as_millis() as u64,
            "monte carlo search finished"
        );

        Ok(MctsReport {
            best_move,
            iterations,
            root_visits,
            elapsed,
        })
    }

    /// Performs one selection, expansion, simulation and backpropagation pass.
    fn iterate<G: GameState>(&mut self, tree: &mut SearchTree<G>) -> Result<(), SearchError> {
        let root = tree.root_id();
        let selected = if tree.node(root)?.is_visited() {
            descend(tree, root)?
        } else {
            tree.pick_random_child(root, &mut self.random)?
        };

        let leaf = tree.node(selected)?;
        if leaf.is_visited() && !leaf.state.is_terminal() {
            tree.expand(selected)?;
        }

        let to_explore = if tree.has_children(selected)? {
            tree.pick_random_child(selected, &mut self.random)?
        } else {
            selected
        };

        let result = self.rollout(tree.node(to_explore)?.state.clone());
        backpropagate(tree, to_explore, self.player, result)?;

        trace!(node = ?to_explore, result, "monte carlo iteration complete");
        Ok(())
    }

    /// Plays uniformly random moves on a throwaway copy and scores the final position for
    /// this engine's player.
    fn rollout<G: GameState>(&mut self, mut state: G) -> i32 {
        let mut depth = 0;
        while depth < self.config.rollout_depth && !state.is_terminal() {
            let moves = state.legal_moves();
            match self.random.pick_from_slice(&moves) {
                Some(mv) => state.apply_move(mv),
                // not over but nothing to play: score the position as it stands
                None => break,
            }
            depth += 1;
        }
        state.evaluate(self.player)
    }
}

impl MonteCarloTreeSearch<StandardRandomGenerator> {
    /// An engine with default knobs drawing from the thread-local generator.
    pub fn for_player(player: Player) -> Self {
        MonteCarloTreeSearchBuilder::new(player).build()
    }
}

/// Follows the best UCT child from `id` until reaching a node without children.
fn descend<G: GameState>(tree: &SearchTree<G>, id: NodeId) -> Result<NodeId, SearchError> {
    let mut current = id;
    while let Some(child) = select_child(tree, current)? {
        current = child;
    }
    Ok(current)
}

/// Counts a visit on `leaf` and every ancestor. The rollout result is credited only to
/// nodes where the opponent of `player` is to move, i.e. the positions `player` chose.
pub(crate) fn backpropagate<G: GameState>(
    tree: &mut SearchTree<G>,
    leaf: NodeId,
    player: Player,
    result: i32,
) -> Result<(), SearchError> {
    for id in tree.path_to_root(leaf)? {
        tree.update(id, |node| {
            node.visits += 1;
            if node.player_to_move != player {
                node.value += i64::from(result);
            }
        })?;
    }
    Ok(())
}
