//! Depth-limited minimax search with optional alpha-beta pruning.

use crate::error::SearchError;
use crate::game::{GameState, Player};
use crate::tree::SearchTree;
use ego_tree::NodeId;
use serde::Deserialize;
use tracing::{debug, trace};

/// Knobs of the minimax engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Plies explored below the root before falling back to static evaluation.
    /// `0` and `1` both reduce to a greedy one-ply comparison.
    pub max_depth: u32,
    /// Stop scanning siblings as soon as the alpha-beta window closes.
    pub pruning: bool,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            pruning: true,
        }
    }
}

impl MinimaxConfig {
    /// Sets the depth limit.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Turns alpha-beta pruning on or off.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }
}

/// Outcome of a minimax search.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimaxReport<M> {
    /// The first-ply move leading to the best worst-case subtree.
    pub best_move: M,
    /// The backed-up evaluation of that move, from the maximizer's point of view.
    pub value: i64,
    /// Number of static evaluations performed.
    pub nodes_evaluated: u64,
    /// Number of times sibling scanning stopped early.
    pub cutoffs: u64,
}

/// Adversarial search for the maximizing player.
///
/// Fully deterministic: the same state and configuration always produce the same move.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxSearch {
    maximizer: Player,
    config: MinimaxConfig,
}

impl MinimaxSearch {
    /// Creates an engine that searches on behalf of `maximizer`.
    pub fn new(maximizer: Player, config: MinimaxConfig) -> Self {
        Self { maximizer, config }
    }

    /// The knobs this engine searches with.
    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    /// Returns the move the maximizer should play from `state`.
    pub fn find_next_move<G: GameState>(&self, state: &G) -> Result<G::Move, SearchError> {
        self.search(state).map(|report| report.best_move)
    }

    /// Searches `state` and returns the chosen move together with its value and counters.
    pub fn search<G: GameState>(&self, state: &G) -> Result<MinimaxReport<G::Move>, SearchError> {
        if state.is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }

        debug!(
            maximizer = ?self.maximizer,
            max_depth = self.config.max_depth,
            pruning = self.config.pruning,
            "starting minimax search"
        );

        let mut run = AlphaBeta {
            tree: SearchTree::new(state, self.maximizer),
            maximizer: self.maximizer,
            config: self.config,
            nodes_evaluated: 0,
            cutoffs: 0,
        };
        let root = run.tree.root_id();
        if run.tree.expand(root)? == 0 {
            return Err(SearchError::NoLegalMoves);
        }

        let best_child = run.max_value(root, i64::MIN, i64::MAX, 0)?;
        let value = run.tree.node(best_child)?.value;
        let best_move = run.tree.last_move(best_child)?;

        debug!(
            best_move = ?best_move,
            value,
            nodes_evaluated = run.nodes_evaluated,
            cutoffs = run.cutoffs,
            "minimax search finished"
        );

        Ok(MinimaxReport {
            best_move,
            value,
            nodes_evaluated: run.nodes_evaluated,
            cutoffs: run.cutoffs,
        })
    }
}

/// State of one minimax invocation.
///
/// Scores live in `i64` while evaluations are `i32`, so the initial window bounds can
/// never be confused with a real score.
struct AlphaBeta<G: GameState> {
    tree: SearchTree<G>,
    maximizer: Player,
    config: MinimaxConfig,
    nodes_evaluated: u64,
    cutoffs: u64,
}

impl<G: GameState> AlphaBeta<G> {
    /// Resolves a maximizing node. The root answers with its best child, every other
    /// node stores the backed-up value and answers with itself.
    fn max_value(
        &mut self,
        id: NodeId,
        mut alpha: i64,
        beta: i64,
        depth: u32,
    ) -> Result<NodeId, SearchError> {
        if self.is_horizon(id, depth)? {
            return self.evaluate(id);
        }

        self.tree.expand(id)?;
        let mut best: Option<(NodeId, i64)> = None;
        for child in self.tree.children(id)? {
            let resolved = self.min_value(child, alpha, beta, depth + 1)?;
            let value = self.tree.node(resolved)?.value;
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((resolved, value));
            }

            alpha = alpha.max(value);
            if self.config.pruning && beta <= alpha {
                self.cutoffs += 1;
                trace!(depth, alpha, beta, "beta cutoff");
                break;
            }
        }

        self.resolve(id, best)
    }

    fn min_value(
        &mut self,
        id: NodeId,
        alpha: i64,
        mut beta: i64,
        depth: u32,
    ) -> Result<NodeId, SearchError> {
        if self.is_horizon(id, depth)? {
            return self.evaluate(id);
        }

        self.tree.expand(id)?;
        let mut best: Option<(NodeId, i64)> = None;
        for child in self.tree.children(id)? {
            let resolved = self.max_value(child, alpha, beta, depth + 1)?;
            let value = self.tree.node(resolved)?.value;
            if best.is_none_or(|(_, best_value)| value < best_value) {
                best = Some((resolved, value));
            }

            beta = beta.min(value);
            if self.config.pruning && beta <= alpha {
                self.cutoffs += 1;
                trace!(depth, alpha, beta, "alpha cutoff");
                break;
            }
        }

        self.resolve(id, best)
    }

    /// The root is always searched, so a depth limit of zero still compares the first ply.
    fn is_horizon(&self, id: NodeId, depth: u32) -> Result<bool, SearchError> {
        if depth == 0 {
            return Ok(false);
        }
        Ok(depth >= self.config.max_depth || self.tree.node(id)?.state.is_terminal())
    }

    fn evaluate(&mut self, id: NodeId) -> Result<NodeId, SearchError> {
        let maximizer = self.maximizer;
        self.nodes_evaluated += 1;
        self.tree
            .update(id, |node| node.value = i64::from(node.state.evaluate(maximizer)))?;
        Ok(id)
    }

    fn resolve(&mut self, id: NodeId, best: Option<(NodeId, i64)>) -> Result<NodeId, SearchError> {
        let is_root = self.tree.parent(id)?.is_none();
        match best {
            Some((best_child, value)) => {
                self.tree.update(id, |node| node.value = value)?;
                Ok(if is_root { best_child } else { id })
            }
            None if is_root => Err(SearchError::NoLegalMoves),
            // stuck but not terminal: nothing to compare, fall back to the static score
            None => self.evaluate(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MinimaxConfig, MinimaxSearch};
    use crate::error::SearchError;
    use crate::game::{GameState, Player};
    use crate::games::countdown::Countdown;
    use crate::games::nim::Nim;
    use crate::games::tic_tac_toe::TicTacToeBoard;

    /// A hand-built game tree: `CHILDREN[node]` lists successors, leaves carry scores
    /// for the first player.
    #[derive(Debug, Clone)]
    struct FixedTree {
        node: usize,
    }

    const CHILDREN: [&[usize]; 13] = [
        &[1, 2, 3],
        &[4, 5, 6],
        &[7, 8, 9],
        &[10, 11, 12],
        &[],
        &[],
        &[],
        &[],
        &[],
        &[],
        &[],
        &[],
        &[],
    ];
    const SCORES: [i32; 13] = [0, 0, 0, 0, 3, 12, 8, 2, 4, 6, 14, 5, 2];

    impl GameState for FixedTree {
        type Move = usize;

        fn legal_moves(&self) -> Vec<usize> {
            CHILDREN[self.node].to_vec()
        }

        fn apply_move(&mut self, mv: &usize) {
            self.node = *mv;
        }

        fn is_terminal(&self) -> bool {
            CHILDREN[self.node].is_empty()
        }

        fn evaluate(&self, player: Player) -> i32 {
            match player {
                Player::First => SCORES[self.node],
                Player::Second => -SCORES[self.node],
            }
        }
    }

    fn fixed_root() -> FixedTree {
        FixedTree { node: 0 }
    }

    #[test]
    fn textbook_tree_backs_up_the_minimax_value() {
        // arrange
        let search = MinimaxSearch::new(Player::First, MinimaxConfig::default().with_pruning(false));

        // act
        let report = search.search(&fixed_root()).unwrap();

        // assert
        assert_eq!(report.best_move, 1);
        assert_eq!(report.value, 3);
        assert_eq!(report.nodes_evaluated, 9);
        assert_eq!(report.cutoffs, 0);
    }

    #[test]
    fn pruning_skips_refuted_siblings() {
        let search = MinimaxSearch::new(Player::First, MinimaxConfig::default());

        let report = search.search(&fixed_root()).unwrap();

        assert_eq!(report.best_move, 1);
        assert_eq!(report.value, 3);
        // node 2 is refuted by its first leaf, node 3 only by its last one
        assert_eq!(report.nodes_evaluated, 7);
        assert_eq!(report.cutoffs, 2);
    }

    #[test]
    fn pruning_never_changes_the_value() {
        for stones in 1..=12u8 {
            for depth in 0..=5 {
                for maximizer in [Player::First, Player::Second] {
                    let state = Nim::new(stones);
                    let plain = MinimaxSearch::new(
                        maximizer,
                        MinimaxConfig::default()
                            .with_max_depth(depth)
                            .with_pruning(false),
                    )
                    .search(&state)
                    .unwrap();
                    let pruned = MinimaxSearch::new(
                        maximizer,
                        MinimaxConfig::default().with_max_depth(depth),
                    )
                    .search(&state)
                    .unwrap();
                    assert_eq!(plain.value, pruned.value, "stones {stones} depth {depth}");
                    assert!(pruned.nodes_evaluated <= plain.nodes_evaluated);
                }
            }
        }
    }

    #[test]
    fn pruning_keeps_tic_tac_toe_value() {
        let mut board = TicTacToeBoard::default();
        board.apply_move(&4);
        board.apply_move(&0);
        let plain = MinimaxSearch::new(
            Player::First,
            MinimaxConfig::default().with_max_depth(4).with_pruning(false),
        )
        .search(&board)
        .unwrap();
        let pruned =
            MinimaxSearch::new(Player::First, MinimaxConfig::default().with_max_depth(4))
                .search(&board)
                .unwrap();
        assert_eq!(plain.value, pruned.value);
        assert!(pruned.cutoffs > 0);
    }

    #[test]
    fn depth_zero_is_greedy() {
        // arrange
        let search = MinimaxSearch::new(Player::First, MinimaxConfig::default().with_max_depth(0));

        // act
        let report = search.search(&fixed_root()).unwrap();

        // assert
        assert_eq!(report.nodes_evaluated, 3);
        assert_eq!(report.best_move, 1);
        assert_eq!(report.value, 0);
    }

    #[test]
    fn depth_zero_picks_the_best_static_successor() {
        // from 5 stones taking 1 leaves 4, a lost position for the opponent
        let search = MinimaxSearch::new(Player::First, MinimaxConfig::default().with_max_depth(0));
        assert_eq!(search.find_next_move(&Nim::new(5)).unwrap(), 1);
    }

    #[test]
    fn single_legal_move_is_returned() {
        for pruning in [true, false] {
            for depth in 0..4 {
                let search = MinimaxSearch::new(
                    Player::First,
                    MinimaxConfig::default()
                        .with_max_depth(depth)
                        .with_pruning(pruning),
                );
                assert_eq!(search.find_next_move(&Nim::new(1)).unwrap(), 1);
            }
        }
    }

    #[test]
    fn immediate_win_is_taken() {
        // taking all three stones wins on the spot
        for depth in 1..=4 {
            let search =
                MinimaxSearch::new(Player::First, MinimaxConfig::default().with_max_depth(depth));
            let report = search.search(&Nim::new(3)).unwrap();
            assert_eq!(report.best_move, 3);
            assert_eq!(report.value, i64::from(crate::games::nim::WIN_SCORE));
        }
    }

    #[test]
    fn completes_the_diagonal_at_tic_tac_toe() {
        // X: 0, 4   O: 1, 2   X to move, 8 completes the diagonal
        let mut board = TicTacToeBoard::default();
        for mv in [0, 1, 4, 2] {
            board.apply_move(&mv);
        }
        for depth in 1..=2 {
            let search =
                MinimaxSearch::new(Player::First, MinimaxConfig::default().with_max_depth(depth));
            assert_eq!(search.find_next_move(&board).unwrap(), 8);
        }
    }

    #[test]
    fn terminal_root_has_no_move() {
        let search = MinimaxSearch::new(Player::First, MinimaxConfig::default());
        assert_eq!(
            search.find_next_move(&Nim::new(0)),
            Err(SearchError::NoLegalMoves)
        );
    }

    #[test]
    fn caller_state_is_untouched() {
        let state = Nim::new(9);
        let before = state.clone();
        MinimaxSearch::new(Player::First, MinimaxConfig::default())
            .search(&state)
            .unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn terminal_positions_are_not_expanded() {
        // arrange
        let search = MinimaxSearch::new(
            Player::First,
            MinimaxConfig::default().with_max_depth(3).with_pruning(false),
        );

        // act
        let report = search.search(&Countdown::new(2)).unwrap();

        // assert
        // two plies end the game: four finished positions, nothing below them
        assert_eq!(report.nodes_evaluated, 4);
        assert_eq!(report.best_move, 2);
        assert_eq!(report.value, 3);
    }

    #[test]
    fn config_is_kept() {
        let config = MinimaxConfig::default().with_max_depth(2).with_pruning(false);
        let search = MinimaxSearch::new(Player::Second, config);
        assert_eq!(search.config(), &config);
    }
}
