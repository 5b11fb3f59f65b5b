use crate::game::{GameState, Player};

/// A single position in a search tree.
///
/// Every node owns its own copy of the game state. Children are created from clones of
/// the parent state, so mutating one subtree can never leak into another one or into
/// the caller's position.
#[derive(Debug, Clone)]
pub struct SearchNode<G: GameState> {
    /// The position this node represents.
    pub state: G,
    /// The side to act from this position.
    pub player_to_move: Player,
    /// The move that produced this position from its parent. `None` for the root node.
    pub last_move: Option<G::Move>,
    /// Minimax: the resolved score. MCTS: the sum of rollout results credited to this node.
    pub value: i64,
    /// The number of times this node has been sampled. Only MCTS counts visits.
    pub visits: u32,
}

impl<G: GameState> SearchNode<G> {
    /// Creates a root node. The state is copied, the caller keeps the original.
    pub fn new_root(state: &G, player_to_move: Player) -> Self {
        SearchNode {
            state: state.clone(),
            player_to_move,
            last_move: None,
            value: 0,
            visits: 0,
        }
    }

    /// Creates the node reached by playing `mv` from a parent whose mover was `parent_player`.
    pub fn new_child(state: G, parent_player: Player, mv: G::Move) -> Self {
        SearchNode {
            state,
            player_to_move: parent_player.opponent(),
            last_move: Some(mv),
            value: 0,
            visits: 0,
        }
    }

    /// `true` once a rollout has passed through this node.
    pub fn is_visited(&self) -> bool {
        self.visits > 0
    }

    /// Mean of the accumulated value over the visits.
    pub fn average_reward(&self) -> Estimate {
        if self.visits == 0 {
            Estimate::Unvisited
        } else {
            Estimate::Score(self.value as f64 / f64::from(self.visits))
        }
    }
}

/// A comparable score that keeps "never visited" apart from any real number.
///
/// An unvisited node beats every scored node and ties with other unvisited nodes, so
/// extreme evaluation scores can never be mistaken for the unvisited marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    Unvisited,
    Score(f64),
}

impl Estimate {
    /// Strict "greater than". Ties are never an improvement.
    pub fn exceeds(self, other: Estimate) -> bool {
        match (self, other) {
            (Estimate::Unvisited, Estimate::Unvisited) => false,
            (Estimate::Unvisited, Estimate::Score(_)) => true,
            (Estimate::Score(_), Estimate::Unvisited) => false,
            (Estimate::Score(a), Estimate::Score(b)) => a > b,
        }
    }
}

/// Returns the key with the highest estimate. The first one wins on ties.
pub fn first_best<K, I>(candidates: I) -> Option<K>
where
    I: IntoIterator<Item = (K, Estimate)>,
{
    let mut best: Option<(K, Estimate)> = None;
    for (key, estimate) in candidates {
        let improves = match &best {
            None => true,
            Some((_, best_estimate)) => estimate.exceeds(*best_estimate),
        };
        if improves {
            best = Some((key, estimate));
        }
    }
    best.map(|(key, _)| key)
}
