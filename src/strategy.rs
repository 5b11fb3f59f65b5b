//! Picks an engine for a move request.

use crate::error::SearchError;
use crate::game::{GameState, Player};
use crate::mcts::{MctsConfig, MonteCarloTreeSearch};
use crate::minimax::{MinimaxConfig, MinimaxSearch};
use crate::random::RandomGenerator;
use tracing::debug;

/// How the next move is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    Minimax(MinimaxConfig),
    MonteCarlo(MctsConfig),
    /// A uniformly random legal move, no search.
    Random,
}

/// Chooses `player`'s next move from `state`.
///
/// `random` feeds the Monte Carlo engine and the random strategy. It is handed back to
/// the caller afterwards so one seeded generator can drive a whole game.
pub fn select_move<G, K>(
    state: &G,
    player: Player,
    strategy: Strategy,
    random: &mut K,
) -> Result<G::Move, SearchError>
where
    G: GameState,
    K: RandomGenerator,
{
    debug!(?player, ?strategy, "selecting move");
    match strategy {
        Strategy::Minimax(config) => MinimaxSearch::new(player, config).find_next_move(state),
        Strategy::MonteCarlo(config) => {
            let mut mcts = MonteCarloTreeSearch::new(player, config, std::mem::take(random));
            let result = mcts.find_next_move(state);
            *random = mcts.into_random_generator();
            result
        }
        Strategy::Random => {
            let moves = state.legal_moves();
            random
                .pick_from_slice(&moves)
                .cloned()
                .ok_or(SearchError::NoLegalMoves)
        }
    }
}
