use std::fmt::Debug;

/// The interface a rules engine has to provide for the search engines.
///
/// The engines never look inside the state. They only enumerate moves, apply them to
/// independent copies (obtained through `Clone`), ask whether the game is over and
/// request a static evaluation from a given player's viewpoint.
pub trait GameState: Clone {
    /// A single move. Opaque to the engines, returned to the caller as the search result.
    type Move: Clone + PartialEq + Debug;

    /// Returns every legal move for the side to move.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Applies a move in place. The move must come from [`GameState::legal_moves`].
    fn apply_move(&mut self, mv: &Self::Move);

    /// Returns `true` once the game has ended (win, loss or draw).
    fn is_terminal(&self) -> bool;

    /// Static heuristic score from `player`'s point of view. Higher is better for `player`.
    fn evaluate(&self, player: Player) -> i32;
}

/// One of the two sides of the game.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Player {
    /// The side that moves first.
    First = 0,
    /// The side that moves second.
    Second = 1,
}

impl Player {
    /// The other side.
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Maps the 0/1 colour numbering used by game servers onto a player.
    pub fn from_index(index: u8) -> Option<Player> {
        match index {
            0 => Some(Player::First),
            1 => Some(Player::Second),
            _ => None,
        }
    }

    /// The 0/1 colour number of this player.
    pub fn index(self) -> u8 {
        self as u8
    }
}
