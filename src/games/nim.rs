use crate::game::{GameState, Player};

/// Score of a finished game for the winner. The loser gets the negation.
pub const WIN_SCORE: i32 = 100;
const POSITION_SCORE: i32 = 10;
const DEFAULT_MAX_TAKE: u8 = 3;

/// A single pile of stones. Each turn the mover removes between one and `max_take`
/// stones, and whoever removes the last stone wins.
///
/// A move is the number of stones taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nim {
    stones: u8,
    max_take: u8,
    to_move: Player,
}

impl Nim {
    /// A pile of `stones` with the first player to move, taking at most three per turn.
    pub fn new(stones: u8) -> Self {
        Nim::with_max_take(stones, DEFAULT_MAX_TAKE)
    }

    /// A pile of `stones` where each turn takes at most `max_take` stones (at least one).
    pub fn with_max_take(stones: u8, max_take: u8) -> Self {
        Self {
            stones,
            max_take: max_take.max(1),
            to_move: Player::First,
        }
    }

    /// Stones left on the pile.
    pub fn stones(&self) -> u8 {
        self.stones
    }

    /// The side that takes next.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Positions that are a multiple of `max_take + 1` are lost for the side to move.
    fn is_lost_for_mover(&self) -> bool {
        self.stones % (self.max_take + 1) == 0
    }
}

impl GameState for Nim {
    type Move = u8;

    fn legal_moves(&self) -> Vec<u8> {
        (1..=self.max_take.min(self.stones)).collect()
    }

    fn apply_move(&mut self, mv: &u8) {
        self.stones = self.stones.saturating_sub(*mv);
        self.to_move = self.to_move.opponent();
    }

    fn is_terminal(&self) -> bool {
        self.stones == 0
    }

    fn evaluate(&self, player: Player) -> i32 {
        let for_mover = if self.is_terminal() {
            -WIN_SCORE
        } else if self.is_lost_for_mover() {
            -POSITION_SCORE
        } else {
            POSITION_SCORE
        };

        if player == self.to_move {
            for_mover
        } else {
            -for_mover
        }
    }
}
