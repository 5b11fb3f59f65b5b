use crate::game::{GameState, Player};

/// Score of a won game for the winner. The loser gets the negation.
pub const WIN_SCORE: i32 = 100;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Tic-Tac-Toe with `X` as [`Player::First`].
///
/// The board is a 9-element array, cells numbered row by row.
/// A move is the `u8` index (0 to 8) of the cell to mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeBoard {
    current_player: Player,
    field: [Option<Player>; 9],
    outcome: Outcome,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
enum Outcome {
    InProgress,
    Won(Player),
    Draw,
}

impl Default for TicTacToeBoard {
    /// An empty board with 'X' to move.
    fn default() -> Self {
        Self {
            current_player: Player::First,
            field: [None; 9],
            outcome: Outcome::InProgress,
        }
    }
}

impl TicTacToeBoard {
    /// The side placing the next mark.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The mark on cell `index` (row-major, 0 to 8), `None` when empty or off the board.
    pub fn cell(&self, index: usize) -> Option<Player> {
        self.field.get(index).copied().flatten()
    }

    /// The player holding a complete line, if any.
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Outcome::Won(player) => Some(player),
            _ => None,
        }
    }

    fn compute_outcome(&self) -> Outcome {
        for line in LINES {
            if let Some(owner) = self.field[line[0]] {
                if line.iter().all(|&cell| self.field[cell] == Some(owner)) {
                    return Outcome::Won(owner);
                }
            }
        }

        if self.field.iter().any(|cell| cell.is_none()) {
            Outcome::InProgress
        } else {
            Outcome::Draw
        }
    }

    /// Lines that contain no mark of `player`'s opponent.
    fn open_lines(&self, player: Player) -> i32 {
        LINES
            .iter()
            .filter(|line| {
                line.iter()
                    .all(|&cell| self.field[cell] != Some(player.opponent()))
            })
            .count() as i32
    }
}

impl GameState for TicTacToeBoard {
    type Move = u8;

    fn legal_moves(&self) -> Vec<u8> {
        if self.outcome != Outcome::InProgress {
            return Vec::new();
        }

        self.field
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_none())
            .map(|(i, _)| i as u8)
            .collect()
    }

    fn apply_move(&mut self, b_move: &u8) {
        self.field[*b_move as usize] = Some(self.current_player);
        self.current_player = self.current_player.opponent();
        self.outcome = self.compute_outcome();
    }

    fn is_terminal(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    fn evaluate(&self, player: Player) -> i32 {
        match self.outcome {
            Outcome::Won(winner) if winner == player => WIN_SCORE,
            Outcome::Won(_) => -WIN_SCORE,
            Outcome::Draw => 0,
            Outcome::InProgress => self.open_lines(player) - self.open_lines(player.opponent()),
        }
    }
}
