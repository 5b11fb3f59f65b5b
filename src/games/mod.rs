//! Small rules engines implementing [`GameState`](crate::game::GameState).

/// Fixed-length game whose finished positions still report moves.
#[cfg(test)]
pub(crate) mod countdown;
/// Subtraction game: take one to three stones, whoever takes the last stone wins.
pub mod nim;
/// Classic three-in-a-row on a 3x3 grid.
pub mod tic_tac_toe;
