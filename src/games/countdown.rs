use crate::game::{GameState, Player};

/// A game that ends after a fixed number of plies but keeps listing moves afterwards,
/// the way a chess move generator still reports moves once a king has been captured.
///
/// Every move adds its number to a running total, which is the first player's score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    plies_left: u8,
    total: i32,
    to_move: Player,
}

impl Countdown {
    /// A game that is over after `plies` moves.
    pub fn new(plies: u8) -> Self {
        Self {
            plies_left: plies,
            total: 0,
            to_move: Player::First,
        }
    }
}

impl GameState for Countdown {
    type Move = u8;

    fn legal_moves(&self) -> Vec<u8> {
        vec![1, 2]
    }

    fn apply_move(&mut self, mv: &u8) {
        self.plies_left = self.plies_left.saturating_sub(1);
        self.total += i32::from(*mv);
        self.to_move = self.to_move.opponent();
    }

    fn is_terminal(&self) -> bool {
        self.plies_left == 0
    }

    fn evaluate(&self, player: Player) -> i32 {
        match player {
            Player::First => self.total,
            Player::Second => -self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Countdown;
    use crate::game::{GameState, Player};

    #[test]
    fn moves_outlive_the_game() {
        let mut game = Countdown::new(1);
        game.apply_move(&2);
        assert!(game.is_terminal());
        assert_eq!(game.legal_moves(), vec![1, 2]);
        assert_eq!(game.evaluate(Player::First), 2);
        assert_eq!(game.evaluate(Player::Second), -2);
    }
}
