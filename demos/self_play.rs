extern crate duel_search;

use duel_search::games::tic_tac_toe::TicTacToeBoard;
use duel_search::random::CustomNumberGenerator;
use duel_search::{select_move, GameState, MctsConfig, MinimaxConfig, Player, Strategy};
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // X searches with alpha-beta, O with Monte Carlo
    let minimax = Strategy::Minimax(MinimaxConfig::default().with_max_depth(6));
    let mcts = Strategy::MonteCarlo(
        MctsConfig::default()
            .with_time_budget(Duration::from_secs(2))
            .with_max_iterations(5_000),
    );

    let mut board = TicTacToeBoard::default();
    let mut random = CustomNumberGenerator::default();

    while !board.is_terminal() {
        let player = board.current_player();
        let strategy = match player {
            Player::First => minimax,
            Player::Second => mcts,
        };

        let chosen = match select_move(&board, player, strategy, &mut random) {
            Ok(chosen) => chosen,
            Err(err) => {
                eprintln!("{:?} could not move: {}", player, err);
                return;
            }
        };
        board.apply_move(&chosen);
        println!("{:?} plays {}", player, chosen);
        print_board(&board);
    }

    match board.winner() {
        Some(winner) => println!("{:?} wins", winner),
        None => println!("Draw"),
    }
}

fn print_board(board: &TicTacToeBoard) {
    for row in 0..3 {
        let cells: Vec<&str> = (0..3)
            .map(|col| match board.cell(row * 3 + col) {
                Some(Player::First) => "X",
                Some(Player::Second) => "O",
                None => ".",
            })
            .collect();
        println!("{}", cells.join(" "));
    }
    println!();
}
