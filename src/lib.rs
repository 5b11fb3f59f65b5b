//! Move selection for two-player, perfect-information, zero-sum board games.
//!
//! Two interchangeable engines search a tree of positions built from any rules engine
//! that implements [`GameState`]:
//!
//! - [`MinimaxSearch`], depth-limited minimax with optional alpha-beta pruning.
//! - [`MonteCarloTreeSearch`], UCT-guided Monte Carlo tree search with random rollouts,
//!   bounded by a time budget and an iteration cap.
//!
//! Every tree node owns a private copy of its position, and each search invocation owns
//! its whole tree, so nothing is shared between searches or with the caller.
//!
//! # Example
//!
//! ```rust
//! use duel_search::games::nim::Nim;
//! use duel_search::random::CustomNumberGenerator;
//! use duel_search::{select_move, MctsConfig, MinimaxConfig, Player, Strategy};
//! use std::time::Duration;
//!
//! // Five stones, take one to three per turn, whoever takes the last stone wins
//! let state = Nim::new(5);
//! let mut random = CustomNumberGenerator::default();
//!
//! let minimax = Strategy::Minimax(MinimaxConfig::default().with_max_depth(4));
//! let best = select_move(&state, Player::First, minimax, &mut random).unwrap();
//! assert_eq!(best, 1);
//!
//! let mcts = Strategy::MonteCarlo(
//!     MctsConfig::default()
//!         .with_time_budget(Duration::from_millis(200))
//!         .with_max_iterations(1000),
//! );
//! let chosen = select_move(&state, Player::First, mcts, &mut random).unwrap();
//! println!("Monte Carlo plays: {:?}", chosen);
//! ```

/// TOML-backed configuration of the move selector.
pub mod config;
/// Error types.
pub mod error;
/// The `GameState` trait every rules engine implements, and the `Player` identity.
pub mod game;
/// Ready-made rules engines for tests and demos.
pub mod games;
/// Monte Carlo Tree Search engine.
pub mod mcts;
/// Minimax engine with alpha-beta pruning.
pub mod minimax;
/// Random number sources for the engines.
pub mod random;
/// Tree node type and the estimate used to rank nodes.
pub mod search_node;
/// Strategy selection glue.
pub mod strategy;
/// Arena-backed search tree.
pub mod tree;
/// UCT scoring.
pub mod uct;

pub use config::{EngineConfig, StrategyKind};
pub use error::{ConfigError, SearchError};
pub use game::{GameState, Player};
pub use mcts::{MctsConfig, MctsReport, MonteCarloTreeSearch, MonteCarloTreeSearchBuilder};
pub use minimax::{MinimaxConfig, MinimaxReport, MinimaxSearch};
pub use strategy::{select_move, Strategy};
