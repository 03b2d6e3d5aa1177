//! sevens-rs: engine for Sevens (Fan Tan), the four-player shedding game.
//!
//! Goals:
//! - Immutable game snapshots and a pure `apply(state, event)` transition
//! - Explicit errors for out-of-turn moves, phantom cards and post-game events
//! - Randomness always injected, so every game can be replayed from a seed
//!
//! ## Quick start: open the game
//! ```
//! use sevens_rs::cards::Card;
//! use sevens_rs::game::{GameEvent, GameState};
//!
//! let state = GameState::initialize_seeded(42).unwrap();
//! let opener = state.current_player();
//! assert_eq!(state.holder_of(Card::SEVEN_OF_HEARTS), Some(opener));
//!
//! let next = state.apply(GameEvent::play(opener, Card::SEVEN_OF_HEARTS)).unwrap();
//! assert_eq!(next.runs().card_count(), 1);
//! assert_eq!(next.current_player(), (opener + 1) % 4);
//! ```
//!
//! ## Front ends
//! ```sh
//! cargo run --bin sevens                      # interactive TUI
//! cargo run --bin sevens-sim -- --games 1000  # headless bot tournament
//! ```

pub mod agents;
pub mod cards;
pub mod deck;
pub mod driver;
pub mod engine;
pub mod game;
pub mod runs;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
