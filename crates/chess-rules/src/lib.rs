//! Chess rules engine.
//!
//! This crate maintains a legal chess position, generates legal moves,
//! applies and reverses them, and derives game outcomes:
//! - [`PiecePlacement`] - a validated 64-square board with a derived
//!   (color, piece type) index
//! - [`Position`] - placement plus side to move, castling rights,
//!   en passant file, and move counters, with cross-field validation
//! - [`Game`] - a position with move history, a repetition tracker, and
//!   result/draw-reason derivation
//! - [`legal_uci_moves`] / [`legal_san_moves`] - full legal-move
//!   enumeration, consumed by notation layers and perft tooling
//!
//! All mutation goes through a crate-private mutator that produces
//! reversible move records, so a failed move never changes observable
//! state and every applied move can be undone exactly.
//!
//! Text parsing and formatting of FEN/PGN/SAN/UCI strings are not part of
//! this crate; it exchanges structured [`chess_core`] values with the
//! notation layer.
//!
//! # Example
//!
//! ```
//! use chess_rules::Game;
//!
//! let mut game = Game::new();
//! assert_eq!(chess_rules::legal_uci_moves(game.current_position()).len(), 20);
//! assert_eq!(game.result(), None);
//! ```

mod attacks;
mod game;
mod movegen;
mod mutator;
mod placement;
mod position;

pub use game::{DrawReason, Game, GameResult, RepetitionTracker};
pub use movegen::{legal_san_moves, legal_uci_moves, perft, perft_divide};
pub use mutator::MoveError;
pub use placement::{PieceArray, PiecePlacement, PiecePlacementError};
pub use position::{Position, PositionError, PositionParams, RepetitionKey};
