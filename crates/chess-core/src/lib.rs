//! Core value types for chess.
//!
//! This crate provides the fundamental types shared by the rules engine and
//! its consumers:
//! - [`Color`] for the two players
//! - [`File`], [`Rank`], and [`Square`] for board coordinates
//! - [`SquareSet`] for sets of squares
//! - [`PieceType`], [`PromotablePieceType`], and [`Piece`]
//! - [`CastlingSide`] and [`CastlingRights`]
//! - [`UciMove`] and [`SanMove`] move representations
//!
//! No rules logic lives here; these are plain values consumed by the
//! `chess-rules` crate and by notation layers built on top of it.

mod castling;
mod color;
mod moves;
mod piece;
mod square;
mod square_set;

pub use castling::{CastlingRights, CastlingSide};
pub use color::Color;
pub use moves::{
    CheckIndicator, PartialSquare, SanCastlingMove, SanMove, SanNormalMove, UciMove,
};
pub use piece::{Piece, PieceType, PromotablePieceType};
pub use square::{File, Rank, Square};
pub use square_set::SquareSet;
