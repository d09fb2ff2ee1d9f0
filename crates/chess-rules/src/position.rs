//! Position: a placement plus side to move, castling rights, en passant
//! file, and move counters, with cross-field validation.

use crate::attacks;
use crate::movegen;
use crate::placement::{PieceArray, PiecePlacement};
use chess_core::{CastlingRights, CastlingSide, Color, File, Piece, PieceType, Rank, Square};
use thiserror::Error;

/// Errors that can occur when constructing a [`Position`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("the side not to move is under attack")]
    SideNotToMoveIsUnderAttack,

    #[error("the fullmove number is out of range")]
    FullmoveNumberOutOfRange,

    #[error("the halfmove clock is out of range")]
    HalfmoveClockOutOfRange,

    #[error("castling rights are inconsistent with piece positions")]
    CastlingRightsWithoutMatchingPieces,

    #[error("the en passant target square is occupied")]
    EnPassantTargetSquareOccupied,

    #[error("no enemy pawn could have produced the en passant target square")]
    EnPassantNoCapturablePawn,

    #[error("the en passant target square is on an invalid rank")]
    EnPassantTargetSquareInvalidRank,
}

/// The parameters a [`Position`] is constructed from.
///
/// The en passant target is asserted as a full square, as notation layers
/// carry it; the position itself stores only the file and derives the rank
/// from the active color.
#[derive(Debug, Clone)]
pub struct PositionParams {
    pub placement: PiecePlacement,
    pub active_color: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target_square: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for PositionParams {
    /// Parameters for the standard starting position.
    fn default() -> Self {
        PositionParams {
            placement: PiecePlacement::default(),
            active_color: Color::White,
            castling_rights: CastlingRights::ALL,
            en_passant_target_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

/// A chess position.
///
/// Combines a [`PiecePlacement`] with the active color, castling rights,
/// an optional en passant file, the halfmove clock, and the fullmove
/// number. Construction validates the cross-field invariants (the side
/// not to move is not in check, asserted castling rights match pieces on
/// their home squares, an asserted en passant target is consistent with a
/// just-played double push); afterwards the position changes only through
/// the crate's move mutator, which preserves them.
///
/// Equality and hashing cover every field. The looser equivalence used
/// for repetition counting is exposed separately as [`RepetitionKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) placement: PiecePlacement,
    pub(crate) active_color: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_file: Option<File>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// The smallest valid fullmove number.
    pub const MIN_FULLMOVE_NUMBER: u32 = 1;
    /// The largest representable fullmove number.
    pub const MAX_FULLMOVE_NUMBER: u32 = u32::MAX;
    /// The largest representable halfmove clock.
    pub const MAX_HALFMOVE_CLOCK: u32 = u32::MAX;

    /// The halfmove clock value at which the fifty-move rule applies.
    pub(crate) const FIFTY_MOVE_RULE_CLOCK: u32 = 100;

    /// Creates a position from parameters, or returns an error if
    /// cross-field validation fails.
    ///
    /// The halfmove clock bound is enforced by its type; the dedicated
    /// error kind is produced only by callers widening the clock.
    pub fn from_params(params: PositionParams) -> Result<Self, PositionError> {
        if let Some(target) = params.en_passant_target_square {
            if target.rank() != Rank::en_passant_rank(params.active_color) {
                return Err(PositionError::EnPassantTargetSquareInvalidRank);
            }
        }
        if params.fullmove_number < Self::MIN_FULLMOVE_NUMBER {
            return Err(PositionError::FullmoveNumberOutOfRange);
        }
        validate_castling_rights(&params.placement, params.castling_rights)?;
        if let Some(target) = params.en_passant_target_square {
            if params.placement.piece_at(target).is_some() {
                return Err(PositionError::EnPassantTargetSquareOccupied);
            }
            let pawn_square = target
                .behind(1, params.active_color)
                .ok_or(PositionError::EnPassantNoCapturablePawn)?;
            let expected = Piece::new(PieceType::Pawn, params.active_color.opposite());
            if params.placement.piece_at(pawn_square) != Some(expected) {
                return Err(PositionError::EnPassantNoCapturablePawn);
            }
        }
        if attacks::is_king_attacked(&params.placement, params.active_color.opposite()) {
            return Err(PositionError::SideNotToMoveIsUnderAttack);
        }

        Ok(Position {
            placement: params.placement,
            active_color: params.active_color,
            castling_rights: params.castling_rights,
            en_passant_file: params.en_passant_target_square.map(|sq| sq.file()),
            halfmove_clock: params.halfmove_clock,
            fullmove_number: params.fullmove_number,
        })
    }

    /// Returns the piece placement.
    #[inline]
    pub fn placement(&self) -> &PiecePlacement {
        &self.placement
    }

    /// Returns the color to move.
    #[inline]
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    /// Returns the castling rights.
    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Returns the en passant file, if a double push just occurred.
    #[inline]
    pub fn en_passant_file(&self) -> Option<File> {
        self.en_passant_file
    }

    /// Returns the asserted en passant target square, whether or not an en
    /// passant capture is actually legal.
    pub fn en_passant_target_square(&self) -> Option<Square> {
        self.en_passant_file
            .map(|file| Square::new(file, Rank::en_passant_rank(self.active_color)))
    }

    /// Returns the en passant target square only when an en passant
    /// capture is actually legal for the side to move.
    pub fn legal_en_passant_target_square(&self) -> Option<Square> {
        self.en_passant_target_square()
            .filter(|_| movegen::has_legal_en_passant_capture(self))
    }

    /// Returns the number of halfmoves since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the fullmove number, starting at 1.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        attacks::is_king_attacked(&self.placement, self.active_color)
    }

    /// Returns true if the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !movegen::has_legal_move(self)
    }

    /// Returns true if the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !movegen::has_legal_move(self)
    }

    /// Returns true if the fifty-move rule applies: the halfmove clock has
    /// reached 100 and a legal move exists. Checkmate and stalemate take
    /// precedence over the clock.
    pub fn is_fifty_move_rule_draw(&self) -> bool {
        self.halfmove_clock >= Self::FIFTY_MOVE_RULE_CLOCK && movegen::has_legal_move(self)
    }

    /// Returns true if neither side has enough material to mate.
    pub fn is_insufficient_material_draw(&self) -> bool {
        self.placement.is_insufficient_material()
    }

    /// Returns true if the position is drawn by stalemate, the fifty-move
    /// rule, or insufficient material.
    pub fn is_draw(&self) -> bool {
        self.is_stalemate() || self.is_fifty_move_rule_draw() || self.is_insufficient_material_draw()
    }

    /// Returns true if the position is checkmate or drawn.
    pub fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    /// Returns the key under which this position counts toward threefold
    /// repetition.
    pub fn repetition_key(&self) -> RepetitionKey {
        RepetitionKey {
            board: *self.placement.piece_array(),
            active_color: self.active_color,
            castling_rights: self.castling_rights,
            en_passant_file: self.legal_en_passant_target_square().map(|sq| sq.file()),
        }
    }
}

impl Default for Position {
    /// The standard starting position.
    fn default() -> Self {
        Position {
            placement: PiecePlacement::default(),
            active_color: Color::White,
            castling_rights: CastlingRights::ALL,
            en_passant_file: None,
            halfmove_clock: 0,
            fullmove_number: Self::MIN_FULLMOVE_NUMBER,
        }
    }
}

/// The equivalence class a position belongs to for repetition counting.
///
/// Two positions repeat each other when the pieces, the side to move, and
/// the castling rights coincide; move counters are ignored, and the en
/// passant file counts only when an en passant capture is actually legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    board: PieceArray,
    active_color: Color,
    castling_rights: CastlingRights,
    en_passant_file: Option<File>,
}

fn validate_castling_rights(
    placement: &PiecePlacement,
    rights: CastlingRights,
) -> Result<(), PositionError> {
    for color in Color::ALL {
        let back = Rank::back_rank(color);
        for side in CastlingSide::ALL {
            if !rights.can_castle(side, color) {
                continue;
            }
            let king_home = Square::new(File::E, back);
            let rook_file = match side {
                CastlingSide::Kingside => File::H,
                CastlingSide::Queenside => File::A,
            };
            let rook_home = Square::new(rook_file, back);
            let king_ok =
                placement.piece_at(king_home) == Some(Piece::new(PieceType::King, color));
            let rook_ok =
                placement.piece_at(rook_home) == Some(Piece::new(PieceType::Rook, color));
            if !king_ok || !rook_ok {
                return Err(PositionError::CastlingRightsWithoutMatchingPieces);
            }
        }
    }
    Ok(())
}
