//! Move application and undo.
//!
//! This module is the only writer of [`Position`] state. Every transition
//! follows the same discipline: validate, mutate the placement, update the
//! derived fields, and return a reversible [`MoveRecord`], or reject with
//! no mutation at all. Undo reverses exactly the fields the record
//! captured.

use crate::movegen;
use crate::position::Position;
use chess_core::{
    CastlingRights, CastlingSide, CheckIndicator, Color, File, PartialSquare, Piece, PieceType,
    Rank, SanCastlingMove, SanMove, SanNormalMove, Square, UciMove,
};
use thiserror::Error;

/// Errors that can occur when applying a move.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("castling rights for this side are gone")]
    KingOrRookMoved,

    #[error("a piece stands between the king and its castling destination")]
    KingPathBlocked,

    #[error("a piece stands between the rook and its castling destination")]
    RookPathBlocked,

    #[error("the king's castling path is under attack")]
    KingPathUnderAttack,

    #[error("no piece can make this move")]
    NoValidOrigin,

    #[error("more than one piece can make this move")]
    AmbiguousOrigin,

    #[error("the piece cannot reach the destination")]
    IllegalMove,

    #[error("the piece at the origin belongs to the opponent")]
    WrongPieceColorAtOrigin,

    #[error("there is no piece at the origin square")]
    NoPieceAtOrigin,

    #[error("the move would leave the own king in check")]
    MoveLeavesOwnKingInCheck,

    #[error("promotion is only possible onto the promotion rank")]
    PromotionOnInvalidRank,

    #[error("only pawns can promote")]
    NonPawnPromotionAttempt,

    #[error("a pawn reaching the promotion rank must name a promotion piece")]
    MissingPromotionPiece,

    #[error("the halfmove clock would overflow")]
    HalfmoveClockOverflow,

    #[error("the fullmove number would overflow")]
    FullmoveNumberOverflow,
}

/// What the mutator captured about a normal move, sufficient for exact
/// undo and for the UCI/SAN projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NormalMoveRecord {
    pub piece_type: PieceType,
    pub partial_origin: PartialSquare,
    pub uci_move: UciMove,
    pub captured_piece_type: Option<PieceType>,
    pub is_en_passant_capture: bool,
    pub check_indicator: Option<CheckIndicator>,
    /// The rights before the move, captured only when the move changed them.
    pub previous_castling_rights: Option<CastlingRights>,
    pub previous_en_passant_file: Option<File>,
    pub previous_halfmove_clock: u32,
}

/// What the mutator captured about a castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CastlingMoveRecord {
    pub side: CastlingSide,
    pub color: Color,
    pub check_indicator: Option<CheckIndicator>,
    pub previous_castling_rights: CastlingRights,
    pub previous_en_passant_file: Option<File>,
}

/// A reversible record of one applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoveRecord {
    Normal(NormalMoveRecord),
    Castling(CastlingMoveRecord),
}

impl MoveRecord {
    /// Projects the record onto its UCI form.
    pub fn to_uci(&self) -> UciMove {
        match self {
            MoveRecord::Normal(record) => record.uci_move,
            MoveRecord::Castling(record) => UciMove::new(
                king_home(record.color),
                castling_king_destination(record.color, record.side),
            ),
        }
    }

    /// Projects the record onto its SAN form.
    pub fn to_san(&self) -> SanMove {
        match self {
            MoveRecord::Normal(record) => SanMove::Normal(SanNormalMove {
                piece_type: record.piece_type,
                origin: record.partial_origin,
                is_capture: record.captured_piece_type.is_some() || record.is_en_passant_capture,
                destination: record.uci_move.destination,
                promotion: record.uci_move.promotion,
                check_indicator: record.check_indicator,
            }),
            MoveRecord::Castling(record) => SanMove::Castling(SanCastlingMove {
                side: record.side,
                check_indicator: record.check_indicator,
            }),
        }
    }
}

/// The square a color's king starts on.
pub(crate) fn king_home(color: Color) -> Square {
    Square::new(File::E, Rank::back_rank(color))
}

/// The square a color's castling rook starts on.
pub(crate) fn rook_home(color: Color, side: CastlingSide) -> Square {
    let file = match side {
        CastlingSide::Kingside => File::H,
        CastlingSide::Queenside => File::A,
    };
    Square::new(file, Rank::back_rank(color))
}

/// The square the king lands on when castling.
pub(crate) fn castling_king_destination(color: Color, side: CastlingSide) -> Square {
    let file = match side {
        CastlingSide::Kingside => File::G,
        CastlingSide::Queenside => File::C,
    };
    Square::new(file, Rank::back_rank(color))
}

/// The square the rook lands on when castling.
fn castling_rook_destination(color: Color, side: CastlingSide) -> Square {
    let file = match side {
        CastlingSide::Kingside => File::F,
        CastlingSide::Queenside => File::D,
    };
    Square::new(file, Rank::back_rank(color))
}

/// Returns true if the side to move may castle on `side` right now.
pub(crate) fn castling_allowed(position: &Position, side: CastlingSide) -> bool {
    check_castling_legality(position, side).is_ok()
}

fn check_castling_legality(position: &Position, side: CastlingSide) -> Result<(), MoveError> {
    let color = position.active_color;
    if !position.castling_rights.can_castle(side, color) {
        return Err(MoveError::KingOrRookMoved);
    }

    let back = Rank::back_rank(color);
    let king_path: &[File] = match side {
        CastlingSide::Kingside => &[File::F, File::G],
        CastlingSide::Queenside => &[File::D, File::C],
    };
    for &file in king_path {
        if position.placement.piece_at(Square::new(file, back)).is_some() {
            return Err(MoveError::KingPathBlocked);
        }
    }
    // Kingside the rook's path is inside the king's; queenside the rook
    // additionally crosses the b-file.
    if side == CastlingSide::Queenside
        && position.placement.piece_at(Square::new(File::B, back)).is_some()
    {
        return Err(MoveError::RookPathBlocked);
    }

    let attacker = color.opposite();
    let transit = [Some(File::E), king_path.first().copied(), king_path.get(1).copied()];
    for file in transit.into_iter().flatten() {
        if crate::attacks::is_attacked(&position.placement, Square::new(file, back), attacker) {
            return Err(MoveError::KingPathUnderAttack);
        }
    }
    Ok(())
}

/// Applies a SAN move, resolving its possibly-partial origin against the
/// legal candidates.
pub(crate) fn apply_san(position: &mut Position, san: SanMove) -> Result<MoveRecord, MoveError> {
    match san {
        SanMove::Castling(mv) => execute_castling(position, mv.side),
        SanMove::Normal(mv) => {
            let piece = Piece::new(mv.piece_type, position.active_color);
            let candidates: Vec<Square> = movegen::legal_origins(position, mv.destination, piece)
                .iter()
                .filter(|&square| mv.origin.matches(square))
                .collect();
            let origin = match candidates.as_slice() {
                [] => return Err(MoveError::NoValidOrigin),
                [origin] => *origin,
                _ => return Err(MoveError::AmbiguousOrigin),
            };
            let uci = UciMove {
                origin,
                destination: mv.destination,
                promotion: mv.promotion,
            };
            execute_normal(position, piece, uci)
        }
    }
}

/// Applies a UCI move. A king moving from its home square to a castling
/// destination is treated as castling.
pub(crate) fn apply_uci(position: &mut Position, uci: UciMove) -> Result<MoveRecord, MoveError> {
    let color = position.active_color;
    if uci.promotion.is_none()
        && uci.origin == king_home(color)
        && position.placement.piece_at(uci.origin) == Some(Piece::new(PieceType::King, color))
    {
        for side in CastlingSide::ALL {
            if uci.destination == castling_king_destination(color, side) {
                return execute_castling(position, side);
            }
        }
    }

    let piece = position
        .placement
        .piece_at(uci.origin)
        .ok_or(MoveError::NoPieceAtOrigin)?;
    if piece.color != color {
        return Err(MoveError::WrongPieceColorAtOrigin);
    }
    if !movegen::pieces_reaching(position, uci.destination, piece).contains(uci.origin) {
        return Err(MoveError::IllegalMove);
    }
    execute_normal(position, piece, uci)
}

fn execute_normal(
    position: &mut Position,
    piece: Piece,
    uci: UciMove,
) -> Result<MoveRecord, MoveError> {
    let color = position.active_color;
    let is_pawn = piece.piece_type == PieceType::Pawn;
    let captured_at_destination = position.placement.piece_at(uci.destination);
    let is_en_passant_capture = is_pawn
        && captured_at_destination.is_none()
        && position.en_passant_target_square() == Some(uci.destination);
    let is_capture = captured_at_destination.is_some() || is_en_passant_capture;

    if color == Color::Black && position.fullmove_number == Position::MAX_FULLMOVE_NUMBER {
        return Err(MoveError::FullmoveNumberOverflow);
    }
    if !is_pawn && !is_capture && position.halfmove_clock == Position::MAX_HALFMOVE_CLOCK {
        return Err(MoveError::HalfmoveClockOverflow);
    }

    if uci.promotion.is_some() {
        if !is_pawn {
            return Err(MoveError::NonPawnPromotionAttempt);
        }
        if uci.destination.rank() != Rank::promotion_rank(color) {
            return Err(MoveError::PromotionOnInvalidRank);
        }
    } else if is_pawn && uci.destination.rank() == Rank::promotion_rank(color) {
        return Err(MoveError::MissingPromotionPiece);
    }

    let raw = movegen::RawMove {
        origin: uci.origin,
        destination: uci.destination,
    };
    if movegen::move_results_in_self_check(position, raw) {
        return Err(MoveError::MoveLeavesOwnKingInCheck);
    }

    // Everything validated; the projections are computed against the
    // pre-move position, then the mutation runs to completion.
    let partial_origin =
        movegen::minimal_partial_origin(position, piece, uci.origin, uci.destination, is_capture);
    let previous_rights = position.castling_rights;
    let new_rights = updated_castling_rights(previous_rights, uci.origin, uci.destination);
    let previous_en_passant_file = position.en_passant_file;
    let previous_halfmove_clock = position.halfmove_clock;

    if is_en_passant_capture {
        if let Some(captured_square) = uci.destination.behind(1, color) {
            position.placement.set_piece_at(captured_square, None);
        }
    }
    position.placement.relocate(uci.origin, uci.destination);
    if let Some(promotion) = uci.promotion {
        position
            .placement
            .set_piece_at(uci.destination, Some(Piece::new(promotion.piece_type(), color)));
    }

    position.castling_rights = new_rights;
    position.en_passant_file = double_push_file(piece, uci);
    position.halfmove_clock = if is_pawn || is_capture {
        0
    } else {
        position.halfmove_clock + 1
    };
    if color == Color::Black {
        position.fullmove_number += 1;
    }
    let check_indicator = finish(position);

    Ok(MoveRecord::Normal(NormalMoveRecord {
        piece_type: piece.piece_type,
        partial_origin,
        uci_move: uci,
        captured_piece_type: if is_en_passant_capture {
            Some(PieceType::Pawn)
        } else {
            captured_at_destination.map(|captured| captured.piece_type)
        },
        is_en_passant_capture,
        check_indicator,
        previous_castling_rights: (new_rights != previous_rights).then_some(previous_rights),
        previous_en_passant_file,
        previous_halfmove_clock,
    }))
}

fn execute_castling(position: &mut Position, side: CastlingSide) -> Result<MoveRecord, MoveError> {
    let color = position.active_color;
    if color == Color::Black && position.fullmove_number == Position::MAX_FULLMOVE_NUMBER {
        return Err(MoveError::FullmoveNumberOverflow);
    }
    // Castling is never a capture or a pawn move, so the clock always ticks.
    if position.halfmove_clock == Position::MAX_HALFMOVE_CLOCK {
        return Err(MoveError::HalfmoveClockOverflow);
    }
    check_castling_legality(position, side)?;

    let previous_castling_rights = position.castling_rights;
    let previous_en_passant_file = position.en_passant_file;

    position
        .placement
        .relocate(king_home(color), castling_king_destination(color, side));
    position
        .placement
        .relocate(rook_home(color, side), castling_rook_destination(color, side));
    position.castling_rights.disable_color(color);
    position.en_passant_file = None;
    position.halfmove_clock += 1;
    if color == Color::Black {
        position.fullmove_number += 1;
    }
    let check_indicator = finish(position);

    Ok(MoveRecord::Castling(CastlingMoveRecord {
        side,
        color,
        check_indicator,
        previous_castling_rights,
        previous_en_passant_file,
    }))
}

/// Hands the move over and classifies the check it delivers, if any.
fn finish(position: &mut Position) -> Option<CheckIndicator> {
    position.active_color = position.active_color.opposite();
    if !position.is_check() {
        None
    } else if movegen::has_legal_move(position) {
        Some(CheckIndicator::Check)
    } else {
        Some(CheckIndicator::Checkmate)
    }
}

/// Castling rights after a move touching `origin` and `destination`.
///
/// A king leaving its home square forfeits both rights; a rook leaving
/// its home square, or an enemy piece capturing on it, forfeits that side.
fn updated_castling_rights(
    rights: CastlingRights,
    origin: Square,
    destination: Square,
) -> CastlingRights {
    let mut rights = rights;
    for color in Color::ALL {
        if origin == king_home(color) {
            rights.disable_color(color);
        }
        for side in CastlingSide::ALL {
            let home = rook_home(color, side);
            if origin == home || destination == home {
                rights.disable(side, color);
            }
        }
    }
    rights
}

fn double_push_file(piece: Piece, uci: UciMove) -> Option<File> {
    let is_double_push = piece.piece_type == PieceType::Pawn
        && uci.origin.file() == uci.destination.file()
        && uci.origin.rank() == Rank::pawn_start_rank(piece.color)
        && uci.destination.rank() == Rank::double_push_rank(piece.color);
    is_double_push.then(|| uci.destination.file())
}

/// Reverses one applied move, restoring every field the record captured.
pub(crate) fn undo(position: &mut Position, record: &MoveRecord) {
    position.active_color = position.active_color.opposite();
    match record {
        MoveRecord::Normal(record) => {
            let color = position.active_color;
            let uci = record.uci_move;
            // Promotions reappear as the pawn that moved; captures other
            // than en passant reappear on the destination square.
            position
                .placement
                .set_piece_at(uci.origin, Some(Piece::new(record.piece_type, color)));
            let restored = if record.is_en_passant_capture {
                None
            } else {
                record
                    .captured_piece_type
                    .map(|piece_type| Piece::new(piece_type, color.opposite()))
            };
            position.placement.set_piece_at(uci.destination, restored);
            if record.is_en_passant_capture {
                if let Some(captured_square) = uci.destination.behind(1, color) {
                    position.placement.set_piece_at(
                        captured_square,
                        Some(Piece::new(PieceType::Pawn, color.opposite())),
                    );
                }
            }
            if let Some(rights) = record.previous_castling_rights {
                position.castling_rights = rights;
            }
            position.en_passant_file = record.previous_en_passant_file;
            position.halfmove_clock = record.previous_halfmove_clock;
            if color == Color::Black {
                position.fullmove_number -= 1;
            }
        }
        MoveRecord::Castling(record) => {
            let color = record.color;
            position
                .placement
                .relocate(castling_king_destination(color, record.side), king_home(color));
            position.placement.relocate(
                castling_rook_destination(color, record.side),
                rook_home(color, record.side),
            );
            position.castling_rights = record.previous_castling_rights;
            position.en_passant_file = record.previous_en_passant_file;
            position.halfmove_clock -= 1;
            if color == Color::Black {
                position.fullmove_number -= 1;
            }
        }
    }
}

/// Zeroes the halfmove clock and rewinds the fullmove number to its
/// minimum, leaving everything else untouched. Used by enumeration on
/// scratch copies so applying moves can never overflow a counter.
pub(crate) fn reset_move_counters(position: &mut Position) {
    position.halfmove_clock = 0;
    position.fullmove_number = Position::MIN_FULLMOVE_NUMBER;
}
