//! Attack and reach queries over a piece placement.
//!
//! These are the reverse queries of move generation: given a target square,
//! which pieces of a color attack it or could move to it. Knight and king
//! use fixed offset tables; sliding pieces walk rays outward and stop at
//! the first occupied square; pawns special-case diagonal captures and
//! push-source reconstruction.

use crate::placement::PiecePlacement;
use chess_core::{Color, Piece, PieceType, Rank, Square, SquareSet};

/// Knight move offsets as (file, rank) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// King move offsets as (file, rank) deltas.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Rook ray directions.
pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Bishop ray directions.
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Walks a ray from `from` (exclusive) and returns the first occupied
/// square together with its piece, or `None` if the ray runs off-board.
fn first_piece_along(
    placement: &PiecePlacement,
    from: Square,
    direction: (i8, i8),
) -> Option<(Square, Piece)> {
    let mut square = from.offset(direction.0, direction.1);
    while let Some(sq) = square {
        if let Some(piece) = placement.piece_at(sq) {
            return Some((sq, piece));
        }
        square = sq.offset(direction.0, direction.1);
    }
    None
}

/// Returns true if `square` is attacked by any piece of `attacker`.
pub(crate) fn is_attacked(placement: &PiecePlacement, square: Square, attacker: Color) -> bool {
    // Pawns attack diagonally forward, so attackers sit one rank behind.
    let pawn = Piece::new(PieceType::Pawn, attacker);
    for file_delta in [-1, 1] {
        if let Some(origin) = square.offset(file_delta, -attacker.pawn_direction()) {
            if placement.piece_at(origin) == Some(pawn) {
                return true;
            }
        }
    }

    let knight = Piece::new(PieceType::Knight, attacker);
    for (df, dr) in KNIGHT_OFFSETS {
        if let Some(origin) = square.offset(df, dr) {
            if placement.piece_at(origin) == Some(knight) {
                return true;
            }
        }
    }

    let king = Piece::new(PieceType::King, attacker);
    for (df, dr) in KING_OFFSETS {
        if let Some(origin) = square.offset(df, dr) {
            if placement.piece_at(origin) == Some(king) {
                return true;
            }
        }
    }

    for direction in ROOK_DIRECTIONS {
        if let Some((_, piece)) = first_piece_along(placement, square, direction) {
            if piece.color == attacker
                && matches!(piece.piece_type, PieceType::Rook | PieceType::Queen)
            {
                return true;
            }
        }
    }

    for direction in BISHOP_DIRECTIONS {
        if let Some((_, piece)) = first_piece_along(placement, square, direction) {
            if piece.color == attacker
                && matches!(piece.piece_type, PieceType::Bishop | PieceType::Queen)
            {
                return true;
            }
        }
    }

    false
}

/// Returns true if `color`'s king is attacked by the opponent.
pub(crate) fn is_king_attacked(placement: &PiecePlacement, color: Color) -> bool {
    is_attacked(placement, placement.king_square(color), color.opposite())
}

/// Returns the squares of `color`'s pawns that attack `square` diagonally.
///
/// This is an attack query only; whether a capture is actually available
/// on the target is the caller's concern.
pub(crate) fn pawns_attacking(
    placement: &PiecePlacement,
    square: Square,
    color: Color,
) -> SquareSet {
    let pawn = Piece::new(PieceType::Pawn, color);
    let mut origins = SquareSet::EMPTY;
    for file_delta in [-1, 1] {
        if let Some(origin) = square.offset(file_delta, -color.pawn_direction()) {
            if placement.piece_at(origin) == Some(pawn) {
                origins.insert(origin);
            }
        }
    }
    origins
}

/// Reconstructs the origin of a pawn push of `color` landing on `square`.
///
/// The landing square must be empty (a push never captures). A double
/// push source is only considered when the landing square is that color's
/// double-push rank and the square passed over is empty.
pub(crate) fn pawn_push_origin(
    placement: &PiecePlacement,
    square: Square,
    color: Color,
) -> Option<Square> {
    if placement.piece_at(square).is_some() {
        return None;
    }
    let pawn = Piece::new(PieceType::Pawn, color);

    let one_behind = square.behind(1, color)?;
    match placement.piece_at(one_behind) {
        Some(piece) => (piece == pawn).then_some(one_behind),
        None => {
            if square.rank() != Rank::double_push_rank(color) {
                return None;
            }
            let two_behind = square.behind(2, color)?;
            (placement.piece_at(two_behind) == Some(pawn)).then_some(two_behind)
        }
    }
}

/// Returns the squares of pieces matching `piece_type`/`color` that reach
/// `square` via a fixed offset table.
fn offset_pieces_reaching(
    placement: &PiecePlacement,
    square: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
) -> SquareSet {
    let mut origins = SquareSet::EMPTY;
    for &(df, dr) in offsets {
        if let Some(origin) = square.offset(df, dr) {
            if placement.piece_at(origin) == Some(piece) {
                origins.insert(origin);
            }
        }
    }
    origins
}

/// Returns the squares of sliding pieces of exactly `piece.piece_type`
/// and `piece.color` whose ray reaches `square` unobstructed.
fn sliders_reaching(placement: &PiecePlacement, square: Square, piece: Piece) -> SquareSet {
    let directions: &[(i8, i8)] = match piece.piece_type {
        PieceType::Rook => &ROOK_DIRECTIONS,
        PieceType::Bishop => &BISHOP_DIRECTIONS,
        PieceType::Queen => &[
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
        ],
        _ => return SquareSet::EMPTY,
    };

    let mut origins = SquareSet::EMPTY;
    for &direction in directions {
        if let Some((origin, found)) = first_piece_along(placement, square, direction) {
            if found == piece {
                origins.insert(origin);
            }
        }
    }
    origins
}

/// Returns the squares of non-pawn pieces matching `piece` that could move
/// to `square` on an otherwise empty path (occupancy of the target itself
/// is not considered).
///
/// Pawns are handled at the position level, where pushes and en passant
/// context apply.
pub(crate) fn non_pawn_pieces_reaching(
    placement: &PiecePlacement,
    square: Square,
    piece: Piece,
) -> SquareSet {
    match piece.piece_type {
        PieceType::Knight => offset_pieces_reaching(placement, square, piece, &KNIGHT_OFFSETS),
        PieceType::King => offset_pieces_reaching(placement, square, piece, &KING_OFFSETS),
        PieceType::Rook | PieceType::Bishop | PieceType::Queen => {
            sliders_reaching(placement, square, piece)
        }
        PieceType::Pawn => SquareSet::EMPTY,
    }
}
