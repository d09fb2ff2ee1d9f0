//! Legal move generation, with UCI and SAN projections and perft tooling.
//!
//! Pseudo-legal moves are generated per piece type from the active color's
//! occupied squares, then filtered by simulating each candidate on a
//! scratch copy of the placement and rejecting any that leave the moving
//! side's own king attacked. Castling is generated separately.

use crate::attacks::{self, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};
use crate::mutator;
use crate::position::Position;
use chess_core::{
    CastlingSide, PartialSquare, Piece, PieceType, PromotablePieceType, Rank, SanMove, Square,
    SquareSet, UciMove,
};

/// An origin/destination pair before promotion expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawMove {
    pub origin: Square,
    pub destination: Square,
}

/// Returns every legal move from the position in UCI terms, with one
/// entry per promotion piece for promoting pawn moves.
pub fn legal_uci_moves(position: &Position) -> Vec<UciMove> {
    let color = position.active_color();
    let mut moves = Vec::new();

    for side in CastlingSide::ALL {
        if mutator::castling_allowed(position, side) {
            moves.push(UciMove::new(
                mutator::king_home(color),
                mutator::castling_king_destination(color, side),
            ));
        }
    }

    let promotion_rank = Rank::promotion_rank(color);
    for piece_type in PieceType::ALL {
        let piece = Piece::new(piece_type, color);
        for origin in position.placement().pieces(piece_type, color) {
            for destination in pseudo_legal_destinations(position, origin, piece) {
                if move_results_in_self_check(position, RawMove { origin, destination }) {
                    continue;
                }
                if piece_type == PieceType::Pawn && destination.rank() == promotion_rank {
                    for promotion in PromotablePieceType::ALL {
                        moves.push(UciMove::promoting(origin, destination, promotion));
                    }
                } else {
                    moves.push(UciMove::new(origin, destination));
                }
            }
        }
    }
    moves
}

/// Returns every legal move from the position in SAN terms, including
/// minimal origin disambiguation and check/checkmate annotation.
pub fn legal_san_moves(position: &Position) -> Vec<SanMove> {
    // Applying moves on a scratch copy computes the SAN projection (the
    // disambiguator and check indicator need the position context). The
    // counters are reset first so enumeration can never hit an overflow.
    let mut scratch = position.clone();
    mutator::reset_move_counters(&mut scratch);

    let mut moves = Vec::new();
    for uci in legal_uci_moves(position) {
        if let Ok(record) = mutator::apply_uci(&mut scratch, uci) {
            moves.push(record.to_san());
            mutator::undo(&mut scratch, &record);
        }
    }
    moves
}

/// Returns true if the side to move has at least one legal move.
///
/// Castling is not probed: a legal castling implies the king's first
/// transit square is empty and unattacked, so a plain king move exists.
pub(crate) fn has_legal_move(position: &Position) -> bool {
    let color = position.active_color();
    for piece_type in PieceType::ALL {
        let piece = Piece::new(piece_type, color);
        for origin in position.placement().pieces(piece_type, color) {
            for destination in pseudo_legal_destinations(position, origin, piece) {
                if !move_results_in_self_check(position, RawMove { origin, destination }) {
                    return true;
                }
            }
        }
    }
    false
}

/// Returns true if the asserted en passant target can actually be taken
/// by a pawn of the side to move without exposing its own king.
pub(crate) fn has_legal_en_passant_capture(position: &Position) -> bool {
    let Some(target) = position.en_passant_target_square() else {
        return false;
    };
    let color = position.active_color();
    attacks::pawns_attacking(position.placement(), target, color)
        .iter()
        .any(|origin| {
            !move_results_in_self_check(
                position,
                RawMove {
                    origin,
                    destination: target,
                },
            )
        })
}

/// Returns the squares of pieces matching `piece` that could move to
/// `target`, ignoring whether the move would expose the own king.
///
/// A target occupied by a piece of the same color is unreachable. Pawn
/// captures are only offered when the target holds an enemy piece or is
/// the en passant target square.
pub(crate) fn pieces_reaching(position: &Position, target: Square, piece: Piece) -> SquareSet {
    let placement = position.placement();
    if placement
        .piece_at(target)
        .map_or(false, |occupant| occupant.color == piece.color)
    {
        return SquareSet::EMPTY;
    }
    if piece.piece_type != PieceType::Pawn {
        return attacks::non_pawn_pieces_reaching(placement, target, piece);
    }

    let capture_available = placement.piece_at(target).is_some()
        || position.en_passant_target_square() == Some(target);
    let mut origins = if capture_available {
        attacks::pawns_attacking(placement, target, piece.color)
    } else {
        SquareSet::EMPTY
    };
    if let Some(origin) = attacks::pawn_push_origin(placement, target, piece.color) {
        origins.insert(origin);
    }
    origins
}

/// Like [`pieces_reaching`], but keeps only origins whose move does not
/// leave the own king attacked.
pub(crate) fn legal_origins(position: &Position, target: Square, piece: Piece) -> SquareSet {
    pieces_reaching(position, target, piece)
        .iter()
        .filter(|&origin| {
            !move_results_in_self_check(
                position,
                RawMove {
                    origin,
                    destination: target,
                },
            )
        })
        .collect()
}

/// Computes the minimal SAN origin disambiguator for a move: nothing if
/// the origin is unique among legal candidates, else the file if unique
/// in its file, else the rank if unique in its rank, else both. Pawns
/// disambiguate by file only, and only on captures.
pub(crate) fn minimal_partial_origin(
    position: &Position,
    piece: Piece,
    origin: Square,
    destination: Square,
    is_capture: bool,
) -> PartialSquare {
    if piece.piece_type == PieceType::Pawn {
        return if is_capture {
            PartialSquare::from_file(origin.file())
        } else {
            PartialSquare::ANY
        };
    }

    let candidates = legal_origins(position, destination, piece);
    if candidates.len() <= 1 {
        return PartialSquare::ANY;
    }
    let same_file = candidates
        .iter()
        .filter(|sq| sq.file() == origin.file())
        .count();
    if same_file == 1 {
        return PartialSquare::from_file(origin.file());
    }
    let same_rank = candidates
        .iter()
        .filter(|sq| sq.rank() == origin.rank())
        .count();
    if same_rank == 1 {
        return PartialSquare::from_rank(origin.rank());
    }
    PartialSquare::from_square(origin)
}

/// Returns true if making the move would leave the mover's own king
/// attacked. An en passant capture removes the captured pawn as part of
/// the simulation, since vacating its square can open a line.
pub(crate) fn move_results_in_self_check(position: &Position, raw: RawMove) -> bool {
    let color = position.active_color();
    let mut scratch = position.placement().clone();

    let moving_pawn = scratch.piece_at(raw.origin).map(|p| p.piece_type) == Some(PieceType::Pawn);
    if moving_pawn && position.en_passant_target_square() == Some(raw.destination) {
        if let Some(captured) = raw.destination.behind(1, color) {
            scratch.set_piece_at(captured, None);
        }
    }
    scratch.relocate(raw.origin, raw.destination);
    attacks::is_king_attacked(&scratch, color)
}

/// Generates the pseudo-legal destinations of the piece standing on
/// `origin` (moves into check are not yet filtered).
fn pseudo_legal_destinations(position: &Position, origin: Square, piece: Piece) -> SquareSet {
    let placement = position.placement();
    let mut destinations = SquareSet::EMPTY;

    match piece.piece_type {
        PieceType::Knight | PieceType::King => {
            let offsets = match piece.piece_type {
                PieceType::Knight => &KNIGHT_OFFSETS,
                _ => &KING_OFFSETS,
            };
            for &(df, dr) in offsets {
                if let Some(destination) = origin.offset(df, dr) {
                    if placement
                        .piece_at(destination)
                        .map_or(true, |occupant| occupant.color != piece.color)
                    {
                        destinations.insert(destination);
                    }
                }
            }
        }
        PieceType::Rook | PieceType::Bishop | PieceType::Queen => {
            let (orthogonal, diagonal) = match piece.piece_type {
                PieceType::Rook => (true, false),
                PieceType::Bishop => (false, true),
                _ => (true, true),
            };
            if orthogonal {
                for direction in ROOK_DIRECTIONS {
                    walk_ray(placement, origin, direction, piece, &mut destinations);
                }
            }
            if diagonal {
                for direction in BISHOP_DIRECTIONS {
                    walk_ray(placement, origin, direction, piece, &mut destinations);
                }
            }
        }
        PieceType::Pawn => {
            let color = piece.color;
            if let Some(one_ahead) = origin.ahead(1, color) {
                if placement.piece_at(one_ahead).is_none() {
                    destinations.insert(one_ahead);
                    if origin.rank() == Rank::pawn_start_rank(color) {
                        if let Some(two_ahead) = origin.ahead(2, color) {
                            if placement.piece_at(two_ahead).is_none() {
                                destinations.insert(two_ahead);
                            }
                        }
                    }
                }
            }
            let en_passant_target = position.en_passant_target_square();
            for file_delta in [-1, 1] {
                if let Some(destination) = origin.offset(file_delta, color.pawn_direction()) {
                    let is_enemy = placement
                        .piece_at(destination)
                        .map_or(false, |occupant| occupant.color != color);
                    if is_enemy || en_passant_target == Some(destination) {
                        destinations.insert(destination);
                    }
                }
            }
        }
    }
    destinations
}

fn walk_ray(
    placement: &crate::placement::PiecePlacement,
    origin: Square,
    direction: (i8, i8),
    piece: Piece,
    destinations: &mut SquareSet,
) {
    let mut square = origin.offset(direction.0, direction.1);
    while let Some(destination) = square {
        match placement.piece_at(destination) {
            None => {
                destinations.insert(destination);
                square = destination.offset(direction.0, direction.1);
            }
            Some(occupant) => {
                if occupant.color != piece.color {
                    destinations.insert(destination);
                }
                break;
            }
        }
    }
}

/// Counts the leaf nodes of the legal move tree to the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    let mut scratch = position.clone();
    mutator::reset_move_counters(&mut scratch);
    perft_inner(&mut scratch, depth)
}

/// Like [`perft`], but returns the node count below each root move.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(UciMove, u64)> {
    let mut scratch = position.clone();
    mutator::reset_move_counters(&mut scratch);

    let mut counts = Vec::new();
    if depth == 0 {
        return counts;
    }
    for uci in legal_uci_moves(&scratch) {
        if let Ok(record) = mutator::apply_uci(&mut scratch, uci) {
            counts.push((uci, perft_inner(&mut scratch, depth - 1)));
            mutator::undo(&mut scratch, &record);
        }
    }
    counts
}

fn perft_inner(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_uci_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for uci in moves {
        if let Ok(record) = mutator::apply_uci(position, uci) {
            nodes += perft_inner(position, depth - 1);
            mutator::undo(position, &record);
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{PieceArray, PiecePlacement};
    use crate::position::PositionParams;
    use chess_core::{CastlingRights, Color, File};

    fn sq(file: File, rank: Rank) -> Square {
        Square::new(file, rank)
    }

    fn placement_of(pieces: &[(Square, PieceType, Color)]) -> PiecePlacement {
        let mut array: PieceArray = [None; Square::COUNT];
        for &(square, piece_type, color) in pieces {
            array[square.index() as usize] = Some(Piece::new(piece_type, color));
        }
        PiecePlacement::from_array(array).unwrap()
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let position = Position::default();
        let moves = legal_uci_moves(&position);
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(&UciMove::new(sq(File::E, Rank::R2), sq(File::E, Rank::R4))));
        assert!(moves.contains(&UciMove::new(sq(File::G, Rank::R1), sq(File::F, Rank::R3))));
        assert_eq!(legal_san_moves(&position).len(), 20);
    }

    #[test]
    fn castling_moves_are_generated_on_a_clear_back_rank() {
        let mut rights = CastlingRights::NONE;
        rights.enable(CastlingSide::Kingside, Color::White);
        rights.enable(CastlingSide::Queenside, Color::White);
        let position = Position::from_params(PositionParams {
            placement: placement_of(&[
                (sq(File::E, Rank::R1), PieceType::King, Color::White),
                (sq(File::A, Rank::R1), PieceType::Rook, Color::White),
                (sq(File::H, Rank::R1), PieceType::Rook, Color::White),
                (sq(File::E, Rank::R8), PieceType::King, Color::Black),
            ]),
            castling_rights: rights,
            ..PositionParams::default()
        })
        .unwrap();
        let moves = legal_uci_moves(&position);
        assert!(moves.contains(&UciMove::new(sq(File::E, Rank::R1), sq(File::G, Rank::R1))));
        assert!(moves.contains(&UciMove::new(sq(File::E, Rank::R1), sq(File::C, Rank::R1))));
    }

    #[test]
    fn pinned_piece_has_no_moves() {
        // The e-file rook pins the knight to the white king.
        let position = Position::from_params(PositionParams {
            placement: placement_of(&[
                (sq(File::E, Rank::R1), PieceType::King, Color::White),
                (sq(File::E, Rank::R2), PieceType::Knight, Color::White),
                (sq(File::E, Rank::R8), PieceType::Rook, Color::Black),
                (sq(File::A, Rank::R8), PieceType::King, Color::Black),
            ]),
            castling_rights: CastlingRights::NONE,
            ..PositionParams::default()
        })
        .unwrap();
        let knight_moves: Vec<_> = legal_uci_moves(&position)
            .into_iter()
            .filter(|mv| mv.origin == sq(File::E, Rank::R2))
            .collect();
        assert!(knight_moves.is_empty());
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let position = Position::from_params(PositionParams {
            placement: placement_of(&[
                (sq(File::E, Rank::R1), PieceType::King, Color::White),
                (sq(File::E, Rank::R8), PieceType::King, Color::Black),
                (sq(File::E, Rank::R5), PieceType::Pawn, Color::White),
                (sq(File::D, Rank::R5), PieceType::Pawn, Color::Black),
            ]),
            castling_rights: CastlingRights::NONE,
            en_passant_target_square: Some(sq(File::D, Rank::R6)),
            ..PositionParams::default()
        })
        .unwrap();
        assert!(has_legal_en_passant_capture(&position));
        assert!(legal_uci_moves(&position)
            .contains(&UciMove::new(sq(File::E, Rank::R5), sq(File::D, Rank::R6))));
    }

    #[test]
    fn en_passant_capture_exposing_the_king_is_rejected() {
        // King and enemy rook share the fifth rank; taking en passant
        // removes both pawns from it and uncovers the check.
        let position = Position::from_params(PositionParams {
            placement: placement_of(&[
                (sq(File::H, Rank::R5), PieceType::King, Color::White),
                (sq(File::E, Rank::R8), PieceType::King, Color::Black),
                (sq(File::E, Rank::R5), PieceType::Pawn, Color::White),
                (sq(File::D, Rank::R5), PieceType::Pawn, Color::Black),
                (sq(File::A, Rank::R5), PieceType::Rook, Color::Black),
            ]),
            castling_rights: CastlingRights::NONE,
            en_passant_target_square: Some(sq(File::D, Rank::R6)),
            ..PositionParams::default()
        })
        .unwrap();
        assert!(!has_legal_en_passant_capture(&position));
        assert!(!legal_uci_moves(&position)
            .contains(&UciMove::new(sq(File::E, Rank::R5), sq(File::D, Rank::R6))));
    }

    #[test]
    fn promotion_expands_into_four_moves() {
        let position = Position::from_params(PositionParams {
            placement: placement_of(&[
                (sq(File::E, Rank::R1), PieceType::King, Color::White),
                (sq(File::E, Rank::R8), PieceType::King, Color::Black),
                (sq(File::A, Rank::R7), PieceType::Pawn, Color::White),
            ]),
            castling_rights: CastlingRights::NONE,
            ..PositionParams::default()
        })
        .unwrap();
        let promotions: Vec<_> = legal_uci_moves(&position)
            .into_iter()
            .filter(|mv| mv.origin == sq(File::A, Rank::R7))
            .collect();
        assert_eq!(promotions.len(), 4);
        assert!(promotions.iter().all(|mv| mv.promotion.is_some()));
        assert!(promotions.contains(&UciMove::promoting(
            sq(File::A, Rank::R7),
            sq(File::A, Rank::R8),
            PromotablePieceType::Queen
        )));
    }

    #[test]
    fn disambiguation_picks_the_minimal_origin() {
        // Rooks on a1 and h1: same rank, different files.
        let two_rooks = Position::from_params(PositionParams {
            placement: placement_of(&[
                (sq(File::E, Rank::R2), PieceType::King, Color::White),
                (sq(File::E, Rank::R8), PieceType::King, Color::Black),
                (sq(File::A, Rank::R1), PieceType::Rook, Color::White),
                (sq(File::H, Rank::R1), PieceType::Rook, Color::White),
            ]),
            castling_rights: CastlingRights::NONE,
            ..PositionParams::default()
        })
        .unwrap();
        let rook = Piece::new(PieceType::Rook, Color::White);
        assert_eq!(
            minimal_partial_origin(
                &two_rooks,
                rook,
                sq(File::A, Rank::R1),
                sq(File::D, Rank::R1),
                false
            ),
            PartialSquare::from_file(File::A)
        );

        // A lone piece needs no disambiguator.
        assert_eq!(
            minimal_partial_origin(
                &two_rooks,
                rook,
                sq(File::A, Rank::R1),
                sq(File::A, Rank::R5),
                false
            ),
            PartialSquare::ANY
        );
    }

    #[test]
    fn pawn_capture_disambiguates_by_file_only() {
        let position = Position::default();
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        assert_eq!(
            minimal_partial_origin(
                &position,
                pawn,
                sq(File::E, Rank::R2),
                sq(File::D, Rank::R3),
                true
            ),
            PartialSquare::from_file(File::E)
        );
        assert_eq!(
            minimal_partial_origin(
                &position,
                pawn,
                sq(File::E, Rank::R2),
                sq(File::E, Rank::R4),
                false
            ),
            PartialSquare::ANY
        );
    }
}
