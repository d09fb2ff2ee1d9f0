use chess_rules::{
    legal_san_moves, legal_uci_moves, perft, perft_divide, Game, GameResult, PieceArray,
    PiecePlacement, Position, PositionParams,
};

use chess_core::{
    CastlingRights, Color, File, PartialSquare, Piece, PieceType, Rank, SanMove, SanNormalMove,
    Square, UciMove,
};
use proptest::prelude::*;

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
fn perft_matches_known_node_counts() {
    let position = Position::default();
    assert_eq!(perft(&position, 0), 1);
    assert_eq!(perft(&position, 1), 20);
    assert_eq!(perft(&position, 2), 400);
    assert_eq!(perft(&position, 3), 8_902);
    assert_eq!(perft(&position, 4), 197_281);
}

#[test]
fn perft_divide_sums_to_perft() {
    let position = Position::default();
    let divided = perft_divide(&position, 3);
    assert_eq!(divided.len(), 20);
    assert_eq!(divided.iter().map(|(_, nodes)| nodes).sum::<u64>(), 8_902);
}

#[test]
fn perft_endgame_with_pins_and_en_passant() {
    // A sparse endgame whose move tree covers pins, en passant, and
    // pawn promotion branches.
    let position = Position::from_params(PositionParams {
        placement: placement_of(&[
            (sq(File::A, Rank::R5), PieceType::King, Color::White),
            (sq(File::B, Rank::R5), PieceType::Pawn, Color::White),
            (sq(File::B, Rank::R4), PieceType::Rook, Color::White),
            (sq(File::E, Rank::R2), PieceType::Pawn, Color::White),
            (sq(File::G, Rank::R2), PieceType::Pawn, Color::White),
            (sq(File::C, Rank::R7), PieceType::Pawn, Color::Black),
            (sq(File::D, Rank::R6), PieceType::Pawn, Color::Black),
            (sq(File::H, Rank::R5), PieceType::Rook, Color::Black),
            (sq(File::F, Rank::R4), PieceType::Pawn, Color::Black),
            (sq(File::H, Rank::R4), PieceType::King, Color::Black),
        ]),
        castling_rights: CastlingRights::NONE,
        ..PositionParams::default()
    })
    .unwrap();
    assert_eq!(perft(&position, 1), 14);
    assert_eq!(perft(&position, 2), 191);
    assert_eq!(perft(&position, 3), 2_812);
}

#[test]
fn san_and_uci_enumerations_agree() {
    let position = Position::default();
    assert_eq!(
        legal_san_moves(&position).len(),
        legal_uci_moves(&position).len()
    );
}

#[test]
fn scholars_mate_through_the_san_interface() {
    fn normal(piece_type: PieceType, destination: Square, is_capture: bool) -> SanMove {
        SanMove::Normal(SanNormalMove {
            piece_type,
            origin: PartialSquare::ANY,
            is_capture,
            destination,
            promotion: None,
            check_indicator: None,
        })
    }

    let mut game = Game::new();
    let moves = [
        normal(PieceType::Pawn, sq(File::E, Rank::R4), false),
        normal(PieceType::Pawn, sq(File::E, Rank::R5), false),
        normal(PieceType::Bishop, sq(File::C, Rank::R4), false),
        normal(PieceType::Knight, sq(File::C, Rank::R6), false),
        normal(PieceType::Queen, sq(File::H, Rank::R5), false),
        normal(PieceType::Knight, sq(File::F, Rank::R6), false),
        normal(PieceType::Queen, sq(File::F, Rank::R7), true),
    ];
    for mv in moves {
        game.make_move_san(mv).unwrap();
    }
    assert_eq!(game.result(), Some(GameResult::WhiteWins));
    assert_eq!(game.san_moves().len(), 7);
    assert_eq!(
        game.uci_moves().last(),
        Some(&UciMove::new(sq(File::H, Rank::R5), sq(File::F, Rank::R7)))
    );
}

proptest! {
    #[test]
    fn undo_restores_every_intermediate_position(
        choices in prop::collection::vec(any::<prop::sample::Index>(), 0..40),
    ) {
        let mut game = Game::new();
        let mut snapshots = vec![game.current_position().clone()];
        for choice in choices {
            let moves = game.legal_uci_moves();
            if moves.is_empty() {
                break;
            }
            game.make_move_uci(moves[choice.index(moves.len())]).unwrap();
            snapshots.push(game.current_position().clone());
        }

        while snapshots.len() > 1 {
            snapshots.pop();
            game.undo_move();
            prop_assert_eq!(game.current_position(), snapshots.last().unwrap());
        }
        prop_assert_eq!(game.current_position(), &Position::default());
        prop_assert_eq!(&game, &Game::new());
    }

    #[test]
    fn every_legal_move_is_accepted_by_the_mutator(
        choices in prop::collection::vec(any::<prop::sample::Index>(), 0..12),
    ) {
        // Walk a random line, then verify the full enumeration of the
        // reached position round-trips through apply and undo.
        let mut game = Game::new();
        for choice in choices {
            let moves = game.legal_uci_moves();
            if moves.is_empty() {
                break;
            }
            game.make_move_uci(moves[choice.index(moves.len())]).unwrap();
        }

        let before = game.current_position().clone();
        for mv in game.legal_uci_moves() {
            game.make_move_uci(mv).unwrap();
            game.undo_move();
            prop_assert_eq!(game.current_position(), &before);
        }
    }
}
