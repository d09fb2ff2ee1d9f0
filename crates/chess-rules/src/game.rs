//! Game: a position together with its move history, a repetition
//! tracker, and outcome derivation.

use crate::mutator::{self, MoveRecord};
use crate::position::{Position, RepetitionKey};
use crate::{movegen, MoveError};
use chess_core::{Color, SanMove, UciMove};
use std::collections::HashMap;

/// Occurrence counts of repetition-equivalent positions reached so far.
pub type RepetitionTracker = HashMap<RepetitionKey, u32>;

/// The result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

/// Why a game counts as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

/// A game of chess.
///
/// Tracks the current [`Position`] along with the position it started
/// from, the ordered move history (kept as reversible records with UCI
/// and SAN projections alongside), and a counter of repetition-equivalent
/// positions. The counter is maintained incrementally on every move and
/// undo; it is rebuilt from scratch only on [`reset`](Game::reset).
///
/// A failed move leaves the game completely unchanged. Two games compare
/// equal when they started from the same position and played the same
/// moves.
#[derive(Debug, Clone)]
pub struct Game {
    initial_position: Position,
    current_position: Position,
    move_history: Vec<MoveRecord>,
    uci_history: Vec<UciMove>,
    san_history: Vec<SanMove>,
    repetition_tracker: RepetitionTracker,
}

impl Game {
    /// Creates a game from the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::default())
    }

    /// Creates a game starting from an arbitrary position.
    pub fn from_position(position: Position) -> Self {
        let mut repetition_tracker = RepetitionTracker::new();
        repetition_tracker.insert(position.repetition_key(), 1);
        Game {
            initial_position: position.clone(),
            current_position: position,
            move_history: Vec::new(),
            uci_history: Vec::new(),
            san_history: Vec::new(),
            repetition_tracker,
        }
    }

    /// Plays a SAN move, or returns an error leaving the game unchanged.
    pub fn make_move_san(&mut self, mv: SanMove) -> Result<(), MoveError> {
        let record = mutator::apply_san(&mut self.current_position, mv)?;
        self.record_move(record);
        Ok(())
    }

    /// Plays a UCI move, or returns an error leaving the game unchanged.
    pub fn make_move_uci(&mut self, mv: UciMove) -> Result<(), MoveError> {
        let record = mutator::apply_uci(&mut self.current_position, mv)?;
        self.record_move(record);
        Ok(())
    }

    fn record_move(&mut self, record: MoveRecord) {
        self.uci_history.push(record.to_uci());
        self.san_history.push(record.to_san());
        self.move_history.push(record);
        *self
            .repetition_tracker
            .entry(self.current_position.repetition_key())
            .or_insert(0) += 1;
    }

    /// Takes back the last move. Does nothing on an empty history.
    pub fn undo_move(&mut self) {
        let Some(record) = self.move_history.pop() else {
            return;
        };
        let key = self.current_position.repetition_key();
        if let Some(count) = self.repetition_tracker.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.repetition_tracker.remove(&key);
            }
        }
        mutator::undo(&mut self.current_position, &record);
        self.uci_history.pop();
        self.san_history.pop();
    }

    /// Rewinds the game to its initial position, dropping the history.
    pub fn reset(&mut self) {
        self.current_position = self.initial_position.clone();
        self.move_history.clear();
        self.uci_history.clear();
        self.san_history.clear();
        self.repetition_tracker.clear();
        self.repetition_tracker
            .insert(self.current_position.repetition_key(), 1);
    }

    /// Returns the result of the game, or `None` while it is ongoing.
    pub fn result(&self) -> Option<GameResult> {
        if self.draw_reason().is_some() {
            return Some(GameResult::Draw);
        }
        if self.current_position.is_checkmate() {
            return Some(match self.current_position.active_color() {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            });
        }
        None
    }

    /// Returns why the game is drawn, or `None` if it is not.
    pub fn draw_reason(&self) -> Option<DrawReason> {
        if self.current_position.is_fifty_move_rule_draw() {
            return Some(DrawReason::FiftyMoveRule);
        }
        if self.current_position.is_insufficient_material_draw() {
            return Some(DrawReason::InsufficientMaterial);
        }
        let occurrences = self
            .repetition_tracker
            .get(&self.current_position.repetition_key());
        if occurrences.map_or(false, |&count| count >= 3) {
            return Some(DrawReason::ThreefoldRepetition);
        }
        if self.current_position.is_stalemate() {
            return Some(DrawReason::Stalemate);
        }
        None
    }

    /// Returns the current position.
    #[inline]
    pub fn current_position(&self) -> &Position {
        &self.current_position
    }

    /// Returns the position the game started from.
    #[inline]
    pub fn initial_position(&self) -> &Position {
        &self.initial_position
    }

    /// Returns true if the game started from the standard starting
    /// position.
    pub fn starts_from_default_position(&self) -> bool {
        self.initial_position == Position::default()
    }

    /// Returns the current piece placement.
    #[inline]
    pub fn placement(&self) -> &crate::PiecePlacement {
        self.current_position.placement()
    }

    /// Returns the color to move.
    #[inline]
    pub fn active_color(&self) -> Color {
        self.current_position.active_color()
    }

    /// Returns the current castling rights.
    #[inline]
    pub fn castling_rights(&self) -> chess_core::CastlingRights {
        self.current_position.castling_rights()
    }

    /// Returns the asserted en passant target square, if any.
    pub fn en_passant_target_square(&self) -> Option<chess_core::Square> {
        self.current_position.en_passant_target_square()
    }

    /// Returns the en passant target square only when the capture is
    /// actually legal.
    pub fn legal_en_passant_target_square(&self) -> Option<chess_core::Square> {
        self.current_position.legal_en_passant_target_square()
    }

    /// Returns the current halfmove clock.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.current_position.halfmove_clock()
    }

    /// Returns the current fullmove number.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.current_position.fullmove_number()
    }

    /// Returns true if the game is over.
    pub fn is_game_over(&self) -> bool {
        self.result().is_some()
    }

    /// Returns the moves played so far in UCI terms.
    #[inline]
    pub fn uci_moves(&self) -> &[UciMove] {
        &self.uci_history
    }

    /// Returns the moves played so far in SAN terms.
    #[inline]
    pub fn san_moves(&self) -> &[SanMove] {
        &self.san_history
    }

    /// Returns the repetition counter.
    #[inline]
    pub fn repetition_tracker(&self) -> &RepetitionTracker {
        &self.repetition_tracker
    }

    /// Returns every legal move from the current position in UCI terms.
    pub fn legal_uci_moves(&self) -> Vec<UciMove> {
        movegen::legal_uci_moves(&self.current_position)
    }

    /// Returns every legal move from the current position in SAN terms.
    pub fn legal_san_moves(&self) -> Vec<SanMove> {
        movegen::legal_san_moves(&self.current_position)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.initial_position == other.initial_position && self.uci_history == other.uci_history
    }
}

impl Eq for Game {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{PieceArray, PiecePlacement};
    use crate::position::PositionParams;
    use chess_core::{CastlingRights, CheckIndicator, File, Piece, PieceType, Rank, Square};

    fn sq(file: File, rank: Rank) -> Square {
        Square::new(file, rank)
    }

    fn uci(from: (File, Rank), to: (File, Rank)) -> UciMove {
        UciMove::new(sq(from.0, from.1), sq(to.0, to.1))
    }

    #[test]
    fn new_game_is_ongoing() {
        let game = Game::new();
        assert!(game.starts_from_default_position());
        assert_eq!(game.legal_uci_moves().len(), 20);
        assert_eq!(game.result(), None);
        assert_eq!(game.draw_reason(), None);
        assert!(game.uci_moves().is_empty());
        assert!(game.san_moves().is_empty());
        assert_eq!(game.repetition_tracker().len(), 1);
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        for mv in [
            uci((File::F, Rank::R2), (File::F, Rank::R3)),
            uci((File::E, Rank::R7), (File::E, Rank::R5)),
            uci((File::G, Rank::R2), (File::G, Rank::R4)),
            uci((File::D, Rank::R8), (File::H, Rank::R4)),
        ] {
            game.make_move_uci(mv).unwrap();
        }
        assert_eq!(game.result(), Some(GameResult::BlackWins));
        assert!(game.is_game_over());
        assert_eq!(game.draw_reason(), None);
        assert_eq!(game.uci_moves().len(), 4);
        match game.san_moves().last() {
            Some(SanMove::Normal(san)) => {
                assert_eq!(san.check_indicator, Some(CheckIndicator::Checkmate));
            }
            other => panic!("unexpected final move {other:?}"),
        }
    }

    #[test]
    fn failed_move_leaves_the_game_unchanged() {
        let mut game = Game::new();
        let before = game.clone();
        assert_eq!(
            game.make_move_uci(uci((File::E, Rank::R2), (File::E, Rank::R5))),
            Err(MoveError::IllegalMove)
        );
        assert_eq!(game, before);
        assert_eq!(game.current_position(), before.current_position());
        assert_eq!(game.repetition_tracker(), before.repetition_tracker());
    }

    #[test]
    fn undo_rewinds_position_and_histories() {
        let mut game = Game::new();
        game.make_move_uci(uci((File::E, Rank::R2), (File::E, Rank::R4)))
            .unwrap();
        game.make_move_uci(uci((File::C, Rank::R7), (File::C, Rank::R5)))
            .unwrap();

        game.undo_move();
        game.undo_move();
        assert_eq!(game.current_position(), &Position::default());
        assert!(game.uci_moves().is_empty());
        assert!(game.san_moves().is_empty());
        assert_eq!(game.repetition_tracker().len(), 1);
        assert_eq!(game, Game::new());

        // Undoing past the beginning is a no-op.
        game.undo_move();
        assert_eq!(game.current_position(), &Position::default());
    }

    #[test]
    fn threefold_repetition_is_a_draw() {
        let mut game = Game::new();
        let shuffle = [
            uci((File::G, Rank::R1), (File::F, Rank::R3)),
            uci((File::G, Rank::R8), (File::F, Rank::R6)),
            uci((File::F, Rank::R3), (File::G, Rank::R1)),
            uci((File::F, Rank::R6), (File::G, Rank::R8)),
        ];
        for mv in shuffle {
            game.make_move_uci(mv).unwrap();
        }
        assert_eq!(game.draw_reason(), None);
        for mv in shuffle {
            game.make_move_uci(mv).unwrap();
        }
        // The starting position has now occurred three times.
        assert_eq!(game.draw_reason(), Some(DrawReason::ThreefoldRepetition));
        assert_eq!(game.result(), Some(GameResult::Draw));

        // Undoing the last move takes the draw back off the table.
        game.undo_move();
        assert_eq!(game.draw_reason(), None);
        assert_eq!(game.result(), None);
    }

    #[test]
    fn reset_restores_the_initial_position() {
        let mut game = Game::new();
        game.make_move_uci(uci((File::E, Rank::R2), (File::E, Rank::R4)))
            .unwrap();
        game.reset();
        assert_eq!(game, Game::new());
        assert_eq!(game.current_position(), &Position::default());
        assert_eq!(game.repetition_tracker().len(), 1);
    }

    #[test]
    fn stalemate_and_insufficient_material_reasons() {
        let mut array: PieceArray = [None; Square::COUNT];
        array[sq(File::B, Rank::R6).index() as usize] =
            Some(Piece::new(PieceType::King, Color::White));
        array[sq(File::A, Rank::R8).index() as usize] =
            Some(Piece::new(PieceType::King, Color::Black));
        array[sq(File::C, Rank::R7).index() as usize] =
            Some(Piece::new(PieceType::Queen, Color::White));
        let stalemate = Game::from_position(
            Position::from_params(PositionParams {
                placement: PiecePlacement::from_array(array).unwrap(),
                active_color: Color::Black,
                castling_rights: CastlingRights::NONE,
                ..PositionParams::default()
            })
            .unwrap(),
        );
        assert!(!stalemate.starts_from_default_position());
        assert_eq!(stalemate.draw_reason(), Some(DrawReason::Stalemate));
        assert_eq!(stalemate.result(), Some(GameResult::Draw));

        let mut kings: PieceArray = [None; Square::COUNT];
        kings[sq(File::E, Rank::R1).index() as usize] =
            Some(Piece::new(PieceType::King, Color::White));
        kings[sq(File::E, Rank::R8).index() as usize] =
            Some(Piece::new(PieceType::King, Color::Black));
        let bare = Game::from_position(
            Position::from_params(PositionParams {
                placement: PiecePlacement::from_array(kings).unwrap(),
                castling_rights: CastlingRights::NONE,
                ..PositionParams::default()
            })
            .unwrap(),
        );
        assert_eq!(bare.draw_reason(), Some(DrawReason::InsufficientMaterial));
    }

    #[test]
    fn fifty_move_rule_reason() {
        let game = Game::from_position(
            Position::from_params(PositionParams {
                halfmove_clock: 100,
                ..PositionParams::default()
            })
            .unwrap(),
        );
        assert_eq!(game.draw_reason(), Some(DrawReason::FiftyMoveRule));
        assert_eq!(game.result(), Some(GameResult::Draw));
    }
}
