//! Piece placement: the board array and its derived location index.

use chess_core::{Color, Piece, PieceType, Rank, Square, SquareSet};
use thiserror::Error;

/// A full board: one optional piece per square, indexed by square index.
pub type PieceArray = [Option<Piece>; Square::COUNT];

/// Errors that can occur when constructing a [`PiecePlacement`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PiecePlacementError {
    #[error("one side is missing its king")]
    MissingKing,

    #[error("a side has more than one king")]
    MultipleKingsOfSameColor,

    #[error("a pawn stands on its own back rank")]
    PawnOnBackRank,

    #[error("an unpromoted pawn stands on its promotion rank")]
    PawnOnPromotionRank,
}

/// The placement of pieces on a chess board.
///
/// Holds the 64-slot piece array together with a derived index from
/// (color, piece type) to the set of occupied squares; the two are kept
/// consistent on every mutation. The public API is read-only: mutation is
/// reserved to this crate's position mutator so the construction
/// invariants (exactly one king per color, no pawn on a back or promotion
/// rank) cannot be broken from outside.
#[derive(Clone)]
pub struct PiecePlacement {
    board: PieceArray,
    locations: [[SquareSet; PieceType::ALL.len()]; 2],
}

impl PiecePlacement {
    /// Creates a placement from a piece array, or returns an error if
    /// validation fails.
    pub fn from_array(array: PieceArray) -> Result<Self, PiecePlacementError> {
        let placement = Self::from_array_unvalidated(array);
        match placement.validation_error() {
            Some(error) => Err(error),
            None => Ok(placement),
        }
    }

    fn from_array_unvalidated(array: PieceArray) -> Self {
        let mut placement = PiecePlacement {
            board: [None; Square::COUNT],
            locations: [[SquareSet::EMPTY; PieceType::ALL.len()]; 2],
        };
        for (index, piece) in array.iter().enumerate() {
            if let Some(square) = Square::from_index(index as u8) {
                placement.set_piece_at(square, *piece);
            }
        }
        placement
    }

    fn validation_error(&self) -> Option<PiecePlacementError> {
        for color in Color::ALL {
            if self.pieces(PieceType::King, color).is_empty() {
                return Some(PiecePlacementError::MissingKing);
            }
        }
        for color in Color::ALL {
            if self.pieces(PieceType::King, color).len() != 1 {
                return Some(PiecePlacementError::MultipleKingsOfSameColor);
            }
        }
        for color in Color::ALL {
            if self.has_pawn_on_rank(color, Rank::back_rank(color)) {
                return Some(PiecePlacementError::PawnOnBackRank);
            }
        }
        for color in Color::ALL {
            if self.has_pawn_on_rank(color, Rank::promotion_rank(color)) {
                return Some(PiecePlacementError::PawnOnPromotionRank);
            }
        }
        None
    }

    fn has_pawn_on_rank(&self, color: Color, rank: Rank) -> bool {
        self.pieces(PieceType::Pawn, color)
            .iter()
            .any(|square| square.rank() == rank)
    }

    /// Returns the piece standing on the square, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index() as usize]
    }

    /// Returns the full piece array.
    #[inline]
    pub fn piece_array(&self) -> &PieceArray {
        &self.board
    }

    /// Returns the squares occupied by pieces of the given type and color.
    #[inline]
    pub fn pieces(&self, piece_type: PieceType, color: Color) -> SquareSet {
        self.locations[color.index()][piece_type.index()]
    }

    /// Returns the number of pieces of the given color.
    pub fn piece_count(&self, color: Color) -> u32 {
        self.locations[color.index()]
            .iter()
            .map(|set| set.len())
            .sum()
    }

    /// Returns the square of the given color's king.
    ///
    /// Every validated placement has exactly one king per color.
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces(PieceType::King, color)
            .first()
            .expect("a validated placement has a king of each color")
    }

    /// Places (or clears, with `None`) a piece on a square, updating the
    /// board array and the location index together.
    pub(crate) fn set_piece_at(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(previous) = self.board[square.index() as usize] {
            self.locations[previous.color.index()][previous.piece_type.index()].remove(square);
        }
        if let Some(new_piece) = piece {
            self.locations[new_piece.color.index()][new_piece.piece_type.index()].insert(square);
        }
        self.board[square.index() as usize] = piece;
    }

    /// Moves whatever stands on `origin` to `destination`, clearing the
    /// origin. The destination's previous occupant, if any, is removed.
    pub(crate) fn relocate(&mut self, origin: Square, destination: Square) {
        let piece = self.piece_at(origin);
        self.set_piece_at(destination, piece);
        self.set_piece_at(origin, None);
    }

    /// Returns true if neither side retains enough material to deliver
    /// checkmate: king vs king, king and knight vs king, or both sides
    /// reduced to king (plus bishops all standing on one square shade).
    pub(crate) fn is_insufficient_material(&self) -> bool {
        self.is_king_vs_king()
            || self.is_king_and_knight_vs_king()
            || self.is_same_shade_bishops_draw()
    }

    fn has_only_king(&self, color: Color) -> bool {
        self.piece_count(color) == 1
    }

    fn has_only_king_and_knight(&self, color: Color) -> bool {
        self.piece_count(color) == 2 && self.pieces(PieceType::Knight, color).len() == 1
    }

    fn has_only_king_and_bishops(&self, color: Color) -> bool {
        self.piece_count(color)
            == 1 + self.pieces(PieceType::Bishop, color).len()
    }

    fn is_king_vs_king(&self) -> bool {
        self.has_only_king(Color::White) && self.has_only_king(Color::Black)
    }

    fn is_king_and_knight_vs_king(&self) -> bool {
        (self.has_only_king(Color::White) && self.has_only_king_and_knight(Color::Black))
            || (self.has_only_king(Color::Black) && self.has_only_king_and_knight(Color::White))
    }

    fn is_same_shade_bishops_draw(&self) -> bool {
        let bishops: Vec<Square> = Color::ALL
            .iter()
            .flat_map(|&color| self.pieces(PieceType::Bishop, color).iter())
            .collect();
        if bishops.is_empty() {
            return false;
        }
        if !Color::ALL
            .iter()
            .all(|&color| self.has_only_king_and_bishops(color))
        {
            return false;
        }
        let shade = bishops[0].shade();
        bishops.iter().all(|square| square.shade() == shade)
    }
}

impl Default for PiecePlacement {
    /// The standard chess starting placement.
    fn default() -> Self {
        Self::from_array_unvalidated(starting_array())
    }
}

impl PartialEq for PiecePlacement {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for PiecePlacement {}

impl std::hash::Hash for PiecePlacement {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.board.hash(state);
    }
}

impl std::fmt::Debug for PiecePlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                (0..Square::COUNT as u8)
                    .filter_map(Square::from_index)
                    .filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece))),
            )
            .finish()
    }
}

/// The standard starting piece array.
fn starting_array() -> PieceArray {
    use chess_core::File;

    let mut array: PieceArray = [None; Square::COUNT];
    let back = [
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
    ];
    for (file, &piece_type) in File::ALL.iter().zip(back.iter()) {
        for color in Color::ALL {
            let home = Square::new(*file, Rank::back_rank(color));
            array[home.index() as usize] = Some(Piece::new(piece_type, color));
            let pawn = Square::new(*file, Rank::pawn_start_rank(color));
            array[pawn.index() as usize] = Some(Piece::new(PieceType::Pawn, color));
        }
    }
    array
}
