//! Chess piece representation.

use crate::Color;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    /// All piece types in order.
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Returns the index of this piece type (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The piece types a pawn may promote to (everything except pawn and king).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotablePieceType {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PromotablePieceType {
    /// All promotion candidates in order.
    pub const ALL: [PromotablePieceType; 4] = [
        PromotablePieceType::Knight,
        PromotablePieceType::Bishop,
        PromotablePieceType::Rook,
        PromotablePieceType::Queen,
    ];

    /// Widens to the corresponding [`PieceType`].
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        match self {
            PromotablePieceType::Knight => PieceType::Knight,
            PromotablePieceType::Bishop => PieceType::Bishop,
            PromotablePieceType::Rook => PieceType::Rook,
            PromotablePieceType::Queen => PieceType::Queen,
        }
    }
}

/// A piece: a type together with its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    /// Creates a piece.
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }
}
