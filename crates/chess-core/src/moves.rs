//! Move value types exchanged with notation layers.
//!
//! These are structured values, not text: the rules engine consumes and
//! produces them, while parsing and formatting of UCI/SAN strings belong to
//! the notation layer built on top.

use crate::{CastlingSide, File, PieceType, PromotablePieceType, Rank, Square};

/// Indicates whether a move gives check or checkmate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckIndicator {
    Check,
    Checkmate,
}

/// A move in UCI terms: origin, destination, and an optional promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    /// The origin square of the move.
    pub origin: Square,
    /// The destination square of the move.
    pub destination: Square,
    /// The promotion piece type, when the move promotes a pawn.
    pub promotion: Option<PromotablePieceType>,
}

impl UciMove {
    /// Creates a move without promotion.
    #[inline]
    pub const fn new(origin: Square, destination: Square) -> Self {
        UciMove {
            origin,
            destination,
            promotion: None,
        }
    }

    /// Creates a promoting move.
    #[inline]
    pub const fn promoting(
        origin: Square,
        destination: Square,
        promotion: PromotablePieceType,
    ) -> Self {
        UciMove {
            origin,
            destination,
            promotion: Some(promotion),
        }
    }
}

impl std::fmt::Display for UciMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            let c = match promotion {
                PromotablePieceType::Knight => 'n',
                PromotablePieceType::Bishop => 'b',
                PromotablePieceType::Rook => 'r',
                PromotablePieceType::Queen => 'q',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// A possibly-partial origin square, as SAN disambiguates it: a file, a
/// rank, both, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PartialSquare {
    pub file: Option<File>,
    pub rank: Option<Rank>,
}

impl PartialSquare {
    /// A fully unspecified origin.
    pub const ANY: PartialSquare = PartialSquare {
        file: None,
        rank: None,
    };

    /// Restricts the origin to a file.
    #[inline]
    pub const fn from_file(file: File) -> Self {
        PartialSquare {
            file: Some(file),
            rank: None,
        }
    }

    /// Restricts the origin to a rank.
    #[inline]
    pub const fn from_rank(rank: Rank) -> Self {
        PartialSquare {
            file: None,
            rank: Some(rank),
        }
    }

    /// Restricts the origin to an exact square.
    #[inline]
    pub const fn from_square(square: Square) -> Self {
        PartialSquare {
            file: Some(square.file()),
            rank: Some(square.rank()),
        }
    }

    /// Returns true if the square satisfies every specified component.
    #[inline]
    pub fn matches(self, square: Square) -> bool {
        self.file.map_or(true, |f| f == square.file())
            && self.rank.map_or(true, |r| r == square.rank())
    }
}

/// A normal (non-castling) move in SAN terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SanNormalMove {
    /// The type of piece being moved.
    pub piece_type: PieceType,
    /// The origin, as far as SAN specifies it.
    pub origin: PartialSquare,
    /// True if the move captures (including en passant).
    pub is_capture: bool,
    /// The destination square.
    pub destination: Square,
    /// The promotion piece type, when the move promotes a pawn.
    pub promotion: Option<PromotablePieceType>,
    /// Whether the move gives check or checkmate.
    pub check_indicator: Option<CheckIndicator>,
}

/// A castling move in SAN terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SanCastlingMove {
    /// The side castled to.
    pub side: CastlingSide,
    /// Whether the move gives check or checkmate.
    pub check_indicator: Option<CheckIndicator>,
}

impl SanCastlingMove {
    /// Creates a castling move with no check annotation.
    #[inline]
    pub const fn new(side: CastlingSide) -> Self {
        SanCastlingMove {
            side,
            check_indicator: None,
        }
    }
}

/// A move in SAN terms: either a normal move or a castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SanMove {
    Normal(SanNormalMove),
    Castling(SanCastlingMove),
}

impl From<SanNormalMove> for SanMove {
    fn from(mv: SanNormalMove) -> Self {
        SanMove::Normal(mv)
    }
}

impl From<SanCastlingMove> for SanMove {
    fn from(mv: SanCastlingMove) -> Self {
        SanMove::Castling(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_display() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(UciMove::new(e2, e4).to_string(), "e2e4");

        let e7 = Square::new(File::E, Rank::R7);
        let e8 = Square::new(File::E, Rank::R8);
        let promo = UciMove::promoting(e7, e8, PromotablePieceType::Queen);
        assert_eq!(promo.to_string(), "e7e8q");
    }

    #[test]
    fn partial_square_matches() {
        let e4 = Square::new(File::E, Rank::R4);

        assert!(PartialSquare::ANY.matches(e4));
        assert!(PartialSquare::from_file(File::E).matches(e4));
        assert!(!PartialSquare::from_file(File::D).matches(e4));
        assert!(PartialSquare::from_rank(Rank::R4).matches(e4));
        assert!(!PartialSquare::from_rank(Rank::R5).matches(e4));
        assert!(PartialSquare::from_square(e4).matches(e4));
        assert!(!PartialSquare::from_square(Square::new(File::E, Rank::R5)).matches(e4));
    }

    #[test]
    fn san_move_variants() {
        let castling: SanMove = SanCastlingMove::new(CastlingSide::Kingside).into();
        assert!(matches!(castling, SanMove::Castling(_)));

        let normal: SanMove = SanNormalMove {
            piece_type: PieceType::Knight,
            origin: PartialSquare::ANY,
            is_capture: false,
            destination: Square::new(File::F, Rank::R3),
            promotion: None,
            check_indicator: None,
        }
        .into();
        assert!(matches!(normal, SanMove::Normal(_)));
    }
}
