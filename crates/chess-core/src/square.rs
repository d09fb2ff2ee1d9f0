//! Board coordinates: files, ranks, and squares.

use crate::Color;
use std::fmt;

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(File::ALL[index as usize])
        } else {
            None
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Rank::ALL[index as usize])
        } else {
            None
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The rank a color's non-pawn pieces start on (1 for White, 8 for Black).
    #[inline]
    pub const fn back_rank(color: Color) -> Rank {
        match color {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }

    /// The rank on which a color's pawns promote.
    #[inline]
    pub const fn promotion_rank(color: Color) -> Rank {
        match color {
            Color::White => Rank::R8,
            Color::Black => Rank::R1,
        }
    }

    /// The rank a color's pawns start on.
    #[inline]
    pub const fn pawn_start_rank(color: Color) -> Rank {
        match color {
            Color::White => Rank::R2,
            Color::Black => Rank::R7,
        }
    }

    /// The rank a color's pawns land on after a double push.
    #[inline]
    pub const fn double_push_rank(color: Color) -> Rank {
        match color {
            Color::White => Rank::R4,
            Color::Black => Rank::R5,
        }
    }

    /// The rank an en passant target square sits on, from the perspective of
    /// the color that may capture (6 when White is to move, 3 when Black is).
    #[inline]
    pub const fn en_passant_rank(capturing_color: Color) -> Rank {
        match capturing_color {
            Color::White => Rank::R6,
            Color::Black => Rank::R3,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (b'1' + *self as u8) as char)
    }
}

/// A square on the chess board.
///
/// Squares map bijectively to indices 0-63, rank-major: a1 = 0, b1 = 1,
/// ..., h1 = 7, a2 = 8, ..., h8 = 63.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Total number of squares on the board.
    pub const COUNT: usize = 64;

    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * 8 + file.index())
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        match File::from_index(self.0 % 8) {
            Some(f) => f,
            None => unreachable!(),
        }
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        match Rank::from_index(self.0 / 8) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Shifts the square by the given file and rank deltas, returning `None`
    /// if the result falls off the board.
    #[inline]
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file().index() as i8 + file_delta;
        let rank = self.rank().index() as i8 + rank_delta;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            return None;
        }
        Some(Square((rank * 8 + file) as u8))
    }

    /// Shifts the square `ranks` ranks forward from `color`'s point of view.
    #[inline]
    pub const fn ahead(self, ranks: i8, color: Color) -> Option<Self> {
        self.offset(0, ranks * color.pawn_direction())
    }

    /// Shifts the square `ranks` ranks backward from `color`'s point of view.
    #[inline]
    pub const fn behind(self, ranks: i8, color: Color) -> Option<Self> {
        self.offset(0, -ranks * color.pawn_direction())
    }

    /// Returns the shade of this square (light squares are White).
    #[inline]
    pub const fn shade(self) -> Color {
        if (self.file().index() + self.rank().index()) % 2 == 1 {
            Color::White
        } else {
            Color::Black
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}{})", self.file(), self.rank())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}
