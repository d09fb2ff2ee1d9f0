//! A set of board squares backed by a 64-bit word.

use crate::Square;
use std::fmt;

/// A set of squares, one bit per square index.
///
/// This is the representation behind the piece-placement index from
/// (color, piece type) to occupied squares. Insertion, removal, and
/// membership are O(1); iteration visits squares in index order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    /// The empty set.
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Returns a set containing only the given square.
    #[inline]
    pub const fn single(square: Square) -> Self {
        SquareSet(1u64 << square.index())
    }

    /// Returns true if the set contains the square.
    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1u64 << square.index()) != 0
    }

    /// Inserts a square into the set.
    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    /// Removes a square from the set.
    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1u64 << square.index());
    }

    /// Returns the number of squares in the set.
    #[inline]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns an arbitrary square from the set, if any.
    #[inline]
    pub fn first(self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        Square::from_index(self.0.trailing_zeros() as u8)
    }

    /// Iterates over the squares in the set in index order.
    #[inline]
    pub fn iter(self) -> Iter {
        Iter(self.0)
    }
}

/// Iterator over the squares of a [`SquareSet`].
pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Square::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn insert_contains_remove() {
        let e4 = Square::new(File::E, Rank::R4);
        let mut set = SquareSet::EMPTY;
        assert!(!set.contains(e4));

        set.insert(e4);
        assert!(set.contains(e4));
        assert_eq!(set.len(), 1);

        set.remove(e4);
        assert!(set.is_empty());
    }

    #[test]
    fn iterates_in_index_order() {
        let squares = [
            Square::new(File::H, Rank::R8),
            Square::new(File::A, Rank::R1),
            Square::new(File::D, Rank::R4),
        ];
        let set: SquareSet = squares.into_iter().collect();
        let collected: Vec<Square> = set.iter().collect();
        assert_eq!(
            collected,
            vec![
                Square::new(File::A, Rank::R1),
                Square::new(File::D, Rank::R4),
                Square::new(File::H, Rank::R8),
            ]
        );
    }

    #[test]
    fn first() {
        assert_eq!(SquareSet::EMPTY.first(), None);
        let c3 = Square::new(File::C, Rank::R3);
        assert_eq!(SquareSet::single(c3).first(), Some(c3));
    }
}
