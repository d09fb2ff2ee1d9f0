//! Castling sides and rights.

use crate::Color;

/// The two sides a king may castle to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

impl CastlingSide {
    /// Both castling sides.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];
}

/// Castling availability for both players: four independent flags.
///
/// The default has every right enabled, matching the starting position.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    const WHITE_KINGSIDE: u8 = 0b0001;
    const WHITE_QUEENSIDE: u8 = 0b0010;
    const BLACK_KINGSIDE: u8 = 0b0100;
    const BLACK_QUEENSIDE: u8 = 0b1000;

    /// All four rights enabled.
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// No rights enabled.
    pub const NONE: CastlingRights = CastlingRights(0);

    const fn flag(side: CastlingSide, color: Color) -> u8 {
        match (side, color) {
            (CastlingSide::Kingside, Color::White) => Self::WHITE_KINGSIDE,
            (CastlingSide::Queenside, Color::White) => Self::WHITE_QUEENSIDE,
            (CastlingSide::Kingside, Color::Black) => Self::BLACK_KINGSIDE,
            (CastlingSide::Queenside, Color::Black) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if the given color may castle on the given side.
    #[inline]
    pub const fn can_castle(self, side: CastlingSide, color: Color) -> bool {
        self.0 & Self::flag(side, color) != 0
    }

    /// Enables one right.
    #[inline]
    pub fn enable(&mut self, side: CastlingSide, color: Color) {
        self.0 |= Self::flag(side, color);
    }

    /// Disables one right.
    #[inline]
    pub fn disable(&mut self, side: CastlingSide, color: Color) {
        self.0 &= !Self::flag(side, color);
    }

    /// Disables both of a color's rights.
    #[inline]
    pub fn disable_color(&mut self, color: Color) {
        self.0 &= !(Self::flag(CastlingSide::Kingside, color)
            | Self::flag(CastlingSide::Queenside, color));
    }

    /// Returns true if no right is enabled.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::ALL
    }
}

impl std::fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CastlingRights")
            .field(
                "white_kingside",
                &self.can_castle(CastlingSide::Kingside, Color::White),
            )
            .field(
                "white_queenside",
                &self.can_castle(CastlingSide::Queenside, Color::White),
            )
            .field(
                "black_kingside",
                &self.can_castle(CastlingSide::Kingside, Color::Black),
            )
            .field(
                "black_queenside",
                &self.can_castle(CastlingSide::Queenside, Color::Black),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_all_rights() {
        let rights = CastlingRights::default();
        for side in CastlingSide::ALL {
            for color in Color::ALL {
                assert!(rights.can_castle(side, color));
            }
        }
    }

    #[test]
    fn disable_single_right() {
        let mut rights = CastlingRights::ALL;
        rights.disable(CastlingSide::Kingside, Color::White);
        assert!(!rights.can_castle(CastlingSide::Kingside, Color::White));
        assert!(rights.can_castle(CastlingSide::Queenside, Color::White));
        assert!(rights.can_castle(CastlingSide::Kingside, Color::Black));
    }

    #[test]
    fn disable_color_keeps_other_color() {
        let mut rights = CastlingRights::ALL;
        rights.disable_color(Color::Black);
        assert!(!rights.can_castle(CastlingSide::Kingside, Color::Black));
        assert!(!rights.can_castle(CastlingSide::Queenside, Color::Black));
        assert!(rights.can_castle(CastlingSide::Kingside, Color::White));
        assert!(rights.can_castle(CastlingSide::Queenside, Color::White));
    }

    #[test]
    fn enable_restores_right() {
        let mut rights = CastlingRights::NONE;
        assert!(rights.is_none());
        rights.enable(CastlingSide::Queenside, Color::Black);
        assert!(rights.can_castle(CastlingSide::Queenside, Color::Black));
        assert!(!rights.is_none());
    }
}
