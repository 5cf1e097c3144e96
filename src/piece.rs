//! Piece codes: the flat byte encoding the board engine uses per square.
//!
//! A square byte is 0 for an empty square, 1-6 for white pawn, knight,
//! bishop, rook, queen, king in that order, and 7-12 for the same kinds
//! for black. Anything above 12 is a structural error.

use crate::{Error, Result};

/// Highest valid piece code; codes above this fail decoding.
pub const MAX_PIECE_CODE: u8 = 12;

/// Which side a piece belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Letter used in asset identifiers: "w" or "b".
    pub const fn letter(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }
}

impl core::ops::Not for Side {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::White => "White",
                Self::Black => "Black",
            }
        )
    }
}

/// The six piece kinds, in the fixed encoding order.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    /// Letter used in asset identifiers: P, N, B, R, Q or K.
    pub const fn letter(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Kind from its 1-6 ordinal.
    fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Pawn),
            2 => Some(Self::Knight),
            3 => Some(Self::Bishop),
            4 => Some(Self::Rook),
            5 => Some(Self::Queen),
            6 => Some(Self::King),
            _ => None,
        }
    }
}

/// A decoded (side, kind) pair for one occupied square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }

    /// Decode one snapshot byte. `Ok(None)` is an empty square; codes
    /// above [`MAX_PIECE_CODE`] are reported against the square `index`.
    pub fn from_code(code: u8, index: usize) -> Result<Option<Self>> {
        if code == 0 {
            return Ok(None);
        }
        if code > MAX_PIECE_CODE {
            return Err(Error::InvalidPieceCode { index, code });
        }
        let side = if code < 7 { Side::White } else { Side::Black };
        let kind = PieceKind::from_ordinal((code - 1) % 6 + 1)
            .ok_or(Error::InvalidPieceCode { index, code })?;
        Ok(Some(Self { side, kind }))
    }

    /// Re-encode into the snapshot byte this piece came from.
    pub const fn code(self) -> u8 {
        let base = match self.side {
            Side::White => 0,
            Side::Black => 6,
        };
        base + self.kind as u8
    }

    /// Asset identifier, e.g. "wR" or "bK".
    pub fn asset_id(self) -> String {
        format!("{}{}", self.side.letter(), self.kind.letter())
    }
}

// Display and asset_id agree; tests rely on it.
impl core::fmt::Display for Piece {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}{}", self.side.letter(), self.kind.letter())
    }
}
