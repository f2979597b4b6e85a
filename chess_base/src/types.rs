use std::fmt::{self, Display};
use std::hint;
use std::str::FromStr;

use derive_more::{Add, Mul, Neg};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellParseError {
    #[error("unexpected cell char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

/// A square on the 8x8 board, addressed as (row, column) with both in `0..8`.
///
/// Row 0 is Black's home rank, row 7 is White's.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coord(u8);

impl Coord {
    pub const fn new(row: usize, col: usize) -> Coord {
        assert!(row < 8 && col < 8, "coord parts must be between 0 and 7");
        Coord(((row as u8) << 3) | col as u8)
    }

    pub const fn from_index(val: usize) -> Coord {
        assert!(val < 64, "coord index must be between 0 and 63");
        Coord(val as u8)
    }

    pub const fn row(&self) -> usize {
        (self.0 >> 3) as usize
    }

    pub const fn col(&self) -> usize {
        (self.0 & 7) as usize
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Adds `delta`, returning `None` when the result leaves the board.
    pub fn shift(self, delta: Delta) -> Option<Coord> {
        let row = self.row().wrapping_add(delta.dr as usize);
        let col = self.col().wrapping_add(delta.dc as usize);
        if row >= 8 || col >= 8 {
            return None;
        }
        Some(Coord::new(row, col))
    }

    /// The offset that takes `self` to `other`.
    pub const fn delta_to(self, other: Coord) -> Delta {
        Delta {
            dr: other.row() as i8 - self.row() as i8,
            dc: other.col() as i8 - self.col() as i8,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Coord)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Coord({})", self)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "({},{})", self.row(), self.col())
    }
}

/// A (row, column) offset: one movement direction, or a single jump.
///
/// Adding a `Delta` to a [`Coord`] may leave the board, so the sum is checked
/// via [`Coord::shift`].
#[derive(Add, Mul, Neg, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Delta {
    pub dr: i8,
    pub dc: i8,
}

impl Delta {
    pub const fn new(dr: i8, dc: i8) -> Delta {
        Delta { dr, dc }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Team {
    White = 0,
    Black = 1,
}

impl Team {
    pub const fn inv(&self) -> Team {
        match *self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Team::White => write!(f, "White"),
            Team::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    King = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

/// Contents of one board square: either empty or a piece of some team.
///
/// Packed into one byte, so a board is a plain owning array of cells and
/// lookups never hand out aliasing pointers.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const MAX_INDEX: usize = 13;

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    pub const fn from_parts(t: Team, k: PieceKind) -> Cell {
        Cell(match t {
            Team::White => 1 + k as u8,
            Team::Black => 7 + k as u8,
        })
    }

    pub const fn team(&self) -> Option<Team> {
        match self.0 {
            0 => None,
            1..=6 => Some(Team::White),
            _ => Some(Team::Black),
        }
    }

    pub const fn kind(&self) -> Option<PieceKind> {
        match self.0 {
            0 => None,
            1 | 7 => Some(PieceKind::Pawn),
            2 | 8 => Some(PieceKind::King),
            3 | 9 => Some(PieceKind::Knight),
            4 | 10 => Some(PieceKind::Bishop),
            5 | 11 => Some(PieceKind::Rook),
            6 | 12 => Some(PieceKind::Queen),
            _ => unsafe { hint::unreachable_unchecked() },
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::MAX_INDEX as u8).map(Cell)
    }

    pub fn as_char(&self) -> char {
        b".PKNBRQpknbrq"[self.0 as usize] as char
    }

    pub fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Cell::EMPTY);
        }
        let team = if c.is_ascii_uppercase() {
            Team::White
        } else {
            Team::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'k' => PieceKind::King,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            _ => return None,
        };
        Some(Cell::from_parts(team, kind))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if (self.0 as usize) < Self::MAX_INDEX {
            return write!(f, "Cell({})", self.as_char());
        }
        write!(f, "Cell(?{:?})", self.0)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(CellParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Cell::from_char(ch).ok_or(CellParseError::UnexpectedChar(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord() {
        let mut coords = Vec::new();
        for row in 0..8 {
            for col in 0..8 {
                let coord = Coord::new(row, col);
                assert_eq!(coord.row(), row);
                assert_eq!(coord.col(), col);
                coords.push(coord);
            }
        }
        assert_eq!(coords, Coord::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_shift() {
        let c = Coord::new(4, 4);
        assert_eq!(c.shift(Delta::new(-1, 2)), Some(Coord::new(3, 6)));
        assert_eq!(Coord::new(0, 3).shift(Delta::new(-1, 0)), None);
        assert_eq!(Coord::new(7, 3).shift(Delta::new(1, 0)), None);
        assert_eq!(Coord::new(3, 0).shift(Delta::new(0, -1)), None);
        assert_eq!(Coord::new(3, 7).shift(Delta::new(0, 1)), None);
    }

    #[test]
    fn test_delta() {
        assert_eq!(
            Coord::new(6, 4).delta_to(Coord::new(4, 4)),
            Delta::new(-2, 0)
        );
        assert_eq!(Delta::new(-1, 1) * 3_i8, Delta::new(-3, 3));
        assert_eq!(-Delta::new(-1, 1), Delta::new(1, -1));
        assert_eq!(Delta::new(1, 0) + Delta::new(0, 1), Delta::new(1, 1));
    }

    #[test]
    fn test_team() {
        assert_eq!(Team::White.inv(), Team::Black);
        assert_eq!(Team::Black.inv(), Team::White);
        assert_eq!(Team::White.to_string(), "White");
    }

    #[test]
    fn test_cell() {
        assert_eq!(Cell::EMPTY.team(), None);
        assert_eq!(Cell::EMPTY.kind(), None);
        let mut cells = vec![Cell::EMPTY];
        for team in [Team::White, Team::Black] {
            for kind in [
                PieceKind::Pawn,
                PieceKind::King,
                PieceKind::Knight,
                PieceKind::Bishop,
                PieceKind::Rook,
                PieceKind::Queen,
            ] {
                let cell = Cell::from_parts(team, kind);
                assert_eq!(cell.team(), Some(team));
                assert_eq!(cell.kind(), Some(kind));
                cells.push(cell);
            }
        }
        assert_eq!(cells, Cell::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_cell_str() {
        for cell in Cell::iter() {
            let s = cell.to_string();
            assert_eq!(Cell::from_str(&s), Ok(cell));
        }
        assert_eq!(Cell::from_str("x"), Err(CellParseError::UnexpectedChar('x')));
    }
}
