//! Board and related things

use crate::endgame;
use crate::moves::CheckEscape;
use crate::path::{self, Path};
use lanechess_base::geometry;
use lanechess_base::types::{Cell, Coord, PieceKind, Team};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// One of the sides doesn't have a king
    #[error("no king of team {0:?}")]
    NoKing(Team),
    /// One of the sides has more than one king
    #[error("more than one king of team {0:?}")]
    TooManyKings(Team),
}

/// Error parsing the piece placement from a board diagram
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum DiagramParseError {
    /// Diagram doesn't consist of exactly eight rows
    #[error("expected 8 rows, got {0}")]
    BadRowCount(usize),
    /// One of the rows doesn't have exactly eight squares
    #[error("row {0} doesn't have 8 squares")]
    BadRowLength(usize),
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`Board`] from a diagram
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Diagram cannot be parsed
    #[error("cannot parse diagram: {0}")]
    Diagram(#[from] DiagramParseError),
    /// Diagram was parsed, but the position is invalid
    #[error("invalid position: {0}")]
    Valid(#[from] ValidateError),
}

/// Undo token returned by [`Board::make_move()`]
///
/// Holds the contents of the destination square before the move, so that
/// [`Board::unmake_move()`] can restore it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RawUndo {
    pub(crate) captured: Cell,
}

/// Chess board with a cached check lane
///
/// The board stores the piece placement plus the _check lane_: the squares of
/// the ray currently giving check, ordered from the square next to the checked
/// king out to the checking piece inclusive. An empty lane means no check. The
/// lane is not updated automatically; call [`Board::recompute_check_lane()`]
/// after the position changes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    cells: [Cell; 64],
    check_lane: Path,
    escape: CheckEscape,
}

impl Board {
    /// Returns an empty board with an empty check lane
    pub fn empty() -> Board {
        Board {
            cells: [Cell::EMPTY; 64],
            check_lane: Path::new(),
            escape: CheckEscape::default(),
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for (team, home, pawns) in [
            (Team::White, geometry::home_row(Team::White), geometry::pawn_row(Team::White)),
            (Team::Black, geometry::home_row(Team::Black), geometry::pawn_row(Team::Black)),
        ] {
            use PieceKind::*;
            for (col, kind) in [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook]
                .into_iter()
                .enumerate()
            {
                res.put(Coord::new(home, col), Cell::from_parts(team, kind));
            }
            for col in 0..8 {
                res.put(Coord::new(pawns, col), Cell::from_parts(team, Pawn));
            }
        }
        res
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        unsafe { *self.cells.get_unchecked(c.index()) }
    }

    /// Puts `cell` to the square with coordinate `c`
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        unsafe {
            *self.cells.get_unchecked_mut(c.index()) = cell;
        }
    }

    /// Returns the position of the king of team `t`
    ///
    /// # Panics
    ///
    /// Panics if there is no such king on the board.
    pub fn king_pos(&self, t: Team) -> Coord {
        let king = Cell::from_parts(t, PieceKind::King);
        Coord::iter().find(|&c| self.get(c) == king).unwrap()
    }

    /// Moves the piece on `from` to `to`, overwriting whatever stood there
    ///
    /// This is a mechanical edit; no legality checks are performed and the
    /// check lane is left untouched. Returns an undo token for
    /// [`Board::unmake_move()`].
    #[inline]
    pub fn make_move(&mut self, from: Coord, to: Coord) -> RawUndo {
        debug_assert!(!self.get(from).is_empty(), "no piece at {}", from);
        let undo = RawUndo {
            captured: self.get(to),
        };
        self.put(to, self.get(from));
        self.put(from, Cell::EMPTY);
        undo
    }

    /// Reverts a move made by [`Board::make_move()`]
    #[inline]
    pub fn unmake_move(&mut self, from: Coord, to: Coord, undo: RawUndo) {
        self.put(from, self.get(to));
        self.put(to, undo.captured);
    }

    /// Returns the path of the nearest piece of `attacker` threatening `target`
    ///
    /// The returned path is empty if nothing threatens `target`. With
    /// `need_path == false` only the threatening piece's own square is
    /// recorded, which is cheaper.
    #[inline]
    pub fn is_threatened(&self, attacker: Team, target: Coord, need_path: bool) -> Path {
        path::find_threat(self, attacker, target, need_path)
    }

    /// Returns the cached check lane
    ///
    /// The lane lists the squares between the checked king (exclusive) and
    /// the checking piece (inclusive), nearest square first. An empty lane
    /// means the cache recorded no check when it was last recomputed.
    #[inline]
    pub fn check_lane(&self) -> &Path {
        &self.check_lane
    }

    #[inline]
    pub(crate) fn set_check_lane(&mut self, lane: Path) {
        self.check_lane = lane;
    }

    /// Recomputes the check lane for the king of `defender`
    ///
    /// Scans for the nearest piece of the opposing team threatening the
    /// defender's king and stores its full path.
    pub fn recompute_check_lane(&mut self, defender: Team) {
        let king = self.king_pos(defender);
        self.check_lane = path::find_threat(self, defender.inv(), king, true);
    }

    /// Returns the current check escape validation mode
    #[inline]
    pub fn check_escape(&self) -> CheckEscape {
        self.escape
    }

    /// Sets the check escape validation mode
    #[inline]
    pub fn set_check_escape(&mut self, escape: CheckEscape) {
        self.escape = escape;
    }

    /// Returns `true` if `team` is stalemated
    ///
    /// See [`endgame::is_stalemate`] for the exact conditions.
    #[inline]
    pub fn stalemate_check(&mut self, team: Team) -> bool {
        endgame::is_stalemate(self, team)
    }

    /// Returns `true` if `team` is checkmated
    ///
    /// The check lane must be up to date for `team`; see
    /// [`endgame::is_checkmate`].
    #[inline]
    pub fn checkmate_check(&mut self, team: Team) -> bool {
        endgame::is_checkmate(self, team)
    }
}

fn parse_cells(s: &str) -> Result<[Cell; 64], DiagramParseError> {
    let mut cells = [Cell::EMPTY; 64];
    let mut rows = 0_usize;
    for (row, token) in s.split_whitespace().enumerate() {
        if row >= 8 {
            return Err(DiagramParseError::BadRowCount(row + 1));
        }
        let mut cols = 0_usize;
        for ch in token.chars() {
            if cols >= 8 {
                return Err(DiagramParseError::BadRowLength(row));
            }
            cells[row * 8 + cols] =
                Cell::from_char(ch).ok_or(DiagramParseError::UnexpectedChar(ch))?;
            cols += 1;
        }
        if cols < 8 {
            return Err(DiagramParseError::BadRowLength(row));
        }
        rows += 1;
    }
    if rows < 8 {
        return Err(DiagramParseError::BadRowCount(rows));
    }
    Ok(cells)
}

fn validate_cells(cells: &[Cell; 64]) -> Result<(), ValidateError> {
    for team in [Team::White, Team::Black] {
        let king = Cell::from_parts(team, PieceKind::King);
        let count = cells.iter().filter(|&&c| c == king).count();
        if count == 0 {
            return Err(ValidateError::NoKing(team));
        }
        if count > 1 {
            return Err(ValidateError::TooManyKings(team));
        }
    }
    Ok(())
}

impl FromStr for Board {
    type Err = ParseError;

    /// Parses a board from a diagram: eight whitespace-separated rows of
    /// eight squares each, row 0 (Black's home row) first. `.` denotes an
    /// empty square, pieces use `PKNBRQ` for White and `pknbrq` for Black.
    ///
    /// The resulting check lane is empty; recompute it if the position may
    /// contain a check.
    fn from_str(s: &str) -> Result<Board, Self::Err> {
        let cells = parse_cells(s)?;
        validate_cells(&cells)?;
        Ok(Board {
            cells,
            check_lane: Path::new(),
            escape: CheckEscape::default(),
        })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in 0..8 {
            for col in 0..8 {
                write!(f, "{}", self.get(Coord::new(row, col)))?;
            }
            if row != 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INITIAL: &str = "rnbqkbnr\n\
                           pppppppp\n\
                           ........\n\
                           ........\n\
                           ........\n\
                           ........\n\
                           PPPPPPPP\n\
                           RNBQKBNR";

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(b.to_string(), INITIAL);
        assert_eq!(INITIAL.parse::<Board>().unwrap(), b);
        assert_eq!(b.get(Coord::new(7, 4)), Cell::from_parts(Team::White, PieceKind::King));
        assert_eq!(b.get(Coord::new(0, 3)), Cell::from_parts(Team::Black, PieceKind::Queen));
        assert_eq!(b.king_pos(Team::White), Coord::new(7, 4));
        assert_eq!(b.king_pos(Team::Black), Coord::new(0, 4));
        assert!(b.check_lane().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        let no_white_king = "....k...
                             ........
                             ........
                             ........
                             ........
                             ........
                             ........
                             ........";
        assert_eq!(
            no_white_king.parse::<Board>(),
            Err(ParseError::Valid(ValidateError::NoKing(Team::White)))
        );

        let two_black_kings = "....k..k
                               ........
                               ........
                               ........
                               ....K...
                               ........
                               ........
                               ........";
        assert_eq!(
            two_black_kings.parse::<Board>(),
            Err(ParseError::Valid(ValidateError::TooManyKings(Team::Black)))
        );

        assert_eq!(
            "....k...".parse::<Board>(),
            Err(ParseError::Diagram(DiagramParseError::BadRowCount(1)))
        );

        let short_row = "....k...
                         .......
                         ........
                         ........
                         ....K...
                         ........
                         ........
                         ........";
        assert_eq!(
            short_row.parse::<Board>(),
            Err(ParseError::Diagram(DiagramParseError::BadRowLength(1)))
        );

        let bad_char = "....k...
                        ........
                        ...x....
                        ........
                        ....K...
                        ........
                        ........
                        ........";
        assert_eq!(
            bad_char.parse::<Board>(),
            Err(ParseError::Diagram(DiagramParseError::UnexpectedChar('x')))
        );
    }

    #[test]
    fn test_make_unmake() {
        let mut b = Board::initial();
        let before = b.clone();

        let undo = b.make_move(Coord::new(6, 4), Coord::new(4, 4));
        assert_eq!(b.get(Coord::new(6, 4)), Cell::EMPTY);
        assert_eq!(
            b.get(Coord::new(4, 4)),
            Cell::from_parts(Team::White, PieceKind::Pawn)
        );
        b.unmake_move(Coord::new(6, 4), Coord::new(4, 4), undo);
        assert_eq!(b, before);
    }

    #[test]
    fn test_unmake_restores_capture() {
        let mut b: Board = "....k...
                            ........
                            ........
                            ...p....
                            ....K...
                            ........
                            ........
                            ........"
            .parse()
            .unwrap();
        let before = b.clone();

        let undo = b.make_move(Coord::new(4, 4), Coord::new(3, 3));
        assert_eq!(
            b.get(Coord::new(3, 3)),
            Cell::from_parts(Team::White, PieceKind::King)
        );
        b.unmake_move(Coord::new(4, 4), Coord::new(3, 3), undo);
        assert_eq!(b, before);
    }

    #[test]
    fn test_recompute_check_lane() {
        let mut b: Board = "....k...
                            ........
                            ........
                            ........
                            r...K...
                            ........
                            ........
                            ........"
            .parse()
            .unwrap();
        assert!(b.check_lane().is_empty());

        b.recompute_check_lane(Team::White);
        let lane: Vec<_> = b.check_lane().iter().copied().collect();
        assert_eq!(
            lane,
            vec![
                Coord::new(4, 3),
                Coord::new(4, 2),
                Coord::new(4, 1),
                Coord::new(4, 0),
            ]
        );

        // Capturing the rook and recomputing clears the lane.
        b.make_move(Coord::new(4, 4), Coord::new(4, 0));
        b.recompute_check_lane(Team::White);
        assert!(b.check_lane().is_empty());
    }

    #[test]
    fn test_display_round_trip() {
        let diagram = "....k...
                       ..n.....
                       ........
                       ...p....
                       ....K...
                       ......B.
                       ........
                       .......R";
        let b: Board = diagram.parse().unwrap();
        assert_eq!(b.to_string().parse::<Board>().unwrap(), b);
    }
}
