//! Game state: turn order, move application and undo

use crate::board::{Board, RawUndo};
use crate::moves::{self, CheckEscape};
use crate::path::Path;
use lanechess_base::types::{Coord, Team};

use std::fmt;

use thiserror::Error;

/// Error rejecting a move passed to [`Game::try_move()`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    /// The origin square is empty
    #[error("no piece at {0}")]
    NoPiece(Coord),
    /// The piece on the origin square belongs to the opponent
    #[error("piece at {0} doesn't belong to the side to move")]
    NotYourTurn(Coord),
    /// The piece doesn't move that way
    #[error("move doesn't match the piece's geometry")]
    BadGeometry,
    /// The path is blocked, or the destination cannot be taken
    #[error("path to the destination is blocked")]
    Blocked,
    /// The move would leave the mover's king in check
    #[error("move leaves own king in check")]
    SelfCheck,
}

/// Result of a finished game
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    /// The side to move is checkmated
    Checkmate {
        /// The team delivering the mate
        winner: Team,
    },
    /// The side to move has no legal moves but is not in check
    Stalemate,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            Outcome::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// A move that was applied to the game, with everything needed to revert it
#[derive(Debug, Clone)]
struct Record {
    from: Coord,
    to: Coord,
    undo: RawUndo,
    /// Check lane as it was before the move.
    lane: Path,
}

/// A chess game: a board plus the side to move and the move history
///
/// All moves go through [`Game::try_move()`], which validates them fully, so
/// the wrapped board always holds a position reachable by legal play from the
/// starting position. The check lane is kept up to date for the side to move.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side: Team,
    stack: Vec<Record>,
}

impl Game {
    /// Starts a game from the given position with `side` to move
    pub fn new(mut board: Board, side: Team) -> Game {
        board.recompute_check_lane(side);
        Game {
            board,
            side,
            stack: Vec::new(),
        }
    }

    /// Starts a game from the initial position
    pub fn initial() -> Game {
        Game::new(Board::initial(), Team::White)
    }

    /// Returns the current position
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Team {
        self.side
    }

    /// Returns the number of moves made so far
    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` if no moves have been made yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Returns the check escape validation mode of the wrapped board
    #[inline]
    pub fn check_escape(&self) -> CheckEscape {
        self.board.check_escape()
    }

    /// Sets the check escape validation mode of the wrapped board
    #[inline]
    pub fn set_check_escape(&mut self, escape: CheckEscape) {
        self.board.set_check_escape(escape);
    }

    /// Validates and applies the move `from -> to` for the side to move
    ///
    /// On success the move is applied, the turn passes to the opponent and
    /// the check lane is recomputed for them. On failure the game is left
    /// unchanged and the reason is returned.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> Result<(), MoveError> {
        let cell = self.board.get(from);
        let kind = match cell.kind() {
            Some(kind) => kind,
            None => return Err(MoveError::NoPiece(from)),
        };
        if cell.team() != Some(self.side) {
            return Err(MoveError::NotYourTurn(from));
        }

        let path = moves::candidate_path(kind, self.side, from, to);
        if path.is_empty() {
            return Err(MoveError::BadGeometry);
        }
        if !moves::is_path_valid(&self.board, from, &path) {
            return Err(MoveError::Blocked);
        }

        let lane = self.board.check_lane().clone();
        let undo = self.board.make_move(from, to);
        if !moves::is_result_safe(&self.board, self.side) {
            self.board.unmake_move(from, to, undo);
            return Err(MoveError::SelfCheck);
        }

        self.side = self.side.inv();
        self.board.recompute_check_lane(self.side);
        self.stack.push(Record {
            from,
            to,
            undo,
            lane,
        });
        Ok(())
    }

    /// Reverts the last move, restoring the board, the side to move and the
    /// check lane. Returns `false` if there is nothing to undo.
    pub fn undo_last_move(&mut self) -> bool {
        let rec = match self.stack.pop() {
            Some(rec) => rec,
            None => return false,
        };
        self.board.unmake_move(rec.from, rec.to, rec.undo);
        self.side = self.side.inv();
        self.board.set_check_lane(rec.lane);
        true
    }

    /// Calculates whether the game is over for the side to move
    ///
    /// Returns `None` while the side to move still has a legal move.
    pub fn outcome(&mut self) -> Option<Outcome> {
        if self.board.check_lane().is_empty() {
            if self.board.stalemate_check(self.side) {
                return Some(Outcome::Stalemate);
            }
        } else if self.board.checkmate_check(self.side) {
            return Some(Outcome::Checkmate {
                winner: self.side.inv(),
            });
        }
        None
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::initial()
    }
}
