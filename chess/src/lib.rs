//! # lanechess
//!
//! A chess rules library built around a _check lane_: the board caches the
//! ray of squares along which the king is currently checked, and move
//! validation consults that cache before falling back to a full threat scan.
//!
//! Use [`Game`] to play a game move by move, or work with [`Board`] directly
//! for position-level queries.

pub use lanechess_base as base;
pub use lanechess_base::{geometry, types};

pub mod board;
pub mod endgame;
pub mod game;
pub mod moves;
pub mod path;

pub use board::{Board, RawUndo};
pub use game::{Game, MoveError, Outcome};
pub use moves::CheckEscape;
pub use path::Path;
pub use types::{Cell, Coord, Delta, PieceKind, Team};
