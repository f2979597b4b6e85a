//! Movement geometry: which offsets each piece kind may step along, and how
//! far. Pure tables and `const fn`s, no board state.
//!
//! Direction order is part of the contract: when several rays could qualify
//! at the same sweep step, the first direction in the table wins.

use crate::types::{Delta, PieceKind, Team};

pub const DIAGONALS: [Delta; 4] = [
    Delta::new(1, 1),
    Delta::new(1, -1),
    Delta::new(-1, 1),
    Delta::new(-1, -1),
];

pub const ORTHOGONALS: [Delta; 4] = [
    Delta::new(1, 0),
    Delta::new(0, 1),
    Delta::new(-1, 0),
    Delta::new(0, -1),
];

/// Diagonals first, then orthogonals. Used by both queen and king.
pub const ALL_DIRECTIONS: [Delta; 8] = [
    Delta::new(1, 1),
    Delta::new(1, -1),
    Delta::new(-1, 1),
    Delta::new(-1, -1),
    Delta::new(1, 0),
    Delta::new(0, 1),
    Delta::new(-1, 0),
    Delta::new(0, -1),
];

pub const KNIGHT_JUMPS: [Delta; 8] = [
    Delta::new(2, 1),
    Delta::new(1, 2),
    Delta::new(-2, 1),
    Delta::new(-1, 2),
    Delta::new(2, -1),
    Delta::new(1, -2),
    Delta::new(-2, -1),
    Delta::new(-1, -2),
];

const WHITE_PAWN_DELTAS: [Delta; 4] = [
    Delta::new(-1, 0),
    Delta::new(-2, 0),
    Delta::new(-1, -1),
    Delta::new(-1, 1),
];

const BLACK_PAWN_DELTAS: [Delta; 4] = [
    Delta::new(1, 0),
    Delta::new(2, 0),
    Delta::new(1, -1),
    Delta::new(1, 1),
];

/// White pawns move toward row 0, black pawns toward row 7.
pub const fn pawn_forward(t: Team) -> i8 {
    match t {
        Team::White => -1,
        Team::Black => 1,
    }
}

/// All four pawn offsets: single push, double push, both captures.
pub const fn pawn_deltas(t: Team) -> &'static [Delta] {
    match t {
        Team::White => &WHITE_PAWN_DELTAS,
        Team::Black => &BLACK_PAWN_DELTAS,
    }
}

/// The two diagonal capture offsets only.
pub const fn pawn_captures(t: Team) -> &'static [Delta] {
    match t {
        Team::White => {
            const D: [Delta; 2] = [Delta::new(-1, -1), Delta::new(-1, 1)];
            &D
        }
        Team::Black => {
            const D: [Delta; 2] = [Delta::new(1, -1), Delta::new(1, 1)];
            &D
        }
    }
}

/// The straight push offsets only.
pub const fn pawn_pushes(t: Team) -> &'static [Delta] {
    match t {
        Team::White => {
            const D: [Delta; 2] = [Delta::new(-1, 0), Delta::new(-2, 0)];
            &D
        }
        Team::Black => {
            const D: [Delta; 2] = [Delta::new(1, 0), Delta::new(2, 0)];
            &D
        }
    }
}

/// Directions a piece of `kind` and `team` may move along from its own square.
pub const fn move_directions(kind: PieceKind, team: Team) -> &'static [Delta] {
    match kind {
        PieceKind::Pawn => pawn_deltas(team),
        PieceKind::Knight => &KNIGHT_JUMPS,
        PieceKind::Bishop => &DIAGONALS,
        PieceKind::Rook => &ORTHOGONALS,
        PieceKind::Queen | PieceKind::King => &ALL_DIRECTIONS,
    }
}

/// How many steps a ray may extend: 1 for short-range pieces, 7 (the whole
/// board) for sliders.
pub const fn max_steps(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => 1,
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => 7,
    }
}

/// Offsets that are illegal unless they capture an opponent: a pawn may only
/// step diagonally onto an enemy piece. Empty for every other kind.
pub const fn capture_only_deltas(kind: PieceKind, team: Team) -> &'static [Delta] {
    match kind {
        PieceKind::Pawn => pawn_captures(team),
        _ => &[],
    }
}

/// Offsets that are illegal when the destination holds an opponent: a pawn
/// may never capture straight ahead. Empty for every other kind.
pub const fn quiet_only_deltas(kind: PieceKind, team: Team) -> &'static [Delta] {
    match kind {
        PieceKind::Pawn => pawn_pushes(team),
        _ => &[],
    }
}

pub const fn home_row(t: Team) -> usize {
    match t {
        Team::White => 7,
        Team::Black => 0,
    }
}

pub const fn pawn_row(t: Team) -> usize {
    match t {
        Team::White => 6,
        Team::Black => 1,
    }
}
