//! Ray walking: finding a threat against a square, and finding a legal
//! destination for a piece.
//!
//! Both operations sweep the relevant direction set in lock step: iteration
//! `i` advances every still-live ray by one step before any ray advances
//! twice, so the nearest qualifying square wins and ties break in
//! direction-table order. A ray that dies is dropped from the next sweep and
//! never revives.

use crate::board::Board;
use crate::moves;
use lanechess_base::geometry;
use lanechess_base::types::{Coord, Delta, PieceKind, Team};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// An ordered sequence of squares a move or threat traverses, from one step
/// past the origin up to and including the destination.
///
/// The longest possible path is a slider crossing the whole board, hence the
/// capacity of 7.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Path(ArrayVec<Coord, 7>);

impl Path {
    pub fn new() -> Path {
        Path(ArrayVec::new())
    }

    pub fn single(c: Coord) -> Path {
        let mut p = Path::new();
        p.push(c);
        p
    }

    /// The final square of the path, if any.
    pub fn destination(&self) -> Option<Coord> {
        self.0.last().copied()
    }
}

impl Deref for Path {
    type Target = ArrayVec<Coord, 7>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Path {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord;
    type IntoIter = slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The order in which piece archetypes are probed when scanning for threats.
const ARCHETYPES: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// Finds the nearest piece of `attacker` that threatens `target`.
///
/// Returns the path from the square adjacent to `target` out to the
/// threatening piece, inclusive; with `need_path` unset, just the square of
/// the threatening piece. Empty when no threat exists.
pub fn find_threat(b: &Board, attacker: Team, target: Coord, need_path: bool) -> Path {
    for kind in ARCHETYPES {
        let found = scan_archetype(b, kind, attacker, target, need_path);
        if !found.is_empty() {
            return found;
        }
    }
    Path::new()
}

/// Directions to scan outward from the threatened square for pieces of
/// `kind`. Pawns attack only diagonally, and the scan runs from the victim's
/// side, so their capture deltas are mirrored.
fn threat_directions(kind: PieceKind, attacker: Team) -> &'static [Delta] {
    match kind {
        PieceKind::Pawn => geometry::pawn_captures(attacker.inv()),
        _ => geometry::move_directions(kind, attacker),
    }
}

/// A queen found on a rook or bishop ray threatens along it.
fn matches_archetype(found: PieceKind, archetype: PieceKind) -> bool {
    found == archetype
        || (matches!(archetype, PieceKind::Rook | PieceKind::Bishop)
            && found == PieceKind::Queen)
}

struct Ray {
    dir: Delta,
    at: Coord,
    trace: Path,
}

fn scan_archetype(
    b: &Board,
    kind: PieceKind,
    attacker: Team,
    target: Coord,
    need_path: bool,
) -> Path {
    let mut rays: ArrayVec<Ray, 8> = threat_directions(kind, attacker)
        .iter()
        .map(|&dir| Ray {
            dir,
            at: target,
            trace: Path::new(),
        })
        .collect();

    for _ in 0..geometry::max_steps(kind) {
        let mut live = ArrayVec::<Ray, 8>::new();
        for mut ray in rays {
            let next = match ray.at.shift(ray.dir) {
                Some(c) => c,
                None => continue,
            };
            ray.at = next;
            if need_path {
                ray.trace.push(next);
            }
            let cell = b.get(next);
            if cell.is_empty() {
                live.push(ray);
                continue;
            }
            // The first piece on a ray terminates it; it threatens the
            // target only if it belongs to the attacker and matches the
            // archetype being scanned.
            if cell.team() == Some(attacker) && matches_archetype(cell.kind().unwrap(), kind) {
                return if need_path { ray.trace } else { Path::single(next) };
            }
        }
        rays = live;
        if rays.is_empty() {
            break;
        }
    }
    Path::new()
}

/// Finds one legal destination for the piece at `origin`, or `None` if it
/// has no legal move at all.
///
/// Each candidate square is probed by applying the move mechanically,
/// checking that the mover's king stays safe, and undoing it again. A ray is
/// abandoned only when it leaves the board or meets a piece of the mover's
/// own team; an occupied destination that fails the probe does not stop the
/// ray.
///
/// Panics if `origin` is empty.
pub fn find_legal_destination(b: &mut Board, origin: Coord) -> Option<Coord> {
    let cell = b.get(origin);
    let kind = cell.kind().expect("no piece at origin");
    let team = cell.team().unwrap();

    let mut rays: ArrayVec<(Delta, Coord), 8> = geometry::move_directions(kind, team)
        .iter()
        .map(|&dir| (dir, origin))
        .collect();

    for _ in 0..geometry::max_steps(kind) {
        let mut live = ArrayVec::<(Delta, Coord), 8>::new();
        for (dir, at) in rays {
            let next = match at.shift(dir) {
                Some(c) => c,
                None => continue,
            };
            if b.get(next).team() == Some(team) {
                continue;
            }
            let undo = b.make_move(origin, next);
            let safe = moves::is_result_safe(b, team);
            b.unmake_move(origin, next, undo);
            if safe {
                return Some(next);
            }
            live.push((dir, next));
        }
        rays = live;
        if rays.is_empty() {
            break;
        }
    }
    None
}
