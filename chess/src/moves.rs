//! Move validation: geometry pre-check, obstruction check, and the
//! post-move king-safety check against the cached check lane.

use crate::board::Board;
use crate::path::Path;
use lanechess_base::geometry;
use lanechess_base::types::{Coord, Delta, PieceKind, Team};

/// How check escapes are validated when the mover is already in check.
///
/// `Legacy` runs the historical lane pre-filters before the authoritative
/// threat recheck. They are cheap short-circuits, but they are known to
/// reject some legal king retreats along the check lane. `Exact` relies on
/// the threat recheck alone.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum CheckEscape {
    #[default]
    Legacy,
    Exact,
}

/// The candidate path for moving a piece of `kind` and `team` from `from`
/// to `to`, considering raw movement geometry only.
///
/// The path runs from one step past `from` up to and including `to`;
/// occupancy is ignored entirely. Empty when the piece can never reach `to`
/// by its movement pattern.
pub fn candidate_path(kind: PieceKind, team: Team, from: Coord, to: Coord) -> Path {
    let mut trace = Path::new();
    if from == to {
        return trace;
    }
    match kind {
        PieceKind::Pawn => {
            let d = from.delta_to(to);
            let f = geometry::pawn_forward(team);
            if d == Delta::new(f * 2, 0) {
                // Only from the start rank, traversing the single-push square.
                if from.row() == geometry::pawn_row(team) {
                    trace.push(from.shift(Delta::new(f, 0)).unwrap());
                    trace.push(to);
                }
            } else if geometry::pawn_deltas(team).contains(&d) {
                trace.push(to);
            }
        }
        PieceKind::Knight | PieceKind::King => {
            if geometry::move_directions(kind, team).contains(&from.delta_to(to)) {
                trace.push(to);
            }
        }
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            for &dir in geometry::move_directions(kind, team) {
                trace.clear();
                let mut at = from;
                while let Some(next) = at.shift(dir) {
                    at = next;
                    trace.push(next);
                    if next == to {
                        return trace;
                    }
                }
            }
            trace.clear();
        }
    }
    trace
}

/// Checks a geometry-approved candidate path against the current occupancy.
///
/// The destination must be compatible with the moving piece's capture rules
/// (a pawn may not push onto a piece nor capture onto an empty square, and
/// nobody may land on an own piece), and every square strictly before the
/// destination must be empty.
///
/// Panics if `path` is empty or `from` holds no piece; callers obtain the
/// path from [`candidate_path`] and check it first.
pub fn is_path_valid(b: &Board, from: Coord, path: &Path) -> bool {
    let piece = b.get(from);
    let team = piece.team().expect("no piece at move origin");
    let kind = piece.kind().unwrap();
    let dest = path.destination().expect("candidate path must not be empty");

    let d = from.delta_to(dest);
    let dest_cell = b.get(dest);
    if dest_cell.is_empty() {
        if geometry::capture_only_deltas(kind, team).contains(&d) {
            return false;
        }
    } else {
        if dest_cell.team() == Some(team) {
            return false;
        }
        if geometry::quiet_only_deltas(kind, team).contains(&d) {
            return false;
        }
    }
    path[..path.len() - 1].iter().all(|&c| b.get(c).is_empty())
}

/// Decides whether the position reached by the mover's last (already
/// applied) move leaves the mover's own king safe.
///
/// On entry the board's check lane still describes the threat that existed
/// against `mover` before the move. When the lane is empty the king merely
/// must not be threatened now. When the mover was in check, the board's
/// [`CheckEscape`] mode selects between the legacy lane pre-filters and the
/// bare threat recheck.
pub fn is_result_safe(b: &Board, mover: Team) -> bool {
    let king_safe = |b: &Board| b.is_threatened(mover.inv(), b.king_pos(mover), false).is_empty();

    let lane = b.check_lane();
    if lane.is_empty() {
        return king_safe(b);
    }
    if b.check_escape() == CheckEscape::Exact {
        return king_safe(b);
    }

    // Legacy pre-filters, cheaper than the threat recheck and evaluated
    // first to short-circuit it. The first one mistakes some legal king
    // retreats along the lane for staying in check.
    let first = b.get(lane[0]);
    let king_slid_deeper = lane.len() > 1
        && first.kind() == Some(PieceKind::King)
        && first.team() == Some(mover);
    if king_slid_deeper {
        return false;
    }
    let lane_broken =
        lane.iter().any(|&c| b.get(c).team() == Some(mover)) || first.is_empty();
    lane_broken && king_safe(b)
}
