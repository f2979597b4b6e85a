//! Checkmate and stalemate detection

use crate::board::Board;
use crate::path;
use lanechess_base::types::{Coord, Team};

/// Returns `true` if `team` has at least one legal move
///
/// Scans every piece of `team` and probes its destinations until one survives
/// king-safety validation. The board is mutated while probing but is restored
/// before the function returns.
pub fn has_legal_move(b: &mut Board, team: Team) -> bool {
    for from in Coord::iter() {
        if b.get(from).team() != Some(team) {
            continue;
        }
        if path::find_legal_destination(b, from).is_some() {
            return true;
        }
    }
    false
}

/// Returns `true` if `team` is stalemated: not in check, but without a single
/// legal move
///
/// The check lane must be up to date for `team`.
pub fn is_stalemate(b: &mut Board, team: Team) -> bool {
    b.check_lane().is_empty() && !has_legal_move(b, team)
}

/// Returns `true` if `team` is checkmated: in check and without a single
/// legal move
///
/// The check lane must be up to date for `team`.
pub fn is_checkmate(b: &mut Board, team: Team) -> bool {
    !b.check_lane().is_empty() && !has_legal_move(b, team)
}
