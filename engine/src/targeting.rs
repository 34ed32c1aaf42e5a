//! Greedy target selection. Both rules scan the fighter list in order and
//! only replace the current pick on a strictly better candidate, so ties go
//! to whoever comes first in roster order.

use crate::fighter::Fighter;
use crate::grid::distance;

/// Closest living fighter of the opposing side.
pub fn nearest_enemy(fighters: &[Fighter], actor: usize) -> Option<usize> {
    let me = &fighters[actor];
    let mut best: Option<(usize, i32)> = None;
    for (idx, other) in fighters.iter().enumerate() {
        if other.side == me.side || !other.is_alive() {
            continue;
        }
        let d = distance(me.position, other.position);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((idx, d));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Living teammate (not the healer itself) with the lowest current HP among
/// those below max.
pub fn most_injured_ally(fighters: &[Fighter], healer: usize) -> Option<usize> {
    let me = &fighters[healer];
    let mut best: Option<(usize, i32)> = None;
    for (idx, other) in fighters.iter().enumerate() {
        if idx == healer || other.side != me.side || !other.is_alive() || !other.is_injured() {
            continue;
        }
        if best.is_none_or(|(_, best_hp)| other.hp < best_hp) {
            best = Some((idx, other.hp));
        }
    }
    best.map(|(idx, _)| idx)
}
