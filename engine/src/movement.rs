use crate::fighter::Fighter;
use crate::grid::{distance, Board, Occupancy, Position};

/// Walk up to `move_range` greedy steps towards `target`.
///
/// Each step ranks the four neighbors by distance to `target` (stable, so
/// equal candidates keep +x, -x, +y, -y order) and takes the first one that
/// is on the board and free. A step with no usable neighbor ends the walk.
/// Returns `(from, to)` only when the fighter ends somewhere new.
pub fn step_towards(
    board: &Board,
    occupancy: &mut Occupancy,
    fighter: &mut Fighter,
    target: Position,
) -> Option<(Position, Position)> {
    let start = fighter.position;

    for _ in 0..fighter.move_range {
        let current = fighter.position;
        let mut candidates = current.neighbors();
        candidates.sort_by_key(|c| distance(*c, target));

        let Some(next) = candidates
            .into_iter()
            .find(|c| board.in_bounds(*c) && !occupancy.is_occupied(*c))
        else {
            break;
        };

        occupancy.relocate(current, next);
        fighter.move_to(next);
    }

    (fighter.position != start).then_some((start, fighter.position))
}
