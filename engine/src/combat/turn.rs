use tracing::trace;

use crate::combat::actions::Action;
use crate::combat::damage::scaled_damage;
use crate::fighter::{Fighter, Role, Side};
use crate::grid::{distance, Board, Occupancy};
use crate::movement::step_towards;
use crate::targeting::{most_injured_ally, nearest_enemy};

/// Per-turn settings handed down from the simulation loop.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub board: &'a Board,
    pub damage_multiplier: f64,
    pub healer_fallback_to_attack: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    EndTurn,
}

/// Play one side's sub-turn, appending actions in the order they happen.
pub fn run_side_turn(
    ctx: &TurnContext<'_>,
    fighters: &mut [Fighter],
    side: Side,
    actions: &mut Vec<Action>,
) {
    let mut occupancy = Occupancy::from_positions(
        *ctx.board,
        fighters.iter().filter(|f| f.is_alive()).map(|f| f.position),
    );

    for idx in 0..fighters.len() {
        if fighters[idx].side != side || !fighters[idx].is_alive() {
            continue;
        }
        trace!(
            side = %side,
            id = fighters[idx].id,
            healer = fighters[idx].is_healer(),
            "unit acts"
        );
        let role = fighters[idx].role;
        let flow = match role {
            Role::Attacker => attack_behaviour(ctx, &mut occupancy, fighters, idx, actions),
            Role::Healer => heal_behaviour(ctx, &mut occupancy, fighters, idx, actions),
        };
        if flow == Flow::EndTurn {
            break;
        }
    }
}

fn heal_behaviour(
    ctx: &TurnContext<'_>,
    occupancy: &mut Occupancy,
    fighters: &mut [Fighter],
    idx: usize,
    actions: &mut Vec<Action>,
) -> Flow {
    match most_injured_ally(fighters, idx) {
        Some(ally) => {
            heal_branch(ctx, occupancy, fighters, idx, ally, actions);
            Flow::Continue
        }
        None if ctx.healer_fallback_to_attack => {
            attack_behaviour(ctx, occupancy, fighters, idx, actions)
        }
        None => Flow::Continue,
    }
}

/// Approach the ally if needed, then heal. A heal that is still out of
/// reach after moving is dropped for this turn without attacking instead.
fn heal_branch(
    ctx: &TurnContext<'_>,
    occupancy: &mut Occupancy,
    fighters: &mut [Fighter],
    idx: usize,
    ally: usize,
    actions: &mut Vec<Action>,
) {
    approach(ctx, occupancy, fighters, idx, ally, actions);

    let healer = &fighters[idx];
    let (healer_id, healer_team, healer_position) = (healer.id, healer.side, healer.position);
    let (power, reach) = (healer.attack, healer.attack_range);

    let target = &mut fighters[ally];
    if distance(healer_position, target.position) > reach {
        trace!(healer = healer_id, target = target.id, "heal target out of reach");
        return;
    }

    let healing = target.apply_healing(power);
    let action = Action::Heal {
        healer_id,
        healer_team,
        healer_position,
        target_id: target.id,
        target_position: target.position,
        healing,
        target_hp: target.hp,
    };
    trace!(?action, "heal");
    actions.push(action);
}

fn attack_behaviour(
    ctx: &TurnContext<'_>,
    occupancy: &mut Occupancy,
    fighters: &mut [Fighter],
    idx: usize,
    actions: &mut Vec<Action>,
) -> Flow {
    let Some(target_idx) = nearest_enemy(fighters, idx) else {
        return Flow::EndTurn;
    };

    approach(ctx, occupancy, fighters, idx, target_idx, actions);

    let attacker = &fighters[idx];
    let (attacker_id, attacker_team, attacker_position) =
        (attacker.id, attacker.side, attacker.position);
    let (power, reach) = (attacker.attack, attacker.attack_range);

    let target = &mut fighters[target_idx];
    if distance(attacker_position, target.position) > reach {
        return Flow::Continue;
    }

    let damage = scaled_damage(power, target.defense, ctx.damage_multiplier);
    target.apply_damage(damage);
    let killed = !target.is_alive();
    if killed {
        occupancy.vacate(target.position);
    }

    let action = Action::Attack {
        attacker_id,
        attacker_team,
        attacker_position,
        target_id: target.id,
        target_team: target.side,
        target_position: target.position,
        damage,
        target_hp: target.hp,
        killed,
    };
    trace!(?action, "attack");
    actions.push(action);
    Flow::Continue
}

/// Move `idx` towards `target_idx` when it is out of reach, logging a
/// `Move` only if the fighter actually changed cell.
fn approach(
    ctx: &TurnContext<'_>,
    occupancy: &mut Occupancy,
    fighters: &mut [Fighter],
    idx: usize,
    target_idx: usize,
    actions: &mut Vec<Action>,
) {
    let target_pos = fighters[target_idx].position;
    let fighter = &mut fighters[idx];
    if distance(fighter.position, target_pos) <= fighter.attack_range {
        return;
    }
    if let Some((from, to)) = step_towards(ctx.board, occupancy, fighter, target_pos) {
        let action = Action::Move {
            unit_id: fighter.id,
            team: fighter.side,
            from,
            to,
        };
        trace!(?action, "move");
        actions.push(action);
    }
}
