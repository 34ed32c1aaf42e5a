use serde::{Deserialize, Serialize};

use crate::fighter::Side;
use crate::grid::Position;

/// One atomic event in the replay log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Move {
        unit_id: u32,
        team: Side,
        from: Position,
        to: Position,
    },
    Attack {
        attacker_id: u32,
        attacker_team: Side,
        attacker_position: Position,
        target_id: u32,
        target_team: Side,
        target_position: Position,
        damage: i32,
        target_hp: i32,
        killed: bool,
    },
    Heal {
        healer_id: u32,
        healer_team: Side,
        healer_position: Position,
        target_id: u32,
        target_position: Position,
        healing: i32,
        target_hp: i32,
    },
}

impl Action {
    /// Id and side of the unit performing the action.
    pub fn actor(&self) -> (u32, Side) {
        match *self {
            Action::Move { unit_id, team, .. } => (unit_id, team),
            Action::Attack {
                attacker_id,
                attacker_team,
                ..
            } => (attacker_id, attacker_team),
            Action::Heal {
                healer_id,
                healer_team,
                ..
            } => (healer_id, healer_team),
        }
    }

    /// Id, side and resulting HP of the unit on the receiving end, if any.
    pub fn target(&self) -> Option<(u32, Side, i32)> {
        match *self {
            Action::Move { .. } => None,
            Action::Attack {
                target_id,
                target_team,
                target_hp,
                ..
            } => Some((target_id, target_team, target_hp)),
            Action::Heal {
                target_id,
                healer_team,
                target_hp,
                ..
            } => Some((target_id, healer_team, target_hp)),
        }
    }
}
