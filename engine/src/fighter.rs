use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::{Board, Occupancy, Position};
use crate::placement::PlacementEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[serde(alias = "dps", alias = "tank")]
    Attacker,
    #[serde(alias = "heal")]
    Healer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// A recruitable unit as supplied by the roster provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterUnit {
    pub id: u32,
    pub name: String,
    #[serde(alias = "health", alias = "hp")]
    pub max_hp: i32,
    #[serde(alias = "power")]
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default = "default_move_range")]
    pub move_range: u32,
    #[serde(default = "default_attack_range", alias = "range")]
    pub attack_range: i32,
    #[serde(default)]
    pub role: Role,
    /// Opaque renderer payload, passed through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub sprite: serde_json::Value,
}

fn default_move_range() -> u32 {
    1
}

fn default_attack_range() -> i32 {
    1
}

/// Live combat state of one placed unit for the duration of a single battle.
#[derive(Debug, Clone, PartialEq)]
pub struct Fighter {
    pub id: u32,
    pub name: String,
    pub side: Side,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub attack_range: i32,
    pub move_range: u32,
    pub position: Position,
    pub role: Role,
    pub sprite: serde_json::Value,
}

impl Fighter {
    pub fn from_roster(unit: &RosterUnit, side: Side, position: Position) -> Self {
        let max_hp = unit.max_hp.max(0);
        Self {
            id: unit.id,
            name: unit.name.clone(),
            side,
            hp: max_hp,
            max_hp,
            attack: unit.attack,
            defense: unit.defense,
            attack_range: unit.attack_range,
            move_range: unit.move_range,
            position,
            role: unit.role,
            sprite: unit.sprite.clone(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_healer(&self) -> bool {
        self.role == Role::Healer
    }

    pub fn is_injured(&self) -> bool {
        self.hp < self.max_hp
    }

    /// Returns true if this hit took the fighter from alive to downed.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.hp = self.hp.saturating_sub(amount.max(0)).clamp(0, self.max_hp);
        self.hp == 0
    }

    /// Returns the HP actually restored after clamping to `max_hp`.
    pub fn apply_healing(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn move_to(&mut self, pos: Position) {
        self.position = pos;
    }
}

/// Join a roster with its placement list. Units without a usable placement
/// are left out; the result follows roster order.
pub fn build_side(
    roster: &[RosterUnit],
    side: Side,
    entries: &[PlacementEntry],
    board: &Board,
    claimed: &mut Occupancy,
) -> Vec<Fighter> {
    let mut pos_by_id: IndexMap<u32, Position> = IndexMap::new();
    for entry in entries {
        match (entry.id, entry.position) {
            (Some(id), Some(pos)) => {
                pos_by_id.insert(id, pos);
            }
            _ => debug!(side = %side, ?entry, "dropping malformed placement entry"),
        }
    }

    let mut seen = HashSet::new();
    let mut fighters = Vec::new();
    for unit in roster {
        let Some(&pos) = pos_by_id.get(&unit.id) else {
            continue;
        };
        if !seen.insert(unit.id) {
            debug!(side = %side, id = unit.id, "duplicate roster id; keeping the first");
            continue;
        }
        if !board.in_bounds(pos) {
            debug!(side = %side, id = unit.id, x = pos.x, y = pos.y, "placement off the board");
            continue;
        }
        if claimed.is_occupied(pos) {
            debug!(side = %side, id = unit.id, x = pos.x, y = pos.y, "placement cell already taken");
            continue;
        }
        claimed.occupy(pos);
        fighters.push(Fighter::from_roster(unit, side, pos));
    }

    for id in pos_by_id.keys().filter(|id| !seen.contains(*id)) {
        debug!(side = %side, id, "placement references a unit outside the roster");
    }

    fighters
}
