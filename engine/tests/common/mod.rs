#![allow(dead_code)]

use gridclash::{Fighter, Position, Role, RosterUnit, Side};

pub fn unit(id: u32, name: &str, hp: i32, attack: i32, defense: i32, range: i32) -> RosterUnit {
    RosterUnit {
        id,
        name: name.to_string(),
        max_hp: hp,
        attack,
        defense,
        move_range: 1,
        attack_range: range,
        role: Role::Attacker,
        sprite: serde_json::Value::Null,
    }
}

pub fn healer(id: u32, name: &str, hp: i32, attack: i32, range: i32) -> RosterUnit {
    RosterUnit {
        role: Role::Healer,
        ..unit(id, name, hp, attack, 0, range)
    }
}

pub fn fighter(unit: &RosterUnit, side: Side, x: i32, y: i32) -> Fighter {
    Fighter::from_roster(unit, side, Position::new(x, y))
}
