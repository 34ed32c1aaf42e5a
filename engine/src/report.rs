use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::combat::Action;
use crate::fighter::{Fighter, Role, Side};
use crate::grid::{Board, Position};
use crate::simulation::Outcome;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
}

impl TeamInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teams {
    #[serde(rename = "A")]
    pub a: TeamInfo,
    #[serde(rename = "B")]
    pub b: TeamInfo,
}

impl Teams {
    pub fn name_of(&self, side: Side) -> &str {
        match side {
            Side::A => &self.a.name,
            Side::B => &self.b.name,
        }
    }
}

/// A unit as it stood after placement, before the first round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub id: u32,
    pub name: String,
    pub team: Side,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub range: i32,
    pub move_range: u32,
    pub role: Role,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub sprite: serde_json::Value,
}

impl From<&Fighter> for UnitSnapshot {
    fn from(f: &Fighter) -> Self {
        Self {
            id: f.id,
            name: f.name.clone(),
            team: f.side,
            position: f.position,
            hp: f.hp,
            max_hp: f.max_hp,
            attack: f.attack,
            defense: f.defense,
            range: f.attack_range,
            move_range: f.move_range,
            role: f.role,
            sprite: f.sprite.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round: u32,
    pub damage_multiplier: f64,
    pub actions: Vec<Action>,
}

/// Self-contained battle record handed to renderers and log consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatReport {
    pub board: Board,
    pub teams: Teams,
    pub units: Vec<UnitSnapshot>,
    pub rounds: Vec<Round>,
    pub winner: String,
    pub winning_side: Side,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CombatReport {
    pub fn new(
        board: Board,
        teams: Teams,
        units: Vec<UnitSnapshot>,
        rounds: Vec<Round>,
        winning_side: Side,
        outcome: Outcome,
        error: Option<String>,
    ) -> Self {
        let winner = teams.name_of(winning_side).to_string();
        Self {
            board,
            teams,
            units,
            rounds,
            winner,
            winning_side,
            outcome,
            error,
        }
    }

    pub fn unit(&self, side: Side, id: u32) -> Option<&UnitSnapshot> {
        self.units.iter().find(|u| u.team == side && u.id == id)
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> + '_ {
        self.rounds.iter().flat_map(|r| r.actions.iter())
    }

    /// HP of every unit once all rounds are replayed, keyed by (side, id).
    pub fn final_hp(&self) -> BTreeMap<(Side, u32), i32> {
        let mut hp: BTreeMap<(Side, u32), i32> =
            self.units.iter().map(|u| ((u.team, u.id), u.hp)).collect();
        for action in self.actions() {
            if let Some((id, side, after)) = action.target() {
                hp.insert((side, id), after);
            }
        }
        hp
    }

    /// Human-readable battle log, one line per event.
    pub fn transcript(&self) -> Vec<String> {
        let mut logs = Vec::new();
        let count = |side: Side| self.units.iter().filter(|u| u.team == side).count();

        logs.push(format!(
            "[START] {} ({} units) vs {} ({} units) on {}x{}",
            self.teams.a.name,
            count(Side::A),
            self.teams.b.name,
            count(Side::B),
            self.board.width,
            self.board.height
        ));

        for round in &self.rounds {
            logs.push(format!(
                "[ROUND] {} x{:.1}",
                round.round, round.damage_multiplier
            ));
            for action in &round.actions {
                self.log_action(&mut logs, action);
            }
        }

        if let Some(err) = &self.error {
            logs.push(format!("[ERROR] {}", err));
        }
        logs.push(format!(
            "[END] winner={} ({}) rounds={}",
            self.winner,
            self.winning_side,
            self.rounds.len()
        ));
        logs
    }

    fn label(&self, side: Side, id: u32) -> String {
        match self.unit(side, id) {
            Some(u) => format!("{}#{} {}", side, id, u.name),
            None => format!("{}#{}", side, id),
        }
    }

    fn log_action(&self, logs: &mut Vec<String>, action: &Action) {
        match action {
            Action::Move {
                unit_id,
                team,
                from,
                to,
            } => logs.push(format!(
                "[MOVE][{}] ({},{}) → ({},{})",
                self.label(*team, *unit_id),
                from.x,
                from.y,
                to.x,
                to.y
            )),
            Action::Attack {
                attacker_id,
                attacker_team,
                target_id,
                target_team,
                damage,
                target_hp,
                killed,
                ..
            } => {
                logs.push(format!(
                    "[ATTACK][{}] → {} for {} (HP {})",
                    self.label(*attacker_team, *attacker_id),
                    self.label(*target_team, *target_id),
                    damage,
                    target_hp
                ));
                if *killed {
                    logs.push(format!("[DOWN][{}]", self.label(*target_team, *target_id)));
                }
            }
            Action::Heal {
                healer_id,
                healer_team,
                target_id,
                healing,
                target_hp,
                ..
            } => logs.push(format!(
                "[HEAL][{}] → {} +{} (HP {})",
                self.label(*healer_team, *healer_id),
                self.label(*healer_team, *target_id),
                healing,
                target_hp
            )),
        }
    }
}
