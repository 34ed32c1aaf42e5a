use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::{run_side_turn, TurnContext};
use crate::error::SimError;
use crate::fighter::{build_side, Fighter, RosterUnit, Side};
use crate::grid::{Board, Occupancy};
use crate::placement::Placement;
use crate::report::{CombatReport, Round, TeamInfo, Teams, UnitSnapshot};

pub const EMPTY_TEAM_ERROR: &str = "missing placed units for one team";
pub const ROUND_CAP_ERROR: &str = "round cap exceeded";

/// Tunable battle rules. Every field has a default so partial rule blocks
/// in battle files deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    /// Rounds between two damage escalations.
    #[serde(default = "default_escalation_interval")]
    pub escalation_interval: u32,
    /// Multiplier added at each escalation.
    #[serde(default = "default_escalation_step")]
    pub escalation_step: f64,
    /// Healers with nobody to heal attack the nearest enemy instead of idling.
    #[serde(default = "default_true")]
    pub healer_fallback_to_attack: bool,
}

fn default_max_rounds() -> u32 {
    200
}
fn default_escalation_interval() -> u32 {
    5
}
fn default_escalation_step() -> f64 {
    0.3
}
fn default_true() -> bool {
    true
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            escalation_interval: default_escalation_interval(),
            escalation_step: default_escalation_step(),
            healer_fallback_to_attack: default_true(),
        }
    }
}

impl Rules {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.max_rounds == 0 {
            return Err(SimError::InvalidRules("max_rounds must be at least 1"));
        }
        if self.escalation_interval == 0 {
            return Err(SimError::InvalidRules("escalation_interval must be at least 1"));
        }
        if !self.escalation_step.is_finite() || self.escalation_step < 0.0 {
            return Err(SimError::InvalidRules("escalation_step must be a non-negative number"));
        }
        Ok(())
    }

    /// `1 + floor((round - 1) / interval) * step` for 1-based rounds.
    pub fn damage_multiplier(&self, round: u32) -> f64 {
        let tier = round.saturating_sub(1) / self.escalation_interval;
        1.0 + f64::from(tier) * self.escalation_step
    }
}

/// Where the battle state machine ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Running,
    TeamADefeated,
    TeamBDefeated,
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub roster: Vec<RosterUnit>,
}

impl Team {
    pub fn new(name: impl Into<String>, roster: Vec<RosterUnit>) -> Self {
        Self {
            name: name.into(),
            roster,
        }
    }
}

/// Run a full battle with the default rules.
pub fn simulate(
    team_a: &Team,
    team_b: &Team,
    placement: &Placement,
    board: Board,
) -> Result<CombatReport, SimError> {
    simulate_with_rules(team_a, team_b, placement, board, &Rules::default())
}

/// Run a full battle. Only precondition violations come back as `Err`;
/// an empty team or the round cap are flagged on the report itself.
pub fn simulate_with_rules(
    team_a: &Team,
    team_b: &Team,
    placement: &Placement,
    board: Board,
    rules: &Rules,
) -> Result<CombatReport, SimError> {
    board.validate()?;
    rules.validate()?;

    let mut claimed = Occupancy::new(board);
    let mut fighters = build_side(&team_a.roster, Side::A, &placement.team_a, &board, &mut claimed);
    fighters.extend(build_side(&team_b.roster, Side::B, &placement.team_b, &board, &mut claimed));

    let units: Vec<UnitSnapshot> = fighters.iter().map(UnitSnapshot::from).collect();
    let teams = Teams {
        a: TeamInfo::new(&team_a.name),
        b: TeamInfo::new(&team_b.name),
    };
    info!(
        team_a = %team_a.name,
        team_b = %team_b.name,
        units = units.len(),
        occupied = claimed.occupied_count(),
        "battle start"
    );

    let placed_a = fighters.iter().any(|f| f.side == Side::A);
    let placed_b = fighters.iter().any(|f| f.side == Side::B);
    if !placed_a || !placed_b {
        let (winning_side, outcome) = if placed_a {
            (Side::A, Outcome::TeamBDefeated)
        } else {
            (Side::B, Outcome::TeamADefeated)
        };
        info!(winner = %winning_side, "battle skipped: {}", EMPTY_TEAM_ERROR);
        return Ok(CombatReport::new(
            board,
            teams,
            units,
            Vec::new(),
            winning_side,
            outcome,
            Some(EMPTY_TEAM_ERROR.to_string()),
        ));
    }

    let mut rounds = Vec::new();
    let mut outcome = Outcome::Running;
    let mut round = 0u32;

    while outcome == Outcome::Running {
        if is_defeated(&fighters, Side::A) {
            outcome = Outcome::TeamADefeated;
            break;
        }
        if is_defeated(&fighters, Side::B) {
            outcome = Outcome::TeamBDefeated;
            break;
        }

        round += 1;
        if round > rules.max_rounds {
            outcome = Outcome::Aborted;
            break;
        }

        let ctx = TurnContext {
            board: &board,
            damage_multiplier: rules.damage_multiplier(round),
            healer_fallback_to_attack: rules.healer_fallback_to_attack,
        };
        let mut actions = Vec::new();

        run_side_turn(&ctx, &mut fighters, Side::A, &mut actions);
        if is_defeated(&fighters, Side::B) {
            outcome = Outcome::TeamBDefeated;
        } else {
            run_side_turn(&ctx, &mut fighters, Side::B, &mut actions);
            if is_defeated(&fighters, Side::A) {
                outcome = Outcome::TeamADefeated;
            }
        }

        debug!(
            round,
            multiplier = ctx.damage_multiplier,
            actions = actions.len(),
            "round closed"
        );
        rounds.push(Round {
            round,
            damage_multiplier: ctx.damage_multiplier,
            actions,
        });
    }

    let (winning_side, error) = match outcome {
        Outcome::TeamADefeated => (Side::B, None),
        Outcome::TeamBDefeated => (Side::A, None),
        _ => (abort_winner(&fighters), Some(ROUND_CAP_ERROR.to_string())),
    };
    info!(
        winner = %winning_side,
        ?outcome,
        rounds = rounds.len(),
        "battle end"
    );

    Ok(CombatReport::new(
        board,
        teams,
        units,
        rounds,
        winning_side,
        outcome,
        error,
    ))
}

fn is_defeated(fighters: &[Fighter], side: Side) -> bool {
    !fighters.iter().any(|f| f.side == side && f.is_alive())
}

fn remaining_hp(fighters: &[Fighter], side: Side) -> i64 {
    fighters
        .iter()
        .filter(|f| f.side == side)
        .map(|f| i64::from(f.hp))
        .sum()
}

/// Standing side wins; otherwise more remaining HP; a dead heat goes to
/// team A, which acts first in every round.
fn abort_winner(fighters: &[Fighter]) -> Side {
    match (is_defeated(fighters, Side::A), is_defeated(fighters, Side::B)) {
        (false, true) => Side::A,
        (true, false) => Side::B,
        _ if remaining_hp(fighters, Side::B) > remaining_hp(fighters, Side::A) => Side::B,
        _ => Side::A,
    }
}
