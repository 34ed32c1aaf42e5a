use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::content::builtin_battles;
use crate::error::SimError;
use crate::fighter::Side;
use crate::grid::{Board, Position};
use crate::placement::{auto_place, Placement};
use crate::report::CombatReport;
use crate::simulation::{simulate_with_rules, Rules, Team};

/// Everything needed to run one battle, as stored on disk or sent over FFI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleFile {
    #[serde(alias = "teamA")]
    pub team_a: Team,
    #[serde(alias = "teamB")]
    pub team_b: Team,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub board: Board,
    #[serde(default)]
    pub rules: Rules,
    /// When set, a side with an empty placement list is auto-placed.
    #[serde(default)]
    pub auto_place_seed: Option<u64>,
}

impl BattleFile {
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// The explicit placement, with empty sides filled in when an
    /// auto-place seed is configured. Side B uses `seed + 1`.
    pub fn resolve_placement(&self) -> Placement {
        let mut placement = self.placement.clone();
        let Some(seed) = self.auto_place_seed else {
            return placement;
        };

        for (side, side_seed) in [(Side::A, seed), (Side::B, seed.wrapping_add(1))] {
            if !placement.for_side(side).is_empty() {
                continue;
            }
            let taken: Vec<Position> = placement
                .for_side(side.opponent())
                .iter()
                .filter_map(|e| e.position)
                .collect();
            let entries = auto_place(&self.team(side).roster, side, &self.board, &taken, side_seed);
            info!(side = %side, placed = entries.len(), "auto-placed side");
            *placement.for_side_mut(side) = entries;
        }
        placement
    }
}

pub fn run_battle(battle: &BattleFile) -> Result<CombatReport> {
    battle.board.validate()?;
    let placement = battle.resolve_placement();
    let report = simulate_with_rules(
        &battle.team_a,
        &battle.team_b,
        &placement,
        battle.board,
        &battle.rules,
    )?;
    Ok(report)
}

pub fn parse_battle_json(text: &str) -> Result<BattleFile, SimError> {
    Ok(serde_json::from_str(text)?)
}

/// Reads a battle description; `.yaml`/`.yml` files go through YAML,
/// anything else is treated as JSON.
pub fn load_battle(path: impl AsRef<Path>) -> Result<BattleFile> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read battle file: {}", path.display()))?;
    parse_battle_text(&text, path)
}

pub fn parse_battle_text(text: &str, path: &Path) -> Result<BattleFile> {
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if is_yaml {
        serde_yaml::from_str(text)
            .with_context(|| format!("failed to parse battle YAML: {}", path.display()))
    } else {
        serde_json::from_str(text)
            .with_context(|| format!("failed to parse battle JSON: {}", path.display()))
    }
}

pub fn load_builtin(id: &str) -> Result<BattleFile> {
    let battles = builtin_battles();
    let text = battles
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("unknown built-in battle '{}'", id))?;
    serde_json::from_str(text).with_context(|| format!("failed to parse built-in battle: {}", id))
}
