use std::collections::BTreeMap;
use std::ops::Range;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fighter::{Role, RosterUnit, Side};
use crate::grid::{Board, Occupancy, Position};

/// One requested starting cell. Either field may be missing in provider
/// input; such entries are dropped when fighters are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct PlacementEntry {
    pub id: Option<u32>,
    pub position: Option<Position>,
}

impl PlacementEntry {
    pub fn new(id: u32, position: Position) -> Self {
        Self {
            id: Some(id),
            position: Some(position),
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    position: Option<RawPosition>,
}

#[derive(Deserialize)]
struct RawPosition {
    #[serde(default)]
    x: Option<i32>,
    #[serde(default)]
    y: Option<i32>,
}

impl From<RawEntry> for PlacementEntry {
    fn from(raw: RawEntry) -> Self {
        let position = raw.position.and_then(|p| match (p.x, p.y) {
            (Some(x), Some(y)) => Some(Position::new(x, y)),
            _ => None,
        });
        Self {
            id: raw.id,
            position,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default, alias = "teamA")]
    pub team_a: Vec<PlacementEntry>,
    #[serde(default, alias = "teamB")]
    pub team_b: Vec<PlacementEntry>,
}

impl Placement {
    pub fn for_side(&self, side: Side) -> &[PlacementEntry] {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    pub fn for_side_mut(&mut self, side: Side) -> &mut Vec<PlacementEntry> {
        match side {
            Side::A => &mut self.team_a,
            Side::B => &mut self.team_b,
        }
    }
}

/// Deployment columns: team A holds the left half, team B the rest.
pub fn zone_columns(board: &Board, side: Side) -> Range<i32> {
    let split = (board.width / 2) as i32;
    match side {
        Side::A => 0..split,
        Side::B => split..board.width as i32,
    }
}

pub fn in_zone(board: &Board, side: Side, pos: Position) -> bool {
    board.in_bounds(pos) && zone_columns(board, side).contains(&pos.x)
}

/// Front row for melee attackers, second row for ranged ones, third for healers.
///
/// Provider roles `tank` and `dps` both load as [`Role::Attacker`], so the
/// row follows `attack_range`: a melee dps shares the front row with tanks.
pub fn preferred_row(unit: &RosterUnit) -> i32 {
    match unit.role {
        Role::Healer => 2,
        Role::Attacker if unit.attack_range <= 1 => 0,
        Role::Attacker => 1,
    }
}

/// Place every roster unit inside the side's zone, avoiding `taken` cells.
///
/// Randomness only decides the order within a preferred row and the column
/// scan order; the same seed always yields the same placement.
pub fn auto_place(
    roster: &[RosterUnit],
    side: Side,
    board: &Board,
    taken: &[Position],
    seed: u64,
) -> Vec<PlacementEntry> {
    if let Err(e) = board.validate() {
        warn!(side = %side, error = %e, "auto-placement skipped");
        return Vec::new();
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut occupancy = Occupancy::from_positions(*board, taken.iter().copied());
    let columns: Vec<i32> = zone_columns(board, side).collect();
    let height = board.height as i32;

    let mut buckets: BTreeMap<i32, Vec<&RosterUnit>> = BTreeMap::new();
    let mut seen = Vec::new();
    for unit in roster {
        if seen.contains(&unit.id) {
            continue;
        }
        seen.push(unit.id);
        buckets.entry(preferred_row(unit)).or_default().push(unit);
    }
    for bucket in buckets.values_mut() {
        bucket.shuffle(&mut rng);
    }

    let mut entries = Vec::new();
    for unit in buckets.into_values().flatten() {
        let ideal = preferred_row(unit);
        let mut rows = Vec::with_capacity(board.height as usize + 1);
        for y in std::iter::once(ideal).chain(0..height) {
            if (0..height).contains(&y) && !rows.contains(&y) {
                rows.push(y);
            }
        }

        match find_free_cell(&columns, &rows, &occupancy, &mut rng) {
            Some(pos) => {
                debug!(side = %side, id = unit.id, x = pos.x, y = pos.y, "auto-placed");
                occupancy.occupy(pos);
                entries.push(PlacementEntry::new(unit.id, pos));
            }
            None => warn!(side = %side, id = unit.id, name = %unit.name, "no free cell left in zone"),
        }
    }
    entries
}

fn find_free_cell(
    columns: &[i32],
    rows: &[i32],
    occupancy: &Occupancy,
    rng: &mut ChaCha8Rng,
) -> Option<Position> {
    for &y in rows {
        let mut xs = columns.to_vec();
        xs.shuffle(rng);
        if let Some(x) = xs.into_iter().find(|&x| !occupancy.is_occupied(Position::new(x, y))) {
            return Some(Position::new(x, y));
        }
    }
    None
}
