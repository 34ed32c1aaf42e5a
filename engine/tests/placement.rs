mod common;

use std::collections::HashSet;

use common::{healer, unit};
use gridclash::placement::{in_zone, preferred_row, zone_columns};
use gridclash::{auto_place, Board, Placement, PlacementEntry, Position, RosterUnit, Side};

#[test]
fn zones_split_the_board_in_half() {
    let board = Board::REFERENCE;
    assert_eq!(zone_columns(&board, Side::A), 0..3);
    assert_eq!(zone_columns(&board, Side::B), 3..6);
    assert!(in_zone(&board, Side::A, Position::new(2, 3)));
    assert!(!in_zone(&board, Side::A, Position::new(3, 0)));
    assert!(in_zone(&board, Side::B, Position::new(5, 0)));
    assert!(!in_zone(&board, Side::B, Position::new(6, 0)));
}

#[test]
fn preferred_rows_follow_role_and_reach() {
    assert_eq!(preferred_row(&unit(1, "Brute", 10, 3, 0, 1)), 0);
    assert_eq!(preferred_row(&unit(2, "Slinger", 10, 3, 0, 2)), 1);
    assert_eq!(preferred_row(&healer(3, "Shaman", 10, 3, 2)), 2);
}

#[test]
fn provider_dps_and_tank_rows_follow_reach() {
    let load = |json: &str| serde_json::from_str::<RosterUnit>(json).unwrap();
    let tank = load(r#"{ "id": 1, "name": "Wall", "hp": 20, "power": 2, "role": "tank" }"#);
    let melee_dps = load(r#"{ "id": 2, "name": "Blade", "hp": 9, "power": 5, "role": "dps" }"#);
    let archer = load(r#"{ "id": 3, "name": "Archer", "hp": 8, "power": 4, "role": "dps", "range": 3 }"#);
    assert_eq!(preferred_row(&tank), 0);
    assert_eq!(preferred_row(&melee_dps), 0);
    assert_eq!(preferred_row(&archer), 1);
}

#[test]
fn auto_place_fills_zone_without_collisions_and_is_seeded() {
    let board = Board::REFERENCE;
    let roster = vec![
        unit(11, "Brute", 18, 5, 1, 1),
        unit(12, "Slinger", 8, 4, 0, 2),
        healer(13, "Shaman", 9, 3, 2),
        unit(14, "Brute", 18, 5, 1, 1),
    ];
    let taken = [Position::new(3, 0)];

    let entries = auto_place(&roster, Side::B, &board, &taken, 7);
    assert_eq!(entries.len(), 4);

    let mut cells = HashSet::new();
    for e in &entries {
        let pos = e.position.unwrap();
        assert!(in_zone(&board, Side::B, pos));
        assert_ne!(pos, Position::new(3, 0));
        assert!(cells.insert(pos));
    }

    let row_of = |id: u32| {
        entries
            .iter()
            .find(|e| e.id == Some(id))
            .and_then(|e| e.position)
            .map(|p| p.y)
    };
    assert_eq!(row_of(11), Some(0));
    assert_eq!(row_of(14), Some(0));
    assert_eq!(row_of(12), Some(1));
    assert_eq!(row_of(13), Some(2));

    assert_eq!(entries, auto_place(&roster, Side::B, &board, &taken, 7));
}

#[test]
fn auto_place_overflows_to_other_rows_then_gives_up() {
    let board = Board::new(2, 2);
    let roster: Vec<_> = (1..=4).map(|id| unit(id, "Brute", 10, 1, 0, 1)).collect();

    let entries = auto_place(&roster, Side::B, &board, &[], 1);
    let rows: Vec<i32> = entries.iter().map(|e| e.position.unwrap().y).collect();
    assert_eq!(rows, vec![0, 1]);
}

#[test]
fn malformed_entries_deserialize_without_position() {
    let json = r#"{
        "teamA": [
            { "id": 1, "position": { "x": 0, "y": 2 } },
            { "id": 2 },
            { "id": 3, "position": { "x": 1 } },
            { "position": { "x": 1, "y": 1 } }
        ]
    }"#;
    let placement: Placement = serde_json::from_str(json).unwrap();

    assert!(placement.team_b.is_empty());
    assert_eq!(
        placement.team_a,
        vec![
            PlacementEntry::new(1, Position::new(0, 2)),
            PlacementEntry { id: Some(2), position: None },
            PlacementEntry { id: Some(3), position: None },
            PlacementEntry { id: None, position: Some(Position::new(1, 1)) },
        ]
    );
}

#[test]
fn auto_place_on_oversized_board_places_nothing() {
    let roster = vec![unit(1, "Knight", 10, 5, 0, 1)];
    let board = Board::new(u32::MAX, u32::MAX);
    assert!(auto_place(&roster, Side::A, &board, &[], 7).is_empty());
}
