use gridclash::{distance, Board, Occupancy, Position, SimError};

#[test]
fn distance_is_manhattan_and_symmetric() {
    let a = Position::new(0, 0);
    let b = Position::new(3, 2);
    assert_eq!(distance(a, b), 5);
    assert_eq!(distance(b, a), 5);
    assert_eq!(distance(a, a), 0);
    assert_eq!(distance(Position::new(-1, 4), Position::new(2, 1)), 6);
}

#[test]
fn bounds_follow_board_dimensions() {
    let board = Board::REFERENCE;
    assert!(board.in_bounds(Position::new(0, 0)));
    assert!(board.in_bounds(Position::new(5, 3)));
    assert!(!board.in_bounds(Position::new(6, 0)));
    assert!(!board.in_bounds(Position::new(0, 4)));
    assert!(!board.in_bounds(Position::new(-1, 2)));
}

#[test]
fn occupancy_key_is_row_major() {
    let board = Board::new(6, 4);
    assert_eq!(board.occupancy_key(Position::new(0, 0)), Some(0));
    assert_eq!(board.occupancy_key(Position::new(5, 0)), Some(5));
    assert_eq!(board.occupancy_key(Position::new(0, 1)), Some(6));
    assert_eq!(board.occupancy_key(Position::new(5, 3)), Some(23));
    assert_eq!(board.occupancy_key(Position::new(6, 3)), None);
}

#[test]
fn occupancy_tracks_moves_and_treats_off_board_as_blocked() {
    let board = Board::REFERENCE;
    let mut occ = Occupancy::from_positions(board, [Position::new(1, 1), Position::new(2, 2)]);
    assert_eq!(occ.occupied_count(), 2);
    assert!(occ.is_occupied(Position::new(1, 1)));
    assert!(occ.is_occupied(Position::new(-1, 0)));

    occ.relocate(Position::new(1, 1), Position::new(1, 2));
    assert!(!occ.is_occupied(Position::new(1, 1)));
    assert!(occ.is_occupied(Position::new(1, 2)));

    occ.vacate(Position::new(2, 2));
    assert_eq!(occ.occupied_count(), 1);
}

#[test]
fn zero_sized_board_is_rejected() {
    assert!(Board::new(0, 4).validate().is_err());
    assert!(Board::new(6, 0).validate().is_err());
    assert!(Board::REFERENCE.validate().is_ok());
}

#[test]
fn oversized_board_is_rejected() {
    assert!(matches!(
        Board::new(u32::MAX, u32::MAX).validate(),
        Err(SimError::InvalidBoard { width: u32::MAX, height: u32::MAX })
    ));
    assert!(Board::new(1 << 20, 2).validate().is_err());
    assert!(Board::new(1 << 20, 1).validate().is_ok());
    assert!(Board::new(1024, 1024).validate().is_ok());
}

#[test]
fn neighbors_come_in_fixed_order() {
    let n = Position::new(2, 2).neighbors();
    assert_eq!(
        n,
        [
            Position::new(3, 2),
            Position::new(1, 2),
            Position::new(2, 3),
            Position::new(2, 1),
        ]
    );
}
