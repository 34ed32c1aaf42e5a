mod common;

use common::{fighter, healer, unit};
use gridclash::targeting::{most_injured_ally, nearest_enemy};
use gridclash::Side;

#[test]
fn nearest_enemy_prefers_first_on_ties_and_skips_downed() {
    let knight = unit(1, "Knight", 10, 5, 0, 1);
    let orc = unit(2, "Orc", 10, 5, 0, 1);
    let mut fighters = vec![
        fighter(&knight, Side::A, 2, 1),
        fighter(&orc, Side::B, 4, 1),
        fighter(&orc, Side::B, 2, 3),
        fighter(&orc, Side::B, 3, 1),
    ];
    // (4,1) and (2,3) tie at 2; (3,1) is closer
    assert_eq!(nearest_enemy(&fighters, 0), Some(3));

    fighters[3].hp = 0;
    assert_eq!(nearest_enemy(&fighters, 0), Some(1));

    fighters[1].hp = 0;
    fighters[2].hp = 0;
    assert_eq!(nearest_enemy(&fighters, 0), None);
}

#[test]
fn nearest_enemy_ignores_teammates() {
    let knight = unit(1, "Knight", 10, 5, 0, 1);
    let fighters = vec![
        fighter(&knight, Side::A, 0, 0),
        fighter(&knight, Side::A, 1, 0),
        fighter(&knight, Side::B, 5, 3),
    ];
    assert_eq!(nearest_enemy(&fighters, 0), Some(2));
}

#[test]
fn most_injured_ally_excludes_self_full_hp_and_enemies() {
    let cleric = healer(1, "Cleric", 8, 4, 2);
    let squire = unit(2, "Squire", 10, 3, 0, 1);
    let orc = unit(3, "Orc", 10, 3, 0, 1);
    let mut fighters = vec![
        fighter(&cleric, Side::A, 0, 0),
        fighter(&squire, Side::A, 1, 0),
        fighter(&squire, Side::A, 2, 0),
        fighter(&orc, Side::B, 5, 0),
    ];
    fighters[0].hp = 1;
    fighters[3].hp = 1;
    assert_eq!(most_injured_ally(&fighters, 0), None);

    fighters[1].hp = 7;
    fighters[2].hp = 7;
    assert_eq!(most_injured_ally(&fighters, 0), Some(1));

    fighters[2].hp = 3;
    assert_eq!(most_injured_ally(&fighters, 0), Some(2));

    fighters[2].hp = 0;
    assert_eq!(most_injured_ally(&fighters, 0), Some(1));
}
