use gridclash::api::{load_builtin, run_battle};

#[test]
fn duel_transcript() {
    let battle = load_builtin("duel").unwrap();
    let report = run_battle(&battle).unwrap();

    insta::assert_snapshot!(report.transcript().join("\n"), @r"
    [START] Red (1 units) vs Blue (1 units) on 6x4
    [ROUND] 1 x1.0
    [ATTACK][A#1 Knight] → B#1 Orc for 5 (HP 5)
    [ATTACK][B#1 Orc] → A#1 Knight for 5 (HP 5)
    [ROUND] 2 x1.0
    [ATTACK][A#1 Knight] → B#1 Orc for 5 (HP 0)
    [DOWN][B#1 Orc]
    [END] winner=Red (A) rounds=2
    ");
}

#[test]
fn stalemate_transcript_flags_round_cap() {
    let battle = load_builtin("stalemate").unwrap();
    let report = run_battle(&battle).unwrap();
    let lines = report.transcript();

    assert_eq!(lines.len(), 1 + 20 + 2);
    insta::assert_snapshot!(lines[lines.len() - 2..].join("\n"), @r"
    [ERROR] round cap exceeded
    [END] winner=Chapel (A) rounds=20
    ");
}

#[test]
fn transcript_shows_moves_and_heals() {
    let battle = load_builtin("healer_support").unwrap();
    let report = run_battle(&battle).unwrap();
    let lines = report.transcript();

    assert!(lines.iter().any(|l| l.starts_with("[MOVE][A#2 Cleric]")));
    assert!(lines.iter().any(|l| l.starts_with("[HEAL][A#2 Cleric] → A#1 Squire")));
    assert!(lines.last().unwrap().starts_with("[END] winner="));
}
