use std::collections::BTreeMap;

pub fn builtin_battles() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("duel", include_str!("../content/battles/duel.json")),
        (
            "healer_support",
            include_str!("../content/battles/healer_support.json"),
        ),
        ("skirmish", include_str!("../content/battles/skirmish.json")),
        ("stalemate", include_str!("../content/battles/stalemate.json")),
    ])
}
