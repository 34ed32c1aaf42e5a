/// Flat damage after defense, never below 1, scaled by the round multiplier
/// and rounded half away from zero.
pub fn scaled_damage(attack: i32, defense: i32, multiplier: f64) -> i32 {
    let base = attack.saturating_sub(defense).max(1);
    let scaled = (f64::from(base) * multiplier).round() as i32;
    scaled.max(1)
}
