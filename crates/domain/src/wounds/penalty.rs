use super::record::WoundLevels;

/// Penalty magnitude shown for a tier: `|base + modifier|`.
pub fn effective_penalty(base_penalty: i64, global_modifier: i64) -> i64 {
    base_penalty.saturating_add(global_modifier).saturating_abs()
}

/// Recompute `effective_penalty` for every entry in place.
pub fn apply_penalties(levels: &mut WoundLevels, global_modifier: i64) {
    for entry in levels.values_mut() {
        entry.effective_penalty = effective_penalty(entry.base_penalty, global_modifier);
    }
}
