use super::level::WoundLevel;
use super::record::{SystemData, WoundMode};

/// Derive `wounds.max` and `wounds.value` from the terminal threshold.
///
/// In manual mode a positive GM override replaces the terminal threshold as
/// the capacity. Both values are floored at zero.
pub fn initialize_wound_state(sys: &mut SystemData, damage_suffered: i64) {
    let out_threshold = sys
        .wound_levels
        .get(&WoundLevel::Out)
        .map(|entry| entry.threshold)
        .unwrap_or(0);

    let max = match (sys.mode, sys.max_wounds_override()) {
        (WoundMode::Manual, Some(override_max)) => override_max,
        _ => out_threshold,
    }
    .max(0);

    sys.wounds.max = max;
    sys.wounds.value = max.saturating_sub(damage_suffered.max(0)).max(0);
}
