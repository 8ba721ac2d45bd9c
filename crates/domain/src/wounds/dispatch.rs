use serde::Serialize;

use super::level::WoundLevel;
use super::locate::locate_current;
use super::record::{SystemData, WoundMode};

/// The tier a character currently sits in and the penalty it carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentLevel {
    pub level: WoundLevel,
    pub penalty: i64,
}

/// Tiers eligible to become current under `mode`.
///
/// Manual mode only considers tiers the GM flagged active. Formula mode
/// considers the tiers the preparer marked active, so hidden tiers never
/// become current even after a rescale spreads them apart.
pub(crate) fn levels_to_check(
    sys: &SystemData,
    order: &[WoundLevel],
    mode: WoundMode,
) -> Vec<WoundLevel> {
    match mode {
        WoundMode::Manual => order
            .iter()
            .copied()
            .filter(|level| sys.is_manual_active(*level))
            .collect(),
        WoundMode::Formula => order
            .iter()
            .copied()
            .filter(|level| sys.wound_levels.get(level).is_some_and(|e| e.is_active))
            .collect(),
    }
}

/// Clear every `is_current` flag and locate the current tier for `damage`.
///
/// Never fails: an empty table or order yields `Healthy` with whatever
/// penalty that tier has, or zero.
pub fn determine_current(
    sys: &mut SystemData,
    order: &[WoundLevel],
    damage: i64,
    mode: WoundMode,
) -> CurrentLevel {
    for entry in sys.wound_levels.values_mut() {
        entry.is_current = false;
    }

    let level = if sys.wound_levels.is_empty() || order.is_empty() {
        tracing::warn!(
            tiers = sys.wound_levels.len(),
            order = order.len(),
            "Wound table or order is empty, falling back to healthy"
        );
        WoundLevel::Healthy
    } else {
        let checked = levels_to_check(sys, order, mode);
        locate_current(&mut sys.wound_levels, &checked, damage)
    };

    CurrentLevel {
        level,
        penalty: sys
            .wound_levels
            .get(&level)
            .map(|entry| entry.effective_penalty)
            .unwrap_or(0),
    }
}
