use serde::Serialize;

use super::dispatch::{determine_current, levels_to_check};
use super::formula::prepare_formula;
use super::level::{WoundLevel, WOUND_ORDER};
use super::manual::prepare_manual;
use super::penalty::apply_penalties;
use super::record::{SystemData, WoundMode};
use super::state::initialize_wound_state;
use super::visible::prepare_visible;

/// Outcome of one full preparation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WoundSummary {
    pub current: WoundLevel,
    /// Effective penalty of the current tier, as consumed by rolls.
    pub penalty: i64,
    pub max: i64,
    pub remaining: i64,
    /// Whether the display tables fell back to raw data.
    pub display_degraded: bool,
}

/// Recompute every derived wound value on `sys` from its inputs.
///
/// Damage beyond the highest eligible threshold counts as that threshold,
/// so exactly one tier ends up current whenever any tier is eligible.
pub fn prepare_wound_data(sys: &mut SystemData) -> WoundSummary {
    let order = WOUND_ORDER;
    let mode = sys.mode;
    let suffered = sys.suffered;

    match mode {
        WoundMode::Manual => prepare_manual(sys, &order),
        WoundMode::Formula => prepare_formula(sys, &order),
    }
    apply_penalties(&mut sys.wound_levels, sys.wounds_penalty_mod);
    initialize_wound_state(sys, suffered);

    let ceiling = levels_to_check(sys, &order, mode)
        .iter()
        .filter_map(|level| sys.wound_levels.get(level))
        .map(|entry| entry.threshold)
        .max()
        .unwrap_or(0);
    let damage = suffered.max(0).min(ceiling);

    let current = determine_current(sys, &order, damage, mode);
    sys.wounds.current = current.level;
    sys.wounds.penalty = current.penalty;

    let display_degraded = prepare_visible(sys, &order).is_degraded();

    tracing::debug!(
        mode = ?mode,
        current = %current.level,
        penalty = current.penalty,
        max = sys.wounds.max,
        remaining = sys.wounds.value,
        "Prepared wound data"
    );

    WoundSummary {
        current: current.level,
        penalty: current.penalty,
        max: sys.wounds.max,
        remaining: sys.wounds.value,
        display_degraded,
    }
}
