//! Formula mode: thresholds derive from the Earth ring.
//!
//! `Healthy` is entered at `5 * earth + additive`; every further active tier
//! adds `earth * multiplier + additive` on top of the previous active
//! threshold. Inactive tiers sit flat at the previous threshold with no
//! penalty. A GM maximum-wounds override stretches or compresses the whole
//! curve proportionally.

use super::level::{
    WoundLevel, DEFAULT_LEVEL_COUNT, DEFAULT_THRESHOLD_MULTIPLIER, HEALTHY_EARTH_MULTIPLIER,
};
use super::record::SystemData;
use super::selector::select_levels;

/// Inputs to the threshold formula, with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaParams {
    pub earth: i64,
    pub multiplier: i64,
    pub additive: i64,
    pub level_count: i64,
    pub max_override: Option<i64>,
}

impl FormulaParams {
    /// Read the formula inputs off a record. Zero multiplier or level count
    /// select their defaults.
    pub fn from_system(sys: &SystemData) -> Self {
        Self {
            earth: sys.earth,
            multiplier: non_zero_or(sys.wounds_multiplier, DEFAULT_THRESHOLD_MULTIPLIER),
            additive: sys.wounds_modifier,
            level_count: non_zero_or(sys.wound_level_count, DEFAULT_LEVEL_COUNT),
            max_override: sys.max_wounds_override(),
        }
    }
}

impl Default for FormulaParams {
    fn default() -> Self {
        Self {
            earth: 0,
            multiplier: DEFAULT_THRESHOLD_MULTIPLIER,
            additive: 0,
            level_count: DEFAULT_LEVEL_COUNT,
            max_override: None,
        }
    }
}

fn non_zero_or(value: i64, default: i64) -> i64 {
    if value == 0 {
        default
    } else {
        value
    }
}

/// A derived threshold for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FormulaTier {
    pub level: WoundLevel,
    pub threshold: i64,
    pub active: bool,
}

/// Derive thresholds for `order`, rescaled to the override if one is set.
pub(crate) fn derive_thresholds(params: &FormulaParams, order: &[WoundLevel]) -> Vec<FormulaTier> {
    let active_set = select_levels(params.level_count);
    let step = params.earth.saturating_mul(params.multiplier);

    let mut previous = 0;
    let mut tiers: Vec<FormulaTier> = order
        .iter()
        .map(|&level| {
            if active_set.contains(&level) {
                let threshold = if level == WoundLevel::Healthy {
                    params
                        .earth
                        .saturating_mul(HEALTHY_EARTH_MULTIPLIER)
                        .saturating_add(params.additive)
                } else {
                    step.saturating_add(previous).saturating_add(params.additive)
                };
                previous = threshold;
                FormulaTier {
                    level,
                    threshold,
                    active: true,
                }
            } else {
                FormulaTier {
                    level,
                    threshold: previous,
                    active: false,
                }
            }
        })
        .collect();

    if let Some(target) = params.max_override {
        rescale(&mut tiers, target);
    }
    tiers
}

/// Scale every threshold by `target / out` (rounding up), then restore
/// strict monotonicity: `Healthy >= 1`, every later tier at least one above
/// its predecessor.
fn rescale(tiers: &mut [FormulaTier], target: i64) {
    let Some(out) = tiers
        .iter()
        .find(|t| t.level == WoundLevel::Out)
        .map(|t| t.threshold)
    else {
        return;
    };
    if out == target {
        return;
    }
    if out <= 0 {
        tracing::debug!(out, target, "Skipping wound rescale for non-positive out threshold");
        return;
    }

    tracing::debug!(out, target, "Rescaling formula wound thresholds");

    let mut previous: Option<i64> = None;
    for tier in tiers.iter_mut() {
        let scaled = ceil_ratio(tier.threshold, target, out);
        tier.threshold = match (tier.level, previous) {
            (WoundLevel::Healthy, _) => scaled.max(1),
            (_, Some(prev)) => scaled.max(prev.saturating_add(1)),
            (_, None) => scaled,
        };
        previous = Some(tier.threshold);
    }
}

/// `ceil(value * numerator / denominator)` in integer arithmetic.
fn ceil_ratio(value: i64, numerator: i64, denominator: i64) -> i64 {
    let product = i128::from(value) * i128::from(numerator);
    let denominator = i128::from(denominator);
    let quotient = product / denominator;
    let ceiled = if product % denominator != 0 && (product > 0) == (denominator > 0) {
        quotient + 1
    } else {
        quotient
    };
    i64::try_from(ceiled).unwrap_or(if ceiled > 0 { i64::MAX } else { i64::MIN })
}

/// Rebuild the calculation table from the formula.
///
/// Active tiers get their default base penalty every pass, so edits to a
/// formula-mode penalty never persist. Inactive tiers are hidden with no
/// penalty. All `is_current` flags are cleared for the dispatcher.
pub fn prepare_formula(sys: &mut SystemData, order: &[WoundLevel]) {
    let params = FormulaParams::from_system(sys);

    for tier in derive_thresholds(&params, order) {
        let entry = sys.wound_levels.entry(tier.level).or_default();
        entry.threshold = tier.threshold;
        entry.base_penalty = if tier.active {
            tier.level.default_penalty()
        } else {
            0
        };
        entry.is_active = tier.active;
        entry.is_visible = tier.active;
        entry.is_current = false;
        entry.calculated_value = None;
    }
}
