//! Manual mode: thresholds, penalties and active flags come straight from
//! the GM's per-tier configuration.

use super::level::WoundLevel;
use super::record::{ManualWoundLevelEntry, SystemData, WoundLevels};

/// Copy the manual configuration into the calculation table.
///
/// Tiers the GM never configured are seeded from the default tables with
/// the three-tier `healthy / nicked / out` layout active. Every tier stays
/// visible in the editor. Inactive tiers after the first record the
/// previous tier's threshold as their `calculated_value`. Thresholds are
/// then repaired to be strictly increasing.
pub fn prepare_manual(sys: &mut SystemData, order: &[WoundLevel]) {
    for &level in order {
        sys.manual_wound_levels
            .entry(level)
            .or_insert_with(|| ManualWoundLevelEntry::seeded(level));
    }

    let mut previous: Option<i64> = None;
    for &level in order {
        let manual = sys
            .manual_wound_levels
            .get(&level)
            .cloned()
            .unwrap_or_else(|| ManualWoundLevelEntry::seeded(level));

        let entry = sys.wound_levels.entry(level).or_default();
        entry.threshold = manual.threshold.max(0);
        entry.base_penalty = manual.penalty.max(0);
        entry.is_active = manual.active;
        entry.is_visible = true;
        entry.is_current = false;
        entry.calculated_value = match previous {
            Some(prev) if !manual.active => Some(prev),
            _ => None,
        };

        previous = Some(entry.threshold);
    }

    enforce_increasing(&mut sys.wound_levels, order);
}

/// Force every tier after `Healthy` above the one before it.
fn enforce_increasing(levels: &mut WoundLevels, order: &[WoundLevel]) {
    let mut previous: Option<i64> = None;
    for level in order {
        let Some(entry) = levels.get_mut(level) else {
            continue;
        };
        if let Some(prev) = previous {
            if *level != WoundLevel::Healthy && entry.threshold <= prev {
                tracing::debug!(
                    level = %level,
                    entered = entry.threshold,
                    repaired = prev + 1,
                    "Repairing non-increasing manual wound threshold"
                );
                entry.threshold = prev + 1;
            }
        }
        previous = Some(entry.threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wounds::test_support::thresholds;
    use crate::wounds::{WoundMode, WOUND_ORDER};
    use serde_json::json;
    use WoundLevel::*;

    fn manual_system(config: serde_json::Value) -> SystemData {
        serde_json::from_value(json!({
            "woundsMode": "manual",
            "manualWoundLevels": config,
        }))
        .unwrap()
    }

    #[test]
    fn empty_configuration_is_seeded_from_defaults() {
        let mut sys = SystemData {
            mode: WoundMode::Manual,
            ..Default::default()
        };
        prepare_manual(&mut sys, &WOUND_ORDER);

        assert_eq!(sys.manual_wound_levels.len(), 8);
        assert_eq!(sys.manual_wound_levels[&Nicked], ManualWoundLevelEntry::seeded(Nicked));
        assert!(sys.manual_wound_levels[&Out].active);
        assert!(!sys.manual_wound_levels[&Hurt].active);
        assert_eq!(thresholds(&sys.wound_levels), vec![15, 20, 25, 30, 35, 40, 43, 45]);
    }

    #[test]
    fn existing_entries_are_not_reseeded() {
        let mut sys = manual_system(json!({"hurt": {"threshold": 33, "penalty": 11, "active": true}}));
        prepare_manual(&mut sys, &WOUND_ORDER);
        assert_eq!(sys.manual_wound_levels[&Hurt].threshold, 33);
        assert!(sys.manual_wound_levels[&Hurt].active);
        assert_eq!(sys.wound_levels[&Hurt].base_penalty, 11);
        assert!(sys.wound_levels[&Hurt].is_active);
    }

    #[test]
    fn copies_flags_and_clamps_negatives() {
        let mut sys = manual_system(json!({
            "healthy": {"threshold": -3, "penalty": -2, "active": true},
            "nicked": {"threshold": 20, "penalty": 3, "active": false},
        }));
        prepare_manual(&mut sys, &WOUND_ORDER);

        let healthy = &sys.wound_levels[&Healthy];
        assert_eq!(healthy.threshold, 0);
        assert_eq!(healthy.base_penalty, 0);
        assert!(healthy.is_active);

        let nicked = &sys.wound_levels[&Nicked];
        assert!(!nicked.is_active);
        assert!(WOUND_ORDER.iter().all(|l| sys.wound_levels[l].is_visible));
    }

    #[test]
    fn inactive_tiers_record_previous_threshold() {
        let mut sys = manual_system(json!({
            "healthy": {"threshold": 10, "penalty": 0, "active": false},
            "nicked": {"threshold": 20, "penalty": 3, "active": false},
            "grazed": {"threshold": 30, "penalty": 5, "active": true},
        }));
        prepare_manual(&mut sys, &WOUND_ORDER);

        // First tier has no predecessor
        assert_eq!(sys.wound_levels[&Healthy].calculated_value, None);
        assert_eq!(sys.wound_levels[&Nicked].calculated_value, Some(10));
        assert_eq!(sys.wound_levels[&Nicked].threshold, 20);
        assert_eq!(sys.wound_levels[&Grazed].calculated_value, None);
    }

    #[test]
    fn non_increasing_thresholds_are_repaired() {
        let mut sys = manual_system(json!({
            "healthy": {"threshold": 15, "active": true},
            "nicked": {"threshold": 10, "active": true},
            "grazed": {"threshold": 10, "active": true},
            "hurt": {"threshold": 40, "active": true},
            "injured": {"threshold": 50, "active": true},
            "crippled": {"threshold": 60, "active": true},
            "down": {"threshold": 70, "active": true},
            "out": {"threshold": 80, "active": true},
        }));
        prepare_manual(&mut sys, &WOUND_ORDER);

        let repaired = thresholds(&sys.wound_levels);
        assert_eq!(repaired, vec![15, 16, 17, 40, 50, 60, 70, 80]);
        assert!(repaired[1..].windows(2).all(|w| w[0] < w[1]));
        // The GM's own numbers are left alone
        assert_eq!(sys.manual_wound_levels[&Nicked].threshold, 10);
    }

    #[test]
    fn healthy_is_never_bumped() {
        let mut levels: WoundLevels = [(Healthy, 0), (Nicked, 0)]
            .into_iter()
            .map(|(l, t)| {
                (
                    l,
                    crate::wounds::WoundLevelEntry {
                        threshold: t,
                        ..Default::default()
                    },
                )
            })
            .collect();
        enforce_increasing(&mut levels, &[Healthy, Nicked]);
        assert_eq!(levels[&Healthy].threshold, 0);
        assert_eq!(levels[&Nicked].threshold, 1);
    }

    #[test]
    fn rerunning_is_stable() {
        let mut sys = manual_system(json!({"nicked": {"threshold": 5, "active": true}}));
        prepare_manual(&mut sys, &WOUND_ORDER);
        let first = sys.wound_levels.clone();
        prepare_manual(&mut sys, &WOUND_ORDER);
        assert_eq!(sys.wound_levels, first);
    }
}
