//! Presentation tables for the compact sheet and the configuration editor.

use super::formula::{derive_thresholds, FormulaParams};
use super::level::WoundLevel;
use super::locate::locate_current;
use super::penalty::effective_penalty;
use super::record::{
    ManualWoundLevelEntry, ManualWoundLevels, SystemData, WoundDisplay, WoundLevelEntry,
    WoundLevels, WoundMode,
};
use crate::error::DomainError;

/// Whether the display tables were built fresh or fell back to raw data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    Fresh,
    /// The raw tables were exposed unfiltered.
    Degraded(DomainError),
}

impl Prepared {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Fill `sys.display` for both presentation surfaces.
///
/// The editor view always lists all eight manual entries. The sheet view
/// lists only active tiers: in manual mode these are copied from the
/// prepared table; in formula mode they are recomputed from the Earth ring
/// so a trait change never shows stale thresholds, and the current tier is
/// re-derived with damage capped at the `Out` threshold.
///
/// On failure the unfiltered tables are exposed instead.
pub fn prepare_visible(sys: &mut SystemData, order: &[WoundLevel]) -> Prepared {
    match build_display(sys, order) {
        Ok(display) => {
            sys.display = display;
            Prepared::Fresh
        }
        Err(err) => {
            tracing::warn!(error = %err, "Falling back to unfiltered wound display");
            sys.display = WoundDisplay {
                main: sys.wound_levels.clone(),
                config: sys.manual_wound_levels.clone(),
            };
            Prepared::Degraded(err)
        }
    }
}

fn build_display(sys: &SystemData, order: &[WoundLevel]) -> Result<WoundDisplay, DomainError> {
    if order.is_empty() {
        return Err(DomainError::constraint("wound level order is empty"));
    }

    let config: ManualWoundLevels = WoundLevel::ALL
        .iter()
        .map(|&level| {
            let entry = sys
                .manual_wound_levels
                .get(&level)
                .cloned()
                .unwrap_or_else(|| ManualWoundLevelEntry::seeded(level));
            (level, entry)
        })
        .collect();

    let main = match sys.mode {
        WoundMode::Manual => manual_main(sys, order)?,
        WoundMode::Formula => formula_main(sys, order)?,
    };

    Ok(WoundDisplay { main, config })
}

fn manual_main(sys: &SystemData, order: &[WoundLevel]) -> Result<WoundLevels, DomainError> {
    order
        .iter()
        .filter(|level| sys.is_manual_active(**level))
        .map(|&level| {
            sys.wound_levels
                .get(&level)
                .cloned()
                .map(|entry| (level, entry))
                .ok_or_else(|| DomainError::missing_level(level))
        })
        .collect()
}

fn formula_main(sys: &SystemData, order: &[WoundLevel]) -> Result<WoundLevels, DomainError> {
    let params = FormulaParams::from_system(sys);

    let mut main: WoundLevels = derive_thresholds(&params, order)
        .into_iter()
        .filter(|tier| tier.active)
        .map(|tier| {
            let base_penalty = tier.level.default_penalty();
            let entry = WoundLevelEntry {
                threshold: tier.threshold,
                base_penalty,
                effective_penalty: effective_penalty(base_penalty, sys.wounds_penalty_mod),
                is_current: false,
                is_active: true,
                is_visible: true,
                calculated_value: None,
            };
            (tier.level, entry)
        })
        .collect();

    let out_threshold = main
        .get(&WoundLevel::Out)
        .map(|entry| entry.threshold)
        .ok_or_else(|| DomainError::missing_level(WoundLevel::Out))?;
    let damage = sys.suffered.max(0).min(out_threshold);

    let names: Vec<WoundLevel> = main.keys().copied().collect();
    locate_current(&mut main, &names, damage);

    Ok(main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wounds::test_support::{current_levels, formula_system};
    use crate::wounds::{prepare_formula, prepare_manual, WOUND_ORDER};
    use serde_json::json;
    use WoundLevel::*;

    #[test]
    fn manual_main_lists_only_active_tiers() {
        let mut sys: SystemData = serde_json::from_value(json!({
            "woundsMode": "manual",
            "manualWoundLevels": {
                "grazed": {"threshold": 27, "penalty": 5, "active": true},
            },
        }))
        .unwrap();
        prepare_manual(&mut sys, &WOUND_ORDER);

        assert_eq!(prepare_visible(&mut sys, &WOUND_ORDER), Prepared::Fresh);
        let keys: Vec<_> = sys.display.main.keys().copied().collect();
        assert_eq!(keys, vec![Healthy, Nicked, Grazed, Out]);
        assert_eq!(sys.display.main[&Grazed], sys.wound_levels[&Grazed]);
        assert_eq!(sys.display.config.len(), 8);
    }

    #[test]
    fn formula_config_still_lists_all_tiers() {
        let mut sys = formula_system(2, 3);
        prepare_formula(&mut sys, &WOUND_ORDER);
        prepare_visible(&mut sys, &WOUND_ORDER);
        assert_eq!(sys.display.config.len(), 8);
        assert_eq!(sys.display.config[&Hurt], ManualWoundLevelEntry::seeded(Hurt));
    }

    #[test]
    fn formula_main_recomputes_from_earth() {
        let mut sys = formula_system(3, 3);
        prepare_formula(&mut sys, &WOUND_ORDER);
        // Stale cached table from before an Earth change
        sys.earth = 4;
        sys.suffered = 22;
        sys.wounds_penalty_mod = -5;

        assert_eq!(prepare_visible(&mut sys, &WOUND_ORDER), Prepared::Fresh);
        let main = &sys.display.main;
        let keys: Vec<_> = main.keys().copied().collect();
        assert_eq!(keys, vec![Healthy, Nicked, Out]);
        assert_eq!(main[&Healthy].threshold, 20);
        assert_eq!(main[&Nicked].threshold, 28);
        assert_eq!(main[&Out].threshold, 36);
        assert_eq!(main[&Nicked].effective_penalty, 2);
        assert_eq!(main[&Out].effective_penalty, 35);
        assert_eq!(current_levels(main), vec![Nicked]);
        // The calculation table itself is untouched
        assert_eq!(sys.wound_levels[&Healthy].threshold, 15);
    }

    #[test]
    fn formula_main_caps_damage_at_out() {
        let mut sys = formula_system(3, 3);
        sys.suffered = 500;
        prepare_visible(&mut sys, &WOUND_ORDER);
        assert_eq!(current_levels(&sys.display.main), vec![Out]);
    }

    #[test]
    fn formula_main_applies_override() {
        let mut sys = formula_system(3, 6);
        sys.manual_max_wounds = 90;
        prepare_formula(&mut sys, &WOUND_ORDER);
        prepare_visible(&mut sys, &WOUND_ORDER);
        assert_eq!(sys.display.main[&Out].threshold, 90);
        assert_eq!(sys.display.main[&Out], {
            let mut out = sys.wound_levels[&Out].clone();
            out.effective_penalty = 40;
            out.is_current = false;
            out
        });
    }

    #[test]
    fn order_without_out_degrades() {
        let mut sys = formula_system(3, 3);
        prepare_formula(&mut sys, &WOUND_ORDER);
        let order = [Healthy, Nicked];

        let prepared = prepare_visible(&mut sys, &order);
        assert_eq!(prepared, Prepared::Degraded(DomainError::missing_level(Out)));
        assert!(prepared.is_degraded());
        assert_eq!(sys.display.main, sys.wound_levels);
        assert_eq!(sys.display.config, sys.manual_wound_levels);
    }

    #[test]
    fn empty_order_degrades() {
        let mut sys = formula_system(3, 3);
        assert!(prepare_visible(&mut sys, &[]).is_degraded());
    }

    #[test]
    fn manual_tier_missing_from_table_degrades() {
        let mut sys: SystemData = serde_json::from_value(json!({
            "woundsMode": "manual",
            "manualWoundLevels": {"hurt": {"threshold": 30, "active": true}},
        }))
        .unwrap();
        let prepared = prepare_visible(&mut sys, &WOUND_ORDER);
        assert_eq!(prepared, Prepared::Degraded(DomainError::missing_level(Hurt)));
    }
}
