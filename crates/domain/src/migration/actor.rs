use serde_json::Value;

use super::item::migrate_item;
use super::{migrate_fields, MigrationReport};
use crate::error::DomainError;
use crate::wounds::WOUND_ORDER;

/// Legacy actor field → current field, relative to `system`.
const ACTOR_RENAMES: &[(&str, &str)] = &[
    ("wound_lvl", "woundLevels"),
    ("manual_wound_lvl", "manualWoundLevels"),
    ("wounds.heal_rate", "wounds.healRate"),
    ("wound_penalty_mod", "woundsPenaltyMod"),
    ("wounds_mode", "woundsMode"),
    ("wound_level_count", "woundLevelCount"),
    ("max_wounds", "manualMaxWounds"),
    ("armor_tn", "armorTn"),
    ("shadow_taint", "shadowTaint"),
    ("insight_rank", "insight.rank"),
    ("insight.rank_points", "insight.points"),
];

const ACTOR_NUMERIC_PATHS: &[&str] = &[
    "suffered",
    "earth",
    "woundsPenaltyMod",
    "woundLevelCount",
    "woundsMultiplier",
    "woundsModifier",
    "manualMaxWounds",
    "wounds.healRate",
    "armorTn",
    "honor",
    "glory",
    "status",
    "shadowTaint",
    "insight.rank",
    "insight.points",
];

fn actor_numeric_paths() -> Vec<String> {
    let tier_fields = WOUND_ORDER.iter().flat_map(|level| {
        [
            format!("woundLevels.{level}.value"),
            format!("woundLevels.{level}.penalty"),
            format!("manualWoundLevels.{level}.threshold"),
            format!("manualWoundLevels.{level}.penalty"),
        ]
    });
    ACTOR_NUMERIC_PATHS
        .iter()
        .map(|p| p.to_string())
        .chain(tier_fields)
        .collect()
}

/// Migrate one actor document and its embedded items in place.
pub fn migrate_actor(doc: &mut Value) -> Result<MigrationReport, DomainError> {
    let object = doc
        .as_object_mut()
        .ok_or_else(|| DomainError::validation("actor document must be a JSON object"))?;
    let mut report = MigrationReport::default();

    if let Some(system) = object.get_mut("system").and_then(Value::as_object_mut) {
        migrate_fields(system, ACTOR_RENAMES, &actor_numeric_paths(), &mut report);
    }

    if let Some(items) = object.get_mut("items").and_then(Value::as_array_mut) {
        migrate_collection(items, "items", migrate_item, &mut report);
    }

    Ok(report)
}

/// Migrate every actor and item in an exported world.
///
/// Malformed entries are skipped and counted rather than aborting the import.
pub fn migrate_world(doc: &mut Value) -> Result<MigrationReport, DomainError> {
    let object = doc
        .as_object_mut()
        .ok_or_else(|| DomainError::validation("world document must be a JSON object"))?;
    let mut report = MigrationReport::default();

    if let Some(actors) = object.get_mut("actors").and_then(Value::as_array_mut) {
        migrate_collection(actors, "actors", migrate_actor, &mut report);
    }
    if let Some(items) = object.get_mut("items").and_then(Value::as_array_mut) {
        migrate_collection(items, "items", migrate_item, &mut report);
    }

    tracing::info!(
        renamed = report.renamed.len(),
        coerced = report.coerced.len(),
        bows = report.bows_converted,
        skipped = report.skipped,
        "Migrated legacy world"
    );
    Ok(report)
}

fn migrate_collection(
    docs: &mut [Value],
    name: &str,
    migrate: fn(&mut Value) -> Result<MigrationReport, DomainError>,
    report: &mut MigrationReport,
) {
    for (index, doc) in docs.iter_mut().enumerate() {
        match migrate(doc) {
            Ok(nested) => report.absorb(nested, &format!("{name}[{index}]")),
            Err(err) => {
                tracing::warn!(collection = name, index, error = %err, "Skipping document");
                report.skipped += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wounds::{prepare_wound_data, SystemData, WoundLevel, WoundMode};
    use serde_json::json;

    fn legacy_actor() -> Value {
        json!({
            "name": "Bayushi Kachiko",
            "type": "npc",
            "system": {
                "wound_lvl": {
                    "healthy": {"value": "15", "penalty": "0"},
                    "nicked": {"value": 20, "penalty": "3"},
                },
                "manual_wound_lvl": {
                    "healthy": {"threshold": "10", "penalty": 0, "active": true},
                    "out": {"threshold": "30", "penalty": 40, "active": true},
                },
                "wounds": {"heal_rate": "7", "max": 30},
                "wounds_mode": "manual",
                "wound_penalty_mod": "-1",
                "suffered": "12",
                "armor_tn": "25",
                "insight_rank": 2,
                "honor": 6.5,
            },
            "items": [
                {"name": "Yumi", "type": "bow", "system": {"str": 3}},
                "garbage",
            ],
        })
    }

    #[test]
    fn renames_and_coerces_actor_fields() {
        let mut doc = legacy_actor();
        let report = migrate_actor(&mut doc).unwrap();
        let system = &doc["system"];

        assert_eq!(system["woundLevels"]["healthy"]["value"], json!(15));
        assert_eq!(system["woundLevels"]["nicked"]["penalty"], json!(3));
        assert_eq!(system["manualWoundLevels"]["out"]["threshold"], json!(30));
        assert_eq!(system["wounds"], json!({"healRate": 7, "max": 30}));
        assert_eq!(system["woundsMode"], json!("manual"));
        assert_eq!(system["woundsPenaltyMod"], json!(-1));
        assert_eq!(system["suffered"], json!(12));
        assert_eq!(system["armorTn"], json!(25));
        assert_eq!(system["insight"], json!({"rank": 2}));
        assert_eq!(system["honor"], json!(6));
        assert!(system.get("wound_lvl").is_none());

        assert_eq!(report.renamed.len(), 8);
        assert_eq!(report.bows_converted, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(doc["items"][0]["type"], json!("weapon"));
        assert_eq!(doc["items"][1], json!("garbage"));
    }

    #[test]
    fn migrated_actor_prepares_cleanly() {
        let mut doc = legacy_actor();
        migrate_actor(&mut doc).unwrap();
        let mut sys: SystemData = serde_json::from_value(doc["system"].clone()).unwrap();
        assert_eq!(sys.mode, WoundMode::Manual);

        let summary = prepare_wound_data(&mut sys);
        // Nicked is seeded active at 20; out is pushed above the seeded down tier
        assert_eq!(summary.current, WoundLevel::Nicked);
        assert_eq!(summary.penalty, 2);
        assert_eq!(sys.wound_levels[&WoundLevel::Out].threshold, 44);
        assert_eq!(summary.max, 44);
        assert_eq!(summary.remaining, 32);
    }

    #[test]
    fn actor_migration_is_idempotent() {
        let mut doc = legacy_actor();
        migrate_actor(&mut doc).unwrap();
        let migrated = doc.clone();
        let report = migrate_actor(&mut doc).unwrap();
        // Only the unmigratable embedded item is reported again
        assert_eq!(report.skipped, 1);
        assert!(!report.has_changes());
        assert_eq!(doc, migrated);
    }

    #[test]
    fn insight_rank_points_move_to_points() {
        let mut doc = json!({"type": "pc", "system": {"insight": {"rank_points": "12", "rank": 2}}});
        let report = migrate_actor(&mut doc).unwrap();
        assert_eq!(doc["system"]["insight"], json!({"rank": 2, "points": 12}));
        assert_eq!(
            report.renamed,
            vec!["system.insight.rank_points -> system.insight.points".to_string()]
        );
        assert_eq!(report.coerced, vec!["system.insight.points".to_string()]);
    }

    #[test]
    fn world_walks_actors_and_items() {
        let mut world = json!({
            "name": "Rokugan",
            "actors": [legacy_actor(), 7],
            "items": [{"type": "bow", "system": {"damage_keep": "2"}}],
        });
        let report = migrate_world(&mut world).unwrap();

        assert_eq!(report.bows_converted, 2);
        assert_eq!(report.skipped, 2);
        assert!(report
            .renamed
            .contains(&"items[0].system.damage_keep -> system.damageKeep".to_string()));
        assert!(report
            .coerced
            .contains(&"actors[0].system.suffered".to_string()));
        assert_eq!(world["items"][0]["system"]["damageKeep"], json!(2));
    }

    #[test]
    fn non_object_actor_is_rejected() {
        assert!(migrate_actor(&mut json!(null)).is_err());
        assert!(migrate_world(&mut json!("world")).is_err());
    }
}
