use serde_json::{Map, Value};

use super::{migrate_fields, MigrationReport};
use crate::error::DomainError;

/// Legacy item field → current field, relative to `system`.
const ITEM_RENAMES: &[(&str, &str)] = &[
    ("damage_roll", "damageRoll"),
    ("damage_keep", "damageKeep"),
    ("str", "strength"),
    ("armor_bonus", "bonus"),
];

const ITEM_NUMERIC_PATHS: &[&str] = &[
    "damageRoll",
    "damageKeep",
    "strength",
    "range",
    "bonus",
    "reduction",
    "price",
];

/// Migrate one item document in place.
///
/// `bow` items become `weapon` items with `system.isBow = true`.
pub fn migrate_item(doc: &mut Value) -> Result<MigrationReport, DomainError> {
    let object = doc
        .as_object_mut()
        .ok_or_else(|| DomainError::validation("item document must be a JSON object"))?;
    let mut report = MigrationReport::default();

    if object.get("type").and_then(Value::as_str) == Some("bow") {
        object.insert("type".to_string(), Value::from("weapon"));
        let system = object
            .entry("system")
            .or_insert_with(|| Value::Object(Map::new()));
        if !system.is_object() {
            *system = Value::Object(Map::new());
        }
        if let Some(system) = system.as_object_mut() {
            system.insert("isBow".to_string(), Value::Bool(true));
        }
        report.bows_converted += 1;
    }

    if let Some(system) = object.get_mut("system").and_then(Value::as_object_mut) {
        let numeric: Vec<String> = ITEM_NUMERIC_PATHS.iter().map(|p| p.to_string()).collect();
        migrate_fields(system, ITEM_RENAMES, &numeric, &mut report);
    }

    Ok(report)
}
