use serde::Serialize;
use serde_json::Value;

use super::migrate_document;
use super::paths::get_path;

/// Actor document types; any other typed document with a `system` is an item.
const ACTOR_TYPES: &[&str] = &["pc", "npc"];

/// Which schema a document was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    Legacy,
    Current,
}

/// Shape of an exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    World,
    Actor,
    Item,
}

impl DocumentKind {
    pub fn of(doc: &Value) -> Option<Self> {
        let object = doc.as_object()?;
        if object.contains_key("system") {
            let doc_type = get_path(object, "type").and_then(Value::as_str);
            return Some(match doc_type {
                Some(t) if ACTOR_TYPES.contains(&t) => Self::Actor,
                _ => Self::Item,
            });
        }
        let has_collection =
            |key: &str| object.get(key).is_some_and(Value::is_array);
        (has_collection("actors") || has_collection("items")).then_some(Self::World)
    }
}

/// Guess whether `doc` predates the current schema.
///
/// A document is legacy when migrating it would change anything: a legacy
/// field name, a numeric field stored as text, or a `bow` item anywhere in
/// it. Embedded entries the migrator cannot read do not make a document
/// legacy. Documents that are not worlds, actors or items count as current.
pub fn detect_schema(doc: &Value) -> SchemaVersion {
    let mut probe = doc.clone();
    match migrate_document(&mut probe) {
        Ok(report) if report.has_changes() => SchemaVersion::Legacy,
        _ => SchemaVersion::Current,
    }
}
