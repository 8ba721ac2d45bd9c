//! Legacy-schema migrator for worlds exported by older plugin versions.
//!
//! Legacy documents do not fit the typed record, so everything here works on
//! raw `serde_json::Value` trees:
//!
//! - snake_case fields are renamed to their current camelCase paths
//! - numeric fields stored as strings, floats or `null` become integers
//! - `bow` items become `weapon` items flagged `isBow`
//!
//! Every migration is idempotent: running it over a current document
//! changes nothing, and its [`MigrationReport`] has no changes.

mod actor;
mod item;
mod paths;
mod schema;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::coerce::to_int;
use crate::error::DomainError;

pub use actor::{migrate_actor, migrate_world};
pub use item::migrate_item;
pub use schema::{detect_schema, DocumentKind, SchemaVersion};

/// What a migration changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    /// `from -> to` for every renamed field.
    pub renamed: Vec<String>,
    /// Legacy fields discarded because the current field already existed.
    pub dropped: Vec<String>,
    /// Fields rewritten as integers.
    pub coerced: Vec<String>,
    pub bows_converted: usize,
    /// Embedded documents that could not be migrated.
    pub skipped: usize,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        self.renamed.is_empty()
            && self.dropped.is_empty()
            && self.coerced.is_empty()
            && self.bows_converted == 0
            && self.skipped == 0
    }

    /// Whether the migration rewrote anything. Skipped entries are not
    /// changes; they stay as they were.
    pub fn has_changes(&self) -> bool {
        !self.renamed.is_empty()
            || !self.dropped.is_empty()
            || !self.coerced.is_empty()
            || self.bows_converted > 0
    }

    /// Fold a nested document's report into this one under `prefix`.
    pub(crate) fn absorb(&mut self, other: MigrationReport, prefix: &str) {
        let scoped = |entries: Vec<String>| {
            entries
                .into_iter()
                .map(|entry| format!("{prefix}.{entry}"))
                .collect::<Vec<_>>()
        };
        self.renamed.extend(scoped(other.renamed));
        self.dropped.extend(scoped(other.dropped));
        self.coerced.extend(scoped(other.coerced));
        self.bows_converted += other.bows_converted;
        self.skipped += other.skipped;
    }
}

/// Migrate a world, actor or item, whichever `doc` looks like.
pub fn migrate_document(doc: &mut Value) -> Result<MigrationReport, DomainError> {
    match DocumentKind::of(doc) {
        Some(DocumentKind::World) => migrate_world(doc),
        Some(DocumentKind::Actor) => migrate_actor(doc),
        Some(DocumentKind::Item) => migrate_item(doc),
        None => Err(DomainError::validation(
            "document is not a world, actor or item",
        )),
    }
}

/// Apply renames, then integer coercion, to one `system` object.
pub(crate) fn migrate_fields(
    system: &mut Map<String, Value>,
    renames: &[(&str, &str)],
    numeric_paths: &[String],
    report: &mut MigrationReport,
) {
    for (from, to) in renames {
        let Some(value) = paths::take_path(system, from) else {
            continue;
        };
        match paths::insert_path(system, to, value) {
            Ok(()) => report.renamed.push(format!("system.{from} -> system.{to}")),
            Err(_) => {
                tracing::debug!(from, to, "Dropping legacy field, current field already set");
                report.dropped.push(format!("system.{from}"));
            }
        }
    }

    for path in numeric_paths {
        let Some(value) = paths::get_path_mut(system, path) else {
            continue;
        };
        if value.is_i64() || value.is_u64() || value.is_object() || value.is_array() {
            continue;
        }
        *value = Value::from(to_int(value));
        report.coerced.push(format!("system.{path}"));
    }
}
