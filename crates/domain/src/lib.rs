pub mod coerce;
pub mod error;
pub mod migration;
pub mod wounds;

pub use coerce::to_int;
pub use error::DomainError;

// Re-export the wound engine surface
pub use wounds::{
    apply_penalties, determine_current, effective_penalty, initialize_wound_state,
    locate_current, prepare_formula, prepare_manual, prepare_visible, prepare_wound_data,
    select_levels, CurrentLevel, FormulaParams, ManualWoundLevelEntry, ManualWoundLevels,
    Prepared, SystemData, WoundDisplay, WoundLevel, WoundLevelEntry, WoundLevels, WoundMode,
    WoundSummary, Wounds, WOUND_ORDER,
};

// Re-export the legacy migrator surface
pub use migration::{
    detect_schema, migrate_actor, migrate_document, migrate_item, migrate_world, DocumentKind,
    MigrationReport, SchemaVersion,
};
