//! Wound-level calculation engine.
//!
//! A character moves through eight fixed wound tiers as damage
//! accumulates. Thresholds are either authored per tier by the GM
//! (manual mode) or derived from the Earth ring (formula mode). Each
//! preparation pass recomputes the whole table from its inputs:
//!
//! 1. mode-specific preparer ([`prepare_manual`] / [`prepare_formula`])
//! 2. [`apply_penalties`]
//! 3. [`initialize_wound_state`]
//! 4. [`determine_current`]
//! 5. [`prepare_visible`]
//!
//! [`prepare_wound_data`] runs the whole pass.

mod dispatch;
mod formula;
mod level;
mod locate;
mod manual;
mod penalty;
mod prepare;
mod record;
mod selector;
mod state;
mod visible;

pub use dispatch::{determine_current, CurrentLevel};
pub use formula::{prepare_formula, FormulaParams};
pub use level::{
    WoundLevel, DEFAULT_LEVEL_COUNT, DEFAULT_PENALTIES, DEFAULT_THRESHOLDS,
    DEFAULT_THRESHOLD_MULTIPLIER, HEALTHY_EARTH_MULTIPLIER, WOUND_ORDER,
};
pub use locate::locate_current;
pub use manual::prepare_manual;
pub use penalty::{apply_penalties, effective_penalty};
pub use prepare::{prepare_wound_data, WoundSummary};
pub use record::{
    ManualWoundLevelEntry, ManualWoundLevels, SystemData, WoundDisplay, WoundLevelEntry,
    WoundLevels, WoundMode, Wounds,
};
pub use selector::select_levels;
pub use state::initialize_wound_state;
pub use visible::{prepare_visible, Prepared};
