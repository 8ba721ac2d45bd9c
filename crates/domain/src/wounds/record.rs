//! Typed view of a character's wound data.
//!
//! Field names follow the host's camelCase JSON. Deserialization is lenient
//! throughout: numbers go through [`to_int`](crate::coerce::to_int), flags
//! are set only by a literal `true`, unknown tier keys are dropped, and any
//! field the engine does not own is carried through untouched.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::level::WoundLevel;
use crate::coerce::{lenient_flag, lenient_int, lenient_opt_int, lenient_or_default};

/// Calculation table keyed by tier.
pub type WoundLevels = BTreeMap<WoundLevel, WoundLevelEntry>;

/// GM-authored manual configuration keyed by tier.
pub type ManualWoundLevels = BTreeMap<WoundLevel, ManualWoundLevelEntry>;

/// One row of the calculation table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WoundLevelEntry {
    /// Cumulative damage at which this tier is entered.
    #[serde(alias = "value", deserialize_with = "lenient_int")]
    pub threshold: i64,
    /// Unmodified roll penalty, stored positive.
    #[serde(rename = "penalty", deserialize_with = "lenient_int")]
    pub base_penalty: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub effective_penalty: i64,
    #[serde(rename = "current", deserialize_with = "lenient_flag")]
    pub is_current: bool,
    #[serde(rename = "active", deserialize_with = "lenient_flag")]
    pub is_active: bool,
    #[serde(rename = "visible", deserialize_with = "lenient_flag")]
    pub is_visible: bool,
    /// Progression value used in place of `threshold` for inactive manual tiers.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_int"
    )]
    pub calculated_value: Option<i64>,
}

/// One GM-authored row of the manual configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManualWoundLevelEntry {
    #[serde(alias = "value", deserialize_with = "lenient_int")]
    pub threshold: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub penalty: i64,
    #[serde(deserialize_with = "lenient_flag")]
    pub active: bool,
}

impl ManualWoundLevelEntry {
    /// Entry for a tier the GM has never configured.
    pub fn seeded(level: WoundLevel) -> Self {
        Self {
            threshold: level.default_threshold(),
            penalty: level.default_penalty(),
            active: level.seeded_active(),
        }
    }
}

/// How thresholds are sourced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WoundMode {
    /// GM enters thresholds, penalties and active flags per tier.
    Manual,
    /// Thresholds derive from the Earth ring.
    #[default]
    Formula,
}

impl<'de> Deserialize<'de> for WoundMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Anything other than "manual" is formula mode
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_str().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("manual") => Self::Manual,
            _ => Self::Formula,
        })
    }
}

/// Capacity summary written back for the sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Wounds {
    /// Maximum wound capacity.
    #[serde(deserialize_with = "lenient_int")]
    pub max: i64,
    /// Remaining capacity.
    #[serde(deserialize_with = "lenient_int")]
    pub value: i64,
    #[serde(deserialize_with = "lenient_or_default")]
    pub current: WoundLevel,
    /// Effective penalty of the current tier.
    #[serde(deserialize_with = "lenient_int")]
    pub penalty: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Filtered tables for the two presentation surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WoundDisplay {
    /// Compact sheet display.
    #[serde(deserialize_with = "lenient_tier_map")]
    pub main: WoundLevels,
    /// Configuration editor, always all eight tiers.
    #[serde(deserialize_with = "lenient_tier_map")]
    pub config: ManualWoundLevels,
}

/// A character's system data as far as wounds are concerned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemData {
    #[serde(deserialize_with = "lenient_tier_map")]
    pub wound_levels: WoundLevels,
    #[serde(deserialize_with = "lenient_tier_map")]
    pub manual_wound_levels: ManualWoundLevels,
    #[serde(deserialize_with = "lenient_or_default")]
    pub wounds: Wounds,
    /// Cumulative damage taken.
    #[serde(deserialize_with = "lenient_int")]
    pub suffered: i64,
    #[serde(rename = "woundsMode")]
    pub mode: WoundMode,
    /// Added to every tier's base penalty.
    #[serde(deserialize_with = "lenient_int")]
    pub wounds_penalty_mod: i64,
    /// Active tiers in formula mode, 0 for the default.
    #[serde(deserialize_with = "lenient_int")]
    pub wound_level_count: i64,
    /// Earth ring rating.
    #[serde(deserialize_with = "lenient_int")]
    pub earth: i64,
    /// Earth multiplier per tier, 0 for the default.
    #[serde(deserialize_with = "lenient_int")]
    pub wounds_multiplier: i64,
    /// Flat amount added to every derived threshold.
    #[serde(deserialize_with = "lenient_int")]
    pub wounds_modifier: i64,
    /// GM override for maximum wounds, 0 when unset.
    #[serde(deserialize_with = "lenient_int")]
    pub manual_max_wounds: i64,
    #[serde(deserialize_with = "lenient_or_default")]
    pub display: WoundDisplay,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SystemData {
    /// The GM's maximum-wounds override, if one is set.
    pub fn max_wounds_override(&self) -> Option<i64> {
        (self.manual_max_wounds > 0).then_some(self.manual_max_wounds)
    }

    pub fn is_manual_active(&self, level: WoundLevel) -> bool {
        self.manual_wound_levels
            .get(&level)
            .is_some_and(|entry| entry.active)
    }
}

/// Keep only tier keys that parse and entries that deserialize.
fn lenient_tier_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<WoundLevel, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(map) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, raw)| {
            let level = key.parse::<WoundLevel>().ok()?;
            let entry = serde_json::from_value(raw).ok()?;
            Some((level, entry))
        })
        .collect())
}
