//! Wound tiers and their default tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// The eight wound tiers, in canonical order.
///
/// `Out` is the terminal (incapacitated) tier and closes every active set.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WoundLevel {
    #[default]
    Healthy,
    Nicked,
    Grazed,
    Hurt,
    Injured,
    Crippled,
    Down,
    Out,
}

/// Canonical tier order.
pub const WOUND_ORDER: [WoundLevel; 8] = WoundLevel::ALL;

/// Base penalty per tier, indexed by [`WoundLevel::index`].
pub const DEFAULT_PENALTIES: [i64; 8] = [0, 3, 5, 10, 15, 20, 40, 40];

/// Seed thresholds for brand-new manual configurations.
pub const DEFAULT_THRESHOLDS: [i64; 8] = [15, 20, 25, 30, 35, 40, 43, 45];

/// Active tier count used when none is configured.
pub const DEFAULT_LEVEL_COUNT: i64 = 3;

/// Earth multiplier for every tier after `Healthy` in formula mode.
pub const DEFAULT_THRESHOLD_MULTIPLIER: i64 = 2;

/// Earth multiplier for the `Healthy` tier in formula mode.
pub const HEALTHY_EARTH_MULTIPLIER: i64 = 5;

impl WoundLevel {
    pub const ALL: [WoundLevel; 8] = [
        Self::Healthy,
        Self::Nicked,
        Self::Grazed,
        Self::Hurt,
        Self::Injured,
        Self::Crippled,
        Self::Down,
        Self::Out,
    ];

    /// Returns the lowercase tier name (e.g., "healthy", "out").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Nicked => "nicked",
            Self::Grazed => "grazed",
            Self::Hurt => "hurt",
            Self::Injured => "injured",
            Self::Crippled => "crippled",
            Self::Down => "down",
            Self::Out => "out",
        }
    }

    /// Position in canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Out)
    }

    pub fn default_penalty(self) -> i64 {
        DEFAULT_PENALTIES[self.index()]
    }

    pub fn default_threshold(self) -> i64 {
        DEFAULT_THRESHOLDS[self.index()]
    }

    /// Whether a freshly seeded manual configuration marks this tier active.
    ///
    /// The seed is the three-tier `healthy / nicked / out` layout.
    pub fn seeded_active(self) -> bool {
        matches!(self, Self::Healthy | Self::Nicked | Self::Out)
    }
}

impl fmt::Display for WoundLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WoundLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "healthy" => Ok(Self::Healthy),
            "nicked" => Ok(Self::Nicked),
            "grazed" => Ok(Self::Grazed),
            "hurt" => Ok(Self::Hurt),
            "injured" => Ok(Self::Injured),
            "crippled" => Ok(Self::Crippled),
            "down" => Ok(Self::Down),
            "out" => Ok(Self::Out),
            other => Err(DomainError::parse(format!("Unknown wound level: {other}"))),
        }
    }
}
