//! Engine configuration, read from the environment.

use std::path::{Path, PathBuf};

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "l5r4_engine=info,l5r4_domain=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pretty = lookup("L5R4_PRETTY")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(true);
        Self { pretty }
    }
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// Load `.env.local` then `.env` from `dir`, if present.
///
/// Variables already set in the process environment win. Files that fail to
/// parse are returned so the caller can report them once logging is up.
pub fn load_dotenv_from(dir: &Path) -> Vec<(PathBuf, dotenvy::Error)> {
    [".env.local", ".env"]
        .into_iter()
        .map(|filename| dir.join(filename))
        .filter(|path| path.exists())
        .filter_map(|path| dotenvy::from_path(&path).err().map(|err| (path, err)))
        .collect()
}
