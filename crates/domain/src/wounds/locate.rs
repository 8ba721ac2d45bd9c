use super::level::WoundLevel;
use super::record::WoundLevels;

/// Find the current tier for `damage` among `names`, in the given order.
///
/// A tier is current when `previous threshold < damage <= threshold`, with
/// the running previous threshold starting at -1. Every visited entry's
/// `is_current` flag is overwritten; names missing from `levels` are skipped
/// and do not move the running threshold. If several tiers match (only
/// possible with non-increasing thresholds) the last one wins. Falls back to
/// `Healthy` when nothing matches.
pub fn locate_current(levels: &mut WoundLevels, names: &[WoundLevel], damage: i64) -> WoundLevel {
    let mut last_threshold = -1;
    let mut current = WoundLevel::Healthy;

    for &name in names {
        let Some(entry) = levels.get_mut(&name) else {
            continue;
        };
        let hit = last_threshold < damage && damage <= entry.threshold;
        entry.is_current = hit;
        if hit {
            current = name;
        }
        last_threshold = entry.threshold;
    }

    current
}
