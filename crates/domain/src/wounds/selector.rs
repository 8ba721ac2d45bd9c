use super::level::{WoundLevel, DEFAULT_LEVEL_COUNT, WOUND_ORDER};

/// Ordered set of tiers that are active for a given level count.
///
/// `count` is clamped to `1..=8`; `0` (what [`to_int`](crate::coerce::to_int)
/// makes of a missing or malformed value) selects the default of 3. The
/// result always ends in [`WoundLevel::Out`]: for counts of 3 or more the
/// last tier of the canonical prefix is replaced by `Out`, not appended.
pub fn select_levels(count: i64) -> Vec<WoundLevel> {
    let count = if count == 0 {
        DEFAULT_LEVEL_COUNT
    } else {
        count.clamp(1, WOUND_ORDER.len() as i64)
    };

    match count {
        1 => vec![WoundLevel::Healthy, WoundLevel::Out],
        2 => vec![WoundLevel::Healthy, WoundLevel::Nicked, WoundLevel::Out],
        n => {
            let mut levels = WOUND_ORDER[..n as usize].to_vec();
            if let Some(last) = levels.last_mut().filter(|last| !last.is_terminal()) {
                *last = WoundLevel::Out;
            }
            levels
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use WoundLevel::*;

    #[test]
    fn three_and_five_levels() {
        assert_eq!(select_levels(3), vec![Healthy, Nicked, Out]);
        assert_eq!(
            select_levels(5),
            vec![Healthy, Nicked, Grazed, Hurt, Out]
        );
    }

    #[test]
    fn one_and_two_levels_are_special_cased() {
        assert_eq!(select_levels(1), vec![Healthy, Out]);
        assert_eq!(select_levels(2), vec![Healthy, Nicked, Out]);
    }

    #[test]
    fn zero_selects_default_three() {
        assert_eq!(select_levels(0), select_levels(3));
    }

    #[test]
    fn out_of_range_counts_clamp() {
        assert_eq!(select_levels(-4), select_levels(1));
        assert_eq!(select_levels(99), WOUND_ORDER.to_vec());
    }

    #[test]
    fn every_count_ends_in_out() {
        for count in 0..=8 {
            let levels = select_levels(count);
            assert!(!levels.is_empty());
            assert_eq!(levels.last(), Some(&Out), "count {count}");
        }
    }

    #[test]
    fn lengths_follow_count() {
        assert_eq!(select_levels(1).len(), 2);
        assert_eq!(select_levels(2).len(), 3);
        for count in 3..=8 {
            assert_eq!(select_levels(count).len(), count as usize);
        }
    }

    #[test]
    fn prefix_keeps_canonical_order() {
        let levels = select_levels(7);
        assert_eq!(levels, vec![Healthy, Nicked, Grazed, Hurt, Injured, Crippled, Out]);
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }
}
