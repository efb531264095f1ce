//! Tick arithmetic over per-step profiles.
//!
//! A profile lists ticks per step; steps past the end of the profile reuse
//! its last entry. All helpers assume a non-empty profile.

use super::ActionInfo;

/// Item id of the fletching knife, which speeds up cutting steps.
pub const FLETCHING_KNIFE: i32 = 31043;

/// Share of the requested count performed by reduced-count actions.
const REDUCED_COUNT_FACTOR: f64 = 0.8;

/// Tick cost of step `index` (zero based).
#[inline]
pub fn step_ticks(tick_times: &[i32], index: usize) -> i32 {
    tick_times[index.min(tick_times.len() - 1)]
}

/// Total ticks needed to perform `steps` consecutive steps.
pub fn total_ticks(tick_times: &[i32], steps: i32) -> i32 {
    (0..steps.max(0) as usize)
        .map(|i| step_ticks(tick_times, i))
        .sum()
}

/// Number of steps actually performed for a requested `count`.
///
/// Outfit smithing skips a fifth of the work, truncated towards zero.
pub fn effective_count(info: &ActionInfo, count: i32) -> i32 {
    if info.reduced_count {
        (f64::from(count) * REDUCED_COUNT_FACTOR) as i32
    } else {
        count
    }
}

/// Cutting-style fletching actions that the fletching knife speeds up.
///
/// Tip cutting shares the "Cutting" label but is not affected.
pub fn is_knife_boostable(info: &ActionInfo) -> bool {
    info.name.contains("FLETCH") && !info.name.contains("TIPS") && info.description == "Cutting"
}

/// Profile with every step after the first one tick faster (never below one).
///
/// Single-entry profiles are padded to two entries so the repeated tail
/// carries the speed-up.
pub fn knife_tick_times(original: &[i32]) -> Vec<i32> {
    let len = original.len().max(2);
    let mut adjusted = Vec::with_capacity(len);
    adjusted.push(original[0]);
    for i in 1..len {
        let base = original.get(i).copied().unwrap_or(original[0]);
        adjusted.push((base - 1).max(1));
    }
    adjusted
}

/// Whole steps finished after `elapsed` ticks.
///
/// Walks the profile once, then estimates any remainder past the profile's
/// end with its last entry. A step that is only partly done ends the walk
/// and contributes nothing.
pub fn processed_steps(tick_times: &[i32], elapsed: i32) -> i32 {
    let mut steps = 0;
    let mut rem = elapsed;
    for &ticks in tick_times {
        rem -= ticks;
        if rem >= 0 {
            steps += 1;
        } else {
            rem = 0;
            break;
        }
    }
    steps + rem / tick_times[tick_times.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionKind;

    #[test]
    fn test_total_ticks_repeats_last_entry() {
        assert_eq!(total_ticks(&[4, 3, 3, 3], 5), 16);
        assert_eq!(total_ticks(&[4, 3, 3, 3], 2), 7);
        assert_eq!(total_ticks(&[5], 3), 15);
        assert_eq!(total_ticks(&[5], 0), 0);
        assert_eq!(total_ticks(&[5], -2), 0);
    }

    #[test]
    fn test_effective_count_reduced_only_for_outfit() {
        let outfit = ActionKind::SmithingWithSmithOutfit.info();
        assert_eq!(effective_count(outfit, 10), 8);
        assert_eq!(effective_count(outfit, 7), 5);
        assert_eq!(effective_count(outfit, 1), 0);
        assert_eq!(effective_count(ActionKind::Smithing.info(), 10), 10);
    }

    #[test]
    fn test_knife_pads_single_entry_profile() {
        assert_eq!(knife_tick_times(&[10]), vec![10, 9]);
        assert_eq!(knife_tick_times(&[3]), vec![3, 2]);
    }

    #[test]
    fn test_knife_never_drops_below_one_tick() {
        assert_eq!(knife_tick_times(&[1]), vec![1, 1]);
        assert_eq!(knife_tick_times(&[4, 1, 2]), vec![4, 1, 1]);
    }

    #[test]
    fn test_knife_keeps_first_step() {
        assert_eq!(knife_tick_times(&[4, 3, 3, 3]), vec![4, 2, 2, 2]);
    }

    #[test]
    fn test_boostable_actions() {
        assert!(is_knife_boostable(ActionKind::FletchCutBow.info()));
        assert!(is_knife_boostable(ActionKind::FletchCutArrowShaft.info()));
        // "Cutting" label but tips are excluded
        assert!(!is_knife_boostable(ActionKind::FletchCutTips.info()));
        // not fletching
        assert!(!is_knife_boostable(ActionKind::CraftCutGem.info()));
        // fletching but not cutting
        assert!(!is_knife_boostable(ActionKind::FletchStringBow.info()));
    }

    #[test]
    fn test_processed_steps() {
        let times = [4, 3, 3, 3];
        assert_eq!(processed_steps(&times, 0), 0);
        assert_eq!(processed_steps(&times, 3), 0);
        assert_eq!(processed_steps(&times, 4), 1);
        assert_eq!(processed_steps(&times, 7), 2);
        assert_eq!(processed_steps(&times, 13), 4);
        // past the profile: remainder estimated with the last entry
        assert_eq!(processed_steps(&times, 16), 5);
        assert_eq!(processed_steps(&times, 18), 5);
        assert_eq!(processed_steps(&times, 19), 6);
    }

    #[test]
    fn test_processed_steps_single_entry() {
        assert_eq!(processed_steps(&[5], 4), 0);
        assert_eq!(processed_steps(&[5], 5), 1);
        assert_eq!(processed_steps(&[5], 14), 2);
        assert_eq!(processed_steps(&[5], 15), 3);
    }
}
