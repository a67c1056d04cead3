//! Points, streak multipliers and bonus lives

use super::question::Difficulty;
use crate::consts::*;

/// Multiplier for the current streak (saturates at the last table entry)
pub fn streak_multiplier(streak: u32) -> u32 {
    let idx = (streak as usize).min(STREAK_MULTIPLIERS.len() - 1);
    STREAK_MULTIPLIERS[idx]
}

/// Points for a correct answer given where the meteor was when answered
///
/// Answering in the top third adds 50% of base, the middle third 25%, the
/// bottom third nothing. The sum is scaled by the streak multiplier and
/// floored.
pub fn calculate_score(difficulty: Difficulty, position: f32, streak: u32) -> u64 {
    let base = difficulty.base_points() as f64;
    let speed_bonus = if position < TOP_THIRD_END {
        base * TOP_BONUS
    } else if position < MIDDLE_THIRD_END {
        base * MIDDLE_BONUS
    } else {
        0.0
    };
    ((base + speed_bonus) * streak_multiplier(streak) as f64).floor() as u64
}

/// True on every BONUS_LIFE_INTERVAL-th correct answer
pub fn should_earn_bonus_life(correct_count: u32) -> bool {
    correct_count > 0 && correct_count.is_multiple_of(BONUS_LIFE_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_middle_third_with_streak() {
        // medium base 20, +25% = 25, streak 2 -> x3
        assert_eq!(calculate_score(Difficulty::Medium, 50.0, 2), 75);
    }

    #[test]
    fn test_position_tiers() {
        assert_eq!(calculate_score(Difficulty::Easy, -10.0, 0), 15);
        assert_eq!(calculate_score(Difficulty::Easy, 32.9, 0), 15);
        assert_eq!(calculate_score(Difficulty::Easy, 33.0, 0), 12);
        assert_eq!(calculate_score(Difficulty::Easy, 66.0, 0), 10);
        assert_eq!(calculate_score(Difficulty::Hard, 80.0, 3), 150);
    }

    #[test]
    fn test_bonus_life_periodicity() {
        assert!(should_earn_bonus_life(10));
        assert!(should_earn_bonus_life(20));
        assert!(!should_earn_bonus_life(0));
        assert!(!should_earn_bonus_life(5));
        assert!(!should_earn_bonus_life(11));
    }

    #[test]
    fn test_streak_multiplier_table() {
        assert_eq!(streak_multiplier(0), 1);
        assert_eq!(streak_multiplier(1), 2);
        assert_eq!(streak_multiplier(2), 3);
        assert_eq!(streak_multiplier(3), 5);
        assert_eq!(streak_multiplier(4), 5);
    }

    fn any_difficulty() -> impl Strategy<Value = Difficulty> {
        prop_oneof![
            Just(Difficulty::Easy),
            Just(Difficulty::Medium),
            Just(Difficulty::Hard),
        ]
    }

    proptest! {
        #[test]
        fn harder_never_scores_less(pos in -10.0f32..100.0, streak in 0u32..50) {
            prop_assert!(
                calculate_score(Difficulty::Hard, pos, streak)
                    >= calculate_score(Difficulty::Easy, pos, streak)
            );
        }

        #[test]
        fn earlier_never_scores_less(d in any_difficulty(), early in -10.0f32..100.0, late in -10.0f32..100.0, streak in 0u32..50) {
            let (early, late) = if early <= late { (early, late) } else { (late, early) };
            prop_assert!(calculate_score(d, early, streak) >= calculate_score(d, late, streak));
        }

        #[test]
        fn multiplier_saturates(d in any_difficulty(), pos in -10.0f32..100.0, streak in 4u32..10_000) {
            prop_assert_eq!(calculate_score(d, pos, streak), calculate_score(d, pos, 4));
        }
    }
}
