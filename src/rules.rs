//! Rule formulas shared by the character getters and sheet resolution.
//!
//! Everything here is plain integer arithmetic over already looked-up
//! values. Arithmetic saturates instead of overflowing, since raw scores and
//! levels come from user input.

use crate::class::HitDie;

/// Lowest level a character can have.
pub const MIN_LEVEL: i32 = 1;

/// Armor class of an unarmored character before Dexterity.
pub const BASE_ARMOR_CLASS: i32 = 10;

/// Proficiency bonus at level 1.
pub const BASE_PROFICIENCY_BONUS: i32 = 2;

/// Levels between proficiency bonus increases.
pub const LEVELS_PER_PROFICIENCY_STEP: i32 = 4;

/// `floor((level - 1) / 4) + 2`.
///
/// # Examples
///
/// ```rust
/// use charsheet::rules::proficiency_bonus;
///
/// assert_eq!(proficiency_bonus(1), 2);
/// assert_eq!(proficiency_bonus(5), 3);
/// assert_eq!(proficiency_bonus(20), 6);
/// ```
pub fn proficiency_bonus(level: i32) -> i32 {
    level
        .saturating_sub(MIN_LEVEL)
        .div_euclid(LEVELS_PER_PROFICIENCY_STEP)
        .saturating_add(BASE_PROFICIENCY_BONUS)
}

/// Bonus for a saving throw or skill check.
pub fn check_bonus(modifier: i32, proficient: bool, proficiency_bonus: i32) -> i32 {
    if proficient {
        modifier.saturating_add(proficiency_bonus)
    } else {
        modifier
    }
}

/// `hit die × level + Constitution modifier`, with no rolling.
pub fn max_hit_points(hit_die: HitDie, level: i32, constitution_modifier: i32) -> i32 {
    hit_die
        .sides()
        .saturating_mul(level)
        .saturating_add(constitution_modifier)
}

pub fn armor_class(dexterity_modifier: i32) -> i32 {
    BASE_ARMOR_CLASS.saturating_add(dexterity_modifier)
}

pub fn initiative(dexterity_modifier: i32) -> i32 {
    dexterity_modifier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficiency_bonus_by_tier() {
        for (levels, expected) in [(1..=4, 2), (5..=8, 3), (9..=12, 4), (13..=16, 5), (17..=20, 6)] {
            for level in levels {
                assert_eq!(proficiency_bonus(level), expected, "level {level}");
            }
        }
    }

    #[test]
    fn test_check_bonus() {
        assert_eq!(check_bonus(3, true, 2), 5);
        assert_eq!(check_bonus(3, false, 2), 3);
        assert_eq!(check_bonus(-1, true, 4), 3);
    }

    #[test]
    fn test_max_hit_points() {
        assert_eq!(max_hit_points(HitDie::D12, 5, 2), 62);
        assert_eq!(max_hit_points(HitDie::D6, 1, -1), 5);
        assert_eq!(max_hit_points(HitDie::D12, i32::MAX, 2), i32::MAX);
    }

    #[test]
    fn test_armor_class_and_initiative() {
        assert_eq!(armor_class(3), 13);
        assert_eq!(armor_class(-1), 9);
        assert_eq!(initiative(-1), -1);
    }
}
