//! Ability scores module.
//!
//! Provides [`AbilityName`], the closed set of abilities, and
//! [`AbilityBlock`], which holds a character's six raw scores and turns
//! them into modifiers.

use crate::error::EnumKind;
use crate::race::AbilityIncrease;
use crate::validate::ClosedEnum;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// One of the six abilities, or the `YourChoice` placeholder.
///
/// `YourChoice` stands for an ability the sheet owner picks outside the
/// ruleset (a Half-Elf's floating +1, for instance).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumIter, EnumString,
)]
pub enum AbilityName {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
    YourChoice,
}

impl ClosedEnum for AbilityName {
    const KIND: EnumKind = EnumKind::Stat;
}

impl AbilityName {
    /// The six concrete abilities, without the placeholder.
    pub const CORE: [AbilityName; 6] = [
        AbilityName::Strength,
        AbilityName::Dexterity,
        AbilityName::Constitution,
        AbilityName::Intelligence,
        AbilityName::Wisdom,
        AbilityName::Charisma,
    ];
}

/// Modifier for a raw ability score: `floor((score - 10) / 2)`.
///
/// # Examples
///
/// ```rust
/// use charsheet::ability_modifier;
///
/// assert_eq!(ability_modifier(10), 0);
/// assert_eq!(ability_modifier(19), 4);
/// assert_eq!(ability_modifier(8), -1);
/// assert_eq!(ability_modifier(9), -1);
/// ```
pub fn ability_modifier(score: i32) -> i32 {
    score.saturating_sub(10).div_euclid(2)
}

/// Six raw ability scores plus the optional `YourChoice` slot.
///
/// Scores are stored as given; the usual 1–30 range is not enforced.
///
/// # Examples
///
/// ```rust
/// use charsheet::{AbilityBlock, AbilityName};
///
/// let mut block = AbilityBlock::new(15, 14, 13, 12, 10, 8);
/// assert_eq!(block.modifier(AbilityName::Strength), 2);
/// assert_eq!(block.modifier(AbilityName::Charisma), -1);
///
/// // The placeholder reads as 0 until a score is recorded for it.
/// assert_eq!(block.modifier(AbilityName::YourChoice), -5);
/// block.set_raw(AbilityName::YourChoice, 16);
/// assert_eq!(block.modifier(AbilityName::YourChoice), 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AbilityBlock {
    strength: i32,
    dexterity: i32,
    constitution: i32,
    intelligence: i32,
    wisdom: i32,
    charisma: i32,
    your_choice: Option<i32>,
}

impl AbilityBlock {
    pub fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
            your_choice: None,
        }
    }

    /// Raw score for an ability. An unset `YourChoice` reads as 0.
    pub fn raw(&self, ability: AbilityName) -> i32 {
        match ability {
            AbilityName::Strength => self.strength,
            AbilityName::Dexterity => self.dexterity,
            AbilityName::Constitution => self.constitution,
            AbilityName::Intelligence => self.intelligence,
            AbilityName::Wisdom => self.wisdom,
            AbilityName::Charisma => self.charisma,
            AbilityName::YourChoice => self.your_choice.unwrap_or(0),
        }
    }

    /// Score recorded for the `YourChoice` placeholder, if any.
    pub fn your_choice(&self) -> Option<i32> {
        self.your_choice
    }

    pub fn modifier(&self, ability: AbilityName) -> i32 {
        ability_modifier(self.raw(ability))
    }

    pub fn set_raw(&mut self, ability: AbilityName, value: i32) {
        let slot = match ability {
            AbilityName::Strength => &mut self.strength,
            AbilityName::Dexterity => &mut self.dexterity,
            AbilityName::Constitution => &mut self.constitution,
            AbilityName::Intelligence => &mut self.intelligence,
            AbilityName::Wisdom => &mut self.wisdom,
            AbilityName::Charisma => &mut self.charisma,
            AbilityName::YourChoice => {
                self.your_choice = Some(value);
                return;
            }
        };
        *slot = value;
    }

    /// Builder-style variant of [`set_raw`](Self::set_raw).
    pub fn with(mut self, ability: AbilityName, value: i32) -> Self {
        self.set_raw(ability, value);
        self
    }

    /// A copy of this block with racial increases added on top.
    ///
    /// Increases to `YourChoice` land in the placeholder slot, starting
    /// from 0 when it was unset.
    pub fn apply_increases(&self, increases: &[AbilityIncrease]) -> AbilityBlock {
        increases.iter().fold(*self, |mut block, increase| {
            let raised = block.raw(increase.ability).saturating_add(increase.amount);
            block.set_raw(increase.ability, raised);
            block
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_reference_points() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(19), 4);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(0), -5);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn test_modifier_floors_negative_halves() {
        assert_eq!(ability_modifier(7), -2);
        assert_eq!(ability_modifier(5), -3);
        assert_eq!(ability_modifier(3), -4);
    }

    #[test]
    fn test_modifier_extremes_do_not_overflow() {
        assert_eq!(ability_modifier(i32::MIN), (i32::MIN).div_euclid(2));
        assert_eq!(ability_modifier(i32::MAX), (i32::MAX - 10).div_euclid(2));
    }

    #[test]
    fn test_block_raw_and_set() {
        let mut block = AbilityBlock::new(8, 10, 12, 14, 16, 18);
        assert_eq!(block.raw(AbilityName::Wisdom), 16);

        block.set_raw(AbilityName::Wisdom, 17);
        assert_eq!(block.raw(AbilityName::Wisdom), 17);
        assert_eq!(block.modifier(AbilityName::Wisdom), 3);
    }

    #[test]
    fn test_your_choice_defaults_to_zero() {
        let block = AbilityBlock::new(10, 10, 10, 10, 10, 10);
        assert_eq!(block.your_choice(), None);
        assert_eq!(block.raw(AbilityName::YourChoice), 0);
        assert_eq!(block.modifier(AbilityName::YourChoice), -5);
    }

    #[test]
    fn test_your_choice_slot_is_independent() {
        let block = AbilityBlock::default().with(AbilityName::YourChoice, 14);
        assert_eq!(block.raw(AbilityName::YourChoice), 14);
        for ability in AbilityName::CORE {
            assert_eq!(block.raw(ability), 0);
        }
    }

    #[test]
    fn test_apply_increases() {
        let block = AbilityBlock::new(15, 14, 13, 12, 10, 8);
        let raised = block.apply_increases(&[
            AbilityIncrease::new(AbilityName::Strength, 2),
            AbilityIncrease::new(AbilityName::Charisma, 1),
            AbilityIncrease::new(AbilityName::Strength, 1),
        ]);

        assert_eq!(raised.raw(AbilityName::Strength), 18);
        assert_eq!(raised.raw(AbilityName::Charisma), 9);
        assert_eq!(raised.raw(AbilityName::Dexterity), 14);
        // original is untouched
        assert_eq!(block.raw(AbilityName::Strength), 15);
    }

    #[test]
    fn test_apply_increases_to_placeholder() {
        let block = AbilityBlock::new(10, 10, 10, 10, 10, 10);
        let raised = block.apply_increases(&[AbilityIncrease::new(AbilityName::YourChoice, 1)]);
        assert_eq!(raised.your_choice(), Some(1));
    }
}
