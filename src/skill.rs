//! Skills and the ability that governs each of them.

use crate::ability::AbilityName;
use crate::error::EnumKind;
use crate::validate::ClosedEnum;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumIter, EnumString,
)]
pub enum SkillName {
    Acrobatics,
    #[strum(serialize = "Animal Handling")]
    #[serde(rename = "Animal Handling")]
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    #[strum(serialize = "Sleight of Hand")]
    #[serde(rename = "Sleight of Hand")]
    SleightOfHand,
    Stealth,
    Survival,
}

impl ClosedEnum for SkillName {
    const KIND: EnumKind = EnumKind::Skill;
}

impl SkillName {
    pub fn governing_ability(self) -> AbilityName {
        match self {
            SkillName::Athletics => AbilityName::Strength,
            SkillName::Acrobatics | SkillName::SleightOfHand | SkillName::Stealth => {
                AbilityName::Dexterity
            }
            SkillName::Arcana
            | SkillName::History
            | SkillName::Investigation
            | SkillName::Nature
            | SkillName::Religion => AbilityName::Intelligence,
            SkillName::AnimalHandling
            | SkillName::Insight
            | SkillName::Medicine
            | SkillName::Perception
            | SkillName::Survival => AbilityName::Wisdom,
            SkillName::Deception
            | SkillName::Intimidation
            | SkillName::Performance
            | SkillName::Persuasion => AbilityName::Charisma,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governing_abilities() {
        assert_eq!(SkillName::Athletics.governing_ability(), AbilityName::Strength);
        assert_eq!(SkillName::Stealth.governing_ability(), AbilityName::Dexterity);
        assert_eq!(SkillName::History.governing_ability(), AbilityName::Intelligence);
        assert_eq!(SkillName::Survival.governing_ability(), AbilityName::Wisdom);
        assert_eq!(SkillName::Persuasion.governing_ability(), AbilityName::Charisma);
    }

    #[test]
    fn test_no_skill_uses_constitution_or_placeholder() {
        for skill in SkillName::options() {
            let ability = skill.governing_ability();
            assert_ne!(ability, AbilityName::Constitution);
            assert_ne!(ability, AbilityName::YourChoice);
        }
    }

    #[test]
    fn test_skill_counts_per_ability() {
        let count = |ability| {
            SkillName::options()
                .into_iter()
                .filter(|s| s.governing_ability() == ability)
                .count()
        };
        assert_eq!(count(AbilityName::Strength), 1);
        assert_eq!(count(AbilityName::Dexterity), 3);
        assert_eq!(count(AbilityName::Intelligence), 5);
        assert_eq!(count(AbilityName::Wisdom), 5);
        assert_eq!(count(AbilityName::Charisma), 4);
    }
}
