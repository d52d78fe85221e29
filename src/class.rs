//! Character classes and their reference tables.

use crate::ability::AbilityName;
use crate::error::EnumKind;
use crate::validate::ClosedEnum;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// Size of the die a class uses for hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display)]
pub enum HitDie {
    #[strum(serialize = "d6")]
    D6,
    #[strum(serialize = "d8")]
    D8,
    #[strum(serialize = "d10")]
    D10,
    #[strum(serialize = "d12")]
    D12,
}

impl HitDie {
    /// Number of faces on the die.
    pub fn sides(self) -> i32 {
        match self {
            HitDie::D6 => 6,
            HitDie::D8 => 8,
            HitDie::D10 => 10,
            HitDie::D12 => 12,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumIter, EnumString,
)]
pub enum ClassName {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
    Commoner,
}

impl ClosedEnum for ClassName {
    const KIND: EnumKind = EnumKind::Class;
}

impl ClassName {
    pub fn hit_die(self) -> HitDie {
        match self {
            ClassName::Barbarian => HitDie::D12,
            ClassName::Fighter | ClassName::Paladin | ClassName::Ranger => HitDie::D10,
            ClassName::Bard
            | ClassName::Cleric
            | ClassName::Druid
            | ClassName::Monk
            | ClassName::Rogue
            | ClassName::Warlock => HitDie::D8,
            ClassName::Sorcerer | ClassName::Wizard | ClassName::Commoner => HitDie::D6,
        }
    }

    /// Abilities this class is proficient in for saving throws.
    ///
    /// Every adventuring class has exactly two. `Commoner` has none.
    pub fn saving_throw_proficiencies(self) -> &'static [AbilityName] {
        use AbilityName::*;
        match self {
            ClassName::Barbarian | ClassName::Fighter => &[Strength, Constitution],
            ClassName::Bard => &[Dexterity, Charisma],
            ClassName::Cleric | ClassName::Paladin | ClassName::Warlock => &[Wisdom, Charisma],
            ClassName::Druid | ClassName::Wizard => &[Intelligence, Wisdom],
            ClassName::Monk | ClassName::Ranger => &[Strength, Dexterity],
            ClassName::Rogue => &[Dexterity, Intelligence],
            ClassName::Sorcerer => &[Constitution, Charisma],
            ClassName::Commoner => &[],
        }
    }
}
