//! Races, subraces and the race resolver.
//!
//! A [`Race`] pairs a [`RaceName`] with a [`SubraceName`] and two optional
//! explicit overrides. Its effective move speed and ability increases are
//! pure functions of those four fields:
//!
//! ```text
//! move speed:        explicit (non-zero) > subrace table > race table
//! ability increases: explicit (non-empty) > subrace table (non-empty) > race table
//! ```
//!
//! A subrace list *replaces* the race list rather than adding to it.

use crate::ability::AbilityName;
use crate::error::EnumKind;
use crate::validate::ClosedEnum;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// A single racial bonus to one ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AbilityIncrease {
    pub ability: AbilityName,
    pub amount: i32,
}

impl AbilityIncrease {
    pub const fn new(ability: AbilityName, amount: i32) -> Self {
        Self { ability, amount }
    }
}

// Struct literal so table slices are promoted to 'static.
macro_rules! inc {
    ($ability:ident, $amount:expr) => {
        AbilityIncrease {
            ability: $ability,
            amount: $amount,
        }
    };
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumIter, EnumString,
)]
pub enum RaceName {
    Dwarf,
    Elf,
    Halfling,
    Human,
    Dragonborn,
    Gnome,
    #[strum(serialize = "Half-Elf")]
    #[serde(rename = "Half-Elf")]
    HalfElf,
    #[strum(serialize = "Half-Orc")]
    #[serde(rename = "Half-Orc")]
    HalfOrc,
    Tiefling,
}

impl ClosedEnum for RaceName {
    const KIND: EnumKind = EnumKind::Race;
}

impl RaceName {
    pub fn base_move_speed(self) -> i32 {
        match self {
            RaceName::Elf
            | RaceName::Human
            | RaceName::Dragonborn
            | RaceName::HalfElf
            | RaceName::HalfOrc
            | RaceName::Tiefling => 30,
            RaceName::Dwarf | RaceName::Halfling | RaceName::Gnome => 25,
        }
    }

    pub fn ability_increases(self) -> &'static [AbilityIncrease] {
        use AbilityName::*;
        match self {
            RaceName::Dwarf => &[inc!(Constitution, 2)],
            RaceName::Elf | RaceName::Halfling => &[inc!(Dexterity, 2)],
            RaceName::Human => &[
                inc!(Strength, 1),
                inc!(Charisma, 1),
                inc!(Constitution, 1),
                inc!(Dexterity, 1),
                inc!(Intelligence, 1),
                inc!(Wisdom, 1),
            ],
            RaceName::Dragonborn => &[inc!(Strength, 2), inc!(Charisma, 1)],
            RaceName::Gnome => &[inc!(Intelligence, 2)],
            RaceName::HalfElf => &[inc!(Charisma, 2)],
            RaceName::HalfOrc => &[inc!(Strength, 2), inc!(Constitution, 1)],
            RaceName::Tiefling => &[inc!(Intelligence, 1), inc!(Charisma, 2)],
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum SubraceName {
    #[default]
    None,
    #[strum(serialize = "Hill Dwarf")]
    #[serde(rename = "Hill Dwarf")]
    HillDwarf,
    #[strum(serialize = "Mountain Dwarf")]
    #[serde(rename = "Mountain Dwarf")]
    MountainDwarf,
    #[strum(serialize = "High Elf")]
    #[serde(rename = "High Elf")]
    HighElf,
    #[strum(serialize = "Wood Elf")]
    #[serde(rename = "Wood Elf")]
    WoodElf,
    Drow,
    Lightfoot,
    Stout,
    #[strum(serialize = "Forest Gnome")]
    #[serde(rename = "Forest Gnome")]
    ForestGnome,
    #[strum(serialize = "Rock Gnome")]
    #[serde(rename = "Rock Gnome")]
    RockGnome,
}

impl ClosedEnum for SubraceName {
    const KIND: EnumKind = EnumKind::Subrace;
}

impl SubraceName {
    /// Move speed this subrace imposes, if it differs from its race.
    pub fn move_speed(self) -> Option<i32> {
        match self {
            SubraceName::WoodElf => Some(35),
            SubraceName::None
            | SubraceName::HillDwarf
            | SubraceName::MountainDwarf
            | SubraceName::HighElf
            | SubraceName::Drow
            | SubraceName::Lightfoot
            | SubraceName::Stout
            | SubraceName::ForestGnome
            | SubraceName::RockGnome => None,
        }
    }

    /// Increases that replace the race's list. Empty means "keep the race's".
    pub fn ability_increases(self) -> &'static [AbilityIncrease] {
        use AbilityName::*;
        match self {
            SubraceName::None => &[],
            SubraceName::HillDwarf | SubraceName::WoodElf => &[inc!(Wisdom, 1)],
            SubraceName::MountainDwarf => &[inc!(Strength, 2)],
            SubraceName::HighElf => &[inc!(Intelligence, 1)],
            SubraceName::Drow | SubraceName::Lightfoot => &[inc!(Charisma, 1)],
            SubraceName::Stout | SubraceName::RockGnome => &[inc!(Constitution, 1)],
            SubraceName::ForestGnome => &[inc!(Dexterity, 1)],
        }
    }
}

/// Where an effective move speed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveSpeedSource {
    Override,
    Subrace(SubraceName),
    Race(RaceName),
}

/// A race/subrace pair with optional explicit overrides.
///
/// # Examples
///
/// ```rust
/// use charsheet::{AbilityIncrease, AbilityName, Race, RaceName, SubraceName};
///
/// let wood_elf = Race::new(RaceName::Elf, SubraceName::WoodElf);
/// assert_eq!(wood_elf.move_speed(), 35);
/// assert_eq!(
///     wood_elf.ability_increases(),
///     vec![AbilityIncrease::new(AbilityName::Wisdom, 1)]
/// );
///
/// let hill_dwarf = Race::new(RaceName::Dwarf, SubraceName::HillDwarf);
/// assert_eq!(hill_dwarf.move_speed(), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Race {
    race_type: RaceName,
    subrace: SubraceName,
    move_speed_override: i32,
    ability_increase_override: Vec<AbilityIncrease>,
}

impl Race {
    pub fn new(race_type: RaceName, subrace: SubraceName) -> Self {
        Self {
            race_type,
            subrace,
            move_speed_override: 0,
            ability_increase_override: Vec::new(),
        }
    }

    /// Set an explicit move speed. Zero means "no override".
    pub fn with_move_speed(mut self, speed: i32) -> Self {
        self.move_speed_override = speed;
        self
    }

    /// Set an explicit ability-increase list. Empty means "no override".
    pub fn with_ability_increases(mut self, increases: Vec<AbilityIncrease>) -> Self {
        self.ability_increase_override = increases;
        self
    }

    pub fn race_type(&self) -> RaceName {
        self.race_type
    }

    pub fn subrace(&self) -> SubraceName {
        self.subrace
    }

    /// The stored move-speed override, 0 when unset.
    pub fn move_speed_override(&self) -> i32 {
        self.move_speed_override
    }

    pub fn ability_increase_override(&self) -> &[AbilityIncrease] {
        &self.ability_increase_override
    }

    /// Effective move speed.
    ///
    /// A stored override of 0 is indistinguishable from no override.
    pub fn move_speed(&self) -> i32 {
        self.resolve_move_speed().0
    }

    /// Effective move speed together with the table or field it came from.
    pub fn resolve_move_speed(&self) -> (i32, MoveSpeedSource) {
        if self.move_speed_override != 0 {
            return (self.move_speed_override, MoveSpeedSource::Override);
        }
        let subrace_speed = match self.subrace {
            SubraceName::None => None,
            subrace => subrace.move_speed(),
        };
        match subrace_speed {
            Some(speed) => (speed, MoveSpeedSource::Subrace(self.subrace)),
            None => (
                self.race_type.base_move_speed(),
                MoveSpeedSource::Race(self.race_type),
            ),
        }
    }

    /// Effective ability increases.
    pub fn ability_increases(&self) -> Vec<AbilityIncrease> {
        if !self.ability_increase_override.is_empty() {
            return self.ability_increase_override.clone();
        }
        let subrace_list = self.subrace.ability_increases();
        if subrace_list.is_empty() {
            self.race_type.ability_increases().to_vec()
        } else {
            subrace_list.to_vec()
        }
    }
}
