//! Persistence record module.
//!
//! [`CharacterRecord`] is the flat row a storage layer keeps for a
//! character: identifiers, raw strings for every enum, a nullable subrace
//! and the background's proficiency names as a separate list. How the row
//! is stored or queried is up to the caller. The `YourChoice` score and any
//! explicit racial stat increases ride along so a stored character reads
//! back unchanged.

use crate::ability::{AbilityBlock, AbilityName};
use crate::background::Background;
use crate::character::Character;
use crate::class::ClassName;
use crate::document::StatIncreaseDocument;
use crate::error::{CharacterError, Result};
use crate::race::{Race, RaceName, SubraceName};
use crate::validate::ClosedEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub bio: String,
    pub background: String,
    pub class: String,
    pub level: i32,
    pub race_type: String,
    pub subrace_type: Option<String>,
    pub race_move_speed: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    #[serde(default)]
    pub your_choice: Option<i32>,
    pub current_hit_points: i32,
    pub background_proficiencies: Vec<String>,
    #[serde(default)]
    pub race_stat_increases: Vec<StatIncreaseDocument>,
}

impl CharacterRecord {
    /// Flatten a character for storage. The record id is left at 0.
    pub fn from_character(character: &Character, owner_id: i64) -> Self {
        let abilities = character.abilities();
        let race = character.race();
        let subrace_type = match race.subrace() {
            SubraceName::None => None,
            subrace => Some(subrace.to_string()),
        };
        let background_proficiencies = match character.background() {
            Background::Standard(_) => Vec::new(),
            Background::Custom { proficiencies, .. } => {
                proficiencies.iter().map(ToString::to_string).collect()
            }
        };

        CharacterRecord {
            id: 0,
            owner_id,
            name: character.name().to_string(),
            bio: character.bio().to_string(),
            background: character.background().name(),
            class: character.class().to_string(),
            level: character.level(),
            race_type: race.race_type().to_string(),
            subrace_type,
            race_move_speed: race.move_speed_override(),
            strength: abilities.raw(AbilityName::Strength),
            dexterity: abilities.raw(AbilityName::Dexterity),
            constitution: abilities.raw(AbilityName::Constitution),
            intelligence: abilities.raw(AbilityName::Intelligence),
            wisdom: abilities.raw(AbilityName::Wisdom),
            charisma: abilities.raw(AbilityName::Charisma),
            your_choice: abilities.your_choice(),
            current_hit_points: character.current_hit_points(),
            background_proficiencies,
            race_stat_increases: race
                .ability_increase_override()
                .iter()
                .map(StatIncreaseDocument::from)
                .collect(),
        }
    }

    /// Storage-side checks on the raw strings, before any enum parsing.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("background", &self.background),
            ("class", &self.class),
            ("race", &self.race_type),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CharacterError::MissingField(field.into()));
            }
        }
        if matches!(&self.subrace_type, Some(subrace) if subrace.trim().is_empty()) {
            return Err(CharacterError::MissingField("subrace".into()));
        }
        Ok(())
    }

    pub fn to_character(&self) -> Result<Character> {
        self.validate()?;

        let class = ClassName::parse(&self.class)?;
        let race_type = RaceName::parse(&self.race_type)?;
        let subrace = match &self.subrace_type {
            Some(subrace) => SubraceName::parse(subrace)?,
            None => SubraceName::None,
        };
        let background = Background::from_raw(&self.background, &self.background_proficiencies)?;
        let increases = self
            .race_stat_increases
            .iter()
            .map(StatIncreaseDocument::to_increase)
            .collect::<Result<Vec<_>>>()?;

        let mut abilities = AbilityBlock::new(
            self.strength,
            self.dexterity,
            self.constitution,
            self.intelligence,
            self.wisdom,
            self.charisma,
        );
        if let Some(score) = self.your_choice {
            abilities.set_raw(AbilityName::YourChoice, score);
        }

        Character::builder()
            .abilities(abilities)
            .class(class)
            .race(
                Race::new(race_type, subrace)
                    .with_move_speed(self.race_move_speed)
                    .with_ability_increases(increases),
            )
            .name(self.name.clone())
            .level(self.level)
            .background(background)
            .bio(self.bio.clone())
            .current_hit_points(self.current_hit_points)
            .build()
    }
}

impl TryFrom<&CharacterRecord> for Character {
    type Error = CharacterError;

    fn try_from(record: &CharacterRecord) -> Result<Self> {
        record.to_character()
    }
}
