//! Serialized character document module.
//!
//! [`CharacterDocument`] is the external, string-typed shape of a character
//! as it is stored in files and request bodies:
//!
//! ```json
//! {
//!   "stats": { "strength": 15, "dexterity": 14, "constitution": 13,
//!              "intelligence": 12, "wisdom": 10, "charisma": 8 },
//!   "class": "Fighter",
//!   "race": { "type": "Dwarf", "subrace": "Hill Dwarf", "move-speed": 0,
//!             "stat-increase": [] },
//!   "name": "Bruenor",
//!   "level": 3,
//!   "background": { "name": "Soldier", "proficiencies": [] },
//!   "bio": "",
//!   "current_hit_points": 0
//! }
//! ```
//!
//! Converting a document into a [`Character`] validates every enum string;
//! the first unrecognized one fails the whole conversion.

use crate::ability::{AbilityBlock, AbilityName};
use crate::background::Background;
use crate::character::Character;
use crate::class::ClassName;
use crate::error::{CharacterError, Result};
use crate::race::{AbilityIncrease, Race, RaceName, SubraceName};
use crate::validate::ClosedEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDocument {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    /// Score recorded for the `YourChoice` placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_choice: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatIncreaseDocument {
    pub stat: String,
    pub amount: i32,
}

impl StatIncreaseDocument {
    pub fn to_increase(&self) -> Result<AbilityIncrease> {
        Ok(AbilityIncrease::new(AbilityName::parse(&self.stat)?, self.amount))
    }
}

impl From<&AbilityIncrease> for StatIncreaseDocument {
    fn from(increase: &AbilityIncrease) -> Self {
        StatIncreaseDocument {
            stat: increase.ability.to_string(),
            amount: increase.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceDocument {
    #[serde(rename = "type")]
    pub race_type: String,
    #[serde(default = "default_subrace")]
    pub subrace: String,
    #[serde(rename = "move-speed", default)]
    pub move_speed: i32,
    #[serde(rename = "stat-increase", default)]
    pub stat_increase: Vec<StatIncreaseDocument>,
}

fn default_subrace() -> String {
    SubraceName::None.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundDocument {
    pub name: String,
    #[serde(default)]
    pub proficiencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDocument {
    pub stats: StatsDocument,
    pub class: String,
    pub race: RaceDocument,
    pub name: String,
    pub level: i32,
    pub background: BackgroundDocument,
    #[serde(default)]
    pub bio: String,
    /// 0 means "unset, start at full health".
    #[serde(default)]
    pub current_hit_points: i32,
}

/// Integer fields by JSON pointer, with the dotted name used in errors.
const NUMERIC_FIELDS: [(&str, &str); 10] = [
    ("/stats/strength", "stats.strength"),
    ("/stats/dexterity", "stats.dexterity"),
    ("/stats/constitution", "stats.constitution"),
    ("/stats/intelligence", "stats.intelligence"),
    ("/stats/wisdom", "stats.wisdom"),
    ("/stats/charisma", "stats.charisma"),
    ("/level", "level"),
    ("/race/move-speed", "race.move-speed"),
    ("/current_hit_points", "current_hit_points"),
    ("/stats/your_choice", "stats.your_choice"),
];

fn as_i32(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|n| i32::try_from(n).ok())
}

fn bad_number(field: impl Into<String>, value: &Value) -> CharacterError {
    let raw = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    let field = field.into();
    tracing::warn!(field = %field, value = %raw, "rejected non-numeric document field");
    CharacterError::field_format(field, raw)
}

/// Name the first integer field holding something other than an `i32`.
///
/// Absent fields are left to serde, which either defaults them or reports
/// a malformed document.
fn check_numeric_fields(document: &Value) -> Result<()> {
    for (pointer, field) in NUMERIC_FIELDS {
        match document.pointer(pointer) {
            None => {}
            Some(Value::Null) if field == "stats.your_choice" => {}
            Some(value) if as_i32(value).is_some() => {}
            Some(value) => return Err(bad_number(field, value)),
        }
    }

    if let Some(Value::Array(increases)) = document.pointer("/race/stat-increase") {
        for (index, increase) in increases.iter().enumerate() {
            if let Some(amount) = increase.get("amount") {
                if as_i32(amount).is_none() {
                    return Err(bad_number(format!("race.stat-increase[{index}].amount"), amount));
                }
            }
        }
    }
    Ok(())
}

impl CharacterDocument {
    /// Decode a JSON document.
    ///
    /// # Errors
    ///
    /// * [`CharacterError::FieldFormat`] naming an integer field that holds
    ///   a string, a fraction or an out-of-range number
    /// * [`CharacterError::Document`] for anything else serde rejects
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        check_numeric_fields(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the document into a character.
    pub fn to_character(&self) -> Result<Character> {
        let mut abilities = AbilityBlock::new(
            self.stats.strength,
            self.stats.dexterity,
            self.stats.constitution,
            self.stats.intelligence,
            self.stats.wisdom,
            self.stats.charisma,
        );
        if let Some(score) = self.stats.your_choice {
            abilities.set_raw(AbilityName::YourChoice, score);
        }

        let class = ClassName::parse(&self.class)?;
        let race = self.race.to_race()?;
        let background = Background::from_raw(&self.background.name, &self.background.proficiencies)?;

        Character::builder()
            .abilities(abilities)
            .class(class)
            .race(race)
            .name(self.name.clone())
            .level(self.level)
            .background(background)
            .bio(self.bio.clone())
            .current_hit_points(self.current_hit_points)
            .build()
    }
}

impl RaceDocument {
    fn to_race(&self) -> Result<Race> {
        let race_type = RaceName::parse(&self.race_type)?;
        let subrace = SubraceName::parse(&self.subrace)?;
        let increases = self
            .stat_increase
            .iter()
            .map(StatIncreaseDocument::to_increase)
            .collect::<Result<Vec<_>>>()?;

        Ok(Race::new(race_type, subrace)
            .with_move_speed(self.move_speed)
            .with_ability_increases(increases))
    }
}

impl TryFrom<&CharacterDocument> for Character {
    type Error = CharacterError;

    fn try_from(document: &CharacterDocument) -> Result<Self> {
        document.to_character()
    }
}

impl TryFrom<CharacterDocument> for Character {
    type Error = CharacterError;

    fn try_from(document: CharacterDocument) -> Result<Self> {
        document.to_character()
    }
}

impl From<&Character> for CharacterDocument {
    fn from(character: &Character) -> Self {
        let abilities = character.abilities();
        let race = character.race();
        let background = character.background();

        CharacterDocument {
            stats: StatsDocument {
                strength: abilities.raw(AbilityName::Strength),
                dexterity: abilities.raw(AbilityName::Dexterity),
                constitution: abilities.raw(AbilityName::Constitution),
                intelligence: abilities.raw(AbilityName::Intelligence),
                wisdom: abilities.raw(AbilityName::Wisdom),
                charisma: abilities.raw(AbilityName::Charisma),
                your_choice: abilities.your_choice(),
            },
            class: character.class().to_string(),
            race: RaceDocument {
                race_type: race.race_type().to_string(),
                subrace: race.subrace().to_string(),
                move_speed: race.move_speed_override(),
                stat_increase: race
                    .ability_increase_override()
                    .iter()
                    .map(StatIncreaseDocument::from)
                    .collect(),
            },
            name: character.name().to_string(),
            level: character.level(),
            background: BackgroundDocument {
                name: background.name(),
                proficiencies: background
                    .proficiencies()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            },
            bio: character.bio().to_string(),
            current_hit_points: character.current_hit_points(),
        }
    }
}

impl Character {
    /// Parse and validate a JSON character document.
    pub fn from_json(json: &str) -> Result<Self> {
        let character = CharacterDocument::from_json(json).and_then(|document| document.to_character());
        if let Err(err) = &character {
            tracing::warn!(error = %err, "rejected character document");
        }
        character
    }

    /// Serialize back into the document form.
    pub fn to_json(&self) -> Result<String> {
        CharacterDocument::from(self).to_json()
    }
}
