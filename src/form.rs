//! Form-field ingestion module.
//!
//! The new-sheet and edit-sheet forms submit flat string fields:
//! `Name, Bio, Background, Level, ClassSelect, RaceType, SubraceType,
//! RaceMoveSpeed, Strength, Dexterity, Constitution, Intelligence, Wisdom,
//! Charisma`. [`CharacterForm`] parses the numeric fields, and
//! [`CharacterForm::to_character`] validates the enum fields.

use crate::ability::AbilityBlock;
use crate::background::Background;
use crate::character::Character;
use crate::class::ClassName;
use crate::error::{CharacterError, Result};
use crate::race::{Race, RaceName, SubraceName};
use crate::validate::ClosedEnum;
use std::collections::HashMap;

/// Parsed form fields. Enum fields are still raw strings.
///
/// # Examples
///
/// ```rust
/// use charsheet::form::CharacterForm;
///
/// let form = CharacterForm::from_pairs([
///     ("Name", "Kethra"),
///     ("Bio", ""),
///     ("Background", "Outlander"),
///     ("Level", "3"),
///     ("ClassSelect", "Ranger"),
///     ("RaceType", "Elf"),
///     ("SubraceType", "Wood Elf"),
///     ("RaceMoveSpeed", "0"),
///     ("Strength", "12"),
///     ("Dexterity", "17"),
///     ("Constitution", "14"),
///     ("Intelligence", "10"),
///     ("Wisdom", "15"),
///     ("Charisma", "8"),
/// ])
/// .unwrap();
///
/// let character = form.to_character().unwrap();
/// assert_eq!(character.move_speed(), 35);
/// assert_eq!(character.max_hit_points(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterForm {
    pub name: String,
    pub bio: String,
    pub background: String,
    pub level: i32,
    pub class: String,
    pub race: String,
    pub subrace: String,
    pub move_speed: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl CharacterForm {
    /// Parse submitted `(field, value)` pairs.
    ///
    /// When a field is submitted more than once, the first value is used.
    ///
    /// # Errors
    ///
    /// * [`CharacterError::MissingField`] when `Name` is absent or blank
    /// * [`CharacterError::FieldFormat`] naming the first numeric field that
    ///   is not an integer
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: HashMap<String, String> = HashMap::new();
        for (key, value) in pairs {
            fields.entry(key.into()).or_insert_with(|| value.into());
        }
        let text = |key: &str| fields.get(key).cloned().unwrap_or_default();
        let number = |key: &str| -> Result<i32> {
            let raw = fields.get(key).map(String::as_str).unwrap_or_default();
            raw.parse::<i32>().map_err(|_| {
                tracing::warn!(field = key, value = raw, "rejected non-numeric form field");
                CharacterError::field_format(key, raw)
            })
        };

        let name = text("Name");
        if name.trim().is_empty() {
            tracing::warn!("rejected form without a name");
            return Err(CharacterError::MissingField("Name".into()));
        }

        Ok(CharacterForm {
            name,
            bio: text("Bio"),
            background: text("Background"),
            level: number("Level")?,
            class: text("ClassSelect"),
            race: text("RaceType"),
            subrace: text("SubraceType"),
            move_speed: number("RaceMoveSpeed")?,
            strength: number("Strength")?,
            dexterity: number("Dexterity")?,
            constitution: number("Constitution")?,
            intelligence: number("Intelligence")?,
            wisdom: number("Wisdom")?,
            charisma: number("Charisma")?,
        })
    }

    /// Validate the form into a character at full health.
    ///
    /// A blank subrace means no subrace. The form carries no proficiency
    /// list, so the background must be one of the standard ones.
    pub fn to_character(&self) -> Result<Character> {
        let class = ClassName::parse(&self.class)?;
        let race_type = RaceName::parse(&self.race)?;
        let subrace = if self.subrace.is_empty() {
            SubraceName::None
        } else {
            SubraceName::parse(&self.subrace)?
        };
        let background = Background::try_from(self.background.as_str())?;

        Character::builder()
            .abilities(AbilityBlock::new(
                self.strength,
                self.dexterity,
                self.constitution,
                self.intelligence,
                self.wisdom,
                self.charisma,
            ))
            .class(class)
            .race(Race::new(race_type, subrace).with_move_speed(self.move_speed))
            .name(self.name.clone())
            .level(self.level)
            .background(background)
            .bio(self.bio.clone())
            .build()
    }
}

impl TryFrom<&CharacterForm> for Character {
    type Error = CharacterError;

    fn try_from(form: &CharacterForm) -> Result<Self> {
        form.to_character()
    }
}
