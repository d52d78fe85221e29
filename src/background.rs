//! Backgrounds and the skill proficiencies they grant.
//!
//! A background is either one of the standard backgrounds, whose two
//! proficiencies come from a fixed table, or a custom background that
//! carries its own explicit proficiency list.

use crate::error::{CharacterError, EnumKind, Result};
use crate::skill::SkillName;
use crate::validate::ClosedEnum;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumIter, EnumString,
)]
pub enum BackgroundName {
    Acolyte,
    Charlatan,
    Criminal,
    Entertainer,
    #[strum(serialize = "Folk Hero")]
    #[serde(rename = "Folk Hero")]
    FolkHero,
    #[strum(serialize = "Guild Artisan")]
    #[serde(rename = "Guild Artisan")]
    GuildArtisan,
    Hermit,
    Noble,
    Outlander,
    Sage,
    Sailor,
    Soldier,
    Urchin,
}

impl ClosedEnum for BackgroundName {
    const KIND: EnumKind = EnumKind::Background;
}

impl BackgroundName {
    pub fn proficiencies(self) -> [SkillName; 2] {
        use SkillName::*;
        match self {
            BackgroundName::Acolyte => [Insight, Religion],
            BackgroundName::Charlatan => [Deception, SleightOfHand],
            BackgroundName::Criminal => [Deception, Stealth],
            BackgroundName::Entertainer => [Acrobatics, Performance],
            BackgroundName::FolkHero => [AnimalHandling, Survival],
            BackgroundName::GuildArtisan => [Insight, Persuasion],
            BackgroundName::Hermit => [Medicine, Religion],
            BackgroundName::Noble => [History, Persuasion],
            BackgroundName::Outlander => [Athletics, Survival],
            BackgroundName::Sage => [Arcana, History],
            BackgroundName::Sailor => [Athletics, Perception],
            BackgroundName::Soldier => [Athletics, Intimidation],
            BackgroundName::Urchin => [SleightOfHand, Stealth],
        }
    }
}

/// A character's background.
///
/// # Examples
///
/// ```rust
/// use charsheet::{Background, BackgroundName, SkillName};
///
/// let sage = Background::Standard(BackgroundName::Sage);
/// assert!(sage.is_proficient(SkillName::Arcana));
///
/// let hunter = Background::custom("Bounty Hunter", vec![SkillName::Insight, SkillName::Stealth]).unwrap();
/// assert_eq!(hunter.name(), "Bounty Hunter");
/// assert!(hunter.is_proficient(SkillName::Stealth));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Background {
    Standard(BackgroundName),
    Custom {
        name: String,
        proficiencies: Vec<SkillName>,
    },
}

impl Background {
    /// Build a custom background.
    ///
    /// # Errors
    ///
    /// Whatever [`Background::validate`] rejects.
    pub fn custom(name: impl Into<String>, proficiencies: Vec<SkillName>) -> Result<Self> {
        let background = Background::Custom {
            name: name.into(),
            proficiencies,
        };
        background.validate()?;
        Ok(background)
    }

    /// Check that a custom background reads back as itself from a document
    /// or record.
    ///
    /// # Errors
    ///
    /// * [`CharacterError::MissingField`] for a blank name
    /// * [`CharacterError::FieldFormat`] for a name that is a standard
    ///   background
    /// * [`CharacterError::UndefinedEnum`] for an empty proficiency list
    pub fn validate(&self) -> Result<()> {
        let Background::Custom {
            name,
            proficiencies,
        } = self
        else {
            return Ok(());
        };

        if name.trim().is_empty() {
            return Err(CharacterError::MissingField("background".into()));
        }
        if name.parse::<BackgroundName>().is_ok() {
            tracing::warn!(value = %name, "rejected custom background with a standard name");
            return Err(CharacterError::field_format("background", name.as_str()));
        }
        if proficiencies.is_empty() {
            tracing::warn!(value = %name, "rejected custom background with no proficiencies");
            return Err(CharacterError::undefined(EnumKind::Background, name.as_str()));
        }
        Ok(())
    }

    /// Resolve a raw background name against an explicit proficiency list.
    ///
    /// Standard names ignore `proficiencies` and use the table. Any other
    /// name is accepted as a custom background only when it brings a
    /// non-empty list of its own.
    pub fn resolve(name: &str, proficiencies: Vec<SkillName>) -> Result<Self> {
        match name.parse::<BackgroundName>() {
            Ok(standard) => Ok(Background::Standard(standard)),
            Err(_) if !proficiencies.is_empty() => Background::custom(name, proficiencies),
            Err(_) => {
                tracing::warn!(value = name, "rejected unknown background with no proficiencies");
                Err(CharacterError::undefined(EnumKind::Background, name))
            }
        }
    }

    /// Parse a raw name and list of raw skill names, as found in documents
    /// and records.
    pub fn from_raw<S: AsRef<str>>(name: &str, proficiencies: &[S]) -> Result<Self> {
        let skills = proficiencies
            .iter()
            .map(|raw| SkillName::parse(raw.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Background::resolve(name, skills)
    }

    pub fn name(&self) -> String {
        match self {
            Background::Standard(standard) => standard.to_string(),
            Background::Custom { name, .. } => name.clone(),
        }
    }

    pub fn proficiencies(&self) -> Vec<SkillName> {
        match self {
            Background::Standard(standard) => standard.proficiencies().to_vec(),
            Background::Custom { proficiencies, .. } => proficiencies.clone(),
        }
    }

    pub fn is_proficient(&self, skill: SkillName) -> bool {
        match self {
            Background::Standard(standard) => standard.proficiencies().contains(&skill),
            Background::Custom { proficiencies, .. } => proficiencies.contains(&skill),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Standard(BackgroundName::Acolyte)
    }
}

impl From<BackgroundName> for Background {
    fn from(name: BackgroundName) -> Self {
        Background::Standard(name)
    }
}

impl TryFrom<&str> for Background {
    type Error = CharacterError;

    fn try_from(name: &str) -> Result<Self> {
        Background::resolve(name, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_standard_background_has_two_distinct_skills() {
        for background in BackgroundName::options() {
            let [a, b] = background.proficiencies();
            assert_ne!(a, b, "{background}");
        }
    }

    #[test]
    fn test_standard_ignores_explicit_list() {
        let background =
            Background::resolve("Folk Hero", vec![SkillName::Arcana]).unwrap();
        assert_eq!(background, Background::Standard(BackgroundName::FolkHero));
        assert_eq!(
            background.proficiencies(),
            vec![SkillName::AnimalHandling, SkillName::Survival]
        );
        assert!(!background.is_proficient(SkillName::Arcana));
    }

    #[test]
    fn test_unknown_name_with_list_is_custom() {
        let background = Background::from_raw("Gladiator", &["Acrobatics", "Performance"]).unwrap();
        assert_eq!(background.name(), "Gladiator");
        assert!(background.is_proficient(SkillName::Performance));
    }

    #[test]
    fn test_unknown_name_without_list_fails() {
        let err = Background::try_from("Gladiator").unwrap_err();
        assert_eq!(
            err,
            CharacterError::UndefinedEnum {
                kind: EnumKind::Background,
                value: "Gladiator".into()
            }
        );
    }

    #[test]
    fn test_custom_rejects_standard_name() {
        let err = Background::custom("Sage", vec![SkillName::Stealth]).unwrap_err();
        assert_eq!(
            err,
            CharacterError::FieldFormat {
                field: "background".into(),
                value: "Sage".into()
            }
        );
    }

    #[test]
    fn test_custom_rejects_empty_list() {
        let err = Background::custom("Drifter", Vec::new()).unwrap_err();
        assert_eq!(
            err,
            CharacterError::UndefinedEnum {
                kind: EnumKind::Background,
                value: "Drifter".into()
            }
        );
    }

    #[test]
    fn test_custom_rejects_blank_name() {
        let err = Background::resolve("  ", vec![SkillName::Arcana]).unwrap_err();
        assert_eq!(err, CharacterError::MissingField("background".into()));
    }

    #[test]
    fn test_hand_built_variant_is_checked() {
        let sneaky = Background::Custom {
            name: "Urchin".into(),
            proficiencies: vec![SkillName::Arcana],
        };
        assert!(sneaky.validate().is_err());
        assert!(Background::Standard(BackgroundName::Urchin).validate().is_ok());
    }

    #[test]
    fn test_unknown_skill_in_list_fails() {
        let err = Background::from_raw("Gladiator", &["Acrobatics", "Juggling"]).unwrap_err();
        assert_eq!(
            err,
            CharacterError::UndefinedEnum {
                kind: EnumKind::Skill,
                value: "Juggling".into()
            }
        );
    }
}
