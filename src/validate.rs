//! Enum validation module.
//!
//! Every closed enumeration in the ruleset implements [`ClosedEnum`], which
//! turns raw strings from documents, forms and records into typed values.
//! Unrecognized strings are rejected with [`CharacterError::UndefinedEnum`];
//! nothing is ever substituted with a default.

use crate::error::{CharacterError, EnumKind, Result};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// A closed set of named values with an exact external spelling.
///
/// # Examples
///
/// ```rust
/// use charsheet::{ClassName, ClosedEnum, CharacterError};
///
/// assert_eq!(ClassName::parse("Wizard").unwrap(), ClassName::Wizard);
/// assert!(matches!(
///     ClassName::parse("wizard"),
///     Err(CharacterError::UndefinedEnum { .. })
/// ));
/// ```
pub trait ClosedEnum: FromStr + IntoEnumIterator + Copy {
    /// Which enumeration this is, used in error reports.
    const KIND: EnumKind;

    /// Parse the exact external spelling of a member.
    ///
    /// Matching is case-sensitive and does not trim whitespace.
    fn parse(raw: &str) -> Result<Self> {
        raw.parse::<Self>().map_err(|_| {
            tracing::warn!(kind = %Self::KIND, value = raw, "rejected undefined enum value");
            CharacterError::undefined(Self::KIND, raw)
        })
    }

    /// Every member in declaration order.
    ///
    /// Form renderers use this to build their option lists.
    fn options() -> Vec<Self> {
        Self::iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AbilityName, BackgroundName, ClassName, RaceName, SkillName, SubraceName};

    #[test]
    fn test_parse_multi_word_spellings() {
        assert_eq!(RaceName::parse("Half-Elf").unwrap(), RaceName::HalfElf);
        assert_eq!(
            SubraceName::parse("Mountain Dwarf").unwrap(),
            SubraceName::MountainDwarf
        );
        assert_eq!(
            BackgroundName::parse("Guild Artisan").unwrap(),
            BackgroundName::GuildArtisan
        );
        assert_eq!(
            SkillName::parse("Sleight of Hand").unwrap(),
            SkillName::SleightOfHand
        );
        assert_eq!(
            AbilityName::parse("YourChoice").unwrap(),
            AbilityName::YourChoice
        );
    }

    #[test]
    fn test_parse_reports_kind_and_value() {
        let err = SubraceName::parse("Duergar").unwrap_err();
        assert_eq!(
            err,
            CharacterError::UndefinedEnum {
                kind: EnumKind::Subrace,
                value: "Duergar".into()
            }
        );
    }

    #[test]
    fn test_parse_is_exact() {
        assert!(ClassName::parse(" Bard").is_err());
        assert!(ClassName::parse("bard").is_err());
        assert!(ClassName::parse("").is_err());
        assert!(AbilityName::parse("STR").is_err());
    }

    #[test]
    fn test_options_cover_every_member() {
        assert_eq!(AbilityName::options().len(), 7);
        assert_eq!(ClassName::options().len(), 13);
        assert_eq!(RaceName::options().len(), 9);
        assert_eq!(SubraceName::options().len(), 10);
        assert_eq!(BackgroundName::options().len(), 13);
        assert_eq!(SkillName::options().len(), 18);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for skill in SkillName::options() {
            assert_eq!(SkillName::parse(&skill.to_string()).unwrap(), skill);
        }
        for subrace in SubraceName::options() {
            assert_eq!(SubraceName::parse(&subrace.to_string()).unwrap(), subrace);
        }
    }
}
