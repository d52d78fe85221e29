//! Error types for character construction and resolution.
//!
//! All errors that can occur while validating raw attributes or resolving
//! a character sheet are represented by the `CharacterError` enum.

use crate::graph::SheetStat;
use std::fmt;
use thiserror::Error;

/// Format a cycle path as a readable string.
fn format_cycle_path(path: &[SheetStat]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|stat| stat.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// The closed enumeration a raw string or lookup key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    Class,
    Race,
    Subrace,
    Background,
    Skill,
    Stat,
}

impl fmt::Display for EnumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnumKind::Class => "class",
            EnumKind::Race => "race",
            EnumKind::Subrace => "subrace",
            EnumKind::Background => "background",
            EnumKind::Skill => "skill",
            EnumKind::Stat => "stat",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while building or resolving a character.
///
/// Construction is all-or-nothing: any of these returned from a builder or
/// adapter means no character was produced.
///
/// # Examples
///
/// ```rust
/// use charsheet::{CharacterError, EnumKind};
///
/// let err = CharacterError::UndefinedEnum {
///     kind: EnumKind::Class,
///     value: "Necromancer".into(),
/// };
/// assert_eq!(err.to_string(), "undefined class: Necromancer");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CharacterError {
    /// A raw string did not match any member of a closed enumeration.
    #[error("undefined {kind}: {value}")]
    UndefinedEnum { kind: EnumKind, value: String },

    /// A field expected to hold an integer could not be parsed.
    #[error("invalid value was passed for {field}: {value:?}")]
    FieldFormat { field: String, value: String },

    /// A derived lookup found no entry for an already constructed character.
    ///
    /// This points at a rules table that is out of step with its enum, not
    /// at bad user input.
    #[error("no {kind} entry for {value}")]
    DomainLookup { kind: String, value: String },

    /// The rule dependency graph contains a cycle.
    ///
    /// Like `DomainLookup`, this comes from a code change to the rules and
    /// never from user input.
    #[error("rule dependency cycle: {}", format_cycle_path(.path))]
    RuleCycle { path: Vec<SheetStat> },

    /// A required field was absent or blank.
    #[error("{0} is required to create the character")]
    MissingField(String),

    /// Character level below the minimum.
    #[error("level must be at least 1, got {0}")]
    InvalidLevel(i32),

    /// The serialized document could not be decoded or encoded.
    #[error("malformed character document: {0}")]
    Document(String),
}

impl CharacterError {
    pub(crate) fn undefined(kind: EnumKind, value: impl Into<String>) -> Self {
        CharacterError::UndefinedEnum {
            kind,
            value: value.into(),
        }
    }

    pub(crate) fn field_format(field: impl Into<String>, value: impl Into<String>) -> Self {
        CharacterError::FieldFormat {
            field: field.into(),
            value: value.into(),
        }
    }

    pub(crate) fn lookup(kind: impl Into<String>, value: impl fmt::Display) -> Self {
        CharacterError::DomainLookup {
            kind: kind.into(),
            value: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for CharacterError {
    fn from(err: serde_json::Error) -> Self {
        CharacterError::Document(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CharacterError>;
