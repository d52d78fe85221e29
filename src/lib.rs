//! # charsheet - Deterministic Tabletop RPG Character Sheet Engine
//!
//! Turns raw, user-supplied character attributes (six ability scores, a
//! class, a race and subrace, a background and a level) into every number
//! on a character sheet:
//! - **Closed rulesets**: classes, races, subraces, backgrounds and skills are
//!   enums, and every reference table is an exhaustive `match`
//! - **Validated construction**: raw strings are parsed once, at the edge;
//!   anything unrecognized is rejected, never defaulted
//! - **Pure derivation**: every derived value is recomputed from the
//!   character's fields, with no caching and no hidden state
//!
//! ## Pipeline
//!
//! ```text
//! [document | form | record] → [Character] → getters / [ResolvedSheet]
//! ```
//!
//! 1. **Adapters** parse raw strings and numbers into typed fields
//! 2. **Character** holds the validated fields and exposes derived getters
//! 3. **ResolvedSheet** resolves the whole sheet in dependency order, with
//!    a breakdown of every value
//!
//! ## Example
//!
//! ```rust
//! use charsheet::*;
//!
//! let character = Character::builder()
//!     .name("Tordek")
//!     .class(ClassName::Fighter)
//!     .level(5)
//!     .abilities(AbilityBlock::new(16, 12, 15, 10, 13, 8))
//!     .race(Race::new(RaceName::Dwarf, SubraceName::MountainDwarf))
//!     .background(BackgroundName::Soldier)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(character.proficiency_bonus(), 3);
//! assert_eq!(character.saving_throw(AbilityName::Constitution), 5);
//! assert_eq!(character.skill_bonus(SkillName::Intimidation), 2);
//! assert_eq!(character.max_hit_points(), 52);
//! assert_eq!(character.move_speed(), 25);
//! ```
//!
//! ## Modules
//!
//! - [`ability`] - Ability names, scores and modifiers
//! - [`class`] - Classes, hit dice and saving-throw proficiencies
//! - [`race`] - Races, subraces and the race resolver
//! - [`skill`] - Skills and their governing abilities
//! - [`background`] - Backgrounds and skill proficiencies
//! - [`validate`] - Parsing raw strings into closed enums
//! - [`rules`] - Rule constants and formulas
//! - [`character`] - The character aggregate and its builder
//! - [`graph`] - Dependency graph of sheet values
//! - [`resolved`] - A resolved value with its breakdown
//! - [`sheet`] - Whole-sheet resolution
//! - [`document`], [`form`], [`record`] - Ingestion adapters
//! - [`error`] - Error types

pub mod ability;
pub mod background;
pub mod character;
pub mod class;
pub mod document;
pub mod error;
pub mod form;
pub mod graph;
pub mod race;
pub mod record;
pub mod resolved;
pub mod rules;
pub mod sheet;
pub mod skill;
pub mod validate;

// Re-export main types for convenience
pub use ability::{ability_modifier, AbilityBlock, AbilityName};
pub use background::{Background, BackgroundName};
pub use character::{Character, CharacterBuilder};
pub use class::{ClassName, HitDie};
pub use error::{CharacterError, EnumKind};
pub use race::{AbilityIncrease, MoveSpeedSource, Race, RaceName, SubraceName};
pub use resolved::ResolvedValue;
pub use sheet::ResolvedSheet;
pub use skill::SkillName;
pub use validate::ClosedEnum;

// Re-export adapters
pub use document::CharacterDocument;
pub use form::CharacterForm;
pub use record::CharacterRecord;
