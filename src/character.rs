//! Character aggregate module.
//!
//! A [`Character`] composes an [`AbilityBlock`], a class, a resolved race,
//! a background and a level. Every derived number on the sheet is a pure
//! function of those fields and is recomputed on each call.
//!
//! Characters are only ever produced by [`CharacterBuilder::build`], which
//! is the single validated construction path. Rules fields are read-only
//! afterwards; an edit goes through [`Character::to_builder`] and a fresh
//! build. Current hit points are the one field that can change in place.

use crate::ability::{AbilityBlock, AbilityName};
use crate::background::Background;
use crate::class::{ClassName, HitDie};
use crate::error::{CharacterError, Result};
use crate::race::{AbilityIncrease, Race, RaceName, SubraceName};
use crate::rules;
use crate::skill::SkillName;

/// A validated character.
///
/// # Examples
///
/// ```rust
/// use charsheet::*;
///
/// let character = Character::builder()
///     .name("Thokk")
///     .class(ClassName::Barbarian)
///     .level(5)
///     .abilities(AbilityBlock::new(17, 12, 14, 8, 10, 10))
///     .race(Race::new(RaceName::HalfOrc, SubraceName::None))
///     .background(BackgroundName::Outlander)
///     .build()
///     .unwrap();
///
/// assert_eq!(character.proficiency_bonus(), 3);
/// assert_eq!(character.max_hit_points(), 62);
/// assert_eq!(character.current_hit_points(), 62);
/// assert_eq!(character.saving_throw(AbilityName::Strength), 6);
/// assert_eq!(character.skill_bonus(SkillName::Athletics), 6);
/// assert_eq!(character.armor_class(), 11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    abilities: AbilityBlock,
    class: ClassName,
    race: Race,
    name: String,
    level: i32,
    background: Background,
    bio: String,
    current_hit_points: i32,
}

impl Character {
    pub fn builder() -> CharacterBuilder {
        CharacterBuilder::default()
    }

    /// A builder pre-filled with this character's fields, for edits.
    pub fn to_builder(&self) -> CharacterBuilder {
        CharacterBuilder {
            abilities: self.abilities,
            class: self.class,
            race: self.race.clone(),
            name: self.name.clone(),
            level: self.level,
            background: self.background.clone(),
            bio: self.bio.clone(),
            current_hit_points: self.current_hit_points,
        }
    }

    pub fn abilities(&self) -> &AbilityBlock {
        &self.abilities
    }

    pub fn class(&self) -> ClassName {
        self.class
    }

    pub fn race(&self) -> &Race {
        &self.race
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn current_hit_points(&self) -> i32 {
        self.current_hit_points
    }

    /// Record damage or healing. Never recomputed from the rules.
    pub fn set_current_hit_points(&mut self, hit_points: i32) {
        self.current_hit_points = hit_points;
    }

    pub fn ability_modifier(&self, ability: AbilityName) -> i32 {
        self.abilities.modifier(ability)
    }

    pub fn proficiency_bonus(&self) -> i32 {
        rules::proficiency_bonus(self.level)
    }

    pub fn is_proficient_in_save(&self, ability: AbilityName) -> bool {
        self.class.saving_throw_proficiencies().contains(&ability)
    }

    pub fn saving_throw(&self, ability: AbilityName) -> i32 {
        rules::check_bonus(
            self.ability_modifier(ability),
            self.is_proficient_in_save(ability),
            self.proficiency_bonus(),
        )
    }

    pub fn is_proficient_in_skill(&self, skill: SkillName) -> bool {
        self.background.is_proficient(skill)
    }

    pub fn skill_bonus(&self, skill: SkillName) -> i32 {
        rules::check_bonus(
            self.ability_modifier(skill.governing_ability()),
            self.is_proficient_in_skill(skill),
            self.proficiency_bonus(),
        )
    }

    pub fn hit_die(&self) -> HitDie {
        self.class.hit_die()
    }

    pub fn max_hit_points(&self) -> i32 {
        rules::max_hit_points(
            self.hit_die(),
            self.level,
            self.ability_modifier(AbilityName::Constitution),
        )
    }

    pub fn armor_class(&self) -> i32 {
        rules::armor_class(self.ability_modifier(AbilityName::Dexterity))
    }

    pub fn initiative(&self) -> i32 {
        rules::initiative(self.ability_modifier(AbilityName::Dexterity))
    }

    pub fn move_speed(&self) -> i32 {
        self.race.move_speed()
    }

    pub fn ability_increases(&self) -> Vec<AbilityIncrease> {
        self.race.ability_increases()
    }

    /// Scores with racial increases added, for display only. Every rule
    /// above reads the raw scores.
    pub fn effective_abilities(&self) -> AbilityBlock {
        self.abilities.apply_increases(&self.ability_increases())
    }
}

/// Collects raw-but-typed fields and validates them into a [`Character`].
///
/// Defaults mirror a blank new-sheet form: a level 1 human barbarian
/// acolyte with all scores at 0 and no name.
#[derive(Debug, Clone)]
pub struct CharacterBuilder {
    abilities: AbilityBlock,
    class: ClassName,
    race: Race,
    name: String,
    level: i32,
    background: Background,
    bio: String,
    current_hit_points: i32,
}

impl Default for CharacterBuilder {
    fn default() -> Self {
        Self {
            abilities: AbilityBlock::default(),
            class: ClassName::Barbarian,
            race: Race::new(RaceName::Human, SubraceName::None),
            name: String::new(),
            level: rules::MIN_LEVEL,
            background: Background::default(),
            bio: String::new(),
            current_hit_points: 0,
        }
    }
}

impl CharacterBuilder {
    pub fn abilities(mut self, abilities: AbilityBlock) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn class(mut self, class: ClassName) -> Self {
        self.class = class;
        self
    }

    pub fn race(mut self, race: Race) -> Self {
        self.race = race;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn background(mut self, background: impl Into<Background>) -> Self {
        self.background = background.into();
        self
    }

    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Current hit points; 0 means "start at full health".
    pub fn current_hit_points(mut self, hit_points: i32) -> Self {
        self.current_hit_points = hit_points;
        self
    }

    /// Validate and produce the character.
    ///
    /// # Errors
    ///
    /// * [`CharacterError::MissingField`] for a blank name
    /// * [`CharacterError::InvalidLevel`] for a level below 1
    /// * any error from [`Background::validate`] for a hand-built custom
    ///   background
    pub fn build(self) -> Result<Character> {
        if self.name.trim().is_empty() {
            tracing::warn!("rejected character without a name");
            return Err(CharacterError::MissingField("name".into()));
        }
        if self.level < rules::MIN_LEVEL {
            tracing::warn!(level = self.level, "rejected character level");
            return Err(CharacterError::InvalidLevel(self.level));
        }
        self.background.validate()?;

        let mut character = Character {
            abilities: self.abilities,
            class: self.class,
            race: self.race,
            name: self.name,
            level: self.level,
            background: self.background,
            bio: self.bio,
            current_hit_points: self.current_hit_points,
        };
        if character.current_hit_points == 0 {
            character.current_hit_points = character.max_hit_points();
        }

        tracing::debug!(
            name = %character.name,
            class = %character.class,
            level = character.level,
            "built character"
        );
        Ok(character)
    }
}
