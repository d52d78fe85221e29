//! Sheet resolution module.
//!
//! Provides [`ResolvedSheet`], every number on a character sheet resolved
//! in dependency order with a breakdown of how it was reached. Each value
//! is computed from the values it depends on, which must already have been
//! resolved; a missing dependency is reported as
//! [`CharacterError::DomainLookup`] rather than defaulted.

use crate::ability::{ability_modifier, AbilityName};
use crate::character::Character;
use crate::class::{ClassName, HitDie};
use crate::error::{CharacterError, Result};
use crate::graph::{SheetGraph, SheetStat};
use crate::race::{AbilityIncrease, MoveSpeedSource};
use crate::resolved::ResolvedValue;
use crate::rules;
use crate::skill::SkillName;
use serde::Serialize;

/// A fully resolved character sheet, ready for display.
///
/// # Examples
///
/// ```rust
/// use charsheet::*;
///
/// let character = Character::builder()
///     .name("Lia")
///     .class(ClassName::Rogue)
///     .abilities(AbilityBlock::new(8, 16, 12, 13, 10, 14))
///     .race(Race::new(RaceName::Halfling, SubraceName::Lightfoot))
///     .background(BackgroundName::Urchin)
///     .build()
///     .unwrap();
///
/// let sheet = ResolvedSheet::resolve(&character).unwrap();
/// assert_eq!(sheet.skill(SkillName::Stealth).unwrap(), 5);
/// assert_eq!(sheet.armor_class().unwrap(), 13);
/// assert_eq!(sheet.move_speed().unwrap(), 25);
///
/// let stealth = sheet.get(graph::SheetStat::Skill(SkillName::Stealth)).unwrap();
/// assert_eq!(stealth.parts.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSheet {
    pub name: String,
    pub class: ClassName,
    pub hit_die: HitDie,
    pub background: String,
    pub current_hit_points: i32,
    pub ability_increases: Vec<AbilityIncrease>,
    /// Scores after racial increases, shown next to the raw scores.
    pub effective_scores: Vec<(AbilityName, i32)>,
    /// Resolved values in resolution order.
    pub values: Vec<ResolvedValue>,
}

fn effective_scores(character: &Character) -> Vec<(AbilityName, i32)> {
    let effective = character.effective_abilities();
    AbilityName::CORE
        .iter()
        .map(|ability| (*ability, effective.raw(*ability)))
        .collect()
}

impl ResolvedSheet {
    /// Resolve every value in the standard rule graph.
    pub fn resolve(character: &Character) -> Result<Self> {
        Self::resolve_with(character, &SheetGraph::standard())
    }

    /// Resolve only `targets` and what they depend on.
    pub fn resolve_only(character: &Character, targets: &[SheetStat]) -> Result<Self> {
        Self::resolve_with(
            character,
            &SheetGraph::standard().subgraph_for_targets(targets),
        )
    }

    /// Resolve the values of an arbitrary graph.
    ///
    /// # Errors
    ///
    /// * [`CharacterError::RuleCycle`] if the graph has a cycle
    /// * [`CharacterError::DomainLookup`] if a value needs a dependency the
    ///   graph does not declare
    pub fn resolve_with(character: &Character, graph: &SheetGraph) -> Result<Self> {
        let order = graph.topological_sort()?;

        let mut sheet = ResolvedSheet {
            name: character.name().to_string(),
            class: character.class(),
            hit_die: character.hit_die(),
            background: character.background().name(),
            current_hit_points: character.current_hit_points(),
            ability_increases: character.ability_increases(),
            effective_scores: effective_scores(character),
            values: Vec::with_capacity(order.len()),
        };

        for stat in order {
            let resolved = sheet.resolve_stat(character, stat)?;
            tracing::trace!(%stat, value = resolved.value, "resolved sheet value");
            sheet.values.push(resolved);
        }

        tracing::debug!(
            name = %sheet.name,
            values = sheet.values.len(),
            "resolved character sheet"
        );
        Ok(sheet)
    }

    fn resolve_stat(&self, character: &Character, stat: SheetStat) -> Result<ResolvedValue> {
        let resolved = match stat {
            SheetStat::Score(ability) => {
                let score = character.abilities().raw(ability);
                ResolvedValue::new(stat, score).with_part("base score", score)
            }
            SheetStat::Modifier(ability) => {
                let score = self.value(SheetStat::Score(ability))?;
                let modifier = ability_modifier(score);
                ResolvedValue::new(stat, modifier).with_part(format!("{ability} {score}"), modifier)
            }
            SheetStat::Level => {
                let level = character.level();
                ResolvedValue::new(stat, level).with_part("level", level)
            }
            SheetStat::ProficiencyBonus => {
                let level = self.value(SheetStat::Level)?;
                let bonus = rules::proficiency_bonus(level);
                ResolvedValue::new(stat, bonus).with_part(format!("level {level}"), bonus)
            }
            SheetStat::SavingThrow(ability) => self.check(
                stat,
                ability,
                character.is_proficient_in_save(ability),
            )?,
            SheetStat::Skill(skill) => self.check(
                stat,
                skill.governing_ability(),
                character.is_proficient_in_skill(skill),
            )?,
            SheetStat::MaxHitPoints => {
                let level = self.value(SheetStat::Level)?;
                let constitution = self.value(SheetStat::Modifier(AbilityName::Constitution))?;
                let hit_die = character.hit_die();
                let from_dice = hit_die.sides().saturating_mul(level);
                ResolvedValue::new(stat, rules::max_hit_points(hit_die, level, constitution))
                    .with_part(format!("{hit_die} × {level}"), from_dice)
                    .with_part("Constitution modifier", constitution)
            }
            SheetStat::ArmorClass => {
                let dexterity = self.value(SheetStat::Modifier(AbilityName::Dexterity))?;
                ResolvedValue::new(stat, rules::armor_class(dexterity))
                    .with_part("base", rules::BASE_ARMOR_CLASS)
                    .with_part("Dexterity modifier", dexterity)
            }
            SheetStat::Initiative => {
                let dexterity = self.value(SheetStat::Modifier(AbilityName::Dexterity))?;
                ResolvedValue::new(stat, rules::initiative(dexterity))
                    .with_part("Dexterity modifier", dexterity)
            }
            SheetStat::MoveSpeed => {
                let (speed, source) = character.race().resolve_move_speed();
                let label = match source {
                    MoveSpeedSource::Override => String::from("explicit"),
                    MoveSpeedSource::Subrace(subrace) => subrace.to_string(),
                    MoveSpeedSource::Race(race) => race.to_string(),
                };
                ResolvedValue::new(stat, speed).with_part(label, speed)
            }
        };
        Ok(resolved)
    }

    /// A saving throw or skill check: modifier plus proficiency if trained.
    fn check(&self, stat: SheetStat, ability: AbilityName, proficient: bool) -> Result<ResolvedValue> {
        let modifier = self.value(SheetStat::Modifier(ability))?;
        let bonus = self.value(SheetStat::ProficiencyBonus)?;

        let mut resolved = ResolvedValue::new(stat, rules::check_bonus(modifier, proficient, bonus))
            .with_part(format!("{ability} modifier"), modifier);
        if proficient {
            resolved.add_part("proficiency", bonus);
        }
        Ok(resolved)
    }

    /// Look up a resolved value with its breakdown.
    pub fn get(&self, stat: SheetStat) -> Result<&ResolvedValue> {
        self.values
            .iter()
            .find(|resolved| resolved.stat == stat)
            .ok_or_else(|| CharacterError::lookup("resolved sheet value", stat))
    }

    pub fn value(&self, stat: SheetStat) -> Result<i32> {
        self.get(stat).map(|resolved| resolved.value)
    }

    pub fn modifier(&self, ability: AbilityName) -> Result<i32> {
        self.value(SheetStat::Modifier(ability))
    }

    pub fn proficiency_bonus(&self) -> Result<i32> {
        self.value(SheetStat::ProficiencyBonus)
    }

    pub fn saving_throw(&self, ability: AbilityName) -> Result<i32> {
        self.value(SheetStat::SavingThrow(ability))
    }

    pub fn skill(&self, skill: SkillName) -> Result<i32> {
        self.value(SheetStat::Skill(skill))
    }

    pub fn max_hit_points(&self) -> Result<i32> {
        self.value(SheetStat::MaxHitPoints)
    }

    pub fn armor_class(&self) -> Result<i32> {
        self.value(SheetStat::ArmorClass)
    }

    pub fn initiative(&self) -> Result<i32> {
        self.value(SheetStat::Initiative)
    }

    pub fn move_speed(&self) -> Result<i32> {
        self.value(SheetStat::MoveSpeed)
    }
}
