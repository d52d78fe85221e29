//! Resolved sheet values module.
//!
//! Contains [`ResolvedValue`], a single resolved sheet number together
//! with the parts that add up to it, for display.

use crate::graph::SheetStat;
use serde::Serialize;

/// A resolved sheet value with its breakdown.
///
/// # Examples
///
/// ```rust
/// use charsheet::graph::SheetStat;
/// use charsheet::{ResolvedValue, SkillName};
///
/// let mut stealth = ResolvedValue::new(SheetStat::Skill(SkillName::Stealth), 5);
/// stealth.add_part("Dexterity modifier", 3);
/// stealth.add_part("proficiency", 2);
///
/// assert_eq!(stealth.value, 5);
/// assert_eq!(stealth.parts.len(), 2);
/// assert!(stealth.is_consistent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedValue {
    /// Which sheet number this is.
    pub stat: SheetStat,

    /// The final value.
    pub value: i32,

    /// Labelled contributions, in the order they were applied.
    pub parts: Vec<(String, i32)>,
}

impl ResolvedValue {
    pub fn new(stat: SheetStat, value: i32) -> Self {
        Self {
            stat,
            value,
            parts: Vec::new(),
        }
    }

    pub fn add_part(&mut self, label: impl Into<String>, value: i32) {
        self.parts.push((label.into(), value));
    }

    /// Builder-style variant of [`add_part`](Self::add_part).
    pub fn with_part(mut self, label: impl Into<String>, value: i32) -> Self {
        self.add_part(label, value);
        self
    }

    /// Whether the parts sum to the value.
    ///
    /// Values that are a lookup or a floor division rather than a sum (such
    /// as a modifier computed from a score) carry a single part equal to
    /// the result, so this holds for every value the sheet produces.
    pub fn is_consistent(&self) -> bool {
        self.parts
            .iter()
            .fold(0i32, |sum, (_, value)| sum.saturating_add(*value))
            == self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AbilityName;

    #[test]
    fn test_resolved_value_creation() {
        let value = ResolvedValue::new(SheetStat::Level, 3);
        assert_eq!(value.stat, SheetStat::Level);
        assert_eq!(value.value, 3);
        assert!(value.parts.is_empty());
    }

    #[test]
    fn test_parts_keep_order() {
        let value = ResolvedValue::new(SheetStat::ArmorClass, 13)
            .with_part("base", 10)
            .with_part("Dexterity modifier", 3);

        assert_eq!(value.parts[0].0, "base");
        assert_eq!(value.parts[1].0, "Dexterity modifier");
        assert!(value.is_consistent());
    }

    #[test]
    fn test_inconsistent_breakdown() {
        let value = ResolvedValue::new(SheetStat::SavingThrow(AbilityName::Wisdom), 4)
            .with_part("Wisdom modifier", 1);
        assert!(!value.is_consistent());
    }

    #[test]
    fn test_serializes_for_display() {
        let value = ResolvedValue::new(SheetStat::Initiative, -1).with_part("Dexterity modifier", -1);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["value"], -1);
        assert_eq!(json["stat"], "Initiative");
        assert_eq!(json["parts"][0][0], "Dexterity modifier");
    }
}
