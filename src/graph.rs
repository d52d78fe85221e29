//! Derivation graph module.
//!
//! Provides [`SheetGraph`], a directed acyclic graph of the numbers that
//! appear on a character sheet. An edge says "is derived from": a skill
//! bonus depends on a modifier and the proficiency bonus, the modifier
//! depends on the raw score, and so on. Sheet resolution walks the graph in
//! topological order, and [`SheetGraph::dependents_of`] tells a display
//! layer which values to refresh after an input changes.

use crate::ability::AbilityName;
use crate::error::{CharacterError, Result};
use crate::skill::SkillName;
use crate::validate::ClosedEnum;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One number on a character sheet.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SheetStat {
    Score(AbilityName),
    Modifier(AbilityName),
    Level,
    ProficiencyBonus,
    SavingThrow(AbilityName),
    Skill(SkillName),
    MaxHitPoints,
    ArmorClass,
    Initiative,
    MoveSpeed,
}

impl fmt::Display for SheetStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetStat::Score(ability) => write!(f, "{ability} score"),
            SheetStat::Modifier(ability) => write!(f, "{ability} modifier"),
            SheetStat::Level => f.write_str("level"),
            SheetStat::ProficiencyBonus => f.write_str("proficiency bonus"),
            SheetStat::SavingThrow(ability) => write!(f, "{ability} saving throw"),
            SheetStat::Skill(skill) => write!(f, "{skill}"),
            SheetStat::MaxHitPoints => f.write_str("max hit points"),
            SheetStat::ArmorClass => f.write_str("armor class"),
            SheetStat::Initiative => f.write_str("initiative"),
            SheetStat::MoveSpeed => f.write_str("move speed"),
        }
    }
}

/// A directed acyclic graph of sheet values and what they derive from.
///
/// # Examples
///
/// ```rust
/// use charsheet::graph::{SheetGraph, SheetStat};
/// use charsheet::AbilityName;
///
/// let graph = SheetGraph::standard();
/// let order = graph.topological_sort().unwrap();
///
/// let score = order.iter().position(|s| *s == SheetStat::Score(AbilityName::Dexterity)).unwrap();
/// let ac = order.iter().position(|s| *s == SheetStat::ArmorClass).unwrap();
/// assert!(score < ac);
///
/// // Changing Dexterity touches armor class and initiative.
/// let touched = graph.dependents_of(SheetStat::Score(AbilityName::Dexterity));
/// assert!(touched.contains(&SheetStat::ArmorClass));
/// assert!(touched.contains(&SheetStat::Initiative));
/// ```
#[derive(Debug, Clone)]
pub struct SheetGraph {
    graph: DiGraph<SheetStat, ()>,
    node_map: HashMap<SheetStat, NodeIndex>,
}

impl SheetGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// The dependency graph of the standard ruleset.
    pub fn standard() -> Self {
        let mut graph = SheetGraph::new();

        graph.add_edge(SheetStat::ProficiencyBonus, SheetStat::Level);

        for ability in AbilityName::CORE {
            graph.add_edge(SheetStat::Modifier(ability), SheetStat::Score(ability));
            graph.add_edge(SheetStat::SavingThrow(ability), SheetStat::Modifier(ability));
            graph.add_edge(SheetStat::SavingThrow(ability), SheetStat::ProficiencyBonus);
        }

        for skill in SkillName::options() {
            let governing = SheetStat::Modifier(skill.governing_ability());
            graph.add_edge(SheetStat::Skill(skill), governing);
            graph.add_edge(SheetStat::Skill(skill), SheetStat::ProficiencyBonus);
        }

        graph.add_edge(SheetStat::MaxHitPoints, SheetStat::Level);
        graph.add_edge(
            SheetStat::MaxHitPoints,
            SheetStat::Modifier(AbilityName::Constitution),
        );
        graph.add_edge(
            SheetStat::ArmorClass,
            SheetStat::Modifier(AbilityName::Dexterity),
        );
        graph.add_edge(
            SheetStat::Initiative,
            SheetStat::Modifier(AbilityName::Dexterity),
        );

        // Depends only on race fields, which are not sheet numbers.
        graph.add_node(SheetStat::MoveSpeed);

        graph
    }

    /// Add a node, returning the existing index if it is already present.
    pub fn add_node(&mut self, stat: SheetStat) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&stat) {
            idx
        } else {
            let idx = self.graph.add_node(stat);
            self.node_map.insert(stat, idx);
            idx
        }
    }

    /// Record that `dependent` is derived from `dependency`.
    ///
    /// Internally the edge points from the dependency to the dependent, so
    /// a topological order lists dependencies first.
    pub fn add_edge(&mut self, dependent: SheetStat, dependency: SheetStat) {
        let dependent_idx = self.add_node(dependent);
        let dependency_idx = self.add_node(dependency);
        self.graph.add_edge(dependency_idx, dependent_idx, ());
    }

    /// Detect cycles using depth-first search.
    ///
    /// # Errors
    ///
    /// [`CharacterError::RuleCycle`] with the path of the first cycle found,
    /// closed by repeating its first stat.
    pub fn detect_cycles(&self) -> Result<()> {
        let mut visited = HashSet::new();
        let mut on_stack = HashSet::new();

        for node_idx in self.graph.node_indices() {
            if !visited.contains(&node_idx) {
                let mut path = Vec::new();
                if let Some(cycle) = self.dfs_cycle_detect(node_idx, &mut visited, &mut on_stack, &mut path) {
                    return Err(cycle);
                }
            }
        }

        Ok(())
    }

    fn dfs_cycle_detect(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        on_stack: &mut HashSet<NodeIndex>,
        path: &mut Vec<SheetStat>,
    ) -> Option<CharacterError> {
        visited.insert(node);
        on_stack.insert(node);
        path.push(self.graph[node]);

        for neighbor in self.graph.neighbors_directed(node, Direction::Outgoing) {
            if !visited.contains(&neighbor) {
                if let Some(cycle) = self.dfs_cycle_detect(neighbor, visited, on_stack, path) {
                    return Some(cycle);
                }
            } else if on_stack.contains(&neighbor) {
                let closing = self.graph[neighbor];
                let start = path.iter().position(|stat| *stat == closing).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(closing);
                return Some(CharacterError::RuleCycle { path: cycle });
            }
        }

        on_stack.remove(&node);
        path.pop();
        None
    }

    /// Resolution order, dependencies first.
    pub fn topological_sort(&self) -> Result<Vec<SheetStat>> {
        self.detect_cycles()?;

        toposort(&self.graph, None)
            .map(|indices| indices.into_iter().map(|idx| self.graph[idx]).collect())
            .map_err(|cycle| CharacterError::RuleCycle {
                path: vec![self.graph[cycle.node_id()]],
            })
    }

    pub fn nodes(&self) -> Vec<SheetStat> {
        self.graph.node_indices().map(|idx| self.graph[idx]).collect()
    }

    pub fn contains_node(&self, stat: &SheetStat) -> bool {
        self.node_map.contains_key(stat)
    }

    /// Direct dependencies of a stat, sorted.
    pub fn dependencies_of(&self, stat: SheetStat) -> Vec<SheetStat> {
        self.neighbors(stat, Direction::Incoming)
    }

    /// Every stat that is derived, directly or transitively, from `stat`.
    ///
    /// Sorted, and never contains `stat` itself in an acyclic graph.
    pub fn dependents_of(&self, stat: SheetStat) -> Vec<SheetStat> {
        let mut seen = HashSet::new();
        let mut stack = self.neighbors(stat, Direction::Outgoing);

        while let Some(next) = stack.pop() {
            if seen.insert(next) {
                stack.extend(self.neighbors(next, Direction::Outgoing));
            }
        }

        let mut dependents: Vec<_> = seen.into_iter().collect();
        dependents.sort();
        dependents
    }

    /// A graph containing only `targets` and everything they depend on.
    pub fn subgraph_for_targets(&self, targets: &[SheetStat]) -> SheetGraph {
        let mut subgraph = SheetGraph::new();
        let mut visited = HashSet::new();
        let mut stack = targets.to_vec();

        while let Some(stat) = stack.pop() {
            if !visited.insert(stat) || !self.contains_node(&stat) {
                continue;
            }
            subgraph.add_node(stat);

            for dependency in self.dependencies_of(stat) {
                if !visited.contains(&dependency) {
                    stack.push(dependency);
                }
                subgraph.add_edge(stat, dependency);
            }
        }

        subgraph
    }

    fn neighbors(&self, stat: SheetStat, direction: Direction) -> Vec<SheetStat> {
        let Some(&idx) = self.node_map.get(&stat) else {
            return Vec::new();
        };
        let mut neighbors: Vec<_> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n])
            .collect();
        neighbors.sort();
        neighbors.dedup();
        neighbors
    }
}

impl Default for SheetGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[SheetStat], stat: SheetStat) -> usize {
        order.iter().position(|s| *s == stat).unwrap()
    }

    #[test]
    fn test_standard_graph_is_acyclic() {
        assert!(SheetGraph::standard().detect_cycles().is_ok());
    }

    #[test]
    fn test_standard_graph_covers_sheet() {
        let graph = SheetGraph::standard();
        // 6 scores, 6 modifiers, level, proficiency, 6 saves, 18 skills,
        // max hp, ac, initiative, move speed
        assert_eq!(graph.nodes().len(), 6 + 6 + 1 + 1 + 6 + 18 + 4);
        assert!(!graph.contains_node(&SheetStat::Score(AbilityName::YourChoice)));
        for skill in SkillName::options() {
            assert!(graph.contains_node(&SheetStat::Skill(skill)));
        }
    }

    #[test]
    fn test_topological_sort_orders_dependencies_first() {
        let order = SheetGraph::standard().topological_sort().unwrap();

        assert!(position(&order, SheetStat::Level) < position(&order, SheetStat::ProficiencyBonus));
        assert!(
            position(&order, SheetStat::Modifier(AbilityName::Wisdom))
                < position(&order, SheetStat::Skill(SkillName::Perception))
        );
        assert!(
            position(&order, SheetStat::ProficiencyBonus)
                < position(&order, SheetStat::SavingThrow(AbilityName::Charisma))
        );
        assert!(
            position(&order, SheetStat::Modifier(AbilityName::Constitution))
                < position(&order, SheetStat::MaxHitPoints)
        );
    }

    #[test]
    fn test_dependencies_of_skill() {
        let graph = SheetGraph::standard();
        assert_eq!(
            graph.dependencies_of(SheetStat::Skill(SkillName::Stealth)),
            vec![
                SheetStat::Modifier(AbilityName::Dexterity),
                SheetStat::ProficiencyBonus
            ]
        );
        assert!(graph.dependencies_of(SheetStat::MoveSpeed).is_empty());
    }

    #[test]
    fn test_level_change_touches_every_proficient_value() {
        let graph = SheetGraph::standard();
        let touched = graph.dependents_of(SheetStat::Level);

        assert!(touched.contains(&SheetStat::ProficiencyBonus));
        assert!(touched.contains(&SheetStat::MaxHitPoints));
        assert!(touched.contains(&SheetStat::Skill(SkillName::Arcana)));
        assert!(touched.contains(&SheetStat::SavingThrow(AbilityName::Strength)));
        assert!(!touched.contains(&SheetStat::ArmorClass));
        assert!(!touched.contains(&SheetStat::Level));
    }

    #[test]
    fn test_strength_change_is_narrow() {
        let graph = SheetGraph::standard();
        assert_eq!(
            graph.dependents_of(SheetStat::Score(AbilityName::Strength)),
            vec![
                SheetStat::Modifier(AbilityName::Strength),
                SheetStat::SavingThrow(AbilityName::Strength),
                SheetStat::Skill(SkillName::Athletics),
            ]
        );
    }

    #[test]
    fn test_subgraph_for_targets() {
        let graph = SheetGraph::standard();
        let subgraph = graph.subgraph_for_targets(&[SheetStat::ArmorClass]);

        assert!(subgraph.contains_node(&SheetStat::ArmorClass));
        assert!(subgraph.contains_node(&SheetStat::Modifier(AbilityName::Dexterity)));
        assert!(subgraph.contains_node(&SheetStat::Score(AbilityName::Dexterity)));
        assert!(!subgraph.contains_node(&SheetStat::Level));
        assert_eq!(subgraph.nodes().len(), 3);
    }

    #[test]
    fn test_subgraph_for_unknown_target_is_empty() {
        let graph = SheetGraph::new();
        let subgraph = graph.subgraph_for_targets(&[SheetStat::Initiative]);
        assert!(subgraph.nodes().is_empty());
    }

    #[test]
    fn test_detect_cycle_path() {
        let mut graph = SheetGraph::new();
        graph.add_edge(SheetStat::ArmorClass, SheetStat::Initiative);
        graph.add_edge(SheetStat::Initiative, SheetStat::ArmorClass);

        let err = graph.topological_sort().unwrap_err();
        match err {
            CharacterError::RuleCycle { path } => {
                assert_eq!(path.len(), 3);
                assert_eq!(path.first(), path.last());
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_nodes_are_merged() {
        let mut graph = SheetGraph::new();
        let a = graph.add_node(SheetStat::Level);
        let b = graph.add_node(SheetStat::Level);
        assert_eq!(a, b);
        assert_eq!(graph.nodes().len(), 1);
    }
}
