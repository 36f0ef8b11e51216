//! This module provides the `RuleTable`, the ordered set of transition rules together
//! with the circular scan cursor used to look them up.

use crate::types::{StateId, Transition};

/// An ordered collection of transitions.
///
/// Lookup starts at a scan cursor that persists between calls. Declaration order decides
/// which rule wins when several match; an exact read symbol is not preferred over an
/// earlier wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Transition>,
    cursor: usize,
}

impl RuleTable {
    /// Builds a table from `rules`, keeping their order. The scan cursor starts at the
    /// first rule.
    pub fn new(rules: Vec<Transition>) -> Self {
        Self { rules, cursor: 0 }
    }

    /// Finds the first rule matching `state` and `symbol`, scanning circularly from the
    /// scan cursor.
    ///
    /// Every rule that does not match advances the cursor, wrapping past the last rule.
    /// A match resets the cursor to the first rule, so the next lookup starts from the top.
    ///
    /// Returns `None` when a full pass over the table finds nothing. The cursor is then
    /// back where the pass began, exactly as it would be after any number of further
    /// passes.
    pub fn find_and_advance(&mut self, state: StateId, symbol: char) -> Option<&Transition> {
        let len = self.rules.len();

        for _ in 0..len {
            if self.rules[self.cursor].matches(state, symbol) {
                let index = self.cursor;
                self.cursor = 0;
                return self.rules.get(index);
            }

            self.cursor = (self.cursor + 1) % len;
        }

        None
    }

    /// Returns the rules in declaration order.
    pub fn rules(&self) -> &[Transition] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns `true` if any rule is declared for `state`.
    pub fn has_state(&self, state: StateId) -> bool {
        self.rules.iter().any(|rule| rule.state == state)
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }
}

impl From<Vec<Transition>> for RuleTable {
    fn from(rules: Vec<Transition>) -> Self {
        Self::new(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, WILDCARD_SYMBOL};

    fn rule(state: StateId, read: char, write: char, next_state: StateId) -> Transition {
        Transition::new(state, read, write, Direction::Right, next_state)
    }

    #[test]
    fn test_empty_table() {
        let mut table = RuleTable::new(Vec::new());

        assert!(table.is_empty());
        assert_eq!(table.find_and_advance(0, 'a'), None);
        assert_eq!(table.cursor(), 0);
    }

    #[test]
    fn test_match_resets_cursor() {
        let mut table = RuleTable::new(vec![
            rule(0, 'a', 'x', 1),
            rule(1, 'a', 'y', 2),
            rule(2, 'a', 'z', 3),
        ]);

        let found = table.find_and_advance(2, 'a').cloned();
        assert_eq!(found, Some(rule(2, 'a', 'z', 3)));
        assert_eq!(table.cursor(), 0);
    }

    #[test]
    fn test_no_match_returns_to_start() {
        let mut table = RuleTable::new(vec![rule(0, 'a', 'x', 1), rule(1, 'b', 'y', 2)]);

        assert_eq!(table.find_and_advance(5, 'a'), None);
        assert_eq!(table.cursor(), 0);
        assert_eq!(table.find_and_advance(0, 'a'), Some(&rule(0, 'a', 'x', 1)));
    }

    #[test]
    fn test_wildcard_matches_any_symbol() {
        let mut table = RuleTable::new(vec![rule(1, WILDCARD_SYMBOL, WILDCARD_SYMBOL, 1)]);

        assert!(table.find_and_advance(1, 'a').is_some());
        assert!(table.find_and_advance(1, '-').is_some());
        assert!(table.find_and_advance(0, 'a').is_none());
    }

    #[test]
    fn test_wildcard_declared_first_wins() {
        let wildcard = rule(1, WILDCARD_SYMBOL, WILDCARD_SYMBOL, 1);
        let exact = rule(1, 'a', 'b', 2);
        let mut table = RuleTable::new(vec![wildcard, exact]);

        assert_eq!(table.find_and_advance(1, 'a'), Some(&wildcard));
    }

    #[test]
    fn test_exact_declared_first_wins() {
        let wildcard = rule(1, WILDCARD_SYMBOL, WILDCARD_SYMBOL, 1);
        let exact = rule(1, 'a', 'b', 2);
        let mut table = RuleTable::new(vec![exact, wildcard]);

        assert_eq!(table.find_and_advance(1, 'a'), Some(&exact));
        assert_eq!(table.find_and_advance(1, 'c'), Some(&wildcard));
    }

    #[test]
    fn test_rebuild_has_identical_behavior() {
        let rules = vec![
            rule(0, 'a', 'x', 1),
            rule(0, WILDCARD_SYMBOL, 'y', 2),
            rule(1, 'b', 'z', 0),
        ];
        let queries = [(0, 'a'), (1, 'b'), (0, 'q'), (1, 'a'), (0, 'a')];

        let mut first = RuleTable::new(rules.clone());
        let mut second = RuleTable::from(rules);

        for (state, symbol) in queries {
            assert_eq!(
                first.find_and_advance(state, symbol).cloned(),
                second.find_and_advance(state, symbol).cloned()
            );
            assert_eq!(first.cursor(), second.cursor());
        }
    }

    #[test]
    fn test_has_state() {
        let table = RuleTable::new(vec![rule(0, 'a', 'x', 3)]);

        assert!(table.has_state(0));
        assert!(!table.has_state(3));
        assert_eq!(table.rules().len(), table.len());
    }
}
