//! This module provides functions for analyzing programs before execution. `analyze`
//! rejects programs the engine cannot run at all (an empty tape, an out-of-range head, a
//! start state without rules). `lint` reports softer problems, such as transitions into
//! states that have no rules, which do not stop a program from loading.

use crate::types::{Program, StateId, TuringMachineError, WILDCARD_SYMBOL};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Represents various errors that can be found during the analysis of a program.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// Indicates a head offset outside of the initial tape.
    InvalidHead(usize),
    /// Indicates that the start state is below the halting threshold but has no rules.
    InvalidStartState(StateId),
    /// Indicates structural problems with the program (empty tape, unusable blank, etc.).
    StructuralError(String),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::InvalidHead(pos) => {
                TuringMachineError::ValidationError(format!("Invalid head position: {}", pos))
            }
            AnalysisError::InvalidStartState(state) => {
                TuringMachineError::ValidationError(format!("Invalid start state: {}", state))
            }
            AnalysisError::StructuralError(msg) => TuringMachineError::ValidationError(msg),
        }
    }
}

/// Problems that do not prevent a program from running but usually indicate a mistake.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisWarning {
    /// States with rules that cannot be reached from the start state.
    UnreachableStates(Vec<StateId>),
    /// Indices of rules that can never fire because an earlier rule always matches first.
    ShadowedRules(Vec<usize>),
    /// Reachable state/symbol pairs with no matching rule. Reaching one of them makes a
    /// `Mode::Normal` run scan forever.
    UnhandledSymbols(Vec<(StateId, char)>),
    /// Rules, formatted as `state[index] -> next_state`, that enter a non-halting state
    /// with no rules of its own.
    UndefinedNextStates(Vec<String>),
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::UnreachableStates(states) => {
                write!(f, "Unreachable states: {:?}", states)
            }
            AnalysisWarning::ShadowedRules(rules) => {
                write!(f, "Rules that can never fire: {:?}", rules)
            }
            AnalysisWarning::UnhandledSymbols(pairs) => {
                write!(f, "No rule for state/symbol pairs: {:?}", pairs)
            }
            AnalysisWarning::UndefinedNextStates(transitions) => {
                write!(f, "Transitions reference undefined states: {:?}", transitions)
            }
        }
    }
}

/// Analyzes a given `Program` for structural and logical errors.
///
/// # Arguments
///
/// * `program` - A reference to the `Program` to be analyzed.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TuringMachineError::ValidationError)` with the first violated check otherwise.
pub fn analyze(program: &Program) -> Result<(), TuringMachineError> {
    [
        check_structure,
        check_head,
        check_valid_start_state,
    ]
    .iter()
    .try_for_each(|check| check(program))
    .map_err(TuringMachineError::from)
}

/// Collects warnings about a program that passed `analyze`.
pub fn lint(program: &Program) -> Vec<AnalysisWarning> {
    let mut warnings = Vec::new();

    let reachable = reachable_states(program);

    let unreachable: Vec<StateId> = program
        .states()
        .into_iter()
        .filter(|state| !reachable.contains(state))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if !unreachable.is_empty() {
        warnings.push(AnalysisWarning::UnreachableStates(unreachable));
    }

    let shadowed = find_shadowed_rules(program);
    if !shadowed.is_empty() {
        warnings.push(AnalysisWarning::ShadowedRules(shadowed));
    }

    let unhandled = find_unhandled(program, &reachable);
    if !unhandled.is_empty() {
        warnings.push(AnalysisWarning::UnhandledSymbols(unhandled));
    }

    let undefined = find_undefined_next_states(program);
    if !undefined.is_empty() {
        warnings.push(AnalysisWarning::UndefinedNextStates(undefined));
    }

    warnings
}

/// Checks basic structural requirements of the program.
fn check_structure(program: &Program) -> Result<(), AnalysisError> {
    if program.tape.is_empty() {
        return Err(AnalysisError::StructuralError(
            "Initial tape is empty".to_string(),
        ));
    }

    if program.blank == WILDCARD_SYMBOL {
        return Err(AnalysisError::StructuralError(format!(
            "The wildcard '{}' cannot be used as the blank symbol",
            WILDCARD_SYMBOL
        )));
    }

    Ok(())
}

/// Checks that the head offset lies within the initial tape.
fn check_head(program: &Program) -> Result<(), AnalysisError> {
    if program.head >= program.tape.chars().count() {
        return Err(AnalysisError::InvalidHead(program.head));
    }

    Ok(())
}

/// Checks that a machine which has to take a step can find at least one rule for its
/// start state.
fn check_valid_start_state(program: &Program) -> Result<(), AnalysisError> {
    if !program.halts_immediately()
        && !program
            .rules
            .iter()
            .any(|rule| rule.state == program.start_state)
    {
        return Err(AnalysisError::InvalidStartState(program.start_state));
    }

    Ok(())
}

/// Returns the rules whose `next_state` is below the halting threshold but has no rules.
fn find_undefined_next_states(program: &Program) -> Vec<String> {
    let defined: HashSet<StateId> = program.rules.iter().map(|rule| rule.state).collect();

    program
        .rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| {
            rule.next_state < program.halting_state && !defined.contains(&rule.next_state)
        })
        .map(|(i, rule)| format!("{}[{}] -> {}", rule.state, i, rule.next_state))
        .collect()
}

/// Returns the non-halting states reachable from the start state.
fn reachable_states(program: &Program) -> HashSet<StateId> {
    let mut visited = HashSet::new();
    let mut queue = vec![program.start_state];

    while let Some(state) = queue.pop() {
        if state >= program.halting_state || !visited.insert(state) {
            continue;
        }

        for rule in program.rules.iter().filter(|rule| rule.state == state) {
            if !visited.contains(&rule.next_state) {
                queue.push(rule.next_state);
            }
        }
    }

    visited
}

/// Returns the indices of rules preceded by a rule for the same state that reads the
/// same symbol or the wildcard.
fn find_shadowed_rules(program: &Program) -> Vec<usize> {
    program
        .rules
        .iter()
        .enumerate()
        .filter(|(i, rule)| {
            program.rules[..*i].iter().any(|earlier| {
                earlier.state == rule.state
                    && (earlier.is_wildcard() || earlier.read == rule.read)
            })
        })
        .map(|(i, _)| i)
        .collect()
}

/// Returns reachable state/symbol pairs that no rule matches. The alphabet is every
/// symbol appearing in the program: the tape, the blank and all non-wildcard rule symbols.
fn find_unhandled(program: &Program, reachable: &HashSet<StateId>) -> Vec<(StateId, char)> {
    let mut alphabet: BTreeSet<char> = program.tape.chars().collect();
    alphabet.insert(program.blank);
    for rule in &program.rules {
        alphabet.insert(rule.read);
        alphabet.insert(rule.write);
    }
    alphabet.remove(&WILDCARD_SYMBOL);

    let states: BTreeSet<StateId> = reachable.iter().copied().collect();

    states
        .into_iter()
        .flat_map(|state| alphabet.iter().map(move |&symbol| (state, symbol)))
        .filter(|&(state, symbol)| !program.rules.iter().any(|r| r.matches(state, symbol)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Mode, Transition, DEFAULT_BLANK_SYMBOL};

    fn create_test_program(
        tape: &str,
        head: usize,
        start_state: StateId,
        halting_state: StateId,
        rules: Vec<Transition>,
    ) -> Program {
        Program {
            name: "Test Program".to_string(),
            mode: Mode::default(),
            tape: tape.to_string(),
            head,
            start_state,
            halting_state,
            blank: DEFAULT_BLANK_SYMBOL,
            rules,
        }
    }

    fn rule(state: StateId, read: char, next_state: StateId) -> Transition {
        Transition::new(state, read, read, Direction::Right, next_state)
    }

    #[test]
    fn test_valid_program() {
        let program = create_test_program(
            "ab",
            1,
            0,
            2,
            vec![rule(0, 'a', 1), rule(0, '*', 0), rule(1, '*', 2)],
        );

        assert!(analyze(&program).is_ok());
    }

    #[test]
    fn test_empty_tape() {
        let program = create_test_program("", 0, 0, 0, vec![]);

        assert_eq!(
            check_structure(&program),
            Err(AnalysisError::StructuralError(
                "Initial tape is empty".to_string()
            ))
        );
    }

    #[test]
    fn test_wildcard_blank() {
        let mut program = create_test_program("a", 0, 0, 0, vec![]);
        program.blank = WILDCARD_SYMBOL;

        assert!(matches!(
            check_structure(&program),
            Err(AnalysisError::StructuralError(_))
        ));
    }

    #[test]
    fn test_invalid_head() {
        let program = create_test_program("ab", 2, 0, 0, vec![]);

        assert_eq!(check_head(&program), Err(AnalysisError::InvalidHead(2)));
        assert_eq!(
            analyze(&program),
            Err(TuringMachineError::ValidationError(
                "Invalid head position: 2".to_string()
            ))
        );
    }

    #[test]
    fn test_head_counts_characters() {
        let program = create_test_program("éa", 1, 0, 0, vec![]);
        assert!(check_head(&program).is_ok());
    }

    #[test]
    fn test_start_state_without_rules() {
        let program = create_test_program("a", 0, 3, 5, vec![rule(0, 'a', 5)]);

        assert_eq!(
            check_valid_start_state(&program),
            Err(AnalysisError::InvalidStartState(3))
        );
    }

    #[test]
    fn test_start_state_at_threshold_needs_no_rules() {
        let program = create_test_program("a", 0, 5, 5, vec![]);
        assert!(analyze(&program).is_ok());
    }

    #[test]
    fn test_undefined_next_states() {
        let program = create_test_program(
            "a",
            0,
            0,
            9,
            vec![rule(0, 'a', 4), rule(0, 'b', 9), rule(0, 'c', 12)],
        );

        assert!(analyze(&program).is_ok());
        assert_eq!(
            find_undefined_next_states(&program),
            vec!["0[0] -> 4".to_string()]
        );
        assert!(lint(&program)
            .contains(&AnalysisWarning::UndefinedNextStates(vec!["0[0] -> 4".to_string()])));
    }

    #[test]
    fn test_lint_clean_program() {
        let program = create_test_program(
            "a",
            0,
            0,
            1,
            vec![rule(0, '*', 1)],
        );

        assert!(lint(&program).is_empty());
    }

    #[test]
    fn test_lint_unreachable_states() {
        let program = create_test_program(
            "a",
            0,
            0,
            9,
            vec![rule(0, '*', 9), rule(4, '*', 9), rule(2, '*', 4)],
        );

        assert_eq!(
            lint(&program),
            vec![AnalysisWarning::UnreachableStates(vec![2, 4])]
        );
    }

    #[test]
    fn test_lint_shadowed_rules() {
        let program = create_test_program(
            "a",
            0,
            0,
            1,
            vec![rule(0, 'a', 1), rule(0, '*', 1), rule(0, 'a', 1), rule(0, '-', 1)],
        );

        assert_eq!(
            lint(&program),
            vec![AnalysisWarning::ShadowedRules(vec![2, 3])]
        );
    }

    #[test]
    fn test_lint_unhandled_symbols() {
        let program = create_test_program("ab", 0, 0, 1, vec![rule(0, 'a', 1)]);

        assert_eq!(
            lint(&program),
            vec![AnalysisWarning::UnhandledSymbols(vec![(0, '-'), (0, 'b')])]
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = AnalysisWarning::UnhandledSymbols(vec![(0, 'b')]);
        assert_eq!(
            warning.to_string(),
            "No rule for state/symbol pairs: [(0, 'b')]"
        );
    }
}
