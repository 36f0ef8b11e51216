//! This module defines the core data structures and types used throughout the simulator,
//! including program representation, transitions, execution results, and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rule;

/// The blank symbol used to fill cells when the tape grows.
pub const DEFAULT_BLANK_SYMBOL: char = '-';
/// As a read symbol it matches anything; as a write symbol it leaves the cell untouched.
pub const WILDCARD_SYMBOL: char = '*';
/// The maximum allowed size for a program in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB
/// The default number of loop iterations allowed by a bounded run.
pub const MAX_EXECUTION_STEPS: usize = 100_000;

/// Identifies a machine state. Halting is a threshold on this value.
pub type StateId = usize;

/// A complete single-tape machine definition, as produced by the loader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Program {
    /// A human readable name. Text programs take it from their file name.
    #[serde(default)]
    pub name: String,
    /// Execution mode of the simulator.
    #[serde(default)]
    pub mode: Mode,
    /// The initial tape contents, left to right.
    pub tape: String,
    /// Offset of the head into `tape`.
    pub head: usize,
    /// The state the machine starts in.
    pub start_state: StateId,
    /// The machine halts once its state reaches or exceeds this value.
    pub halting_state: StateId,
    /// The symbol written into newly allocated cells.
    #[serde(default = "default_blank")]
    pub blank: char,
    /// Transition rules in declaration order. The order is significant.
    pub rules: Vec<Transition>,
}

fn default_blank() -> char {
    DEFAULT_BLANK_SYMBOL
}

impl Program {
    /// Returns the initial tape as a vector of symbols.
    pub fn symbols(&self) -> Vec<char> {
        self.tape.chars().collect()
    }

    /// Returns `true` if a machine built from this program would not take a single step.
    pub fn halts_immediately(&self) -> bool {
        self.start_state >= self.halting_state
    }

    /// Returns the distinct source states in order of first declaration.
    pub fn states(&self) -> Vec<StateId> {
        let mut states: Vec<StateId> = Vec::new();
        for rule in &self.rules {
            if !states.contains(&rule.state) {
                states.push(rule.state);
            }
        }
        states
    }
}

/// The execution mode for a program.
///
/// Controls how the simulator handles a state/symbol pair that no rule matches:
/// - `Normal` (default): the rule table is rescanned forever, as the historical machine does.
/// - `Strict`: the step reports an `UndefinedTransition` error instead.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mode {
    /// Keep scanning the rule table.
    #[default]
    Normal,
    /// Undefined transitions are treated as errors.
    Strict,
}

/// A single transition rule: `(state, read, write, direction, next_state)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state this rule applies to.
    pub state: StateId,
    /// The symbol under the head, or `WILDCARD_SYMBOL` to match any symbol.
    pub read: char,
    /// The symbol to write, or `WILDCARD_SYMBOL` to keep the current one.
    pub write: char,
    /// Head movement applied after writing.
    pub direction: Direction,
    /// The state entered after this rule fires.
    pub next_state: StateId,
}

impl Transition {
    pub fn new(
        state: StateId,
        read: char,
        write: char,
        direction: Direction,
        next_state: StateId,
    ) -> Self {
        Self {
            state,
            read,
            write,
            direction,
            next_state,
        }
    }

    /// Returns `true` if this rule fires for `state` with `symbol` under the head.
    pub fn matches(&self, state: StateId, symbol: char) -> bool {
        self.state == state && (self.read == symbol || self.is_wildcard())
    }

    /// Returns `true` if the read symbol is the wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.read == WILDCARD_SYMBOL
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// The numeric offset used by the historical text format.
    pub fn offset(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Stay => 0,
            Direction::Right => 1,
        }
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine performed a step (or rescanned its table) and continues execution.
    Continue,
    /// The machine has halted.
    Halt(Halt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// The state reached the halting threshold.
    Ok,

    Err(TuringMachineError),
}

/// The final result of a run: the tape, the state it stopped in and how many rules fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub tape: Vec<char>,
    pub state: StateId,
    pub steps: usize,
}

impl Outcome {
    /// Returns the final tape as a string.
    pub fn tape_string(&self) -> String {
        self.tape.iter().collect()
    }
}

/// Represents various errors that can occur while loading or running a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// Indicates that no rule matches the state and symbol under the head.
    #[error("No rule defined for state {0} and symbol {1:?}")]
    UndefinedTransition(StateId, char),
    /// Indicates that a bounded run did not halt in time.
    #[error("Machine did not halt within {0} steps")]
    StepLimitExceeded(usize),
    /// Indicates an error during the parsing of a program definition.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates an error during the validation of a program's structure or logic.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to reading or writing files.
    #[error("File error: {0}")]
    FileError(String),
    /// Indicates a program source larger than `MAX_PROGRAM_SIZE`.
    #[error("Program is too large: {0} bytes")]
    ProgramTooLarge(usize),
}
