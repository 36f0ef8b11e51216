//! This module defines the `TuringMachine` struct, which runs a single-tape machine. It
//! owns the tape and the rule table for one run, tracks the current state against the
//! halting threshold, and reports each applied transition to an `Observer`.

use crate::recorder::Observer;
use crate::rules::RuleTable;
use crate::tape::Tape;
use crate::types::{
    Halt, Mode, Outcome, Program, StateId, Step, Transition, TuringMachineError, WILDCARD_SYMBOL,
};
use slog::{debug, info, o, trace, Discard, Logger};

/// A single-tape Turing machine.
///
/// The machine halts once its state is greater than or equal to the halting state. A
/// state/symbol pair with no matching rule is rescanned forever in `Mode::Normal`;
/// callers that cannot guarantee a complete table should use [`TuringMachine::run_bounded`]
/// or `Mode::Strict`.
pub struct TuringMachine {
    state: StateId,
    start_state: StateId,
    halting_state: StateId,
    tape: Tape,
    initial_tape: Tape,
    rules: RuleTable,
    mode: Mode,
    step_count: usize,
    logger: Logger,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` from a loaded `Program`.
    pub fn new(program: &Program) -> Self {
        let tape = Tape::with_blank(program.tape.chars(), program.head, program.blank);
        let mut machine = Self::from_parts(
            tape,
            RuleTable::new(program.rules.clone()),
            program.start_state,
            program.halting_state,
        );
        machine.mode = program.mode;
        machine
    }

    /// Creates a machine directly from a tape, a rule table and the two state bounds.
    pub fn from_parts(
        tape: Tape,
        rules: RuleTable,
        start_state: StateId,
        halting_state: StateId,
    ) -> Self {
        Self {
            state: start_state,
            start_state,
            halting_state,
            initial_tape: tape.clone(),
            tape,
            rules,
            mode: Mode::default(),
            step_count: 0,
            logger: Logger::root(Discard, o!()),
        }
    }

    /// Attaches a logger. Transitions are logged at debug level, empty rescans at trace.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Overrides the execution mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Executes a single step without observing it.
    pub fn step(&mut self) -> Step {
        self.step_with(&mut ())
    }

    /// Executes a single step of the machine.
    ///
    /// Looks up the rule for the current state and the symbol under the head, writes
    /// (a wildcard rule writing `*` keeps the cell), moves the head and enters the next
    /// state.
    /// The observer sees the tape once per applied rule.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a rule was applied, or if no rule matched in `Mode::Normal`.
    /// * `Step::Halt(Halt::Ok)` if the state has reached the halting threshold.
    /// * `Step::Halt(Halt::Err(_))` if no rule matched in `Mode::Strict`.
    pub fn step_with<O: Observer + ?Sized>(&mut self, observer: &mut O) -> Step {
        if self.is_halted() {
            return Step::Halt(Halt::Ok);
        }

        let symbol = self.tape.read();
        let transition = match self.rules.find_and_advance(self.state, symbol).copied() {
            Some(t) => t,
            None => {
                return match self.mode {
                    Mode::Normal => {
                        trace!(self.logger, "no rule matched, rescanning";
                            "state" => self.state, "symbol" => symbol);
                        Step::Continue
                    }
                    Mode::Strict => Step::Halt(Halt::Err(
                        TuringMachineError::UndefinedTransition(self.state, symbol),
                    )),
                };
            }
        };

        self.apply(&transition);

        debug!(self.logger, "transition applied";
            "step" => self.step_count,
            "read" => symbol,
            "state" => self.state,
            "head" => self.tape.head(),
            "tape" => %self.tape);

        observer.observe(&self.tape.snapshot());

        if self.is_halted() {
            info!(self.logger, "machine halted";
                "state" => self.state, "steps" => self.step_count);
        }

        Step::Continue
    }

    fn apply(&mut self, transition: &Transition) {
        if !(transition.is_wildcard() && transition.write == WILDCARD_SYMBOL) {
            self.tape.write(transition.write);
        }

        self.tape.shift(transition.direction);
        self.state = transition.next_state;
        self.step_count += 1;
    }

    /// Runs the machine until it halts, without observing it.
    pub fn run(&mut self) -> Result<Outcome, TuringMachineError> {
        self.run_with(&mut ())
    }

    /// Runs the machine until it halts, reporting every applied transition to `observer`.
    ///
    /// In `Mode::Normal` this only returns once the halting threshold is reached; a table
    /// missing a reachable state/symbol pair keeps it scanning forever. In `Mode::Strict`
    /// such a pair is returned as `TuringMachineError::UndefinedTransition`.
    pub fn run_with<O: Observer + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<Outcome, TuringMachineError> {
        loop {
            match self.step_with(observer) {
                Step::Continue => continue,
                Step::Halt(Halt::Ok) => return Ok(self.outcome()),
                Step::Halt(Halt::Err(e)) => return Err(e),
            }
        }
    }

    /// Runs the machine for at most `max_steps` loop iterations.
    ///
    /// Both applied transitions and empty rescans count towards the limit, so an
    /// incomplete table terminates with `TuringMachineError::StepLimitExceeded`.
    pub fn run_bounded<O: Observer + ?Sized>(
        &mut self,
        max_steps: usize,
        observer: &mut O,
    ) -> Result<Outcome, TuringMachineError> {
        for _ in 0..max_steps {
            match self.step_with(observer) {
                Step::Continue => continue,
                Step::Halt(Halt::Ok) => return Ok(self.outcome()),
                Step::Halt(Halt::Err(e)) => return Err(e),
            }
        }

        if self.is_halted() {
            Ok(self.outcome())
        } else {
            Err(TuringMachineError::StepLimitExceeded(max_steps))
        }
    }

    /// Returns the current tape, state and step count as an `Outcome`.
    pub fn outcome(&self) -> Outcome {
        Outcome {
            tape: self.tape.snapshot(),
            state: self.state,
            steps: self.step_count,
        }
    }

    /// Resets the machine to its initial configuration.
    /// This includes the state, the tape, the step count and the rule table's scan cursor.
    pub fn reset(&mut self) {
        self.state = self.start_state;
        self.tape = self.initial_tape.clone();
        self.rules = RuleTable::new(self.rules.rules().to_vec());
        self.step_count = 0;
    }

    /// Checks if the machine has reached the halting threshold.
    pub fn is_halted(&self) -> bool {
        self.state >= self.halting_state
    }

    /// Returns the current state.
    pub fn state(&self) -> StateId {
        self.state
    }

    /// Returns the state the machine started in.
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Returns the halting threshold.
    pub fn halting_state(&self) -> StateId {
        self.halting_state
    }

    /// Returns the tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the rule table.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Returns the execution mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the number of rules applied so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the symbol currently under the head.
    pub fn symbol(&self) -> char {
        self.tape.read()
    }
}
