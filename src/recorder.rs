//! This module provides the observation side of a run: the `Observer` hook the machine
//! calls after every applied transition, and two recorders built on it. `History`
//! keeps every tape snapshot in memory; `Transcript` renders the classic text report
//! with the program header, the transition process and the final result.

use crate::encoder::encode_rule_table;
use crate::types::{Outcome, Program, TuringMachineError};
use std::fs;
use std::path::Path;

/// Receives the full tape contents after each applied transition.
pub trait Observer {
    fn observe(&mut self, tape: &[char]);
}

/// Discards every observation.
impl Observer for () {
    fn observe(&mut self, _tape: &[char]) {}
}

impl<F> Observer for F
where
    F: FnMut(&[char]),
{
    fn observe(&mut self, tape: &[char]) {
        self(tape)
    }
}

/// Collects every observed tape as a string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct History {
    tapes: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the observed tapes in the order they were produced.
    pub fn tapes(&self) -> &[String] {
        &self.tapes
    }

    pub fn len(&self) -> usize {
        self.tapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tapes.is_empty()
    }

    /// Returns the most recent observation, if any.
    pub fn last(&self) -> Option<&str> {
        self.tapes.last().map(String::as_str)
    }
}

impl Observer for History {
    fn observe(&mut self, tape: &[char]) {
        self.tapes.push(tape.iter().collect());
    }
}

/// Builds the text report of a run.
///
/// ```text
/// <Starting contents of tape> aabbbbb
/// <Starting offset of machine head> 0
/// <Start state index> 0
/// <Halting state index> 9
/// <State index>  <Read>  <Write>  <Direction>  <New state index>
///     0            a        -          1               1
/// <Tape Transition Process>
/// -abbbbb
///
/// <Result> bbbbbaa--
/// <Last State> 9
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    /// Starts a transcript with the header and rule table of `program`.
    pub fn new(program: &Program) -> Self {
        let mut text = format!(
            "<Starting contents of tape> {}\n\
             <Starting offset of machine head> {}\n\
             <Start state index> {}\n\
             <Halting state index> {}\n",
            program.tape, program.head, program.start_state, program.halting_state
        );
        text.push_str(&encode_rule_table(&program.rules));
        text.push_str("<Tape Transition Process>\n");

        Self { text }
    }

    /// Appends the result section and returns the complete report.
    pub fn finish(mut self, outcome: &Outcome) -> String {
        self.text.push_str(&format!(
            "\n<Result> {}\n<Last State> {}\n",
            outcome.tape_string(),
            outcome.state
        ));
        self.text
    }

    /// Finishes the transcript and writes it to `path`.
    pub fn save(self, path: &Path, outcome: &Outcome) -> Result<(), TuringMachineError> {
        let content = self.finish(outcome);
        fs::write(path, content).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to write file {}: {}", path.display(), e))
        })
    }

    /// Returns the report produced so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Observer for Transcript {
    fn observe(&mut self, tape: &[char]) {
        self.text.extend(tape.iter());
        self.text.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Mode, Transition, DEFAULT_BLANK_SYMBOL};
    use tempfile::tempdir;

    fn program() -> Program {
        Program {
            name: "extend".into(),
            mode: Mode::default(),
            tape: "a".into(),
            head: 0,
            start_state: 0,
            halting_state: 1,
            blank: DEFAULT_BLANK_SYMBOL,
            rules: vec![Transition::new(0, 'a', 'a', Direction::Left, 1)],
        }
    }

    fn outcome() -> Outcome {
        Outcome {
            tape: vec!['-', 'a'],
            state: 1,
            steps: 1,
        }
    }

    #[test]
    fn test_history_collects_snapshots() {
        let mut history = History::new();
        history.observe(&['a', 'b']);
        history.observe(&['-', 'a', 'b']);

        assert_eq!(history.len(), 2);
        assert_eq!(history.tapes(), &["ab".to_string(), "-ab".to_string()]);
        assert_eq!(history.last(), Some("-ab"));
    }

    #[test]
    fn test_closure_observer() {
        let mut lengths = Vec::new();
        {
            let mut observer = |tape: &[char]| lengths.push(tape.len());
            observer.observe(&['a']);
            observer.observe(&['a', 'b']);
        }

        assert_eq!(lengths, vec![1, 2]);
    }

    #[test]
    fn test_transcript_layout() {
        let mut transcript = Transcript::new(&program());
        transcript.observe(&['-', 'a']);
        let text = transcript.finish(&outcome());

        let expected = "<Starting contents of tape> a\n\
                        <Starting offset of machine head> 0\n\
                        <Start state index> 0\n\
                        <Halting state index> 1\n\
                        <State index>  <Read>  <Write>  <Direction>  <New state index>\n    \
                        0            a        a          -1               1\n\
                        <Tape Transition Process>\n\
                        -a\n\
                        \n\
                        <Result> -a\n\
                        <Last State> 1\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_transcript_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.txt");

        Transcript::new(&program()).save(&path, &outcome()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<Starting contents of tape> a\n"));
        assert!(content.ends_with("<Result> -a\n<Last State> 1\n"));
    }

    #[test]
    fn test_transcript_save_to_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("output.txt");

        let result = Transcript::new(&program()).save(&path, &outcome());
        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }
}
