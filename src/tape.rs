//! This module defines the `Tape`, a growable, bidirectional sequence of symbol cells
//! with a movable head. Only a finite window of the conceptually infinite tape is
//! materialized; stepping off either end allocates one blank cell on that side.

use crate::types::{Direction, DEFAULT_BLANK_SYMBOL};
use std::collections::VecDeque;
use std::fmt;

/// A single machine tape.
///
/// Cells live in a `VecDeque` so growing at either end is amortized O(1). The head is
/// an index into the deque and always refers to a materialized cell once the tape has
/// been created with a valid offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    head: usize,
    blank: char,
}

impl Tape {
    /// Creates a tape holding exactly `symbols` with the head at `head`, filling new
    /// cells with `DEFAULT_BLANK_SYMBOL`.
    ///
    /// The offset is not validated. Callers must ensure `head < symbols.len()`; the
    /// loader rejects programs that violate this.
    pub fn new(symbols: impl IntoIterator<Item = char>, head: usize) -> Self {
        Self::with_blank(symbols, head, DEFAULT_BLANK_SYMBOL)
    }

    /// Creates a tape like [`Tape::new`] using a custom blank symbol.
    pub fn with_blank(symbols: impl IntoIterator<Item = char>, head: usize, blank: char) -> Self {
        Self {
            cells: symbols.into_iter().collect(),
            head,
            blank,
        }
    }

    /// Returns the symbol under the head.
    ///
    /// An out-of-range head only arises from an invalid offset at construction; it reads
    /// as blank rather than panicking.
    pub fn read(&self) -> char {
        self.cells.get(self.head).copied().unwrap_or(self.blank)
    }

    /// Replaces the symbol under the head. The head does not move.
    pub fn write(&mut self, symbol: char) {
        if let Some(cell) = self.cells.get_mut(self.head) {
            *cell = symbol;
        }
    }

    /// Moves the head one cell to the left, growing the tape if the head is on the
    /// leftmost cell.
    pub fn move_left(&mut self) {
        if self.head == 0 {
            self.cells.push_front(self.blank);
        } else {
            self.head -= 1;
        }
    }

    /// Moves the head one cell to the right, growing the tape if the head is on the
    /// rightmost cell.
    pub fn move_right(&mut self) {
        self.head += 1;
        if self.head >= self.cells.len() {
            self.cells.push_back(self.blank);
        }
    }

    /// Leaves the head where it is.
    pub fn move_stay(&mut self) {}

    /// Moves the head according to `direction`.
    pub fn shift(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Stay => self.move_stay(),
        }
    }

    /// Returns the materialized contents, left to right.
    pub fn snapshot(&self) -> Vec<char> {
        self.cells.iter().copied().collect()
    }

    /// Returns the position of the head within the materialized window.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the blank symbol used for new cells.
    pub fn blank(&self) -> char {
        self.blank
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.cells {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tape(content: &str, head: usize) -> Tape {
        Tape::new(content.chars(), head)
    }

    #[test]
    fn test_new_tape() {
        let tape = tape("abc", 1);

        assert_eq!(tape.snapshot(), vec!['a', 'b', 'c']);
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.read(), 'b');
        assert_eq!(tape.len(), 3);
        assert_eq!(tape.blank(), DEFAULT_BLANK_SYMBOL);
    }

    #[test]
    fn test_write_does_not_move() {
        let mut tape = tape("abc", 1);
        tape.write('x');

        assert_eq!(tape.to_string(), "axc");
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.read(), 'x');
    }

    #[test]
    fn test_move_within_window() {
        let mut tape = tape("abc", 1);

        tape.move_left();
        assert_eq!(tape.read(), 'a');
        tape.move_right();
        tape.move_right();
        assert_eq!(tape.read(), 'c');
        assert_eq!(tape.len(), 3);
    }

    #[test]
    fn test_extend_left() {
        let mut tape = tape("ab", 0);
        tape.move_left();

        assert_eq!(tape.to_string(), "-ab");
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.read(), '-');
    }

    #[test]
    fn test_extend_right() {
        let mut tape = tape("ab", 1);
        tape.move_right();

        assert_eq!(tape.to_string(), "ab-");
        assert_eq!(tape.head(), 2);
        assert_eq!(tape.read(), '-');
    }

    #[test]
    fn test_repeated_extension_keeps_cells() {
        let mut tape = tape("a", 0);
        tape.move_left();
        tape.move_left();
        tape.write('x');
        for _ in 0..4 {
            tape.move_right();
        }

        assert_eq!(tape.to_string(), "x-a--");
        assert_eq!(tape.head(), 4);
    }

    #[test]
    fn test_stay_is_noop() {
        let mut tape = tape("ab", 1);
        tape.shift(Direction::Stay);

        assert_eq!(tape.head(), 1);
        assert_eq!(tape.to_string(), "ab");
    }

    #[test]
    fn test_custom_blank() {
        let mut tape = Tape::with_blank("a".chars(), 0, '_');
        tape.shift(Direction::Right);
        tape.shift(Direction::Left);
        tape.shift(Direction::Left);

        assert_eq!(tape.to_string(), "_a_");
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn test_snapshot_is_stable() {
        let mut tape = tape("abc", 2);
        tape.move_right();

        assert_eq!(tape.snapshot(), tape.snapshot());
    }
}
