//! This module provides the parser for machine definitions, utilizing the `pest` crate.
//! It defines the grammar of the line-oriented text format and functions to parse the
//! input into a `Program` struct.

use crate::{
    analyzer::analyze,
    types::{
        Direction, Mode, Program, Transition, TuringMachineError, DEFAULT_BLANK_SYMBOL,
        MAX_PROGRAM_SIZE,
    },
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::{Pair, Pairs},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TuringMachineParser;

/// Parses the given input string into a `Program` struct.
///
/// This is the main entry point for parsing machine definitions. The parsed program is
/// validated by the analyzer before being returned, so its head offset is guaranteed to
/// lie within the tape.
///
/// # Arguments
///
/// * `input` - A string slice containing the machine definition.
///
/// # Returns
///
/// * `Ok(Program)` if the input is successfully parsed and validated.
/// * `Err(TuringMachineError::ProgramTooLarge)` if the input exceeds `MAX_PROGRAM_SIZE`.
/// * `Err(TuringMachineError::ParseError)` if there are any syntax errors.
/// * `Err(TuringMachineError::ValidationError)` if the program fails validation.
pub fn parse(input: &str) -> Result<Program, TuringMachineError> {
    if input.len() > MAX_PROGRAM_SIZE {
        return Err(TuringMachineError::ProgramTooLarge(input.len()));
    }

    let root = TuringMachineParser::parse(Rule::program, input)
        .map_err(|e| TuringMachineError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| TuringMachineError::ValidationError("Empty program".to_string()))?;

    let program = parse_program(root)?;

    analyze(&program)?;

    Ok(program)
}

/// Parses the top-level structure from a `Pair<Rule::program>`.
///
/// The grammar fixes the order of the four header lines, so each one is picked up by
/// its rule and the remaining pairs are transitions in declaration order.
fn parse_program(pair: Pair<Rule>) -> Result<Program, TuringMachineError> {
    let mut tape: Option<String> = None;
    let mut head: Option<usize> = None;
    let mut start_state: Option<usize> = None;
    let mut halting_state: Option<usize> = None;
    let mut rules = Vec::new();

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::tape => tape = Some(p.as_str().to_string()),
            Rule::head => head = Some(parse_inner_number(p)?),
            Rule::start_state => start_state = Some(parse_inner_number(p)?),
            Rule::halting_state => halting_state = Some(parse_inner_number(p)?),
            Rule::transition => rules.push(parse_transition(p)?),
            _ => {} // EOI
        }
    }

    Ok(Program {
        name: String::new(),
        mode: Mode::default(),
        tape: check_required_rule(tape, "tape")?,
        head: check_required_rule(head, "head offset")?,
        start_state: check_required_rule(start_state, "start state")?,
        halting_state: check_required_rule(halting_state, "halting state")?,
        blank: DEFAULT_BLANK_SYMBOL,
        rules,
    })
}

/// Parses a single `state read write direction next_state` row.
fn parse_transition(pair: Pair<Rule>) -> Result<Transition, TuringMachineError> {
    let span = pair.as_span();
    let mut pairs = pair.into_inner();

    let state = parse_number(next_pair(&mut pairs, span)?)?;
    let read = parse_symbol(next_pair(&mut pairs, span)?.as_str());
    let write = parse_symbol(next_pair(&mut pairs, span)?.as_str());
    let direction = parse_direction(next_pair(&mut pairs, span)?)?;
    let next_state = parse_number(next_pair(&mut pairs, span)?)?;

    Ok(Transition::new(state, read, write, direction, next_state))
}

/// Parses a single direction from a `Pair<Rule::direction>`.
///
/// Supports `-1`, `L` or `<` for Left, `1`, `R` or `>` for Right, and `0` or `S` for Stay.
fn parse_direction(pair: Pair<Rule>) -> Result<Direction, TuringMachineError> {
    let span = pair.as_span();
    let direction = match pair.as_str() {
        "<" | "L" => Some(Direction::Left),
        ">" | "R" => Some(Direction::Right),
        "S" => Some(Direction::Stay),
        offset => match offset.parse::<i64>() {
            Ok(-1) => Some(Direction::Left),
            Ok(0) => Some(Direction::Stay),
            Ok(1) => Some(Direction::Right),
            _ => None,
        },
    };

    direction.ok_or_else(|| {
        parse_error(
            &format!("Unsupported direction: {}", pair.as_str()),
            span,
        )
    })
}

/// Parses the single `index` wrapped by a header rule.
fn parse_inner_number(pair: Pair<Rule>) -> Result<usize, TuringMachineError> {
    let span = pair.as_span();
    parse_number(next_pair(&mut pair.into_inner(), span)?)
}

/// Parses a non-negative number, rejecting values that do not fit a state id.
fn parse_number(pair: Pair<Rule>) -> Result<usize, TuringMachineError> {
    pair.as_str()
        .parse::<usize>()
        .map_err(|e| parse_error(&format!("Invalid number {}: {e}", pair.as_str()), pair.as_span()))
}

/// Parses a single character symbol.
fn parse_symbol(input: &str) -> char {
    input.chars().next().unwrap_or(DEFAULT_BLANK_SYMBOL)
}

/// Takes the next pair of a rule whose shape the grammar already guarantees.
fn next_pair<'i>(
    pairs: &mut Pairs<'i, Rule>,
    span: Span<'i>,
) -> Result<Pair<'i, Rule>, TuringMachineError> {
    pairs
        .next()
        .ok_or_else(|| parse_error("Incomplete rule row", span))
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Checks if a required section is present, returning an `Err` if it's missing.
fn check_required_rule<T>(value: Option<T>, name: &str) -> Result<T, TuringMachineError> {
    value.ok_or_else(|| TuringMachineError::ValidationError(format!("Missing '{name}' line")))
}
