//! This module renders programs back into the line-oriented text format read by the
//! parser, and renders the aligned rule table used in transcripts.

use crate::types::{Program, Transition};

/// Header line of the aligned rule table.
pub const RULE_TABLE_HEADER: &str =
    "<State index>  <Read>  <Write>  <Direction>  <New state index>";

/// Encodes a program into the text format understood by [`crate::parser::parse`].
///
/// Format:
/// - line 1: the tape contents
/// - line 2: the head offset
/// - line 3: the start state
/// - line 4: the halting state
/// - then one `state read write direction next_state` row per rule, with directions
///   written as `-1`, `0` or `1`.
///
/// The name, mode and blank symbol are not part of the format.
pub fn encode(program: &Program) -> String {
    let mut lines = vec![
        program.tape.clone(),
        program.head.to_string(),
        program.start_state.to_string(),
        program.halting_state.to_string(),
    ];
    lines.extend(program.rules.iter().map(encode_rule));

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Encodes a single rule as a compact row.
pub fn encode_rule(rule: &Transition) -> String {
    format!(
        "{} {} {} {} {}",
        rule.state,
        rule.read,
        rule.write,
        rule.direction.offset(),
        rule.next_state
    )
}

/// Renders the rules as the aligned table printed in transcripts, header included.
pub fn encode_rule_table(rules: &[Transition]) -> String {
    let mut table = String::from(RULE_TABLE_HEADER);
    table.push('\n');

    for rule in rules {
        table.push_str(&format!(
            "    {}            {}        {}          {}               {}\n",
            rule.state,
            rule.read,
            rule.write,
            rule.direction.offset(),
            rule.next_state
        ));
    }

    table
}
