use crate::parser::parse;
use crate::types::{Program, StateId, TuringMachineError};

// Embedded sample programs, as (name, source) pairs
const PROGRAM_TEXTS: [(&str, &str); 4] = [
    ("swap", include_str!("../programs/swap.tm")),
    ("binary-increment", include_str!("../programs/binary-increment.tm")),
    ("unary-addition", include_str!("../programs/unary-addition.tm")),
    ("extend-left", include_str!("../programs/extend-left.tm")),
];

lazy_static::lazy_static! {
    /// The embedded programs, parsed once on first use.
    pub static ref PROGRAMS: Vec<Program> = PROGRAM_TEXTS
        .iter()
        .filter_map(|(name, text)| match parse(text) {
            Ok(program) => Some(Program {
                name: name.to_string(),
                ..program
            }),
            Err(e) => {
                eprintln!("Failed to parse embedded program '{}': {}", name, e);
                None
            }
        })
        .collect();
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        PROGRAMS.get(index).cloned().ok_or_else(|| {
            TuringMachineError::ValidationError(format!("Program index {} out of range", index))
        })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|program| program.name.clone()).collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            start_state: program.start_state,
            halting_state: program.halting_state,
            initial_tape: program.tape.clone(),
            state_count: program.states().len(),
            transition_count: program.rules.len(),
        })
    }

    /// Search programs by name (case-insensitive substring)
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, program)| program.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Summary of an embedded program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub start_state: StateId,
    pub halting_state: StateId,
    pub initial_tape: String,
    pub state_count: usize,
    pub transition_count: usize,
}
