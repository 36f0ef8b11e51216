//! This module provides the `ProgramLoader` struct, responsible for loading programs
//! from files, directories and strings. Files ending in `.json` are read as serialized
//! `Program`s; everything else uses the line-oriented text format.

use crate::analyzer::analyze;
use crate::parser::parse;
use crate::types::{Program, TuringMachineError, MAX_PROGRAM_SIZE};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of programs in the line-oriented text format.
pub const TEXT_EXTENSION: &str = "tm";
/// Extension of programs serialized as JSON.
pub const JSON_EXTENSION: &str = "json";

/// `ProgramLoader` is a utility struct for loading programs.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single program from the specified file path.
    ///
    /// Programs loaded from text files take their name from the file stem.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is successfully read, parsed and validated.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::ParseError)` if the file content is not a valid program.
    pub fn load_program(path: &Path) -> Result<Program, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let mut program = if has_extension(path, JSON_EXTENSION) {
            Self::load_program_from_json(&content)?
        } else {
            parse(&content)?
        };

        if program.name.is_empty() {
            program.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        Ok(program)
    }

    /// Loads a single program from text content.
    pub fn load_program_from_string(content: &str) -> Result<Program, TuringMachineError> {
        parse(content)
    }

    /// Loads a single program from its JSON serialization and validates it.
    pub fn load_program_from_json(content: &str) -> Result<Program, TuringMachineError> {
        if content.len() > MAX_PROGRAM_SIZE {
            return Err(TuringMachineError::ProgramTooLarge(content.len()));
        }

        let program: Program = serde_json::from_str(content)
            .map_err(|e| TuringMachineError::ValidationError(format!("Invalid JSON program: {e}")))?;

        analyze(&program)?;

        Ok(program)
    }

    /// Loads every program file (`.tm` or `.json`) from a given directory.
    ///
    /// Directories and files with other extensions are skipped. Results are sorted by
    /// path so the order does not depend on the file system.
    pub fn load_programs(directory: &Path) -> Vec<Result<(PathBuf, Program), TuringMachineError>> {
        if !directory.exists() {
            return vec![Err(TuringMachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut paths = Vec::new();
        let mut results = Vec::new();

        for entry in entries {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file()
                        && (has_extension(&path, TEXT_EXTENSION)
                            || has_extension(&path, JSON_EXTENSION))
                    {
                        paths.push(path);
                    }
                }
                Err(e) => results.push(Err(TuringMachineError::FileError(format!(
                    "Failed to read directory entry: {}",
                    e
                )))),
            }
        }

        paths.sort();

        results.extend(paths.into_iter().map(|path| {
            Self::load_program(&path)
                .map(|program| (path.clone(), program))
                .map_err(|e| {
                    TuringMachineError::FileError(format!(
                        "Failed to load program from {}: {}",
                        path.display(),
                        e
                    ))
                })
        }));

        results
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}
