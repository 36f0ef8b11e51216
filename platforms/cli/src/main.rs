use clap::Parser;
use slog::{error, info, o, warn, Drain, Level, LevelFilter, Logger};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tmsim::{
    analyze, lint, Mode, Outcome, Program, ProgramLoader, ProgramManager, Transcript,
    TuringMachine, TuringMachineError, MAX_EXECUTION_STEPS,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tmsim-cli programs/swap.tm
  tmsim-cli --example swap --output output.txt
  cat programs/swap.tm | tmsim-cli --json")]
struct Cli {
    /// The program file to execute (.tm or .json).
    /// Program content can also be piped via stdin.
    program: Option<String>,

    /// Run one of the built-in programs by name
    #[clap(short, long)]
    example: Option<String>,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,

    /// Replace the initial tape contents
    #[clap(short, long)]
    tape: Option<String>,

    /// Stop after this many steps; 0 runs until the machine halts
    #[clap(short, long, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Fail on a state/symbol pair without a rule instead of rescanning
    #[clap(short, long)]
    strict: bool,

    /// Write the full transcript to this file
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Print the outcome as JSON
    #[clap(long)]
    json: bool,

    /// Log each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    let logger = build_logger(cli.debug);

    if cli.list {
        for (index, name) in ProgramManager::list_program_names().iter().enumerate() {
            println!("{index}: {name}");
        }
        return;
    }

    if let Err(e) = run(&cli, &logger) {
        error!(logger, "{}", e);
        std::process::exit(1);
    }
}

/// Builds a terminal logger on stderr; `debug` lowers the level so every transition shows.
fn build_logger(debug: bool) -> Logger {
    let level = if debug { Level::Debug } else { Level::Info };

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = LevelFilter::new(drain, level).fuse();
    let drain = Mutex::new(drain).fuse();

    Logger::root(drain, o!())
}

fn run(cli: &Cli, logger: &Logger) -> Result<(), TuringMachineError> {
    let mut program = load_program(cli)?;

    if let Some(tape) = &cli.tape {
        program.tape = tape.clone();
        analyze(&program)?;
    }

    if cli.strict {
        program.mode = Mode::Strict;
    }

    for warning in lint(&program) {
        warn!(logger, "{}", warning; "program" => &program.name);
    }

    let mut machine = TuringMachine::new(&program)
        .with_logger(logger.new(o!("program" => program.name.clone())));
    let transcript = Transcript::new(&program);

    let outcome = execute(
        &mut machine,
        cli.max_steps,
        transcript,
        cli.output.as_deref(),
        logger,
    )?;

    if cli.json {
        let json = serde_json::to_string_pretty(&outcome).map_err(|e| {
            TuringMachineError::ValidationError(format!("Failed to serialize outcome: {e}"))
        })?;
        println!("{json}");
    } else {
        println!("<Result> {}", outcome.tape_string());
        println!("<Last State> {}", outcome.state);
    }

    Ok(())
}

/// Runs the machine, bounded unless `max_steps` is 0, and saves the transcript to
/// `output` even when the run fails so a runaway machine still leaves a trace.
fn execute(
    machine: &mut TuringMachine,
    max_steps: usize,
    mut transcript: Transcript,
    output: Option<&Path>,
    logger: &Logger,
) -> Result<Outcome, TuringMachineError> {
    let result = if max_steps == 0 {
        machine.run_with(&mut transcript)
    } else {
        machine.run_bounded(max_steps, &mut transcript)
    };

    if let Some(path) = output {
        transcript.save(path, &machine.outcome())?;
        info!(logger, "transcript written"; "path" => %path.display());
    }

    result
}

/// Loads the program named on the command line.
///
/// It tries a built-in program, then a file path, and finally stdin when input is piped.
fn load_program(cli: &Cli) -> Result<Program, TuringMachineError> {
    if let Some(name) = &cli.example {
        ProgramManager::get_program_by_name(name)
    } else if let Some(path) = &cli.program {
        ProgramLoader::load_program(Path::new(path))
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| TuringMachineError::FileError(format!("Failed to read from stdin: {e}")))?;

        let trimmed = buffer.trim_start();
        if trimmed.starts_with('{') {
            ProgramLoader::load_program_from_json(trimmed)
        } else {
            ProgramLoader::load_program_from_string(&buffer)
        }
    } else {
        Err(TuringMachineError::ValidationError(
            "No program given: pass a file, use --example, or pipe a program via stdin"
                .to_string(),
        ))
    }
}
