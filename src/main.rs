use bfi_interp::{ExitStatus, VMBuilder, VMError};
use bfi_types::{LoadError, Program};
use clap::Parser;
use cli::Cli;
use std::{fs::File, io::BufWriter, process::ExitCode};

mod cli;

/// Entry point for the Brainfuck interpreter program.
///
/// Loads the program named on the command line and runs it with stdin as
/// input and stdout (or the `--output` file) as output.
///
/// # Errors
///
/// Any failure to load, allocate or run the program is printed to stderr and
/// the process exits with status 1.
///
/// # Examples
///
/// ```bash
/// cargo run -- --strict example.bf
/// ```
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(&cli);
    let status = ExitStatus::from(&result);
    if let Err(e) = result {
        eprintln!("error: {} [{}]", e, status);
    }
    ExitCode::from(status.code())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG still wins when it is set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<(), VMError> {
    let program = Program::from_file(&cli.program)?;
    log::info!(
        "Running {} ({} bytes, {} cells)",
        cli.program.display(),
        program.len(),
        cli.cell_count
    );

    let mut builder = VMBuilder::new()
        .set_program(program)
        .set_cell_count(Some(cli.cell_count))
        .set_strict(cli.strict)
        .set_precompute_jumps(cli.precompute_jumps)
        .set_report_state(cli.dump_tape);

    if let Some(path) = &cli.output {
        let file = File::create(path).map_err(|source| LoadError::OutputFile {
            path: path.clone(),
            source,
        })?;
        builder = builder.set_output(BufWriter::new(file));
    }

    let mut vm = builder.build()?;

    let final_state = if cli.trace {
        let mut steps = vm.steps();
        for state in steps.by_ref() {
            let state = state?;
            // Only the eight instructions are worth a line
            if state
                .last_instruction()
                .and_then(|instruction| instruction.raw_instruction())
                .is_some()
            {
                eprintln!("{}", state);
            }
        }
        steps.final_state().filter(|_| cli.dump_tape).cloned()
    } else {
        vm.interpret()?
    };

    if let Some(final_state) = final_state {
        if cli.ascii {
            eprint!("{:#}", final_state);
        } else {
            eprint!("{}", final_state);
        }
    }

    Ok(())
}
