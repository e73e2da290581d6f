//! Provides a builder for creating instances of the BrainfuckVM struct.
use crate::{vm::BrainfuckVM, vm_error::VMError};
use bfi_types::{Program, Tape, DEFAULT_CELL_COUNT};
use std::{
    io::{self, Read, Write},
    num::NonZeroUsize,
    path::PathBuf,
};

/// Main builder object. Creates a BrainfuckVM according to various configs.
///
/// Anything left unset falls back to a default: stdin and stdout for I/O, a
/// tape of 16384 cells, lenient mode, bracket scanning and no state reporting.
///
/// # Examples
///
/// Program from a string
///
/// ```rust
/// use bfi_interp::vm_builder::VMBuilder;
/// # use std::io::Cursor;
///
/// let program_string = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.";
///
/// let mut output = Vec::new();
/// let mut vm = VMBuilder::new()
///     .set_program_reader(Cursor::new(program_string))
///     .set_output(&mut output)
///     .build()
///     .expect("Failed!");
/// vm.interpret().expect("Failed!");
/// drop(vm);
/// assert_eq!(output, b"Hello");
/// ```
///
/// Setting more interesting parameters
///
/// ```rust
/// use bfi_interp::vm_builder::VMBuilder;
/// use bfi_types::Program;
/// # use core::num::NonZeroUsize;
///
/// let cell_count = NonZeroUsize::new(1111);
/// let vm = VMBuilder::new()
///     .set_program(Program::from_bytes("+[-]"))
///     .set_cell_count(cell_count)
///     .set_strict(true)
///     .set_precompute_jumps(true)
///     .set_report_state(true)
///     .build()
///     .expect("Failed!");
/// assert_eq!(vm.tape().len(), 1111);
/// ```
#[derive(Default)]
pub struct VMBuilder<'a> {
    cell_count: Option<NonZeroUsize>,
    tape: Option<Tape>,
    strict: Option<bool>,
    precompute_jumps: Option<bool>,
    input_reader: Option<Box<dyn Read + 'a>>,
    output_writer: Option<Box<dyn Write + 'a>>,
    program: Option<Program>,
    program_file: Option<PathBuf>,
    program_reader: Option<Box<dyn Read + 'a>>,
    report_state: Option<bool>,
}

impl<'a> VMBuilder<'a> {
    /// Creates a new instance of `VMBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the VM to use a custom input stream.
    pub fn set_input<R>(mut self, input: R) -> Self
    where
        R: Read + 'a,
    {
        self.input_reader = Some(Box::new(input));
        self
    }

    /// Sets a custom output stream for the VM.
    pub fn set_output<W>(mut self, output: W) -> Self
    where
        W: Write + 'a,
    {
        self.output_writer = Some(Box::new(output));
        self
    }

    /// Uses an already loaded program.
    pub fn set_program(mut self, program: Program) -> Self {
        self.program = Some(program);
        self
    }

    /// Sets a file path to read the program from
    pub fn set_program_file(mut self, filepath: PathBuf) -> Self {
        self.program_file = Some(filepath);
        self
    }

    /// Loads a program from a reader.
    pub fn set_program_reader<T>(mut self, reader: T) -> Self
    where
        T: Read + 'a,
    {
        self.program_reader = Some(Box::new(reader));
        self
    }

    /// Determines the number of cells (memory size) the VM should initialize with.
    pub fn set_cell_count(mut self, cell_count: Option<NonZeroUsize>) -> Self {
        match cell_count {
            Some(count) => self.cell_count = Some(count),
            None => {
                log::info!("Using default cell_count of {}", DEFAULT_CELL_COUNT);
                self.cell_count = None;
            }
        }
        self
    }

    /// Hands the VM a tape that is already allocated. Takes precedence over the cell count.
    pub fn set_tape(mut self, tape: Tape) -> Self {
        self.tape = Some(tape);
        self
    }

    /// In strict mode any byte that is neither whitespace nor an instruction stops the run.
    pub fn set_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Matches all brackets before running instead of scanning for them on each jump.
    pub fn set_precompute_jumps(mut self, precompute_jumps: bool) -> Self {
        self.precompute_jumps = Some(precompute_jumps);
        self
    }

    /// Enables or disables returning the final state when the program finishes.
    pub fn set_report_state(mut self, report_state: bool) -> Self {
        self.report_state = Some(report_state);
        self
    }

    /// Builds and returns a `BrainfuckVM` instance based on the configured options.
    pub fn build(self) -> Result<BrainfuckVM<'a>, VMError> {
        // Try the loaded program first, then the reader, then the file
        let program = match (self.program, self.program_reader, self.program_file) {
            (Some(program), _, _) => program,
            (None, Some(reader), _) => Program::new(reader)?,
            (None, None, Some(program_file)) => Program::from_file(program_file)?,
            (None, None, None) => {
                return Err(VMError::BuilderError {
                    reason: "Program must be set by using set_program, set_program_reader or \
                             set_program_file"
                        .to_string(),
                })
            }
        };

        // Default IO to use stdin and stdout
        let input_reader: Box<dyn Read + 'a> = match self.input_reader {
            Some(reader) => reader,
            None => {
                log::info!("Using default stdin");
                Box::new(io::stdin().lock())
            }
        };

        let output_writer: Box<dyn Write + 'a> = match self.output_writer {
            Some(writer) => writer,
            None => {
                log::info!("Using default stdout");
                Box::new(io::stdout().lock())
            }
        };

        let tape = match (self.tape, self.cell_count) {
            (Some(tape), cell_count) => {
                if cell_count.is_some() {
                    log::warn!("Ignoring cell count, a tape of {} cells was given", tape.len());
                }
                tape
            }
            (None, Some(cell_count)) => Tape::new(cell_count)?,
            (None, None) => Tape::default(),
        };

        let strict = self.strict.unwrap_or_else(|| {
            log::info!("Using default lenient mode");
            false
        });

        // If set, interpret will return the final state including a copy of the tape.
        let report_state = self.report_state.unwrap_or(false);

        let mut vm = BrainfuckVM::new(
            program,
            tape,
            input_reader,
            output_writer,
            strict,
            report_state,
        );

        if self.precompute_jumps.unwrap_or(false) {
            vm.precompute_jumps()?;
        }

        Ok(vm)
    }
}
