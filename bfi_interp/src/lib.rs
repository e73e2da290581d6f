//! # Brainfuck Execution Engine
//!
//! Runs a loaded [`Program`] over a [`Tape`], one byte at a time. The tape's
//! head wraps around at both ends, cells wrap within a byte, and `,` stores 0
//! once input is exhausted. Brackets are matched by scanning when a jump is
//! taken, or from a table built before the run when asked to.
//!
//! Most callers go through [`vm_builder::VMBuilder`]; [`run`] covers the
//! simple case of one program, one tape and a pair of streams.

pub mod vm;
pub mod vm_builder;
pub mod vm_error;
pub mod vm_iterator;

pub use vm::BrainfuckVM;
pub use vm_builder::VMBuilder;
pub use vm_error::{ExitStatus, VMError};

use bfi_types::{Program, Tape};
use std::io::{Read, Write};

/// Runs `program` to completion over `tape`, returning the tape afterwards.
///
/// # Examples
///
/// ```
/// use bfi_interp::{run, ExitStatus};
/// use bfi_types::{Program, Tape};
///
/// let mut output = Vec::new();
/// let result = run(
///     Program::from_bytes("+++[>++++++++++<-]>+++."),
///     Tape::default(),
///     true,
///     std::io::empty(),
///     &mut output,
/// );
/// assert_eq!(ExitStatus::from(&result), ExitStatus::Success);
/// assert_eq!(output, b"!");
/// ```
pub fn run<'a, R, W>(
    program: Program,
    tape: Tape,
    strict: bool,
    input: R,
    output: W,
) -> Result<Tape, VMError>
where
    R: Read + 'a,
    W: Write + 'a,
{
    let mut vm = BrainfuckVM::new(
        program,
        tape,
        Box::new(input),
        Box::new(output),
        strict,
        false,
    );
    vm.interpret()?;
    Ok(vm.into_tape())
}
