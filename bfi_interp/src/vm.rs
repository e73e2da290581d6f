use crate::vm_error::VMError;
use crate::vm_iterator::VMIterator;
use bfi_types::{
    brackets::{BracketSide, JumpTable},
    instructions::{ByteClass, HumanReadableInstruction, RawInstruction},
    state::{VMState, VMStateFinal},
    Program, Tape,
};
use std::io::{self, Read, Write};

// Represents the VM capable of interpreting Brainfuck programs. It owns everything a run
// touches: the program, the tape (with its data pointer), the instruction pointer and the
// input/output streams, so every mutation is visible for the rest of the run.
pub struct BrainfuckVM<'a> {
    program: Program,
    tape: Tape,
    instruction_index: usize,
    input_reader: Box<dyn Read + 'a>,
    output_writer: Box<dyn Write + 'a>,
    strict: bool,
    // None means brackets are matched by scanning when a jump is taken
    jump_table: Option<JumpTable>,
    instructions_processed: usize,
    report_state: bool,
}

impl<'a> BrainfuckVM<'a> {
    // Constructs a new VM instance with specified settings
    pub fn new(
        program: Program,
        tape: Tape,
        input_reader: Box<dyn Read + 'a>,
        output_writer: Box<dyn Write + 'a>,
        strict: bool,
        report_state: bool,
    ) -> Self {
        BrainfuckVM {
            program,
            tape,
            instruction_index: 0,
            input_reader,
            output_writer,
            strict,
            jump_table: None,
            instructions_processed: 0,
            report_state,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Hands the tape back once the VM is done with it.
    pub fn into_tape(self) -> Tape {
        self.tape
    }

    pub fn instruction_index(&self) -> usize {
        self.instruction_index
    }

    pub fn instructions_processed(&self) -> usize {
        self.instructions_processed
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn has_jump_table(&self) -> bool {
        self.jump_table.is_some()
    }

    /// Matches every bracket in the program up front instead of scanning on
    /// each jump.
    ///
    /// This also validates the brackets before anything runs: a program with
    /// an unmatched bracket anywhere fails here, even if execution would
    /// never have jumped across it.
    pub fn precompute_jumps(&mut self) -> Result<(), VMError> {
        let table = JumpTable::build(self.program.instructions()).map_err(|unmatched| {
            unmatched_bracket_error(self.program.unmatched_position(unmatched), unmatched.side)
        })?;
        self.jump_table = Some(table);
        Ok(())
    }

    fn matching_close(
        &self,
        hr_instruction: HumanReadableInstruction,
    ) -> Result<usize, VMError> {
        let position = match &self.jump_table {
            Some(table) => table.get(hr_instruction.index()),
            None => self.program.matching_close(hr_instruction.index()),
        };
        position.ok_or_else(|| unmatched_bracket_error(hr_instruction, BracketSide::Open))
    }

    fn matching_open(
        &self,
        hr_instruction: HumanReadableInstruction,
    ) -> Result<usize, VMError> {
        let position = match &self.jump_table {
            Some(table) => table.get(hr_instruction.index()),
            None => self.program.matching_open(hr_instruction.index()),
        };
        position.ok_or_else(|| unmatched_bracket_error(hr_instruction, BracketSide::Close))
    }

    fn process_instruction(
        &mut self,
        hr_instruction: HumanReadableInstruction,
    ) -> Result<(), VMError> {
        // Most of the time, we just move forward by one. Only when there is a conditional
        // jump will it be different.
        let mut next_index = self.instruction_index + 1;

        match hr_instruction.class() {
            ByteClass::Whitespace => {}
            ByteClass::Unrecognised(_) if self.strict => {
                log::error!("Malformed instruction at {}", hr_instruction);
                return Err(VMError::MalformedInstruction {
                    instruction: hr_instruction,
                });
            }
            ByteClass::Unrecognised(_) => {
                log::debug!("Ignoring {}", hr_instruction);
            }
            ByteClass::Instruction(raw_instruction) => {
                log::debug!("Processing instruction: {}", hr_instruction);
                match raw_instruction {
                    RawInstruction::IncrementPointer => self.tape.move_right(),
                    RawInstruction::DecrementPointer => self.tape.move_left(),
                    RawInstruction::IncrementByte => self.tape.increment(),
                    RawInstruction::DecrementByte => self.tape.decrement(),
                    RawInstruction::OutputByte => self.write_value(hr_instruction)?,
                    RawInstruction::InputByte => self.read_value(hr_instruction)?,
                    RawInstruction::ConditionalForward => {
                        if self.tape.current() == 0 {
                            next_index = self.matching_close(hr_instruction)? + 1;
                            log::debug!("Jumping forward to {}", next_index);
                        }
                    }
                    RawInstruction::ConditionalBackward => {
                        if self.tape.current() != 0 {
                            next_index = self.matching_open(hr_instruction)? + 1;
                            log::debug!("Jumping back to {}", next_index);
                        }
                    }
                }
                // Track number of instructions processed
                self.instructions_processed += 1;
            }
        }

        // Move to the next instruction
        self.instruction_index = next_index;

        Ok(())
    }

    // Executes the byte under the instruction pointer. None once past the end of the program.
    fn step(&mut self) -> Result<Option<HumanReadableInstruction>, VMError> {
        let Some(hr_instruction) = self.program.instruction(self.instruction_index) else {
            self.output_writer
                .flush()
                .map_err(|source| VMError::FlushError { source })?;
            return Ok(None);
        };

        if let Err(e) = self.process_instruction(hr_instruction) {
            // Whatever was written before the failure still goes out, best effort
            let _ = self.output_writer.flush();
            return Err(e);
        }
        Ok(Some(hr_instruction))
    }

    /// Executes a single byte of the program and reports the state after it.
    ///
    /// Whitespace and ignored bytes are a step of their own but don't count
    /// towards `instructions_processed`. Returns `Ok(None)` once the program
    /// has run off the end.
    pub fn interpret_step(&mut self) -> Result<Option<VMState>, VMError> {
        Ok(self.step()?.map(|hr_instruction| self.state(Some(hr_instruction))))
    }

    /// Runs the entire program to completion or until an error occurs.
    ///
    /// When state reporting is on, the final state (including a copy of the
    /// tape) is returned.
    pub fn interpret(&mut self) -> Result<Option<VMStateFinal>, VMError> {
        while self.step()?.is_some() {}

        log::debug!(
            "Finished after {} instructions",
            self.instructions_processed
        );
        // Only do this if reporting state, since tape clone is expensive
        Ok(self.report_state.then(|| self.final_state()))
    }

    /// Returns an iterator that allows stepping through the program execution
    pub fn steps(&mut self) -> VMIterator<'_, 'a> {
        VMIterator::new(self)
    }

    fn state(&self, last_instruction: Option<HumanReadableInstruction>) -> VMState {
        VMState::new(
            self.tape.current(),
            self.tape.head(),
            self.instruction_index,
            last_instruction,
            self.instructions_processed,
        )
    }

    /// Snapshot of the whole machine, tape included.
    pub fn final_state(&self) -> VMStateFinal {
        VMStateFinal::new(self.state(None), self.tape.clone())
    }

    /// Reads one byte into the current cell. At end of input the cell is set to 0.
    fn read_value(&mut self, hr_instruction: HumanReadableInstruction) -> Result<(), VMError> {
        // Anything already written should be visible before blocking on input
        self.output_writer
            .flush()
            .map_err(|source| VMError::IOError {
                instruction: hr_instruction,
                source,
            })?;

        let mut buffer = [0u8; 1];
        let value = loop {
            match self.input_reader.read(&mut buffer) {
                Ok(0) => {
                    log::debug!("End of input at {}, storing 0", hr_instruction);
                    break 0;
                }
                Ok(_) => break buffer[0],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(VMError::IOError {
                        instruction: hr_instruction,
                        source,
                    })
                }
            }
        };

        self.tape.set_current(value);
        Ok(())
    }

    fn write_value(&mut self, hr_instruction: HumanReadableInstruction) -> Result<(), VMError> {
        self.output_writer
            .write_all(&[self.tape.current()])
            .map_err(|source| VMError::IOError {
                instruction: hr_instruction,
                source,
            })
    }
}

fn unmatched_bracket_error(instruction: HumanReadableInstruction, side: BracketSide) -> VMError {
    log::error!("Unmatched bracket {} at {}", side, instruction);
    match side {
        BracketSide::Open => VMError::UnmatchedOpenBracket { instruction },
        BracketSide::Close => VMError::UnmatchedCloseBracket { instruction },
    }
}
