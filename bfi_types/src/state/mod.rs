use crate::instructions::HumanReadableInstruction;
use crate::tape::Tape;
use core::fmt;

// Extends VMState with a snapshot of the VM's tape at the end of program execution,
// providing a complete picture of the final program state
#[derive(PartialEq, Debug, Clone)]
pub struct VMStateFinal {
    state: VMState,
    tape: Tape,
}

impl VMStateFinal {
    pub fn new(state: VMState, tape: Tape) -> Self {
        VMStateFinal { state, tape }
    }

    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }
}

impl fmt::Display for VMStateFinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}\nTape:\n{:#}\n", self.state, self.tape)
        } else {
            write!(f, "{}\nTape:\n{}\n", self.state, self.tape)
        }
    }
}

// Represents the state of the VM right after one step, useful for tracing
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct VMState {
    cell_value: u8,
    head: usize,
    instruction_index: usize,
    last_instruction: Option<HumanReadableInstruction>,
    instructions_processed: usize,
}

impl VMState {
    /// `last_instruction` is None for the snapshot taken at end of program.
    pub fn new(
        cell_value: u8,
        head: usize,
        instruction_index: usize,
        last_instruction: Option<HumanReadableInstruction>,
        instructions_processed: usize,
    ) -> Self {
        VMState {
            cell_value,
            head,
            instruction_index,
            last_instruction,
            instructions_processed,
        }
    }

    pub fn cell_value(&self) -> u8 {
        self.cell_value
    }

    pub fn head(&self) -> usize {
        self.head
    }

    /// Where the instruction pointer ended up after the step.
    pub fn instruction_index(&self) -> usize {
        self.instruction_index
    }

    pub fn last_instruction(&self) -> Option<HumanReadableInstruction> {
        self.last_instruction
    }

    pub fn instructions_processed(&self) -> usize {
        self.instructions_processed
    }
}

impl fmt::Display for VMState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_instruction {
            Some(instruction) => write!(
                f,
                "{:<28} ip={:<6} ptr={:<6} cell={:<3} processed={}",
                instruction.to_string(),
                self.instruction_index,
                self.head,
                self.cell_value,
                self.instructions_processed
            ),
            None => write!(f, "Instructions processed: {}", self.instructions_processed),
        }
    }
}
