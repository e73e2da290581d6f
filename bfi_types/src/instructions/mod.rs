use core::fmt;

/// Enum for the raw instructions
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum RawInstruction {
    IncrementPointer,    // >
    DecrementPointer,    // <
    IncrementByte,       // +
    DecrementByte,       // -
    OutputByte,          // .
    InputByte,           // ,
    ConditionalForward,  // [
    ConditionalBackward, // ]
}

impl RawInstruction {
    /// RawInstruction from a program byte, None if the byte is not one of the eight symbols
    pub fn from_byte(byte: u8) -> Option<RawInstruction> {
        match byte {
            b'>' => Some(RawInstruction::IncrementPointer),
            b'<' => Some(RawInstruction::DecrementPointer),
            b'+' => Some(RawInstruction::IncrementByte),
            b'-' => Some(RawInstruction::DecrementByte),
            b'.' => Some(RawInstruction::OutputByte),
            b',' => Some(RawInstruction::InputByte),
            b'[' => Some(RawInstruction::ConditionalForward),
            b']' => Some(RawInstruction::ConditionalBackward),
            _ => None,
        }
    }

    /// The source symbol for this instruction
    pub fn symbol(&self) -> char {
        match self {
            RawInstruction::IncrementPointer => '>',
            RawInstruction::DecrementPointer => '<',
            RawInstruction::IncrementByte => '+',
            RawInstruction::DecrementByte => '-',
            RawInstruction::OutputByte => '.',
            RawInstruction::InputByte => ',',
            RawInstruction::ConditionalForward => '[',
            RawInstruction::ConditionalBackward => ']',
        }
    }
}

/// Corresponding display strings
impl fmt::Display for RawInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RawInstruction::IncrementPointer => "Increment Pointer",
            RawInstruction::DecrementPointer => "Decrement Pointer",
            RawInstruction::IncrementByte => "Increment Byte",
            RawInstruction::DecrementByte => "Decrement Byte",
            RawInstruction::OutputByte => "Output Byte",
            RawInstruction::InputByte => "Input Byte",
            RawInstruction::ConditionalForward => "Conditional Forward",
            RawInstruction::ConditionalBackward => "Conditional Backward",
        };
        write!(f, "{} ({})", name, self.symbol())
    }
}

/// What a single program byte means to the interpreter.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ByteClass {
    Instruction(RawInstruction),
    Whitespace,
    Unrecognised(u8),
}

impl ByteClass {
    pub fn of(byte: u8) -> ByteClass {
        if let Some(instruction) = RawInstruction::from_byte(byte) {
            return ByteClass::Instruction(instruction);
        }
        // Same set as C's isspace, so vertical tab counts too
        match byte {
            b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C => ByteClass::Whitespace,
            other => ByteClass::Unrecognised(other),
        }
    }
}

/// A program byte together with where it sits in the source: its index in the
/// instruction sequence plus a 1-based line and column.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HumanReadableInstruction {
    byte: u8,
    line: usize,
    column: usize,
    index: usize,
}

impl HumanReadableInstruction {
    /// `line` and `column` are zero based here and stored one based.
    pub(crate) fn new(byte: u8, line: usize, column: usize, index: usize) -> Self {
        HumanReadableInstruction {
            byte,
            line: line + 1,
            column: column + 1,
            index,
        }
    }

    pub fn byte(&self) -> u8 {
        self.byte
    }

    pub fn class(&self) -> ByteClass {
        ByteClass::of(self.byte)
    }

    pub fn raw_instruction(&self) -> Option<RawInstruction> {
        RawInstruction::from_byte(self.byte)
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The byte as it would be quoted in a diagnostic: `'x'`, or its hex value
    /// when it isn't printable.
    pub fn describe_byte(&self) -> String {
        if self.byte.is_ascii_graphic() {
            format!("'{}'", self.byte as char)
        } else {
            format!("byte 0x{:02x}", self.byte)
        }
    }
}

/// Nice display strings
impl fmt::Display for HumanReadableInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class() {
            ByteClass::Instruction(instruction) => {
                write!(f, "{}:{} {}", self.line, self.column, instruction)
            }
            ByteClass::Whitespace => write!(f, "{}:{} whitespace", self.line, self.column),
            ByteClass::Unrecognised(_) => {
                write!(f, "{}:{} {}", self.line, self.column, self.describe_byte())
            }
        }
    }
}
