use crate::brackets::{self, UnmatchedBracket};
use crate::instructions::HumanReadableInstruction;
use crate::load_error::LoadError;
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

/// A loaded program: the raw instruction bytes, immutable once built.
///
/// Every byte is kept, whitespace and comments included, so the interpreter
/// can decide what to do with bytes it doesn't recognise and so error
/// positions point at the real source. The start of each line is indexed at
/// load time to turn a byte index back into a line and column.
#[derive(Debug, Clone)]
pub struct Program {
    name: Option<PathBuf>,
    instructions: Vec<u8>,
    line_starts: Vec<usize>,
}

impl Program {
    /// Reads a whole program from any reader.
    pub fn new<R: Read>(mut reader: R) -> Result<Self, LoadError> {
        let mut instructions = Vec::new();
        reader.read_to_end(&mut instructions)?;
        Ok(Self::from_bytes(instructions))
    }

    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B) -> Self {
        let instructions = bytes.into();
        let line_starts = std::iter::once(0)
            .chain(
                instructions
                    .iter()
                    .enumerate()
                    .filter(|&(_, &byte)| byte == b'\n')
                    .map(|(index, _)| index + 1),
            )
            .collect();
        Program {
            name: None,
            instructions,
            line_starts,
        }
    }

    /// Loads a program from a file.
    ///
    /// The instruction buffer is sized from the file's metadata up front and
    /// reserved fallibly, so a file too large to hold is reported as
    /// [`LoadError::Allocation`] rather than aborting the process.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file_error = |source: io::Error| LoadError::File {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(file_error)?;
        let size = file.metadata().map_err(file_error)?.len();
        let size = usize::try_from(size).unwrap_or(usize::MAX);

        let mut instructions = Vec::new();
        instructions
            .try_reserve_exact(size)
            .map_err(|_| LoadError::Allocation {
                what: "instruction buffer",
                requested: size,
            })?;
        file.read_to_end(&mut instructions).map_err(file_error)?;
        log::debug!("Loaded {} bytes from {}", instructions.len(), path.display());

        let mut program = Self::from_bytes(instructions);
        program.name = Some(path.to_path_buf());
        Ok(program)
    }

    /// Where the program was loaded from, if it came from a file.
    pub fn name(&self) -> Option<&Path> {
        self.name.as_deref()
    }

    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The byte at `index` along with its line and column.
    pub fn instruction(&self, index: usize) -> Option<HumanReadableInstruction> {
        let byte = *self.instructions.get(index)?;
        Some(self.locate(byte, index))
    }

    /// Where a bracket reported by [`JumpTable::build`](brackets::JumpTable::build)
    /// sits in the source.
    pub fn unmatched_position(&self, unmatched: UnmatchedBracket) -> HumanReadableInstruction {
        self.locate(unmatched.side.byte(), unmatched.index)
    }

    fn locate(&self, byte: u8, index: usize) -> HumanReadableInstruction {
        // line_starts[0] is always 0, so at least one start is <= index
        let line = self.line_starts.partition_point(|&start| start <= index) - 1;
        let column = index - self.line_starts[line];
        HumanReadableInstruction::new(byte, line, column, index)
    }

    /// Index of the `]` closing the `[` at `open`, by scanning forward.
    pub fn matching_close(&self, open: usize) -> Option<usize> {
        brackets::find_matching_close(&self.instructions, open)
    }

    /// Index of the `[` opening the `]` at `close`, by scanning backward.
    pub fn matching_open(&self, close: usize) -> Option<usize> {
        brackets::find_matching_open(&self.instructions, close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::{ByteClass, RawInstruction};
    use bfi_test_utils::{TestFile, TEST_FILE_CONTENT, TEST_FILE_NUM_INSTRUCTIONS};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_data() -> Result<(), Box<dyn std::error::Error>> {
        let program = Program::new(TestFile::new()?)?;

        // writeln! adds the trailing newline
        assert_eq!(program.len(), TEST_FILE_NUM_INSTRUCTIONS + 1);
        assert_eq!(
            &program.instructions()[..TEST_FILE_NUM_INSTRUCTIONS],
            TEST_FILE_CONTENT.as_bytes()
        );
        assert!(program.name().is_none());

        // "+[-[<<[+[--->]-[<<<]]]>>>-]"
        let all_instructions = [
            RawInstruction::IncrementByte,       // +
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementByte,       // -
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementPointer,    // <
            RawInstruction::DecrementPointer,    // <
            RawInstruction::ConditionalForward,  // [
            RawInstruction::IncrementByte,       // +
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementByte,       // -
            RawInstruction::DecrementByte,       // -
            RawInstruction::DecrementByte,       // -
            RawInstruction::IncrementPointer,    // >
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::DecrementByte,       // -
            RawInstruction::ConditionalForward,  // [
            RawInstruction::DecrementPointer,    // <
            RawInstruction::DecrementPointer,    // <
            RawInstruction::DecrementPointer,    // <
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::ConditionalBackward, // ]
            RawInstruction::IncrementPointer,    // >
            RawInstruction::IncrementPointer,    // >
            RawInstruction::IncrementPointer,    // >
            RawInstruction::DecrementByte,       // -
            RawInstruction::ConditionalBackward, // ]
        ];

        for (i, expected) in all_instructions.iter().enumerate() {
            let instruction = program.instruction(i).ok_or("missing instruction")?;
            assert_eq!(instruction.raw_instruction(), Some(*expected));
            assert_eq!(instruction.line(), 1);
            assert_eq!(instruction.column(), i + 1);
            assert_eq!(instruction.index(), i);
        }

        let newline = program
            .instruction(TEST_FILE_NUM_INSTRUCTIONS)
            .ok_or("missing newline")?;
        assert_eq!(newline.class(), ByteClass::Whitespace);
        assert!(program.instruction(program.len()).is_none());

        Ok(())
    }

    #[test]
    fn test_line_and_column() {
        let program = Program::from_bytes("+\n\n  x-\n");
        let x = program.instruction(5).unwrap();
        assert_eq!(x.byte(), b'x');
        assert_eq!((x.line(), x.column()), (3, 3));

        let minus = program.instruction(6).unwrap();
        assert_eq!((minus.line(), minus.column()), (3, 4));

        // The newline itself belongs to the line it ends
        let first_newline = program.instruction(1).unwrap();
        assert_eq!((first_newline.line(), first_newline.column()), (1, 2));
    }

    #[test]
    fn test_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        write!(file, "++[->+<]")?;

        let program = Program::from_file(file.path())?;
        assert_eq!(program.instructions(), b"++[->+<]");
        assert_eq!(program.name(), Some(file.path()));
        assert_eq!(program.matching_close(2), Some(7));
        assert_eq!(program.matching_open(7), Some(2));
        Ok(())
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bf");

        match Program::from_file(&missing) {
            Err(LoadError::File { path, source }) => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("Expected a file error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_program() {
        let program = Program::from_bytes(Vec::new());
        assert!(program.is_empty());
        assert!(program.instruction(0).is_none());
    }

    #[test]
    fn test_unmatched_position() {
        let program = Program::from_bytes("+\n [+\n");
        let unmatched = brackets::JumpTable::build(program.instructions()).unwrap_err();
        let position = program.unmatched_position(unmatched);
        assert_eq!(position, program.instruction(3).unwrap());
        assert_eq!(position.byte(), b'[');
        assert_eq!((position.line(), position.column()), (2, 2));
    }
}
