use std::io::{self, Read, Seek, SeekFrom, Write};
use tempfile::NamedTempFile;

pub const TEST_FILE_CONTENT: &str = "+[-[<<[+[--->]-[<<<]]]>>>-]";
// writeln! does add an extra newline character at the end, which is not
// counted here since only the instruction bytes are interesting
pub const TEST_FILE_NUM_INSTRUCTIONS: usize = TEST_FILE_CONTENT.len();

/// Produces "Hello" with a tape of at least 7 cells.
pub const HELLO_PROGRAM: &str =
    "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.";
pub const HELLO_OUTPUT: &[u8] = b"Hello";

pub struct TestFile {
    file: NamedTempFile,
}

impl TestFile {
    pub fn new() -> io::Result<Self> {
        Self::with_content(TEST_FILE_CONTENT)
    }

    pub fn with_content(content: &str) -> io::Result<Self> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", content)?;

        // Seek to the start of the file after writing
        file.seek(SeekFrom::Start(0))?;
        Ok(TestFile { file })
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl Read for TestFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // Need to borrow it mutably to perform reads
        self.file.as_file_mut().read(buf)
    }
}

pub struct NullWriter;

impl Write for NullWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Pretend everything's okay and we wrote the whole buffer.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Nothing to flush, so just say it worked.
        Ok(())
    }
}

/// A writer that refuses every write, for exercising I/O failures.
pub struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Accepts every write but can never flush, like a full disk behind a buffer.
pub struct UnflushableWriter;

impl Write for UnflushableWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}
