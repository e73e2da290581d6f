use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while materialising a program or a tape, before anything runs.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be opened, sized or read.
    #[error("failed to read program {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the program from a non-file reader failed.
    #[error("failed to read program: {0}")]
    Read(#[from] io::Error),

    /// The file program output should go to could not be created.
    #[error("failed to create output file {}: {source}", .path.display())]
    OutputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A buffer of the requested size could not be reserved.
    #[error("failed to allocate {requested} bytes for the {what}")]
    Allocation {
        what: &'static str,
        requested: usize,
    },
}
