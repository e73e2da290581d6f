use core::fmt;
use std::io;

use bfi_types::instructions::HumanReadableInstruction;
use bfi_types::LoadError;
use thiserror::Error;

/// How a run ended. Everything other than `Success` maps to process exit code 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    MalformedInstruction,
    UnmatchedOpenBracket,
    UnmatchedCloseBracket,
    IoFailure,
    AllocationFailure,
    ConfigurationError,
}

impl ExitStatus {
    pub fn is_success(&self) -> bool {
        *self == ExitStatus::Success
    }

    /// Process exit code for this status.
    pub fn code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExitStatus::Success => "Success",
            ExitStatus::MalformedInstruction => "MalformedInstruction",
            ExitStatus::UnmatchedOpenBracket => "UnmatchedOpenBracket",
            ExitStatus::UnmatchedCloseBracket => "UnmatchedCloseBracket",
            ExitStatus::IoFailure => "IOFailure",
            ExitStatus::AllocationFailure => "AllocationFailure",
            ExitStatus::ConfigurationError => "ConfigurationError",
        };
        write!(f, "{}", name)
    }
}

impl<T> From<&Result<T, VMError>> for ExitStatus {
    fn from(result: &Result<T, VMError>) -> Self {
        match result {
            Ok(_) => ExitStatus::Success,
            Err(e) => e.status(),
        }
    }
}

/// Everything that can stop a VM from being built or from finishing a run.
///
/// Errors raised while running carry the instruction they happened at.
#[derive(Debug, Error)]
pub enum VMError {
    // Only raised in strict mode
    #[error(
        "malformed instruction {} at line {}, column {} (index {})",
        .instruction.describe_byte(),
        .instruction.line(),
        .instruction.column(),
        .instruction.index()
    )]
    MalformedInstruction {
        instruction: HumanReadableInstruction,
    },
    #[error(
        "unmatched '[' at line {}, column {} (index {})",
        .instruction.line(),
        .instruction.column(),
        .instruction.index()
    )]
    UnmatchedOpenBracket {
        instruction: HumanReadableInstruction,
    },
    #[error(
        "unmatched ']' at line {}, column {} (index {})",
        .instruction.line(),
        .instruction.column(),
        .instruction.index()
    )]
    UnmatchedCloseBracket {
        instruction: HumanReadableInstruction,
    },
    #[error("I/O error at {instruction}: {source}")]
    IOError {
        instruction: HumanReadableInstruction,
        #[source]
        source: io::Error,
    },
    // The final flush once the program has run off the end
    #[error("I/O error flushing output at end of program: {source}")]
    FlushError {
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
    // Errors occurring during the construction of the VM, typically due to misconfiguration
    #[error("Builder error: {reason}")]
    BuilderError { reason: String },
}

impl VMError {
    pub fn status(&self) -> ExitStatus {
        match self {
            VMError::MalformedInstruction { .. } => ExitStatus::MalformedInstruction,
            VMError::UnmatchedOpenBracket { .. } => ExitStatus::UnmatchedOpenBracket,
            VMError::UnmatchedCloseBracket { .. } => ExitStatus::UnmatchedCloseBracket,
            VMError::IOError { .. } | VMError::FlushError { .. } => ExitStatus::IoFailure,
            VMError::Load(LoadError::Allocation { .. }) => ExitStatus::AllocationFailure,
            VMError::Load(_) => ExitStatus::IoFailure,
            VMError::BuilderError { .. } => ExitStatus::ConfigurationError,
        }
    }

    /// The instruction the error was raised at, if it happened while running.
    pub fn instruction(&self) -> Option<HumanReadableInstruction> {
        match self {
            VMError::MalformedInstruction { instruction }
            | VMError::UnmatchedOpenBracket { instruction }
            | VMError::UnmatchedCloseBracket { instruction }
            | VMError::IOError { instruction, .. } => Some(*instruction),
            VMError::FlushError { .. } | VMError::Load(_) | VMError::BuilderError { .. } => None,
        }
    }
}
