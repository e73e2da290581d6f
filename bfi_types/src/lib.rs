//! # Program Loading and Machine State
//!
//! Everything the interpreter needs before it starts running: the loaded
//! program bytes, the memory tape, how each byte is classified, bracket
//! matching, and the snapshots the VM reports while it runs.

// Classifies program bytes and carries their source positions.
pub mod instructions;

// Errors raised while loading a program or allocating a tape.
pub mod load_error;

// Reading programs from files, readers or byte buffers.
pub mod program;

// The fixed-size memory tape and its data pointer.
pub mod tape;

// Scanning and precomputed bracket matching.
pub mod brackets;

// Snapshots of the virtual machine during and after execution.
pub mod state;

pub use load_error::LoadError;
pub use program::Program;
pub use tape::{Tape, DEFAULT_CELL_COUNT};
