use std::{num::NonZeroUsize, path::PathBuf};

use clap::{ArgAction, Parser};

/// Handle CLI arguments for bfi
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// The Brainfuck program to execute
    #[clap(name = "PROGRAM")]
    pub program: PathBuf,

    /// Specifies the number of cells in the tape.
    ///
    /// The data pointer wraps around at either end of the tape.
    #[arg(short, long, default_value = "16384")]
    pub cell_count: NonZeroUsize,

    /// Fail on any byte that is neither whitespace nor an instruction
    #[clap(short, long)]
    pub strict: bool,

    /// Write program output to this file instead of stdout
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Match all brackets before running, rejecting unbalanced programs up front
    #[clap(short, long)]
    pub precompute_jumps: bool,

    /// Print the state after every executed instruction to stderr
    #[clap(short, long)]
    pub trace: bool,

    /// Print the non-zero cells of the final tape to stderr
    #[clap(short, long)]
    pub dump_tape: bool,

    /// Show dumped cells as characters rather than numbers
    #[clap(short = 'a', long, requires = "dump_tape")]
    pub ascii: bool,

    /// Log more; repeat for more detail
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
