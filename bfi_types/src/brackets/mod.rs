//! Bracket matching, either on demand by scanning or all at once up front.
//!
//! Both approaches only look at `[` and `]`; every other byte is skipped.

use core::fmt;

/// Which bracket of a pair was left without a partner.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum BracketSide {
    Open,
    Close,
}

impl fmt::Display for BracketSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketSide::Open => write!(f, "'['"),
            BracketSide::Close => write!(f, "']'"),
        }
    }
}

impl BracketSide {
    /// The byte for this side of a pair.
    pub fn byte(&self) -> u8 {
        match self {
            BracketSide::Open => b'[',
            BracketSide::Close => b']',
        }
    }
}

/// A bracket with no partner, found while building a [`JumpTable`].
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct UnmatchedBracket {
    pub index: usize,
    pub side: BracketSide,
}

/// Scans forward from the `[` at `open` for its partner, tracking nesting.
///
/// Returns `None` if the end of the program is reached first.
pub fn find_matching_close(instructions: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, &byte) in instructions.iter().enumerate().skip(open) {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Scans backward from the `]` at `close` for its partner, tracking nesting.
///
/// Returns `None` if the start of the program is reached first.
pub fn find_matching_open(instructions: &[u8], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, &byte) in instructions.get(..=close)?.iter().enumerate().rev() {
        match byte {
            b']' => depth += 1,
            b'[' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Matching bracket positions for a whole program, built in one pass.
#[derive(Debug, Clone)]
pub struct JumpTable {
    matching_brackets: Vec<Option<usize>>,
}

impl JumpTable {
    /// Pairs every bracket in `instructions` using a stack of open positions.
    ///
    /// A `]` with nothing to pop fails immediately. If `[`s are left over at
    /// the end, the innermost (last pushed) one is reported.
    pub fn build(instructions: &[u8]) -> Result<Self, UnmatchedBracket> {
        let mut matching_brackets = vec![None; instructions.len()];
        // Track the open brackets with a stack
        let mut open_brackets = Vec::new();

        for (index, &byte) in instructions.iter().enumerate() {
            match byte {
                b'[' => open_brackets.push(index),
                b']' => {
                    let open = open_brackets.pop().ok_or(UnmatchedBracket {
                        index,
                        side: BracketSide::Close,
                    })?;
                    // Set both brackets to point to each other
                    matching_brackets[open] = Some(index);
                    matching_brackets[index] = Some(open);
                }
                _ => {}
            }
        }

        if let Some(&index) = open_brackets.last() {
            return Err(UnmatchedBracket {
                index,
                side: BracketSide::Open,
            });
        }

        log::debug!(
            "Built jump table for {} brackets",
            matching_brackets.iter().flatten().count()
        );
        Ok(JumpTable { matching_brackets })
    }

    /// The partner of the bracket at `index`, None for any non-bracket position.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.matching_brackets.get(index).copied().flatten()
    }
}
