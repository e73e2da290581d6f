use crate::load_error::LoadError;
use core::fmt;
use std::num::NonZeroUsize;

/// Number of cells used when none is configured (2^14).
pub const DEFAULT_CELL_COUNT: usize = 16384;

/// The memory tape together with the data pointer (head) into it.
///
/// The tape never changes size once allocated, and the head wraps around at
/// either end: moving right from the last cell lands on cell 0, and moving
/// left from cell 0 lands on the last cell. Cell arithmetic wraps within
/// 0..=255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    head: usize,
}

impl Tape {
    /// Allocates a zeroed tape of `cell_count` cells with the head on cell 0.
    pub fn new(cell_count: NonZeroUsize) -> Result<Self, LoadError> {
        let requested = cell_count.get();
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(requested)
            .map_err(|_| LoadError::Allocation {
                what: "tape",
                requested,
            })?;
        cells.resize(requested, 0);
        Ok(Tape { cells, head: 0 })
    }

    /// Wraps existing cell values as a tape, None if `cells` is empty.
    pub fn from_cells(cells: Vec<u8>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Tape { cells, head: 0 })
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Value of the cell under the head.
    pub fn current(&self) -> u8 {
        self.cells[self.head]
    }

    pub fn set_current(&mut self, value: u8) {
        self.cells[self.head] = value;
    }

    pub fn move_right(&mut self) {
        self.head = if self.head + 1 == self.cells.len() {
            0
        } else {
            self.head + 1
        };
    }

    pub fn move_left(&mut self) {
        self.head = match self.head {
            0 => self.cells.len() - 1,
            head => head - 1,
        };
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.head];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.head];
        *cell = cell.wrapping_sub(1);
    }

    /// Index and value of every cell that isn't zero, in tape order.
    pub fn non_zero_cells(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(|(index, &value)| (index, value))
    }
}

impl Default for Tape {
    fn default() -> Self {
        Tape {
            cells: vec![0; DEFAULT_CELL_COUNT],
            head: 0,
        }
    }
}

/// Lists the non-zero cells as `[index, value]` pairs.
///
/// The alternate form (`{:#}`) shows each value as a quoted character
/// instead, escaping anything that isn't printable ASCII.
impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_chars = f.alternate();
        let non_zero_cells_str = self
            .non_zero_cells()
            .map(|(index, value)| {
                if as_chars {
                    format!("[{}, '{}']", index, value.escape_ascii())
                } else {
                    format!("[{}, {}]", index, value)
                }
            })
            .collect::<Vec<String>>()
            .join(",");
        write!(f, "{}", non_zero_cells_str)
    }
}
