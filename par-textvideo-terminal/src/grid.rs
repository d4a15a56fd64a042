//! The character grid: a fixed `ROWS x COLUMNS` matrix of cells.
//!
//! Dimensions never change after construction. All accessors are
//! bounds-checked and report [`GridError`] instead of panicking; a failed
//! write leaves the grid untouched.

use crate::error::GridError;
use par_textvideo_config::{Attribute, COLUMNS, Cell, FIRST_PRINTABLE, FillPattern, ROWS};

/// Number of cells in the grid.
pub const CELL_COUNT: usize = ROWS * COLUMNS;

/// Number of distinct printable codes cycled by [`FillPattern::Sweep`].
const SWEEP_CYCLE: usize = 95;

/// Row-major matrix of (glyph, attribute) cells.
#[derive(Clone, PartialEq, Eq)]
pub struct CharacterGrid {
    cells: [Cell; CELL_COUNT],
}

impl std::fmt::Debug for CharacterGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterGrid")
            .field("rows", &ROWS)
            .field("columns", &COLUMNS)
            .finish_non_exhaustive()
    }
}

impl Default for CharacterGrid {
    fn default() -> Self {
        Self::new(Attribute::WHITE_ON_BLUE)
    }
}

impl CharacterGrid {
    /// A grid of spaces in `attr`.
    pub fn new(attr: Attribute) -> Self {
        Self {
            cells: [Cell::blank(attr); CELL_COUNT],
        }
    }

    /// A grid filled with the given startup pattern.
    pub fn filled(pattern: FillPattern, attr: Attribute) -> Self {
        let mut grid = Self::new(attr);
        if pattern == FillPattern::Sweep {
            for (pos, cell) in grid.cells.iter_mut().enumerate() {
                cell.glyph = (pos % SWEEP_CYCLE) as u8 + FIRST_PRINTABLE;
            }
        }
        log::debug!("Character grid filled with {:?} in {:#04x}", pattern, attr.0);
        grid
    }

    pub const fn rows(&self) -> usize {
        ROWS
    }

    pub const fn columns(&self) -> usize {
        COLUMNS
    }

    #[inline]
    fn offset(row: usize, col: usize) -> Result<usize, GridError> {
        if row < ROWS && col < COLUMNS {
            Ok(row * COLUMNS + col)
        } else {
            Err(GridError::OutOfRange { row, col })
        }
    }

    /// Read the cell at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        Self::offset(row, col).map(|i| self.cells[i])
    }

    /// Write the cell at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GridError> {
        let i = Self::offset(row, col)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// All cells of one text row, left to right.
    #[inline]
    pub fn row(&self, row: usize) -> Result<&[Cell], GridError> {
        if row < ROWS {
            let start = row * COLUMNS;
            Ok(&self.cells[start..start + COLUMNS])
        } else {
            Err(GridError::RowOutOfRange { row })
        }
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Fill with spaces in `attr`.
    pub fn clear(&mut self, attr: Attribute) {
        self.fill(Cell::blank(attr));
    }

    /// Write the bytes of `text` starting at `(row, col)`, clipping at the end
    /// of the row. Returns the number of cells written.
    ///
    /// Bytes are stored as glyph codes unchanged; anything outside the
    /// printable range renders blank.
    pub fn write_str(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        attr: Attribute,
    ) -> Result<usize, GridError> {
        let start = Self::offset(row, col)?;
        let room = COLUMNS - col;
        let mut written = 0;
        for (cell, &glyph) in self.cells[start..start + room]
            .iter_mut()
            .zip(text.as_bytes())
        {
            *cell = Cell::new(glyph, attr);
            written += 1;
        }
        Ok(written)
    }

    /// Move every row up by one and blank the bottom row in `attr`.
    pub fn scroll_up(&mut self, attr: Attribute) {
        self.cells.copy_within(COLUMNS.., 0);
        self.cells[CELL_COUNT - COLUMNS..].fill(Cell::blank(attr));
    }

    /// Replace the contents with another grid's.
    pub fn copy_from(&mut self, other: &CharacterGrid) {
        self.cells.copy_from_slice(&other.cells);
    }
}
