#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state for Miam sessions.
//!
//! The [`Board`] owns one [`CellStack`] per coordinate and tracks at most one
//! selected cell. Every coordinate-taking operation is bounds-checked and
//! reports violations through [`BoardError`]; nothing is clamped or ignored.
//! Rule strategies mutate the board through these operations, while adapters
//! read it back through the side-effect-free [`query`] surface.

mod stack;

pub use stack::CellStack;

use miam_core::{BoardError, BoardSize, CellCoord, CellOrder, Entity};

/// Represents the authoritative board of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    stacks: Vec<CellStack>,
    selection: Option<CellCoord>,
}

impl Board {
    /// Creates an empty board with the provided fixed dimensions.
    pub fn new(size: BoardSize) -> Result<Self, BoardError> {
        if !size.is_positive() {
            return Err(BoardError::InvalidSize { size });
        }

        Ok(Self {
            size,
            stacks: vec![CellStack::new(); size.cell_count()],
            selection: None,
        })
    }

    /// Pure bounds predicate that accepts coordinates beyond any edge.
    ///
    /// Neighbor scans probe `x - 1` and `y - 1` at the border, so the signed
    /// inputs are reported as invalid instead of raising.
    #[must_use]
    pub fn is_valid_cell(&self, x: i64, y: i64) -> bool {
        is_valid_cell(self.size, x, y)
    }

    /// Places an entity on top of the addressed cell.
    pub fn push(&mut self, coord: CellCoord, entity: Entity) -> Result<(), BoardError> {
        self.stack_mut(coord)?.push(entity);
        Ok(())
    }

    /// Removes and returns the top entity of the addressed cell.
    pub fn pop(&mut self, coord: CellCoord) -> Result<Entity, BoardError> {
        self.stack_mut(coord)?
            .pop()
            .map_err(|source| BoardError::EmptyStack { coord, source })
    }

    /// Returns the top entity of the addressed cell without removing it.
    pub fn head(&self, coord: CellCoord) -> Result<&Entity, BoardError> {
        self.stack(coord)?
            .head()
            .map_err(|source| BoardError::EmptyStack { coord, source })
    }

    /// Reports whether the addressed cell holds no entity.
    pub fn is_empty(&self, coord: CellCoord) -> Result<bool, BoardError> {
        Ok(self.stack(coord)?.is_empty())
    }

    /// Number of entities stacked on the addressed cell.
    pub fn depth(&self, coord: CellCoord) -> Result<usize, BoardError> {
        Ok(self.stack(coord)?.len())
    }

    /// Iterates the addressed cell's entities from bottom to top.
    pub fn iter_cell(
        &self,
        coord: CellCoord,
    ) -> Result<std::slice::Iter<'_, Entity>, BoardError> {
        Ok(self.stack(coord)?.iter())
    }

    /// Moves the selection cursor to the addressed cell.
    ///
    /// The board does not check occupancy; strategies only select non-empty cells.
    pub fn select(&mut self, coord: CellCoord) -> Result<(), BoardError> {
        let _ = self.index(coord)?;
        self.selection = Some(coord);
        Ok(())
    }

    /// Clears the selection cursor.
    pub fn unselect(&mut self) {
        self.selection = None;
    }

    /// Currently selected cell, if any.
    #[must_use]
    pub const fn get_selection(&self) -> Option<CellCoord> {
        self.selection
    }

    /// Dimensions fixed at construction.
    #[must_use]
    pub const fn get_size(&self) -> BoardSize {
        self.size
    }

    /// Visits every coordinate in column-major order.
    #[must_use]
    pub fn iterate_cells(&self) -> Cells {
        self.cells_in(CellOrder::ColumnMajor)
    }

    /// Visits every coordinate in the requested order.
    #[must_use]
    pub fn cells_in(&self, order: CellOrder) -> Cells {
        Cells::new(self.size, order)
    }

    /// Number of cells holding at least one entity.
    #[must_use]
    pub fn population(&self) -> usize {
        self.stacks.iter().filter(|stack| !stack.is_empty()).count()
    }

    fn stack(&self, coord: CellCoord) -> Result<&CellStack, BoardError> {
        let index = self.index(coord)?;
        Ok(&self.stacks[index])
    }

    fn stack_mut(&mut self, coord: CellCoord) -> Result<&mut CellStack, BoardError> {
        let index = self.index(coord)?;
        Ok(&mut self.stacks[index])
    }

    fn index(&self, coord: CellCoord) -> Result<usize, BoardError> {
        cell_index(self.size, coord).ok_or(BoardError::OutOfBounds {
            coord,
            size: self.size,
        })
    }
}

/// Finite, restartable sequence of every coordinate of a board.
#[derive(Clone, Debug)]
pub struct Cells {
    size: BoardSize,
    order: CellOrder,
    next: usize,
    end: usize,
}

impl Cells {
    fn new(size: BoardSize, order: CellOrder) -> Self {
        Self {
            size,
            order,
            next: 0,
            end: size.cell_count(),
        }
    }

    fn coord_at(&self, position: usize) -> Option<CellCoord> {
        let (outer_len, inner_len) = match self.order {
            CellOrder::ColumnMajor => (self.size.size_x(), self.size.size_y()),
            CellOrder::RowMajor => (self.size.size_y(), self.size.size_x()),
        };
        let inner_len = usize::try_from(inner_len).ok()?;
        let outer = u32::try_from(position / inner_len).ok()?;
        let inner = u32::try_from(position % inner_len).ok()?;
        if outer >= outer_len {
            return None;
        }

        Some(match self.order {
            CellOrder::ColumnMajor => CellCoord::new(outer, inner),
            CellOrder::RowMajor => CellCoord::new(inner, outer),
        })
    }
}

impl Iterator for Cells {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let coord = self.coord_at(self.next);
        self.next += 1;
        coord
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cells {}

/// Query functions that provide read-only access to the board state.
pub mod query {
    use super::{cell_index, is_valid_cell, Board};
    use miam_core::{BoardError, BoardSize, CellCoord};

    /// Dimensions of the board.
    #[must_use]
    pub fn size(board: &Board) -> BoardSize {
        board.size
    }

    /// Currently selected cell, if any.
    #[must_use]
    pub fn selection(board: &Board) -> Option<CellCoord> {
        board.selection
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn population(board: &Board) -> usize {
        board.population()
    }

    /// Captures the occupancy of every cell as of this call.
    ///
    /// The snapshot owns its data, so later mutations of the board are never
    /// observed through it.
    #[must_use]
    pub fn occupancy_snapshot(board: &Board) -> OccupancySnapshot {
        OccupancySnapshot {
            size: board.size,
            occupied: board.stacks.iter().map(|stack| !stack.is_empty()).collect(),
        }
    }

    /// Immutable capture of which cells were occupied at a point in time.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct OccupancySnapshot {
        size: BoardSize,
        occupied: Vec<bool>,
    }

    impl OccupancySnapshot {
        /// Dimensions of the captured board.
        #[must_use]
        pub const fn size(&self) -> BoardSize {
            self.size
        }

        /// Pure bounds predicate mirroring [`Board::is_valid_cell`].
        #[must_use]
        pub fn is_valid_cell(&self, x: i64, y: i64) -> bool {
            is_valid_cell(self.size, x, y)
        }

        /// Reports whether the addressed cell was empty when captured.
        pub fn is_empty(&self, coord: CellCoord) -> Result<bool, BoardError> {
            cell_index(self.size, coord)
                .map(|index| !self.occupied[index])
                .ok_or(BoardError::OutOfBounds {
                    coord,
                    size: self.size,
                })
        }

        /// Number of occupied cells in the capture.
        #[must_use]
        pub fn population(&self) -> usize {
            self.occupied.iter().filter(|occupied| **occupied).count()
        }
    }
}

fn is_valid_cell(size: BoardSize, x: i64, y: i64) -> bool {
    (0..i64::from(size.size_x())).contains(&x) && (0..i64::from(size.size_y())).contains(&y)
}

fn cell_index(size: BoardSize, coord: CellCoord) -> Option<usize> {
    if size.contains(coord) {
        let x = usize::try_from(coord.x()).ok()?;
        let y = usize::try_from(coord.y()).ok()?;
        let height = usize::try_from(size.size_y()).ok()?;
        Some(x * height + y)
    } else {
        None
    }
}
