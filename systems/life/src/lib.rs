#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Conway's Game of Life expressed as a pluggable rule strategy.
//!
//! A turn is computed against an [`OccupancySnapshot`] captured before any
//! mutation, so births and deaths applied earlier in the scan never leak into
//! the neighbor counts of cells visited later. The visiting order therefore
//! has no influence on the resulting board.

use miam_core::{BoardError, BoardSize, CellCoord, CellOrder, Entity, EntityColor};
use miam_system_contract::RuleStrategy;
use miam_world::{query, query::OccupancySnapshot, Board};

/// Name under which the Game of Life strategy is registered.
pub const NAME: &str = "life";

const PREFERRED_SIZE: BoardSize = BoardSize::new(16, 16);
const CELL_COLOR: EntityColor = EntityColor::from_rgb(139, 99, 49);

/// Outcome of the Game of Life rule for a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The cell keeps its current state.
    Unchanged,
    /// A live cell dies of under- or overpopulation.
    Death,
    /// A dead cell with exactly three live neighbors comes alive.
    Birth,
}

/// Applies the standard B3/S23 rule to a cell state and its live neighbor count.
#[must_use]
pub const fn transition(alive: bool, neighbor_count: u8) -> Transition {
    match (alive, neighbor_count) {
        (true, 2) | (true, 3) => Transition::Unchanged,
        (true, _) => Transition::Death,
        (false, 3) => Transition::Birth,
        (false, _) => Transition::Unchanged,
    }
}

/// Counts the occupied cells among the eight neighbors of `coord`.
///
/// Board edges are hard boundaries: coordinates beyond them are skipped, not
/// wrapped and not counted.
pub fn live_neighbors(snapshot: &OccupancySnapshot, coord: CellCoord) -> Result<u8, BoardError> {
    let _ = snapshot.is_empty(coord)?;

    let x = i64::from(coord.x());
    let y = i64::from(coord.y());
    let mut count = 0;
    for i in x - 1..=x + 1 {
        for j in y - 1..=y + 1 {
            if (i, j) == (x, y) || !snapshot.is_valid_cell(i, j) {
                continue;
            }
            let (Ok(nx), Ok(ny)) = (u32::try_from(i), u32::try_from(j)) else {
                continue;
            };
            if !snapshot.is_empty(CellCoord::new(nx, ny))? {
                count += 1;
            }
        }
    }
    Ok(count)
}

/// Game of Life strategy: actions toggle cells and turns apply the B3/S23 rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct Life {
    order: CellOrder,
}

impl Life {
    /// Creates the strategy visiting cells in the board's default order.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            order: CellOrder::ColumnMajor,
        }
    }

    /// Creates the strategy visiting cells in the provided order during a turn.
    #[must_use]
    pub const fn with_order(order: CellOrder) -> Self {
        Self { order }
    }

    /// Boxed factory entry point used by strategy registries.
    #[must_use]
    pub fn create() -> Box<dyn RuleStrategy> {
        Box::new(Self::new())
    }

    /// Order in which cells are visited while applying a turn.
    #[must_use]
    pub const fn order(&self) -> CellOrder {
        self.order
    }

    fn create_cell(board: &mut Board, coord: CellCoord) -> Result<(), BoardError> {
        board.push(coord, Entity::new(CELL_COLOR))
    }

    fn kill_cell(board: &mut Board, coord: CellCoord) -> Result<(), BoardError> {
        let _ = board.pop(coord)?;
        if board.get_selection() == Some(coord) {
            board.unselect();
        }
        Ok(())
    }
}

impl RuleStrategy for Life {
    fn name(&self) -> &'static str {
        NAME
    }

    fn preferred_board_size(&self) -> BoardSize {
        PREFERRED_SIZE
    }

    fn apply_action(&self, board: &mut Board, coord: CellCoord) -> Result<bool, BoardError> {
        if board.is_empty(coord)? {
            Self::create_cell(board, coord)?;
        } else {
            Self::kill_cell(board, coord)?;
        }
        Ok(true)
    }

    fn advance(&self, board: &mut Board) -> Result<bool, BoardError> {
        let snapshot = query::occupancy_snapshot(board);

        for coord in board.cells_in(self.order) {
            let alive = !snapshot.is_empty(coord)?;
            let neighbor_count = live_neighbors(&snapshot, coord)?;
            match transition(alive, neighbor_count) {
                Transition::Unchanged => {}
                Transition::Death => Self::kill_cell(board, coord)?,
                Transition::Birth => Self::create_cell(board, coord)?,
            }
        }

        Ok(true)
    }
}
