#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Contract implemented by every pluggable rule strategy.
//!
//! A strategy never keeps board-derived state between calls: each operation
//! receives the [`Board`] it acts on. Operations answer with a "handled" flag
//! and surface precondition failures as [`BoardError`] values.

use miam_core::{BoardError, BoardSize, CellCoord};
use miam_world::Board;

/// Behaviour that defines how actions, selection and turns mutate a board.
pub trait RuleStrategy: std::fmt::Debug {
    /// Name under which the strategy is registered.
    fn name(&self) -> &'static str;

    /// Board dimensions the driver should use when constructing the session board.
    fn preferred_board_size(&self) -> BoardSize;

    /// Performs the strategy's primary interaction on a cell.
    fn apply_action(&self, board: &mut Board, coord: CellCoord) -> Result<bool, BoardError>;

    /// Selects the cell when it is occupied; otherwise clears the selection and declines.
    fn select(&self, board: &mut Board, coord: CellCoord) -> Result<bool, BoardError> {
        if board.is_empty(coord)? {
            board.unselect();
            return Ok(false);
        }
        board.select(coord)?;
        Ok(true)
    }

    /// Clears the selection.
    fn unselect(&self, board: &mut Board) -> Result<bool, BoardError> {
        board.unselect();
        Ok(true)
    }

    /// Executes one complete turn.
    fn advance(&self, board: &mut Board) -> Result<bool, BoardError>;
}

/// Entry point that produces a ready-to-use strategy instance.
pub type StrategyFactory = fn() -> Box<dyn RuleStrategy>;

/// Removes the top entity of an occupied cell, clearing the selection if it pointed there.
///
/// Strategies route every removal through this helper so the selection never
/// references an empty cell.
pub fn remove_top(board: &mut Board, coord: CellCoord) -> Result<(), BoardError> {
    let _ = board.pop(coord)?;
    if board.is_empty(coord)? && board.get_selection() == Some(coord) {
        board.unselect();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use miam_core::{Entity, EntityColor};

    #[derive(Debug)]
    struct Inert;

    impl RuleStrategy for Inert {
        fn name(&self) -> &'static str {
            "inert"
        }

        fn preferred_board_size(&self) -> BoardSize {
            BoardSize::new(3, 3)
        }

        fn apply_action(&self, board: &mut Board, coord: CellCoord) -> Result<bool, BoardError> {
            let _ = board.is_empty(coord)?;
            Ok(true)
        }

        fn advance(&self, _board: &mut Board) -> Result<bool, BoardError> {
            Ok(true)
        }
    }

    fn board() -> Board {
        Board::new(BoardSize::new(3, 3)).expect("valid size")
    }

    #[test]
    fn select_refuses_empty_cell_and_clears_selection() {
        let mut board = board();
        let occupied = CellCoord::new(0, 0);
        board.push(occupied, Entity::new(EntityColor::from_rgb(0, 0, 0))).expect("push");
        assert_eq!(Inert.select(&mut board, occupied), Ok(true));

        assert_eq!(Inert.select(&mut board, CellCoord::new(1, 1)), Ok(false));
        assert_eq!(board.get_selection(), None);
    }

    #[test]
    fn select_out_of_bounds_is_reported() {
        let mut board = board();
        assert!(matches!(
            Inert.select(&mut board, CellCoord::new(3, 0)),
            Err(BoardError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn remove_top_keeps_selection_while_stack_is_occupied() {
        let mut board = board();
        let coord = CellCoord::new(2, 2);
        board.push(coord, Entity::new(EntityColor::from_rgb(1, 1, 1))).expect("push");
        board.push(coord, Entity::new(EntityColor::from_rgb(2, 2, 2))).expect("push");
        board.select(coord).expect("select");

        remove_top(&mut board, coord).expect("occupied");
        assert_eq!(board.get_selection(), Some(coord));

        remove_top(&mut board, coord).expect("occupied");
        assert_eq!(board.get_selection(), None);
    }

    #[test]
    fn unselect_always_succeeds() {
        let mut board = board();
        assert_eq!(Inert.unselect(&mut board), Ok(true));
        assert_eq!(Inert.unselect(&mut board), Ok(true));
    }
}
