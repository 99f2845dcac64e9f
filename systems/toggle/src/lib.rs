#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Default rule strategy whose only interaction toggles cell occupancy.

use miam_core::{BoardError, BoardSize, CellCoord, Entity, EntityColor};
use miam_system_contract::{remove_top, RuleStrategy};
use miam_world::Board;

/// Name under which the toggle strategy is registered.
pub const NAME: &str = "default";

const PREFERRED_SIZE: BoardSize = BoardSize::new(24, 24);
const TOKEN_COLOR: EntityColor = EntityColor::from_rgb(0x58, 0x47, 0xff);

/// Toggle-only strategy: actions place or remove a token and turns change nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Toggle;

impl Toggle {
    /// Creates the toggle strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Boxed factory entry point used by strategy registries.
    #[must_use]
    pub fn create() -> Box<dyn RuleStrategy> {
        Box::new(Self::new())
    }
}

impl RuleStrategy for Toggle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn preferred_board_size(&self) -> BoardSize {
        PREFERRED_SIZE
    }

    fn apply_action(&self, board: &mut Board, coord: CellCoord) -> Result<bool, BoardError> {
        if board.is_empty(coord)? {
            board.push(coord, Entity::new(TOKEN_COLOR))?;
        } else {
            remove_top(board, coord)?;
        }
        Ok(true)
    }

    fn advance(&self, _board: &mut Board) -> Result<bool, BoardError> {
        Ok(true)
    }
}
