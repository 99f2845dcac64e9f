//! Session driver that owns the board and routes driver input to the strategy.

use miam_core::{BoardError, BoardSize, CellCoord};
use miam_system_contract::RuleStrategy;
use miam_world::{query, Board};
use tracing::{debug, info, warn};

use crate::patterns::Pattern;

/// Slowest continuous-play cadence: one turn every this many frames.
pub const MAX_RATE: u32 = 120;
/// Fastest continuous-play cadence: one turn per frame.
pub const MIN_RATE: u32 = 1;
/// Cadence used when none is configured.
pub const DEFAULT_RATE: u32 = 30;

/// Continuous-play scheduler firing one turn every `rate` frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayClock {
    playing: bool,
    rate: u32,
    counter: u32,
}

impl Default for PlayClock {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl PlayClock {
    /// Creates a paused clock with the provided cadence, clamped to `MIN_RATE..=MAX_RATE`.
    #[must_use]
    pub fn new(rate: u32) -> Self {
        Self {
            playing: false,
            rate: rate.clamp(MIN_RATE, MAX_RATE),
            counter: 0,
        }
    }

    /// Number of frames between two turns.
    #[must_use]
    pub const fn rate(&self) -> u32 {
        self.rate
    }

    /// Changes the cadence, clamped to `MIN_RATE..=MAX_RATE`.
    pub fn set_rate(&mut self, rate: u32) {
        self.rate = rate.clamp(MIN_RATE, MAX_RATE);
        self.counter %= self.rate;
    }

    /// Reports whether continuous play is active.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Starts or stops continuous play, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Advances the frame counter and reports whether a turn is due on this frame.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        let due = self.counter == 0;
        self.counter = (self.counter + 1) % self.rate;
        due
    }
}

/// Input distilled from one driver frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Cell under the pointer, or `None` when the pointer is off the board.
    pub hovered_cell: Option<CellCoord>,
    /// Primary button released this frame.
    pub action_release: bool,
    /// Secondary button released this frame.
    pub select_release: bool,
    /// Cancel key released this frame.
    pub cancel: bool,
    /// Pointer rests on a control widget, so board clicks are ignored.
    pub over_controls: bool,
    /// Single-step request.
    pub step_requested: bool,
    /// Continuous-play toggle request.
    pub toggle_play: bool,
}

/// Contract calls performed while processing one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Result of `select`/`unselect`, when either was invoked.
    pub selection: Option<bool>,
    /// Result of `apply_action`, when it was invoked.
    pub action: Option<bool>,
    /// Whether a turn was executed.
    pub advanced: bool,
}

/// One board driven by one strategy for the lifetime of a game.
#[derive(Debug)]
pub struct Session {
    board: Board,
    strategy: Box<dyn RuleStrategy>,
    clock: PlayClock,
    generation: u64,
}

impl Session {
    /// Starts a session on a board of the strategy's preferred size.
    pub fn new(strategy: Box<dyn RuleStrategy>) -> Result<Self, BoardError> {
        let size = strategy.preferred_board_size();
        Self::with_size(strategy, size)
    }

    /// Starts a session on a board of an explicit size.
    pub fn with_size(strategy: Box<dyn RuleStrategy>, size: BoardSize) -> Result<Self, BoardError> {
        let board = Board::new(size)?;
        info!(strategy = strategy.name(), %size, "session started");
        Ok(Self {
            board,
            strategy,
            clock: PlayClock::default(),
            generation: 0,
        })
    }

    /// Read-only access to the board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Name of the active strategy.
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Number of turns executed so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Continuous-play scheduler.
    #[must_use]
    pub const fn clock(&self) -> &PlayClock {
        &self.clock
    }

    /// Mutable access to the continuous-play scheduler.
    pub fn clock_mut(&mut self) -> &mut PlayClock {
        &mut self.clock
    }

    /// Forwards the primary interaction to the strategy.
    pub fn apply_action(&mut self, coord: CellCoord) -> Result<bool, BoardError> {
        let result = self.strategy.apply_action(&mut self.board, coord);
        reported(result, "apply_action")
    }

    /// Asks the strategy to select a cell.
    pub fn select(&mut self, coord: CellCoord) -> Result<bool, BoardError> {
        let result = self.strategy.select(&mut self.board, coord);
        reported(result, "select")
    }

    /// Asks the strategy to clear the selection.
    pub fn unselect(&mut self) -> Result<bool, BoardError> {
        let result = self.strategy.unselect(&mut self.board);
        reported(result, "unselect")
    }

    /// Executes one turn.
    pub fn advance(&mut self) -> Result<bool, BoardError> {
        let result = self.strategy.advance(&mut self.board);
        let handled = reported(result, "advance")?;
        if handled {
            self.generation += 1;
        }
        debug!(
            generation = self.generation,
            population = query::population(&self.board),
            "turn advanced"
        );
        Ok(handled)
    }

    /// Occupies each listed empty cell through the strategy's action.
    ///
    /// Cells outside the board and cells already occupied are skipped. Returns
    /// the number of cells the strategy handled. Used for generated placements
    /// such as patterns and random fills.
    pub fn seed<I>(&mut self, cells: I) -> Result<usize, BoardError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let size = self.board.get_size();
        let mut seeded = 0;
        let mut skipped = 0;
        for coord in cells {
            if !size.contains(coord) || !self.board.is_empty(coord)? {
                skipped += 1;
                continue;
            }
            if self.apply_action(coord)? {
                seeded += 1;
            }
        }
        debug!(seeded, skipped, "board seeded");
        Ok(seeded)
    }

    /// Occupies explicitly requested cells.
    ///
    /// Every cell is bounds-checked before the board is touched, so an
    /// off-board entry fails with [`BoardError::OutOfBounds`] and leaves the
    /// board unchanged. Already occupied cells are left as they are.
    pub fn place(&mut self, cells: &[CellCoord]) -> Result<usize, BoardError> {
        let size = self.board.get_size();
        if let Some(&coord) = cells.iter().find(|coord| !size.contains(**coord)) {
            let error = BoardError::OutOfBounds { coord, size };
            warn!(%error, "requested cell rejected");
            return Err(error);
        }
        self.seed(cells.iter().copied())
    }

    /// Places a pattern centred on the board.
    pub fn seed_pattern(&mut self, pattern: &Pattern) -> Result<usize, BoardError> {
        let origin = pattern.centered_origin(self.board.get_size());
        self.seed(pattern.placed_at(origin))
    }

    /// Translates one frame of driver input into contract calls.
    pub fn frame(&mut self, input: FrameInput) -> Result<FrameOutcome, BoardError> {
        let mut outcome = FrameOutcome::default();

        if input.cancel {
            outcome.selection = Some(self.unselect()?);
        }

        if input.toggle_play {
            let playing = self.clock.toggle();
            info!(playing, "continuous play toggled");
        }

        let pointer_on_board = !input.over_controls;
        if pointer_on_board && input.select_release {
            outcome.selection = Some(match input.hovered_cell {
                Some(cell) => self.select(cell)?,
                None => self.unselect()?,
            });
        }

        if pointer_on_board && input.action_release {
            if let Some(cell) = input.hovered_cell {
                outcome.action = Some(self.apply_action(cell)?);
            }
        }

        if self.clock.is_playing() {
            if self.clock.tick() {
                outcome.advanced = self.advance()?;
            }
        } else if input.step_requested {
            outcome.advanced = self.advance()?;
        }

        Ok(outcome)
    }
}

fn reported<T>(result: Result<T, BoardError>, call: &'static str) -> Result<T, BoardError> {
    result.inspect_err(|error| warn!(%error, call, "strategy call failed"))
}
