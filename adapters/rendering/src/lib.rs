#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Miam adapters.
//!
//! A [`Scene`] is captured exclusively through the board's side-effect-free
//! query surface: size, cell iteration, emptiness, the head entity and the
//! selection. Backends only ever see the scene, never the board.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use miam_core::{BoardError, BoardSize, CellCoord, EntityColor};
use miam_world::{query, Board};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the RGB channels back to bytes, ignoring alpha.
    #[must_use]
    pub fn to_rgb_u8(&self) -> [u8; 3] {
        let byte = |channel: f32| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.red), byte(self.green), byte(self.blue)]
    }
}

impl From<EntityColor> for Color {
    fn from(color: EntityColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Presentation data for a single board cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCell {
    /// Coordinate of the cell.
    pub coord: CellCoord,
    /// Color of the topmost entity, if the cell is occupied.
    pub top: Option<Color>,
    /// Number of stacked entities.
    pub depth: usize,
}

/// Immutable description of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board dimensions.
    pub size: BoardSize,
    /// Every cell, in the board's iteration order.
    pub cells: Vec<SceneCell>,
    /// Highlighted cell, if any.
    pub selection: Option<CellCoord>,
    /// Turns executed so far.
    pub generation: u64,
}

impl Scene {
    /// Captures the presentation state of the board.
    pub fn capture(board: &Board, generation: u64) -> Result<Self, BoardError> {
        let cells = board
            .iterate_cells()
            .map(|coord| -> Result<SceneCell, BoardError> {
                let top = if board.is_empty(coord)? {
                    None
                } else {
                    Some(Color::from(board.head(coord)?.color()))
                };
                Ok(SceneCell {
                    coord,
                    top,
                    depth: board.depth(coord)?,
                })
            })
            .collect::<Result<Vec<_>, BoardError>>()?;

        Ok(Self {
            size: query::size(board),
            cells,
            selection: query::selection(board),
            generation,
        })
    }

    /// Number of occupied cells in the scene.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.top.is_some()).count()
    }

    /// Looks up the presentation data of one cell.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&SceneCell> {
        self.cells.iter().find(|cell| cell.coord == coord)
    }
}

/// Consumer of captured scenes.
pub trait RenderingBackend {
    /// Presents one frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Options controlling how [`render_text`] draws cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Draw stacks deeper than one entity as their depth (capped at 9).
    pub depth: bool,
    /// Wrap occupied cells in ANSI truecolor escapes using the top entity's color.
    pub color: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            depth: true,
            color: false,
        }
    }
}

/// Backend that draws scenes as text, one character per cell.
#[derive(Debug)]
pub struct TextBackend<W> {
    writer: W,
    style: TextStyle,
}

impl<W: Write> TextBackend<W> {
    /// Creates a text backend writing to the provided sink with the default style.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            style: TextStyle::default(),
        }
    }

    /// Replaces the drawing style.
    #[must_use]
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Consumes the backend, yielding the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        let text = render_text(scene, self.style);
        self.writer
            .write_all(text.as_bytes())
            .context("failed to write rendered board")?;
        self.writer.flush().context("failed to flush rendered board")
    }
}

/// Renders the scene as rows of glyphs followed by a status line.
///
/// `.` marks an empty cell, `#` an occupied one and `@` the selection.
#[must_use]
pub fn render_text(scene: &Scene, style: TextStyle) -> String {
    let width = scene.size.size_x() as usize;
    let height = scene.size.size_y() as usize;
    let mut glyphs: Vec<(char, Option<Color>)> = vec![('.', None); width * height];
    for cell in &scene.cells {
        let index = cell.coord.y() as usize * width + cell.coord.x() as usize;
        if let Some(slot) = glyphs.get_mut(index) {
            *slot = (glyph(cell, style.depth), cell.top);
        }
    }
    if let Some(selected) = scene.selection {
        let index = selected.y() as usize * width + selected.x() as usize;
        if let Some(slot) = glyphs.get_mut(index) {
            *slot = ('@', None);
        }
    }

    let mut text = String::with_capacity((width + 1) * height + 32);
    for row in glyphs.chunks(width.max(1)) {
        for &(glyph, color) in row {
            match color.filter(|_| style.color) {
                Some(color) => {
                    let [red, green, blue] = color.to_rgb_u8();
                    text.push_str(&format!("\x1b[38;2;{red};{green};{blue}m{glyph}\x1b[0m"));
                }
                None => text.push(glyph),
            }
        }
        text.push('\n');
    }
    text.push_str(&format!(
        "generation {} population {}\n",
        scene.generation,
        scene.population()
    ));
    text
}

fn glyph(cell: &SceneCell, show_depth: bool) -> char {
    if cell.top.is_none() {
        return '.';
    }
    if show_depth && cell.depth > 1 {
        char::from_digit(cell.depth.min(9) as u32, 10).unwrap_or('#')
    } else {
        '#'
    }
}
