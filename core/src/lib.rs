#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core value types shared across the Miam board engine.
//!
//! This crate defines the vocabulary that connects the authoritative board,
//! the pluggable rule strategies and the adapters. Coordinates and sizes are
//! plain values, entities are owned tokens stacked on cells, and every
//! precondition failure is surfaced through [`BoardError`] rather than being
//! absorbed silently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Location of a single board cell expressed as zero-based `x` and `y` indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based horizontal index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based vertical index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dimensions of a board measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    size_x: u32,
    size_y: u32,
}

impl BoardSize {
    /// Creates a new size descriptor. Boards reject zero-length dimensions at construction.
    #[must_use]
    pub const fn new(size_x: u32, size_y: u32) -> Self {
        Self { size_x, size_y }
    }

    /// Number of cells along the horizontal axis.
    #[must_use]
    pub const fn size_x(&self) -> u32 {
        self.size_x
    }

    /// Number of cells along the vertical axis.
    #[must_use]
    pub const fn size_y(&self) -> u32 {
        self.size_y
    }

    /// Reports whether both dimensions are strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.size_x > 0 && self.size_y > 0
    }

    /// Total number of cells covered by the size.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.size_x) * u64::from(self.size_y);
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Reports whether the coordinate lies inside the bounds.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.x() < self.size_x && coord.y() < self.size_y
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.size_x, self.size_y)
    }
}

/// Deterministic orders in which every board coordinate can be visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellOrder {
    /// `x` is the outer loop and `y` the inner loop.
    #[default]
    ColumnMajor,
    /// `y` is the outer loop and `x` the inner loop.
    RowMajor,
}

/// Display color carried by every entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl EntityColor {
    /// Creates a new entity color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Open-ended attribute value attached to an entity by the strategy that created it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    /// Signed integer payload.
    Int(i64),
    /// Free-form text payload.
    Text(String),
    /// Boolean marker.
    Flag(bool),
}

/// Token placed on a board cell.
///
/// Entities carry display data and strategy-defined attributes but no board
/// logic. They are owned by exactly one cell stack at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    color: EntityColor,
    attributes: BTreeMap<String, AttributeValue>,
}

impl Entity {
    /// Creates an entity with the provided display color and no attributes.
    #[must_use]
    pub fn new(color: EntityColor) -> Self {
        Self {
            color,
            attributes: BTreeMap::new(),
        }
    }

    /// Returns the entity with an additional attribute attached.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Attaches or replaces a named attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: AttributeValue) {
        let _ = self.attributes.insert(name.into(), value);
    }

    /// Display color of the entity.
    #[must_use]
    pub const fn color(&self) -> EntityColor {
        self.color
    }

    /// Looks up a named attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Iterates over all attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

/// Raised when `pop` or `head` is invoked on an empty cell stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cell stack is empty")]
pub struct EmptyStackError;

/// Precondition failures raised by board operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The coordinate lies outside `[0, size_x) x [0, size_y)`.
    #[error("cell {coord} lies outside the {size} board")]
    OutOfBounds {
        /// Coordinate supplied by the caller.
        coord: CellCoord,
        /// Dimensions of the addressed board.
        size: BoardSize,
    },
    /// The addressed cell holds no entity.
    #[error("cell {coord} holds no entity")]
    EmptyStack {
        /// Coordinate of the empty cell.
        coord: CellCoord,
        /// Underlying stack failure.
        #[source]
        source: EmptyStackError,
    },
    /// A board was requested with a zero-length dimension.
    #[error("board size {size} must be positive in both dimensions")]
    InvalidSize {
        /// Rejected dimensions.
        size: BoardSize,
    },
}
