//! Named seed patterns and seeded random fills.

use miam_core::{BoardSize, CellCoord};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Named arrangement of cells expressed relative to its upper-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    /// Name used to request the pattern.
    pub name: &'static str,
    /// Cell offsets composing the pattern.
    pub cells: &'static [(u32, u32)],
}

/// Built-in patterns.
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "blinker",
        cells: &[(0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
];

/// Looks up a built-in pattern by name, ignoring ASCII case.
#[must_use]
pub fn pattern(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    /// Width and height of the pattern's bounding box.
    #[must_use]
    pub fn extent(&self) -> (u32, u32) {
        self.cells.iter().fold((0, 0), |(width, height), &(x, y)| {
            (width.max(x + 1), height.max(y + 1))
        })
    }

    /// Origin that centres the pattern on a board of the provided size.
    #[must_use]
    pub fn centered_origin(&self, size: BoardSize) -> CellCoord {
        let (width, height) = self.extent();
        CellCoord::new(
            size.size_x().saturating_sub(width) / 2,
            size.size_y().saturating_sub(height) / 2,
        )
    }

    /// Absolute cells of the pattern anchored at `origin`.
    pub fn placed_at(&self, origin: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().filter_map(move |&(x, y)| {
            Some(CellCoord::new(
                origin.x().checked_add(x)?,
                origin.y().checked_add(y)?,
            ))
        })
    }
}

/// Selects cells of a board pseudo-randomly with the provided density.
///
/// The same seed and size always yield the same cells. Density is clamped to
/// `0.0..=1.0`; a NaN density selects nothing.
#[must_use]
pub fn random_cells(size: BoardSize, seed: u64, density: f64) -> Vec<CellCoord> {
    let density = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cells = Vec::new();
    for x in 0..size.size_x() {
        for y in 0..size.size_y() {
            if rng.gen_bool(density) {
                cells.push(CellCoord::new(x, y));
            }
        }
    }
    cells
}
