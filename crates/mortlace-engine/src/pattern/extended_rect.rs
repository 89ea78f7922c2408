//! The Extended Rectangle template catalog.

use std::sync::LazyLock;

use log::debug;
use mortlace_core::{CellMap, House, Position};

/// Column (or row) index pairs used by the "fit" templates.
///
/// Both members of a pair keep the same offset within their block, which is
/// what makes the six-cell shape interchangeable and therefore deadly.
const FIT_PAIRS: [[u8; 2]; 9] = [
    [0, 3],
    [0, 6],
    [3, 6],
    [1, 4],
    [1, 7],
    [4, 7],
    [2, 5],
    [2, 8],
    [5, 8],
];

/// An Extended Rectangle template.
///
/// `pairs` lists the paired cells in ascending order, one pair per shared
/// position between the template's two line houses; the pairwise
/// shared-digit screen of the matcher runs over this list.
#[derive(Debug, Clone)]
pub struct ExtendedRectanglePattern {
    cells: CellMap,
    pairs: Vec<(Position, Position)>,
    is_fat: bool,
}

impl ExtendedRectanglePattern {
    /// Returns the full cell set of the template.
    #[must_use]
    pub fn cells(&self) -> CellMap {
        self.cells
    }

    /// Returns the paired cells, one pair per shared position.
    #[must_use]
    pub fn pairs(&self) -> &[(Position, Position)] {
        &self.pairs
    }

    /// Returns `true` for "fat" templates (two lines of one chute) and
    /// `false` for "fit" templates (two blocks, three lines).
    #[must_use]
    pub fn is_fat(&self) -> bool {
        self.is_fat
    }

    /// Returns the number of pattern digits the template requires, which
    /// equals its pair count.
    #[must_use]
    pub fn size(&self) -> usize {
        self.pairs.len()
    }
}

static PATTERNS: LazyLock<Vec<ExtendedRectanglePattern>> = LazyLock::new(build);

/// Returns all Extended Rectangle templates: 54 fit templates followed by
/// the fat templates in ascending size order.
#[must_use]
pub fn extended_rectangle_patterns() -> &'static [ExtendedRectanglePattern] {
    &PATTERNS
}

fn build() -> Vec<ExtendedRectanglePattern> {
    let mut patterns = Vec::new();

    // Fit templates, row orientation: the three rows of a band crossed with
    // two same-offset columns from different blocks.
    for band in 0_u8..3 {
        for [c1, c2] in FIT_PAIRS {
            let pairs = (0_u8..3)
                .map(|k| {
                    let y = band * 3 + k;
                    (Position::new(c1, y), Position::new(c2, y))
                })
                .collect();
            patterns.push(from_pairs(pairs, false));
        }
    }

    // Fit templates, column orientation.
    for stack in 0_u8..3 {
        for [r1, r2] in FIT_PAIRS {
            let pairs = (0_u8..3)
                .map(|k| {
                    let x = stack * 3 + k;
                    (Position::new(x, r1), Position::new(x, r2))
                })
                .collect();
            patterns.push(from_pairs(pairs, false));
        }
    }

    debug_assert_eq!(patterns.len(), 54);

    // Fat templates: two parallel lines of one chute, a size-k choice of
    // their nine shared positions. Subsets confined to a single box would
    // degenerate into a rectangle and are rejected.
    for size in 3_usize..=7 {
        for chute in 0_u8..3 {
            for (l1, l2) in [(0_u8, 1_u8), (0, 2), (1, 2)] {
                let (y1, y2) = (chute * 3 + l1, chute * 3 + l2);
                for subset in (House::Row { y: y1 }).positions().subsets(size) {
                    if subset.covered_houses().any(in_box) {
                        continue;
                    }
                    let pairs = subset
                        .iter()
                        .map(|pos| (pos, Position::new(pos.x(), y2)))
                        .collect();
                    patterns.push(from_pairs(pairs, true));
                }
            }
        }
        for chute in 0_u8..3 {
            for (l1, l2) in [(0_u8, 1_u8), (0, 2), (1, 2)] {
                let (x1, x2) = (chute * 3 + l1, chute * 3 + l2);
                for subset in (House::Column { x: x1 }).positions().subsets(size) {
                    if subset.covered_houses().any(in_box) {
                        continue;
                    }
                    let pairs = subset
                        .iter()
                        .map(|pos| (pos, Position::new(x2, pos.y())))
                        .collect();
                    patterns.push(from_pairs(pairs, true));
                }
            }
        }
    }

    debug!("built {} extended rectangle templates", patterns.len());
    patterns
}

fn in_box(house: House) -> bool {
    matches!(house, House::Box { .. })
}

fn from_pairs(pairs: Vec<(Position, Position)>, is_fat: bool) -> ExtendedRectanglePattern {
    let mut cells = CellMap::new();
    for &(left, right) in &pairs {
        cells.insert(left);
        cells.insert(right);
    }
    ExtendedRectanglePattern {
        cells,
        pairs,
        is_fat,
    }
}
