//! The shared Unique Matrix / Rotating Deadly Pattern template catalog.

use std::sync::LazyLock;

use log::debug;
use mortlace_core::{CellMap, Position};

static MATRIX_PATTERNS: LazyLock<Vec<CellMap>> = LazyLock::new(build);

/// Returns the 162 nine-cell matrix templates.
///
/// For each of the 3 bands there are 27 ways to pick one column from each
/// block; the three rows of the band over those columns give a 9-cell
/// template. The symmetric construction over the 3 stacks yields the other
/// 81. The Unique Matrix and Rotating Deadly Pattern searchers share this
/// catalog verbatim; they differ only in matching and classification.
#[must_use]
pub fn matrix_patterns() -> &'static [CellMap] {
    &MATRIX_PATTERNS
}

fn build() -> Vec<CellMap> {
    let mut patterns = Vec::with_capacity(162);

    // Band templates: three rows of the band, one column per block.
    for band in 0_u8..3 {
        for a in 0_u8..3 {
            for b in 3_u8..6 {
                for c in 6_u8..9 {
                    let mut map = CellMap::new();
                    for row in 0_u8..3 {
                        let y = band * 3 + row;
                        map.insert(Position::new(a, y));
                        map.insert(Position::new(b, y));
                        map.insert(Position::new(c, y));
                    }
                    patterns.push(map);
                }
            }
        }
    }

    // Stack templates: three columns of the stack, one row per band.
    for stack in 0_u8..3 {
        for a in 0_u8..3 {
            for b in 3_u8..6 {
                for c in 6_u8..9 {
                    let mut map = CellMap::new();
                    for column in 0_u8..3 {
                        let x = stack * 3 + column;
                        map.insert(Position::new(x, a));
                        map.insert(Position::new(x, b));
                        map.insert(Position::new(x, c));
                    }
                    patterns.push(map);
                }
            }
        }
    }

    debug!("built {} matrix templates", patterns.len());
    patterns
}
