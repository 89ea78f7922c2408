//! The Borescoper's Deadly Pattern template catalog.

use std::sync::LazyLock;

use log::debug;
use mortlace_core::{CellMap, Position};

/// Block-relative cell quadruples (row-major offsets 0-8) describing the
/// 2×2-style corner choices inside the target block.
const OFFSET_QUADRUPLES: [[u8; 4]; 9] = [
    [0, 1, 3, 4],
    [1, 2, 4, 5],
    [3, 4, 6, 7],
    [4, 5, 7, 8],
    [0, 2, 3, 5],
    [3, 5, 6, 8],
    [0, 1, 6, 7],
    [1, 2, 7, 8],
    [0, 2, 6, 8],
];

/// A Borescoper's Deadly Pattern template: a heptagon (7 cells) or octagon
/// (8 cells).
///
/// Each template combines 3 or 4 *center* cells inside one block with two
/// cross dominoes outside it: a vertical pair covering the quad's two rows
/// and a horizontal pair covering the quad's two columns.
#[derive(Debug, Clone, Copy)]
pub struct BorescoperPattern {
    pair1: [Position; 2],
    pair2: [Position; 2],
    centers: [Position; 4],
    center_count: usize,
    map: CellMap,
}

impl BorescoperPattern {
    /// Returns `true` for the 7-cell shape.
    #[must_use]
    pub fn is_heptagon(&self) -> bool {
        self.center_count == 3
    }

    /// Returns the vertical domino cells.
    #[must_use]
    pub fn pair1(&self) -> [Position; 2] {
        self.pair1
    }

    /// Returns the horizontal domino cells.
    #[must_use]
    pub fn pair2(&self) -> [Position; 2] {
        self.pair2
    }

    /// Returns the 3 or 4 center cells inside the block.
    #[must_use]
    pub fn centers(&self) -> &[Position] {
        &self.centers[..self.center_count]
    }

    /// Returns the full cell set of the template.
    #[must_use]
    pub fn map(&self) -> CellMap {
        self.map
    }
}

static PATTERNS: LazyLock<Vec<BorescoperPattern>> = LazyLock::new(build);

/// Returns all 14 580 Borescoper templates.
///
/// Per block and corner quadruple there are four heptagons (one per omitted
/// corner) and one octagon, each crossed with the 6×6 domino placements in
/// the quad's row and column houses outside the block.
#[must_use]
pub fn borescoper_patterns() -> &'static [BorescoperPattern] {
    &PATTERNS
}

fn build() -> Vec<BorescoperPattern> {
    let mut patterns = Vec::with_capacity(14_580);
    for block in 0_u8..9 {
        for quadruple in OFFSET_QUADRUPLES {
            let quad = quadruple.map(|offset| Position::from_box(block, offset));
            // Heptagons: omit the corner diagonal to each pivot in turn.
            for omitted in [3, 2, 1, 0] {
                let mut centers = [quad[0]; 4];
                let mut count = 0;
                for (i, &cell) in quad.iter().enumerate() {
                    if i != omitted {
                        centers[count] = cell;
                        count += 1;
                    }
                }
                collect_domino_placements(&mut patterns, block, quad, centers, 3);
            }
            // The octagon keeps the whole quadruple.
            collect_domino_placements(&mut patterns, block, quad, quad, 4);
        }
    }
    debug!("built {} borescoper templates", patterns.len());
    patterns
}

/// Enumerates the 36 domino placements for one center choice: a vertical
/// pair on the quad rows in each column outside the block, crossed with a
/// horizontal pair on the quad columns in each row outside the block.
fn collect_domino_placements(
    patterns: &mut Vec<BorescoperPattern>,
    block: u8,
    quad: [Position; 4],
    centers: [Position; 4],
    center_count: usize,
) {
    let (row1, row2) = (quad[0].y(), quad[2].y());
    let (col1, col2) = (quad[0].x(), quad[1].x());
    let block_columns = block % 3 * 3..block % 3 * 3 + 3;
    let block_rows = block / 3 * 3..block / 3 * 3 + 3;

    for x in (0_u8..9).filter(|x| !block_columns.contains(x)) {
        let pair1 = [Position::new(x, row1), Position::new(x, row2)];
        for y in (0_u8..9).filter(|y| !block_rows.contains(y)) {
            let pair2 = [Position::new(col1, y), Position::new(col2, y)];
            let mut map = CellMap::new();
            for &cell in pair1.iter().chain(&pair2).chain(&centers[..center_count]) {
                map.insert(cell);
            }
            patterns.push(BorescoperPattern {
                pair1,
                pair2,
                centers,
                center_count,
                map,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert_eq!(borescoper_patterns().len(), 14_580);
    }

    #[test]
    fn test_heptagon_octagon_split() {
        let heptagons = borescoper_patterns()
            .iter()
            .filter(|p| p.is_heptagon())
            .count();
        assert_eq!(heptagons, 11_664);
        assert_eq!(borescoper_patterns().len() - heptagons, 2_916);
    }

    #[test]
    fn test_cell_counts() {
        for pattern in borescoper_patterns() {
            let expected = if pattern.is_heptagon() { 7 } else { 8 };
            assert_eq!(pattern.map().len(), expected);
            assert_eq!(pattern.centers().len(), expected - 4);
        }
    }

    #[test]
    fn test_dominoes_outside_center_block() {
        for pattern in borescoper_patterns().iter().step_by(97) {
            let block = pattern.centers()[0].box_index();
            for cell in pattern.pair1().into_iter().chain(pattern.pair2()) {
                assert_ne!(cell.box_index(), block);
            }
            // The vertical domino shares its column, the horizontal one its
            // row.
            let [a, b] = pattern.pair1();
            assert_eq!(a.x(), b.x());
            let [c, d] = pattern.pair2();
            assert_eq!(c.y(), d.y());
        }
    }

    #[test]
    fn test_dominoes_align_with_quad_lines() {
        let pattern = &borescoper_patterns()[0];
        let center_rows: std::collections::BTreeSet<_> =
            pattern.centers().iter().map(|c| c.y()).collect();
        let [a, b] = pattern.pair1();
        assert!(center_rows.contains(&a.y()) && center_rows.contains(&b.y()));
    }
}
