//! Hidden Bi-value Universal Grave searcher.
//!
//! The dual of the standard grave: instead of cells carrying extra
//! candidates, houses carry digits pinned to a single remaining position
//! while every other digit sits on exactly two positions per house. Each
//! pinned position must take its digit to avoid the grave.

use std::ops::ControlFlow;

use log::trace;
use mortlace_core::{Candidate, CandidateMap, Digit, Grid, House};

use crate::{
    BoxedSearcher, Conclusion, Highlights, SearchContext, Searcher, Step, Technique,
};

const NAME: &str = "Hidden Bi-value Universal Grave";

/// Searcher for the hidden Bi-value Universal Grave.
///
/// A shape with several distinct single-position digits is recognized but
/// deliberately emits nothing: no verified elimination rule exists for it,
/// so it stays detect-only.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenBug {}

impl HiddenBug {
    /// Creates a new `HiddenBug` searcher.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Searcher for HiddenBug {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedSearcher {
        Box::new(*self)
    }

    fn collect(&self, grid: &Grid, ctx: &mut SearchContext<'_>) -> ControlFlow<()> {
        let empty = grid.empty_cells();
        let mut pinned = CandidateMap::new();

        for house in House::ALL {
            for digit in Digit::ALL {
                let positions = grid.digit_positions(digit) & house.positions() & empty;
                if positions.len() > 2 {
                    // Some digit still roams three or more positions in a
                    // house: not a hidden grave shape.
                    return ControlFlow::Continue(());
                }
                if let Some(cell) = positions.as_single() {
                    pinned.insert(Candidate::new(cell, digit));
                }
            }
        }

        if pinned.is_empty() {
            return ControlFlow::Continue(());
        }

        let digits = pinned.digits();
        if digits.len() > 1 {
            // Multi-digit shape: detect-only, no verified elimination
            // semantics exist for it.
            trace!("hidden grave shape with {} pinned digits left unclassified", digits.len());
            return ControlFlow::Continue(());
        }

        let conclusions = pinned
            .iter()
            .map(|candidate| Conclusion::assign(candidate.position(), candidate.digit()))
            .collect();
        let mut highlights = Highlights::new();
        highlights.candidates = pinned;
        ctx.push(Step::new(Technique::HiddenBug, conclusions, highlights))?;
        ControlFlow::Continue(())
    }
}
