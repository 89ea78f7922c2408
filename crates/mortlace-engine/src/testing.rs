//! Test utilities for searcher implementations.
//!
//! This module provides [`DetectionTester`], a fluent harness for verifying
//! that deadly-pattern searchers emit the expected steps.
//!
//! # Example
//!
//! ```
//! use mortlace_engine::{searcher::Bug, testing::DetectionTester};
//!
//! DetectionTester::from_str(
//!     "
//!     53_ _7_ ___
//!     6__ 195 ___
//!     _98 ___ _6_
//!     8__ _6_ __3
//!     4__ 8_3 __1
//!     7__ _2_ __6
//!     _6_ ___ 28_
//!     ___ 419 __5
//!     ___ _8_ _79
//! ",
//! )
//! .collect_with(&Bug::new())
//! .assert_no_steps();
//! ```

use std::str::FromStr as _;

use mortlace_core::{Digit, Grid, Position};

use crate::{ConclusionKind, SearchContext, Searcher, Step, Technique};

/// A test harness for verifying searcher implementations.
///
/// Runs a searcher in find-all mode over a fixed grid and offers chained,
/// `#[track_caller]` assertions over the accumulated steps. Every
/// `collect_with` call also re-runs the searcher and asserts that the step
/// sequence reproduces exactly, which pins down determinism and idempotence
/// for every test that uses the harness.
#[derive(Debug)]
pub struct DetectionTester {
    grid: Grid,
    steps: Vec<Step>,
}

impl DetectionTester {
    /// Creates a tester from a grid.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            steps: Vec::new(),
        }
    }

    /// Creates a tester from a grid string (see [`Grid::from_str`]).
    ///
    /// # Panics
    ///
    /// Panics if the string cannot be parsed as a valid grid.
    #[track_caller]
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self::new(Grid::from_str(s).unwrap())
    }

    /// Returns the grid under test.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the accumulated steps.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Runs the searcher in find-all mode, appending its steps.
    ///
    /// # Panics
    ///
    /// Panics if a second run over the unchanged grid produces a different
    /// step sequence.
    #[track_caller]
    #[must_use]
    pub fn collect_with<S>(mut self, searcher: &S) -> Self
    where
        S: Searcher,
    {
        let mut first = Vec::new();
        let _ = searcher.collect(&self.grid, &mut SearchContext::new(&mut first, false));
        let mut second = Vec::new();
        let _ = searcher.collect(&self.grid, &mut SearchContext::new(&mut second, false));
        assert_eq!(
            first,
            second,
            "{} is not deterministic over an unchanged grid",
            searcher.name()
        );
        self.steps.append(&mut first);
        self
    }

    /// Asserts that exactly `count` steps were accumulated.
    #[track_caller]
    #[must_use]
    pub fn assert_step_count(self, count: usize) -> Self {
        assert_eq!(
            self.steps.len(),
            count,
            "expected {count} steps, found {}: {:?}",
            self.steps.len(),
            self.steps.iter().map(Step::technique).collect::<Vec<_>>()
        );
        self
    }

    /// Asserts that no step was accumulated.
    #[track_caller]
    #[must_use]
    pub fn assert_no_steps(self) -> Self {
        self.assert_step_count(0)
    }

    /// Asserts that at least one step was accumulated.
    #[track_caller]
    #[must_use]
    pub fn assert_any_step(self) -> Self {
        assert!(!self.steps.is_empty(), "expected at least one step");
        self
    }

    /// Asserts the technique of the step at `index`.
    #[track_caller]
    #[must_use]
    pub fn assert_technique(self, index: usize, technique: Technique) -> Self {
        let step = self
            .steps
            .get(index)
            .unwrap_or_else(|| panic!("no step at index {index} (have {})", self.steps.len()));
        assert_eq!(
            step.technique(),
            technique,
            "step {index} is {}, expected {technique}",
            step.technique()
        );
        self
    }

    /// Asserts that some step assigns `digit` at `pos`.
    #[track_caller]
    #[must_use]
    pub fn assert_assigned(self, pos: Position, digit: Digit) -> Self {
        assert!(
            self.has_conclusion(ConclusionKind::Assign, pos, digit),
            "no step assigns {digit} at {pos}; steps: {:?}",
            self.steps
        );
        self
    }

    /// Asserts that some step eliminates `digit` at `pos`.
    #[track_caller]
    #[must_use]
    pub fn assert_eliminated(self, pos: Position, digit: Digit) -> Self {
        assert!(
            self.has_conclusion(ConclusionKind::Eliminate, pos, digit),
            "no step eliminates {digit} at {pos}; steps: {:?}",
            self.steps
        );
        self
    }

    /// Asserts that no step eliminates `digit` at `pos`.
    #[track_caller]
    #[must_use]
    pub fn assert_not_eliminated(self, pos: Position, digit: Digit) -> Self {
        assert!(
            !self.has_conclusion(ConclusionKind::Eliminate, pos, digit),
            "unexpected elimination of {digit} at {pos}"
        );
        self
    }

    fn has_conclusion(&self, kind: ConclusionKind, pos: Position, digit: Digit) -> bool {
        self.steps.iter().any(|step| {
            step.conclusions().iter().any(|conclusion| {
                conclusion.kind() == kind
                    && conclusion.position() == pos
                    && conclusion.digit() == digit
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;
    use crate::{BoxedSearcher, Conclusion, Highlights};

    #[derive(Debug, Clone, Copy)]
    struct NoOpSearcher;

    impl Searcher for NoOpSearcher {
        fn name(&self) -> &'static str {
            "no-op"
        }

        fn clone_box(&self) -> BoxedSearcher {
            Box::new(*self)
        }

        fn collect(&self, _grid: &Grid, _ctx: &mut SearchContext<'_>) -> ControlFlow<()> {
            ControlFlow::Continue(())
        }
    }

    #[derive(Debug, Clone, Copy)]
    struct AssignAtOrigin;

    impl Searcher for AssignAtOrigin {
        fn name(&self) -> &'static str {
            "assign-at-origin"
        }

        fn clone_box(&self) -> BoxedSearcher {
            Box::new(*self)
        }

        fn collect(&self, _grid: &Grid, ctx: &mut SearchContext<'_>) -> ControlFlow<()> {
            ctx.push(Step::new(
                Technique::BugType1,
                vec![Conclusion::assign(Position::new(0, 0), Digit::D1)],
                Highlights::new(),
            ))?;
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn test_no_op_collects_nothing() {
        DetectionTester::new(Grid::new())
            .collect_with(&NoOpSearcher)
            .assert_no_steps();
    }

    #[test]
    fn test_assertions_chain() {
        DetectionTester::new(Grid::new())
            .collect_with(&AssignAtOrigin)
            .assert_step_count(1)
            .assert_technique(0, Technique::BugType1)
            .assert_assigned(Position::new(0, 0), Digit::D1)
            .assert_not_eliminated(Position::new(0, 0), Digit::D1);
    }

    #[test]
    #[should_panic(expected = "expected 2 steps")]
    fn test_step_count_mismatch_panics() {
        let _ = DetectionTester::new(Grid::new())
            .collect_with(&AssignAtOrigin)
            .assert_step_count(2);
    }
}
