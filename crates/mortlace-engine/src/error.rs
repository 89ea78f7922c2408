//! Engine error type.

use derive_more::{Display, Error, From};
use mortlace_core::ConsistencyError;

/// An error produced by the detection engine.
///
/// Failure to find a pattern is never an error (it is an empty result);
/// this type only surfaces when a caller hands the engine a grid that fails
/// the up-front consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum EngineError {
    /// The grid contains a contradiction.
    #[display("inconsistent grid: {_0}")]
    Inconsistent(ConsistencyError),
}
