//! Index types and semantics for containers.
//!
//! This module provides bounded index types and their associated semantics
//! for working with 9-element, 81-element, and 729-element containers. The
//! semantics types define how domain values (digits, positions, candidates)
//! map onto container bit indices:
//!
//! - [`DigitSemantics`] - Maps [`Digit`] 1-9 to indices 0-8
//! - [`PositionSemantics`] - Maps [`Position`] to row-major board indices
//! - [`CandidateSemantics`] - Maps [`Candidate`] (cell, digit) pairs to
//!   indices 0-728
//!
//! [`Digit`]: crate::Digit
//! [`Position`]: crate::Position
//! [`Candidate`]: crate::Candidate

pub use self::{index_9::*, index_81::*, index_729::*};

mod index_9;
mod index_81;
mod index_729;
