//! Candidate digit sets (1-9) for a single cell.

use crate::{containers::BitSet9, index::DigitSemantics};

/// A set of digits 1-9, stored as a 9-bit mask.
///
/// Used both for per-cell candidate masks and for digit-subset bookkeeping
/// inside the classification engines.
///
/// # Examples
///
/// ```
/// use mortlace_core::{Digit, DigitSet};
///
/// let a = DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D3]);
/// let b = DigitSet::from_iter([Digit::D2, Digit::D3, Digit::D4]);
///
/// assert_eq!(a.intersection(b), DigitSet::from_iter([Digit::D2, Digit::D3]));
/// assert_eq!(a.difference(b).as_single(), Some(Digit::D1));
/// ```
pub type DigitSet = BitSet9<DigitSemantics>;
