//! Conclusion records produced by the detection searchers.

use std::fmt::{self, Display};

use mortlace_core::{Candidate, CandidateMap, CellMap, Digit, House, Position};

/// Identity of a deadly-pattern technique.
///
/// Every searcher tags its steps with one of these; the enclosing analyzer
/// uses the identity for ranking and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Technique {
    /// Bi-value Universal Grave, single true candidate.
    BugType1,
    /// Bi-value Universal Grave, one shared extra digit.
    BugType2,
    /// Bi-value Universal Grave, naked subset extension.
    BugType3,
    /// Bi-value Universal Grave, conjugate pair extension.
    BugType4,
    /// Bi-value Universal Grave with multiple true candidates (+ n).
    BugMultiple,
    /// Bi-value Universal Grave XZ rule.
    BugXz,
    /// Bi-value Universal Grave false candidate type.
    BugFalseCandidate,
    /// Hidden Bi-value Universal Grave, single anomaly.
    HiddenBug,
    /// Borescoper's Deadly Pattern Type 1.
    BorescoperType1,
    /// Borescoper's Deadly Pattern Type 2.
    BorescoperType2,
    /// Borescoper's Deadly Pattern Type 3.
    BorescoperType3,
    /// Borescoper's Deadly Pattern Type 4.
    BorescoperType4,
    /// Extended Rectangle Type 1.
    ExtendedRectangleType1,
    /// Extended Rectangle Type 2.
    ExtendedRectangleType2,
    /// Extended Rectangle Type 3.
    ExtendedRectangleType3,
    /// Extended Rectangle Type 4.
    ExtendedRectangleType4,
    /// Unique Matrix Type 1.
    UniqueMatrixType1,
    /// Unique Matrix Type 2.
    UniqueMatrixType2,
    /// Unique Matrix Type 3.
    UniqueMatrixType3,
    /// Unique Matrix Type 4.
    UniqueMatrixType4,
    /// Unique Loop Type 1.
    UniqueLoopType1,
    /// Unique Loop Type 2.
    UniqueLoopType2,
    /// Unique Loop Type 3.
    UniqueLoopType3,
    /// Unique Loop Type 4.
    UniqueLoopType4,
    /// Rotating Deadly Pattern.
    RotatingDeadlyPattern,
}

impl Technique {
    /// Returns the display name of the technique.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BugType1 => "Bi-value Universal Grave Type 1",
            Self::BugType2 => "Bi-value Universal Grave Type 2",
            Self::BugType3 => "Bi-value Universal Grave Type 3",
            Self::BugType4 => "Bi-value Universal Grave Type 4",
            Self::BugMultiple => "Bi-value Universal Grave + n",
            Self::BugXz => "Bi-value Universal Grave XZ",
            Self::BugFalseCandidate => "Bi-value Universal Grave False Candidate",
            Self::HiddenBug => "Hidden Bi-value Universal Grave",
            Self::BorescoperType1 => "Borescoper's Deadly Pattern Type 1",
            Self::BorescoperType2 => "Borescoper's Deadly Pattern Type 2",
            Self::BorescoperType3 => "Borescoper's Deadly Pattern Type 3",
            Self::BorescoperType4 => "Borescoper's Deadly Pattern Type 4",
            Self::ExtendedRectangleType1 => "Extended Rectangle Type 1",
            Self::ExtendedRectangleType2 => "Extended Rectangle Type 2",
            Self::ExtendedRectangleType3 => "Extended Rectangle Type 3",
            Self::ExtendedRectangleType4 => "Extended Rectangle Type 4",
            Self::UniqueMatrixType1 => "Unique Matrix Type 1",
            Self::UniqueMatrixType2 => "Unique Matrix Type 2",
            Self::UniqueMatrixType3 => "Unique Matrix Type 3",
            Self::UniqueMatrixType4 => "Unique Matrix Type 4",
            Self::UniqueLoopType1 => "Unique Loop Type 1",
            Self::UniqueLoopType2 => "Unique Loop Type 2",
            Self::UniqueLoopType3 => "Unique Loop Type 3",
            Self::UniqueLoopType4 => "Unique Loop Type 4",
            Self::RotatingDeadlyPattern => "Rotating Deadly Pattern",
        }
    }
}

impl Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind of mutation a conclusion proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConclusionKind {
    /// Place the digit at the cell.
    Assign,
    /// Remove the digit from the cell's candidates.
    Eliminate,
}

/// A proposed mutation: assign or eliminate one digit at one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Conclusion {
    kind: ConclusionKind,
    position: Position,
    digit: Digit,
}

impl Conclusion {
    /// Creates an assignment conclusion.
    #[must_use]
    pub const fn assign(position: Position, digit: Digit) -> Self {
        Self {
            kind: ConclusionKind::Assign,
            position,
            digit,
        }
    }

    /// Creates an elimination conclusion.
    #[must_use]
    pub const fn eliminate(position: Position, digit: Digit) -> Self {
        Self {
            kind: ConclusionKind::Eliminate,
            position,
            digit,
        }
    }

    /// Returns the conclusion kind.
    #[must_use]
    pub const fn kind(self) -> ConclusionKind {
        self.kind
    }

    /// Returns the affected cell.
    #[must_use]
    pub const fn position(self) -> Position {
        self.position
    }

    /// Returns the affected digit.
    #[must_use]
    pub const fn digit(self) -> Digit {
        self.digit
    }
}

impl Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            ConclusionKind::Assign => "=",
            ConclusionKind::Eliminate => "<>",
        };
        write!(f, "{} {op} {}", self.position, self.digit)
    }
}

/// Presentation hints attached to a step.
///
/// Consumed by an external rendering layer; the detection core never
/// interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    /// Cells involved in the pattern.
    pub cells: CellMap,
    /// Candidates involved in the pattern.
    pub candidates: CandidateMap,
    /// Houses involved in the pattern.
    pub houses: Vec<House>,
}

impl Highlights {
    /// Creates empty highlights.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a highlighted candidate.
    pub fn push_candidate(&mut self, position: Position, digit: Digit) {
        self.candidates.insert(Candidate::new(position, digit));
    }
}

/// An immutable conclusion record returned to the caller.
///
/// Holds the technique identity, the proposed conclusions, and the
/// presentation hints. Steps are created fresh per detection call, appended
/// to the caller's accumulator, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    technique: Technique,
    conclusions: Vec<Conclusion>,
    highlights: Highlights,
}

impl Step {
    /// Creates a new step.
    #[must_use]
    pub fn new(technique: Technique, conclusions: Vec<Conclusion>, highlights: Highlights) -> Self {
        Self {
            technique,
            conclusions,
            highlights,
        }
    }

    /// Returns the technique identity.
    #[must_use]
    pub const fn technique(&self) -> Technique {
        self.technique
    }

    /// Returns the proposed conclusions.
    #[must_use]
    pub fn conclusions(&self) -> &[Conclusion] {
        &self.conclusions
    }

    /// Returns the presentation hints.
    #[must_use]
    pub const fn highlights(&self) -> &Highlights {
        &self.highlights
    }
}
