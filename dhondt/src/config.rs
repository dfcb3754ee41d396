// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A party (or list) taking part in the allocation.
///
/// The identifier is the key used to aggregate seats. The name is only used to order
/// the results and does not need to be unique.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub votes: u64,
}

impl Candidate {
    pub fn new(id: &str, name: &str, votes: u64) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: name.to_string(),
            votes,
        }
    }
}

// ******** Output data structures *********

/// The final number of seats of one candidate.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct SeatAllocation {
    pub id: String,
    pub name: String,
    pub votes: u64,
    pub seats: u64,
}

/// Errors that prevent the allocation from completing successfully.
///
/// No partial result is ever returned alongside an error.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AllocationErrors {
    /// An argument is out of its domain (for example a negative number of seats).
    InvalidArgument(String),
    /// The same identifier was provided for more than one candidate.
    DuplicateCandidate(String),
    /// A candidate with the same name was already registered in a builder.
    DuplicateName(String),
}

impl Error for AllocationErrors {}

impl Display for AllocationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationErrors::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            AllocationErrors::DuplicateCandidate(id) => {
                write!(f, "duplicate candidate identifier: {}", id)
            }
            AllocationErrors::DuplicateName(name) => {
                write!(f, "a candidate named {} is already registered", name)
            }
        }
    }
}

// ********* Configuration **********

/// How to order quotients that are exactly equal.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// The candidate with the smallest identifier (lexicographic) takes the seat.
    CandidateId,
    /// Candidates are ordered by a cryptographic hash of the seed and their identifier.
    /// The order is hard to guess in advance but is reproducible for a given seed.
    Seeded(u32),
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DuplicateCandidateMode {
    /// Fail with `DuplicateCandidate`.
    Reject,
    /// Merge the entries sharing an identifier: votes are summed and the first name is kept.
    Aggregate,
}

/// Which candidates are reported in the results.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ResultListing {
    /// Only the candidates that won at least one seat.
    WinnersOnly,
    /// All the candidates, including the ones with zero seats.
    AllCandidates,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AllocationRules {
    pub tiebreak_mode: TieBreakMode,
    pub duplicate_candidate_mode: DuplicateCandidateMode,
    pub listing: ResultListing,
}

impl AllocationRules {
    pub const DEFAULT_RULES: AllocationRules = AllocationRules {
        tiebreak_mode: TieBreakMode::CandidateId,
        duplicate_candidate_mode: DuplicateCandidateMode::Reject,
        listing: ResultListing::WinnersOnly,
    };
}

impl Default for AllocationRules {
    fn default() -> Self {
        AllocationRules::DEFAULT_RULES
    }
}
