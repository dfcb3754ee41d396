/*!
Seat allocation with the D'Hondt highest-averages method.

The votes of every candidate are divided successively by 1, 2, 3, ... and each of the
largest quotients across all candidates, up to the number of seats, awards one seat.

```
use dhondt::{allocate, Candidate};
# use dhondt::AllocationErrors;

let candidates = vec![
    Candidate::new("a", "Alpha", 100),
    Candidate::new("b", "Beta", 50),
    Candidate::new("c", "Gamma", 25),
];
let results = allocate(&candidates, 4)?;
assert_eq!(results[0].id, "a");
assert_eq!(results[0].seats, 3);
assert_eq!(results[1].seats, 1);
assert_eq!(results.len(), 2);
# Ok::<(), AllocationErrors>(())
```
*/
pub mod builder;
mod config;
pub mod manual;

use log::{debug, info};

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
};

pub use crate::config::*;

/// The largest number of quotients (candidates times seats) an allocation may compute.
pub const MAX_QUOTIENTS: usize = 1 << 24;

// **** Private structures ****

/// Position of a candidate in the checked list of candidates.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct CandidateIdx(usize);

/// The exact value votes / divisor.
///
/// Two quotients are equal when they are mathematically equal, whatever the divisor
/// they were computed with (10 / 2 == 5 / 1).
#[derive(Debug, Clone, Copy)]
struct Quotient {
    votes: u64,
    // Never zero.
    divisor: u64,
}

impl Ord for Quotient {
    fn cmp(&self, other: &Quotient) -> Ordering {
        // a/b <=> c/d is a*d <=> c*b for positive denominators. The products fit in 128 bits.
        let lhs = self.votes as u128 * other.divisor as u128;
        let rhs = other.votes as u128 * self.divisor as u128;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Quotient {
    fn partial_cmp(&self, other: &Quotient) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Quotient {
    fn eq(&self, other: &Quotient) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Quotient {}

#[derive(Debug, Clone, Copy)]
struct QuotientEntry {
    candidate: CandidateIdx,
    quotient: Quotient,
}

/// Computes the seats of each candidate with the default rules.
///
/// Arguments:
/// * `candidates` the candidates and their votes. Identifiers must be unique.
/// * `seats` the total number of seats to allocate. It must not be negative, and
///   seats times candidates must not exceed [`MAX_QUOTIENTS`].
///
/// The results only contain the candidates that won at least one seat, sorted by
/// decreasing number of seats, then by name and identifier.
pub fn allocate(
    candidates: &[Candidate],
    seats: i64,
) -> Result<Vec<SeatAllocation>, AllocationErrors> {
    allocate_with_rules(candidates, seats, &AllocationRules::DEFAULT_RULES)
}

/// Computes the seats of each candidate with the given rules.
///
/// Equal quotients are ordered by the tie-break mode of the rules, and then by the
/// candidate identifier. The order of the input never has an influence on the outcome.
pub fn allocate_with_rules(
    candidates: &[Candidate],
    seats: i64,
    rules: &AllocationRules,
) -> Result<Vec<SeatAllocation>, AllocationErrors> {
    info!(
        "Allocating {:?} seats between {:?} candidates, rules: {:?}",
        seats,
        candidates.len(),
        rules
    );

    if seats < 0 {
        return Err(AllocationErrors::InvalidArgument(format!(
            "the number of seats must not be negative, got {}",
            seats
        )));
    }
    let num_seats = usize::try_from(seats).map_err(|_| {
        AllocationErrors::InvalidArgument(format!("too many seats requested: {}", seats))
    })?;

    // Nothing to distribute.
    if num_seats == 0 || candidates.is_empty() {
        debug!("allocate_with_rules: no seat or no candidate, empty result");
        return Ok(Vec::new());
    }

    let checked = checks(candidates, rules.duplicate_candidate_mode)?;
    match num_seats.checked_mul(checked.len()) {
        Some(n) if n <= MAX_QUOTIENTS => {}
        _ => {
            return Err(AllocationErrors::InvalidArgument(format!(
                "too many seats requested: {} seats for {} candidates",
                seats,
                checked.len()
            )));
        }
    }
    let keys = tiebreak_keys(&checked, rules.tiebreak_mode);

    let mut entries = compute_quotients(&checked, num_seats as u64);
    debug!(
        "allocate_with_rules: {:?} quotients for {:?} candidates",
        entries.len(),
        checked.len()
    );
    entries.sort_by(|e1, e2| compare_entries(e1, e2, &checked, &keys));
    entries.truncate(num_seats);
    for (idx, e) in entries.iter().enumerate() {
        debug!(
            "allocate_with_rules: seat {}: {} ({} / {})",
            idx + 1,
            checked[e.candidate.0].id,
            e.quotient.votes,
            e.quotient.divisor
        );
    }

    let tally = count_seats(&entries, checked.len());

    let mut results: Vec<SeatAllocation> = checked
        .iter()
        .zip(tally.iter())
        .filter(|(_, seats)| rules.listing == ResultListing::AllCandidates || **seats > 0)
        .map(|(c, seats)| SeatAllocation {
            id: c.id.clone(),
            name: c.name.clone(),
            votes: c.votes,
            seats: *seats,
        })
        .collect();
    results.sort_by(|r1, r2| {
        r2.seats
            .cmp(&r1.seats)
            .then_with(|| r1.name.cmp(&r2.name))
            .then_with(|| r1.id.cmp(&r2.id))
    });

    for r in results.iter() {
        info!("{:>6} {} ({}) -> {} votes", r.seats, r.name, r.id, r.votes);
    }
    Ok(results)
}

// Candidates are returned in the order of first appearance.
fn checks(
    candidates: &[Candidate],
    duplicate_policy: DuplicateCandidateMode,
) -> Result<Vec<Candidate>, AllocationErrors> {
    match duplicate_policy {
        DuplicateCandidateMode::Reject => {
            let mut seen_ids: HashSet<&str> = HashSet::new();
            for c in candidates.iter() {
                if !seen_ids.insert(c.id.as_str()) {
                    return Err(AllocationErrors::DuplicateCandidate(c.id.clone()));
                }
            }
            Ok(candidates.to_vec())
        }
        DuplicateCandidateMode::Aggregate => {
            let mut positions: HashMap<&str, usize> = HashMap::new();
            let mut res: Vec<Candidate> = Vec::new();
            for c in candidates.iter() {
                if let Some(&pos) = positions.get(c.id.as_str()) {
                    debug!("checks: aggregating duplicate candidate {:?}", c.id);
                    res[pos].votes = res[pos].votes.checked_add(c.votes).ok_or_else(|| {
                        AllocationErrors::InvalidArgument(format!(
                            "vote count overflow for candidate {}",
                            c.id
                        ))
                    })?;
                } else {
                    positions.insert(c.id.as_str(), res.len());
                    res.push(c.clone());
                }
            }
            Ok(res)
        }
    }
}

/// The key used to order candidates with equal quotients, indexed like the candidates.
fn tiebreak_keys(candidates: &[Candidate], tiebreak: TieBreakMode) -> Vec<String> {
    match tiebreak {
        TieBreakMode::CandidateId => candidates.iter().map(|c| c.id.clone()).collect(),
        TieBreakMode::Seeded(seed) => candidates
            .iter()
            .map(|c| seeded_key(seed, c.id.as_str()))
            .collect(),
    }
}

/// A key that is hard to guess in advance but stable for a given seed.
/// This uses a cryptographic hash that is resilient to collisions.
fn seeded_key(seed: u32, id: &str) -> String {
    sha256::digest(format!("{:08}{}", seed, id).as_str())
}

fn compute_quotients(candidates: &[Candidate], seats: u64) -> Vec<QuotientEntry> {
    let mut res: Vec<QuotientEntry> = Vec::with_capacity(candidates.len() * seats as usize);
    for divisor in 1..=seats {
        for (idx, c) in candidates.iter().enumerate() {
            res.push(QuotientEntry {
                candidate: CandidateIdx(idx),
                quotient: Quotient {
                    votes: c.votes,
                    divisor,
                },
            });
        }
    }
    res
}

// Total order: quotient descending, then tie-break key, identifier and divisor ascending.
fn compare_entries(
    e1: &QuotientEntry,
    e2: &QuotientEntry,
    candidates: &[Candidate],
    keys: &[String],
) -> Ordering {
    e2.quotient
        .cmp(&e1.quotient)
        .then_with(|| keys[e1.candidate.0].cmp(&keys[e2.candidate.0]))
        .then_with(|| {
            candidates[e1.candidate.0]
                .id
                .cmp(&candidates[e2.candidate.0].id)
        })
        .then_with(|| e1.quotient.divisor.cmp(&e2.quotient.divisor))
}

fn count_seats(entries: &[QuotientEntry], num_candidates: usize) -> Vec<u64> {
    let mut tally: Vec<u64> = vec![0; num_candidates];
    for e in entries.iter() {
        tally[e.candidate.0] += 1;
    }
    tally
}
