pub use crate::config::*;

/// A builder for registering parties one at a time.
///
/// A party whose name or identifier is already registered is refused.
///
/// ```
/// pub use dhondt::builder::Builder;
/// pub use dhondt::AllocationRules;
/// # use dhondt::AllocationErrors;
///
/// let mut builder = Builder::new(&AllocationRules::DEFAULT_RULES)?;
///
/// builder.add_party("Greens", 1200)?;
/// builder.add_party("Liberals", 800)?;
/// assert!(builder.add_party("Greens", 10).is_err());
///
/// let results = builder.allocate(5)?;
/// assert_eq!(results[0].name, "Greens");
/// assert_eq!(results[0].seats, 3);
///
/// # Ok::<(), AllocationErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: AllocationRules,
    pub(crate) _candidates: Vec<Candidate>,
}

impl Builder {
    pub fn new(rules: &AllocationRules) -> Result<Builder, AllocationErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _candidates: Vec::new(),
        })
    }

    /// Registers a party, with an identifier generated from its position (`party-1`,
    /// `party-2`, ...). Returns the identifier.
    pub fn add_party(&mut self, name: &str, votes: u64) -> Result<String, AllocationErrors> {
        let id = format!("party-{}", self._candidates.len() + 1);
        self.add_candidate(&id, name, votes)?;
        Ok(id)
    }

    pub fn add_candidate(
        &mut self,
        id: &str,
        name: &str,
        votes: u64,
    ) -> Result<(), AllocationErrors> {
        if self._candidates.iter().any(|c| c.name == name) {
            return Err(AllocationErrors::DuplicateName(name.to_string()));
        }
        if self._candidates.iter().any(|c| c.id == id) {
            return Err(AllocationErrors::DuplicateCandidate(id.to_string()));
        }
        self._candidates.push(Candidate::new(id, name, votes));
        Ok(())
    }

    /// The registered candidates, in registration order.
    pub fn candidates(&self) -> &[Candidate] {
        &self._candidates
    }

    pub fn allocate(&self, seats: i64) -> Result<Vec<SeatAllocation>, AllocationErrors> {
        crate::allocate_with_rules(&self._candidates, seats, &self._rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_identifiers() {
        let mut builder = Builder::new(&AllocationRules::DEFAULT_RULES).unwrap();
        assert_eq!(builder.add_party("A", 10), Ok("party-1".to_string()));
        assert_eq!(builder.add_party("B", 20), Ok("party-2".to_string()));
        let ids: Vec<&str> = builder.candidates().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["party-1", "party-2"]);
    }

    #[test]
    fn duplicate_names_refused() {
        let mut builder = Builder::new(&AllocationRules::DEFAULT_RULES).unwrap();
        builder.add_candidate("1", "A", 10).unwrap();
        assert_eq!(
            builder.add_candidate("2", "A", 10),
            Err(AllocationErrors::DuplicateName("A".to_string()))
        );
        assert_eq!(
            builder.add_candidate("1", "B", 10),
            Err(AllocationErrors::DuplicateCandidate("1".to_string()))
        );
        assert_eq!(builder.candidates().len(), 1);
    }

    #[test]
    fn uses_the_rules() {
        let rules = AllocationRules {
            listing: ResultListing::AllCandidates,
            ..AllocationRules::DEFAULT_RULES
        };
        let mut builder = Builder::new(&rules).unwrap();
        builder.add_party("Big", 1000).unwrap();
        builder.add_party("Small", 1).unwrap();
        let res = builder.allocate(3).unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].seats, 3);
        assert_eq!(res[1].seats, 0);
        assert!(matches!(
            builder.allocate(-2),
            Err(AllocationErrors::InvalidArgument(_))
        ));
    }
}
