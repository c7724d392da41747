//! Retry loop around the generator and verifier

use super::generator::{generate_candidate, AttemptFailure};
use super::verifier::{verify_assignment, Violation};
use super::Assignment;
use crate::config::SearchConfig;
use crate::error::SantaError;
use crate::roster::Roster;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Accepted assignment together with the search statistics
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub assignment: Assignment,
    pub elapsed: Duration,
    pub attempts: u64,
    pub failures: u64,
}

/// Retry loop states
#[derive(Debug)]
enum SearchState {
    Searching,
    Accepted(Assignment),
    TimedOut,
}

/// Outer retry loop: generate, verify, repeat until accepted or out of time
pub struct DerangementSearch<'a> {
    roster: &'a Roster,
    attempt_timeout: Duration,
    global_timeout: Duration,
    verbose: bool,
}

impl<'a> DerangementSearch<'a> {
    pub fn new(roster: &'a Roster, config: &SearchConfig) -> Self {
        Self {
            roster,
            attempt_timeout: config.attempt_timeout(),
            global_timeout: config.global_timeout(),
            verbose: false,
        }
    }

    /// Override both budgets directly
    pub fn with_timeouts(mut self, attempt_timeout: Duration, global_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self.global_timeout = global_timeout;
        self
    }

    /// Report verifier rejections on stderr
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the search with the given random source
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SearchOutcome, SantaError> {
        let start = Instant::now();
        let mut state = SearchState::Searching;
        let mut attempts = 0u64;
        let mut failures = 0u64;
        let mut last_rejection: Option<Violation> = None;

        while let SearchState::Searching = state {
            attempts += 1;

            match generate_candidate(self.roster, rng, self.attempt_timeout) {
                Err(AttemptFailure::InsufficientParticipants) => {
                    return Err(SantaError::InsufficientParticipants(self.roster.len()));
                }
                Err(AttemptFailure::TimedOut) => failures += 1,
                Ok(candidate) => match verify_assignment(candidate.as_slice(), self.roster) {
                    Ok(()) => {
                        state = SearchState::Accepted(candidate);
                        continue;
                    }
                    Err(violation) => {
                        if self.verbose {
                            eprintln!("Attempt {} rejected: {}", attempts, violation);
                        }
                        last_rejection = Some(violation);
                        failures += 1;
                    }
                },
            }

            if start.elapsed() > self.global_timeout {
                state = SearchState::TimedOut;
            }
        }

        match state {
            SearchState::Accepted(assignment) => Ok(SearchOutcome {
                assignment,
                elapsed: start.elapsed(),
                attempts,
                failures,
            }),
            SearchState::TimedOut | SearchState::Searching => Err(SantaError::SearchExhausted {
                attempts,
                failures,
                elapsed: start.elapsed(),
                last_rejection,
            }),
        }
    }
}

/// Random source for a run: fixed seed when given, otherwise the clock
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{builtin_roster, Exclusions};
    use std::collections::HashSet;

    fn open_roster(n: usize) -> Roster {
        let names = (0..n).map(|i| format!("p{}", i)).collect();
        Roster::with_partial_exclusions(names, Exclusions::new()).unwrap()
    }

    fn fast() -> (Duration, Duration) {
        (Duration::from_millis(10), Duration::from_millis(200))
    }

    #[test]
    fn test_accepted_assignments_hold_invariants() {
        let names: Vec<String> = (0..6).map(|i| format!("p{}", i)).collect();
        let mut exclusions = Exclusions::new();
        exclusions.insert("p0".into(), HashSet::from(["p1".to_string(), "p2".to_string()]));
        exclusions.insert("p1".into(), HashSet::from(["p0".to_string(), "p3".to_string()]));
        exclusions.insert("p4".into(), HashSet::from(["p5".to_string()]));
        let roster = Roster::with_partial_exclusions(names.clone(), exclusions).unwrap();
        let (attempt, _) = fast();

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = DerangementSearch::new(&roster, &SearchConfig::default())
                .with_timeouts(attempt, Duration::from_secs(5))
                .run(&mut rng)
                .unwrap();
            let a = outcome.assignment.as_slice();

            assert_eq!(a.len(), 6);
            assert_eq!(a.iter().collect::<HashSet<_>>().len(), 6);
            for (giver, &recipient) in a.iter().enumerate() {
                assert_ne!(recipient, giver, "seed {seed}");
                assert_ne!(a[recipient], giver, "seed {seed}");
                let excluded = roster.excluded_by(&names[giver]).unwrap();
                assert!(!excluded.contains(&names[recipient]), "seed {seed}");
            }
            assert_eq!(outcome.attempts, outcome.failures + 1);
        }
    }

    #[test]
    fn test_builtin_table_has_single_answer() {
        // p1 -> p3, p2 -> p1, p3 -> p2 is the only admissible 3-cycle
        let roster = builtin_roster().unwrap();
        let mut rng = seeded_rng(Some(2024));
        let (attempt, global) = fast();

        let outcome = DerangementSearch::new(&roster, &SearchConfig::default())
            .with_timeouts(attempt, global)
            .run(&mut rng)
            .unwrap();

        assert_eq!(outcome.assignment.as_slice(), [2, 0, 1]);
        assert_eq!(outcome.failures, 0);
    }

    #[test]
    fn test_two_participants_exhaust_search() {
        let roster = open_roster(2);
        let mut rng = seeded_rng(Some(1));
        let (attempt, global) = fast();

        let result = DerangementSearch::new(&roster, &SearchConfig::default())
            .with_timeouts(attempt, global)
            .run(&mut rng);

        match result {
            Err(SantaError::SearchExhausted {
                attempts,
                failures,
                last_rejection,
                ..
            }) => {
                assert!(attempts > 0);
                assert_eq!(attempts, failures);
                assert_eq!(last_rejection, Some(Violation::TwoCycle { first: 0, second: 1 }));
            }
            other => panic!("expected search exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_single_participant_fails_immediately() {
        let roster = open_roster(1);
        let mut rng = seeded_rng(Some(1));

        let result = DerangementSearch::new(&roster, &SearchConfig::default()).run(&mut rng);
        assert!(matches!(result, Err(SantaError::InsufficientParticipants(1))));
    }

    #[test]
    fn test_unsatisfiable_exclusions_respect_global_timeout() {
        let names: Vec<String> = (0..3).map(|i| format!("p{}", i)).collect();
        let exclusions: Exclusions = names
            .iter()
            .map(|giver| (giver.clone(), names.iter().cloned().collect()))
            .collect();
        let roster = Roster::new(names, exclusions).unwrap();
        let mut rng = seeded_rng(Some(3));

        let start = Instant::now();
        let result = DerangementSearch::new(&roster, &SearchConfig::default())
            .with_timeouts(Duration::from_millis(5), Duration::from_millis(50))
            .run(&mut rng);

        assert!(matches!(
            result,
            Err(SantaError::SearchExhausted { last_rejection: None, .. })
        ));
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
