//! Rejection-sampling candidate generator

use super::Assignment;
use crate::roster::Roster;
use rand::Rng;
use std::time::{Duration, Instant};

/// Why a single attempt produced no candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptFailure {
    /// Fewer than two participants; no derangement exists
    InsufficientParticipants,
    /// The attempt ran past its time budget
    TimedOut,
}

/// Build one candidate assignment position by position.
///
/// For each giver a recipient index is drawn uniformly from `[0, n)` and
/// kept only if it is unused, not the giver, and not excluded. There is no
/// backtracking: a committed prefix may leave no admissible value for a
/// later position, in which case the attempt runs until `timeout` and
/// reports [`AttemptFailure::TimedOut`].
pub fn generate_candidate<R: Rng + ?Sized>(
    roster: &Roster,
    rng: &mut R,
    timeout: Duration,
) -> Result<Assignment, AttemptFailure> {
    let n = roster.len();
    if n < 2 {
        return Err(AttemptFailure::InsufficientParticipants);
    }

    let start = Instant::now();
    let mut used = vec![false; n];
    let mut recipients = Vec::with_capacity(n);

    for giver in 0..n {
        loop {
            if start.elapsed() > timeout {
                return Err(AttemptFailure::TimedOut);
            }

            let candidate = rng.random_range(0..n);
            if !used[candidate] && roster.can_give(giver, candidate) {
                used[candidate] = true;
                recipients.push(candidate);
                break;
            }
        }
    }

    Ok(Assignment::new(recipients))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Exclusions, Roster};
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use std::collections::HashSet;

    fn open_roster(n: usize) -> Roster {
        let names = (0..n).map(|i| format!("p{}", i)).collect();
        Roster::with_partial_exclusions(names, Exclusions::new()).unwrap()
    }

    #[test]
    fn test_candidate_respects_admissibility() {
        let roster = open_roster(8);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let candidate = generate_candidate(&roster, &mut rng, Duration::from_secs(1)).unwrap();
            assert_eq!(candidate.len(), 8);

            let distinct: HashSet<_> = candidate.as_slice().iter().collect();
            assert_eq!(distinct.len(), 8);
            for (giver, &recipient) in candidate.as_slice().iter().enumerate() {
                assert!(roster.can_give(giver, recipient));
            }
        }
    }

    #[test]
    fn test_same_seed_same_candidate() {
        let roster = open_roster(10);
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);

        let first = generate_candidate(&roster, &mut a, Duration::from_secs(1));
        let second = generate_candidate(&roster, &mut b, Duration::from_secs(1));
        assert_eq!(first, second);
    }

    #[test]
    fn test_insufficient_participants_leaves_rng_untouched() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut probe = rng.clone();

        for n in [0, 1] {
            let roster = open_roster(n);
            let result = generate_candidate(&roster, &mut rng, Duration::from_secs(1));
            assert_eq!(result, Err(AttemptFailure::InsufficientParticipants));
        }

        assert_eq!(rng.next_u64(), probe.next_u64());
    }

    #[test]
    fn test_unsatisfiable_exclusions_time_out() {
        let names: Vec<String> = (0..4).map(|i| format!("p{}", i)).collect();
        let exclusions: Exclusions = names
            .iter()
            .map(|giver| (giver.clone(), names.iter().cloned().collect()))
            .collect();
        let roster = Roster::new(names, exclusions).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let timeout = Duration::from_millis(20);
        let start = Instant::now();
        let result = generate_candidate(&roster, &mut rng, timeout);

        assert_eq!(result, Err(AttemptFailure::TimedOut));
        assert!(start.elapsed() < timeout * 50);
    }
}
