//! Candidate name generation.
//!
//! Produces batches of distinct base names drawn uniformly at random from a
//! configurable alphabet. Distinctness is guaranteed by rejection sampling:
//! collisions are regenerated until the requested number of unique names has
//! been collected, in first-generation order.
//!
//! Randomness is injected through the [`RandomSource`] trait so tests can run
//! deterministically with a seeded or scripted source.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::DomainHuntError;

/// Source of uniform random indices for candidate generation.
///
/// Implementations must return values in `0..bound` for `bound >= 1`.
pub trait RandomSource {
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Default source backed by the thread-local RNG. Not reproducible across runs.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        rand::rng().random_range(0..bound)
    }
}

/// Seedable source for reproducible generation (tests, `--seed` runs).
#[derive(Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Total number of distinct strings of `length` characters over `alphabet`.
///
/// Computed in u128; `None` means the true capacity overflows even u128 and
/// is effectively unbounded for any realistic request.
pub fn generation_capacity(alphabet_len: usize, length: usize) -> Option<u128> {
    let length: u32 = length.try_into().ok()?;
    (alphabet_len as u128).checked_pow(length)
}

/// Generate `count` distinct candidate names of exactly `length` characters
/// drawn uniformly from `alphabet`.
///
/// Output order is insertion order of first successful generation, not
/// sorted. Fails fast with `CapacityExceeded` when `count` exceeds the
/// number of distinct strings the alphabet can produce, since the rejection
/// loop could never terminate.
pub fn generate_candidates(
    length: usize,
    count: usize,
    alphabet: &[char],
    random: &mut dyn RandomSource,
) -> Result<Vec<String>, DomainHuntError> {
    if length == 0 {
        return Err(DomainHuntError::config(
            "candidate length must be at least 1",
        ));
    }
    if count == 0 {
        return Err(DomainHuntError::config(
            "candidate count must be at least 1",
        ));
    }
    if alphabet.is_empty() {
        return Err(DomainHuntError::config(
            "generation alphabet cannot be empty",
        ));
    }

    // Repeated characters don't enlarge the space of distinct names, and
    // would skew sampling toward them; collapse duplicates first so the
    // capacity guard is computed over what can actually be produced.
    let alphabet: Vec<char> = {
        let mut seen = HashSet::new();
        alphabet.iter().copied().filter(|c| seen.insert(*c)).collect()
    };

    // The distinctness loop can only terminate if the alphabet can produce
    // enough unique strings. An overflowed capacity is unreachable anyway.
    if let Some(capacity) = generation_capacity(alphabet.len(), length) {
        if count as u128 > capacity {
            return Err(DomainHuntError::capacity_exceeded(count, capacity));
        }
    }

    let mut seen: HashSet<String> = HashSet::with_capacity(count);
    let mut names: Vec<String> = Vec::with_capacity(count);

    while names.len() < count {
        let name: String = (0..length)
            .map(|_| alphabet[random.next_index(alphabet.len())])
            .collect();

        if seen.insert(name.clone()) {
            names.push(name);
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed index script, cycling when exhausted. Lets tests pin
    /// down exactly which candidates come out, in which order.
    pub(crate) struct ScriptedRandom {
        indices: Vec<usize>,
        position: usize,
    }

    impl ScriptedRandom {
        pub(crate) fn new(indices: Vec<usize>) -> Self {
            Self {
                indices,
                position: 0,
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_index(&mut self, bound: usize) -> usize {
            let index = self.indices[self.position % self.indices.len()] % bound;
            self.position += 1;
            index
        }
    }

    fn lowercase() -> Vec<char> {
        ('a'..='z').collect()
    }

    // ── Uniqueness and shape ────────────────────────────────────────

    #[test]
    fn test_generates_requested_count() {
        let mut random = SeededRandom::new(7);
        let names = generate_candidates(3, 50, &lowercase(), &mut random).unwrap();
        assert_eq!(names.len(), 50);
    }

    #[test]
    fn test_all_names_distinct() {
        let mut random = SeededRandom::new(7);
        let names = generate_candidates(3, 100, &lowercase(), &mut random).unwrap();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_exact_length_and_alphabet() {
        let alphabet = vec!['x', 'y', 'z'];
        let mut random = SeededRandom::new(42);
        let names = generate_candidates(4, 20, &alphabet, &mut random).unwrap();
        for name in &names {
            assert_eq!(name.chars().count(), 4);
            assert!(name.chars().all(|c| alphabet.contains(&c)), "bad name {}", name);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut first = SeededRandom::new(123);
        let mut second = SeededRandom::new(123);
        let a = generate_candidates(3, 30, &lowercase(), &mut first).unwrap();
        let b = generate_candidates(3, 30, &lowercase(), &mut second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scripted_generation_order() {
        // Indices 0,0,0 → "aaa"; 1,1,1 → "bbb"; then a collision with "aaa"
        // is rejected and 2,2,2 → "ccc" lands third.
        let mut random = ScriptedRandom::new(vec![0, 0, 0, 1, 1, 1, 0, 0, 0, 2, 2, 2]);
        let names = generate_candidates(3, 3, &lowercase(), &mut random).unwrap();
        assert_eq!(names, vec!["aaa", "bbb", "ccc"]);
    }

    // ── Capacity guard ──────────────────────────────────────────────

    #[test]
    fn test_capacity_exceeded_fails_fast() {
        let alphabet = vec!['a', 'b'];
        let mut random = SeededRandom::new(1);
        // 2^2 = 4 possible names, 5 requested
        let result = generate_candidates(2, 5, &alphabet, &mut random);
        match result {
            Err(DomainHuntError::CapacityExceeded {
                requested,
                capacity,
            }) => {
                assert_eq!(requested, 5);
                assert_eq!(capacity, 4);
            }
            other => panic!("expected CapacityExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_capacity_boundary_succeeds() {
        let alphabet = vec!['a', 'b'];
        let mut random = SeededRandom::new(1);
        // count == capacity: must enumerate the full space and terminate
        let names = generate_candidates(2, 4, &alphabet, &mut random).unwrap();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), 4);
        for name in ["aa", "ab", "ba", "bb"] {
            assert!(names.contains(&name.to_string()));
        }
    }

    #[test]
    fn test_repeated_alphabet_characters_collapse() {
        // ['a', 'a'] can only ever produce "a": asking for two names must
        // fail fast instead of rejection-sampling forever.
        let alphabet = vec!['a', 'a'];
        let mut random = SeededRandom::new(1);
        match generate_candidates(1, 2, &alphabet, &mut random) {
            Err(DomainHuntError::CapacityExceeded {
                requested,
                capacity,
            }) => {
                assert_eq!(requested, 2);
                assert_eq!(capacity, 1);
            }
            other => panic!("expected CapacityExceeded, got {:?}", other),
        }

        // within the deduplicated capacity, generation still works
        let names = generate_candidates(1, 1, &alphabet, &mut random).unwrap();
        assert_eq!(names, vec!["a"]);

        let mut random = SeededRandom::new(1);
        let names = generate_candidates(2, 4, &['a', 'b', 'a', 'b'], &mut random).unwrap();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_single_letter_alphabet() {
        let alphabet = vec!['q'];
        let mut random = SeededRandom::new(1);
        let names = generate_candidates(3, 1, &alphabet, &mut random).unwrap();
        assert_eq!(names, vec!["qqq"]);

        let result = generate_candidates(3, 2, &alphabet, &mut random);
        assert!(matches!(
            result,
            Err(DomainHuntError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_huge_length_does_not_overflow() {
        // 26^64 overflows u128 — capacity is treated as unbounded and the
        // guard lets a small request through.
        let mut random = SeededRandom::new(9);
        let names = generate_candidates(64, 2, &lowercase(), &mut random).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[0].len(), 64);
    }

    #[test]
    fn test_generation_capacity() {
        assert_eq!(generation_capacity(26, 3), Some(17_576));
        assert_eq!(generation_capacity(2, 10), Some(1024));
        assert_eq!(generation_capacity(26, 64), None); // overflows u128
    }

    // ── Input validation ────────────────────────────────────────────

    #[test]
    fn test_zero_length_rejected() {
        let mut random = SeededRandom::new(1);
        let result = generate_candidates(0, 5, &lowercase(), &mut random);
        assert!(matches!(result, Err(DomainHuntError::ConfigError { .. })));
    }

    #[test]
    fn test_zero_count_rejected() {
        let mut random = SeededRandom::new(1);
        let result = generate_candidates(3, 0, &lowercase(), &mut random);
        assert!(matches!(result, Err(DomainHuntError::ConfigError { .. })));
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        let mut random = SeededRandom::new(1);
        let result = generate_candidates(3, 5, &[], &mut random);
        assert!(matches!(result, Err(DomainHuntError::ConfigError { .. })));
    }
}
