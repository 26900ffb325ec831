//! Determinism testing utilities.
//!
//! Every calculator in `fc_core` is a pure function: identical inputs must
//! give bit-identical outputs, on one thread or many. The harness here runs
//! a computation repeatedly, hashes each result and compares the hashes.
//!
//! Results are hashed through their JSON form, so any `Serialize` value can
//! be checked. Floats serialize with their shortest exact representation,
//! which keeps bit-level differences visible.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use serde::Serialize;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    fn from_hashes(hashes: Vec<u64>) -> Self {
        Self {
            is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
            hashes,
        }
    }

    /// Get all unique hashes (should be 1 for a pure computation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Computation is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Hash a value through its JSON serialization.
///
/// # Panics
///
/// Panics if the value cannot be serialized.
#[must_use]
pub fn result_hash<T: Serialize>(value: &T) -> u64 {
    let json = serde_json::to_string(value).expect("result must serialize");
    let mut hasher = DefaultHasher::new();
    json.hash(&mut hasher);
    hasher.finish()
}

/// Run `compute` `runs` times and verify every result hashes the same.
///
/// # Example
///
/// ```ignore
/// use fc_test_utils::determinism::verify_determinism;
/// use fc_test_utils::fixtures::{sample_ruleset, world};
///
/// let ruleset = sample_ruleset();
/// let result = verify_determinism(5, || {
///     fc_core::combat::calculate_combat(&ruleset, &world(&ruleset, "archers", "phalanx", "hills")).ok()
/// });
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<T, F>(runs: usize, compute: F) -> DeterminismResult
where
    T: Serialize,
    F: Fn() -> T,
{
    let hashes = (0..runs).map(|_| result_hash(&compute())).collect();
    DeterminismResult::from_hashes(hashes)
}

/// Run `compute` on `threads` scoped threads at once and compare the
/// results.
///
/// Catches shared state that only shows up under concurrent use.
///
/// # Panics
///
/// Panics if a worker thread panics.
pub fn verify_parallel_determinism<T, F>(threads: usize, compute: F) -> DeterminismResult
where
    T: Serialize,
    F: Fn() -> T + Sync,
{
    let hashes = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| s.spawn(|| result_hash(&compute())))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("worker thread panicked"))
            .collect()
    });

    tracing::debug!(threads, "parallel determinism run finished");
    DeterminismResult::from_hashes(hashes)
}
