//! Randomness source for bundle generation
//!
//! All randomized values (identifiers, demographic pick, patient serial)
//! flow through one trait so deterministic tests can script the sequence
//! without touching the generator's structure.

use rand::Rng;
use uuid::Uuid;

/// Source of the randomized values in a generated bundle.
pub trait Entropy {
    /// A fresh opaque identifier, globally-unique-looking.
    fn next_id(&mut self) -> String;

    /// An index in `0..len` for roster selection. `len` is never 0.
    fn pick(&mut self, len: usize) -> usize;

    /// Serial for the synthetic patient identifier, in `0..100_000`.
    fn patient_serial(&mut self) -> u32;
}

/// Process-wide randomness: UUID v4 identifiers and the thread-local RNG.
///
/// Deliberately unseeded and non-reproducible; generated bundles are
/// synthetic and never persisted.
#[derive(Debug, Default)]
pub struct OsEntropy;

impl Entropy for OsEntropy {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }

    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }

    fn patient_serial(&mut self) -> u32 {
        rand::thread_rng().gen_range(0..100_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_entropy_ids_are_unique() {
        let mut entropy = OsEntropy;
        assert_ne!(entropy.next_id(), entropy.next_id());
    }

    #[test]
    fn os_entropy_respects_bounds() {
        let mut entropy = OsEntropy;
        for _ in 0..100 {
            assert!(entropy.pick(5) < 5);
            assert!(entropy.patient_serial() < 100_000);
        }
    }
}
