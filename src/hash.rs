//! Deterministic hashing utilities.
//!
//! `std::collections::hash_map::DefaultHasher` is seeded randomly per process,
//! so bucket layout, load behaviour and any hash-derived checksum differ from run
//! to run. A benchmark that is meant to be reproducible cannot have that, so
//! every hash in this crate goes through the fixed FNV-1a function below.
//!
//! # Usage
//!
//! ```
//! use setbench::hash::{hash_u64, DeterministicBuildHasher};
//! use std::collections::HashSet;
//!
//! // The same integer always hashes to the same value.
//! assert_eq!(hash_u64(42), hash_u64(42));
//!
//! // Plug the hasher into std collections.
//! let mut set: HashSet<u64, DeterministicBuildHasher> =
//!     HashSet::with_hasher(DeterministicBuildHasher);
//! set.insert(7);
//! ```
//!
//! # Algorithm
//!
//! FNV-1a, 64-bit variant. Integer writes are fed little-endian so the result
//! does not depend on the host byte order. Not cryptographically secure.

use std::hash::{Hash, Hasher};

/// FNV-1a 64-bit offset basis constant.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime constant.
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// A deterministic hasher using the FNV-1a algorithm.
///
/// ```
/// use setbench::hash::DeterministicHasher;
/// use std::hash::{Hash, Hasher};
///
/// let mut hasher = DeterministicHasher::new();
/// 42u64.hash(&mut hasher);
/// let hash = hasher.finish();
///
/// let mut hasher2 = DeterministicHasher::new();
/// 42u64.hash(&mut hasher2);
/// assert_eq!(hash, hasher2.finish());
/// ```
#[derive(Debug, Clone)]
pub struct DeterministicHasher {
    state: u64,
}

impl DeterministicHasher {
    /// Creates a new `DeterministicHasher` with the standard FNV-1a offset basis.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }
}

impl Default for DeterministicHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for DeterministicHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        // FNV-1a: for each byte, XOR then multiply
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    #[inline]
    fn write_u64(&mut self, value: u64) {
        self.write(&value.to_le_bytes());
    }
}

/// Hashes a single `u64` with FNV-1a over its little-endian bytes.
///
/// This is the general-purpose integer hash that [`CompositeKey`] feeds its
/// XOR-folded fields through.
///
/// [`CompositeKey`]: crate::CompositeKey
#[inline]
#[must_use]
pub fn hash_u64(value: u64) -> u64 {
    let mut hasher = DeterministicHasher::new();
    hasher.write_u64(value);
    hasher.finish()
}

/// Computes a deterministic FNV-1a hash of any hashable value.
#[inline]
pub fn fnv1a_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DeterministicHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A [`std::hash::BuildHasher`] that creates [`DeterministicHasher`] instances.
///
/// Used as the hasher of the benchmarked `HashSet`, so that bucket placement
/// and capacity growth are identical on every run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicBuildHasher;

impl std::hash::BuildHasher for DeterministicBuildHasher {
    type Hasher = DeterministicHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        DeterministicHasher::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_u64_consistency() {
        assert_eq!(hash_u64(42), hash_u64(42));
        assert_ne!(hash_u64(42), hash_u64(43));
    }

    #[test]
    fn test_hash_u64_known_values() {
        // FNV-1a over the 8 little-endian bytes of the value
        assert_eq!(hash_u64(0), 0xa8c7_f832_281a_39c5);
        assert_eq!(hash_u64(1 ^ 2 ^ 3 ^ 4), 0x2cdc_dc0d_fc5d_1141);
    }

    #[test]
    fn test_hash_trait_matches_hash_u64() {
        // u64::hash goes through write_u64, which must agree with hash_u64
        assert_eq!(fnv1a_hash(&1234u64), hash_u64(1234));
    }

    #[test]
    fn test_deterministic_hasher_empty() {
        let hasher = DeterministicHasher::new();
        assert_eq!(hasher.finish(), FNV_OFFSET_BASIS);
    }

    #[test]
    fn test_known_fnv1a_values() {
        // FNV-1a("a") = 0xaf63dc4c8601ec8c
        let mut hasher = DeterministicHasher::new();
        hasher.write(b"a");
        assert_eq!(hasher.finish(), 0xaf63_dc4c_8601_ec8c);

        // FNV-1a("foobar") = 0x85944171f73967e8
        let mut hasher = DeterministicHasher::new();
        hasher.write(b"foobar");
        assert_eq!(hasher.finish(), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn test_build_hasher() {
        use std::collections::HashSet;

        let mut set: HashSet<u64, DeterministicBuildHasher> =
            HashSet::with_hasher(DeterministicBuildHasher);
        set.insert(1);
        set.insert(2);
        set.insert(1);

        assert_eq!(set.len(), 2);
        assert!(set.contains(&2));
    }
}
