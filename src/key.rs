//! The composite key stored in every benchmarked container.
//!
//! A [`CompositeKey`] is four `u64` fields drawn from a [`RandGen`]. Comparison
//! is lexicographic on `(a, b, c, d)`. Hashing XOR-folds the four fields, which
//! makes it symmetric: permuting the fields changes the order but never the hash.
//! Drawing from a narrow range such as `[1, 20]` therefore produces many hash
//! collisions. That is intentional, because it stresses the hash-based container.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::hash::hash_u64;
use crate::rng::RandGen;

/// Four unsigned 64-bit fields with lexicographic ordering and an
/// order-independent hash.
///
/// Keys are immutable: the fields can be read but not changed after
/// construction. Keys with equal fields are indistinguishable.
///
/// ```
/// use setbench::CompositeKey;
///
/// let x = CompositeKey::new(1, 2, 3, 4);
/// let y = CompositeKey::new(1, 2, 3, 5);
/// assert!(x < y);
/// assert_eq!(x.hash_value(), CompositeKey::new(4, 3, 2, 1).hash_value());
/// ```
// Field order drives the derived Ord: do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompositeKey {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

impl CompositeKey {
    /// Builds a key from explicit field values.
    #[must_use]
    pub const fn new(a: u64, b: u64, c: u64, d: u64) -> Self {
        Self { a, b, c, d }
    }

    /// Builds a key from four consecutive draws of `rand_gen`, assigned to
    /// `a`, `b`, `c` and `d` in that order.
    #[must_use]
    pub fn draw(rand_gen: &mut RandGen) -> Self {
        // Struct literal fields are evaluated in source order
        Self {
            a: rand_gen.next_value(),
            b: rand_gen.next_value(),
            c: rand_gen.next_value(),
            d: rand_gen.next_value(),
        }
    }

    /// The four fields as `[a, b, c, d]`.
    #[must_use]
    pub const fn fields(&self) -> [u64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// XOR of all four fields.
    #[inline]
    #[must_use]
    pub const fn fold(&self) -> u64 {
        self.a ^ self.b ^ self.c ^ self.d
    }

    /// Deterministic hash of the key: [`hash_u64`] of [`fold`](Self::fold).
    ///
    /// Equals what a [`DeterministicHasher`](crate::hash::DeterministicHasher)
    /// produces through the `Hash` impl.
    #[inline]
    #[must_use]
    pub fn hash_value(&self) -> u64 {
        hash_u64(self.fold())
    }
}

impl Hash for CompositeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fold());
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.a, self.b, self.c, self.d)
    }
}

/// Endless stream of keys drawn from a generator.
///
/// ```
/// use setbench::{key::KeyStream, rng::RandGen, CompositeKey};
///
/// let keys: Vec<CompositeKey> = KeyStream::new(RandGen::new(1, 1, 20)?).take(2).collect();
/// assert_eq!(keys[0], CompositeKey::new(1, 13, 14, 10));
/// assert_eq!(keys[1], CompositeKey::new(4, 19, 20, 2));
/// # Ok::<(), setbench::BenchError>(())
/// ```
#[derive(Debug, Clone)]
pub struct KeyStream {
    rand_gen: RandGen,
}

impl KeyStream {
    /// Wraps a generator; each item consumes four draws.
    #[must_use]
    pub const fn new(rand_gen: RandGen) -> Self {
        Self { rand_gen }
    }
}

impl Iterator for KeyStream {
    type Item = CompositeKey;

    #[inline]
    fn next(&mut self) -> Option<CompositeKey> {
        Some(CompositeKey::draw(&mut self.rand_gen))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::hash::{fnv1a_hash, DeterministicBuildHasher};
    use std::cmp::Ordering;
    use std::hash::BuildHasher;

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(CompositeKey::new(1, 2, 3, 4) < CompositeKey::new(1, 2, 3, 5));
        assert!(CompositeKey::new(1, 2, 3, 99) < CompositeKey::new(1, 2, 4, 0));
        assert!(CompositeKey::new(0, 99, 99, 99) < CompositeKey::new(1, 0, 0, 0));
        assert_eq!(
            CompositeKey::new(5, 1, 1, 1).cmp(&CompositeKey::new(5, 1, 1, 1)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_equal_keys_hash_equal() {
        let x = CompositeKey::new(1, 2, 3, 4);
        let y = CompositeKey::new(1, 2, 3, 4);
        assert_eq!(x, y);
        assert_eq!(x.hash_value(), y.hash_value());
    }

    #[test]
    fn test_hash_is_symmetric() {
        let x = CompositeKey::new(1, 2, 3, 4);
        let y = CompositeKey::new(3, 1, 4, 2);
        assert_ne!(x, y);
        assert_eq!(x.hash_value(), y.hash_value());
    }

    #[test]
    fn test_hash_value_matches_hash_impl() {
        let key = CompositeKey::new(17, 3, 9, 20);
        assert_eq!(fnv1a_hash(&key), key.hash_value());
        assert_eq!(DeterministicBuildHasher.hash_one(key), key.hash_value());
    }

    #[test]
    fn test_hash_value_known() {
        // 1 ^ 2 ^ 3 ^ 4 == 4
        assert_eq!(CompositeKey::new(1, 2, 3, 4).fold(), 4);
        assert_eq!(
            CompositeKey::new(1, 2, 3, 4).hash_value(),
            0x2cdc_dc0d_fc5d_1141
        );
    }

    #[test]
    fn test_draw_order() {
        let mut rand_gen = RandGen::new(1, 1, 20).unwrap();
        let key = CompositeKey::draw(&mut rand_gen);
        assert_eq!(key.fields(), [1, 13, 14, 10]);
        assert_eq!(CompositeKey::draw(&mut rand_gen).fields(), [4, 19, 20, 2]);
    }

    #[test]
    fn test_display() {
        assert_eq!(CompositeKey::new(1, 2, 3, 4).to_string(), "(1, 2, 3, 4)");
    }
}
