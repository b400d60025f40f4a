//! Shared configuration for property-based tests.
//!
//! Property tests draw hundreds of generator sequences and fill containers with
//! thousands of keys. Under Miri that takes far too long, so the case count is
//! reduced there while still exercising every code path.
//!
//! ```ignore
//! use crate::test_config::miri_case_count;
//!
//! proptest! {
//!     #![proptest_config(ProptestConfig {
//!         cases: miri_case_count(),
//!         ..ProptestConfig::default()
//!     })]
//!     #[test]
//!     fn keys_are_totally_ordered(seed in any::<u64>()) {
//!         // ...
//!     }
//! }
//! ```

/// Number of proptest cases per property: 5 under Miri, 256 otherwise.
#[must_use]
pub const fn miri_case_count() -> u32 {
    if cfg!(miri) {
        5
    } else {
        256
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miri_case_count_matches_cfg() {
        let expected = if cfg!(miri) { 5 } else { 256 };
        assert_eq!(miri_case_count(), expected);
    }
}
