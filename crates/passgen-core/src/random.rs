//! Cryptographically secure integer generation.
//!
//! A [`RandomSource`] only has to produce raw 32-bit draws; the closed-range
//! reduction in [`RandomSource::next_in_range`] is shared by every source.
//! The reduction is a plain modulo over the 2^32 draw space and keeps the
//! (small, bounded) modulo bias for spans that do not divide 2^32.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::GeneratorError;

/// Default lower bound for [`random_number`](crate::random_number).
pub const DEFAULT_MIN_VALUE: i32 = 0;

/// Default upper bound for [`random_number`](crate::random_number).
pub const DEFAULT_MAX_VALUE: i32 = 100;

/// A source of uniformly distributed 32-bit values.
///
/// Implementations must be safe to share between generation workers.
/// Production code uses [`OsRandom`]; deterministic sources are only meant
/// for tests.
pub trait RandomSource: Send + Sync {
    /// Draw 32 fresh random bits.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Entropy`] if the underlying source fails.
    fn next_u32(&self) -> Result<u32, GeneratorError>;

    /// Draw an integer in the closed range `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidRange`] if `min > max`, or
    /// [`GeneratorError::Entropy`] if the draw fails.
    fn next_in_range(&self, min: i32, max: i32) -> Result<i32, GeneratorError> {
        if min > max {
            return Err(GeneratorError::InvalidRange { min, max });
        }
        // Span is at most 2^32, so it always fits in u64/i64.
        let span = i64::from(max)
            .checked_sub(i64::from(min))
            .and_then(|d| d.checked_add(1))
            .and_then(|s| u64::try_from(s).ok())
            .ok_or(GeneratorError::InvalidRange { min, max })?;
        let offset = u64::from(self.next_u32()?)
            .checked_rem(span)
            .and_then(|r| i64::try_from(r).ok())
            .ok_or(GeneratorError::InvalidRange { min, max })?;
        i64::from(min)
            .checked_add(offset)
            .and_then(|v| i32::try_from(v).ok())
            .ok_or(GeneratorError::InvalidRange { min, max })
    }

    /// Draw an index in `[0, upper]`, the form used for alphabet and shuffle
    /// positions.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidArgument`] if `upper` does not fit the
    /// 32-bit draw range, or [`GeneratorError::Entropy`] if the draw fails.
    fn next_index(&self, upper: usize) -> Result<usize, GeneratorError> {
        let max = i32::try_from(upper).map_err(|_| {
            GeneratorError::InvalidArgument(format!("index bound {upper} exceeds i32::MAX"))
        })?;
        let value = self.next_in_range(0, max)?;
        usize::try_from(value)
            .map_err(|_| GeneratorError::InvalidArgument(format!("negative index {value}")))
    }
}

/// [`RandomSource`] backed by the operating system CSPRNG (`OsRng`).
///
/// Stateless: every draw asks the OS for fresh entropy, so one value can be
/// shared by any number of threads without locking.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_u32(&self) -> Result<u32, GeneratorError> {
        let mut bytes = [0u8; 4];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| GeneratorError::Entropy(format!("CSPRNG fill failed: {e}")))?;
        Ok(u32::from_le_bytes(bytes))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn next_u32(&self) -> Result<u32, GeneratorError> {
        (**self).next_u32()
    }
}

/// Parameters of a random number request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberRequest {
    /// Inclusive lower bound.
    pub min: i32,
    /// Inclusive upper bound.
    pub max: i32,
}

impl Default for NumberRequest {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_VALUE,
            max: DEFAULT_MAX_VALUE,
        }
    }
}

/// Draw an integer in `[min, max]` from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`GeneratorError::InvalidRange`] if `min > max`, or
/// [`GeneratorError::Entropy`] if the OS entropy source fails.
pub fn random_number(min: i32, max: i32) -> Result<i32, GeneratorError> {
    OsRandom.next_in_range(min, max)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays a fixed list of raw draws, wrapping around.
    struct Replay {
        draws: Vec<u32>,
        cursor: AtomicUsize,
    }

    impl Replay {
        fn new(draws: &[u32]) -> Self {
            Self {
                draws: draws.to_vec(),
                cursor: AtomicUsize::new(0),
            }
        }
    }

    impl RandomSource for Replay {
        fn next_u32(&self) -> Result<u32, GeneratorError> {
            let i = self.cursor.fetch_add(1, Ordering::Relaxed);
            Ok(self.draws[i % self.draws.len()])
        }
    }

    #[test]
    fn inverted_range_rejected() {
        let err = OsRandom.next_in_range(10, 9).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidRange { min: 10, max: 9 }));
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn single_value_range() {
        for _ in 0..100 {
            assert_eq!(OsRandom.next_in_range(5, 5).unwrap(), 5);
        }
    }

    #[test]
    fn default_range_hits_both_bounds() {
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..20_000 {
            let n = OsRandom
                .next_in_range(DEFAULT_MIN_VALUE, DEFAULT_MAX_VALUE)
                .unwrap();
            assert!((DEFAULT_MIN_VALUE..=DEFAULT_MAX_VALUE).contains(&n));
            seen_min |= n == DEFAULT_MIN_VALUE;
            seen_max |= n == DEFAULT_MAX_VALUE;
        }
        assert!(seen_min && seen_max, "bounds never produced");
    }

    #[test]
    fn modulo_reduction_is_applied_to_raw_draw() {
        let source = Replay::new(&[0, 1, 2, 3, 4, 100]);
        let values: Vec<i32> = (0..6).map(|_| source.next_in_range(10, 12).unwrap()).collect();
        assert_eq!(values, vec![10, 11, 12, 10, 11, 11]);
    }

    #[test]
    fn full_i32_range_does_not_overflow() {
        let source = Replay::new(&[0, u32::MAX, 1 << 31]);
        assert_eq!(source.next_in_range(i32::MIN, i32::MAX).unwrap(), i32::MIN);
        assert_eq!(source.next_in_range(i32::MIN, i32::MAX).unwrap(), i32::MAX);
        assert_eq!(source.next_in_range(i32::MIN, i32::MAX).unwrap(), 0);
    }

    #[test]
    fn negative_ranges_supported() {
        for _ in 0..1_000 {
            let n = OsRandom.next_in_range(-50, -40).unwrap();
            assert!((-50..=-40).contains(&n));
        }
    }

    #[test]
    fn next_index_stays_in_bounds() {
        for _ in 0..1_000 {
            assert!(OsRandom.next_index(93).unwrap() <= 93);
        }
        assert_eq!(OsRandom.next_index(0).unwrap(), 0);
    }

    #[test]
    fn next_index_rejects_oversized_bound() {
        let bound = usize::try_from(i64::from(i32::MAX) + 1).unwrap();
        assert!(matches!(
            OsRandom.next_index(bound),
            Err(GeneratorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn random_number_example_bounds() {
        for _ in 0..100 {
            assert_eq!(random_number(5, 5).unwrap(), 5);
        }
        assert!(random_number(1, 0).is_err());
    }

    #[test]
    fn number_request_defaults() {
        let request = NumberRequest::default();
        assert_eq!((request.min, request.max), (0, 100));
        insta::assert_json_snapshot!(request, @r###"
        {
          "min": 0,
          "max": 100
        }
        "###);
        let partial: NumberRequest = serde_json::from_str(r#"{"max":6}"#).unwrap();
        assert_eq!(partial, NumberRequest { min: 0, max: 6 });
    }

    #[test]
    fn reference_forwards_to_source() {
        let source = Replay::new(&[7]);
        let by_ref = &source;
        assert_eq!(by_ref.next_in_range(0, 100).unwrap(), 7);
    }
}
