//! Number utilities
//!
//! Aggregation, angle conversion, n-largest/n-smallest selection, decimal
//! rounding and random sampling.

use rand::Rng;
use std::cmp::Ordering;

#[cfg(feature = "parallel-sort")]
use crate::constants::PARALLEL_SORT_THRESHOLD;
#[cfg(feature = "parallel-sort")]
use rayon::prelude::*;

/// Sum of all values, `0.0` for an empty slice
pub fn sum(nums: &[f64]) -> f64 {
    nums.iter().sum()
}

/// Arithmetic mean, `None` for an empty slice
pub fn average(nums: &[f64]) -> Option<f64> {
    if nums.is_empty() {
        return None;
    }
    Some(sum(nums) / nums.len() as f64)
}

/// Convert degrees to radians
#[inline]
pub fn degrees_to_rads(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

// =============================================================================
// Selection
// =============================================================================

/// The `n` largest values, largest first
///
/// Sorting is stable: equal values keep their original relative order.
/// Values not comparable with themselves (NaN) sort after every other value,
/// so they are only returned once the comparable values run out.
pub fn max_n<T: PartialOrd + Clone + Send + Sync>(arr: &[T], n: usize) -> Vec<T> {
    let mut sorted = arr.to_vec();
    stable_sort_by(&mut sorted, |a, b| unordered_last(a, b, b.partial_cmp(a)));
    sorted.truncate(n);
    sorted
}

/// The `n` smallest values, smallest first
///
/// Same ordering rules as [`max_n`]; NaN still comes last.
pub fn min_n<T: PartialOrd + Clone + Send + Sync>(arr: &[T], n: usize) -> Vec<T> {
    let mut sorted = arr.to_vec();
    stable_sort_by(&mut sorted, |a, b| unordered_last(a, b, a.partial_cmp(b)));
    sorted.truncate(n);
    sorted
}

/// Total order: self-incomparable values after all others, then `ordering`
fn unordered_last<T: PartialOrd>(a: &T, b: &T, ordering: Option<Ordering>) -> Ordering {
    let a_unordered = a.partial_cmp(a).is_none();
    let b_unordered = b.partial_cmp(b).is_none();
    a_unordered
        .cmp(&b_unordered)
        .then(ordering.unwrap_or(Ordering::Equal))
}

#[cfg(feature = "parallel-sort")]
fn stable_sort_by<T, F>(items: &mut [T], compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if items.len() >= PARALLEL_SORT_THRESHOLD {
        items.par_sort_by(compare);
    } else {
        items.sort_by(compare);
    }
}

#[cfg(not(feature = "parallel-sort"))]
fn stable_sort_by<T, F>(items: &mut [T], compare: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    items.sort_by(compare);
}

// =============================================================================
// Rounding and sampling
// =============================================================================

/// Round to `decimals` decimal places
///
/// Scales through the decimal string representation (`"{n}e{decimals}"`) so
/// that values such as `1.005` round as written rather than as stored in
/// binary. Half-way cases round toward positive infinity.
///
/// Non-finite input is returned unchanged, and so is any value that already
/// has no digits beyond `decimals` places (huge magnitudes, huge `decimals`).
///
/// ```
/// use snipkit::domain::number::round;
///
/// assert_eq!(round(1.005, 2), 1.01);
/// assert_eq!(round(1e300, 10), 1e300);
/// ```
pub fn round(n: f64, decimals: u32) -> f64 {
    if !n.is_finite() || n.abs() >= EXACT_INTEGER_LIMIT {
        return n;
    }

    let scaled: f64 = match format!("{}e{}", n, decimals).parse() {
        Ok(scaled) => scaled,
        Err(_) => return n,
    };
    // Past 2^52 every f64 is an integer at this scale
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return n;
    }

    let rounded = round_half_up(scaled);
    match format!("{}e-{}", rounded, decimals).parse::<f64>() {
        Ok(out) if out.is_finite() => out,
        _ => n,
    }
}

/// 2^52, from where f64 has no fractional bits
const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0;

fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Pick a uniformly random element, `None` for an empty slice
pub fn sample<'a, T, R: Rng + ?Sized>(arr: &'a [T], rng: &mut R) -> Option<&'a T> {
    if arr.is_empty() {
        return None;
    }
    arr.get(rng.gen_range(0..arr.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_sum() {
        assert_eq!(sum(&[1.0, 2.0, 3.0, 4.0]), 10.0);
        assert_eq!(sum(&[]), 0.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn test_degrees_to_rads() {
        assert!((degrees_to_rads(90.0) - 1.5708).abs() < 1e-4);
        assert_eq!(degrees_to_rads(0.0), 0.0);
    }

    // =========================================================================
    // Selection
    // =========================================================================

    #[test]
    fn test_max_n() {
        assert_eq!(max_n(&[1, 2, 3], 2), vec![3, 2]);
        assert_eq!(max_n(&[1, 2, 3], 1), vec![3]);
        assert_eq!(max_n(&[1, 2, 3], 10), vec![3, 2, 1]);
    }

    #[test]
    fn test_min_n() {
        assert_eq!(min_n(&[1, 2, 3], 1), vec![1]);
        assert_eq!(min_n(&[3, 1, 2], 2), vec![1, 2]);
        assert!(min_n(&[3, 1, 2], 0).is_empty());
    }

    #[test]
    fn test_max_n_is_stable() {
        // Equal keys keep input order
        let arr = [(2, 'a'), (1, 'b'), (2, 'c')];
        let top: Vec<char> = max_n(&arr.map(|(k, c)| Key(k, c)), 2)
            .into_iter()
            .map(|Key(_, c)| c)
            .collect();
        assert_eq!(top, vec!['a', 'c']);
    }

    #[test]
    fn test_max_n_with_nan() {
        let mut rng = StdRng::seed_from_u64(7);
        let arr: Vec<f64> = (0..50)
            .map(|i| {
                if i % 3 == 0 {
                    f64::NAN
                } else {
                    rng.gen_range(-100.0..100.0)
                }
            })
            .collect();

        let mut finite: Vec<f64> = arr.iter().copied().filter(|x| !x.is_nan()).collect();
        finite.sort_by(|a, b| b.total_cmp(a));

        assert_eq!(max_n(&arr, 5), finite[..5].to_vec());

        let all = max_n(&arr, arr.len());
        assert_eq!(all[..finite.len()], finite[..]);
        assert!(all[finite.len()..].iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_min_n_with_nan() {
        let arr = [f64::NAN, 3.0, f64::NAN, 1.0, 2.0];
        assert_eq!(min_n(&arr, 3), vec![1.0, 2.0, 3.0]);

        let all = min_n(&arr, 5);
        assert!(all[3].is_nan() && all[4].is_nan());
    }

    #[test]
    fn test_min_n_large_input() {
        let arr: Vec<u32> = (0..(1u32 << 15)).rev().collect();
        assert_eq!(min_n(&arr, 3), vec![0, 1, 2]);
        assert_eq!(max_n(&arr, 2), vec![(1 << 15) - 1, (1 << 15) - 2]);
    }

    /// Compares on the first field only
    #[derive(Clone, Debug)]
    struct Key(i32, char);

    impl PartialEq for Key {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl PartialOrd for Key {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            self.0.partial_cmp(&other.0)
        }
    }

    // =========================================================================
    // Rounding and sampling
    // =========================================================================

    #[test]
    fn test_round() {
        assert_eq!(round(1.005, 2), 1.01);
        assert_eq!(round(1.2345, 0), 1.0);
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(-2.5, 0), -2.0);
        assert_eq!(round(123.456, 1), 123.5);
    }

    #[test]
    fn test_round_non_finite() {
        assert!(round(f64::NAN, 2).is_nan());
        assert_eq!(round(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_round_keeps_values_without_excess_digits() {
        assert_eq!(round(1e300, 10), 1e300);
        assert_eq!(round(-1e300, 10), -1e300);
        assert_eq!(round(1.005, 400), 1.005);
        assert_eq!(round(123.456, 310), 123.456);
        assert_eq!(round(4_503_599_627_370_497.0, 2), 4_503_599_627_370_497.0);
        assert_eq!(round(1e-5, 20), 1e-5);
    }

    #[test]
    fn test_sample() {
        let arr = [3, 7, 9, 11];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let v = sample(&arr, &mut rng).unwrap();
            assert!(arr.contains(v));
        }
        assert_eq!(sample::<i32, _>(&[], &mut rng), None);
    }
}
