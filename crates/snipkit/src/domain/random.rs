//! Random value generation
//!
//! Every function takes the random source explicitly; pass
//! `&mut rand::thread_rng()` for ad-hoc use or a seeded `StdRng` for
//! reproducible output.

use rand::Rng;

/// Random errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RandomError {
    /// Lower bound is greater than upper bound
    #[error("Empty range: min {min} is greater than max {max}")]
    EmptyRange { min: f64, max: f64 },
    /// A bound, or the span between them, is not finite
    #[error("Range bounds must be finite: [{min}, {max})")]
    NonFiniteRange { min: f64, max: f64 },
}

/// Random color as `#rrggbb` (lowercase hex)
pub fn random_hex_color_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.gen_range(0..=0xFF_FFFFu32))
}

/// Random integer in `[min, max]`
///
/// # Errors
///
/// Returns [`RandomError::EmptyRange`] if `min > max`.
pub fn random_integer_in_range<R: Rng + ?Sized>(
    rng: &mut R,
    min: i64,
    max: i64,
) -> Result<i64, RandomError> {
    check_int_range(min, max)?;
    Ok(rng.gen_range(min..=max))
}

/// `n` random integers in `[min, max]`
///
/// # Errors
///
/// Returns [`RandomError::EmptyRange`] if `min > max`.
pub fn random_int_array_in_range<R: Rng + ?Sized>(
    rng: &mut R,
    min: i64,
    max: i64,
    n: usize,
) -> Result<Vec<i64>, RandomError> {
    check_int_range(min, max)?;
    Ok((0..n).map(|_| rng.gen_range(min..=max)).collect())
}

/// Random number in `[min, max)`
///
/// Returns `min` when the range is a single point.
///
/// # Errors
///
/// Returns [`RandomError::EmptyRange`] if `min > max` or either bound is NaN,
/// and [`RandomError::NonFiniteRange`] if the span overflows.
pub fn random_number_in_range<R: Rng + ?Sized>(
    rng: &mut R,
    min: f64,
    max: f64,
) -> Result<f64, RandomError> {
    check_range(min, max)?;
    if min == max {
        return Ok(min);
    }
    Ok(rng.gen_range(min..max))
}

fn check_int_range(min: i64, max: i64) -> Result<(), RandomError> {
    if min <= max {
        Ok(())
    } else {
        Err(RandomError::EmptyRange {
            min: min as f64,
            max: max as f64,
        })
    }
}

fn check_range(min: f64, max: f64) -> Result<(), RandomError> {
    if min.is_nan() || max.is_nan() || min > max {
        return Err(RandomError::EmptyRange { min, max });
    }
    if !(max - min).is_finite() {
        return Err(RandomError::NonFiniteRange { min, max });
    }
    Ok(())
}
