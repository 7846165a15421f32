//! Numeric conversion helpers centralizing lossy casts.

use num_traits::cast::cast;

/// Convert a count to f64; counts in this crate stay far below 2^52.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Truncate toward zero and clamp to the i32 range, returning 0 for NaN.
#[must_use]
pub fn trunc_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = f64::from(i32::MIN);
    let max = f64::from(i32::MAX);
    cast::<f64, i32>(value.clamp(min, max).trunc()).unwrap_or(0)
}

/// Truncated share of a non-negative total, e.g. `share(300, 0.6) == 180`.
#[must_use]
pub fn share(total: u32, fraction: f64) -> u32 {
    let scaled = f64::from(total) * fraction;
    if !scaled.is_finite() || scaled <= 0.0 {
        return 0;
    }
    cast::<f64, u32>(scaled.min(f64::from(u32::MAX)).trunc()).unwrap_or(0)
}

/// Split `total` into `parts` near-equal integers, the remainder going one
/// at a time to the front entries.
#[must_use]
pub fn split_evenly(total: u32, parts: usize) -> Vec<u32> {
    let Ok(divisor) = u32::try_from(parts) else {
        return Vec::new();
    };
    if divisor == 0 {
        return Vec::new();
    }
    let base = total / divisor;
    let remainder = usize::try_from(total % divisor).unwrap_or(0);
    (0..parts)
        .map(|idx| base + u32::from(idx < remainder))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trunc_moves_toward_zero() {
        assert_eq!(trunc_f64_to_i32(3.9), 3);
        assert_eq!(trunc_f64_to_i32(-3.9), -3);
        assert_eq!(trunc_f64_to_i32(f64::NAN), 0);
        assert_eq!(trunc_f64_to_i32(f64::from(i32::MAX) * 2.0), i32::MAX);
    }

    #[test]
    fn share_truncates() {
        assert_eq!(share(301, 0.6), 180);
        assert_eq!(share(301, 0.4), 120);
        assert_eq!(share(0, 0.6), 0);
    }

    #[test]
    fn split_spreads_remainder_to_front() {
        assert_eq!(split_evenly(10, 3), vec![4, 3, 3]);
        assert_eq!(split_evenly(11, 3), vec![4, 4, 3]);
        assert_eq!(split_evenly(9, 0), Vec::<u32>::new());
        assert_eq!(split_evenly(9, 3).iter().sum::<u32>(), 9);
    }
}
