/// Default tolerance for floating-point comparisons
pub(crate) const FLOAT_TOLERANCE: f64 = 1e-10;

// ===== Float tolerance helpers =====
// Coefficients are plain f64, so `1.0/3.0 * 3.0 != 1.0` style noise has to be
// absorbed whenever a value is tested against 0, 1 or -1.

/// Check if a float is approximately zero (within tolerance)
#[inline]
pub(crate) fn is_zero(n: f64) -> bool {
    n.abs() < FLOAT_TOLERANCE
}

/// Check if a float is approximately one (within tolerance)
#[inline]
pub(crate) fn is_one(n: f64) -> bool {
    (n - 1.0).abs() < FLOAT_TOLERANCE
}

/// Check if a float is approximately negative one (within tolerance)
#[inline]
pub(crate) fn is_neg_one(n: f64) -> bool {
    (n + 1.0).abs() < FLOAT_TOLERANCE
}

/// Check if a float is an exact integer small enough for `powi`
#[inline]
pub(crate) fn as_small_integer(n: f64) -> Option<i32> {
    #[allow(clippy::float_cmp)]
    let integral = n.is_finite() && n.trunc() == n;
    if integral && n.abs() <= f64::from(i32::MAX) {
        #[allow(clippy::cast_possible_truncation)]
        Some(n as i32)
    } else {
        None
    }
}

/// Round a float to the nearest integer if it is within tolerance of one
#[inline]
pub(crate) fn clean_integer(n: f64) -> Option<f64> {
    let rounded = n.round();
    ((n - rounded).abs() < FLOAT_TOLERANCE).then_some(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-11));
        assert!(is_zero(-1e-11));
        assert!(!is_zero(0.1));
        assert!(!is_zero(-0.1));
    }

    #[test]
    fn test_is_one() {
        assert!(is_one(1.0));
        assert!(is_one(1.0 + 1e-11));
        assert!(!is_one(1.1));
        assert!(is_neg_one(-1.0 + 1e-11));
        assert!(!is_neg_one(1.0));
    }

    #[test]
    fn test_small_integer() {
        assert_eq!(as_small_integer(3.0), Some(3));
        assert_eq!(as_small_integer(-2.0), Some(-2));
        assert_eq!(as_small_integer(0.5), None);
        assert_eq!(as_small_integer(f64::INFINITY), None);
        assert_eq!(as_small_integer(1e12), None);
    }

    #[test]
    fn test_clean_integer() {
        assert_eq!(clean_integer(2.0 + 1e-12), Some(2.0));
        assert_eq!(clean_integer(2.5), None);
    }
}
