//! Integer square roots for Q31 and Q15
//!
//! For a Qn input `x` the result is `floor(sqrt(x * 2^n))`, which is the
//! square root of the real value truncated to the same Qn format.

use super::{Q15, Q31};
use crate::error::{DspError, Result};

/// Digit-by-digit integer square root, `floor(sqrt(n))`
fn isqrt_u64(n: u64) -> u64 {
    let mut remainder = n;
    let mut root = 0u64;
    let mut bit = 1u64 << 62;
    while bit > n {
        bit >>= 2;
    }
    while bit != 0 {
        if remainder >= root + bit {
            remainder -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }
    root
}

/// Square root of a Q31 value
///
/// Negative input is an argument error.
pub fn sqrt_q31(x: Q31) -> Result<Q31> {
    let bits = x.to_bits();
    if bits < 0 {
        return Err(DspError::Argument {
            reason: "square root of a negative Q31 value",
        });
    }
    // (2^31 - 1) * 2^31 < 2^62, so the root stays below 2^31
    let root = isqrt_u64((bits as u64) << 31);
    Ok(Q31::from_bits(root as i32))
}

/// Square root of a Q15 value
pub fn sqrt_q15(x: Q15) -> Result<Q15> {
    let bits = x.to_bits();
    if bits < 0 {
        return Err(DspError::Argument {
            reason: "square root of a negative Q15 value",
        });
    }
    let root = isqrt_u64((bits as u64) << 15);
    Ok(Q15::from_bits(root as i16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isqrt_exact_and_floor() {
        assert_eq!(isqrt_u64(0), 0);
        assert_eq!(isqrt_u64(1), 1);
        assert_eq!(isqrt_u64(15), 3);
        assert_eq!(isqrt_u64(16), 4);
        assert_eq!(isqrt_u64(u64::MAX), u32::MAX as u64);
        for n in 0..2000u64 {
            let r = isqrt_u64(n);
            assert!(r * r <= n && (r + 1) * (r + 1) > n, "n={n}");
        }
    }

    #[test]
    fn test_sqrt_q31_quarter() {
        let root = sqrt_q31(Q31::from_f64(0.25)).unwrap();
        assert_eq!(root.to_bits(), 1 << 30);
    }

    #[test]
    fn test_sqrt_q31_max() {
        assert_eq!(sqrt_q31(Q31::MAX).unwrap(), Q31::MAX);
        assert_eq!(sqrt_q31(Q31::ZERO).unwrap(), Q31::ZERO);
    }

    #[test]
    fn test_sqrt_q15_quarter() {
        let root = sqrt_q15(Q15::from_f64(0.25)).unwrap();
        assert_eq!(root.to_bits(), 1 << 14);
        assert!((sqrt_q15(Q15::from_f64(0.5)).unwrap().to_f64() - 0.70710678).abs() < 1e-4);
    }

    #[test]
    fn test_sqrt_negative_is_argument_error() {
        let err = sqrt_q31(Q31::from_bits(-1)).unwrap_err();
        assert_eq!(err.status_code(), crate::error::STATUS_ARGUMENT_ERROR);
        assert!(sqrt_q15(Q15::MIN).is_err());
    }
}
