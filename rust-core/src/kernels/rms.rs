//! Root mean square
//!
//! Q31: squares are 2.62 values summed into a 64-bit accumulator with a single
//! guard bit and no intermediate saturation. Scale the input down by
//! log2(len) bits to rule out wrap. The sum is shifted to 1.31 with
//! saturation, divided by the length and square-rooted.

use crate::fixed::{sqrt_q15, sqrt_q31, Q15, Q2_62, Q31, Q34_30};

/// RMS of a Q31 vector, in Q31
///
/// An empty vector yields zero. If the accumulator wrapped negative the
/// square root has no answer and the result is zero.
pub fn rms_q31(src: &[Q31]) -> Q31 {
    if src.is_empty() {
        return Q31::ZERO;
    }

    let sum = src
        .iter()
        .fold(Q2_62::ZERO, |acc, &x| acc.wrapping_add(x.widening_mul(x)));

    // Clamps to the full 32-bit 1.31 range, one bit wider than a 31-bit SSAT
    let mean_square: Q31 = sum.saturate_narrow::<i32, 31>();
    let mean = i64::from(mean_square.to_bits()) / src.len() as i64;

    sqrt_q31(Q31::from_bits(mean as i32)).unwrap_or(Q31::ZERO)
}

/// RMS of a Q15 vector, in Q15
///
/// Squares accumulate exactly in 34.30; the mean is taken before the
/// saturating shift to 1.15.
pub fn rms_q15(src: &[Q15]) -> Q15 {
    if src.is_empty() {
        return Q15::ZERO;
    }

    let sum = src
        .iter()
        .fold(Q34_30::ZERO, |acc, &x| acc.wrapping_add(x.widening_mul(x).widen()));

    let mean = Q34_30::from_bits(sum.to_bits() / src.len() as i64);
    sqrt_q15(mean.saturate_narrow::<i16, 15>()).unwrap_or(Q15::ZERO)
}

/// Floating-point RMS; an empty vector yields zero
pub fn rms_f32(src: &[f32]) -> f32 {
    if src.is_empty() {
        return 0.0;
    }
    let sum: f32 = src.iter().map(|&x| x * x).sum();
    (sum / src.len() as f32).sqrt()
}
