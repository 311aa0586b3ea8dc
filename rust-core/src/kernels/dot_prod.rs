//! Dot products
//!
//! The Q31 version follows the accumulator layout below:
//!
//! ```text
//! 1.31 x 1.31 = 2.62   (exact product)
//! 2.62 >> 14  = 2.48   (14 low bits discarded, no rounding)
//! sum 2.48 terms into a 16.48 accumulator, wrapping, never saturated
//! ```
//!
//! The accumulator has 14 guard bits over the 2.48 terms; since a Q31 product
//! never exceeds 1.0 in magnitude, vectors shorter than 2^15 elements cannot
//! overflow. Longer vectors must be pre-scaled by the caller.

use crate::fixed::{Q15, Q16_48, Q31, Q34_30};

fn paired_len(a_len: usize, b_len: usize) -> usize {
    debug_assert_eq!(a_len, b_len, "dot product inputs must have equal length");
    a_len.min(b_len)
}

/// Q2.62 product truncated to Q2.48, ready for the Q16.48 accumulator
#[inline]
fn truncated_product(a: Q31, b: Q31) -> Q16_48 {
    a.widening_mul(b).shr_truncate::<48>()
}

/// Dot product of two Q31 vectors, returned in Q16.48
///
/// Eight elements per group, even lanes into one accumulator and odd lanes
/// into another, merged before the remainder. Wrapping addition is
/// associative, so this is bit-identical to a single sequential accumulator.
pub fn dot_prod_q31(a: &[Q31], b: &[Q31]) -> Q16_48 {
    let len = paired_len(a.len(), b.len());
    let (a, b) = (&a[..len], &b[..len]);

    let mut sum = Q16_48::ZERO;
    let mut sum1 = Q16_48::ZERO;

    let mut a_blocks = a.chunks_exact(8);
    let mut b_blocks = b.chunks_exact(8);
    for (block_a, block_b) in a_blocks.by_ref().zip(b_blocks.by_ref()) {
        for lane in (0..8).step_by(2) {
            sum = sum.wrapping_add(truncated_product(block_a[lane], block_b[lane]));
            sum1 = sum1.wrapping_add(truncated_product(block_a[lane + 1], block_b[lane + 1]));
        }
    }
    sum = sum.wrapping_add(sum1);

    for (&x, &y) in a_blocks.remainder().iter().zip(b_blocks.remainder()) {
        sum = sum.wrapping_add(truncated_product(x, y));
    }

    sum
}

/// Dot product of two Q15 vectors, returned in Q34.30
///
/// Products keep full precision; 32 guard bits make overflow practically
/// impossible.
pub fn dot_prod_q15(a: &[Q15], b: &[Q15]) -> Q34_30 {
    let len = paired_len(a.len(), b.len());
    let (a, b) = (&a[..len], &b[..len]);

    let mut sum = Q34_30::ZERO;
    let mut a_blocks = a.chunks_exact(4);
    let mut b_blocks = b.chunks_exact(4);
    for (block_a, block_b) in a_blocks.by_ref().zip(b_blocks.by_ref()) {
        for (&x, &y) in block_a.iter().zip(block_b) {
            sum = sum.wrapping_add(x.widening_mul(y).widen());
        }
    }
    for (&x, &y) in a_blocks.remainder().iter().zip(b_blocks.remainder()) {
        sum = sum.wrapping_add(x.widening_mul(y).widen());
    }

    sum
}

/// Floating-point dot product, accumulated in index order
pub fn dot_prod_f32(a: &[f32], b: &[f32]) -> f32 {
    let len = paired_len(a.len(), b.len());
    a[..len]
        .iter()
        .zip(&b[..len])
        .fold(0.0f32, |acc, (&x, &y)| acc + x * y)
}
