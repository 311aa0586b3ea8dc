//! Constant offset: `dst[n] = src[n] + offset`
//!
//! Floating-point samples use plain IEEE addition; fixed-point samples
//! saturate to their format's range.

use crate::fixed::{Q15, Q31, Q7};

/// Apply `op` over `src` into `dst` in groups of `N`, then the remainder
#[inline]
fn map_grouped<T: Copy, F: Fn(T) -> T, const N: usize>(src: &[T], dst: &mut [T], op: F) {
    debug_assert_eq!(src.len(), dst.len(), "offset source and destination lengths differ");

    let mut src_blocks = src.chunks_exact(N);
    let mut dst_blocks = dst.chunks_exact_mut(N);
    for (block_in, block_out) in src_blocks.by_ref().zip(dst_blocks.by_ref()) {
        for (out, &x) in block_out.iter_mut().zip(block_in) {
            *out = op(x);
        }
    }
    for (out, &x) in dst_blocks
        .into_remainder()
        .iter_mut()
        .zip(src_blocks.remainder())
    {
        *out = op(x);
    }
}

/// Add `offset` to every sample
///
/// # Arguments
/// * `src` - Input samples
/// * `offset` - Constant added to each sample
/// * `dst` - Output, same length as `src`
pub fn offset_f32(src: &[f32], offset: f32, dst: &mut [f32]) {
    map_grouped::<_, _, 8>(src, dst, |x| x + offset);
}

/// Saturating Q31 offset
///
/// # Arguments
/// * `src` - Input samples
/// * `offset` - Constant added to each sample
/// * `dst` - Output, clamped to [-1, 1 - 2^-31]
pub fn offset_q31(src: &[Q31], offset: Q31, dst: &mut [Q31]) {
    map_grouped::<_, _, 8>(src, dst, |x| x.saturating_add(offset));
}

/// Saturating Q15 offset, see [`offset_q31`]
pub fn offset_q15(src: &[Q15], offset: Q15, dst: &mut [Q15]) {
    map_grouped::<_, _, 8>(src, dst, |x| x.saturating_add(offset));
}

/// Saturating Q7 offset, processed four samples at a time
pub fn offset_q7(src: &[Q7], offset: Q7, dst: &mut [Q7]) {
    map_grouped::<_, _, 4>(src, dst, |x| x.saturating_add(offset));
}
