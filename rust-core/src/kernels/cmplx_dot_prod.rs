//! Complex dot product
//!
//! ```text
//! re = sum(a_re * b_re - a_im * b_im)
//! im = sum(a_re * b_im + a_im * b_re)
//! ```
//!
//! This is the plain (unconjugated) complex inner product.

use num_complex::Complex32;

/// Complex dot product of interleaved `[re, im, re, im, ...]` vectors
///
/// Both slices hold `2 * num_samples` values. Four complex samples are
/// processed per group, the remaining one to three afterwards.
pub fn cmplx_dot_prod_f32(a: &[f32], b: &[f32]) -> Complex32 {
    debug_assert_eq!(a.len(), b.len(), "complex inputs must have equal length");
    debug_assert_eq!(a.len() % 2, 0, "interleaved complex data has even length");

    let mut real_sum = 0.0f32;
    let mut imag_sum = 0.0f32;
    let mut mac = |a_re: f32, a_im: f32, b_re: f32, b_im: f32| {
        real_sum += a_re * b_re - a_im * b_im;
        imag_sum += a_re * b_im + a_im * b_re;
    };

    let mut a_blocks = a.chunks_exact(8);
    let mut b_blocks = b.chunks_exact(8);
    for (block_a, block_b) in a_blocks.by_ref().zip(b_blocks.by_ref()) {
        for n in 0..4 {
            mac(block_a[2 * n], block_a[2 * n + 1], block_b[2 * n], block_b[2 * n + 1]);
        }
    }
    for (pair_a, pair_b) in a_blocks
        .remainder()
        .chunks_exact(2)
        .zip(b_blocks.remainder().chunks_exact(2))
    {
        mac(pair_a[0], pair_a[1], pair_b[0], pair_b[1]);
    }

    Complex32::new(real_sum, imag_sum)
}

/// Complex dot product over `Complex32` slices
pub fn cmplx_dot_prod(a: &[Complex32], b: &[Complex32]) -> Complex32 {
    debug_assert_eq!(a.len(), b.len(), "complex inputs must have equal length");
    a.iter()
        .zip(b)
        .fold(Complex32::new(0.0, 0.0), |acc, (x, y)| acc + x * y)
}
