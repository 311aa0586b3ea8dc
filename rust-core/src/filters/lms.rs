//! Q31 adaptive LMS filter over caller-owned buffers
//!
//! Per sample:
//!
//! ```text
//! y     = sat32(sum(b[k] * x[n-k]) >> (31 - post_shift))   2.62 accumulator
//! e     = sat32(ref - y)
//! alpha = sat32(e * mu >> 31)
//! b[k]  = sat32(b[k] + ((alpha * x[n-k]) >> 32 << 1))
//! ```
//!
//! Coefficients are time-reversed and adapted in place. The state buffer is
//! `num_taps + block_size - 1` samples.

use super::config::LmsConfig;
use super::FilterState;
use crate::fixed::{clip_q63_to_q31, saturating_shift, Q2_62, Q31};

/// Adaptive LMS filter state
pub struct LmsQ31<'a> {
    /// Coefficients, time-reversed, updated on every sample
    coeffs: &'a mut [Q31],

    state: &'a mut [Q31],

    num_taps: usize,

    block_size: usize,

    /// Adaptation step size
    mu: Q31,

    /// Extra integer bits carried by the coefficients
    post_shift: u32,

    /// Samples of `state` owned by the filter
    state_len: usize,
}

impl<'a> LmsQ31<'a> {
    /// Clear `num_taps + block_size - 1` state samples and bind the buffers
    ///
    /// The coefficients are the starting point for adaptation. There is no
    /// failure mode: a tapless filter outputs zero and reports the reference
    /// as its error.
    pub fn init(config: LmsConfig, coeffs: &'a mut [Q31], state: &'a mut [Q31]) -> Self {
        debug_assert_eq!(coeffs.len(), config.num_taps, "coefficient buffer length");
        debug_assert!(config.post_shift < 32, "post shift must leave a fractional bit");
        debug_assert!(
            state.len() >= config.state_len(),
            "state buffer holds {} samples, {} required",
            state.len(),
            config.state_len()
        );

        let mut filter = Self {
            coeffs,
            state,
            num_taps: config.num_taps,
            block_size: config.block_size,
            mu: config.mu,
            post_shift: config.post_shift,
            state_len: config.state_len(),
        };
        filter.reset();
        log::debug!(
            "LMS filter ready: {} taps, mu = {}, post shift {}, block size {}",
            config.num_taps,
            config.mu,
            config.post_shift,
            config.block_size
        );
        filter
    }

    /// Filter one block, writing the output to `dst` and `reference - output`
    /// to `err`, adapting the coefficients after every sample
    pub fn run(&mut self, src: &[Q31], reference: &[Q31], dst: &mut [Q31], err: &mut [Q31]) {
        let block = src.len();
        let taps = self.num_taps;
        let out_shift = 31 - self.post_shift;
        debug_assert!(block <= self.block_size, "block larger than configured");
        debug_assert_eq!(reference.len(), block, "reference length");
        debug_assert!(dst.len() >= block && err.len() >= block, "output buffers too short");

        if taps == 0 {
            dst[..block].fill(Q31::ZERO);
            err[..block].copy_from_slice(reference);
            return;
        }
        let history = taps - 1;

        for (n, (&x, &desired)) in src.iter().zip(reference).enumerate() {
            self.state[history + n] = x;
            let window = &self.state[n..n + taps];

            let acc = window
                .iter()
                .zip(self.coeffs.iter())
                .fold(Q2_62::ZERO, |acc, (&s, &c)| acc.wrapping_add(s.widening_mul(c)));
            let y = Q31::from_bits(saturating_shift(acc.to_bits(), out_shift, 32) as i32);
            let e = desired.saturating_sub(y);
            dst[n] = y;
            err[n] = e;

            let alpha: Q31 = e.widening_mul(self.mu).saturate_narrow::<i32, 31>();
            for (c, &s) in self.coeffs.iter_mut().zip(window) {
                // Top 32 bits of the 2.62 product, doubled back to 1.31
                let step = alpha.widening_mul(s).to_bits() >> 32;
                *c = Q31::from_bits(clip_q63_to_q31(i64::from(c.to_bits()) + (step << 1)));
            }
        }

        self.state.copy_within(block..block + history, 0);
    }

    /// Current, adapted coefficients (time-reversed)
    pub fn coeffs(&self) -> &[Q31] {
        self.coeffs
    }

    /// Get filter length
    pub fn num_taps(&self) -> usize {
        self.num_taps
    }

    /// Adaptation step size
    pub fn mu(&self) -> Q31 {
        self.mu
    }

    /// Integer bits the coefficients carry beyond Q31
    pub fn post_shift(&self) -> u32 {
        self.post_shift
    }
}

impl FilterState for LmsQ31<'_> {
    type Sample = Q31;

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn history(&self) -> &[Q31] {
        &self.state[..self.state_len]
    }

    fn reset(&mut self) {
        self.state[..self.state_len].fill(Q31::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(num_taps: usize, mu: Q31, block_size: usize, post_shift: u32) -> LmsConfig {
        LmsConfig {
            num_taps,
            mu,
            block_size,
            post_shift,
        }
    }

    #[test]
    fn test_zero_step_is_fixed_fir() {
        let mut coeffs = vec![Q31::from_f64(0.25), Q31::from_f64(0.5)];
        let mut state = vec![Q31::ZERO; 4];
        let mut filter = LmsQ31::init(config(2, Q31::ZERO, 3, 0), &mut coeffs, &mut state);

        let src = [Q31::from_f64(0.5), Q31::from_f64(0.25), Q31::ZERO];
        let reference = [Q31::ZERO; 3];
        let mut out = [Q31::ZERO; 3];
        let mut err = [Q31::ZERO; 3];
        filter.run(&src, &reference, &mut out, &mut err);

        let values: Vec<f64> = out.iter().map(|q| q.to_f64()).collect();
        assert_eq!(values, vec![0.25, 0.25, 0.0625]);
        for (e, y) in err.iter().zip(&out) {
            assert_eq!(e.to_bits(), -y.to_bits());
        }
        assert_eq!(filter.coeffs(), &[Q31::from_f64(0.25), Q31::from_f64(0.5)]);
    }

    #[test]
    fn test_post_shift_scales_output() {
        let src = [Q31::from_f64(0.5)];
        let reference = [Q31::ZERO];
        let mut out = [Q31::ZERO];
        let mut err = [Q31::ZERO];

        let mut coeffs = vec![Q31::from_f64(0.25)];
        let mut state = vec![Q31::ZERO; 1];
        LmsQ31::init(config(1, Q31::ZERO, 1, 0), &mut coeffs, &mut state)
            .run(&src, &reference, &mut out, &mut err);
        assert_eq!(out[0].to_bits(), 1 << 28);

        LmsQ31::init(config(1, Q31::ZERO, 1, 1), &mut coeffs, &mut state)
            .run(&src, &reference, &mut out, &mut err);
        assert_eq!(out[0].to_bits(), 1 << 29);
    }

    #[test]
    fn test_converges_to_unknown_system() {
        // Identify h = {0.5, -0.25}; stored time-reversed as {-0.25, 0.5}
        let mut seed = 0x1234_5678u32;
        let input: Vec<f64> = (0..4000)
            .map(|_| {
                seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (seed >> 8) as f64 / (1u32 << 24) as f64 * 0.5 - 0.25
            })
            .collect();
        let desired: Vec<Q31> = (0..input.len())
            .map(|n| {
                let prev = if n > 0 { input[n - 1] } else { 0.0 };
                Q31::from_f64(0.5 * input[n] - 0.25 * prev)
            })
            .collect();
        let input: Vec<Q31> = input.iter().map(|&x| Q31::from_f64(x)).collect();

        let block_size = 50;
        let mut coeffs = vec![Q31::ZERO; 2];
        let mut state = vec![Q31::ZERO; 2 + block_size - 1];
        let mut filter = LmsQ31::init(
            config(2, Q31::from_f64(0.5), block_size, 0),
            &mut coeffs,
            &mut state,
        );

        let mut out = vec![Q31::ZERO; block_size];
        let mut err = vec![Q31::ZERO; block_size];
        for (src, reference) in input.chunks(block_size).zip(desired.chunks(block_size)) {
            filter.run(src, reference, &mut out, &mut err);
        }

        let adapted: Vec<f64> = filter.coeffs().iter().map(|q| q.to_f64()).collect();
        assert!((adapted[0] + 0.25).abs() < 1e-3, "coeffs = {adapted:?}");
        assert!((adapted[1] - 0.5).abs() < 1e-3, "coeffs = {adapted:?}");
        assert!(err.iter().all(|e| e.to_f64().abs() < 1e-3));
    }

    #[test]
    fn test_init_zeroes_exact_span() {
        let mut coeffs = vec![Q31::ZERO; 3];
        let mut state = vec![Q31::from_bits(5); 10];
        {
            let filter = LmsQ31::init(config(3, Q31::ZERO, 4, 0), &mut coeffs, &mut state);
            assert_eq!(filter.history().len(), 6);
        }
        assert!(state[..6].iter().all(|&q| q == Q31::ZERO));
        assert!(state[6..].iter().all(|q| q.to_bits() == 5));
    }

    #[test]
    fn test_tapless_filter_passes_reference_to_error() {
        let mut coeffs: Vec<Q31> = Vec::new();
        let mut state = vec![Q31::from_bits(4); 3];
        let tapless = config(0, Q31::from_f64(0.5), 3, 0);
        assert_eq!(tapless.state_len(), 2);

        let mut filter = LmsQ31::init(tapless, &mut coeffs, &mut state);
        assert_eq!(filter.history().len(), 2);

        let reference = [Q31::from_f64(0.25), Q31::from_f64(-0.5), Q31::MAX];
        let mut out = [Q31::from_bits(1); 3];
        let mut err = [Q31::ZERO; 3];
        filter.run(&[Q31::from_f64(0.1); 3], &reference, &mut out, &mut err);
        assert_eq!(out, [Q31::ZERO; 3]);
        assert_eq!(err, reference);
        drop(filter);
        assert_eq!(state[2].to_bits(), 4);
    }

    #[test]
    fn test_tapless_empty_block_init() {
        let mut coeffs: Vec<Q31> = Vec::new();
        let mut state: Vec<Q31> = Vec::new();
        let filter = LmsQ31::init(config(0, Q31::ZERO, 0, 0), &mut coeffs, &mut state);
        assert!(filter.history().is_empty());
    }
}
