//! Q31 decimating FIR filter over caller-owned buffers
//!
//! Coefficients are stored time-reversed: `{b[N-1], b[N-2], ..., b[1], b[0]}`.
//! The state buffer holds `num_taps - 1` history samples followed by the
//! current input block, `num_taps + block_size - 1` samples in total.
//!
//! Each output is a 2.62 sum of products accumulated with a single guard bit
//! and no intermediate saturation, then shifted to 1.31 with saturation.
//! Scale the input down by log2(num_taps) bits to avoid wrap.

use super::config::FirDecimateConfig;
use super::FilterState;
use crate::error::Result;
use crate::fixed::{Q2_62, Q31};

/// Decimating FIR filter state
pub struct FirDecimateQ31<'a> {
    /// Filter coefficients, time-reversed
    coeffs: &'a [Q31],

    /// History followed by the block being processed
    state: &'a mut [Q31],

    /// Number of taps
    num_taps: usize,

    /// Decimation factor M
    decimation: usize,

    /// Largest block accepted by `run`
    block_size: usize,

    /// Samples of `state` owned by the filter, `num_taps + block_size - 1`
    state_len: usize,
}

impl<'a> FirDecimateQ31<'a> {
    /// Validate `config`, clear the history and bind the buffers
    ///
    /// Fails with an argument error when there are no taps and with a length
    /// error when `block_size` is not a multiple of the decimation factor;
    /// nothing is written in either case. On success exactly
    /// `num_taps + block_size - 1` state elements are zeroed, anything past
    /// them is left alone.
    pub fn init(
        config: FirDecimateConfig,
        coeffs: &'a [Q31],
        state: &'a mut [Q31],
    ) -> Result<Self> {
        if let Err(err) = config.validate() {
            log::warn!("rejected FIR decimator configuration {:?}: {}", config, err);
            return Err(err);
        }

        let mut filter = Self::bind(config, coeffs, state);
        filter.reset();
        log::debug!(
            "FIR decimator ready: {} taps, M = {}, block size {}",
            config.num_taps,
            config.decimation,
            config.block_size
        );
        Ok(filter)
    }

    /// Bind buffers to an already validated configuration, keeping the history
    pub(crate) fn bind(
        config: FirDecimateConfig,
        coeffs: &'a [Q31],
        state: &'a mut [Q31],
    ) -> Self {
        debug_assert!(config.num_taps > 0, "FIR decimator needs at least one tap");
        debug_assert_eq!(coeffs.len(), config.num_taps, "coefficient buffer length");
        debug_assert!(
            state.len() >= config.state_len(),
            "state buffer holds {} samples, {} required",
            state.len(),
            config.state_len()
        );

        Self {
            coeffs,
            state,
            num_taps: config.num_taps,
            decimation: config.decimation,
            block_size: config.block_size,
            state_len: config.state_len(),
        }
    }

    /// Filter and decimate one block
    ///
    /// `src.len()` must not exceed the configured block size and must be a
    /// multiple of M; `src.len() / M` outputs are written to `dst`.
    pub fn run(&mut self, src: &[Q31], dst: &mut [Q31]) {
        let block = src.len();
        let taps = self.num_taps;
        let m = self.decimation;
        let history = taps - 1;
        debug_assert!(block <= self.block_size, "block larger than configured");
        debug_assert_eq!(block % m, 0, "block is not a multiple of the decimation factor");
        debug_assert!(dst.len() >= block / m, "output buffer too short");

        // New samples go right behind the retained history
        self.state[history..history + block].copy_from_slice(src);

        for (n, out) in dst.iter_mut().take(block / m).enumerate() {
            let start = n * m;
            let window = &self.state[start..start + taps];
            let acc = window
                .iter()
                .zip(self.coeffs)
                .fold(Q2_62::ZERO, |acc, (&x, &c)| acc.wrapping_add(x.widening_mul(c)));
            *out = acc.saturate_narrow::<i32, 31>();
        }

        // Keep the newest taps - 1 samples for the next call
        self.state.copy_within(block..block + history, 0);
    }

    /// Time-reversed coefficients the filter was initialized with
    pub fn coeffs(&self) -> &[Q31] {
        self.coeffs
    }

    /// Get filter length
    pub fn num_taps(&self) -> usize {
        self.num_taps
    }

    /// Get decimation factor M
    pub fn decimation(&self) -> usize {
        self.decimation
    }
}

impl FilterState for FirDecimateQ31<'_> {
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
    use crate::error::DspError;

    fn q31(values: &[i32]) -> Vec<Q31> {
        values.iter().map(|&v| Q31::from_bits(v)).collect()
    }

    fn bits(values: &[Q31]) -> Vec<i32> {
        values.iter().map(|q| q.to_bits()).collect()
    }

    fn config(num_taps: usize, decimation: usize, block_size: usize) -> FirDecimateConfig {
        FirDecimateConfig {
            num_taps,
            decimation,
            block_size,
        }
    }

    #[test]
    fn test_decimate_two_tap_average() {
        // y[n] = 0.5 x[n] + 0.5 x[n-1], keep every second output
        let coeffs = vec![Q31::from_f64(0.5); 2];
        let mut state = vec![Q31::ZERO; 9];
        let mut filter = FirDecimateQ31::init(config(2, 2, 8), &coeffs, &mut state).unwrap();

        let mut out = vec![Q31::ZERO; 4];
        filter.run(&q31(&[100, 200, 300, 400, 500, 600, 700, 800]), &mut out);
        assert_eq!(bits(&out), vec![50, 250, 450, 650]);

        // The previous block's last sample carries over
        filter.run(&q31(&[900, 1000, 1100, 1200, 1300, 1400, 1500, 1600]), &mut out);
        assert_eq!(bits(&out), vec![850, 1050, 1250, 1450]);
    }

    #[test]
    fn test_decimate_uses_time_reversed_coefficients() {
        // Zero-lag coefficient sits at the end: an impulse shows b[0], b[1], b[2]
        let b = [0.5, 0.25, 0.125];
        let coeffs: Vec<Q31> = b.iter().rev().map(|&c| Q31::from_f64(c)).collect();
        let mut state = vec![Q31::ZERO; 6];
        let mut filter = FirDecimateQ31::init(config(3, 1, 4), &coeffs, &mut state).unwrap();

        let mut impulse = vec![Q31::ZERO; 4];
        impulse[0] = Q31::from_f64(0.5);
        let mut out = vec![Q31::ZERO; 4];
        filter.run(&impulse, &mut out);

        let values: Vec<f64> = out.iter().map(|q| q.to_f64()).collect();
        assert_eq!(values, vec![0.25, 0.125, 0.0625, 0.0]);
    }

    #[test]
    fn test_decimate_output_saturates() {
        let coeffs = vec![Q31::MAX; 2];
        let mut state = vec![Q31::ZERO; 3];
        let mut filter = FirDecimateQ31::init(config(2, 1, 2), &coeffs, &mut state).unwrap();

        let mut out = [Q31::ZERO; 2];
        filter.run(&[Q31::MAX; 2], &mut out);
        // One full-scale product fits; two overflow 1.31 and clamp
        assert_eq!(out[0].to_bits(), i32::MAX - 1);
        assert_eq!(out[1], Q31::MAX);
    }

    #[test]
    fn test_init_rejects_bad_block_size() {
        let coeffs = vec![Q31::ZERO; 4];
        let mut state = vec![Q31::from_bits(7); 12];
        let result = FirDecimateQ31::init(config(4, 3, 8), &coeffs, &mut state);
        assert_eq!(
            result.err(),
            Some(DspError::Length {
                block_size: 8,
                decimation: 3
            })
        );
        assert!(state.iter().all(|q| q.to_bits() == 7));
    }

    #[test]
    fn test_init_rejects_zero_taps() {
        let mut state: Vec<Q31> = Vec::new();
        let result = FirDecimateQ31::init(config(0, 1, 0), &[], &mut state);
        assert!(matches!(result, Err(DspError::Argument { .. })));
        assert_eq!(
            crate::error::status_of(&result),
            crate::error::STATUS_ARGUMENT_ERROR
        );

        let mut untouched = vec![Q31::from_bits(9); 8];
        assert!(FirDecimateQ31::init(config(0, 2, 8), &[], &mut untouched).is_err());
        assert!(untouched.iter().all(|q| q.to_bits() == 9));
    }

    #[test]
    fn test_init_zeroes_exact_span() {
        let coeffs = vec![Q31::ZERO; 4];
        let mut state = vec![Q31::from_bits(-3); 16];
        {
            let filter = FirDecimateQ31::init(config(4, 2, 8), &coeffs, &mut state).unwrap();
            assert_eq!(filter.history().len(), 11);
        }
        assert!(state[..11].iter().all(|&q| q == Q31::ZERO));
        assert!(state[11..].iter().all(|q| q.to_bits() == -3));
    }

    #[test]
    fn test_reset_clears_history() {
        let coeffs = vec![Q31::from_f64(0.5); 2];
        let mut state = vec![Q31::ZERO; 5];
        let mut filter = FirDecimateQ31::init(config(2, 1, 4), &coeffs, &mut state).unwrap();

        let mut out = vec![Q31::ZERO; 4];
        filter.run(&q31(&[10, 20, 30, 40]), &mut out);
        filter.reset();
        filter.run(&q31(&[10, 20, 30, 40]), &mut out);
        assert_eq!(bits(&out), vec![5, 15, 25, 35]);
    }

    #[test]
    fn test_short_block() {
        let coeffs = vec![Q31::from_f64(0.5); 2];
        let mut state = vec![Q31::ZERO; 9];
        let mut filter = FirDecimateQ31::init(config(2, 2, 8), &coeffs, &mut state).unwrap();

        let mut out = vec![Q31::ZERO; 4];
        filter.run(&q31(&[100, 200, 300, 400]), &mut out);
        assert_eq!(bits(&out[..2]), vec![50, 250]);
        filter.run(&q31(&[500, 600]), &mut out);
        assert_eq!(bits(&out[..1]), vec![450]);
    }
}
