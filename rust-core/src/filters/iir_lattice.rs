//! Q15 lattice-ladder IIR filter over caller-owned buffers
//!
//! Per sample, stage by stage (reflection `k`, delayed backward value `g`):
//!
//! ```text
//! f_next = sat16(f - (g * k >> 15))
//! g_next = sat16((f_next * k >> 15) + g)
//! acc   += g_next * v[stage]
//! ```
//!
//! then `acc += f_last * v[num_stages]` and the output is `sat16(acc >> 15)`.
//! Reflection coefficients are stored `{k_N, ..., k_1}` and ladder
//! coefficients `{v_N, ..., v_0}`. The state buffer is `num_stages +
//! block_size` samples; its window advances by one per sample.

use super::config::IirLatticeConfig;
use super::FilterState;
use crate::fixed::{clip_q31_to_q15, Q15, Q34_30};

/// Lattice IIR filter state
pub struct IirLatticeQ15<'a> {
    /// Reflection coefficients, one per stage
    k_coeffs: &'a [Q15],

    /// Ladder coefficients, `num_stages + 1`
    v_coeffs: &'a [Q15],

    state: &'a mut [Q15],

    num_stages: usize,

    block_size: usize,

    /// Samples of `state` owned by the filter
    state_len: usize,
}

/// `(a * k) >> 15` as an unsaturated 17.15 value
#[inline]
fn scaled(a: Q15, k: Q15) -> i32 {
    a.widening_mul(k).shr_truncate::<15>().to_bits()
}

#[inline]
fn sat_q15(value: i32) -> Q15 {
    Q15::from_bits(clip_q31_to_q15(value))
}

impl<'a> IirLatticeQ15<'a> {
    /// Clear `num_stages + block_size` state samples and bind the buffers
    ///
    /// There is no failure mode.
    pub fn init(
        config: IirLatticeConfig,
        k_coeffs: &'a [Q15],
        v_coeffs: &'a [Q15],
        state: &'a mut [Q15],
    ) -> Self {
        debug_assert_eq!(k_coeffs.len(), config.num_stages, "reflection coefficient count");
        debug_assert_eq!(v_coeffs.len(), config.ladder_len(), "ladder coefficient count");
        debug_assert!(
            state.len() >= config.state_len(),
            "state buffer holds {} samples, {} required",
            state.len(),
            config.state_len()
        );

        let mut filter = Self {
            k_coeffs,
            v_coeffs,
            state,
            num_stages: config.num_stages,
            block_size: config.block_size,
            state_len: config.state_len(),
        };
        filter.reset();
        log::debug!(
            "lattice IIR ready: {} stages, block size {}",
            config.num_stages,
            config.block_size
        );
        filter
    }

    /// Filter one block of at most `block_size` samples into `dst`
    pub fn run(&mut self, src: &[Q15], dst: &mut [Q15]) {
        let block = src.len();
        let stages = self.num_stages;
        debug_assert!(block <= self.block_size, "block larger than configured");
        debug_assert!(dst.len() >= block, "output buffer too short");

        for (n, (&x, out)) in src.iter().zip(dst.iter_mut()).enumerate() {
            let window = &mut self.state[n..n + stages + 1];
            let mut f = x;
            let mut acc = Q34_30::ZERO;

            for (stage, (&k, &v)) in self.k_coeffs.iter().zip(self.v_coeffs).enumerate() {
                let g = window[stage];
                let f_next = sat_q15(i32::from(f.to_bits()) - scaled(g, k));
                let g_next = sat_q15(scaled(f_next, k) + i32::from(g.to_bits()));
                acc = acc.wrapping_add(g_next.widening_mul(v).widen());
                window[stage] = g_next;
                f = f_next;
            }

            acc = acc.wrapping_add(f.widening_mul(self.v_coeffs[stages]).widen());
            window[stages] = f;
            *out = acc.saturate_narrow::<i16, 15>();
        }

        self.state.copy_within(block..block + stages, 0);
    }

    /// Reflection coefficients `{k_N, ..., k_1}`
    pub fn reflection_coeffs(&self) -> &[Q15] {
        self.k_coeffs
    }

    /// Ladder coefficients `{v_N, ..., v_0}`
    pub fn ladder_coeffs(&self) -> &[Q15] {
        self.v_coeffs
    }

    /// Get filter order
    pub fn num_stages(&self) -> usize {
        self.num_stages
    }
}

impl FilterState for IirLatticeQ15<'_> {
    type Sample = Q15;

    fn block_size(&self) -> usize {
        self.block_size
    }

    fn history(&self) -> &[Q15] {
        &self.state[..self.state_len]
    }

    fn reset(&mut self) {
        self.state[..self.state_len].fill(Q15::ZERO);
    }
}
