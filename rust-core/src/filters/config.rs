//! Filter configuration and state-buffer sizing
//!
//! Each config carries the scalars a filter is initialized with and reports
//! how long the caller's state buffer must be.

use crate::error::{DspError, Result};
use crate::fixed::Q31;

/// Decimating FIR configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirDecimateConfig {
    /// Number of coefficients
    pub num_taps: usize,

    /// Decimation factor M (one output per M inputs)
    pub decimation: usize,

    /// Input samples per call, must be a multiple of `decimation`
    pub block_size: usize,
}

impl Default for FirDecimateConfig {
    fn default() -> Self {
        Self {
            num_taps: 32,
            decimation: 4,
            block_size: 64,
        }
    }
}

impl FirDecimateConfig {
    /// `num_taps + block_size - 1`
    pub fn state_len(&self) -> usize {
        (self.num_taps + self.block_size).saturating_sub(1)
    }

    /// Outputs produced by one full block
    pub fn output_len(&self) -> usize {
        if self.decimation == 0 {
            0
        } else {
            self.block_size / self.decimation
        }
    }

    /// Check that there is at least one tap and that the block size is an
    /// exact multiple of the decimation factor
    ///
    /// # Returns
    /// * `DspError::Argument` for a zero-tap filter
    /// * `DspError::Length` for a bad decimation factor or block size
    pub fn validate(&self) -> Result<()> {
        if self.num_taps == 0 {
            return Err(DspError::Argument {
                reason: "FIR decimator needs at least one tap",
            });
        }
        if self.decimation == 0 || self.block_size % self.decimation != 0 {
            return Err(DspError::Length {
                block_size: self.block_size,
                decimation: self.decimation,
            });
        }
        Ok(())
    }
}

/// Lattice IIR configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IirLatticeConfig {
    /// Filter order (number of lattice stages)
    pub num_stages: usize,

    /// Input samples per call
    pub block_size: usize,
}

impl Default for IirLatticeConfig {
    fn default() -> Self {
        Self {
            num_stages: 4,
            block_size: 64,
        }
    }
}

impl IirLatticeConfig {
    /// `num_stages + block_size`
    pub fn state_len(&self) -> usize {
        self.num_stages + self.block_size
    }

    /// Ladder coefficients needed: `num_stages + 1`
    pub fn ladder_len(&self) -> usize {
        self.num_stages + 1
    }
}

/// Adaptive LMS configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LmsConfig {
    /// Number of adaptive coefficients
    pub num_taps: usize,

    /// Step size controlling the coefficient update rate
    pub mu: Q31,

    /// Input samples per call
    pub block_size: usize,

    /// Coefficients are interpreted with `post_shift` extra integer bits;
    /// the filter output is shifted left by this amount to compensate
    pub post_shift: u32,
}

impl Default for LmsConfig {
    fn default() -> Self {
        Self {
            num_taps: 16,
            mu: Q31::from_bits(21_474_836), // ~0.01
            block_size: 64,
            post_shift: 0,
        }
    }
}

impl LmsConfig {
    /// `num_taps + block_size - 1`, or zero for a tapless filter with an
    /// empty block
    pub fn state_len(&self) -> usize {
        (self.num_taps + self.block_size).saturating_sub(1)
    }
}
