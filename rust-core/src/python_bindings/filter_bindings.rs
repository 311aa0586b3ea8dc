//! Python bindings for the streaming filters
//!
//! Python objects cannot hold borrowed buffers, so the wrapper owns its
//! coefficient and state vectors and rebinds them for every call.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::kernel_bindings::{contiguous, to_q31};
use super::to_py_err;
use crate::filters::{FilterState, FirDecimateConfig, FirDecimateQ31};
use crate::fixed::Q31;

/// Q31 decimating FIR filter exposed to Python
#[pyclass(name = "FirDecimator")]
pub struct PyFirDecimator {
    config: FirDecimateConfig,
    coeffs: Vec<Q31>,
    state: Vec<Q31>,
}

#[pymethods]
impl PyFirDecimator {
    /// Create a new decimator
    ///
    /// Args:
    ///     coefficients: Time-reversed Q31 coefficients as int32 array
    ///     decimation: Decimation factor M
    ///     block_size: Input samples per call (multiple of M)
    #[new]
    fn new(coefficients: PyReadonlyArray1<i32>, decimation: usize, block_size: usize) -> PyResult<Self> {
        let coeffs = to_q31(contiguous(&coefficients)?);
        let config = FirDecimateConfig {
            num_taps: coeffs.len(),
            decimation,
            block_size,
        };
        let mut state = vec![Q31::ZERO; config.state_len()];
        FirDecimateQ31::init(config, &coeffs, &mut state).map_err(to_py_err)?;

        Ok(Self {
            config,
            coeffs,
            state,
        })
    }

    /// Filter and decimate one block
    ///
    /// Args:
    ///     input_signal: Q31 samples as int32 array
    ///
    /// Returns:
    ///     Decimated Q31 output as int32 array
    fn process_block<'py>(
        &mut self,
        py: Python<'py>,
        input_signal: PyReadonlyArray1<i32>,
    ) -> PyResult<&'py PyArray1<i32>> {
        let input = to_q31(contiguous(&input_signal)?);
        if input.len() > self.config.block_size || input.len() % self.config.decimation != 0 {
            return Err(PyValueError::new_err(format!(
                "block of {} samples must be at most {} and a multiple of {}",
                input.len(),
                self.config.block_size,
                self.config.decimation
            )));
        }

        let mut output = vec![Q31::ZERO; input.len() / self.config.decimation];
        FirDecimateQ31::bind(self.config, &self.coeffs, &mut self.state).run(&input, &mut output);

        let raw: Vec<i32> = output.iter().map(|q| q.to_bits()).collect();
        Ok(PyArray1::from_vec(py, raw))
    }

    /// Reset filter state
    fn reset(&mut self) {
        FirDecimateQ31::bind(self.config, &self.coeffs, &mut self.state).reset();
    }

    /// Get filter length
    fn length(&self) -> usize {
        self.config.num_taps
    }

    /// Get decimation factor
    fn decimation(&self) -> usize {
        self.config.decimation
    }
}
