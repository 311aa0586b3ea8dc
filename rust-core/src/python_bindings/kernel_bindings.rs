//! Python bindings for the vector kernels

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::fixed::Q31;
use crate::kernels;

pub(super) fn contiguous<'a, T: numpy::Element>(array: &'a PyReadonlyArray1<T>) -> PyResult<&'a [T]> {
    array
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

pub(super) fn to_q31(values: &[i32]) -> Vec<Q31> {
    values.iter().map(|&v| Q31::from_bits(v)).collect()
}

fn same_length(a: usize, b: usize) -> PyResult<()> {
    if a != b {
        return Err(PyValueError::new_err(format!(
            "input lengths differ: {} vs {}",
            a, b
        )));
    }
    Ok(())
}

/// Dot product of two Q31 vectors
///
/// Returns:
///     Raw 16.48 accumulator
#[pyfunction]
pub fn dot_prod_q31(a: PyReadonlyArray1<i32>, b: PyReadonlyArray1<i32>) -> PyResult<i64> {
    let (a, b) = (contiguous(&a)?, contiguous(&b)?);
    same_length(a.len(), b.len())?;
    Ok(kernels::dot_prod_q31(&to_q31(a), &to_q31(b)).to_bits())
}

/// Add a constant to every element
#[pyfunction]
pub fn offset_f32<'py>(
    py: Python<'py>,
    src: PyReadonlyArray1<f32>,
    offset: f32,
) -> PyResult<&'py PyArray1<f32>> {
    let src = contiguous(&src)?;
    let mut dst = vec![0.0f32; src.len()];
    kernels::offset_f32(src, offset, &mut dst);
    Ok(PyArray1::from_vec(py, dst))
}

/// Complex dot product of interleaved (re, im) vectors
///
/// Returns:
///     (real, imag) tuple
#[pyfunction]
pub fn cmplx_dot_prod_f32(a: PyReadonlyArray1<f32>, b: PyReadonlyArray1<f32>) -> PyResult<(f32, f32)> {
    let (a, b) = (contiguous(&a)?, contiguous(&b)?);
    same_length(a.len(), b.len())?;
    if a.len() % 2 != 0 {
        return Err(PyValueError::new_err("interleaved complex data must have even length"));
    }
    let result = kernels::cmplx_dot_prod_f32(a, b);
    Ok((result.re, result.im))
}

/// RMS of a Q31 vector, returned as raw Q31
#[pyfunction]
pub fn rms_q31(src: PyReadonlyArray1<i32>) -> PyResult<i32> {
    let src = contiguous(&src)?;
    Ok(kernels::rms_q31(&to_q31(src)).to_bits())
}
