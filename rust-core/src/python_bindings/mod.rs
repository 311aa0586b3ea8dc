//! PyO3 bindings for Python integration
//!
//! Fixed-point samples cross the boundary as raw integer arrays (`int32`
//! for Q31); floating-point samples as `float32`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::DspError;

mod filter_bindings;
mod kernel_bindings;

fn to_py_err(err: DspError) -> PyErr {
    PyValueError::new_err(format!("{} (status {})", err, err.status_code()))
}

/// Python module definition
#[pymodule]
fn qdsp(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(kernel_bindings::dot_prod_q31, m)?)?;
    m.add_function(wrap_pyfunction!(kernel_bindings::offset_f32, m)?)?;
    m.add_function(wrap_pyfunction!(kernel_bindings::cmplx_dot_prod_f32, m)?)?;
    m.add_function(wrap_pyfunction!(kernel_bindings::rms_q31, m)?)?;

    m.add_class::<filter_bindings::PyFirDecimator>()?;

    Ok(())
}
