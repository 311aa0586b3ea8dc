//! qdsp - fixed-point and floating-point DSP arithmetic core
//!
//! Block kernels (dot product, offset, complex dot product, RMS) and
//! streaming filters (decimating FIR, lattice IIR, adaptive LMS) with explicit
//! Qm.n formats, wrapping accumulation and saturating output conversion.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod filters;
pub mod fixed;
pub mod kernels;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{DspError, Result};
pub use filters::{FilterState, FirDecimateQ31, IirLatticeQ15, LmsQ31};
pub use fixed::{Fixed, Q15, Q16_48, Q2_62, Q31, Q34_30, Q63, Q7};
