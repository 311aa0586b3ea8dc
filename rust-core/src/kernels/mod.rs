//! Stateless block kernels over flat sample vectors
//!
//! Paired inputs must have equal length. That is a caller contract: it is
//! asserted in debug builds and release builds process the common prefix.

pub mod cmplx_dot_prod;
pub mod dot_prod;
pub mod offset;
pub mod rms;

pub use cmplx_dot_prod::{cmplx_dot_prod, cmplx_dot_prod_f32};
pub use dot_prod::{dot_prod_f32, dot_prod_q15, dot_prod_q31};
pub use offset::{offset_f32, offset_q15, offset_q31, offset_q7};
pub use rms::{rms_f32, rms_q15, rms_q31};
