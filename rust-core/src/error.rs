//! Status reporting for filter construction and numeric primitives
//!
//! Only configuration problems are errors. Accumulator wrap and truncation
//! loss are documented numeric behavior and are never reported.

use thiserror::Error;

/// Status code for a successful operation
pub const STATUS_SUCCESS: i8 = 0;

/// Status code for an out-of-range argument (e.g. square root of a negative value)
pub const STATUS_ARGUMENT_ERROR: i8 = -1;

/// Status code for a block-size / length validation failure
pub const STATUS_LENGTH_ERROR: i8 = -2;

/// Configuration and argument errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DspError {
    #[error("block size {block_size} is not a multiple of decimation factor {decimation}")]
    Length { block_size: usize, decimation: usize },

    #[error("argument out of range: {reason}")]
    Argument { reason: &'static str },
}

impl DspError {
    /// Closed status-code mapping used across the FFI boundary
    pub fn status_code(&self) -> i8 {
        match self {
            DspError::Length { .. } => STATUS_LENGTH_ERROR,
            DspError::Argument { .. } => STATUS_ARGUMENT_ERROR,
        }
    }
}

/// Result type for DSP operations
pub type Result<T> = std::result::Result<T, DspError>;

/// Collapse a result into its status code
pub fn status_of<T>(result: &Result<T>) -> i8 {
    match result {
        Ok(_) => STATUS_SUCCESS,
        Err(err) => err.status_code(),
    }
}
