//! Streaming filters over caller-owned buffers
//!
//! A filter borrows its coefficient and state buffers and never allocates.
//! `init` is the only place configuration is validated; it zero-fills the
//! history span of the state buffer. Every `run` slides the history forward
//! so consecutive blocks behave as one continuous stream.

pub mod config;
pub mod fir_decimate;
pub mod iir_lattice;
pub mod lms;

pub use config::{FirDecimateConfig, IirLatticeConfig, LmsConfig};
pub use fir_decimate::FirDecimateQ31;
pub use iir_lattice::IirLatticeQ15;
pub use lms::LmsQ31;

/// Behavior shared by the stateful filters
pub trait FilterState {
    type Sample: Copy;

    /// Largest block a single `run` call accepts
    fn block_size(&self) -> usize;

    /// The state span owned by this filter, exactly as long as the
    /// configuration's `state_len()`
    fn history(&self) -> &[Self::Sample];

    /// Forget all past samples, as re-initializing on the same buffers would
    fn reset(&mut self);
}
