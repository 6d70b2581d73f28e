//! Signal filters for the vertical-acceleration channel
//!
//! High-pass removes gravity drift and slow pitch changes; Hann smoothing
//! trims sensor noise above the ride band.
pub mod highpass;
pub mod smoothing;

pub use highpass::{highpass, HighPassFilter};
pub use smoothing::{smooth, HannSmoother};
