//! Input/output helpers.
//!
//! - artifact read/write with candidate-path fallback (`artifact`)

pub mod artifact;

pub use artifact::*;
