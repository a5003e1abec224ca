//! Classifier artifact schema and evaluation.
//!
//! Models are implemented as small, pure functions over plain parameter
//! structs so the loader and the front-ends can stay generic.

pub mod model;

pub use model::*;
