//! PBRT common stuff

mod common;
mod hash;

// Re-export
pub use common::*;
pub use hash::*;
