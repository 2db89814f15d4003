//! Integrators

#[macro_use]
extern crate log;

mod ao;

// Re-export.
pub use ao::*;
