//! Lights

#[macro_use]
extern crate log;

mod distant;
mod scene_sphere;
mod uniform_infinite;

// Re-export.
pub use distant::*;
pub use uniform_infinite::*;
