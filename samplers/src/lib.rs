//! Samplers

#[macro_use]
extern crate log;

mod independent;
mod stratified;

// Re-export.
pub use independent::*;
pub use stratified::*;
