//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod camera;
pub mod film;
pub mod filter;
pub mod geometry;
pub mod image_io;
pub mod integrator;
pub mod interaction;
pub mod light;
pub mod memory;
pub mod parallel;
pub mod pbrt;
pub mod primitive;
pub mod progress;
pub mod rng;
pub mod sampler;
pub mod sampling;
pub mod spectrum;
