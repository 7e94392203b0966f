//! Interpolation helpers for channel sampling.

pub mod functions;
