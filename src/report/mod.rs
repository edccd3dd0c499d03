//! Console output framing.

pub mod generator;

pub use generator::*;
