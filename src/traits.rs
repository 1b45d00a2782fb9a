//! Trait definitions

mod element;
mod integration;

pub use element::{DualBasis, Element, ElementFamily};
pub use integration::Integrator;
