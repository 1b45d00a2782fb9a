//! Formtensor: reference tensors and dof maps for finite element forms
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod dofmap;
pub mod element_data;
pub mod form;
pub mod tensor;
pub mod traits;
pub mod types;
