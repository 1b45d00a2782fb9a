//! Reference tensor representation of multilinear forms

pub mod multiindex;
pub mod reference;

pub use multiindex::MultiIndex;
pub use reference::{compile_form, ReferenceTensor};

use crate::types::IndexKind;

/// An error produced while lowering a form to its reference tensors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// The expression was not a single multiplied-out term.
    #[error("cannot build a reference tensor from {found}")]
    NotATerm {
        /// Shape of the rejected expression.
        found: &'static str,
    },
    /// The term carries no integral to evaluate.
    #[error("term has no integral attached")]
    MissingIntegral,
    /// No basis function of the term determines the dimension of an index.
    #[error("unable to find a dimension for {kind} index {position}")]
    UnresolvedDimension {
        /// Kind of the unresolved index.
        kind: IndexKind,
        /// Ordinal position of the index within its kind.
        position: usize,
    },
}
