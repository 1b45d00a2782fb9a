//! Multi-index enumeration and index dimension resolution

use itertools::Itertools;

use crate::form::BasisFunction;
use crate::tensor::TensorError;
use crate::traits::Element;
use crate::types::{Index, IndexKind};

/// An ordered list of index dimensions together with every index tuple
/// they admit.
///
/// Tuples are enumerated in lexicographic order with the last position
/// varying fastest. A rank zero multi-index admits exactly one empty tuple,
/// so a loop over [`MultiIndex::indices`] always runs at least once and a
/// scalar is a tensor with a single entry rather than a special case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiIndex {
    dims: Vec<usize>,
    indices: Vec<Vec<usize>>,
}

impl MultiIndex {
    /// Create a multi-index from the dimension of each position.
    pub fn new(dims: Vec<usize>) -> Self {
        let indices = if dims.is_empty() {
            vec![vec![]]
        } else {
            dims.iter()
                .map(|dim| 0..*dim)
                .multi_cartesian_product()
                .collect()
        };
        Self { dims, indices }
    }

    /// Resolve the multi-index of one kind for the factors of a term.
    ///
    /// The rank is one plus the largest ordinal position of the kind
    /// referenced by any factor, and each position takes its dimension from
    /// the first factor that references it.
    pub fn resolve<E: Element>(
        kind: IndexKind,
        basis_functions: &[BasisFunction<'_, E>],
    ) -> Result<Self, TensorError> {
        let rank = index_rank(kind, basis_functions);
        let dims = (0..rank)
            .map(|position| {
                index_dimension(Index::new(kind, position), basis_functions)
                    .ok_or(TensorError::UnresolvedDimension { kind, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(dims))
    }

    /// Number of index positions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Dimension of each position.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Every admissible index tuple, in enumeration order.
    pub fn indices(&self) -> &[Vec<usize>] {
        &self.indices
    }

    /// Number of admissible tuples.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no tuple is admissible, which happens only when some
    /// position has dimension zero.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Rank of an index kind across the factors of a term: one plus the largest
/// ordinal position referenced, or zero if the kind does not occur.
pub fn index_rank<E: Element>(kind: IndexKind, basis_functions: &[BasisFunction<'_, E>]) -> usize {
    basis_functions
        .iter()
        .flat_map(|v| v.indices())
        .filter(|index| index.kind == kind)
        .map(|index| index.position)
        .max()
        .map_or(0, |position| position + 1)
}

/// Dimension of an index, taken from the first factor that references it.
///
/// A factor's own basis index resolves to the space dimension of its
/// element, a component index to the matching value dimension and a
/// derivative index to the cell dimension the derivative is taken on.
/// Factors are inspected in product order, so the first reference wins.
pub fn index_dimension<E: Element>(
    target: Index,
    basis_functions: &[BasisFunction<'_, E>],
) -> Option<usize> {
    for v in basis_functions {
        if v.index == target {
            return Some(v.element.space_dimension());
        }
        for (axis, component) in v.components.iter().enumerate() {
            if *component == target {
                return Some(v.element.value_dimension(axis));
            }
        }
        for derivative in &v.derivatives {
            if derivative.index == target {
                return Some(derivative.element.cell_dimension());
            }
        }
    }
    None
}
