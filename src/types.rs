//! Types specific to formtensor

use std::fmt;

/// Scalar type of tensor entries and nodal coordinates.
pub trait RealScalar: num::Float + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T: num::Float + fmt::Debug + fmt::Display + Send + Sync + 'static> RealScalar for T {}

/// The role an algebraic index plays in a term.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum IndexKind {
    /// Free index that becomes an axis of the element tensor.
    Primary,
    /// Free index that parametrises a family of tensors.
    Secondary,
    /// Bound index summed out during precomputation.
    Auxiliary,
}

impl IndexKind {
    fn symbol(&self) -> char {
        match self {
            IndexKind::Primary => 'i',
            IndexKind::Secondary => 'a',
            IndexKind::Auxiliary => 'b',
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Primary => write!(f, "primary"),
            IndexKind::Secondary => write!(f, "secondary"),
            IndexKind::Auxiliary => write!(f, "auxiliary"),
        }
    }
}

/// An algebraic index, identified by its kind and its ordinal position
/// within that kind.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Index {
    /// The role of the index.
    pub kind: IndexKind,
    /// Ordinal position among the indices of the same kind.
    pub position: usize,
}

impl Index {
    /// Create an index of the given kind and position.
    pub fn new(kind: IndexKind, position: usize) -> Self {
        Self { kind, position }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.symbol(), self.position)
    }
}

/// The reference cell entity a local dof is attached to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct DofEntity {
    /// Topological dimension of the entity.
    pub dim: usize,
    /// Entity number within that dimension.
    pub entity: usize,
}

/// Dof lists per reference cell entity, indexed by topological dimension
/// and then by entity number within that dimension.
pub type EntityDofs = Vec<Vec<Vec<usize>>>;
