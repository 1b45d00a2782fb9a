//! Finite element descriptions

use crate::types::{EntityDofs, RealScalar};

/// The family of an element, as far as the dof map needs to tell them apart.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ElementFamily {
    /// Scalar nodal Lagrange element.
    Lagrange,
    /// Direct sum of sub-elements.
    Mixed,
    /// Any family without dedicated support.
    Other,
}

/// Nodal data of a point evaluation dual basis.
#[derive(Debug, Clone, PartialEq)]
pub struct DualBasis<T: RealScalar> {
    /// Evaluation points on the reference cell, in `[-1, 1]` coordinates,
    /// one per local dof of the element.
    pub points: Vec<Vec<T>>,
}

/// A finite element description supplied by the host element library.
///
/// A simple element acts as its own sole sub-element: `num_sub_elements`
/// returns 1 and `sub_element(0)` returns the element itself. A mixed
/// element returns its parts, in order.
pub trait Element {
    /// Scalar type of nodal coordinates.
    type T: RealScalar;

    /// Topological dimension of the reference cell.
    fn cell_dimension(&self) -> usize;

    /// Dimension of the local function space.
    fn space_dimension(&self) -> usize;

    /// Size of the given axis of the value tensor.
    fn value_dimension(&self, axis: usize) -> usize;

    /// The family of the element.
    fn family(&self) -> ElementFamily;

    /// String identifying the element, used in diagnostics.
    fn signature(&self) -> String;

    /// Number of sub-elements.
    fn num_sub_elements(&self) -> usize;

    /// The sub-element with the given index.
    fn sub_element(&self, index: usize) -> &Self;

    /// Entity dof tables, one per sub-element, each indexed by entity
    /// dimension and then by entity number.
    fn entity_dofs(&self) -> &[EntityDofs];

    /// Nodal interpolation data, if the element has point evaluation dofs.
    fn dual_basis(&self) -> Option<&DualBasis<Self::T>>;
}
