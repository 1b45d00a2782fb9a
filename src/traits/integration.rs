//! Reference cell integration

use crate::form::BasisFunction;
use crate::traits::Element;

/// Evaluator of reference cell integrals for fixed index assignments.
///
/// Implementations must be pure. The compiler calls `integrate` once per
/// index combination and folds the results in a fixed order, so the value
/// returned for a given assignment is part of the reproducibility contract.
pub trait Integrator<E: Element> {
    /// Integrate the product of the basis functions over the reference
    /// cell, with primary, secondary and auxiliary indices bound to the
    /// tuples `i`, `a` and `b`.
    fn integrate(
        &self,
        basis_functions: &[BasisFunction<'_, E>],
        i: &[usize],
        a: &[usize],
        b: &[usize],
    ) -> E::T;
}
